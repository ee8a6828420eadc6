use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

/// Comentário de um usuário sobre um filme (collection: comments)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Caller-supplied identifier; must be set before insertion.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Author display name
    pub name: String,

    /// Author email, used for ownership checks
    pub email: String,

    pub movie_id: ObjectId,

    pub text: String,

    pub date: BsonDateTime,
}

impl Comment {
    /// New comment stamped with the current time and a fresh identifier.
    pub fn new(name: &str, email: &str, movie_id: ObjectId, text: &str) -> Self {
        Self {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            email: email.to_string(),
            movie_id,
            text: text.to_string(),
            date: BsonDateTime::now(),
        }
    }

    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

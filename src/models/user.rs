use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

// User model (collection: users). `email` is unique.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// Stored credential, already hashed by the auth layer.
    pub password: String,
    /// Arbitrary key/value preferences, replaced as a whole on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Document>,
}

impl User {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            preferences: None,
        }
    }
}

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Active login for a user (collection: sessions). One document per `user_id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub jwt: String,
}

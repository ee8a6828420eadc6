use mongodb::bson::oid::ObjectId;

use crate::utils::error::StoreError;

/// Parses a hex string identifier coming from the API boundary.
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| StoreError::Validation(format!("Invalid identifier: '{}'", id)))
}

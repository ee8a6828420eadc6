use mongodb::bson::{doc, Document};
use mongodb::options::{InsertOneOptions, UpdateOptions, WriteConcern};
use mongodb::Collection;

use crate::{
    database::{MongoDB, SESSIONS_COLLECTION, USERS_COLLECTION},
    models::{Session, User},
    utils::error::StoreError,
};

/// Acesso às collections `users` e `sessions`.
#[derive(Clone)]
pub struct UserSessionStore {
    users: Collection<User>,
    sessions: Collection<Session>,
}

impl UserSessionStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
            sessions: db.collection(SESSIONS_COLLECTION),
        }
    }

    /// Inserts a user with majority write concern. A taken email is a
    /// `StoreError::Conflict`.
    pub async fn add_user(&self, user: &User) -> Result<(), StoreError> {
        let options = InsertOneOptions::builder()
            .write_concern(WriteConcern::majority())
            .build();

        match self.users.insert_one(user).with_options(options).await {
            Ok(_) => {
                log::info!("✅ User registered: {}", user.email);
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from_write(e, "user is already in the database");
                match &err {
                    StoreError::Conflict(_) => log::warn!("⚠️  User already exists: {}", user.email),
                    _ => log::error!("❌ Failed to insert user {}: {}", user.email, err),
                }
                Err(err)
            }
        }
    }

    /// Stores `jwt` as the single active session of `user_id`, replacing any
    /// previous token.
    ///
    /// One atomic upsert keyed by `user_id`; together with the unique index on
    /// `sessions.user_id` concurrent logins cannot leave two sessions behind.
    pub async fn create_or_refresh_session(&self, user_id: &str, jwt: &str) -> Result<(), StoreError> {
        let options = UpdateOptions::builder().upsert(true).build();

        let result = self
            .sessions
            .update_one(doc! { "user_id": user_id }, doc! { "$set": { "jwt": jwt } })
            .with_options(options)
            .await
            .map_err(|e| StoreError::from_write(e, format!("concurrent session write for {}", user_id)))?;

        if result.upserted_id.is_some() {
            log::info!("🔐 Session created for {}", user_id);
        } else {
            log::info!("🔄 Session refreshed for {}", user_id);
        }
        Ok(())
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    pub async fn get_session(&self, user_id: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.find_one(doc! { "user_id": user_id }).await?)
    }

    /// Deletes the session of `user_id`. `Ok` means the server acknowledged
    /// the delete, even if there was no session; the value is how many
    /// sessions were removed.
    pub async fn delete_session(&self, user_id: &str) -> Result<u64, StoreError> {
        let result = self.sessions.delete_one(doc! { "user_id": user_id }).await?;
        log::debug!("Deleted {} session(s) for {}", result.deleted_count, user_id);
        Ok(result.deleted_count)
    }

    /// Removes the user's session and then the user. Returns how many user
    /// documents were deleted.
    ///
    /// The session is looked up with the email as its `user_id`. If the
    /// session delete fails the user document is left in place.
    pub async fn delete_user(&self, email: &str) -> Result<u64, StoreError> {
        log::info!("🗑️ Deleting user: {}", email);

        if let Err(e) = self.delete_session(email).await {
            log::error!("❌ Session delete failed for {}, keeping user: {}", email, e);
            return Err(e);
        }

        let result = self.users.delete_one(doc! { "email": email }).await?;

        if result.deleted_count == 0 {
            log::warn!("⚠️ User {} not found in database", email);
        } else {
            log::info!("✅ User {} deleted", email);
        }
        Ok(result.deleted_count)
    }

    /// Replaces the user's whole preferences document (no merge).
    ///
    /// `None` is rejected before any write. `Ok` means the server acknowledged
    /// the update, even if no user has this email; the value is how many
    /// users matched.
    pub async fn update_user_preferences(
        &self,
        email: &str,
        preferences: Option<Document>,
    ) -> Result<u64, StoreError> {
        let preferences = preferences
            .ok_or_else(|| StoreError::Validation("user preferences cannot be null".to_string()))?;

        let result = self
            .users
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "preferences": preferences } },
            )
            .await?;

        log::debug!("Preferences updated for {} ({} matched)", email, result.matched_count);
        Ok(result.matched_count)
    }
}

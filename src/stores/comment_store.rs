use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{AggregateOptions, InsertOneOptions, ReadConcern, WriteConcern};
use mongodb::Collection;

use crate::{
    database::{MongoDB, COMMENTS_COLLECTION},
    models::{Comment, Critic},
    stores::MutationOutcome,
    utils::{error::StoreError, ids::parse_object_id},
};

/// Size of the most-active-commenters leaderboard.
pub const CRITICS_LIMIT: i64 = 20;

/// Aggregation behind the leaderboard: group by author email, count, sort
/// descending by count, keep the first `limit` groups.
pub fn top_commenters_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$sortByCount": "$email" },
        doc! { "$limit": limit },
    ]
}

/// Acesso à collection `comments`.
#[derive(Clone)]
pub struct CommentStore {
    comments: Collection<Comment>,
}

impl CommentStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            comments: db.collection(COMMENTS_COLLECTION),
        }
    }

    /// Point lookup; `Ok(None)` when no comment has this id.
    pub async fn get(&self, id: &str) -> Result<Option<Comment>, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.comments.find_one(doc! { "_id": oid }).await?)
    }

    /// Inserts a comment with majority write concern.
    ///
    /// The comment must already carry its identifier. Inserting an identifier
    /// that exists yields `StoreError::Conflict`.
    pub async fn add(&self, comment: Comment) -> Result<Comment, StoreError> {
        let id = comment
            .id
            .ok_or_else(|| StoreError::Validation("must set comment id".to_string()))?;

        let options = InsertOneOptions::builder()
            .write_concern(WriteConcern::majority())
            .build();

        match self.comments.insert_one(&comment).with_options(options).await {
            Ok(_) => {
                log::info!("💬 Comment {} added by {}", id, comment.email);
                Ok(comment)
            }
            Err(e) => {
                let err = StoreError::from_write(e, "comment is already in the database");
                match &err {
                    StoreError::Conflict(_) => log::warn!("⚠️  Duplicate comment id {}", id),
                    _ => log::error!("❌ Failed to insert comment {}: {}", id, err),
                }
                Err(err)
            }
        }
    }

    /// Replaces the text of a comment owned by `requester_email`.
    pub async fn update(
        &self,
        id: &str,
        text: &str,
        requester_email: &str,
    ) -> Result<MutationOutcome, StoreError> {
        let oid = parse_object_id(id)?;

        // Ownership goes into the filter so check and write are one operation
        let result = self
            .comments
            .update_one(
                doc! { "_id": oid, "email": requester_email },
                doc! { "$set": { "text": text } },
            )
            .await?;

        if result.matched_count > 0 {
            log::debug!("Comment {} updated by {}", oid, requester_email);
            return Ok(MutationOutcome::Applied);
        }

        self.classify_miss(oid, requester_email).await
    }

    /// Deletes a comment owned by `requester_email`.
    pub async fn remove(&self, id: &str, requester_email: &str) -> Result<MutationOutcome, StoreError> {
        let oid = parse_object_id(id)?;

        let result = self
            .comments
            .delete_one(doc! { "_id": oid, "email": requester_email })
            .await?;

        if result.deleted_count > 0 {
            log::info!("🗑️ Comment {} deleted by {}", oid, requester_email);
            return Ok(MutationOutcome::Applied);
        }

        self.classify_miss(oid, requester_email).await
    }

    async fn classify_miss(&self, oid: ObjectId, requester_email: &str) -> Result<MutationOutcome, StoreError> {
        let exists = self.comments.count_documents(doc! { "_id": oid }).await? > 0;
        if exists {
            log::warn!("⚠️  {} does not own comment {}", requester_email, oid);
            Ok(MutationOutcome::Forbidden)
        } else {
            Ok(MutationOutcome::NotFound)
        }
    }

    /// Authors with the most comments, highest count first.
    ///
    /// Runs with majority read concern so the leaderboard only reflects
    /// durably committed comments.
    pub async fn top_commenters(&self, limit: i64) -> Result<Vec<Critic>, StoreError> {
        if limit < 1 {
            return Err(StoreError::Validation(format!(
                "limit must be positive, got {}",
                limit
            )));
        }

        let options = AggregateOptions::builder()
            .read_concern(ReadConcern::majority())
            .build();

        let critics: Vec<Critic> = self
            .comments
            .aggregate(top_commenters_pipeline(limit))
            .with_options(options)
            .await?
            .with_type::<Critic>()
            .try_collect()
            .await?;

        log::debug!("📊 Top commenters report: {} critics", critics.len());
        Ok(critics)
    }

    pub async fn most_active_commenters(&self) -> Result<Vec<Critic>, StoreError> {
        self.top_commenters(CRITICS_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::{drop_db, offline_db, scratch_db};

    fn sample_comment(email: &str) -> Comment {
        Comment::new("Sample User", email, ObjectId::new(), "Great movie")
    }

    #[test]
    fn test_pipeline_shape() {
        let pipeline = top_commenters_pipeline(CRITICS_LIMIT);
        assert_eq!(
            pipeline,
            vec![
                doc! { "$sortByCount": "$email" },
                doc! { "$limit": 20_i64 },
            ]
        );
    }

    #[tokio::test]
    async fn test_add_without_id_never_reaches_store() {
        // offline client: any I/O would fail with a server selection error
        let store = CommentStore::new(&offline_db().await);
        let mut comment = sample_comment("someone@example.com");
        comment.id = None;

        let err = store.add(comment).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_malformed_ids_are_validation_errors() {
        let store = CommentStore::new(&offline_db().await);

        assert!(store.get("not-an-object-id").await.unwrap_err().is_validation());
        assert!(store.update("123", "text", "a@b.com").await.unwrap_err().is_validation());
        assert!(store.remove("", "a@b.com").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_non_positive_limit_rejected() {
        let store = CommentStore::new(&offline_db().await);
        assert!(store.top_commenters(0).await.unwrap_err().is_validation());
        assert!(store.top_commenters(-5).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_add_and_get() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);

        let comment = sample_comment("jon@snow.com");
        let id = comment.id_hex().unwrap();
        let added = store.add(comment.clone()).await.unwrap();
        assert_eq!(added, comment);

        assert_eq!(store.get(&id).await.unwrap(), Some(comment));
        assert_eq!(store.get(&ObjectId::new().to_hex()).await.unwrap(), None);

        drop_db(&db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_id_is_conflict() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);

        let comment = sample_comment("jon@snow.com");
        store.add(comment.clone()).await.unwrap();

        let mut duplicate = sample_comment("other@example.com");
        duplicate.id = comment.id;
        let err = store.add(duplicate).await.unwrap_err();
        assert!(err.is_conflict());

        // first write untouched
        let stored = store.get(&comment.id_hex().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.email, "jon@snow.com");

        drop_db(&db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_update_requires_ownership() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);

        let comment = sample_comment("owner@example.com");
        let id = comment.id_hex().unwrap();
        store.add(comment).await.unwrap();

        let outcome = store.update(&id, "hijacked", "intruder@example.com").await.unwrap();
        assert_eq!(outcome, MutationOutcome::Forbidden);
        assert_eq!(store.get(&id).await.unwrap().unwrap().text, "Great movie");

        let missing = ObjectId::new().to_hex();
        let outcome = store.update(&missing, "text", "owner@example.com").await.unwrap();
        assert_eq!(outcome, MutationOutcome::NotFound);

        let outcome = store.update(&id, "Even better the second time", "owner@example.com").await.unwrap();
        assert!(outcome.is_applied());
        assert_eq!(store.get(&id).await.unwrap().unwrap().text, "Even better the second time");

        drop_db(&db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_remove_requires_ownership() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);

        let comment = sample_comment("owner@example.com");
        let id = comment.id_hex().unwrap();
        store.add(comment).await.unwrap();

        assert_eq!(
            store.remove(&id, "intruder@example.com").await.unwrap(),
            MutationOutcome::Forbidden
        );
        assert!(store.get(&id).await.unwrap().is_some());

        assert_eq!(store.remove(&id, "owner@example.com").await.unwrap(), MutationOutcome::Applied);
        assert!(store.get(&id).await.unwrap().is_none());

        // second delete finds nothing
        assert_eq!(store.remove(&id, "owner@example.com").await.unwrap(), MutationOutcome::NotFound);

        drop_db(&db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_top_commenters_ranking() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);

        // author i writes i + 1 comments: 25 authors, 325 comments, distinct counts
        let mut comments = Vec::new();
        for i in 0..25_i64 {
            let email = format!("critic{:02}@example.com", i);
            for _ in 0..=i {
                comments.push(sample_comment(&email));
            }
        }
        let total = comments.len() as i64;
        db.collection::<Comment>(COMMENTS_COLLECTION)
            .insert_many(&comments)
            .await
            .unwrap();

        let critics = store.most_active_commenters().await.unwrap();
        assert_eq!(critics.len(), 20);
        assert!(critics.windows(2).all(|w| w[0].num_comments >= w[1].num_comments));
        assert_eq!(critics[0].email, "critic24@example.com");
        assert_eq!(critics[0].num_comments, 25);
        assert_eq!(critics[19].num_comments, 6);

        // excluded authors wrote 1..=5 comments
        let returned: i64 = critics.iter().map(|c| c.num_comments).sum();
        assert_eq!(returned + (1..=5).sum::<i64>(), total);

        let top3 = store.top_commenters(3).await.unwrap();
        assert_eq!(top3, critics[..3].to_vec());

        drop_db(&db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_top_commenters_empty_collection() {
        let db = scratch_db().await;
        let store = CommentStore::new(&db);
        assert!(store.most_active_commenters().await.unwrap().is_empty());
        drop_db(&db).await;
    }
}

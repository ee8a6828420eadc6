//! Data-access layer for the mflix movie catalog: comments, users and
//! sessions stored in MongoDB.

pub mod config;
pub mod database;
pub mod models;
pub mod stores;
pub mod utils;

pub use config::Config;
pub use database::MongoDB;
pub use stores::{CommentStore, MutationOutcome, UserSessionStore};
pub use utils::error::StoreError;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::Config;
use crate::utils::error::StoreError;

pub const COMMENTS_COLLECTION: &str = "comments";
pub const USERS_COLLECTION: &str = "users";
pub const SESSIONS_COLLECTION: &str = "sessions";

/// Shared connection handle. Cheap to clone; clones share the driver's pool.
#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Connects, checks the server is reachable and creates the indexes the
    /// stores rely on.
    pub async fn new(config: &Config) -> Result<Self, StoreError> {
        log::info!("Connecting to MongoDB database: {}", config.database);

        let mongodb = Self::connect_lazy(config).await?;

        // Test connection
        mongodb.db.list_collection_names().await?;
        log::info!("✅ Successfully connected to MongoDB database: {}", config.database);

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Builds the client without touching the network. The first operation
    /// opens the connections.
    pub async fn connect_lazy(config: &Config) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        client_options.app_name = Some("mflix-data".to_string());
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.min_pool_size = Some(config.min_pool_size);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300)); // 5min idle

        client_options.connect_timeout = Some(config.timeout);
        client_options.server_selection_timeout = Some(config.timeout);

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);

        Ok(Self { db })
    }

    /// Creates the indexes that back the stores' uniqueness rules.
    ///
    /// `sessions(user_id)` being unique is what makes the session upsert
    /// single-document per user even under concurrent logins.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let unique = || IndexOptions::builder().unique(true).build();

        // Os índices únicos são obrigatórios; os demais são só performance
        let indexes: [(&str, Document, Option<IndexOptions>); 3] = [
            (USERS_COLLECTION, doc! { "email": 1 }, Some(unique())),
            (SESSIONS_COLLECTION, doc! { "user_id": 1 }, Some(unique())),
            (COMMENTS_COLLECTION, doc! { "email": 1 }, None),
        ];

        for (collection_name, keys, options) in indexes {
            let description = format!("{}({})", collection_name, keys);
            let required = options.as_ref().and_then(|o| o.unique).unwrap_or(false);
            let model = IndexModel::builder().keys(keys).options(options).build();

            match self.collection::<Document>(collection_name).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index created: {}", description),
                Err(e) if required => {
                    log::error!("❌ Unique index {} could not be created: {}", description, e);
                    return Err(StoreError::Store(e));
                }
                Err(e) => log::debug!("   ℹ️  Index not created {}: {}", description, e),
            }
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Check if the connection is healthy
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(true)
    }
}

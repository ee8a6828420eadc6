use mflix_data::{stores::CRITICS_LIMIT, CommentStore, Config, MongoDB};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    // Primeiro argumento opcional: tamanho do ranking
    let limit = match env::args().nth(1) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| format!("Invalid limit: '{}'", raw))?,
        None => CRITICS_LIMIT,
    };

    log::info!("🚀 Starting mflix report...");

    let db = MongoDB::new(&config).await?;
    let comments = CommentStore::new(&db);

    let critics = comments.top_commenters(limit).await?;
    log::info!("📊 {} most active commenters", critics.len());

    println!("{}", serde_json::to_string_pretty(&critics)?);
    Ok(())
}

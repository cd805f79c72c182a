use crate::cli::commands::open_database;
use crate::config::AppConfig;

pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    db.close().await;
    println!("Schema is up to date ({})", config.database.url);
    Ok(())
}

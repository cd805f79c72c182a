pub mod migrate;
pub mod serve;
pub mod user;

use crate::config::AppConfig;
use crate::database::Database;

/// Connect and bring the schema up to date; every command starts here.
pub(crate) async fn open_database(config: &AppConfig) -> anyhow::Result<Database> {
    let db = Database::connect(&config.database).await?;
    db.migrate().await?;
    Ok(db)
}

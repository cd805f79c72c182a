use crate::database::Database;

/// Shared by every handler. The database is the only state that outlives a request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

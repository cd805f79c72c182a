pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod schema;
pub mod transaction;

pub use manager::{Database, DatabaseError};
pub use transaction::Tx;
pub use repository::Repository;

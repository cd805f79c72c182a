use serde_json::json;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqliteConnection};

use crate::database::manager::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::filter::FilterData;

/// Generic single-table access. Every call runs on the caller's connection,
/// normally the request transaction.
pub struct Repository<T> {
    table_name: &'static str,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    pub const fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_any(&self, conn: &mut SqliteConnection, filter_data: FilterData) -> Result<Vec<T>, DatabaseError> {
        QueryBuilder::<T>::new(self.table_name)?
            .filter(filter_data)?
            .select_all(conn)
            .await
    }

    pub async fn select_one(&self, conn: &mut SqliteConnection, filter_data: FilterData) -> Result<Option<T>, DatabaseError> {
        let filter_data = FilterData { limit: Some(1), ..filter_data };
        QueryBuilder::<T>::new(self.table_name)?
            .filter(filter_data)?
            .select_optional(conn)
            .await
    }

    pub async fn select_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<T>, DatabaseError> {
        self.select_one(conn, FilterData::where_eq(json!({ "id": id }))).await
    }

    pub async fn count(&self, conn: &mut SqliteConnection, filter_data: FilterData) -> Result<i64, DatabaseError> {
        QueryBuilder::<T>::new(self.table_name)?
            .filter(filter_data)?
            .count(conn)
            .await
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, DatabaseError> {
        let count = self.count(conn, FilterData::where_eq(json!({ "id": id }))).await?;
        Ok(count > 0)
    }

    /// Returns false when no row had this id
    pub async fn delete_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = ?", self.table_name);
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

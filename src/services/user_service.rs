use serde_json::json;
use sqlx::SqliteConnection;
use tracing::info;

use crate::database::models::User;
use crate::database::{DatabaseError, Repository};
use crate::filter::FilterData;

const USERS: Repository<User> = Repository::new("users");

pub struct UserService;

impl UserService {
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<User>, DatabaseError> {
        USERS.select_any(conn, FilterData::default().order_by(json!("id"))).await
    }

    pub async fn find(conn: &mut SqliteConnection, user_id: i64) -> Result<Option<User>, DatabaseError> {
        USERS.select_id(conn, user_id).await
    }

    /// Existence check used before any favorite mutation
    pub async fn require(conn: &mut SqliteConnection, user_id: i64) -> Result<(), DatabaseError> {
        if USERS.exists(conn, user_id).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("User {} not found", user_id)))
        }
    }

    /// Expects an email already checked by `validation::user_email`
    pub async fn create(conn: &mut SqliteConnection, email: &str) -> Result<User, DatabaseError> {
        let result = sqlx::query("INSERT INTO \"users\" (\"email\") VALUES (?)")
            .bind(email)
            .execute(&mut *conn)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::UniqueViolation(_) => {
                    DatabaseError::Conflict(format!("User with email {} already exists", email))
                }
                other => other,
            })?;

        let user = User { id: result.last_insert_rowid(), email: email.to_string() };
        info!(user_id = user.id, "Created user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn creates_and_lists_users_in_id_order() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        let luke = UserService::create(&mut conn, "luke@rebellion.org").await.unwrap();
        let leia = UserService::create(&mut conn, "leia@rebellion.org").await.unwrap();
        assert_eq!(leia.email, "leia@rebellion.org");

        let users = UserService::list(&mut conn).await.unwrap();
        assert_eq!(users, vec![luke.clone(), leia]);
        assert_eq!(UserService::find(&mut conn, luke.id).await.unwrap(), Some(luke));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        UserService::create(&mut conn, "han@falcon.net").await.unwrap();
        let err = UserService::create(&mut conn, "han@falcon.net").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn require_reports_missing_user() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        let err = UserService::require(&mut conn, 42).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(ref msg) if msg == "User 42 not found"));
    }
}

use serde::Serialize;
use serde_json::json;
use sqlx::SqliteConnection;
use tracing::info;

use crate::database::models::{Favorite, FavoriteRow, FavoriteTarget};
use crate::database::{DatabaseError, Repository};
use crate::filter::FilterData;
use crate::services::{PeopleService, PlanetService, UserService};

const FAVORITES: Repository<FavoriteRow> = Repository::new("favorites");

/// Favorites of one user whose targets still exist
const LIST_LIVE_FAVORITES: &str = r#"
    SELECT f."id", f."user_id", f."planet_id", f."people_id"
    FROM "favorites" f
    LEFT JOIN "planets" pl ON pl."id" = f."planet_id"
    LEFT JOIN "people" pe ON pe."id" = f."people_id"
    WHERE f."user_id" = ? AND (pl."id" IS NOT NULL OR pe."id" IS NOT NULL)
    ORDER BY f."id"
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFavorites {
    pub planets: Vec<i64>,
    pub people: Vec<i64>,
}

pub struct FavoriteService;

impl FavoriteService {
    /// Orphaned favorites (target deleted) stay in storage but are not listed.
    pub async fn list_for_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserFavorites, DatabaseError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(LIST_LIVE_FAVORITES)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        let mut favorites = UserFavorites::default();
        for row in rows {
            match Favorite::try_from(row)?.target {
                FavoriteTarget::Planet(id) => favorites.planets.push(id),
                FavoriteTarget::Person(id) => favorites.people.push(id),
            }
        }
        Ok(favorites)
    }

    pub async fn add(conn: &mut SqliteConnection, user_id: i64, target: FavoriteTarget) -> Result<Favorite, DatabaseError> {
        UserService::require(conn, user_id).await?;
        Self::require_target(conn, target).await?;

        // The unique indexes on (user_id, target) decide duplicates, not a prior read
        let (planet_id, people_id) = target.columns();
        let result = sqlx::query("INSERT INTO \"favorites\" (\"user_id\", \"planet_id\", \"people_id\") VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(planet_id)
            .bind(people_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::UniqueViolation(_) => DatabaseError::Conflict(format!(
                    "{} {} is already in user {}'s favorites",
                    target.label(),
                    target.id(),
                    user_id
                )),
                other => other,
            })?;

        let favorite = Favorite { id: result.last_insert_rowid(), user_id, target };
        info!(user_id, target = ?target, "Added favorite");
        Ok(favorite)
    }

    pub async fn remove(conn: &mut SqliteConnection, user_id: i64, target: FavoriteTarget) -> Result<(), DatabaseError> {
        UserService::require(conn, user_id).await?;
        Self::require_target(conn, target).await?;

        let filter = FilterData::where_eq(json!({ "user_id": user_id, target.column(): target.id() }));
        let row = FAVORITES.select_one(conn, filter).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!(
                "{} {} is not in user {}'s favorites",
                target.label(),
                target.id(),
                user_id
            ))
        })?;

        FAVORITES.delete_id(conn, row.id).await?;
        info!(user_id, target = ?target, "Removed favorite");
        Ok(())
    }

    async fn require_target(conn: &mut SqliteConnection, target: FavoriteTarget) -> Result<(), DatabaseError> {
        match target {
            FavoriteTarget::Planet(id) => PlanetService::require(conn, id).await,
            FavoriteTarget::Person(id) => PeopleService::require(conn, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;
    use crate::validation::{NewPerson, NewPlanet};

    struct Fixture {
        ctx: TestContext,
        user_id: i64,
        planet_id: i64,
        people_id: i64,
    }

    async fn fixture() -> Fixture {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();
        let user_id = UserService::create(&mut conn, "obiwan@jedi.org").await.unwrap().id;
        let planet = NewPlanet { planet_name: "Naboo".to_string(), population: 4_500, weather: "temperate".to_string() };
        let planet_id = PlanetService::create(&mut conn, planet).await.unwrap();
        let person = NewPerson { people_name: Some("Padme".to_string()), ..Default::default() };
        let people_id = PeopleService::create(&mut conn, person).await.unwrap();
        drop(conn);
        Fixture { ctx, user_id, planet_id, people_id }
    }

    #[tokio::test]
    async fn duplicate_favorite_is_a_conflict() {
        let f = fixture().await;
        let mut conn = f.ctx.db.pool().acquire().await.unwrap();

        FavoriteService::add(&mut conn, f.user_id, FavoriteTarget::Planet(f.planet_id)).await.unwrap();
        let err = FavoriteService::add(&mut conn, f.user_id, FavoriteTarget::Planet(f.planet_id)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));

        // Same id as a person is a different favorite
        FavoriteService::add(&mut conn, f.user_id, FavoriteTarget::Person(f.people_id)).await.unwrap();

        let listed = FavoriteService::list_for_user(&mut conn, f.user_id).await.unwrap();
        assert_eq!(listed, UserFavorites { planets: vec![f.planet_id], people: vec![f.people_id] });
    }

    #[tokio::test]
    async fn add_checks_user_and_target_exist() {
        let f = fixture().await;
        let mut conn = f.ctx.db.pool().acquire().await.unwrap();

        let err = FavoriteService::add(&mut conn, 999, FavoriteTarget::Planet(f.planet_id)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(ref m) if m.starts_with("User")));

        let err = FavoriteService::add(&mut conn, f.user_id, FavoriteTarget::Person(999)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(ref m) if m.starts_with("Person")));
    }

    #[tokio::test]
    async fn remove_requires_existing_favorite() {
        let f = fixture().await;
        let mut conn = f.ctx.db.pool().acquire().await.unwrap();
        let target = FavoriteTarget::Planet(f.planet_id);

        assert!(matches!(
            FavoriteService::remove(&mut conn, f.user_id, target).await,
            Err(DatabaseError::NotFound(_))
        ));

        FavoriteService::add(&mut conn, f.user_id, target).await.unwrap();
        FavoriteService::remove(&mut conn, f.user_id, target).await.unwrap();
        assert_eq!(FavoriteService::list_for_user(&mut conn, f.user_id).await.unwrap(), UserFavorites::default());
    }

    #[tokio::test]
    async fn deleted_target_is_hidden_but_row_remains() {
        let f = fixture().await;
        let mut conn = f.ctx.db.pool().acquire().await.unwrap();

        FavoriteService::add(&mut conn, f.user_id, FavoriteTarget::Person(f.people_id)).await.unwrap();
        PeopleService::delete(&mut conn, f.people_id).await.unwrap();

        let listed = FavoriteService::list_for_user(&mut conn, f.user_id).await.unwrap();
        assert!(listed.people.is_empty());

        let stored = FAVORITES
            .count(&mut conn, FilterData::where_eq(json!({ "people_id": f.people_id })))
            .await
            .unwrap();
        assert_eq!(stored, 1);
    }
}

use sqlx::SqliteConnection;
use tracing::info;

use crate::database::models::Planet;
use crate::database::{DatabaseError, Repository};
use crate::validation::{NewPlanet, PlanetChanges};

const PLANETS: Repository<Planet> = Repository::new("planets");

pub struct PlanetService;

impl PlanetService {
    pub async fn create(conn: &mut SqliteConnection, planet: NewPlanet) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO \"planets\" (\"planet_name\", \"population\", \"weather\") VALUES (?, ?, ?)",
        )
        .bind(planet.planet_name)
        .bind(planet.population)
        .bind(planet.weather)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        info!(planet_id = id, "Created planet");
        Ok(id)
    }

    pub async fn find(conn: &mut SqliteConnection, planet_id: i64) -> Result<Option<Planet>, DatabaseError> {
        PLANETS.select_id(conn, planet_id).await
    }

    pub async fn require(conn: &mut SqliteConnection, planet_id: i64) -> Result<(), DatabaseError> {
        if PLANETS.exists(conn, planet_id).await? {
            Ok(())
        } else {
            Err(Self::not_found(planet_id))
        }
    }

    pub async fn update(conn: &mut SqliteConnection, planet_id: i64, changes: PlanetChanges) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE \"planets\" SET \
             \"planet_name\" = COALESCE(?, \"planet_name\"), \
             \"population\" = COALESCE(?, \"population\"), \
             \"weather\" = COALESCE(?, \"weather\") \
             WHERE \"id\" = ?",
        )
        .bind(changes.planet_name)
        .bind(changes.population)
        .bind(changes.weather)
        .bind(planet_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(planet_id));
        }
        info!(planet_id, "Updated planet");
        Ok(())
    }

    pub async fn delete(conn: &mut SqliteConnection, planet_id: i64) -> Result<(), DatabaseError> {
        if !PLANETS.delete_id(conn, planet_id).await? {
            return Err(Self::not_found(planet_id));
        }
        info!(planet_id, "Deleted planet");
        Ok(())
    }

    fn not_found(planet_id: i64) -> DatabaseError {
        DatabaseError::NotFound(format!("Planet {} not found", planet_id))
    }
}

use sqlx::SqliteConnection;
use tracing::info;

use crate::database::models::Person;
use crate::database::{DatabaseError, Repository};
use crate::validation::{NewPerson, PersonChanges};

const PEOPLE: Repository<Person> = Repository::new("people");

pub struct PeopleService;

impl PeopleService {
    pub async fn create(conn: &mut SqliteConnection, person: NewPerson) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO \"people\" (\"people_name\", \"age\", \"force_alignment\", \"height\") VALUES (?, ?, ?, ?)",
        )
        .bind(person.people_name)
        .bind(person.age)
        .bind(person.force_alignment)
        .bind(person.height)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        info!(person_id = id, "Created person");
        Ok(id)
    }

    pub async fn find(conn: &mut SqliteConnection, people_id: i64) -> Result<Option<Person>, DatabaseError> {
        PEOPLE.select_id(conn, people_id).await
    }

    pub async fn require(conn: &mut SqliteConnection, people_id: i64) -> Result<(), DatabaseError> {
        if PEOPLE.exists(conn, people_id).await? {
            Ok(())
        } else {
            Err(Self::not_found(people_id))
        }
    }

    /// Overwrites only the supplied fields
    pub async fn update(conn: &mut SqliteConnection, people_id: i64, changes: PersonChanges) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE \"people\" SET \
             \"people_name\" = COALESCE(?, \"people_name\"), \
             \"age\" = COALESCE(?, \"age\"), \
             \"force_alignment\" = COALESCE(?, \"force_alignment\"), \
             \"height\" = COALESCE(?, \"height\") \
             WHERE \"id\" = ?",
        )
        .bind(changes.people_name)
        .bind(changes.age)
        .bind(changes.force_alignment)
        .bind(changes.height)
        .bind(people_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(people_id));
        }
        info!(person_id = people_id, "Updated person");
        Ok(())
    }

    /// Favorites pointing at the person are left in place
    pub async fn delete(conn: &mut SqliteConnection, people_id: i64) -> Result<(), DatabaseError> {
        if !PEOPLE.delete_id(conn, people_id).await? {
            return Err(Self::not_found(people_id));
        }
        info!(person_id = people_id, "Deleted person");
        Ok(())
    }

    fn not_found(people_id: i64) -> DatabaseError {
        DatabaseError::NotFound(format!("Person {} not found", people_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn luke() -> NewPerson {
        NewPerson {
            people_name: Some("Luke Skywalker".to_string()),
            age: Some(19),
            force_alignment: Some("light".to_string()),
            height: Some(172),
        }
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        let id = PeopleService::create(&mut conn, luke()).await.unwrap();
        let changes = PersonChanges { age: Some(23), ..Default::default() };
        PeopleService::update(&mut conn, id, changes).await.unwrap();

        let person = PeopleService::find(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(person.age, Some(23));
        assert_eq!(person.people_name.as_deref(), Some("Luke Skywalker"));
        assert_eq!(person.force_alignment.as_deref(), Some("light"));
        assert_eq!(person.height, Some(172));
    }

    #[tokio::test]
    async fn create_with_no_fields_stores_nulls() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        let id = PeopleService::create(&mut conn, NewPerson::default()).await.unwrap();
        let person = PeopleService::find(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(person, Person { id, people_name: None, age: None, force_alignment: None, height: None });
    }

    #[tokio::test]
    async fn missing_person_is_not_found() {
        let ctx = TestContext::new().await.unwrap();
        let mut conn = ctx.db.pool().acquire().await.unwrap();

        assert!(matches!(
            PeopleService::update(&mut conn, 99, PersonChanges::default()).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(PeopleService::delete(&mut conn, 99).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(PeopleService::require(&mut conn, 99).await, Err(DatabaseError::NotFound(_))));
    }
}

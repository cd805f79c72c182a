use sqlx::FromRow;

use crate::database::manager::DatabaseError;

/// What a favorite points at. Exactly one target per favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Planet(i64),
    Person(i64),
}

impl FavoriteTarget {
    pub fn id(&self) -> i64 {
        match self {
            FavoriteTarget::Planet(id) | FavoriteTarget::Person(id) => *id,
        }
    }

    /// Column holding this target's id in the favorites table
    pub fn column(&self) -> &'static str {
        match self {
            FavoriteTarget::Planet(_) => "planet_id",
            FavoriteTarget::Person(_) => "people_id",
        }
    }

    /// Capitalized label used in response messages
    pub fn label(&self) -> &'static str {
        match self {
            FavoriteTarget::Planet(_) => "Planet",
            FavoriteTarget::Person(_) => "Person",
        }
    }

    pub(crate) fn columns(&self) -> (Option<i64>, Option<i64>) {
        match *self {
            FavoriteTarget::Planet(id) => (Some(id), None),
            FavoriteTarget::Person(id) => (None, Some(id)),
        }
    }
}

/// Storage shape of the favorites table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FavoriteRow {
    pub id: i64,
    pub user_id: i64,
    pub planet_id: Option<i64>,
    pub people_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub target: FavoriteTarget,
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = DatabaseError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let target = match (row.planet_id, row.people_id) {
            (Some(planet_id), None) => FavoriteTarget::Planet(planet_id),
            (None, Some(people_id)) => FavoriteTarget::Person(people_id),
            _ => {
                return Err(DatabaseError::QueryError(format!(
                    "favorite {} must reference exactly one planet or person",
                    row.id
                )))
            }
        };
        Ok(Favorite {
            id: row.id,
            user_id: row.user_id,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(planet_id: Option<i64>, people_id: Option<i64>) -> FavoriteRow {
        FavoriteRow { id: 1, user_id: 2, planet_id, people_id }
    }

    #[test]
    fn converts_single_target_rows() {
        let fav = Favorite::try_from(row(Some(5), None)).unwrap();
        assert_eq!(fav.target, FavoriteTarget::Planet(5));
        assert_eq!(fav.target.column(), "planet_id");

        let fav = Favorite::try_from(row(None, Some(9))).unwrap();
        assert_eq!(fav.target, FavoriteTarget::Person(9));
        assert_eq!(fav.target.id(), 9);
        assert_eq!(fav.target.label(), "Person");
    }

    #[test]
    fn rejects_rows_with_zero_or_two_targets() {
        assert!(Favorite::try_from(row(None, None)).is_err());
        assert!(Favorite::try_from(row(Some(1), Some(1))).is_err());
    }
}

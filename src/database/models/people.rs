use sqlx::FromRow;

/// A character. Every attribute is optional because creation enforces none.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Person {
    pub id: i64,
    pub people_name: Option<String>,
    pub age: Option<i64>,
    pub force_alignment: Option<String>,
    pub height: Option<i64>,
}

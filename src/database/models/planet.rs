use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Planet {
    pub id: i64,
    pub planet_name: String,
    pub population: i64,
    pub weather: String,
}

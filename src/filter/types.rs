use serde_json::Value;

/// Declarative query over a single table.
///
/// `where_clause` is a JSON object of column/value pairs joined with AND; a
/// `null` value matches `IS NULL`. `order` is a string such as `"col desc, other"`.
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub where_clause: Option<Value>,
    pub order: Option<Value>,
    pub limit: Option<i64>,
}

impl FilterData {
    pub fn where_eq(conditions: Value) -> Self {
        Self {
            where_clause: Some(conditions),
            ..Default::default()
        }
    }

    pub fn order_by(mut self, order: Value) -> Self {
        self.order = Some(order);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub column: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

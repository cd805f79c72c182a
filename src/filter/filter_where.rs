use serde_json::Value;

use super::error::FilterError;
use super::is_identifier;
use super::types::FilterWhereInfo;

pub struct FilterWhere {
    param_values: Vec<Value>,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    fn new() -> Self {
        Self {
            param_values: vec![],
            conditions: vec![],
        }
    }

    /// Compile a where object into an SQL condition and its positional parameters.
    pub fn generate(where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new();
        filter_where.build(where_data)
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn build(&mut self, where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        self.parse_where_data(where_data)?;

        let mut sql_conditions = vec![];
        let conditions = std::mem::take(&mut self.conditions);
        for condition in &conditions {
            sql_conditions.push(self.build_sql_condition(condition)?);
        }
        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        Ok((where_clause, std::mem::take(&mut self.param_values)))
    }

    fn parse_where_data(&mut self, where_data: &Value) -> Result<(), FilterError> {
        let obj = match where_data {
            Value::Null => return Ok(()),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        };

        for (column, data) in obj {
            if !is_identifier(column) {
                return Err(FilterError::InvalidColumn(column.clone()));
            }
            self.conditions.push(FilterWhereInfo {
                column: column.clone(),
                data: data.clone(),
            });
        }
        Ok(())
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        let quoted = format!("\"{}\"", condition.column);
        match &condition.data {
            Value::Null => Ok(format!("{} IS NULL", quoted)),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.param_values.push(condition.data.clone());
                Ok(format!("{} = ?", quoted))
            }
            Value::Array(_) | Value::Object(_) => Err(FilterError::UnsupportedOperator(format!(
                "only equality is supported for column '{}'",
                condition.column
            ))),
        }
    }
}

//! Query filters over record fields.
//!
//! Filters name record *fields*; the universal DAO translates them to
//! columns through its [`ColumnMapping`] and renders parameterised SQL.

use super::dialect::Dialect;
use super::mapping::ColumnMapping;
use scribe_core::{ScribeError, ScribeResult};
use serde_json::Value;

/// A condition on records.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field = value`
    Eq { field: String, value: Value },
    /// Logical AND of every inner filter. An empty conjunction matches all rows.
    And(Vec<Filter>),
}

impl Filter {
    /// Field equality.
    #[must_use]
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Conjunction of filters.
    #[must_use]
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    /// Renders a SQL condition, appending bind values in placeholder order.
    pub(crate) fn render(
        &self,
        mapping: &ColumnMapping,
        dialect: Dialect,
        binds: &mut Vec<SqlValue>,
    ) -> ScribeResult<String> {
        match self {
            Self::Eq { field, value } => {
                let column = mapping.column_for_field(field).ok_or_else(|| {
                    ScribeError::Validation(format!("Unknown filter field: {}", field))
                })?;
                binds.push(SqlValue::from_json(value));
                Ok(format!("{} = {}", column, dialect.placeholder(binds.len())))
            }
            Self::And(filters) if filters.is_empty() => Ok("1 = 1".to_string()),
            Self::And(filters) => {
                let parts = filters
                    .iter()
                    .map(|f| f.render(mapping, dialect, binds))
                    .collect::<ScribeResult<Vec<_>>>()?;
                Ok(format!("({})", parts.join(" AND ")))
            }
        }
    }
}

/// A scalar bound into a query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    /// Converts a JSON value; arrays and objects are bound as JSON text.
    pub(crate) fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Text(n.to_string())),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

//! Column ↔ field mapping for universal records.
//!
//! A mapping is declared as a `const` slice of [`ColumnDef`]s next to the
//! entity's DAO and checked once, when the DAO is constructed.

use scribe_core::rules::sql_identifier;
use scribe_core::{ScribeError, ScribeResult};

/// Primary key column.
pub const COL_ID: &str = "zid";
/// JSON document holding every field of the record.
pub const COL_DATA: &str = "zdata";
/// Creation timestamp column (RFC 3339 text).
pub const COL_TIME_CREATED: &str = "ztcreated";
/// Last update timestamp column (RFC 3339 text).
pub const COL_TIME_UPDATED: &str = "ztupdated";

/// Field name that always resolves to the primary key column.
pub const FIELD_ID: &str = "id";

/// Columns every universal table carries.
pub const SYSTEM_COLUMNS: [&str; 4] = [COL_ID, COL_DATA, COL_TIME_CREATED, COL_TIME_UPDATED];

/// Storage kind of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
}

/// One mapped column: a record field copied into its own table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub column: &'static str,
    pub field: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDef {
    #[must_use]
    pub const fn text(column: &'static str, field: &'static str) -> Self {
        Self {
            column,
            field,
            kind: ColumnKind::Text,
        }
    }

    #[must_use]
    pub const fn integer(column: &'static str, field: &'static str) -> Self {
        Self {
            column,
            field,
            kind: ColumnKind::Integer,
        }
    }
}

/// A validated set of column definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<ColumnDef>,
}

impl ColumnMapping {
    /// Validates and wraps a set of column definitions.
    ///
    /// Rejects names that are not plain SQL identifiers, duplicate columns or
    /// fields, and anything that collides with the system columns or the `id`
    /// field.
    pub fn new(columns: &[ColumnDef]) -> ScribeResult<Self> {
        for (i, def) in columns.iter().enumerate() {
            if sql_identifier(def.column).is_err() {
                return Err(ScribeError::Configuration(format!(
                    "Invalid column name in mapping: '{}'",
                    def.column
                )));
            }
            if def.field.trim().is_empty() {
                return Err(ScribeError::Configuration(format!(
                    "Empty field name for column '{}'",
                    def.column
                )));
            }
            if SYSTEM_COLUMNS.contains(&def.column) {
                return Err(ScribeError::Configuration(format!(
                    "Column '{}' is reserved",
                    def.column
                )));
            }
            if def.field == FIELD_ID {
                return Err(ScribeError::Configuration(format!(
                    "Field '{}' is reserved for the primary key",
                    FIELD_ID
                )));
            }

            let earlier = &columns[..i];
            if earlier.iter().any(|d| d.column.eq_ignore_ascii_case(def.column)) {
                return Err(ScribeError::Configuration(format!(
                    "Duplicate column in mapping: '{}'",
                    def.column
                )));
            }
            if earlier.iter().any(|d| d.field == def.field) {
                return Err(ScribeError::Configuration(format!(
                    "Duplicate field in mapping: '{}'",
                    def.field
                )));
            }
        }

        Ok(Self {
            columns: columns.to_vec(),
        })
    }

    /// Returns the mapped columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Translates a field name to its column, including the `id` field.
    #[must_use]
    pub fn column_for_field(&self, field: &str) -> Option<&'static str> {
        if field == FIELD_ID {
            return Some(COL_ID);
        }
        self.columns.iter().find(|d| d.field == field).map(|d| d.column)
    }
}

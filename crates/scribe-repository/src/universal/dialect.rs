//! SQL dialect differences the universal DAO has to care about.

use super::mapping::ColumnKind;
use scribe_core::{OffsetLimit, ScribeError, ScribeResult};
use std::fmt;

/// Database flavour behind an `AnyPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Detects the dialect from a connection URL's scheme.
    pub fn from_url(url: &str) -> ScribeResult<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| ScribeError::Configuration(format!("Database URL has no scheme: {}", url)))?;

        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ScribeError::Configuration(format!(
                "Unsupported database scheme: {}",
                other
            ))),
        }
    }

    /// Returns the bind placeholder for the `index`-th parameter (1-based).
    #[must_use]
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Postgres => format!("${}", index),
            Self::MySql | Self::Sqlite => "?".to_string(),
        }
    }

    /// Column type used for a mapped column of the given kind.
    #[must_use]
    pub const fn column_type(self, kind: ColumnKind) -> &'static str {
        match (self, kind) {
            (Self::Sqlite, ColumnKind::Text) => "TEXT",
            (Self::Sqlite, ColumnKind::Integer) => "INTEGER",
            (Self::MySql | Self::Postgres, ColumnKind::Text) => "VARCHAR(255)",
            (Self::MySql | Self::Postgres, ColumnKind::Integer) => "BIGINT",
        }
    }

    /// Column type used for the primary key and timestamp columns.
    #[must_use]
    pub const fn key_type(self) -> &'static str {
        match self {
            Self::Sqlite => "TEXT",
            Self::MySql | Self::Postgres => "VARCHAR(64)",
        }
    }

    /// Column type used for the JSON document column.
    #[must_use]
    pub const fn document_type(self) -> &'static str {
        match self {
            Self::MySql => "MEDIUMTEXT",
            Self::Postgres | Self::Sqlite => "TEXT",
        }
    }

    /// Whether `CREATE INDEX IF NOT EXISTS` is understood.
    #[must_use]
    pub const fn supports_create_index_if_not_exists(self) -> bool {
        !matches!(self, Self::MySql)
    }

    /// Renders the `LIMIT`/`OFFSET` tail for a window.
    ///
    /// MySQL and SQLite cannot express an offset without a limit, so an
    /// unbounded window uses their "no limit" idioms.
    #[must_use]
    pub fn limit_clause(self, window: OffsetLimit) -> String {
        match (window.bounded_limit(), window.offset) {
            (None, 0) => String::new(),
            (Some(limit), offset) => format!(" LIMIT {} OFFSET {}", limit, offset),
            (None, offset) => match self {
                Self::MySql => format!(" LIMIT 18446744073709551615 OFFSET {}", offset),
                Self::Sqlite => format!(" LIMIT -1 OFFSET {}", offset),
                Self::Postgres => format!(" OFFSET {}", offset),
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

//! The universal persistence layer.
//!
//! Entities are stored as [`UniversalRecord`]s: a JSON document plus a few
//! mapped columns used for filtering. Entity DAOs translate to and from
//! records and delegate the SQL to a [`UniversalDao`].

mod dao;
mod dialect;
mod filter;
mod mapping;
mod record;
mod sql;

pub use dao::UniversalDao;
#[cfg(test)]
pub use dao::MockUniversalDao;
pub use dialect::Dialect;
pub use filter::Filter;
pub use mapping::{
    ColumnDef, ColumnKind, ColumnMapping, COL_DATA, COL_ID, COL_TIME_CREATED, COL_TIME_UPDATED,
    FIELD_ID,
};
pub use record::{format_timestamp, parse_timestamp, UniversalRecord};
pub use sql::{validate_table_name, SqlUniversalDao, SqlUniversalDaoParameters};

//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (e.g. `vote_dao.rs`).
//! Implementations are organized by technology.

pub mod sql;

pub use sql::{vote_column_mapping, SqlVoteDaoImpl, VOTE_COLUMNS};

//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-table data access abstractions.
//! Each DAO adapts a typed entity to the universal record engine.
//!
//! Hierarchy:
//! ```text
//! Repository (interface + impl) → DAO (interface + impl) → UniversalDao → DB
//! ```

pub mod r#impl;
pub mod vote_dao;

pub use r#impl::{vote_column_mapping, SqlVoteDaoImpl, VOTE_COLUMNS};
pub use vote_dao::VoteDao;
#[cfg(test)]
pub use vote_dao::MockVoteDao;

//! SQL-backed DAO implementations over the universal engine.

mod vote_dao_impl;

pub use vote_dao_impl::{vote_column_mapping, vote_from_record, vote_to_record, SqlVoteDaoImpl, VOTE_COLUMNS};

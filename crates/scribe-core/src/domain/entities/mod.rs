//! Domain entities.

mod vote;

pub use vote::Vote;

//! Domain layer: entities persisted by the repository crate.

pub mod entities;

pub use entities::*;

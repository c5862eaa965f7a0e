//! Repository layer implementations.
//!
//! Trait definitions live in the parent module (`traits.rs`).
//! This module contains concrete structs that implement those traits.

pub mod vote_repository_impl;

pub use vote_repository_impl::VoteRepositoryImpl;

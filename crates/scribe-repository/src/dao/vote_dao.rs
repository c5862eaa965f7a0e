//! VoteDao trait: low-level vote data access abstraction.
//!
//! [`VoteRepository`] builds the cast/retract business operations on top
//! of a `VoteDao`.
//!
//! [`VoteRepository`]: crate::traits::VoteRepository

use async_trait::async_trait;
use scribe_core::{Interface, ScribeResult, UserId, Vote, VoteId};

/// Low-level vote data access object.
///
/// Absence is never an error: `get` and `find_user_vote_for_target` return
/// `Ok(None)`, `update` and `delete` return `Ok(false)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteDao: Interface + Send + Sync {
    /// Persists a new vote. A duplicate id is `ScribeError::Conflict`.
    async fn create(&self, vote: &Vote) -> ScribeResult<bool>;

    /// Finds a vote by ID.
    async fn get(&self, id: &VoteId) -> ScribeResult<Option<Vote>>;

    /// Overwrites an existing vote. Returns `true` if a row was affected.
    async fn update(&self, vote: &Vote) -> ScribeResult<bool>;

    /// Deletes the vote with `vote.id`. Returns `true` if deleted.
    async fn delete(&self, vote: &Vote) -> ScribeResult<bool>;

    /// Returns up to `limit` votes after skipping `offset`, ordered by id.
    /// A `limit` of zero means no upper bound.
    async fn get_n(&self, offset: usize, limit: usize) -> ScribeResult<Vec<Vote>>;

    /// Returns every vote. Same as `get_n(0, 0)`.
    async fn get_all(&self) -> ScribeResult<Vec<Vote>>;

    /// Finds the vote `owner_id` cast on `target_id`.
    ///
    /// Blank input yields `Ok(None)` without touching storage.
    async fn find_user_vote_for_target(
        &self,
        owner_id: &UserId,
        target_id: &str,
    ) -> ScribeResult<Option<Vote>>;

    /// Counts all votes.
    async fn count(&self) -> ScribeResult<u64>;
}

//! Repository trait definitions.

use async_trait::async_trait;
use scribe_core::{Interface, OffsetLimit, ScribeResult, UserId, Vote};

/// Result of casting a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// No vote existed for the pair; a new one was stored.
    Created(Vote),
    /// An existing vote was changed from `previous` to the stored value.
    Changed { vote: Vote, previous: i32 },
    /// The existing vote already had the requested value.
    Unchanged(Vote),
}

impl CastOutcome {
    /// The vote as stored after the cast.
    #[must_use]
    pub fn vote(&self) -> &Vote {
        match self {
            Self::Created(vote) | Self::Changed { vote, .. } | Self::Unchanged(vote) => vote,
        }
    }

    #[must_use]
    pub fn into_vote(self) -> Vote {
        match self {
            Self::Created(vote) | Self::Changed { vote, .. } | Self::Unchanged(vote) => vote,
        }
    }

    /// Returns true if storage was written.
    #[must_use]
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// Vote repository trait.
///
/// Business-level operations over votes, keyed by `(owner, target)`.
#[async_trait]
pub trait VoteRepository: Interface + Send + Sync {
    /// Records `owner_id`'s vote on `target_id`, creating it or changing the
    /// existing one.
    async fn cast_vote(
        &self,
        owner_id: &UserId,
        target_id: &str,
        value: i32,
    ) -> ScribeResult<CastOutcome>;

    /// Removes `owner_id`'s vote on `target_id`. Returns `false` if there was none.
    async fn retract_vote(&self, owner_id: &UserId, target_id: &str) -> ScribeResult<bool>;

    /// Finds `owner_id`'s vote on `target_id`.
    async fn find_vote(&self, owner_id: &UserId, target_id: &str) -> ScribeResult<Option<Vote>>;

    /// Lists votes in a window, ordered by id.
    async fn list_votes(&self, window: OffsetLimit) -> ScribeResult<Vec<Vote>>;

    /// Counts all votes.
    async fn count_votes(&self) -> ScribeResult<u64>;
}

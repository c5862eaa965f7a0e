//! `VoteRepositoryImpl`: Repository layer implementation.
//!
//! Implements the [`VoteRepository`] business interface on top of a
//! [`VoteDao`]:
//!
//! ```text
//! HTTP handler / service
//!   ↓ Arc<dyn VoteRepository>
//! VoteRepositoryImpl          ← one vote per (owner, target)
//!   ↓ Arc<dyn VoteDao>
//! SqlVoteDaoImpl
//!   ↓ Arc<dyn UniversalDao>
//! SqlUniversalDao → MySQL / PostgreSQL / SQLite
//! ```
//!
//! [`VoteRepository`]: crate::traits::VoteRepository
//! [`VoteDao`]: crate::dao::VoteDao

use crate::dao::VoteDao;
use crate::traits::{CastOutcome, VoteRepository};
use async_trait::async_trait;
use scribe_core::{OffsetLimit, ScribeError, ScribeResult, UserId, Vote};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Repository implementation that orchestrates [`VoteDao`] access.
///
/// Storage does not enforce one vote per `(owner, target)`; `cast_vote`
/// keeps it that way by looking the pair up before writing. Concurrent casts
/// for the same pair can still race and both insert.
///
/// [`VoteDao`]: crate::dao::VoteDao
#[derive(Component)]
#[shaku(interface = VoteRepository)]
pub struct VoteRepositoryImpl {
    #[shaku(inject)]
    vote_dao: Arc<dyn VoteDao>,
}

impl VoteRepositoryImpl {
    /// Creates a new `VoteRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(vote_dao: Arc<dyn VoteDao>) -> Self {
        Self { vote_dao }
    }
}

fn require_pair(owner_id: &UserId, target_id: &str) -> ScribeResult<()> {
    if owner_id.is_empty() {
        return Err(ScribeError::validation("owner_id must not be empty"));
    }
    if target_id.is_empty() {
        return Err(ScribeError::validation("target_id must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl VoteRepository for VoteRepositoryImpl {
    async fn cast_vote(
        &self,
        owner_id: &UserId,
        target_id: &str,
        value: i32,
    ) -> ScribeResult<CastOutcome> {
        require_pair(owner_id, target_id)?;
        debug!("Repository: cast vote {} by {} on {}", value, owner_id, target_id);

        match self
            .vote_dao
            .find_user_vote_for_target(owner_id, target_id)
            .await?
        {
            None => {
                let vote = Vote::new(owner_id.clone(), target_id, value);
                if !self.vote_dao.create(&vote).await? {
                    return Err(ScribeError::internal(format!("Vote {} was not stored", vote.id)));
                }
                info!(vote_id = %vote.id, "Vote created");
                Ok(CastOutcome::Created(vote))
            }
            Some(vote) if vote.value == value => Ok(CastOutcome::Unchanged(vote)),
            Some(mut vote) => {
                let previous = vote.value;
                vote.change_value(value);
                if !self.vote_dao.update(&vote).await? {
                    return Err(ScribeError::not_found("Vote", &vote.id));
                }
                info!(vote_id = %vote.id, previous, value, "Vote changed");
                Ok(CastOutcome::Changed { vote, previous })
            }
        }
    }

    async fn retract_vote(&self, owner_id: &UserId, target_id: &str) -> ScribeResult<bool> {
        debug!("Repository: retract vote by {} on {}", owner_id, target_id);

        match self
            .vote_dao
            .find_user_vote_for_target(owner_id, target_id)
            .await?
        {
            Some(vote) => {
                let deleted = self.vote_dao.delete(&vote).await?;
                if deleted {
                    info!(vote_id = %vote.id, "Vote retracted");
                }
                Ok(deleted)
            }
            None => Ok(false),
        }
    }

    async fn find_vote(&self, owner_id: &UserId, target_id: &str) -> ScribeResult<Option<Vote>> {
        self.vote_dao
            .find_user_vote_for_target(owner_id, target_id)
            .await
    }

    async fn list_votes(&self, window: OffsetLimit) -> ScribeResult<Vec<Vote>> {
        debug!("Repository: list votes offset={} limit={}", window.offset, window.limit);
        self.vote_dao.get_n(window.offset, window.limit).await
    }

    async fn count_votes(&self) -> ScribeResult<u64> {
        self.vote_dao.count().await
    }
}

impl std::fmt::Debug for VoteRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteRepositoryImpl").finish_non_exhaustive()
    }
}

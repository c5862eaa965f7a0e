//! Blog vote entity.

use crate::validation::rules::not_empty;
use crate::{Entity, UserId, VoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A user's vote on a piece of content (usually a blog post).
///
/// One vote per `(owner_id, target_id)` is the expected shape of the data,
/// but the storage layer does not enforce it; see `VoteRepository::cast_vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Unique identifier, immutable once created.
    pub id: VoteId,

    /// The user who cast the vote.
    pub owner_id: UserId,

    /// The voted-on content.
    pub target_id: String,

    /// Score/direction of the vote, e.g. `1` or `-1`.
    pub value: i32,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Creates a new vote with a freshly generated ID.
    #[must_use]
    pub fn new(owner_id: UserId, target_id: impl Into<String>, value: i32) -> Self {
        Self::with_id(VoteId::generate(), owner_id, target_id, value)
    }

    /// Creates a new vote with a caller-supplied ID.
    #[must_use]
    pub fn with_id(id: VoteId, owner_id: UserId, target_id: impl Into<String>, value: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            target_id: target_id.into(),
            value,
            created_at: now,
            updated_at: now,
        }
    }

    /// Changes the vote's value and bumps `updated_at`.
    pub fn change_value(&mut self, value: i32) {
        self.value = value;
        self.updated_at = Utc::now();
    }

    /// Returns true if this vote was cast by `owner_id` on `target_id`.
    #[must_use]
    pub fn is_for(&self, owner_id: &UserId, target_id: &str) -> bool {
        self.owner_id == *owner_id && self.target_id == target_id
    }
}

impl Entity<VoteId> for Vote {
    fn id(&self) -> &VoteId {
        &self.id
    }
}

impl Validate for Vote {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = not_empty(self.id.as_str()) {
            errors.add("id", e);
        }
        if let Err(e) = not_empty(self.owner_id.as_str()) {
            errors.add("owner_id", e);
        }
        if let Err(e) = not_empty(&self.target_id) {
            errors.add("target_id", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScribeError, ValidateExt};

    #[test]
    fn test_new_vote() {
        let vote = Vote::new(UserId::from("u-1"), "post-1", 1);
        assert!(!vote.id.is_empty());
        assert_eq!(vote.owner_id.as_str(), "u-1");
        assert_eq!(vote.target_id, "post-1");
        assert_eq!(vote.value, 1);
        assert_eq!(vote.created_at, vote.updated_at);
        assert_eq!(vote.id(), &vote.id);
    }

    #[test]
    fn test_change_value_bumps_updated_at() {
        let mut vote = Vote::new(UserId::from("u-1"), "post-1", 1);
        let created = vote.created_at;
        vote.change_value(-1);
        assert_eq!(vote.value, -1);
        assert_eq!(vote.created_at, created);
        assert!(vote.updated_at >= created);
    }

    #[test]
    fn test_is_for() {
        let vote = Vote::new(UserId::from("u-1"), "post-1", 1);
        assert!(vote.is_for(&UserId::from("u-1"), "post-1"));
        assert!(!vote.is_for(&UserId::from("u-2"), "post-1"));
        assert!(!vote.is_for(&UserId::from("u-1"), "post-2"));
    }

    #[test]
    fn test_valid_vote() {
        let vote = Vote::new(UserId::from("u-1"), "post-1", 1);
        assert!(vote.validate_entity().is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let vote = Vote::with_id(VoteId::from(""), UserId::from(""), "", 0);
        let err = vote.validate_entity().unwrap_err();
        match err {
            ScribeError::Validation(message) => {
                assert!(message.contains("id: not_empty"));
                assert!(message.contains("owner_id: not_empty"));
                assert!(message.contains("target_id: not_empty"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_fields_are_values() {
        let vote = Vote::with_id(VoteId::from(" "), UserId::from(" "), " ", 0);
        assert!(vote.validate_entity().is_ok());
    }
}

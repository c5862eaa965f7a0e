//! `SqlVoteDaoImpl`: universal-record backed implementation of [`VoteDao`].
//!
//! Votes are stored in one table (`gva_blog_vote` by default) with the
//! owner, target and value copied into their own columns:
//!
//! | column   | field       |
//! |----------|-------------|
//! | `zid`    | `id`        |
//! | `zownid` | `owner_id`  |
//! | `ztid`   | `target_id` |
//! | `zval`   | `value`     |

use crate::dao::VoteDao;
use crate::universal::{ColumnDef, ColumnMapping, Filter, SqlUniversalDao, UniversalDao, UniversalRecord};
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use scribe_core::{OffsetLimit, ScribeError, ScribeResult, UserId, ValidateExt, Vote, VoteId};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

const FIELD_OWNER_ID: &str = "owner_id";
const FIELD_TARGET_ID: &str = "target_id";
const FIELD_VALUE: &str = "value";

/// Mapped columns of the vote table.
pub const VOTE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("zownid", FIELD_OWNER_ID),
    ColumnDef::text("ztid", FIELD_TARGET_ID),
    ColumnDef::integer("zval", FIELD_VALUE),
];

/// Validated mapping for [`VOTE_COLUMNS`].
pub fn vote_column_mapping() -> ScribeResult<ColumnMapping> {
    ColumnMapping::new(VOTE_COLUMNS)
}

/// Serializes a vote into the record stored for it.
#[must_use]
pub fn vote_to_record(vote: &Vote) -> UniversalRecord {
    UniversalRecord::new(vote.id.as_str())
        .with_field(FIELD_OWNER_ID, vote.owner_id.as_str())
        .with_field(FIELD_TARGET_ID, vote.target_id.as_str())
        .with_field(FIELD_VALUE, vote.value)
        .with_times(vote.created_at, vote.updated_at)
}

/// Rebuilds a vote from its stored record.
pub fn vote_from_record(record: &UniversalRecord) -> ScribeResult<Vote> {
    let value = record.i64_field(FIELD_VALUE)?;
    let value = i32::try_from(value).map_err(|_| {
        ScribeError::Internal(format!("Vote {} has out-of-range value {}", record.id, value))
    })?;

    Ok(Vote {
        id: VoteId::new(record.id.as_str()),
        owner_id: UserId::new(record.str_field(FIELD_OWNER_ID)?),
        target_id: record.str_field(FIELD_TARGET_ID)?.to_string(),
        value,
        created_at: record.time_created,
        updated_at: record.time_updated,
    })
}

/// Vote DAO delegating storage to a [`UniversalDao`].
#[derive(Component)]
#[shaku(interface = VoteDao)]
pub struct SqlVoteDaoImpl {
    #[shaku(inject)]
    universal: Arc<dyn UniversalDao>,
}

impl SqlVoteDaoImpl {
    /// Creates a DAO over an existing universal DAO.
    ///
    /// The universal DAO must have been built with [`vote_column_mapping`].
    #[must_use]
    pub fn new(universal: Arc<dyn UniversalDao>) -> Self {
        Self { universal }
    }

    /// Creates a DAO storing votes in `table` of the given pool.
    pub fn from_pool(
        pool: Arc<dyn DatabasePoolInterface>,
        table: impl Into<String>,
    ) -> ScribeResult<Self> {
        let universal = SqlUniversalDao::new(pool, table, vote_column_mapping()?)?;
        Ok(Self::new(Arc::new(universal)))
    }

    /// Creates the vote table if it does not exist.
    pub async fn ensure_schema(&self) -> ScribeResult<()> {
        self.universal.ensure_schema().await
    }
}

#[async_trait]
impl VoteDao for SqlVoteDaoImpl {
    async fn create(&self, vote: &Vote) -> ScribeResult<bool> {
        vote.validate_entity()?;
        debug!("DAO: create vote {}", vote.id);
        self.universal.create(&vote_to_record(vote)).await
    }

    async fn get(&self, id: &VoteId) -> ScribeResult<Option<Vote>> {
        debug!("DAO: get vote {}", id);
        self.universal
            .get(id.as_str())
            .await?
            .as_ref()
            .map(vote_from_record)
            .transpose()
    }

    async fn update(&self, vote: &Vote) -> ScribeResult<bool> {
        vote.validate_entity()?;
        debug!("DAO: update vote {}", vote.id);
        self.universal.update(&vote_to_record(vote)).await
    }

    async fn delete(&self, vote: &Vote) -> ScribeResult<bool> {
        debug!("DAO: delete vote {}", vote.id);
        self.universal.delete(vote.id.as_str()).await
    }

    async fn get_n(&self, offset: usize, limit: usize) -> ScribeResult<Vec<Vote>> {
        debug!("DAO: get_n offset={} limit={}", offset, limit);
        self.universal
            .get_n(None, OffsetLimit::new(offset, limit))
            .await?
            .iter()
            .map(vote_from_record)
            .collect()
    }

    async fn get_all(&self) -> ScribeResult<Vec<Vote>> {
        self.get_n(0, 0).await
    }

    async fn find_user_vote_for_target(
        &self,
        owner_id: &UserId,
        target_id: &str,
    ) -> ScribeResult<Option<Vote>> {
        if owner_id.is_empty() || target_id.is_empty() {
            return Ok(None);
        }
        debug!("DAO: find vote of {} on {}", owner_id, target_id);

        let filter = Filter::and([
            Filter::field_eq(FIELD_OWNER_ID, owner_id.as_str()),
            Filter::field_eq(FIELD_TARGET_ID, target_id),
        ]);
        self.universal
            .get_n(Some(filter), OffsetLimit::new(0, 1))
            .await?
            .first()
            .map(vote_from_record)
            .transpose()
    }

    async fn count(&self) -> ScribeResult<u64> {
        self.universal.count(None).await
    }
}

impl std::fmt::Debug for SqlVoteDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlVoteDaoImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universal::MockUniversalDao;

    fn vote() -> Vote {
        Vote::with_id(VoteId::from("v-1"), UserId::from("u-1"), "post-1", 1)
    }

    fn dao(universal: MockUniversalDao) -> SqlVoteDaoImpl {
        SqlVoteDaoImpl::new(Arc::new(universal))
    }

    #[test]
    fn test_vote_columns_are_valid() {
        let mapping = vote_column_mapping().unwrap();
        assert_eq!(mapping.column_for_field("owner_id"), Some("zownid"));
        assert_eq!(mapping.column_for_field("target_id"), Some("ztid"));
        assert_eq!(mapping.column_for_field("value"), Some("zval"));
    }

    #[test]
    fn test_record_conversion() {
        let vote = vote();
        let record = vote_to_record(&vote);

        assert_eq!(record.id, "v-1");
        assert_eq!(record.str_field("owner_id").unwrap(), "u-1");
        assert_eq!(record.i64_field("value").unwrap(), 1);
        assert_eq!(vote_from_record(&record).unwrap(), vote);
    }

    #[test]
    fn test_record_with_bad_value_is_internal_error() {
        let record = vote_to_record(&vote()).with_field("value", i64::MAX);
        assert!(matches!(vote_from_record(&record), Err(ScribeError::Internal(_))));

        let record = vote_to_record(&vote()).with_field("owner_id", 7);
        assert!(vote_from_record(&record).is_err());
    }

    #[tokio::test]
    async fn test_create_delegates_serialized_record() {
        let mut universal = MockUniversalDao::new();
        universal
            .expect_create()
            .withf(|record| {
                record.id == "v-1"
                    && record.str_field("target_id").ok() == Some("post-1")
                    && record.i64_field("value").ok() == Some(1)
            })
            .times(1)
            .returning(|_| Ok(true));

        assert!(dao(universal).create(&vote()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_invalid_vote_skips_storage() {
        let mut universal = MockUniversalDao::new();
        universal.expect_create().never();

        let mut vote = vote();
        vote.target_id = String::new();
        let err = dao(universal).create(&vote).await.unwrap_err();
        assert!(matches!(err, ScribeError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_maps_absent_to_none() {
        let mut universal = MockUniversalDao::new();
        universal
            .expect_get()
            .withf(|id| id == "missing")
            .times(1)
            .returning(|_| Ok(None));

        assert!(dao(universal).get(&VoteId::from("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_uses_vote_id() {
        let mut universal = MockUniversalDao::new();
        universal
            .expect_delete()
            .withf(|id| id == "v-1")
            .times(1)
            .returning(|_| Ok(false));

        assert!(!dao(universal).delete(&vote()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_all_is_unbounded_get_n() {
        let expected = vote();
        let stored = expected.clone();
        let mut universal = MockUniversalDao::new();
        universal
            .expect_get_n()
            .withf(|filter, window| filter.is_none() && *window == OffsetLimit::all())
            .times(1)
            .returning(move |_, _| Ok(vec![vote_to_record(&stored)]));

        assert_eq!(dao(universal).get_all().await.unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn test_find_builds_owner_target_conjunction() {
        let expected = vote();
        let stored = expected.clone();
        let mut universal = MockUniversalDao::new();
        universal
            .expect_get_n()
            .withf(|filter, window| {
                *filter
                    == Some(Filter::and([
                        Filter::field_eq("owner_id", "u-1"),
                        Filter::field_eq("target_id", "post-1"),
                    ]))
                    && *window == OffsetLimit::new(0, 1)
            })
            .times(1)
            .returning(move |_, _| Ok(vec![vote_to_record(&stored)]));

        let found = dao(universal)
            .find_user_vote_for_target(&UserId::from("u-1"), "post-1")
            .await
            .unwrap();
        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn test_find_with_empty_input_skips_storage() {
        let mut universal = MockUniversalDao::new();
        universal.expect_get_n().never();
        let dao = dao(universal);

        assert!(dao
            .find_user_vote_for_target(&UserId::from("u-1"), "")
            .await
            .unwrap()
            .is_none());
        assert!(dao
            .find_user_vote_for_target(&UserId::from(""), "post-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_with_whitespace_target_queries_storage() {
        let mut universal = MockUniversalDao::new();
        universal
            .expect_get_n()
            .withf(|filter, _| {
                *filter
                    == Some(Filter::and([
                        Filter::field_eq("owner_id", "u-1"),
                        Filter::field_eq("target_id", " "),
                    ]))
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let found = dao(universal)
            .find_user_vote_for_target(&UserId::from("u-1"), " ")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_propagates_storage_error() {
        let mut universal = MockUniversalDao::new();
        universal
            .expect_get_n()
            .returning(|_, _| Err(ScribeError::Database("connection reset".to_string())));

        let err = dao(universal)
            .find_user_vote_for_target(&UserId::from("u-1"), "post-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ScribeError::Database(_)));
    }
}

//! Integration tests for SqlVoteDaoImpl against in-memory SQLite.

mod common;

use scribe_core::{ScribeError, UserId, Vote, VoteId};
use scribe_repository::{DatabasePoolInterface, SqlVoteDaoImpl, VoteDao};

fn vote(id: &str, owner: &str, target: &str, value: i32) -> Vote {
    Vote::with_id(VoteId::from(id), UserId::from(owner), target, value)
}

async fn dao() -> SqlVoteDaoImpl {
    common::vote_dao(common::sqlite_pool().await).await
}

#[tokio::test]
async fn test_create_then_get_returns_equal_vote() {
    let dao = dao().await;
    let vote = vote("v-1", "alice", "post-1", 1);

    assert!(dao.create(&vote).await.expect("Failed to create vote"));

    let found = dao
        .get(&vote.id)
        .await
        .expect("Query failed")
        .expect("Vote not found");
    assert_eq!(found, vote);
}

#[tokio::test]
async fn test_generated_id_round_trips() {
    let dao = dao().await;
    let vote = Vote::new(UserId::from("alice"), "post-1", -1);

    dao.create(&vote).await.unwrap();
    assert_eq!(dao.get(&vote.id).await.unwrap(), Some(vote));
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let dao = dao().await;
    assert!(dao.get(&VoteId::from("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let dao = dao().await;
    dao.create(&vote("v-1", "alice", "post-1", 1)).await.unwrap();

    let err = dao
        .create(&vote("v-1", "bob", "post-2", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_update_is_visible_on_get() {
    let dao = dao().await;
    let mut vote = vote("v-1", "alice", "post-1", 1);
    dao.create(&vote).await.unwrap();

    vote.change_value(-1);
    assert!(dao.update(&vote).await.unwrap());

    let found = dao.get(&vote.id).await.unwrap().unwrap();
    assert_eq!(found.value, -1);
    assert_eq!(found.updated_at, vote.updated_at);
    assert_eq!(found.created_at, vote.created_at);
}

#[tokio::test]
async fn test_update_unknown_vote_affects_nothing() {
    let dao = dao().await;
    assert!(!dao.update(&vote("ghost", "alice", "post-1", 1)).await.unwrap());
    assert_eq!(dao.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_then_get_is_none() {
    let dao = dao().await;
    let vote = vote("v-1", "alice", "post-1", 1);
    dao.create(&vote).await.unwrap();

    assert!(dao.delete(&vote).await.unwrap());
    assert!(dao.get(&vote.id).await.unwrap().is_none());
    assert!(!dao.delete(&vote).await.unwrap());
}

#[tokio::test]
async fn test_find_user_vote_for_target() {
    let dao = dao().await;
    dao.create(&vote("v-1", "alice", "post-1", 1)).await.unwrap();
    dao.create(&vote("v-2", "alice", "post-2", -1)).await.unwrap();
    dao.create(&vote("v-3", "bob", "post-1", 1)).await.unwrap();

    let found = dao
        .find_user_vote_for_target(&UserId::from("alice"), "post-2")
        .await
        .unwrap()
        .expect("Vote not found");
    assert_eq!(found.id.as_str(), "v-2");
    assert_eq!(found.value, -1);

    let found = dao
        .find_user_vote_for_target(&UserId::from("bob"), "post-1")
        .await
        .unwrap()
        .expect("Vote not found");
    assert_eq!(found.id.as_str(), "v-3");
}

#[tokio::test]
async fn test_find_unknown_pair_is_none() {
    let dao = dao().await;
    dao.create(&vote("v-1", "alice", "post-1", 1)).await.unwrap();

    let found = dao
        .find_user_vote_for_target(&UserId::from("bob"), "post-1")
        .await
        .expect("Lookup of an unknown pair must not fail");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_whitespace_target_is_a_real_target() {
    let dao = dao().await;
    dao.create(&vote("v-1", "alice", " ", 1)).await.unwrap();

    let found = dao
        .find_user_vote_for_target(&UserId::from("alice"), " ")
        .await
        .unwrap()
        .expect("Vote on whitespace target not found");
    assert_eq!(found.id.as_str(), "v-1");
    assert!(dao
        .find_user_vote_for_target(&UserId::from("alice"), "")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_find_with_empty_input_never_reaches_storage() {
    let pool = common::sqlite_pool().await;
    let dao = common::vote_dao(pool.clone()).await;
    pool.close().await;

    // A closed pool fails every query, so Ok(None) proves no query was issued.
    let found = dao
        .find_user_vote_for_target(&UserId::from("alice"), "")
        .await
        .unwrap();
    assert!(found.is_none());
    let found = dao
        .find_user_vote_for_target(&UserId::from(""), "post-1")
        .await
        .unwrap();
    assert!(found.is_none());

    let err = dao
        .find_user_vote_for_target(&UserId::from("alice"), "post-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ScribeError::Database(_)), "got {err:?}");
}

#[tokio::test]
async fn test_get_n_zero_zero_equals_get_all() {
    let dao = dao().await;
    for i in 0..5 {
        dao.create(&vote(&format!("v-{i}"), "alice", &format!("post-{i}"), 1))
            .await
            .unwrap();
    }

    let all = dao.get_all().await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(dao.get_n(0, 0).await.unwrap(), all);
}

#[tokio::test]
async fn test_get_n_windows() {
    let dao = dao().await;
    for i in 0..5 {
        dao.create(&vote(&format!("v-{i}"), "alice", &format!("post-{i}"), 1))
            .await
            .unwrap();
    }

    let ids = |votes: Vec<Vote>| votes.into_iter().map(|v| v.id.into_inner()).collect::<Vec<_>>();
    assert_eq!(ids(dao.get_n(0, 2).await.unwrap()), ["v-0", "v-1"]);
    assert_eq!(ids(dao.get_n(3, 10).await.unwrap()), ["v-3", "v-4"]);
    assert_eq!(ids(dao.get_n(2, 0).await.unwrap()), ["v-2", "v-3", "v-4"]);
    assert!(dao.get_n(5, 0).await.unwrap().is_empty());
    assert_eq!(dao.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_empty_table() {
    let dao = dao().await;
    assert!(dao.get_all().await.unwrap().is_empty());
    assert_eq!(dao.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_vote_is_rejected_before_storage() {
    let dao = dao().await;
    let err = dao.create(&vote("", "alice", "post-1", 1)).await.unwrap_err();
    assert!(matches!(err, ScribeError::Validation(_)));
    assert_eq!(dao.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_custom_table_name() {
    let pool = common::sqlite_pool().await;
    let dao = SqlVoteDaoImpl::from_pool(pool.clone(), "post_votes").unwrap();
    dao.ensure_schema().await.unwrap();
    dao.create(&vote("v-1", "alice", "post-1", 1)).await.unwrap();

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_votes WHERE zownid = 'alice' AND zval = 1")
        .fetch_one(pool.inner())
        .await
        .unwrap();
    assert_eq!(row.0, 1);

    assert!(SqlVoteDaoImpl::from_pool(pool, "votes; DROP TABLE x").is_err());
}

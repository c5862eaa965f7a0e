//! Dependency injection module using Shaku.
//!
//! `VoteModule` wires the whole vote stack:
//! `DatabasePool → SqlUniversalDao → SqlVoteDaoImpl → VoteRepositoryImpl`.

use crate::dao::{vote_column_mapping, SqlVoteDaoImpl};
use crate::r#impl::VoteRepositoryImpl;
use crate::universal::{validate_table_name, SqlUniversalDao, SqlUniversalDaoParameters, UniversalDao};
use crate::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters};
use scribe_config::AppConfig;
use scribe_core::ScribeResult;
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Vote storage module: connection pool, universal DAO, vote DAO and repository.
module! {
    pub VoteModule {
        components = [
            DatabasePool,
            SqlUniversalDao,
            SqlVoteDaoImpl,
            VoteRepositoryImpl,
        ],
        providers = [],
    }
}

/// Builds the vote module from application configuration.
///
/// Connects the pool and, when `database.auto_create_schema` is set, creates
/// the vote table before returning.
pub async fn build_vote_module(config: &AppConfig) -> ScribeResult<Arc<VoteModule>> {
    let table = config.votes.table_name.clone();
    validate_table_name(&table)?;
    let mapping = vote_column_mapping()?;

    let db_pool = DatabasePool::connect(&config.database).await?;

    let module = VoteModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
            dialect: db_pool.dialect(),
        })
        .with_component_parameters::<SqlUniversalDao>(SqlUniversalDaoParameters {
            table: table.clone(),
            mapping,
        })
        .build();

    if config.database.auto_create_schema {
        let universal: &dyn UniversalDao = module.resolve_ref();
        universal.ensure_schema().await?;
    }

    info!(%table, dialect = %db_pool.dialect(), "Vote module ready");
    Ok(Arc::new(module))
}

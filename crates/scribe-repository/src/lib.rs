//! # Scribe Repository
//!
//! Layered vote storage:
//!
//! ```text
//! HTTP handler / service
//!   ↓  Arc<dyn VoteRepository>  (business interface)
//! VoteRepositoryImpl            (cast / retract, one vote per owner+target)
//!   ↓  Arc<dyn VoteDao>         (DAO interface)
//! SqlVoteDaoImpl                (Vote ↔ UniversalRecord)
//!   ↓  Arc<dyn UniversalDao>    (generic record engine)
//! SqlUniversalDao               (SQL over sqlx AnyPool)
//!   ↓
//! MySQL / PostgreSQL / SQLite
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                    ← VoteRepository trait, CastOutcome
//!   impl/
//!     vote_repository_impl.rs    ← VoteRepositoryImpl
//!   dao/
//!     vote_dao.rs                ← VoteDao trait
//!     impl/sql/
//!       vote_dao_impl.rs         ← SqlVoteDaoImpl, VOTE_COLUMNS
//!   universal/                   ← UniversalDao, SqlUniversalDao, Filter
//!   pool.rs                      ← DatabasePool
//!   di.rs                        ← VoteModule
//! ```

pub mod dao;
pub mod di;
pub mod pool;
pub mod traits;
pub mod universal;
pub mod r#impl;

pub use dao::{SqlVoteDaoImpl, VoteDao};
pub use di::{build_vote_module, VoteModule};
pub use pool::*;
pub use r#impl::VoteRepositoryImpl;
pub use traits::*;
pub use universal::{Filter, SqlUniversalDao, UniversalDao, UniversalRecord};

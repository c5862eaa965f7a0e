//! SQL implementation of the universal DAO.
//!
//! Table layout:
//!
//! ```text
//! zid        primary key
//! zdata      JSON document with every field of the record
//! ztcreated  RFC 3339 creation time
//! ztupdated  RFC 3339 update time
//! <mapped>   one column per mapped field, copied out of zdata for querying
//! ```

use super::dialect::Dialect;
use super::filter::{Filter, SqlValue};
use super::mapping::{ColumnMapping, COL_DATA, COL_ID, COL_TIME_CREATED, COL_TIME_UPDATED};
use super::record::{format_timestamp, parse_timestamp, UniversalRecord};
use super::UniversalDao;
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use scribe_core::rules::sql_identifier;
use scribe_core::{OffsetLimit, ScribeError, ScribeResult};
use shaku::Component;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Row};
use std::sync::Arc;
use tracing::{debug, info};

type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Universal DAO storing records in a single SQL table.
#[derive(Component)]
#[shaku(interface = UniversalDao)]
pub struct SqlUniversalDao {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    pub(crate) table: String,
    pub(crate) mapping: ColumnMapping,
}

impl SqlUniversalDao {
    /// Creates a DAO over `table`, translating fields with `mapping`.
    pub fn new(
        pool: Arc<dyn DatabasePoolInterface>,
        table: impl Into<String>,
        mapping: ColumnMapping,
    ) -> ScribeResult<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self {
            pool,
            table,
            mapping,
        })
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    fn dialect(&self) -> Dialect {
        self.pool.dialect()
    }

    fn select_prefix(&self) -> String {
        format!(
            "SELECT {}, {}, {}, {} FROM {}",
            COL_ID, COL_DATA, COL_TIME_CREATED, COL_TIME_UPDATED, self.table
        )
    }

    fn where_clause(&self, filter: Option<&Filter>, binds: &mut Vec<SqlValue>) -> ScribeResult<String> {
        match filter {
            Some(filter) => Ok(format!(
                " WHERE {}",
                filter.render(&self.mapping, self.dialect(), binds)?
            )),
            None => Ok(String::new()),
        }
    }

    fn mapped_values(&self, record: &UniversalRecord) -> Vec<SqlValue> {
        self.mapping
            .columns()
            .iter()
            .map(|def| record.field(def.field).map_or(SqlValue::Null, SqlValue::from_json))
            .collect()
    }

    fn create_table_sql(&self) -> String {
        let dialect = self.dialect();
        let mut columns = vec![
            format!("{} {} NOT NULL PRIMARY KEY", COL_ID, dialect.key_type()),
            format!("{} {}", COL_DATA, dialect.document_type()),
            format!("{} {} NOT NULL", COL_TIME_CREATED, dialect.key_type()),
            format!("{} {} NOT NULL", COL_TIME_UPDATED, dialect.key_type()),
        ];
        columns.extend(
            self.mapping
                .columns()
                .iter()
                .map(|def| format!("{} {}", def.column, dialect.column_type(def.kind))),
        );
        if !dialect.supports_create_index_if_not_exists() {
            columns.extend(
                self.mapping
                    .columns()
                    .iter()
                    .map(|def| format!("INDEX {} ({})", self.index_name(def.column), def.column)),
            );
        }

        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.table, columns.join(", "))
    }

    fn create_index_sql(&self) -> Vec<String> {
        if !self.dialect().supports_create_index_if_not_exists() {
            return Vec::new();
        }
        self.mapping
            .columns()
            .iter()
            .map(|def| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    self.index_name(def.column),
                    self.table,
                    def.column
                )
            })
            .collect()
    }

    fn index_name(&self, column: &str) -> String {
        format!("idx_{}_{}", self.table, column)
    }

    fn insert_sql(&self) -> String {
        let dialect = self.dialect();
        let mut columns = vec![COL_ID, COL_DATA, COL_TIME_CREATED, COL_TIME_UPDATED];
        columns.extend(self.mapping.columns().iter().map(|def| def.column));
        let placeholders = (1..=columns.len())
            .map(|i| dialect.placeholder(i))
            .collect::<Vec<_>>();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    fn update_sql(&self) -> String {
        let dialect = self.dialect();
        let mut columns = vec![COL_DATA, COL_TIME_UPDATED];
        columns.extend(self.mapping.columns().iter().map(|def| def.column));
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = {}", column, dialect.placeholder(i + 1)))
            .collect::<Vec<_>>();

        format!(
            "UPDATE {} SET {} WHERE {} = {}",
            self.table,
            assignments.join(", "),
            COL_ID,
            dialect.placeholder(columns.len() + 1)
        )
    }
}

#[async_trait]
impl UniversalDao for SqlUniversalDao {
    async fn ensure_schema(&self) -> ScribeResult<()> {
        info!(table = %self.table, "Ensuring table schema");

        sqlx::query(&self.create_table_sql())
            .execute(self.pool.inner())
            .await?;
        for statement in self.create_index_sql() {
            sqlx::query(&statement).execute(self.pool.inner()).await?;
        }
        Ok(())
    }

    async fn create(&self, record: &UniversalRecord) -> ScribeResult<bool> {
        debug!(table = %self.table, id = %record.id, "Creating record");

        let mut values = vec![
            SqlValue::Text(record.id.clone()),
            SqlValue::Text(record.data_json()?),
            SqlValue::Text(format_timestamp(&record.time_created)),
            SqlValue::Text(format_timestamp(&record.time_updated)),
        ];
        values.extend(self.mapped_values(record));

        let sql = self.insert_sql();
        let result = bind_all(sqlx::query(&sql), values)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, id: &str) -> ScribeResult<Option<UniversalRecord>> {
        debug!(table = %self.table, id = %id, "Getting record");

        let sql = format!(
            "{} WHERE {} = {}",
            self.select_prefix(),
            COL_ID,
            self.dialect().placeholder(1)
        );
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn update(&self, record: &UniversalRecord) -> ScribeResult<bool> {
        debug!(table = %self.table, id = %record.id, "Updating record");

        let mut values = vec![
            SqlValue::Text(record.data_json()?),
            SqlValue::Text(format_timestamp(&record.time_updated)),
        ];
        values.extend(self.mapped_values(record));
        values.push(SqlValue::Text(record.id.clone()));

        let sql = self.update_sql();
        let result = bind_all(sqlx::query(&sql), values)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> ScribeResult<bool> {
        debug!(table = %self.table, id = %id, "Deleting record");

        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.table,
            COL_ID,
            self.dialect().placeholder(1)
        );
        let result = sqlx::query(&sql)
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_n(
        &self,
        filter: Option<Filter>,
        window: OffsetLimit,
    ) -> ScribeResult<Vec<UniversalRecord>> {
        debug!(
            table = %self.table,
            offset = window.offset,
            limit = window.limit,
            filtered = filter.is_some(),
            "Listing records"
        );

        let mut binds = Vec::new();
        let where_clause = self.where_clause(filter.as_ref(), &mut binds)?;
        let sql = format!(
            "{}{} ORDER BY {}{}",
            self.select_prefix(),
            where_clause,
            COL_ID,
            self.dialect().limit_clause(window)
        );

        let rows = bind_all(sqlx::query(&sql), binds)
            .fetch_all(self.pool.inner())
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn get_all(&self, filter: Option<Filter>) -> ScribeResult<Vec<UniversalRecord>> {
        self.get_n(filter, OffsetLimit::all()).await
    }

    async fn count(&self, filter: Option<Filter>) -> ScribeResult<u64> {
        let mut binds = Vec::new();
        let where_clause = self.where_clause(filter.as_ref(), &mut binds)?;
        let sql = format!("SELECT COUNT(*) FROM {}{}", self.table, where_clause);

        let row = bind_all(sqlx::query(&sql), binds)
            .fetch_one(self.pool.inner())
            .await?;
        let count: i64 = row.try_get(0)?;

        u64::try_from(count).map_err(|_| ScribeError::Internal(format!("Negative row count: {}", count)))
    }
}

impl std::fmt::Debug for SqlUniversalDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlUniversalDao")
            .field("table", &self.table)
            .field("mapping", &self.mapping)
            .finish_non_exhaustive()
    }
}

/// Checks that a table name can be spliced into SQL.
pub fn validate_table_name(table: &str) -> ScribeResult<()> {
    sql_identifier(table)
        .map_err(|_| ScribeError::Configuration(format!("Invalid table name: '{}'", table)))
}

fn bind_all(mut query: AnyQuery<'_>, values: Vec<SqlValue>) -> AnyQuery<'_> {
    for value in values {
        query = match value {
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

fn record_from_row(row: &AnyRow) -> ScribeResult<UniversalRecord> {
    let id: String = row.try_get(COL_ID)?;
    let data: Option<String> = row.try_get(COL_DATA)?;
    let created: String = row.try_get(COL_TIME_CREATED)?;
    let updated: String = row.try_get(COL_TIME_UPDATED)?;

    Ok(UniversalRecord {
        fields: UniversalRecord::parse_data(data.as_deref())?,
        time_created: parse_timestamp(&created)?,
        time_updated: parse_timestamp(&updated)?,
        id,
    })
}

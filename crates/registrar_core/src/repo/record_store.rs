//! Record store contract and SQLite session implementation.
//!
//! # Responsibility
//! - Provide insert/count/find/delete/list operations over any `Entity`.
//! - Scope all writes to one session that is committed explicitly.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before SQL mutations.
//! - Read paths reject persisted rows that do not decode into a valid record.
//! - A session that is dropped without `commit()` rolls back.

use crate::db::DbError;
use crate::model::{Entity, FieldValue, Fields, Filter, ValidationError};
use log::{debug, info};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{params_from_iter, Connection, Row, ToSql, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No persisted record matches the key of the given kind.
    NotFound(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(kind) => write!(f, "{kind} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store used by the console workflows.
///
/// Implementations keep inserts and deletes pending until `commit()`.
/// Reads issued inside the same session observe pending writes.
pub trait RecordStore {
    /// Stages `record` for insertion and returns the store-assigned row id.
    fn insert_pending<E: Entity>(&self, record: &E) -> RepoResult<i64>;
    /// Counts records of type `E` matching every term of `filter`.
    fn count_matching<E: Entity>(&self, filter: &Filter) -> RepoResult<u64>;
    /// Returns the first record of type `E` matching `filter`.
    fn find_one<E: Entity>(&self, filter: &Filter) -> RepoResult<Option<E>>;
    /// Stages deletion of the persisted record identified by `record.key_filter()`.
    fn delete<E: Entity>(&self, record: &E) -> RepoResult<()>;
    /// Lists every record of type `E` sorted by `E::ORDER_BY`.
    fn list_ordered<E: Entity>(&self) -> RepoResult<Vec<E>>;
    /// Finalizes every pending change of this session.
    fn commit(self) -> RepoResult<()>
    where
        Self: Sized;
}

/// SQLite-backed store session wrapping one transaction.
pub struct SqliteSession<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteSession<'conn> {
    /// Begins a session on a migrated connection.
    pub fn begin(conn: &'conn mut Connection) -> RepoResult<Self> {
        let tx = conn.transaction()?;
        info!("event=session_begin module=repo status=ok");
        Ok(Self { tx })
    }

    /// Discards every pending change of this session.
    pub fn rollback(self) -> RepoResult<()> {
        self.tx.rollback()?;
        info!("event=session_rollback module=repo status=ok");
        Ok(())
    }
}

impl RecordStore for SqliteSession<'_> {
    fn insert_pending<E: Entity>(&self, record: &E) -> RepoResult<i64> {
        record.validate()?;

        let mut columns = Vec::new();
        let mut values = Vec::new();
        for &column in E::COLUMNS {
            if E::GENERATED_COLUMN == Some(column) {
                continue;
            }
            let value = record.column_value(column).ok_or_else(|| {
                RepoError::Validation(ValidationError::Missing { field: column })
            })?;
            columns.push(column);
            values.push(value);
        }

        let placeholders = (1..=values.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.tx.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({placeholders});",
                E::TABLE,
                columns.join(", ")
            ),
            params_from_iter(values.iter()),
        )?;

        let row_id = self.tx.last_insert_rowid();
        debug!(
            "event=record_insert module=repo status=ok kind={} row_id={}",
            E::KIND,
            row_id
        );
        Ok(row_id)
    }

    fn count_matching<E: Entity>(&self, filter: &Filter) -> RepoResult<u64> {
        let (where_sql, values) = where_clause(filter);
        let count: i64 = self.tx.query_row(
            &format!("SELECT COUNT(*) FROM {}{where_sql};", E::TABLE),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        debug!(
            "event=record_count module=repo status=ok kind={} terms={} count={}",
            E::KIND,
            filter.terms().len(),
            count
        );
        u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative count {count}")))
    }

    fn find_one<E: Entity>(&self, filter: &Filter) -> RepoResult<Option<E>> {
        let (where_sql, values) = where_clause(filter);
        let mut stmt = self.tx.prepare(&format!(
            "SELECT {} FROM {}{where_sql} LIMIT 1;",
            E::COLUMNS.join(", "),
            E::TABLE
        ))?;

        let mut rows = stmt.query(params_from_iter(values))?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn delete<E: Entity>(&self, record: &E) -> RepoResult<()> {
        let filter = record.key_filter();
        let (where_sql, values) = where_clause(&filter);
        let changed = self.tx.execute(
            &format!("DELETE FROM {}{where_sql};", E::TABLE),
            params_from_iter(values),
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(E::KIND));
        }

        debug!(
            "event=record_delete module=repo status=ok kind={} rows={}",
            E::KIND,
            changed
        );
        Ok(())
    }

    fn list_ordered<E: Entity>(&self) -> RepoResult<Vec<E>> {
        let mut sql = format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE);
        if !E::ORDER_BY.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&E::ORDER_BY.join(", "));
        }

        let mut stmt = self.tx.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn commit(self) -> RepoResult<()> {
        self.tx.commit()?;
        info!("event=session_commit module=repo status=ok");
        Ok(())
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Text(value) => value.to_sql(),
            Self::Integer(value) => value.to_sql(),
        }
    }
}

fn where_clause(filter: &Filter) -> (String, Vec<&FieldValue>) {
    if filter.is_empty() {
        return (String::new(), Vec::new());
    }

    let conditions = filter
        .terms()
        .iter()
        .enumerate()
        .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>();
    let values = filter.terms().iter().map(|(_, value)| value).collect();
    (format!(" WHERE {}", conditions.join(" AND ")), values)
}

fn parse_record_row<E: Entity>(row: &Row<'_>) -> RepoResult<E> {
    let mut fields = Fields::new();
    for (index, &column) in E::COLUMNS.iter().enumerate() {
        let value = match row.get::<_, Value>(index)? {
            Value::Integer(value) => FieldValue::Integer(value),
            Value::Text(value) => FieldValue::Text(value),
            Value::Null => continue,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "unsupported value type {:?} in {}.{column}",
                    other.data_type(),
                    E::TABLE
                )));
            }
        };
        fields.insert(column, value);
    }

    let record = E::from_fields(&fields).map_err(|err| {
        RepoError::InvalidData(format!("{} row does not decode: {err}", E::KIND))
    })?;
    record.validate()?;
    Ok(record)
}

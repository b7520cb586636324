//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.
//! - SQL tracing records only the statement keyword and table, never bound
//!   values.

use super::migrations::{apply_migrations, OWNED_TABLES};
use super::DbResult;
use crate::logging::sanitize_message;
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const MAX_TRACED_SQL_CHARS: usize = 80;

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Drops every registrar table and re-applies migrations from scratch.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    warn!("event=db_reset module=db status=start");
    let mut sql = String::new();
    for table in OWNED_TABLES {
        sql.push_str(&format!("DROP TABLE IF EXISTS {table};"));
    }
    sql.push_str("PRAGMA user_version = 0;");
    conn.execute_batch(&sql)?;
    apply_migrations(conn)?;
    info!("event=db_reset module=db status=ok");
    Ok(())
}

/// Enables or disables logging of every SQL statement run on `conn`.
pub fn set_sql_echo(conn: &mut Connection, enabled: bool) {
    if enabled {
        conn.trace(Some(log_statement));
    } else {
        conn.trace(None);
    }
    info!("event=sql_echo module=db status=ok enabled={enabled}");
}

fn log_statement(sql: &str) {
    info!(
        "event=sql_trace module=db statement={}",
        sanitize_message(&statement_summary(sql), MAX_TRACED_SQL_CHARS)
    );
}

/// Reduces expanded SQL to its leading keyword and target table.
fn statement_summary(sql: &str) -> String {
    let words = sql.split_whitespace().collect::<Vec<_>>();
    let keyword = words
        .first()
        .map(|word| word.to_ascii_uppercase())
        .unwrap_or_default();
    let target = words
        .iter()
        .position(|word| {
            matches!(
                word.to_ascii_uppercase().as_str(),
                "FROM" | "INTO" | "UPDATE" | "TABLE"
            )
        })
        .and_then(|index| {
            words[index + 1..].iter().find(|word| {
                !matches!(word.to_ascii_uppercase().as_str(), "IF" | "NOT" | "EXISTS")
            })
        })
        .and_then(|word| {
            word.trim_start_matches(['"', '`', '['])
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .next()
        })
        .filter(|table| !table.is_empty());
    match target {
        Some(table) => format!("{keyword} {table}"),
        None => keyword,
    }
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::statement_summary;

    #[test]
    fn summary_keeps_keyword_and_table_only() {
        let insert = "INSERT INTO students (last_name, first_name, e_mail) \
                      VALUES ('Hopper', 'Grace', 'grace@navy.mil')";
        assert_eq!(statement_summary(insert), "INSERT students");

        let count = "SELECT COUNT(*) FROM \"departments\" WHERE abbreviation = 'CS'";
        assert_eq!(statement_summary(count), "SELECT departments");
    }

    #[test]
    fn summary_skips_conditional_clauses_and_handles_bare_keywords() {
        assert_eq!(
            statement_summary("DROP TABLE IF EXISTS departments;"),
            "DROP departments"
        );
        assert_eq!(statement_summary("PRAGMA user_version = 0"), "PRAGMA");
        assert_eq!(statement_summary("   "), "");
    }
}

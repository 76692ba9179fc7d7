use std::iter::Peekable;
use std::str::Chars;

use async_trait::async_trait;
use quiz_core::model::QueryResult;
use sqlx::sqlite::SqliteConnection;
use sqlx::{Column, Executor};

use super::SqliteRepository;
use super::mapping::{conn_err, exec_err, row_to_cells};
use super::seed;
use crate::repository::{QueryExecutor, StorageError, StudentTable};

/// Engine-style message for text holding more than one statement.
pub const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

/// Consume a quoted literal or identifier up to its closing `quote`.
///
/// A doubled quote reads as a closed literal followed by a new one, which
/// lands in the same place.
fn skip_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) {
    for c in chars.by_ref() {
        if c == quote {
            return;
        }
    }
}

/// Returns true if anything other than whitespace, comments or extra `;`
/// follows the first top-level `;`.
fn has_trailing_statement(sql: &str) -> bool {
    let mut chars = sql.chars().peekable();
    let mut ended = false;

    while let Some(c) = chars.next() {
        match c {
            ';' => ended = true,
            c if c.is_whitespace() => {}
            '-' if chars.peek() == Some(&'-') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ if ended => return true,
            '\'' | '"' | '`' => skip_quoted(&mut chars, c),
            '[' => skip_quoted(&mut chars, ']'),
            _ => {}
        }
    }
    false
}

/// Describe then fetch `sql` on one connection.
///
/// Only a single statement is accepted. Column names come from the statement
/// description so an empty result still carries its headers.
async fn run_query(conn: &mut SqliteConnection, sql: &str) -> Result<QueryResult, StorageError> {
    if has_trailing_statement(sql) {
        return Err(StorageError::Execution(MULTIPLE_STATEMENTS.to_string()));
    }

    let described = (&mut *conn).describe(sql).await.map_err(exec_err)?;
    let columns = described
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let rows = sqlx::query(sql)
        .persistent(false)
        .fetch_all(&mut *conn)
        .await
        .map_err(exec_err)?;
    let rows = rows
        .iter()
        .map(row_to_cells)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryResult::new(columns, rows))
}

#[async_trait]
impl QueryExecutor for SqliteRepository {
    async fn execute(&self, sql: &str) -> Result<QueryResult, StorageError> {
        let mut conn = self.read_only.acquire().await.map_err(conn_err)?;
        run_query(&mut conn, sql).await
    }
}

#[async_trait]
impl StudentTable for SqliteRepository {
    async fn snapshot(&self) -> Result<QueryResult, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(conn_err)?;
        run_query(&mut conn, "SELECT * FROM ogrenciler ORDER BY id").await
    }

    async fn reseed(&self) -> Result<(), StorageError> {
        seed::reseed(&self.pool).await
    }
}

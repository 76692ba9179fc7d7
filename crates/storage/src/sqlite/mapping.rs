use quiz_core::model::{Cell, ProgressError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn_err(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Map an error raised while running a submitted query.
///
/// Database errors keep only the engine message (`no such column: x`), which
/// is what the quiz page shows.
pub(crate) fn exec_err(e: sqlx::Error) -> StorageError {
    match e {
        sqlx::Error::Database(db) => StorageError::Execution(db.message().to_string()),
        other => StorageError::Execution(other.to_string()),
    }
}

pub(crate) fn progress_err(e: ProgressError) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} out of range")))
}

pub(crate) fn usize_from_i64(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} out of range")))
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

/// Decode one column by the value's runtime storage class.
fn cell_at(row: &SqliteRow, idx: usize) -> Result<Cell, StorageError> {
    let raw = row.try_get_raw(idx).map_err(ser)?;
    if raw.is_null() {
        return Ok(Cell::Null);
    }
    let storage_class = raw.type_info().name().to_ascii_uppercase();

    let cell = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => Cell::Integer(row.try_get_unchecked::<i64, _>(idx).map_err(ser)?),
        "REAL" => Cell::Real(row.try_get_unchecked::<f64, _>(idx).map_err(ser)?),
        "BLOB" => Cell::Blob(row.try_get_unchecked::<Vec<u8>, _>(idx).map_err(ser)?),
        _ => Cell::Text(row.try_get_unchecked::<String, _>(idx).map_err(ser)?),
    };
    Ok(cell)
}

pub(crate) fn row_to_cells(row: &SqliteRow) -> Result<Vec<Cell>, StorageError> {
    (0..row.len()).map(|idx| cell_at(row, idx)).collect()
}

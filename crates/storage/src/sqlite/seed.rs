use sqlx::SqlitePool;

use super::mapping::conn_err;
use crate::repository::StorageError;

/// Name of the practice table every prompt queries.
pub const STUDENTS_TABLE: &str = "ogrenciler";

/// `(ad, soyad, yas)` rows loaded on every start.
pub const SEED_STUDENTS: [(&str, &str, i64); 4] = [
    ("Ali", "Yilmaz", 21),
    ("Ayse", "Demir", 22),
    ("Mehmet", "Kara", 20),
    ("Fatma", "Celik", 23),
];

/// Clear the practice table and insert the seed rows with ids starting at 1.
pub(crate) async fn reseed(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut tx = pool.begin().await.map_err(conn_err)?;

    sqlx::query("DELETE FROM ogrenciler")
        .execute(&mut *tx)
        .await
        .map_err(conn_err)?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?1")
        .bind(STUDENTS_TABLE)
        .execute(&mut *tx)
        .await
        .map_err(conn_err)?;

    for (ad, soyad, yas) in SEED_STUDENTS {
        sqlx::query("INSERT INTO ogrenciler (ad, soyad, yas) VALUES (?1, ?2, ?3)")
            .bind(ad)
            .bind(soyad)
            .bind(yas)
            .execute(&mut *tx)
            .await
            .map_err(conn_err)?;
    }

    tx.commit().await.map_err(conn_err)?;
    tracing::debug!(rows = SEED_STUDENTS.len(), "seeded {STUDENTS_TABLE}");
    Ok(())
}

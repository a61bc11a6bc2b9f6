//! Area repository backed by `SQLite`.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::Area;
use crate::service::AreaRepository;
use crate::Result;

use super::robot_repo::parse_ts;

/// Repository wrapper around `SQLite` for cleaning areas.
#[derive(Clone)]
pub struct SqliteAreaRepository {
    pool: SqlitePool,
}

impl SqliteAreaRepository {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new area record. Used by seeding and tests; areas are
    /// immutable once created.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, area: &Area) -> Result<()> {
        sqlx::query(
            "INSERT INTO area (id, name, size_x, size_y, passes_needed, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&area.id)
        .bind(&area.name)
        .bind(area.size_x)
        .bind(area.size_y)
        .bind(i64::from(area.passes_needed))
        .bind(area.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AreaRepository for SqliteAreaRepository {
    async fn list(&self) -> Result<Vec<Area>> {
        let rows = sqlx::query(
            "SELECT id, name, size_x, size_y, passes_needed, created_at \
             FROM area ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(area_from_row).collect()
    }
}

pub(crate) fn area_from_row(row: &SqliteRow) -> Result<Area> {
    let passes_needed: i64 = row.try_get("passes_needed")?;
    Ok(Area {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        size_x: row.try_get("size_x")?,
        size_y: row.try_get("size_y")?,
        passes_needed: u32::try_from(passes_needed).unwrap_or(0),
        created_at: parse_ts(row.try_get("created_at")?)?,
    })
}

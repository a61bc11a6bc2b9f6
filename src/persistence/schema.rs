//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` — safe to
//! re-run on every server startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// The coverage grid and position history of a session are stored as
/// JSON documents; they are only ever read and written whole, one
/// session at a time.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS robot (
    id              TEXT PRIMARY KEY NOT NULL,
    name            TEXT NOT NULL,
    size            INTEGER NOT NULL CHECK(size > 0),
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS area (
    id              TEXT PRIMARY KEY NOT NULL,
    name            TEXT NOT NULL,
    size_x          INTEGER NOT NULL CHECK(size_x > 0),
    size_y          INTEGER NOT NULL CHECK(size_y > 0),
    passes_needed   INTEGER NOT NULL CHECK(passes_needed > 0),
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cleaning_session (
    id               TEXT PRIMARY KEY NOT NULL,
    robot_id         TEXT NOT NULL REFERENCES robot(id),
    name             TEXT NOT NULL,
    is_active        INTEGER NOT NULL DEFAULT 0,
    started_at       TEXT NOT NULL,
    ended_at         TEXT,
    last_x           INTEGER NOT NULL DEFAULT 0,
    last_y           INTEGER NOT NULL DEFAULT 0,
    last_reported_at TEXT,
    duration_sec     INTEGER NOT NULL DEFAULT 0,
    coverage         TEXT NOT NULL,
    position_history TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_session_robot_started
    ON cleaning_session(robot_id, started_at DESC);
CREATE INDEX IF NOT EXISTS idx_session_active
    ON cleaning_session(robot_id) WHERE is_active = 1;
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}

//! Demo data seeding.

use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Area, Robot};
use crate::Result;

use super::area_repo::SqliteAreaRepository;
use super::robot_repo::SqliteRobotRepository;

/// Seed a small set of robots and areas for demos and load testing.
///
/// A no-op when the robot table is already populated, so it is safe to
/// run on every startup of a demo instance.
///
/// # Errors
///
/// Returns `AppError::Db` if any insert fails.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM robot")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        info!(robots = count, "database already seeded");
        return Ok(());
    }

    let robots = SqliteRobotRepository::new(pool.clone());
    let areas = SqliteAreaRepository::new(pool.clone());

    robots.insert(&Robot::new("Johnny 5", 500)).await?;
    robots.insert(&Robot::new("Rosie", 300)).await?;

    areas.insert(&Area::new("Work Room #1", 10_000, 12_000, 3)).await?;
    areas.insert(&Area::new("Work Room #2", 5_000, 4_000, 2)).await?;

    info!("seeded demo robots and areas");
    Ok(())
}

//! Area use cases.

use crate::models::Area;
use crate::service::AreaRepository;
use crate::Result;

/// Use cases related to cleaning areas.
pub struct AreaService<A> {
    repo: A,
}

impl<A: AreaRepository> AreaService<A> {
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    /// List all known areas.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the repository query fails.
    pub async fn list(&self) -> Result<Vec<Area>> {
        self.repo.list().await
    }
}

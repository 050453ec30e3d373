use async_trait::async_trait;

use crate::dto::athlete::{AthleteFilter, NewAthlete};
use crate::dto::common::PaginationParams;
use crate::error::Result;
use crate::models::Athlete;

pub mod athlete;
pub mod memory;

pub use athlete::AthleteRepository;
pub use memory::InMemoryAthleteRepository;

/// Read and registration access to stored athletes, independent of the driver.
#[async_trait]
pub trait AthleteStore: Send + Sync {
    /// Athletes matching every set filter, ordered by id, with the offset
    /// applied before the limit.
    async fn find_by_filters(
        &self,
        filter: &AthleteFilter,
        page: PaginationParams,
    ) -> Result<Vec<Athlete>>;

    async fn count(&self) -> Result<i64>;

    /// Fails with `StorageError::DuplicateNationalId` when the national id is taken.
    async fn create(&self, new_athlete: &NewAthlete) -> Result<Athlete>;

    async fn list(&self, page: PaginationParams) -> Result<Vec<Athlete>> {
        self.find_by_filters(&AthleteFilter::default(), page).await
    }
}

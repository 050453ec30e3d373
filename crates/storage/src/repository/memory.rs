use async_trait::async_trait;
use tokio::sync::RwLock;
use validator::Validate;

use super::AthleteStore;
use crate::dto::athlete::{AthleteFilter, NewAthlete};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::Athlete;

/// Athlete store kept in process memory, ordered by id.
///
/// Follows the PostgreSQL store's contract, including the rejection of a
/// negative limit or offset.
#[derive(Debug, Default)]
pub struct InMemoryAthleteRepository {
    athletes: RwLock<Vec<Athlete>>,
}

impl InMemoryAthleteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_athletes(athletes: impl IntoIterator<Item = Athlete>) -> Self {
        let mut athletes: Vec<Athlete> = athletes.into_iter().collect();
        athletes.sort_by_key(|a| a.id);

        Self {
            athletes: RwLock::new(athletes),
        }
    }
}

fn window(page: PaginationParams) -> Result<(usize, usize)> {
    match (usize::try_from(page.offset), usize::try_from(page.limit)) {
        (Ok(offset), Ok(limit)) => Ok((offset, limit)),
        _ => Err(StorageError::negative_row_count(page.limit, page.offset)),
    }
}

#[async_trait]
impl AthleteStore for InMemoryAthleteRepository {
    async fn find_by_filters(
        &self,
        filter: &AthleteFilter,
        page: PaginationParams,
    ) -> Result<Vec<Athlete>> {
        let (offset, limit) = window(page)?;
        let athletes = self.athletes.read().await;

        Ok(athletes
            .iter()
            .filter(|athlete| filter.matches(athlete))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.athletes.read().await.len() as i64)
    }

    async fn create(&self, new_athlete: &NewAthlete) -> Result<Athlete> {
        new_athlete.validate()?;

        let mut athletes = self.athletes.write().await;

        if athletes
            .iter()
            .any(|a| a.national_id == new_athlete.national_id)
        {
            return Err(StorageError::DuplicateNationalId(
                new_athlete.national_id.clone(),
            ));
        }

        let id = match athletes.last() {
            Some(last) => last.id.checked_add(1).ok_or(StorageError::IdSpaceExhausted)?,
            None => 1,
        };

        let athlete = Athlete {
            id,
            name: new_athlete.name.clone(),
            national_id: new_athlete.national_id.clone(),
        };
        athletes.push(athlete.clone());

        Ok(athlete)
    }
}

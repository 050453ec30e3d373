use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use super::AthleteStore;
use crate::dto::athlete::{AthleteFilter, NewAthlete};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::Athlete;

/// PostgreSQL-backed athlete store.
///
/// Every call checks a connection out of the pool for its own duration; the
/// guard hands it back when dropped, on success and on error alike.
#[derive(Debug, Clone)]
pub struct AthleteRepository {
    pool: PgPool,
}

impl AthleteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn filtered_query(filter: &AthleteFilter, page: PaginationParams) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT id, name, national_id
        FROM athletes
        WHERE 1=1
        "#,
    );

    if let Some(ref name) = filter.name {
        query.push(" AND name = ");
        query.push_bind(name);
    }

    if let Some(ref national_id) = filter.national_id {
        query.push(" AND national_id = ");
        query.push_bind(national_id);
    }

    query.push(" ORDER BY id OFFSET ");
    query.push_bind(page.offset);
    query.push(" LIMIT ");
    query.push_bind(page.limit);

    query
}

fn map_fetch_error(error: sqlx::Error, page: PaginationParams) -> StorageError {
    let err = StorageError::from(error);
    if err.is_invalid_row_count() {
        StorageError::negative_row_count(page.limit, page.offset)
    } else {
        err
    }
}

fn map_insert_error(error: sqlx::Error, national_id: &str) -> StorageError {
    let err = StorageError::from(error);
    if err.is_unique_violation() {
        StorageError::DuplicateNationalId(national_id.to_string())
    } else if err.is_sequence_exhausted() {
        StorageError::IdSpaceExhausted
    } else {
        err
    }
}

#[async_trait]
impl AthleteStore for AthleteRepository {
    async fn find_by_filters(
        &self,
        filter: &AthleteFilter,
        page: PaginationParams,
    ) -> Result<Vec<Athlete>> {
        let mut conn = self.pool.acquire().await?;

        let mut query = filtered_query(filter, page);

        let athletes = query
            .build_query_as::<Athlete>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_fetch_error(e, page))?;

        Ok(athletes)
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM athletes")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    async fn create(&self, new_athlete: &NewAthlete) -> Result<Athlete> {
        new_athlete.validate()?;

        let mut conn = self.pool.acquire().await?;

        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            INSERT INTO athletes (name, national_id)
            VALUES ($1, $2)
            RETURNING id, name, national_id
            "#,
        )
        .bind(&new_athlete.name)
        .bind(&new_athlete.national_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_insert_error(e, &new_athlete.national_id))?;

        Ok(athlete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::database_error;

    fn normalized_sql(filter: &AthleteFilter) -> String {
        let query = filtered_query(filter, PaginationParams::new(10, 20));
        query.sql().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_query_without_filters() {
        assert_eq!(
            normalized_sql(&AthleteFilter::default()),
            "SELECT id, name, national_id FROM athletes WHERE 1=1 ORDER BY id OFFSET $1 LIMIT $2"
        );
    }

    #[test]
    fn test_query_with_name_only() {
        let filter = AthleteFilter {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalized_sql(&filter),
            "SELECT id, name, national_id FROM athletes WHERE 1=1 AND name = $1 ORDER BY id OFFSET $2 LIMIT $3"
        );
    }

    #[test]
    fn test_query_with_national_id_only() {
        let filter = AthleteFilter {
            national_id: Some("111".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalized_sql(&filter),
            "SELECT id, name, national_id FROM athletes WHERE 1=1 AND national_id = $1 ORDER BY id OFFSET $2 LIMIT $3"
        );
    }

    #[test]
    fn test_query_with_both_filters() {
        let filter = AthleteFilter {
            name: Some("Ana".to_string()),
            national_id: Some("111".to_string()),
        };
        assert_eq!(
            normalized_sql(&filter),
            "SELECT id, name, national_id FROM athletes WHERE 1=1 AND name = $1 AND national_id = $2 ORDER BY id OFFSET $3 LIMIT $4"
        );
    }

    #[test]
    fn test_negative_limit_maps_to_invalid_pagination() {
        let err = map_fetch_error(database_error("2201W"), PaginationParams::new(-1, 0));
        assert!(
            matches!(err, StorageError::InvalidPagination(ref msg) if msg.contains("limit: -1, offset: 0"))
        );
    }

    #[test]
    fn test_negative_offset_maps_to_invalid_pagination() {
        let err = map_fetch_error(database_error("2201X"), PaginationParams::new(10, -3));
        assert!(
            matches!(err, StorageError::InvalidPagination(ref msg) if msg.contains("offset: -3"))
        );
    }

    #[test]
    fn test_other_fetch_errors_pass_through() {
        let err = map_fetch_error(database_error("42P01"), PaginationParams::default());
        assert!(matches!(err, StorageError::Database(_)));

        let err = map_fetch_error(sqlx::Error::PoolTimedOut, PaginationParams::new(-1, 0));
        assert!(matches!(err, StorageError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate_national_id() {
        let err = map_insert_error(database_error("23505"), "111");
        assert!(matches!(err, StorageError::DuplicateNationalId(ref id) if id == "111"));
    }

    #[test]
    fn test_sequence_exhaustion_maps_to_id_space_exhausted() {
        let err = map_insert_error(database_error("2200H"), "111");
        assert!(matches!(err, StorageError::IdSpaceExhausted));
    }

    #[test]
    fn test_other_insert_errors_pass_through() {
        let err = map_insert_error(database_error("23502"), "111");
        assert!(matches!(err, StorageError::Database(_)));

        let err = map_insert_error(database_error("2201W"), "111");
        assert!(matches!(err, StorageError::Database(_)));
    }
}

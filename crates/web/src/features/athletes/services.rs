use storage::{
    dto::{
        athlete::{AthleteFilter, AthleteView, EnrichmentPolicy},
        common::PaginationParams,
    },
    error::Result,
    models::Athlete,
    repository::AthleteStore,
};

/// List athletes matching the filters within the requested window
pub async fn list_athletes(
    store: &dyn AthleteStore,
    filter: &AthleteFilter,
    page: PaginationParams,
) -> Result<Vec<Athlete>> {
    tracing::debug!(?filter, ?page, "Listing athletes");
    store.find_by_filters(filter, page).await
}

/// Page of enriched athlete views plus the total number of stored athletes
pub async fn list_athlete_views(
    store: &dyn AthleteStore,
    enrichment: &EnrichmentPolicy,
    page: PaginationParams,
) -> Result<(Vec<AthleteView>, i64)> {
    let athletes = store.list(page).await?;
    let total_items = store.count().await?;

    let views = athletes
        .into_iter()
        .map(|athlete| enrichment.view(athlete))
        .collect();

    Ok((views, total_items))
}

use std::sync::Arc;

use storage::dto::athlete::EnrichmentPolicy;
use storage::repository::AthleteStore;

/// Process-wide context built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    athletes: Arc<dyn AthleteStore>,
    enrichment: Arc<EnrichmentPolicy>,
}

impl AppState {
    pub fn new(athletes: Arc<dyn AthleteStore>, enrichment: EnrichmentPolicy) -> Self {
        Self {
            athletes,
            enrichment: Arc::new(enrichment),
        }
    }

    pub fn athletes(&self) -> &dyn AthleteStore {
        self.athletes.as_ref()
    }

    pub fn enrichment(&self) -> &EnrichmentPolicy {
        &self.enrichment
    }
}

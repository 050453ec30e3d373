use anyhow::{Context, Result, bail};
use storage::dto::athlete::{DEFAULT_CATEGORY, DEFAULT_TRAINING_CENTER, EnrichmentPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub enrichment: EnrichmentPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            enrichment: parse_enrichment(
                std::env::var("ATHLETE_ENRICHMENT").ok().as_deref(),
                std::env::var("ATHLETE_TRAINING_CENTER_PLACEHOLDER").ok(),
                std::env::var("ATHLETE_CATEGORY_PLACEHOLDER").ok(),
            )?,
        })
    }

    /// Database URL with credentials stripped, for logging.
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn parse_enrichment(
    mode: Option<&str>,
    training_center: Option<String>,
    category: Option<String>,
) -> Result<EnrichmentPolicy> {
    match mode.map(str::trim) {
        None | Some("") | Some("placeholder") => Ok(EnrichmentPolicy::Placeholder {
            training_center: training_center
                .unwrap_or_else(|| DEFAULT_TRAINING_CENTER.to_string()),
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }),
        Some("unknown") => Ok(EnrichmentPolicy::Unknown),
        Some(other) => bail!(
            "ATHLETE_ENRICHMENT must be 'placeholder' or 'unknown', got '{}'",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_defaults_to_placeholders() {
        let policy = parse_enrichment(None, None, None).unwrap();
        assert_eq!(policy, EnrichmentPolicy::default());
    }

    #[test]
    fn test_enrichment_placeholder_overrides() {
        let policy = parse_enrichment(
            Some("placeholder"),
            Some("CT Norte".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(
            policy,
            EnrichmentPolicy::Placeholder {
                training_center: "CT Norte".to_string(),
                category: DEFAULT_CATEGORY.to_string(),
            }
        );
    }

    #[test]
    fn test_enrichment_unknown() {
        let policy = parse_enrichment(Some("unknown"), Some("ignored".to_string()), None).unwrap();
        assert_eq!(policy, EnrichmentPolicy::Unknown);
    }

    #[test]
    fn test_enrichment_rejects_other_modes() {
        assert!(parse_enrichment(Some("derived"), None, None).is_err());
    }

    #[test]
    fn test_database_host_hides_credentials() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://user:secret@db:5432/athletes".to_string(),
            enrichment: EnrichmentPolicy::Unknown,
        };
        assert_eq!(config.database_host(), "db:5432/athletes");
    }
}

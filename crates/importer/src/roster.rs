use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use storage::{dto::athlete::NewAthlete, error::StorageError, repository::AthleteStore};
use tracing::{debug, warn};
use validator::Validate;

use crate::{ImporterError, Result};

/// Athletes to register, read from a JSON array of `{name, national_id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    pub athletes: Vec<NewAthlete>,
}

impl Roster {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json_content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json_content)
    }

    /// Checks every entry; the caller decides what to do with the errors.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.athletes.is_empty() {
            report.warnings.push("Roster contains no athletes".to_string());
        }

        let mut seen = HashSet::new();
        for (idx, athlete) in self.athletes.iter().enumerate() {
            let label = format!("#{} ('{}')", idx + 1, athlete.name);

            if let Err(errors) = athlete.validate() {
                for (field, field_errors) in errors.field_errors() {
                    for e in field_errors.iter() {
                        report.errors.push(format!(
                            "Athlete {}: {}: {}",
                            label,
                            field,
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        ));
                    }
                }
            }

            if !seen.insert(athlete.national_id.as_str()) {
                report.warnings.push(format!(
                    "Athlete {} repeats national id {}; it will be rejected as a duplicate",
                    label, athlete.national_id
                ));
            }
        }

        report
    }

    /// Inserts every athlete in order. Duplicates are skipped and reported;
    /// any other storage failure stops the import.
    pub async fn import(&self, store: &dyn AthleteStore) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for new_athlete in &self.athletes {
            match store.create(new_athlete).await {
                Ok(athlete) => {
                    debug!("Registered athlete {} ({})", athlete.id, athlete.name);
                    summary.inserted += 1;
                }
                Err(StorageError::DuplicateNationalId(national_id)) => {
                    warn!(
                        "Skipping '{}': national id {} is already registered",
                        new_athlete.name, national_id
                    );
                    summary.duplicates.push(national_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(summary)
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with every collected error when the roster is not importable.
    pub fn into_result(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                self.errors.len(),
                self.errors.join("; ")
            )))
        }
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::dto::common::PaginationParams;
    use storage::repository::InMemoryAthleteRepository;

    #[test]
    fn test_parses_json_array() {
        let roster =
            Roster::from_json(r#"[{"name": "Ana", "national_id": "111"}]"#).unwrap();
        assert_eq!(roster.athletes.len(), 1);
        assert_eq!(roster.athletes[0].national_id, "111");
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let roster = Roster::from_json(
            r#"[{"name": "", "national_id": "111"}, {"name": "Bea", "national_id": "x"}]"#,
        )
        .unwrap();

        let report = roster.validate();
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].starts_with("Athlete #1 ('')"));
        assert!(report.errors[1].starts_with("Athlete #2 ('Bea')"));

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, ImporterError::ValidationError(ref msg) if msg.contains("2 error(s)")));
    }

    #[test]
    fn test_warns_about_repeated_national_ids() {
        let roster = Roster::from_json(
            r#"[{"name": "Ana", "national_id": "111"}, {"name": "Bea", "national_id": "111"}]"#,
        )
        .unwrap();

        let report = roster.validate().into_result().unwrap();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_import_counts_duplicates() {
        let store = InMemoryAthleteRepository::new();
        let roster = Roster::from_json(
            r#"[
                {"name": "Ana", "national_id": "111"},
                {"name": "Bea", "national_id": "222"},
                {"name": "Ana Clone", "national_id": "111"}
            ]"#,
        )
        .unwrap();

        let summary = roster.import(&store).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                inserted: 2,
                duplicates: vec!["111".to_string()],
            }
        );

        let stored = store.list(PaginationParams::default()).await.unwrap();
        let names: Vec<&str> = stored.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bea"]);
    }

    #[tokio::test]
    async fn test_reimport_is_all_duplicates() {
        let store = InMemoryAthleteRepository::new();
        let roster =
            Roster::from_json(r#"[{"name": "Ana", "national_id": "111"}]"#).unwrap();

        roster.import(&store).await.unwrap();
        let summary = roster.import(&store).await.unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.duplicates, vec!["111".to_string()]);
    }
}

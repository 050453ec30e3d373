use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::PaginationParams;
use crate::models::Athlete;

pub const DEFAULT_TRAINING_CENTER: &str = "Centro de Treinamento X";
pub const DEFAULT_CATEGORY: &str = "Categoria X";

/// Query string accepted by `GET /athletes/`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Exact match on the athlete name
    pub name: Option<String>,
    /// Exact match on the national id (CPF)
    pub national_id: Option<String>,
}

fn default_limit() -> i64 {
    10
}

impl AthleteListQuery {
    /// Splits the query into its filter and its pagination window.
    /// Empty filter values are treated as absent.
    pub fn into_parts(self) -> (AthleteFilter, PaginationParams) {
        let filter = AthleteFilter {
            name: self.name.filter(|s| !s.is_empty()),
            national_id: self.national_id.filter(|s| !s.is_empty()),
        };

        (filter, PaginationParams::new(self.limit, self.offset))
    }
}

/// Equality filters, AND-ed together when both are set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteFilter {
    pub name: Option<String>,
    pub national_id: Option<String>,
}

impl AthleteFilter {
    pub fn matches(&self, athlete: &Athlete) -> bool {
        self.name.as_ref().is_none_or(|name| athlete.name == *name)
            && self
                .national_id
                .as_ref()
                .is_none_or(|national_id| athlete.national_id == *national_id)
    }
}

/// Response containing the stored athlete fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: i32,
    pub name: String,
    pub national_id: String,
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            name: athlete.name,
            national_id: athlete.national_id,
        }
    }
}

/// Reshaped athlete listing entry.
///
/// `training_center` and `category` are not stored on the athlete; their
/// values come from the configured [`EnrichmentPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AthleteView {
    pub name: String,
    pub training_center: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentPolicy {
    /// Fill the fields with fixed placeholder values
    Placeholder {
        training_center: String,
        category: String,
    },
    /// Leave the fields null
    Unknown,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self::Placeholder {
            training_center: DEFAULT_TRAINING_CENTER.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl EnrichmentPolicy {
    pub fn view(&self, athlete: Athlete) -> AthleteView {
        let (training_center, category) = match self {
            Self::Placeholder {
                training_center,
                category,
            } => (Some(training_center.clone()), Some(category.clone())),
            Self::Unknown => (None, None),
        };

        AthleteView {
            name: athlete.name,
            training_center,
            category,
        }
    }
}

/// Payload for registering a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewAthlete {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 32,
        message = "National id must be between 1 and 32 characters"
    ))]
    #[validate(custom(function = "validate_national_id"))]
    pub national_id: String,
}

fn validate_national_id(national_id: &str) -> Result<(), validator::ValidationError> {
    if national_id
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_national_id"))
    }
}

//! Triage configuration
//!
//! Settings come from an optional file plus `TRIAGE__*` environment
//! variables, on top of the defaults:
//!
//! ```bash
//! TRIAGE__ACTIVE_STATUSES=Validated,Pending
//! TRIAGE__WEIGHTS__SECURITY=10
//! TRIAGE__WEIGHTS__SIMILAR_CLAIMS_THRESHOLD=3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::CoreError;

use crate::claim::ClaimStatus;
use crate::triage::TriageWeights;

const ENV_PREFIX: &str = "TRIAGE";

/// Settings for the triage engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageSettings {
    pub weights: TriageWeights,
    /// Statuses that count as "active" in the frequency queries
    pub active_statuses: Vec<ClaimStatus>,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            weights: TriageWeights::default(),
            active_statuses: vec![ClaimStatus::Validated, ClaimStatus::Pending],
        }
    }
}

impl TriageSettings {
    /// Loads settings from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::load(None)
    }

    /// Loads settings from an optional file, then the environment
    ///
    /// Environment values win over the file; anything unset keeps its default.
    pub fn load(file: Option<&Path>) -> Result<Self, CoreError> {
        Self::load_with_env(file, None)
    }

    /// Like [`load`](Self::load), reading `TRIAGE__*` keys from `env` instead
    /// of the process environment when given
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, CoreError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("active_statuses")
                .try_parsing(true)
                .source(env),
        );

        let settings: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        settings.validate()?;

        info!(
            active_statuses = ?settings.active_statuses,
            max_score = settings.weights.max_score(),
            "Triage settings loaded"
        );

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.active_statuses.is_empty() {
            return Err(CoreError::configuration("active_statuses must not be empty"));
        }
        if self.weights.similar_claims_threshold == 0 {
            return Err(CoreError::configuration("weights.similar_claims_threshold must be at least 1"));
        }
        if self.weights.lot_claims_threshold == 0 {
            return Err(CoreError::configuration("weights.lot_claims_threshold must be at least 1"));
        }
        if self.weights.checked_max_score().is_none() {
            return Err(CoreError::configuration("weights add up to more than u32::MAX"));
        }
        Ok(())
    }
}

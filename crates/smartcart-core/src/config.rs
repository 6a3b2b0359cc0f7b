//! Application Settings
//!
//! Every field has a default; a stored JSON document only needs the keys it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::camera::CaptureConstraints;
use crate::error::ConfigError;
use crate::item::DEFAULT_UNIT;
use crate::store::SortSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How many items the "Recently Added" section shows
    pub recent_count: usize,
    /// Sort spec passed to `list`
    pub sort: String,
    /// Unit attached to manually added items
    pub default_unit: String,
    /// Camera facing mode requested from the device
    pub facing_mode: String,
    /// How long a store error banner stays up (0 = until dismissed)
    pub error_banner_ms: u32,
    /// Keep items in memory instead of calling the host store
    pub offline_store: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_count: 3,
            sort: "-created_date".to_string(),
            default_unit: DEFAULT_UNIT.to_string(),
            facing_mode: "environment".to_string(),
            error_banner_ms: 6000,
            offline_store: false,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_count == 0 {
            return Err(ConfigError::RecentCount);
        }
        self.sort_spec()?;
        Ok(())
    }

    pub fn sort_spec(&self) -> Result<SortSpec, ConfigError> {
        self.sort.parse()
    }

    pub fn capture_constraints(&self) -> CaptureConstraints {
        CaptureConstraints {
            facing_mode: self.facing_mode.clone(),
            audio: false,
        }
    }
}

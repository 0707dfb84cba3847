use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{EngineError, Result};
use crate::payoff::DEFAULT_MONTH_CAP;
use crate::projection::{ProjectionThresholds, DEFAULT_CAUTION_THRESHOLD, DEFAULT_RESERVE_BUFFER};
use crate::schedule::{ExpansionOptions, OneOffPolicy, DEFAULT_DUE_SOON_DAYS};
use crate::utils::{
    paths::{app_data_dir, config_file_in, ensure_dir},
    persistence::{read_json_or_default, write_json_atomic},
};

/// Longest "due soon" window accepted from configuration.
pub const MAX_DUE_SOON_DAYS: i64 = 366;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub currency: String,
    pub caution_threshold: f64,
    pub reserve_buffer: f64,
    pub due_soon_days: i64,
    pub payoff_month_cap: u32,
    pub one_off_policy: OneOffPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: "GBP".into(),
            caution_threshold: DEFAULT_CAUTION_THRESHOLD,
            reserve_buffer: DEFAULT_RESERVE_BUFFER,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            payoff_month_cap: DEFAULT_MONTH_CAP,
            one_off_policy: OneOffPolicy::KeepOverdue,
        }
    }
}

impl EngineConfig {
    pub fn thresholds(&self) -> ProjectionThresholds {
        ProjectionThresholds {
            caution_threshold: self.caution_threshold,
            reserve_buffer: self.reserve_buffer,
        }
    }

    pub fn expansion_options(&self, reference_date: chrono::NaiveDate) -> ExpansionOptions {
        ExpansionOptions {
            one_off_policy: self.one_off_policy,
            reference_date,
            due_soon_days: self.due_soon_days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reserve_buffer < 0.0 {
            return Err(EngineError::InvalidInput(
                "reserve_buffer must not be negative".into(),
            ));
        }
        if !(0..=MAX_DUE_SOON_DAYS).contains(&self.due_soon_days) {
            return Err(EngineError::InvalidInput(format!(
                "due_soon_days must be between 0 and {MAX_DUE_SOON_DAYS}"
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(EngineError::InvalidInput("currency must be set".into()));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<EngineConfig> {
        let config: EngineConfig = read_json_or_default(&self.path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<()> {
        config.validate()?;
        write_json_atomic(config, &self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

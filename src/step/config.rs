//! Step configuration supplied by the job compiler.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ElementKind;
use crate::{Error, Result};

/// Flat string settings, as handed over by a job driver.
pub type Settings = HashMap<String, String>;

/// Settings key: position in path history to rewind to.
pub const STEP: &str = "pathflow.back.step";
/// Settings key: expected class of the back-referenced element.
pub const CLASS: &str = "pathflow.back.class";
/// Settings key: whether the pipeline tracks paths at all.
pub const PATH_ENABLED: &str = "pathflow.path.enabled";

/// Configuration of one back-step job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub step_index: usize,
    pub target_class: ElementKind,
    pub path_enabled: bool,
}

impl StepConfig {
    pub fn new(step_index: usize, target_class: ElementKind, path_enabled: bool) -> Self {
        Self { step_index, target_class, path_enabled }
    }

    /// Parse from a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid step config: {e}")))
    }

    /// Read from flat settings. Absent keys take their defaults.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = settings.get(STEP) {
            config.step_index = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{STEP} must be a non-negative integer, got '{raw}'"))
            })?;
        }
        if let Some(raw) = settings.get(CLASS) {
            config.target_class = raw.parse()?;
        }
        if let Some(raw) = settings.get(PATH_ENABLED) {
            config.path_enabled = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{PATH_ENABLED} must be true or false, got '{raw}'"))
            })?;
        }

        Ok(config)
    }

    /// Render back into flat settings.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert(STEP.into(), self.step_index.to_string());
        settings.insert(CLASS.into(), self.target_class.to_string());
        settings.insert(PATH_ENABLED.into(), self.path_enabled.to_string());
        settings
    }
}

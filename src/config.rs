//! Analysis configuration
//!
//! Every field has a serde default, so a JSON file only needs the values it
//! changes. Command-line flags are applied on top by the binaries.

use crate::calls::SampleParams;
use crate::effects::DEFAULT_METHOD;
use crate::error::AnalysisResult;
use crate::ltv::{LtvParams, DEFAULT_ANSWER_RATE_INCREASE};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Upper end of the answer-rate slider, in percentage points
pub const DEFAULT_SWEEP_MAX_STEP: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// LTV business assumptions
    #[serde(flatten)]
    pub ltv: LtvParams,

    /// Answer-rate increase to project, in percentage points
    #[serde(default = "default_answer_rate_increase")]
    pub answer_rate_increase: f64,

    /// Method label for the illustrative effect figure
    #[serde(default = "default_effect_method")]
    pub effect_method: String,

    /// Last step of the answer-rate sweep
    #[serde(default = "default_sweep_max_step")]
    pub sweep_max_step: u32,

    /// Synthetic sample used when no dataset is supplied
    #[serde(default)]
    pub sample: SampleParams,
}

fn default_answer_rate_increase() -> f64 { DEFAULT_ANSWER_RATE_INCREASE }
fn default_effect_method() -> String { DEFAULT_METHOD.to_string() }
fn default_sweep_max_step() -> u32 { DEFAULT_SWEEP_MAX_STEP }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ltv: LtvParams::default(),
            answer_rate_increase: default_answer_rate_increase(),
            effect_method: default_effect_method(),
            sweep_max_step: default_sweep_max_step(),
            sample: SampleParams::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        info!("Loading analysis config from {}", path.display());
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

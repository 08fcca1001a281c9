//! Deterministic synthetic call sample
//!
//! Stands in for a real dialer export when none is supplied. All draws come
//! from a single seeded PCG stream, so the same seed always yields the same
//! dataset.

use super::{CallRecord, ANSWER, BUSY, NO_ANSWER};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// Parameters for generating the synthetic sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleParams {
    /// Number of calls to generate
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Seed for the PCG stream
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Probability that a customer retained (independent of call outcome)
    #[serde(default = "default_retention_probability")]
    pub retention_probability: f64,

    /// Mean outstanding balance
    #[serde(default = "default_balance_mean")]
    pub balance_mean: f64,

    /// Standard deviation of outstanding balance
    #[serde(default = "default_balance_std")]
    pub balance_std: f64,
}

fn default_rows() -> usize { 5000 }
fn default_seed() -> u64 { 42 }
fn default_retention_probability() -> f64 { 0.6 }
fn default_balance_mean() -> f64 { 150_000.0 }
fn default_balance_std() -> f64 { 30_000.0 }

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            retention_probability: default_retention_probability(),
            balance_mean: default_balance_mean(),
            balance_std: default_balance_std(),
        }
    }
}

const OUTCOMES: [&str; 3] = [ANSWER, NO_ANSWER, BUSY];

/// Standard normal draw via Box-Muller
fn standard_normal(rng: &mut Pcg64Mcg) -> f64 {
    // gen::<f64>() is in [0, 1); shift to (0, 1] so ln() stays finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Generate the synthetic sample
pub fn generate_sample(params: &SampleParams) -> Vec<CallRecord> {
    let mut rng = Pcg64Mcg::seed_from_u64(params.seed);

    let records: Vec<CallRecord> = (0..params.rows)
        .map(|_| {
            let outcome = OUTCOMES[rng.gen_range(0..OUTCOMES.len())];
            let retained = rng.gen_bool(params.retention_probability.clamp(0.0, 1.0)) as u8;
            CallRecord {
                call_result: Some(outcome.to_string()),
                retained: Some(retained),
                age: Some(rng.gen_range(25..75)),
                tenure: Some(rng.gen_range(1..30)),
                mortgage_balance: Some(params.balance_mean + params.balance_std * standard_normal(&mut rng)),
                call_hour: Some(rng.gen_range(8..20)),
            }
        })
        .collect();

    debug!("Generated {} synthetic calls (seed {})", records.len(), params.seed);
    records
}

/// Generate the default 5000-row sample with seed 42
pub fn default_sample() -> Vec<CallRecord> {
    generate_sample(&SampleParams::default())
}

//! Command-line flags shared by the binaries

use crate::ltv::LtvParams;
use clap::Args;

/// Overrides for the LTV business assumptions
#[derive(Debug, Clone, Default, Args)]
pub struct LtvArgs {
    /// Customers in the targeted segment
    #[arg(long)]
    pub segment_size: Option<f64>,

    /// Retention uplift for an answered call (fraction)
    #[arg(long)]
    pub uplift_rate: Option<f64>,

    /// Value of one additional retained customer over the horizon
    #[arg(long)]
    pub ltv_per_customer: Option<f64>,

    /// LTV horizon in years
    #[arg(long)]
    pub years: Option<f64>,
}

impl LtvArgs {
    /// Replace each field of `params` that was given on the command line
    pub fn apply(&self, params: &mut LtvParams) {
        if let Some(v) = self.segment_size { params.customer_segment_size = v; }
        if let Some(v) = self.uplift_rate { params.uplift_rate = v; }
        if let Some(v) = self.ltv_per_customer { params.ltv_per_customer = v; }
        if let Some(v) = self.years { params.years = v; }
    }
}

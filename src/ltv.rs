//! Annualized LTV uplift from an improved answer rate
//!
//! The projection is a straight chain of products:
//! - extra retained customers = segment size x answer-rate increase x uplift rate
//! - total LTV = extra retained x LTV per customer
//! - annualized = total LTV / horizon in years

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Customers in the targeted segment (20% of a 250,000 book)
pub const DEFAULT_SEGMENT_SIZE: f64 = 50_000.0;

/// Retention uplift for an answered call
pub const DEFAULT_UPLIFT_RATE: f64 = 0.085;

/// Value of one additional retained customer over the horizon
pub const DEFAULT_LTV_PER_CUSTOMER: f64 = 2_000.0;

/// LTV horizon in years
pub const DEFAULT_YEARS: f64 = 3.0;

/// Answer-rate increase, in percentage points, shown by default
pub const DEFAULT_ANSWER_RATE_INCREASE: f64 = 5.0;

/// Annualized LTV gain, unguarded.
///
/// `answer_rate_increase` is in percentage points. No input is validated:
/// `years == 0.0` yields an infinite or NaN result. Use
/// [`LtvParams::projected_gain`] for the checked form.
pub fn calculate_ltv_gain(
    answer_rate_increase: f64,
    customer_segment_size: f64,
    uplift_rate: f64,
    ltv_per_customer: f64,
    years: f64,
) -> f64 {
    let additional_retained = customer_segment_size * (answer_rate_increase / 100.0) * uplift_rate;
    let total_ltv = additional_retained * ltv_per_customer;
    total_ltv / years
}

/// Business assumptions behind the LTV projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtvParams {
    #[serde(default = "default_segment_size")]
    pub customer_segment_size: f64,

    #[serde(default = "default_uplift_rate")]
    pub uplift_rate: f64,

    #[serde(default = "default_ltv_per_customer")]
    pub ltv_per_customer: f64,

    #[serde(default = "default_years")]
    pub years: f64,
}

fn default_segment_size() -> f64 { DEFAULT_SEGMENT_SIZE }
fn default_uplift_rate() -> f64 { DEFAULT_UPLIFT_RATE }
fn default_ltv_per_customer() -> f64 { DEFAULT_LTV_PER_CUSTOMER }
fn default_years() -> f64 { DEFAULT_YEARS }

impl Default for LtvParams {
    fn default() -> Self {
        Self {
            customer_segment_size: DEFAULT_SEGMENT_SIZE,
            uplift_rate: DEFAULT_UPLIFT_RATE,
            ltv_per_customer: DEFAULT_LTV_PER_CUSTOMER,
            years: DEFAULT_YEARS,
        }
    }
}

fn finite(name: &'static str, value: f64) -> AnalysisResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::invalid(name, format!("must be finite, got {}", value)))
    }
}

impl LtvParams {
    /// Check every assumption is in domain
    pub fn validate(&self) -> AnalysisResult<()> {
        if finite("customer_segment_size", self.customer_segment_size)? < 0.0 {
            return Err(AnalysisError::invalid(
                "customer_segment_size",
                format!("must be non-negative, got {}", self.customer_segment_size),
            ));
        }

        let uplift = finite("uplift_rate", self.uplift_rate)?;
        if !(0.0..=1.0).contains(&uplift) {
            return Err(AnalysisError::invalid(
                "uplift_rate",
                format!("must be a probability in [0, 1], got {}", uplift),
            ));
        }

        if finite("ltv_per_customer", self.ltv_per_customer)? < 0.0 {
            return Err(AnalysisError::invalid(
                "ltv_per_customer",
                format!("must be non-negative, got {}", self.ltv_per_customer),
            ));
        }

        // Near-zero horizons blow the quotient up to inf/NaN
        let years = finite("years", self.years)?;
        if years < f64::EPSILON {
            return Err(AnalysisError::invalid(
                "years",
                format!("must be positive, got {}", years),
            ));
        }

        Ok(())
    }

    /// Annualized LTV gain for an answer-rate increase, with all inputs checked.
    /// Negative increases are allowed and produce a loss.
    pub fn projected_gain(&self, answer_rate_increase: f64) -> AnalysisResult<f64> {
        finite("answer_rate_increase", answer_rate_increase)?;
        self.validate()?;
        let gain = calculate_ltv_gain(
            answer_rate_increase,
            self.customer_segment_size,
            self.uplift_rate,
            self.ltv_per_customer,
            self.years,
        );
        // Finite inputs can still overflow (inf) or hit inf * 0 (NaN)
        if !gain.is_finite() {
            return Err(AnalysisError::invalid(
                "answer_rate_increase",
                format!("projected gain is not finite ({}) for these parameters", gain),
            ));
        }
        Ok(gain)
    }

    /// Additional retained customers before the LTV and horizon are applied
    pub fn additional_retained(&self, answer_rate_increase: f64) -> f64 {
        self.customer_segment_size * (answer_rate_increase / 100.0) * self.uplift_rate
    }

    /// Gain at each whole answer-rate step (percentage points)
    pub fn sweep(&self, steps: RangeInclusive<u32>) -> AnalysisResult<Vec<SweepPoint>> {
        self.validate()?;
        steps
            .map(|step| {
                let increase = step as f64;
                Ok(SweepPoint {
                    answer_rate_increase: increase,
                    additional_retained: self.additional_retained(increase),
                    annual_ltv_gain: self.projected_gain(increase)?,
                })
            })
            .collect()
    }
}

/// One row of an answer-rate sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub answer_rate_increase: f64,
    pub additional_retained: f64,
    pub annual_ltv_gain: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_gain(increase: f64) -> f64 {
        calculate_ltv_gain(increase, 50_000.0, 0.085, 2_000.0, 3.0)
    }

    #[test]
    fn test_reference_value() {
        // 50000 * 0.05 * 0.085 * 2000 / 3
        let gain = default_gain(5.0);
        assert!((gain - 141_666.67).abs() < 0.01, "Expected ~141666.67, got {}", gain);
        assert_eq!(gain, LtvParams::default().projected_gain(5.0).unwrap());
    }

    #[test]
    fn test_zero_increase_is_zero() {
        assert_eq!(default_gain(0.0), 0.0);
        let params = LtvParams { customer_segment_size: 12_345.0, uplift_rate: 0.2, ltv_per_customer: 750.0, years: 7.0 };
        assert_eq!(params.projected_gain(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_linear_in_increase() {
        for (r1, r2) in [(1.0, 2.0), (5.0, 7.5), (0.3, 19.7), (-4.0, 10.0)] {
            assert_relative_eq!(
                default_gain(r1 + r2),
                default_gain(r1) + default_gain(r2),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_unguarded_zero_years() {
        assert!(default_gain(5.0).is_finite());
        assert!(calculate_ltv_gain(5.0, 50_000.0, 0.085, 2_000.0, 0.0).is_infinite());
        assert!(calculate_ltv_gain(0.0, 50_000.0, 0.085, 2_000.0, 0.0).is_nan());
    }

    #[test]
    fn test_near_zero_years_rejected() {
        for years in [0.0, 1e-300, -1.0] {
            let params = LtvParams { years, ..LtvParams::default() };
            let err = params.projected_gain(5.0).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidParameter { name: "years", .. }));
        }
    }

    #[test]
    fn test_out_of_domain_rejected() {
        let bad = [
            LtvParams { uplift_rate: 1.5, ..LtvParams::default() },
            LtvParams { uplift_rate: f64::NAN, ..LtvParams::default() },
            LtvParams { customer_segment_size: -1.0, ..LtvParams::default() },
            LtvParams { ltv_per_customer: f64::INFINITY, ..LtvParams::default() },
        ];
        for params in bad {
            assert!(params.validate().is_err(), "{:?} should be rejected", params);
        }
        assert!(LtvParams::default().projected_gain(f64::NAN).is_err());
    }

    #[test]
    fn test_overflowing_result_rejected() {
        // inf * 0 -> NaN
        let params = LtvParams { customer_segment_size: 1e308, ltv_per_customer: 0.0, ..LtvParams::default() };
        assert!(matches!(
            params.projected_gain(1e10).unwrap_err(),
            AnalysisError::InvalidParameter { name: "answer_rate_increase", .. }
        ));

        // Overflow -> inf
        let params = LtvParams { customer_segment_size: 1e308, ..LtvParams::default() };
        assert!(params.projected_gain(100.0).is_err());
        assert!(params.sweep(0..=100).is_err());
        assert_eq!(params.projected_gain(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_increase_is_loss() {
        let gain = LtvParams::default().projected_gain(-5.0).unwrap();
        assert_relative_eq!(gain, -default_gain(5.0), max_relative = 1e-12);
    }

    #[test]
    fn test_sweep() {
        let points = LtvParams::default().sweep(0..=20).unwrap();
        assert_eq!(points.len(), 21);
        assert_eq!(points[0].annual_ltv_gain, 0.0);
        assert_eq!(points[5].annual_ltv_gain, default_gain(5.0));
        assert_relative_eq!(points[5].additional_retained, 212.5, max_relative = 1e-12);
        assert!(points.windows(2).all(|w| w[1].annual_ltv_gain > w[0].annual_ltv_gain));
    }

    #[test]
    fn test_params_from_json_defaults() {
        let params: LtvParams = serde_json::from_str(r#"{"years": 5}"#).unwrap();
        assert_eq!(params.years, 5.0);
        assert_eq!(params.customer_segment_size, DEFAULT_SEGMENT_SIZE);
        assert_eq!(params.uplift_rate, DEFAULT_UPLIFT_RATE);
    }
}

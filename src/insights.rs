//! Campaign report: KPIs, distributions, and recommendations
//!
//! Collects everything the presentation layer shows into one serializable
//! structure. Formatting (currency, rounding) is left to the caller.

use crate::calls::CallRecord;
use crate::config::AnalysisConfig;
use crate::effects::{IllustrativeEffect, IllustrativeEffects};
use crate::error::AnalysisResult;
use crate::ltv::SweepPoint;
use crate::retention::{call_result_counts, retention_by_call_result, RetentionSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Historical campaign answer rate quoted in the executive summary
pub const CAMPAIGN_ANSWER_RATE: f64 = 0.38;

/// Headline KPI figures
#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    /// Retention uplift of the selected illustrative effect
    pub retention_uplift: f64,

    /// Answer rate quoted for the campaign
    pub campaign_answer_rate: f64,

    /// Share of labelled calls in the dataset that were answered
    pub observed_answer_rate: Option<f64>,

    /// Answer-rate increase the LTV figure is projected for (percentage points)
    pub answer_rate_increase: f64,

    /// Annualized LTV gain at that increase
    pub projected_annual_ltv_gain: f64,
}

/// Customer segment bounds used by the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentFilter {
    pub min_age: u32,
    pub max_age: u32,
    /// Tenure must be strictly greater than this
    pub tenure_above: u32,
}

impl Default for SegmentFilter {
    /// Age 45-60 with tenure over 10 years
    fn default() -> Self {
        Self { min_age: 45, max_age: 60, tenure_above: 10 }
    }
}

impl SegmentFilter {
    /// Rows missing age or tenure never match
    pub fn matches(&self, record: &CallRecord) -> bool {
        match (record.age, record.tenure) {
            (Some(age), Some(tenure)) => {
                (self.min_age..=self.max_age).contains(&age) && tenure > self.tenure_above
            }
            _ => false,
        }
    }

    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("Age {}-{}", self.min_age, self.max_age),
            format!("Tenure > {} years", self.tenure_above),
        ]
    }
}

/// Retention inside the recommended segment
#[derive(Debug, Clone, Serialize)]
pub struct SegmentRetention {
    pub filter: SegmentFilter,
    pub calls: usize,
    pub retention: RetentionSummary,
}

/// Retention by outcome restricted to rows matching `filter`
pub fn segment_retention(records: &[CallRecord], filter: SegmentFilter) -> SegmentRetention {
    let matching: Vec<CallRecord> = records.iter().filter(|r| filter.matches(r)).cloned().collect();
    SegmentRetention {
        filter,
        calls: matching.len(),
        retention: retention_by_call_result(&matching),
    }
}

/// Counts per distinct integer value of an auxiliary attribute
pub fn value_counts<F>(records: &[CallRecord], attribute: F) -> BTreeMap<u32, usize>
where
    F: Fn(&CallRecord) -> Option<u32>,
{
    let mut counts = BTreeMap::new();
    for value in records.iter().filter_map(attribute) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Share of labelled calls that were answered
pub fn observed_answer_rate(records: &[CallRecord]) -> Option<f64> {
    let labelled = records.iter().filter(|r| r.call_result.is_some()).count();
    if labelled == 0 {
        return None;
    }
    let answered = records.iter().filter(|r| r.is_answered()).count();
    Some(answered as f64 / labelled as f64)
}

/// Static narrative accompanying the figures
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub recommendation: &'static str,
    pub target_segments: Vec<String>,
    pub benefits: Vec<String>,
    pub limitations: Vec<&'static str>,
    pub next_steps: Vec<&'static str>,
}

impl Recommendations {
    fn new(filter: &SegmentFilter, effect: &IllustrativeEffect) -> Self {
        Self {
            recommendation: "Continue the dialer campaign, focusing on the target segments.",
            target_segments: filter.describe(),
            benefits: vec![
                format!("Retention uplift: {:.1}%", effect.uplift * 100.0),
                "Significant LTV gains with only small increases in answer rate".to_string(),
            ],
            limitations: vec![
                "Unobserved confounders may still exist",
                "Quasi-random call timing not guaranteed",
            ],
            next_steps: vec![
                "Controlled A/B testing with random call timing",
                "Better logging of outreach strategies",
            ],
        }
    }
}

/// Everything the campaign dashboard presents
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total_calls: usize,
    pub kpis: Kpis,
    pub effect: IllustrativeEffect,
    pub call_result_counts: BTreeMap<String, usize>,
    pub retention: RetentionSummary,
    pub age_counts: BTreeMap<u32, usize>,
    pub tenure_counts: BTreeMap<u32, usize>,
    pub segment: SegmentRetention,
    pub ltv_sweep: Vec<SweepPoint>,
    pub recommendations: Recommendations,
}

impl CampaignReport {
    /// Assemble the report. Fails only on invalid LTV parameters or an
    /// unknown effect method.
    pub fn build(records: &[CallRecord], source: impl Into<String>, config: &AnalysisConfig) -> AnalysisResult<Self> {
        let effect = IllustrativeEffects.get(&config.effect_method)?;
        let projected = config.ltv.projected_gain(config.answer_rate_increase)?;
        let ltv_sweep = config.ltv.sweep(0..=config.sweep_max_step)?;
        let filter = SegmentFilter::default();

        Ok(Self {
            generated_at: Utc::now(),
            source: source.into(),
            total_calls: records.len(),
            kpis: Kpis {
                retention_uplift: effect.uplift,
                campaign_answer_rate: CAMPAIGN_ANSWER_RATE,
                observed_answer_rate: observed_answer_rate(records),
                answer_rate_increase: config.answer_rate_increase,
                projected_annual_ltv_gain: projected,
            },
            effect,
            call_result_counts: call_result_counts(records)
                .into_iter()
                .map(|(label, n)| (label.to_string(), n))
                .collect(),
            retention: retention_by_call_result(records),
            age_counts: value_counts(records, |r| r.age),
            tenure_counts: value_counts(records, |r| r.tenure),
            segment: segment_retention(records, filter),
            ltv_sweep,
            recommendations: Recommendations::new(&filter, &effect),
        })
    }
}

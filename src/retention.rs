//! Retention rate by dialer call outcome
//!
//! Rows are grouped by `call_result` and the mean of `retained` is taken
//! within each group. Null handling:
//! - rows with no `call_result` are dropped
//! - null `retained` values are left out of both numerator and denominator
//! - `retained` values other than 0 or 1 are treated as null (the strict
//!   variant rejects them instead)
//!
//! Groups are keyed in a `BTreeMap`, so output is sorted by label and
//! identical for identical input.

use crate::calls::CallRecord;
use crate::error::{AnalysisError, AnalysisResult};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Running totals for one outcome label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct GroupTotals {
    rows: usize,
    observed: usize,
    retained: usize,
}

impl GroupTotals {
    fn add(&mut self, record: &CallRecord) {
        self.rows += 1;
        if let Some(flag @ (0 | 1)) = record.retained {
            self.observed += 1;
            self.retained += flag as usize;
        }
    }

    fn merge(&mut self, other: GroupTotals) {
        self.rows += other.rows;
        self.observed += other.observed;
        self.retained += other.retained;
    }
}

type Totals = BTreeMap<String, GroupTotals>;

fn accumulate(records: &[CallRecord]) -> Totals {
    let mut totals = Totals::new();
    for record in records {
        if let Some(label) = record.label() {
            totals.entry(label.to_string()).or_default().add(record);
        }
    }
    totals
}

fn merge_totals(mut into: Totals, from: Totals) -> Totals {
    for (label, group) in from {
        into.entry(label).or_default().merge(group);
    }
    into
}

/// Retention figures for a single outcome label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRetention {
    pub call_result: String,

    /// Rows carrying this label
    pub rows: usize,

    /// Rows whose `retained` flag was present and binary
    pub observed: usize,

    /// Mean of `retained` over observed rows; None if every flag was null
    pub retention_rate: Option<f64>,
}

/// Per-outcome retention, sorted by label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetentionSummary {
    groups: Vec<OutcomeRetention>,
}

impl From<Totals> for RetentionSummary {
    fn from(totals: Totals) -> Self {
        let groups = totals
            .into_iter()
            .map(|(call_result, t)| OutcomeRetention {
                call_result,
                rows: t.rows,
                observed: t.observed,
                retention_rate: if t.observed > 0 {
                    Some(t.retained as f64 / t.observed as f64)
                } else {
                    None
                },
            })
            .collect();
        Self { groups }
    }
}

impl RetentionSummary {
    pub fn groups(&self) -> &[OutcomeRetention] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Retention rate for a label, if the label was seen and had observations
    pub fn rate(&self, call_result: &str) -> Option<f64> {
        self.groups
            .iter()
            .find(|g| g.call_result == call_result)
            .and_then(|g| g.retention_rate)
    }

    /// Label to rate mapping, omitting groups with no observed flags
    pub fn rates(&self) -> BTreeMap<&str, f64> {
        self.groups
            .iter()
            .filter_map(|g| g.retention_rate.map(|r| (g.call_result.as_str(), r)))
            .collect()
    }

    /// Bar-chart series: outcome labels on x, retention rate on y
    pub fn chart(&self) -> ChartSeries {
        let (x, y): (Vec<String>, Vec<f64>) = self
            .groups
            .iter()
            .filter_map(|g| g.retention_rate.map(|r| (g.call_result.clone(), r)))
            .unzip();
        ChartSeries {
            x_label: "call_result".to_string(),
            y_label: "Retention Rate".to_string(),
            x,
            y,
        }
    }
}

/// Chart-ready category/value pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

/// Group rows by outcome label and average the retention flag
pub fn retention_by_call_result(records: &[CallRecord]) -> RetentionSummary {
    accumulate(records).into()
}

/// Same as [`retention_by_call_result`], but fails on the first row missing
/// `call_result` or carrying a `retained` that is absent or not 0/1
pub fn retention_by_call_result_strict(records: &[CallRecord]) -> AnalysisResult<RetentionSummary> {
    for (row, record) in records.iter().enumerate() {
        if record.call_result.is_none() {
            return Err(AnalysisError::malformed(row, "missing call_result"));
        }
        match record.retained {
            None => return Err(AnalysisError::malformed(row, "missing retained")),
            Some(0 | 1) => {}
            Some(other) => {
                return Err(AnalysisError::malformed(row, format!("retained must be 0 or 1, got {}", other)))
            }
        }
    }
    Ok(retention_by_call_result(records))
}

/// Aggregate independent partitions of one dataset in parallel.
/// Equal to aggregating the partitions concatenated in order.
pub fn retention_by_call_result_par(partitions: &[&[CallRecord]]) -> RetentionSummary {
    partitions
        .par_iter()
        .map(|part| accumulate(part))
        .reduce(Totals::new, merge_totals)
        .into()
}

/// Row indices for each outcome label, sorted by label. Rows without a label
/// are not assigned to any group.
pub fn partition_by_call_result(records: &[CallRecord]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        if let Some(label) = record.label() {
            groups.entry(label).or_default().push(idx);
        }
    }
    groups
}

/// Number of calls per outcome label (the call-result distribution)
pub fn call_result_counts(records: &[CallRecord]) -> BTreeMap<&str, usize> {
    partition_by_call_result(records)
        .into_iter()
        .map(|(label, rows)| (label, rows.len()))
        .collect()
}

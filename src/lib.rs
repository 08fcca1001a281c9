//! Retention Insights - analytics for mortgage-retention dialer campaigns
//!
//! This library provides:
//! - Call record loading (CSV) and a deterministic synthetic sample
//! - Retention rate by call outcome, sequential or over parallel partitions
//! - Annualized LTV uplift projections from answer-rate improvements
//! - A campaign report bundling KPIs, distributions, and recommendations

pub mod error;
pub mod calls;
pub mod cli;
pub mod config;
pub mod effects;
pub mod insights;
pub mod ltv;
pub mod report;
pub mod retention;

// Re-export commonly used types
pub use error::{AnalysisError, AnalysisResult};
pub use calls::{CallRecord, DatasetCache, LoadMode};
pub use config::AnalysisConfig;
pub use insights::CampaignReport;
pub use ltv::{calculate_ltv_gain, LtvParams};
pub use retention::{retention_by_call_result, RetentionSummary};

//! Call record structures matching the dialer campaign export format

use serde::{Deserialize, Serialize};

/// Outcome labels observed in the dialer export. The label set is open;
/// these are only the ones the sample generator draws from.
pub const ANSWER: &str = "answer";
pub const NO_ANSWER: &str = "no answer";
pub const BUSY: &str = "busy";

/// A single dialer call and its retention outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Dialer outcome label (None = empty cell)
    pub call_result: Option<String>,

    /// 1 if the customer retained their mortgage, 0 otherwise (None = empty cell)
    pub retained: Option<u8>,

    /// Customer age in years
    pub age: Option<u32>,

    /// Years with the lender
    pub tenure: Option<u32>,

    /// Outstanding mortgage balance
    pub mortgage_balance: Option<f64>,

    /// Hour of day the call was placed (24h clock)
    pub call_hour: Option<u32>,
}

impl CallRecord {
    /// Create a record with only the two fields the aggregations use
    pub fn new(call_result: impl Into<String>, retained: u8) -> Self {
        Self {
            call_result: Some(call_result.into()),
            retained: Some(retained),
            age: None,
            tenure: None,
            mortgage_balance: None,
            call_hour: None,
        }
    }

    /// Outcome label, if present
    pub fn label(&self) -> Option<&str> {
        self.call_result.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.label() == Some(ANSWER)
    }
}

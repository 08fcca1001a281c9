//! Illustrative causal-effect figures for the campaign narrative
//!
//! These are literal constants selected by method label. Nothing here is
//! estimated from data.

use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

/// Method label shown when none is selected
pub const DEFAULT_METHOD: &str = "Propensity Score Matching";

/// A named retention-uplift figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IllustrativeEffect {
    pub method: &'static str,

    /// Retention uplift for answered calls, as a fraction
    pub uplift: f64,

    pub note: &'static str,
}

static EFFECTS: [IllustrativeEffect; 2] = [
    IllustrativeEffect {
        method: "Propensity Score Matching",
        uplift: 0.085,
        note: "Matching balanced age, balance, tenure, and other characteristics.",
    },
    IllustrativeEffect {
        method: "Instrumental Variables",
        uplift: 0.085,
        note: "Call timing used as an instrument for successful contact.",
    },
];

/// Label-keyed table of illustrative effects
#[derive(Debug, Clone, Copy, Default)]
pub struct IllustrativeEffects;

impl IllustrativeEffects {
    pub fn all(&self) -> &'static [IllustrativeEffect] {
        &EFFECTS
    }

    pub fn methods(&self) -> impl Iterator<Item = &'static str> {
        self.all().iter().map(|e| e.method)
    }

    /// Look up a method, ignoring ASCII case
    pub fn get(&self, method: &str) -> AnalysisResult<IllustrativeEffect> {
        self.all()
            .iter()
            .find(|e| e.method.eq_ignore_ascii_case(method.trim()))
            .copied()
            .ok_or_else(|| AnalysisError::UnknownEffect {
                method: method.to_string(),
                known: self.methods().collect::<Vec<_>>().join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_method_listed_first() {
        let effects = IllustrativeEffects;
        assert_eq!(effects.methods().next(), Some(DEFAULT_METHOD));
        assert_eq!(effects.get(DEFAULT_METHOD).unwrap().uplift, 0.085);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let effect = IllustrativeEffects.get("  instrumental variables ").unwrap();
        assert_eq!(effect.method, "Instrumental Variables");
    }

    #[test]
    fn test_unknown_method() {
        let err = IllustrativeEffects.get("Diff-in-Diff").unwrap_err();
        match &err {
            AnalysisError::UnknownEffect { method, known } => {
                assert_eq!(method, "Diff-in-Diff");
                assert_eq!(known, "Propensity Score Matching, Instrumental Variables");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("Instrumental Variables"));
    }
}

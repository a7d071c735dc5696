//! Numeric comparison tolerances shared by the validation tests.
//!
//! Tolerances live in one serializable policy instead of being scattered as
//! magic numbers across test files; a policy can also be loaded from JSON so
//! comparison runs against external reference data can tighten or relax bands
//! without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
}

impl ToleranceBand {
    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0);
        abs_diff <= self.abs_tol || rel_diff <= self.rel_tol
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceCategory {
    pub id: String,
    pub tolerance: ToleranceBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TolerancePolicy {
    #[serde(rename = "policyVersion")]
    pub policy_version: String,
    #[serde(default)]
    pub categories: Vec<ToleranceCategory>,
}

impl TolerancePolicy {
    pub fn band_for(&self, category_id: &str) -> Option<ToleranceBand> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.tolerance)
    }
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        let band = |id: &str, abs_tol: f64, rel_tol: f64| ToleranceCategory {
            id: id.to_owned(),
            tolerance: ToleranceBand { abs_tol, rel_tol },
        };

        Self {
            policy_version: "1".to_owned(),
            categories: vec![
                band("transform.roundtrip", 1.0e-11, 1.0e-11),
                band("transform.scenario", 1.0e-12, 1.0e-12),
                band("symmetry.reflection", 0.0, 0.0),
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TolerancePolicyError {
    #[error("failed to read tolerance policy '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse tolerance policy '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_tolerance_policy(path: &Path) -> Result<TolerancePolicy, TolerancePolicyError> {
    let raw = fs::read_to_string(path).map_err(|source| TolerancePolicyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| TolerancePolicyError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ToleranceBand, TolerancePolicy};

    #[test]
    fn default_policy_covers_the_core_categories() {
        let policy = TolerancePolicy::default();
        for id in ["transform.roundtrip", "symmetry.reflection"] {
            assert!(policy.band_for(id).is_some(), "missing category {id}");
        }
        assert!(policy.band_for("does.not.exist").is_none());
    }

    #[test]
    fn band_acceptance_uses_abs_or_rel() {
        let band = ToleranceBand {
            abs_tol: 1.0e-12,
            rel_tol: 1.0e-9,
        };
        assert!(band.accepts(1.0, 1.0 + 5.0e-13));
        assert!(band.accepts(1.0e6, 1.0e6 + 0.5e-3));
        assert!(!band.accepts(1.0, 1.1));
    }

    #[test]
    fn policy_round_trips_through_json() {
        let policy = TolerancePolicy::default();
        let json = serde_json::to_string_pretty(&policy).expect("policy should serialize");
        assert!(json.contains("policyVersion"));
        assert!(json.contains("absTol"));

        let back: TolerancePolicy = serde_json::from_str(&json).expect("policy should parse");
        assert_eq!(back, policy);
    }
}

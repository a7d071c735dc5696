pub mod constants;
pub mod tolerance;

pub use tolerance::{
    ToleranceBand, ToleranceCategory, TolerancePolicy, TolerancePolicyError, load_tolerance_policy,
};

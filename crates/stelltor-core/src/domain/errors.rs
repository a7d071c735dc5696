pub type TransformResult<T> = Result<T, TransformError>;

/// Failures surfaced by the angular transform and symmetrization engines.
///
/// Configuration problems (`InvalidGridSize`, `ShapeMismatch`,
/// `LayoutMismatch`, `SymmetryModeMismatch`) are detected eagerly, before any
/// accumulation starts. `NonFiniteGeometry` is a numerical-integrity failure
/// raised by the finiteness scan so the surrounding solver can tell bad
/// geometry apart from bad configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error(
        "grid cannot resolve the requested mode set ({reason}): m_pol={m_pol}, n_tor={n_tor}, n_theta_reduced={n_theta_reduced}, n_zeta={n_zeta}, n_field_periods={n_field_periods}"
    )]
    InvalidGridSize {
        m_pol: usize,
        n_tor: usize,
        n_theta_reduced: usize,
        n_zeta: usize,
        n_field_periods: usize,
        reason: &'static str,
    },
    #[error(
        "asymmetric sector shape (m_pol={asym_m_pol}, n_tor={asym_n_tor}) does not match symmetric sector (m_pol={sym_m_pol}, n_tor={sym_n_tor})"
    )]
    ShapeMismatch {
        sym_m_pol: usize,
        sym_n_tor: usize,
        asym_m_pol: usize,
        asym_n_tor: usize,
    },
    #[error("field '{field}' has {actual} samples but the grid expects {expected}")]
    LayoutMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("coefficient set is {coefficients} but the grid is {grid}")]
    SymmetryModeMismatch {
        grid: &'static str,
        coefficients: &'static str,
    },
    #[error("non-finite value {value} in '{field}' at flat index {index}")]
    NonFiniteGeometry {
        field: &'static str,
        index: usize,
        value: f64,
    },
}

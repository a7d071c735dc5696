//! Grid dimensions, symmetry mode and the shared error types.

pub mod errors;

pub use errors::{TransformError, TransformResult};

use crate::common::constants::TWO_PI;
use serde::{Deserialize, Serialize};

/// Whether the configuration respects stellarator symmetry
/// (θ,ζ) ↦ (−θ,−ζ) exactly or carries a symmetry-breaking sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymmetryMode {
    StellaratorSymmetric,
    Asymmetric,
}

impl SymmetryMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StellaratorSymmetric => "stellarator-symmetric",
            Self::Asymmetric => "asymmetric",
        }
    }
}

/// Angular grid for one flux surface: `n_theta_reduced` poloidal samples on
/// θ ∈ [0, π] (endpoints included) and `n_zeta` toroidal samples over one
/// field period.
///
/// The full poloidal extent is `2·n_theta_reduced − 2` samples over [0, 2π);
/// θ_i = 2π·i / n_theta_full and ζ_k = 2π·k / (nfp·n_zeta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngularGrid {
    m_pol: usize,
    n_tor: usize,
    n_theta_reduced: usize,
    n_zeta: usize,
    n_field_periods: usize,
    symmetry: SymmetryMode,
}

impl AngularGrid {
    pub fn new(
        m_pol: usize,
        n_tor: usize,
        n_theta_reduced: usize,
        n_zeta: usize,
        n_field_periods: usize,
        symmetry: SymmetryMode,
    ) -> TransformResult<Self> {
        let reject = |reason: &'static str| TransformError::InvalidGridSize {
            m_pol,
            n_tor,
            n_theta_reduced,
            n_zeta,
            n_field_periods,
            reason,
        };

        if m_pol < 1 {
            return Err(reject("at least one poloidal mode is required"));
        }
        if n_zeta < 1 {
            return Err(reject("at least one toroidal sample is required"));
        }
        if n_field_periods < 1 {
            return Err(reject("at least one field period is required"));
        }
        // Aliasing guards: every m < m_pol must sit strictly below the
        // poloidal Nyquist frequency of the full grid, every |n| <= n_tor
        // below the toroidal one.
        if n_theta_reduced < m_pol + 1 {
            return Err(reject("poloidal grid too coarse for m_pol"));
        }
        if n_zeta < 2 * n_tor + 1 {
            return Err(reject("toroidal grid too coarse for n_tor"));
        }

        Ok(Self {
            m_pol,
            n_tor,
            n_theta_reduced,
            n_zeta,
            n_field_periods,
            symmetry,
        })
    }

    pub const fn m_pol(&self) -> usize {
        self.m_pol
    }

    pub const fn n_tor(&self) -> usize {
        self.n_tor
    }

    /// Poloidal samples on the primary half-domain θ ∈ [0, π].
    pub const fn n_theta_reduced(&self) -> usize {
        self.n_theta_reduced
    }

    /// Poloidal samples over the full domain θ ∈ [0, 2π).
    pub const fn n_theta_full(&self) -> usize {
        2 * self.n_theta_reduced - 2
    }

    /// Poloidal extent of real-space fields: the primary half-domain when
    /// symmetric, the full domain when asymmetric.
    pub const fn n_theta_eff(&self) -> usize {
        match self.symmetry {
            SymmetryMode::StellaratorSymmetric => self.n_theta_reduced,
            SymmetryMode::Asymmetric => self.n_theta_full(),
        }
    }

    pub const fn n_zeta(&self) -> usize {
        self.n_zeta
    }

    pub const fn n_field_periods(&self) -> usize {
        self.n_field_periods
    }

    pub const fn symmetry(&self) -> SymmetryMode {
        self.symmetry
    }

    /// Grid points per real-space field for this mode.
    pub const fn field_len(&self) -> usize {
        self.n_theta_eff() * self.n_zeta
    }

    pub fn theta(&self, i: usize) -> f64 {
        TWO_PI * i as f64 / self.n_theta_full() as f64
    }

    /// Toroidal angle scaled by the field period count, i.e. the argument of
    /// the tabulated cos(nζ')/sin(nζ') basis columns.
    pub fn zeta_scaled(&self, k: usize) -> f64 {
        TWO_PI * k as f64 / self.n_zeta as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{AngularGrid, SymmetryMode, TransformError};

    fn grid(m_pol: usize, n_tor: usize, n_theta_reduced: usize, n_zeta: usize) -> AngularGrid {
        AngularGrid::new(
            m_pol,
            n_tor,
            n_theta_reduced,
            n_zeta,
            1,
            SymmetryMode::Asymmetric,
        )
        .expect("grid should validate")
    }

    #[test]
    fn derived_extents_follow_the_half_domain_convention() {
        let grid = grid(4, 2, 8, 6);
        assert_eq!(grid.n_theta_full(), 14);
        assert_eq!(grid.n_theta_eff(), 14);
        assert_eq!(grid.field_len(), 14 * 6);

        let symmetric = AngularGrid::new(4, 2, 8, 6, 1, SymmetryMode::StellaratorSymmetric)
            .expect("grid should validate");
        assert_eq!(symmetric.n_theta_eff(), 8);
        assert_eq!(symmetric.field_len(), 8 * 6);
    }

    #[test]
    fn axisymmetric_single_slice_grid_is_accepted() {
        let grid = grid(3, 0, 5, 1);
        assert_eq!(grid.n_theta_full(), 8);
        assert!((grid.theta(4) - std::f64::consts::PI).abs() < 1.0e-15);
    }

    #[test]
    fn undersized_grids_are_rejected_before_any_work() {
        let err = AngularGrid::new(4, 2, 4, 6, 1, SymmetryMode::Asymmetric)
            .expect_err("coarse poloidal grid should fail");
        assert!(matches!(err, TransformError::InvalidGridSize { .. }));

        let err = AngularGrid::new(4, 3, 8, 6, 1, SymmetryMode::Asymmetric)
            .expect_err("coarse toroidal grid should fail");
        assert!(matches!(err, TransformError::InvalidGridSize { .. }));

        let err = AngularGrid::new(0, 0, 4, 4, 1, SymmetryMode::Asymmetric)
            .expect_err("zero poloidal modes should fail");
        assert!(matches!(err, TransformError::InvalidGridSize { .. }));
    }

    #[test]
    fn grid_serializes_with_camel_case_keys() {
        let grid = grid(3, 1, 6, 4);
        let json = serde_json::to_string(&grid).expect("grid should serialize");
        assert!(json.contains("\"mPol\":3"));
        assert!(json.contains("\"symmetry\":\"asymmetric\""));

        let back: AngularGrid = serde_json::from_str(&json).expect("grid should deserialize");
        assert_eq!(back, grid);
    }
}

//! Angular transform engine: spectral coefficients ↔ real-space fields on a
//! fixed (θ, ζ) grid.

pub mod fourier_to_real;
pub mod real_to_fourier;

use crate::basis::{FourierBasis, ReflectionMap};
use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::domain::{AngularGrid, SymmetryMode, TransformError, TransformResult};
use crate::realspace::RealSpaceField;
use crate::spectral::SpectralCoefficients;
use std::sync::Arc;

/// Transform engine for one grid resolution.
///
/// Holds the precomputed basis tables and reflection maps; everything else is
/// per-call state, so one instance can serve any number of flux surfaces (and
/// threads) for the lifetime of a solver run.
pub struct AngularTransform {
    grid: AngularGrid,
    basis: FourierBasis,
    reflection: ReflectionMap,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl AngularTransform {
    pub fn new(grid: AngularGrid) -> Self {
        Self::with_diagnostics(grid, Arc::new(TracingDiagnostics))
    }

    pub fn with_diagnostics(grid: AngularGrid, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        let basis = FourierBasis::new(&grid);
        let reflection = ReflectionMap::new(&grid);
        Self {
            grid,
            basis,
            reflection,
            diagnostics,
        }
    }

    pub const fn grid(&self) -> &AngularGrid {
        &self.grid
    }

    pub const fn basis(&self) -> &FourierBasis {
        &self.basis
    }

    pub const fn reflection(&self) -> &ReflectionMap {
        &self.reflection
    }

    pub(crate) fn diagnostics(&self) -> &dyn DiagnosticsSink {
        self.diagnostics.as_ref()
    }

    /// Coefficient sets must match both the grid's mode shape and its
    /// symmetry mode before any accumulation starts.
    pub(crate) fn check_coefficients(&self, set: &SpectralCoefficients) -> TransformResult<()> {
        match (self.grid.symmetry(), set) {
            (SymmetryMode::StellaratorSymmetric, SpectralCoefficients::Symmetric(_))
            | (SymmetryMode::Asymmetric, SpectralCoefficients::Asymmetric(..)) => {}
            (SymmetryMode::StellaratorSymmetric, SpectralCoefficients::Asymmetric(..)) => {
                return Err(TransformError::SymmetryModeMismatch {
                    grid: SymmetryMode::StellaratorSymmetric.as_str(),
                    coefficients: SymmetryMode::Asymmetric.as_str(),
                });
            }
            (SymmetryMode::Asymmetric, SpectralCoefficients::Symmetric(_)) => {
                return Err(TransformError::SymmetryModeMismatch {
                    grid: SymmetryMode::Asymmetric.as_str(),
                    coefficients: SymmetryMode::StellaratorSymmetric.as_str(),
                });
            }
        }

        if set.shape() != (self.grid.m_pol(), self.grid.n_tor()) {
            let expected = self.grid.m_pol() * (2 * self.grid.n_tor() + 1);
            return Err(TransformError::LayoutMismatch {
                field: "spectral coefficients",
                expected,
                actual: set.symmetric_sector().r_cos.as_slice().len(),
            });
        }

        if let Some((field, index, value)) = set.find_non_finite() {
            self.diagnostics.non_finite_detected(field, index, value);
            return Err(TransformError::NonFiniteGeometry {
                field,
                index,
                value,
            });
        }

        Ok(())
    }

    pub(crate) fn check_field_layout(
        &self,
        field: &'static str,
        samples: &RealSpaceField,
    ) -> TransformResult<()> {
        let expected = self.grid.field_len();
        if samples.len() != expected
            || samples.n_theta() != self.grid.n_theta_eff()
            || samples.n_zeta() != self.grid.n_zeta()
        {
            return Err(TransformError::LayoutMismatch {
                field,
                expected,
                actual: samples.len(),
            });
        }
        Ok(())
    }
}

//! Real → Fourier direction: project grid samples of R, Z, λ back onto the
//! truncated mode set.
//!
//! On a symmetric grid the quadrature runs over the primary half-domain with
//! the θ = 0 and θ = π rows half-weighted, which reproduces the full-domain
//! trapezoidal sum of the implied symmetric extension. On an asymmetric grid
//! the sum runs over all of θ ∈ [0, 2π) with unit weights. Either way the
//! grid validation rules make the projection an exact inverse of
//! `fourier_to_real` for any coefficient set on the canonical mode set.

use super::AngularTransform;
use crate::basis::FourierBasis;
use crate::domain::{AngularGrid, SymmetryMode, TransformError, TransformResult};
use crate::realspace::RealSpaceField;
use crate::spectral::{AsymmetricSector, ModeArray, SpectralCoefficients, SymmetricSector};

/// Quadrature context shared by all six projections of one call.
struct Projection<'a> {
    basis: &'a FourierBasis,
    grid: &'a AngularGrid,
    theta_weights: Vec<f64>,
    scale: f64,
}

impl<'a> Projection<'a> {
    fn new(grid: &'a AngularGrid, basis: &'a FourierBasis) -> Self {
        let n_eff = grid.n_theta_eff();
        let denominator = (grid.n_theta_full() * grid.n_zeta()) as f64;
        let (theta_weights, scale) = match grid.symmetry() {
            SymmetryMode::StellaratorSymmetric => {
                let mut weights = vec![1.0; n_eff];
                weights[0] = 0.5;
                weights[n_eff - 1] = 0.5;
                (weights, 2.0 / denominator)
            }
            SymmetryMode::Asymmetric => (vec![1.0; n_eff], 1.0 / denominator),
        };

        Self {
            basis,
            grid,
            theta_weights,
            scale,
        }
    }

    /// θ-collapse of one field at fixed m: weighted sums against cos(mθ) and
    /// sin(mθ) per toroidal column.
    fn poloidal_collapse(&self, field: &RealSpaceField, m: usize) -> (Vec<f64>, Vec<f64>) {
        let n_zeta = self.grid.n_zeta();
        let mut against_cos = vec![0.0; n_zeta];
        let mut against_sin = vec![0.0; n_zeta];

        for (i, &weight) in self.theta_weights.iter().enumerate() {
            let cos_mu = weight * self.basis.cos_m_theta(m, i);
            let sin_mu = weight * self.basis.sin_m_theta(m, i);
            for k in 0..n_zeta {
                let sample = field.at(i, k);
                against_cos[k] += sample * cos_mu;
                against_sin[k] += sample * sin_mu;
            }
        }

        (against_cos, against_sin)
    }

    #[inline]
    fn mode_norm(m: usize, n: i32) -> f64 {
        if m == 0 && n == 0 { 1.0 } else { 2.0 }
    }

    /// Coefficients of the cos(mθ − nζ') expansion of `field`, zero in the
    /// non-canonical slots.
    fn cos_coefficients(&self, field: &RealSpaceField) -> ModeArray {
        let n_tor = self.grid.n_tor() as i32;
        let mut out = ModeArray::zeros(self.grid.m_pol(), self.grid.n_tor());
        for m in 0..self.grid.m_pol() {
            let (against_cos, against_sin) = self.poloidal_collapse(field, m);
            let n_min = if m == 0 { 0 } else { -n_tor };
            for n in n_min..=n_tor {
                let mut sum = 0.0;
                for k in 0..self.grid.n_zeta() {
                    // cos(mθ − nζ') = cos(mθ)cos(nζ') + sin(mθ)sin(nζ')
                    sum += against_cos[k] * self.basis.cos_n_zeta(n, k)
                        + against_sin[k] * self.basis.sin_n_zeta(n, k);
                }
                out.set(m, n, Self::mode_norm(m, n) * self.scale * sum);
            }
        }
        out
    }

    /// Coefficients of the sin(mθ − nζ') expansion of `field`. The (0, 0)
    /// slot is left at zero since its basis function vanishes identically.
    fn sin_coefficients(&self, field: &RealSpaceField) -> ModeArray {
        let n_tor = self.grid.n_tor() as i32;
        let mut out = ModeArray::zeros(self.grid.m_pol(), self.grid.n_tor());
        for m in 0..self.grid.m_pol() {
            let (against_cos, against_sin) = self.poloidal_collapse(field, m);
            let n_min = if m == 0 { 1 } else { -n_tor };
            for n in n_min..=n_tor {
                let mut sum = 0.0;
                for k in 0..self.grid.n_zeta() {
                    // sin(mθ − nζ') = sin(mθ)cos(nζ') − cos(mθ)sin(nζ')
                    sum += against_sin[k] * self.basis.cos_n_zeta(n, k)
                        - against_cos[k] * self.basis.sin_n_zeta(n, k);
                }
                out.set(m, n, Self::mode_norm(m, n) * self.scale * sum);
            }
        }
        out
    }
}

impl AngularTransform {
    /// Project R, Z, λ samples onto the truncated mode set.
    ///
    /// The sample extent must match the grid's effective θ extent, so a
    /// symmetric grid takes primary-half fields and an asymmetric grid takes
    /// full-domain fields, mirroring what `fourier_to_real` produces.
    pub fn real_to_fourier(
        &self,
        r: &RealSpaceField,
        z: &RealSpaceField,
        lambda: &RealSpaceField,
    ) -> TransformResult<SpectralCoefficients> {
        self.diagnostics()
            .transform_started("real_to_fourier", self.grid());
        self.check_field_layout("r", r)?;
        self.check_field_layout("z", z)?;
        self.check_field_layout("lambda", lambda)?;
        for (name, field) in [("r", r), ("z", z), ("lambda", lambda)] {
            if let Some((index, value)) = field.find_non_finite() {
                self.diagnostics().non_finite_detected(name, index, value);
                return Err(TransformError::NonFiniteGeometry {
                    field: name,
                    index,
                    value,
                });
            }
        }

        let projection = Projection::new(self.grid(), self.basis());
        let symmetric = SymmetricSector {
            r_cos: projection.cos_coefficients(r),
            z_sin: projection.sin_coefficients(z),
            lambda_sin: projection.sin_coefficients(lambda),
        };

        match self.grid().symmetry() {
            SymmetryMode::StellaratorSymmetric => {
                Ok(SpectralCoefficients::symmetric(symmetric))
            }
            SymmetryMode::Asymmetric => {
                let asymmetric = AsymmetricSector {
                    r_sin: projection.sin_coefficients(r),
                    z_cos: projection.cos_coefficients(z),
                    lambda_cos: projection.cos_coefficients(lambda),
                };
                SpectralCoefficients::asymmetric(symmetric, asymmetric)
            }
        }
    }
}

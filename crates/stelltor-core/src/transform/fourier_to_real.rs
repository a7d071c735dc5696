//! Fourier → Real direction: evaluate R, Z, λ and their angular derivatives
//! on the grid from a spectral coefficient set.
//!
//! The symmetric sector is accumulated over the primary half-domain
//! θ ∈ [0, π] only and extended to [π, 2π) by reflection; the asymmetric
//! sector cannot be recovered by reflection and is accumulated over the full
//! domain directly. The extension uses the reflect-then-add ordering: the
//! reflected symmetric value and the directly-evaluated asymmetric value are
//! combined per extended grid point.

use super::AngularTransform;
use crate::basis::FourierBasis;
use crate::domain::{TransformError, TransformResult};
use crate::realspace::{ParityField, RealSpaceField, RealSpaceGeometry};
use crate::spectral::{ModeArray, SpectralCoefficients};

/// Toroidal collapse of one coefficient array at fixed m:
/// a(k) = Σ_n c[m,n]·cos(nζ'), b(k) = Σ_n c[m,n]·sin(nζ'), plus the
/// n-weighted pair feeding the ζ-derivatives.
struct ToroidalAccum {
    a: Vec<f64>,
    b: Vec<f64>,
    an: Vec<f64>,
    bn: Vec<f64>,
}

impl ToroidalAccum {
    fn collapse(coeffs: &ModeArray, m: usize, basis: &FourierBasis, n_zeta: usize) -> Self {
        let mut a = vec![0.0; n_zeta];
        let mut b = vec![0.0; n_zeta];
        let mut an = vec![0.0; n_zeta];
        let mut bn = vec![0.0; n_zeta];

        let n_tor = coeffs.n_tor() as i32;
        let n_min = if m == 0 { 0 } else { -n_tor };
        for n in n_min..=n_tor {
            let c = coeffs.get(m, n);
            if c == 0.0 {
                continue;
            }
            let n_f = f64::from(n);
            for k in 0..n_zeta {
                let cos_nv = basis.cos_n_zeta(n, k);
                let sin_nv = basis.sin_n_zeta(n, k);
                a[k] += c * cos_nv;
                b[k] += c * sin_nv;
                an[k] += n_f * c * cos_nv;
                bn[k] += n_f * c * sin_nv;
            }
        }

        Self { a, b, an, bn }
    }
}

/// Per-point evaluation of a cos(mθ−nζ') expansion and its θ/ζ derivatives
/// from the collapsed toroidal sums.
#[inline]
fn eval_cos_basis(
    t: &ToroidalAccum,
    k: usize,
    cos_mu: f64,
    sin_mu: f64,
    m_f: f64,
    nfp_f: f64,
) -> (f64, f64, f64) {
    let value = cos_mu * t.a[k] + sin_mu * t.b[k];
    let d_theta = m_f * (cos_mu * t.b[k] - sin_mu * t.a[k]);
    let d_zeta = nfp_f * (sin_mu * t.an[k] - cos_mu * t.bn[k]);
    (value, d_theta, d_zeta)
}

/// Same for a sin(mθ−nζ') expansion.
#[inline]
fn eval_sin_basis(
    t: &ToroidalAccum,
    k: usize,
    cos_mu: f64,
    sin_mu: f64,
    m_f: f64,
    nfp_f: f64,
) -> (f64, f64, f64) {
    let value = sin_mu * t.a[k] - cos_mu * t.b[k];
    let d_theta = m_f * (cos_mu * t.a[k] + sin_mu * t.b[k]);
    let d_zeta = -nfp_f * (cos_mu * t.an[k] + sin_mu * t.bn[k]);
    (value, d_theta, d_zeta)
}

#[inline]
fn parity_target(field: &mut ParityField, m: usize) -> &mut RealSpaceField {
    if m % 2 == 0 {
        &mut field.even
    } else {
        &mut field.odd
    }
}

/// Reflection sign of each symmetric-sector output under (θ,ζ) ↦ (−θ,−ζ):
/// fields expanded in cos(mθ−nζ) are even, those in sin(mθ−nζ) odd, and each
/// angular derivative flips relative to its parent.
const SYM_REFLECTION_SIGNS: [f64; 9] = [
    1.0,  // r
    -1.0, // r_theta
    -1.0, // r_zeta
    -1.0, // z
    1.0,  // z_theta
    1.0,  // z_zeta
    -1.0, // lambda
    1.0,  // lambda_theta
    1.0,  // lambda_zeta
];

impl AngularTransform {
    /// Evaluate the coefficient set on the grid.
    ///
    /// Output extent follows the grid's symmetry mode: the primary
    /// half-domain for a symmetric grid, the full θ ∈ [0, 2π) domain for an
    /// asymmetric one.
    pub fn fourier_to_real(
        &self,
        coefficients: &SpectralCoefficients,
    ) -> TransformResult<RealSpaceGeometry> {
        self.diagnostics()
            .transform_started("fourier_to_real", self.grid());
        self.check_coefficients(coefficients)?;

        let n_zeta = self.grid().n_zeta();
        let n_reduced = self.grid().n_theta_reduced();
        let n_eff = self.grid().n_theta_eff();
        let nfp_f = self.grid().n_field_periods() as f64;

        // Symmetric sector over the primary half-domain.
        let mut sym = RealSpaceGeometry::zeros(n_reduced, n_zeta);
        let sector = coefficients.symmetric_sector();
        for m in 0..self.grid().m_pol() {
            let m_f = m as f64;
            let t_r = ToroidalAccum::collapse(&sector.r_cos, m, self.basis(), n_zeta);
            let t_z = ToroidalAccum::collapse(&sector.z_sin, m, self.basis(), n_zeta);
            let t_l = ToroidalAccum::collapse(&sector.lambda_sin, m, self.basis(), n_zeta);

            for i in 0..n_reduced {
                let cos_mu = self.basis().cos_m_theta(m, i);
                let sin_mu = self.basis().sin_m_theta(m, i);

                for k in 0..n_zeta {
                    let (r, ru, rv) = eval_cos_basis(&t_r, k, cos_mu, sin_mu, m_f, nfp_f);
                    parity_target(&mut sym.r, m).add(i, k, r);
                    parity_target(&mut sym.r_theta, m).add(i, k, ru);
                    parity_target(&mut sym.r_zeta, m).add(i, k, rv);

                    let (z, zu, zv) = eval_sin_basis(&t_z, k, cos_mu, sin_mu, m_f, nfp_f);
                    parity_target(&mut sym.z, m).add(i, k, z);
                    parity_target(&mut sym.z_theta, m).add(i, k, zu);
                    parity_target(&mut sym.z_zeta, m).add(i, k, zv);

                    let (l, lu, lv) = eval_sin_basis(&t_l, k, cos_mu, sin_mu, m_f, nfp_f);
                    parity_target(&mut sym.lambda, m).add(i, k, l);
                    parity_target(&mut sym.lambda_theta, m).add(i, k, lu);
                    parity_target(&mut sym.lambda_zeta, m).add(i, k, lv);
                }
            }
        }

        let geometry = match coefficients.asymmetric_sector() {
            None => sym,
            Some(asym_sector) => {
                // Asymmetric sector over the full domain; basis roles swap.
                let mut asym = RealSpaceGeometry::zeros(n_eff, n_zeta);
                for m in 0..self.grid().m_pol() {
                    let m_f = m as f64;
                    let t_r =
                        ToroidalAccum::collapse(&asym_sector.r_sin, m, self.basis(), n_zeta);
                    let t_z =
                        ToroidalAccum::collapse(&asym_sector.z_cos, m, self.basis(), n_zeta);
                    let t_l =
                        ToroidalAccum::collapse(&asym_sector.lambda_cos, m, self.basis(), n_zeta);

                    for i in 0..n_eff {
                        let cos_mu = self.basis().cos_m_theta(m, i);
                        let sin_mu = self.basis().sin_m_theta(m, i);

                        for k in 0..n_zeta {
                            let (r, ru, rv) = eval_sin_basis(&t_r, k, cos_mu, sin_mu, m_f, nfp_f);
                            parity_target(&mut asym.r, m).add(i, k, r);
                            parity_target(&mut asym.r_theta, m).add(i, k, ru);
                            parity_target(&mut asym.r_zeta, m).add(i, k, rv);

                            let (z, zu, zv) = eval_cos_basis(&t_z, k, cos_mu, sin_mu, m_f, nfp_f);
                            parity_target(&mut asym.z, m).add(i, k, z);
                            parity_target(&mut asym.z_theta, m).add(i, k, zu);
                            parity_target(&mut asym.z_zeta, m).add(i, k, zv);

                            let (l, lu, lv) = eval_cos_basis(&t_l, k, cos_mu, sin_mu, m_f, nfp_f);
                            parity_target(&mut asym.lambda, m).add(i, k, l);
                            parity_target(&mut asym.lambda_theta, m).add(i, k, lu);
                            parity_target(&mut asym.lambda_zeta, m).add(i, k, lv);
                        }
                    }
                }

                self.extend_and_combine(&sym, &asym)
            }
        };

        if let Some((field, index, value)) = geometry.find_non_finite() {
            self.diagnostics().non_finite_detected(field, index, value);
            return Err(TransformError::NonFiniteGeometry {
                field,
                index,
                value,
            });
        }

        Ok(geometry)
    }

    /// Full-domain composition: direct addition on the primary half, then
    /// reflect-then-add on the extension θ ∈ (π, 2π).
    fn extend_and_combine(
        &self,
        sym: &RealSpaceGeometry,
        asym: &RealSpaceGeometry,
    ) -> RealSpaceGeometry {
        let n_zeta = self.grid().n_zeta();
        let n_reduced = self.grid().n_theta_reduced();
        let n_full = self.grid().n_theta_full();

        let mut out = RealSpaceGeometry::zeros(n_full, n_zeta);
        let sym_fields = sym.parity_fields();
        let asym_fields = asym.parity_fields();
        let out_fields: [&mut ParityField; 9] = [
            &mut out.r,
            &mut out.r_theta,
            &mut out.r_zeta,
            &mut out.z,
            &mut out.z_theta,
            &mut out.z_zeta,
            &mut out.lambda,
            &mut out.lambda_theta,
            &mut out.lambda_zeta,
        ];

        for (slot, target) in out_fields.into_iter().enumerate() {
            let (_, sym_field) = sym_fields[slot];
            let (_, asym_field) = asym_fields[slot];
            let sign = SYM_REFLECTION_SIGNS[slot];

            for i in 0..n_reduced {
                for k in 0..n_zeta {
                    target
                        .even
                        .set(i, k, sym_field.even.at(i, k) + asym_field.even.at(i, k));
                    target
                        .odd
                        .set(i, k, sym_field.odd.at(i, k) + asym_field.odd.at(i, k));
                }
            }

            for i in n_reduced..n_full {
                let ir = self.reflection().poloidal(i);
                debug_assert!(ir < n_reduced);
                for k in 0..n_zeta {
                    let kr = self.reflection().toroidal(k);
                    target.even.set(
                        i,
                        k,
                        sign * sym_field.even.at(ir, kr) + asym_field.even.at(i, k),
                    );
                    target.odd.set(
                        i,
                        k,
                        sign * sym_field.odd.at(ir, kr) + asym_field.odd.at(i, k),
                    );
                }
            }
        }

        out
    }
}

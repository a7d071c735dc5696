//! Shared basis-function tables and reflection-index maps.
//!
//! Both transform directions and the symmetrization engine consume these; the
//! tables are computed once per grid resolution and are immutable afterwards,
//! so concurrent readers need no locking.

use crate::domain::AngularGrid;

/// Tabulated cos(m·θ_i), sin(m·θ_i) over the full poloidal domain and
/// cos(n·ζ'_k), sin(n·ζ'_k) over one field period, with
/// ζ'_k = 2π·k / n_zeta the field-period-scaled toroidal angle.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierBasis {
    m_pol: usize,
    n_tor: usize,
    n_theta_full: usize,
    n_zeta: usize,
    cos_m_theta: Vec<f64>,
    sin_m_theta: Vec<f64>,
    cos_n_zeta: Vec<f64>,
    sin_n_zeta: Vec<f64>,
}

impl FourierBasis {
    pub fn new(grid: &AngularGrid) -> Self {
        let m_pol = grid.m_pol();
        let n_tor = grid.n_tor();
        let n_theta_full = grid.n_theta_full();
        let n_zeta = grid.n_zeta();

        let mut cos_m_theta = Vec::with_capacity(m_pol * n_theta_full);
        let mut sin_m_theta = Vec::with_capacity(m_pol * n_theta_full);
        for m in 0..m_pol {
            for i in 0..n_theta_full {
                let angle = m as f64 * grid.theta(i);
                cos_m_theta.push(angle.cos());
                sin_m_theta.push(angle.sin());
            }
        }

        let mut cos_n_zeta = Vec::with_capacity((n_tor + 1) * n_zeta);
        let mut sin_n_zeta = Vec::with_capacity((n_tor + 1) * n_zeta);
        for n in 0..=n_tor {
            for k in 0..n_zeta {
                let angle = n as f64 * grid.zeta_scaled(k);
                cos_n_zeta.push(angle.cos());
                sin_n_zeta.push(angle.sin());
            }
        }

        Self {
            m_pol,
            n_tor,
            n_theta_full,
            n_zeta,
            cos_m_theta,
            sin_m_theta,
            cos_n_zeta,
            sin_n_zeta,
        }
    }

    #[inline]
    pub fn cos_m_theta(&self, m: usize, i: usize) -> f64 {
        debug_assert!(m < self.m_pol && i < self.n_theta_full);
        self.cos_m_theta[m * self.n_theta_full + i]
    }

    #[inline]
    pub fn sin_m_theta(&self, m: usize, i: usize) -> f64 {
        debug_assert!(m < self.m_pol && i < self.n_theta_full);
        self.sin_m_theta[m * self.n_theta_full + i]
    }

    /// cos(n·ζ'_k) for n ∈ [−n_tor, n_tor]; cosine is even in n.
    #[inline]
    pub fn cos_n_zeta(&self, n: i32, k: usize) -> f64 {
        let n_abs = n.unsigned_abs() as usize;
        debug_assert!(n_abs <= self.n_tor && k < self.n_zeta);
        self.cos_n_zeta[n_abs * self.n_zeta + k]
    }

    /// sin(n·ζ'_k) for n ∈ [−n_tor, n_tor]; sine is odd in n.
    #[inline]
    pub fn sin_n_zeta(&self, n: i32, k: usize) -> f64 {
        let n_abs = n.unsigned_abs() as usize;
        debug_assert!(n_abs <= self.n_tor && k < self.n_zeta);
        let value = self.sin_n_zeta[n_abs * self.n_zeta + k];
        if n < 0 { -value } else { value }
    }
}

/// Reflection of a periodic grid index under angle negation:
/// `(extent − index) mod extent`.
///
/// Maps 0 to 0 and, for even extents, `extent/2` to itself. This is the one
/// place the index arithmetic lives; both the transform and symmetrization
/// engines go through it.
#[inline]
pub fn reflect_index(extent: usize, index: usize) -> usize {
    assert!(
        index < extent,
        "reflect_index: index {index} out of range for extent {extent}"
    );
    (extent - index) % extent
}

/// Precomputed reflection maps for the stellarator symmetry operation
/// (θ, ζ) ↦ (−θ, −ζ): `poloidal` over the full θ grid, `toroidal` over ζ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionMap {
    poloidal: Vec<usize>,
    toroidal: Vec<usize>,
}

impl ReflectionMap {
    pub fn new(grid: &AngularGrid) -> Self {
        let n_theta_full = grid.n_theta_full();
        let n_zeta = grid.n_zeta();

        let poloidal: Vec<usize> = (0..n_theta_full)
            .map(|i| reflect_index(n_theta_full, i))
            .collect();
        let toroidal: Vec<usize> = (0..n_zeta).map(|k| reflect_index(n_zeta, k)).collect();

        debug_assert!(poloidal.iter().all(|&i| i < n_theta_full));
        debug_assert!(toroidal.iter().all(|&k| k < n_zeta));

        Self { poloidal, toroidal }
    }

    #[inline]
    pub fn poloidal(&self, i: usize) -> usize {
        self.poloidal[i]
    }

    #[inline]
    pub fn toroidal(&self, k: usize) -> usize {
        self.toroidal[k]
    }
}

#[cfg(test)]
mod tests {
    use super::{FourierBasis, ReflectionMap, reflect_index};
    use crate::domain::{AngularGrid, SymmetryMode};

    fn grid() -> AngularGrid {
        AngularGrid::new(4, 2, 8, 6, 3, SymmetryMode::Asymmetric).expect("grid should validate")
    }

    #[test]
    fn reflect_index_fixes_origin_and_midpoint() {
        assert_eq!(reflect_index(14, 0), 0);
        assert_eq!(reflect_index(14, 7), 7);
        assert_eq!(reflect_index(14, 1), 13);
        assert_eq!(reflect_index(14, 13), 1);
        assert_eq!(reflect_index(1, 0), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn reflect_index_rejects_out_of_range_input() {
        reflect_index(8, 8);
    }

    #[test]
    fn reflection_map_is_an_involution_within_bounds() {
        let map = ReflectionMap::new(&grid());
        for i in 0..14 {
            let ir = map.poloidal(i);
            assert!(ir < 14);
            assert_eq!(map.poloidal(ir), i);
        }
        for k in 0..6 {
            let kr = map.toroidal(k);
            assert!(kr < 6);
            assert_eq!(map.toroidal(kr), k);
        }
        assert_eq!(map.toroidal(0), 0);
    }

    #[test]
    fn basis_tables_match_direct_evaluation() {
        let grid = grid();
        let basis = FourierBasis::new(&grid);

        for m in 0..grid.m_pol() {
            for i in 0..grid.n_theta_full() {
                let angle = m as f64 * grid.theta(i);
                assert!((basis.cos_m_theta(m, i) - angle.cos()).abs() < 1.0e-15);
                assert!((basis.sin_m_theta(m, i) - angle.sin()).abs() < 1.0e-15);
            }
        }

        for n in -(grid.n_tor() as i32)..=(grid.n_tor() as i32) {
            for k in 0..grid.n_zeta() {
                let angle = f64::from(n) * grid.zeta_scaled(k);
                assert!((basis.cos_n_zeta(n, k) - angle.cos()).abs() < 1.0e-15);
                assert!((basis.sin_n_zeta(n, k) - angle.sin()).abs() < 1.0e-15);
            }
        }
    }

    #[test]
    fn degenerate_toroidal_basis_collapses_to_constant_one() {
        let grid =
            AngularGrid::new(1, 0, 2, 1, 1, SymmetryMode::Asymmetric).expect("grid should validate");
        let basis = FourierBasis::new(&grid);
        assert_eq!(basis.cos_n_zeta(0, 0), 1.0);
        assert_eq!(basis.sin_n_zeta(0, 0), 0.0);
    }
}

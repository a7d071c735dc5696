//! Spectral coefficient sets: dense (m, n) mode arrays grouped into a
//! stellarator-symmetric sector and an optional symmetry-breaking sector.

use crate::domain::{TransformError, TransformResult};

/// Dense map from (poloidal mode m ∈ [0, m_pol), toroidal mode
/// n ∈ [−n_tor, n_tor]) to a real coefficient.
///
/// The canonical mode set keeps only n ≥ 0 for m = 0 (cos(−nζ) is degenerate
/// with cos(nζ) there); non-canonical slots are ignored by the forward
/// transform and written as zero by the inverse one.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeArray {
    m_pol: usize,
    n_tor: usize,
    data: Vec<f64>,
}

impl ModeArray {
    pub fn zeros(m_pol: usize, n_tor: usize) -> Self {
        Self {
            m_pol,
            n_tor,
            data: vec![0.0; m_pol * (2 * n_tor + 1)],
        }
    }

    pub const fn m_pol(&self) -> usize {
        self.m_pol
    }

    pub const fn n_tor(&self) -> usize {
        self.n_tor
    }

    pub const fn shape(&self) -> (usize, usize) {
        (self.m_pol, self.n_tor)
    }

    #[inline]
    fn index(&self, m: usize, n: i32) -> usize {
        assert!(m < self.m_pol, "poloidal mode {m} out of range");
        assert!(
            n.unsigned_abs() as usize <= self.n_tor,
            "toroidal mode {n} out of range"
        );
        m * (2 * self.n_tor + 1) + (n + self.n_tor as i32) as usize
    }

    #[inline]
    pub fn get(&self, m: usize, n: i32) -> f64 {
        self.data[self.index(m, n)]
    }

    #[inline]
    pub fn set(&mut self, m: usize, n: i32, value: f64) {
        let index = self.index(m, n);
        self.data[index] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn find_non_finite(&self) -> Option<(usize, f64)> {
        self.data
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
            .map(|(index, value)| (index, *value))
    }
}

/// Canonical (m, n) mode pairs for a given shape: all n for m > 0, n ≥ 0 only
/// for m = 0.
pub fn canonical_modes(m_pol: usize, n_tor: usize) -> impl Iterator<Item = (usize, i32)> {
    let n_tor = n_tor as i32;
    (0..m_pol).flat_map(move |m| {
        let n_min = if m == 0 { 0 } else { -n_tor };
        (n_min..=n_tor).map(move |n| (m, n))
    })
}

/// Stellarator-symmetric sector: R ~ cos(mθ−nζ), Z and λ ~ sin(mθ−nζ).
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricSector {
    pub r_cos: ModeArray,
    pub z_sin: ModeArray,
    pub lambda_sin: ModeArray,
}

impl SymmetricSector {
    pub fn zeros(m_pol: usize, n_tor: usize) -> Self {
        Self {
            r_cos: ModeArray::zeros(m_pol, n_tor),
            z_sin: ModeArray::zeros(m_pol, n_tor),
            lambda_sin: ModeArray::zeros(m_pol, n_tor),
        }
    }

    pub const fn shape(&self) -> (usize, usize) {
        self.r_cos.shape()
    }
}

/// Symmetry-breaking sector: R ~ sin(mθ−nζ), Z and λ ~ cos(mθ−nζ).
#[derive(Debug, Clone, PartialEq)]
pub struct AsymmetricSector {
    pub r_sin: ModeArray,
    pub z_cos: ModeArray,
    pub lambda_cos: ModeArray,
}

impl AsymmetricSector {
    pub fn zeros(m_pol: usize, n_tor: usize) -> Self {
        Self {
            r_sin: ModeArray::zeros(m_pol, n_tor),
            z_cos: ModeArray::zeros(m_pol, n_tor),
            lambda_cos: ModeArray::zeros(m_pol, n_tor),
        }
    }

    pub const fn shape(&self) -> (usize, usize) {
        self.r_sin.shape()
    }
}

/// A coefficient set either carries only the symmetric sector or both sectors
/// with matching shape; a partially-allocated asymmetric state cannot be
/// expressed.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectralCoefficients {
    Symmetric(SymmetricSector),
    Asymmetric(SymmetricSector, AsymmetricSector),
}

impl SpectralCoefficients {
    pub fn symmetric(sector: SymmetricSector) -> Self {
        Self::Symmetric(sector)
    }

    pub fn asymmetric(
        symmetric: SymmetricSector,
        asymmetric: AsymmetricSector,
    ) -> TransformResult<Self> {
        let (sym_m_pol, sym_n_tor) = symmetric.shape();
        let (asym_m_pol, asym_n_tor) = asymmetric.shape();
        if (sym_m_pol, sym_n_tor) != (asym_m_pol, asym_n_tor) {
            return Err(TransformError::ShapeMismatch {
                sym_m_pol,
                sym_n_tor,
                asym_m_pol,
                asym_n_tor,
            });
        }

        Ok(Self::Asymmetric(symmetric, asymmetric))
    }

    pub const fn symmetric_sector(&self) -> &SymmetricSector {
        match self {
            Self::Symmetric(sector) | Self::Asymmetric(sector, _) => sector,
        }
    }

    pub const fn asymmetric_sector(&self) -> Option<&AsymmetricSector> {
        match self {
            Self::Symmetric(_) => None,
            Self::Asymmetric(_, sector) => Some(sector),
        }
    }

    pub const fn shape(&self) -> (usize, usize) {
        self.symmetric_sector().shape()
    }

    /// First non-finite coefficient, if any, tagged with its array role.
    pub fn find_non_finite(&self) -> Option<(&'static str, usize, f64)> {
        let sym = self.symmetric_sector();
        let mut arrays: Vec<(&'static str, &ModeArray)> = vec![
            ("r_cos", &sym.r_cos),
            ("z_sin", &sym.z_sin),
            ("lambda_sin", &sym.lambda_sin),
        ];
        if let Some(asym) = self.asymmetric_sector() {
            arrays.push(("r_sin", &asym.r_sin));
            arrays.push(("z_cos", &asym.z_cos));
            arrays.push(("lambda_cos", &asym.lambda_cos));
        }

        for (role, array) in arrays {
            if let Some((index, value)) = array.find_non_finite() {
                return Some((role, index, value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{AsymmetricSector, ModeArray, SpectralCoefficients, SymmetricSector, canonical_modes};
    use crate::domain::TransformError;

    #[test]
    fn mode_array_round_trips_signed_toroidal_indices() {
        let mut array = ModeArray::zeros(3, 2);
        array.set(1, -2, 0.25);
        array.set(2, 2, -0.5);
        array.set(0, 0, 6.0);

        assert_eq!(array.get(1, -2), 0.25);
        assert_eq!(array.get(2, 2), -0.5);
        assert_eq!(array.get(0, 0), 6.0);
        assert_eq!(array.get(1, 0), 0.0);
        assert_eq!(array.as_slice().len(), 3 * 5);
    }

    #[test]
    fn canonical_modes_exclude_negative_n_for_m_zero() {
        let modes: Vec<(usize, i32)> = canonical_modes(2, 1).collect();
        assert_eq!(modes, vec![(0, 0), (0, 1), (1, -1), (1, 0), (1, 1)]);
    }

    #[test]
    fn asymmetric_sets_reject_mismatched_sector_shapes() {
        let err = SpectralCoefficients::asymmetric(
            SymmetricSector::zeros(4, 2),
            AsymmetricSector::zeros(4, 1),
        )
        .expect_err("mismatched shapes should fail");
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                sym_m_pol: 4,
                sym_n_tor: 2,
                asym_m_pol: 4,
                asym_n_tor: 1,
            }
        );

        let set = SpectralCoefficients::asymmetric(
            SymmetricSector::zeros(4, 2),
            AsymmetricSector::zeros(4, 2),
        )
        .expect("matching shapes should build");
        assert!(set.asymmetric_sector().is_some());
    }

    #[test]
    fn non_finite_scan_reports_role_and_index() {
        let mut sector = SymmetricSector::zeros(2, 0);
        sector.z_sin.set(1, 0, f64::NAN);
        let set = SpectralCoefficients::symmetric(sector);

        let (role, index, value) = set.find_non_finite().expect("scan should find the NaN");
        assert_eq!(role, "z_sin");
        assert_eq!(index, 1);
        assert!(value.is_nan());
    }
}

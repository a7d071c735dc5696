//! Real-space fields: dense (θ, ζ) grids and their even-m/odd-m split.

/// Dense 2-D grid of scalars indexed by (poloidal sample i, toroidal
/// sample k), row-major in i.
#[derive(Debug, Clone, PartialEq)]
pub struct RealSpaceField {
    n_theta: usize,
    n_zeta: usize,
    data: Vec<f64>,
}

impl RealSpaceField {
    pub fn zeros(n_theta: usize, n_zeta: usize) -> Self {
        Self {
            n_theta,
            n_zeta,
            data: vec![0.0; n_theta * n_zeta],
        }
    }

    pub fn from_samples(n_theta: usize, n_zeta: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            n_theta * n_zeta,
            "sample count does not match grid extent"
        );
        Self {
            n_theta,
            n_zeta,
            data,
        }
    }

    pub const fn n_theta(&self) -> usize {
        self.n_theta
    }

    pub const fn n_zeta(&self) -> usize {
        self.n_zeta
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn at(&self, i: usize, k: usize) -> f64 {
        debug_assert!(i < self.n_theta && k < self.n_zeta);
        self.data[i * self.n_zeta + k]
    }

    #[inline]
    pub fn set(&mut self, i: usize, k: usize, value: f64) {
        debug_assert!(i < self.n_theta && k < self.n_zeta);
        self.data[i * self.n_zeta + k] = value;
    }

    #[inline]
    pub fn add(&mut self, i: usize, k: usize, value: f64) {
        debug_assert!(i < self.n_theta && k < self.n_zeta);
        self.data[i * self.n_zeta + k] += value;
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

/// Even-m / odd-m decomposition of one real-space field; the two parts sum
/// exactly to the total at every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityField {
    pub even: RealSpaceField,
    pub odd: RealSpaceField,
}

impl ParityField {
    pub fn zeros(n_theta: usize, n_zeta: usize) -> Self {
        Self {
            even: RealSpaceField::zeros(n_theta, n_zeta),
            odd: RealSpaceField::zeros(n_theta, n_zeta),
        }
    }

    #[inline]
    pub fn total(&self, i: usize, k: usize) -> f64 {
        self.even.at(i, k) + self.odd.at(i, k)
    }

    /// Materialized even + odd sum.
    pub fn combined(&self) -> RealSpaceField {
        let n_theta = self.even.n_theta();
        let n_zeta = self.even.n_zeta();
        let data = self
            .even
            .as_slice()
            .iter()
            .zip(self.odd.as_slice())
            .map(|(even, odd)| even + odd)
            .collect();
        RealSpaceField::from_samples(n_theta, n_zeta, data)
    }

    pub fn find_non_finite(&self) -> Option<(usize, f64)> {
        self.even.find_non_finite().or_else(|| self.odd.find_non_finite())
    }
}

/// Geometry output of the Fourier → Real direction: R, Z, λ and their angular
/// derivatives, each split by m-parity.
#[derive(Debug, Clone, PartialEq)]
pub struct RealSpaceGeometry {
    pub r: ParityField,
    pub r_theta: ParityField,
    pub r_zeta: ParityField,
    pub z: ParityField,
    pub z_theta: ParityField,
    pub z_zeta: ParityField,
    pub lambda: ParityField,
    pub lambda_theta: ParityField,
    pub lambda_zeta: ParityField,
}

impl RealSpaceGeometry {
    pub fn zeros(n_theta: usize, n_zeta: usize) -> Self {
        Self {
            r: ParityField::zeros(n_theta, n_zeta),
            r_theta: ParityField::zeros(n_theta, n_zeta),
            r_zeta: ParityField::zeros(n_theta, n_zeta),
            z: ParityField::zeros(n_theta, n_zeta),
            z_theta: ParityField::zeros(n_theta, n_zeta),
            z_zeta: ParityField::zeros(n_theta, n_zeta),
            lambda: ParityField::zeros(n_theta, n_zeta),
            lambda_theta: ParityField::zeros(n_theta, n_zeta),
            lambda_zeta: ParityField::zeros(n_theta, n_zeta),
        }
    }

    pub fn parity_fields(&self) -> [(&'static str, &ParityField); 9] {
        [
            ("r", &self.r),
            ("r_theta", &self.r_theta),
            ("r_zeta", &self.r_zeta),
            ("z", &self.z),
            ("z_theta", &self.z_theta),
            ("z_zeta", &self.z_zeta),
            ("lambda", &self.lambda),
            ("lambda_theta", &self.lambda_theta),
            ("lambda_zeta", &self.lambda_zeta),
        ]
    }

    pub fn find_non_finite(&self) -> Option<(&'static str, usize, f64)> {
        for (name, field) in self.parity_fields() {
            if let Some((index, value)) = field.find_non_finite() {
                return Some((name, index, value));
            }
        }
        None
    }
}

/// A real-space vector field with one component per geometric degree of
/// freedom, e.g. the MHD force residual (F_R, F_Z, F_λ).
#[derive(Debug, Clone, PartialEq)]
pub struct RealSpaceForces {
    pub f_r: RealSpaceField,
    pub f_z: RealSpaceField,
    pub f_lambda: RealSpaceField,
}

impl RealSpaceForces {
    pub fn zeros(n_theta: usize, n_zeta: usize) -> Self {
        Self {
            f_r: RealSpaceField::zeros(n_theta, n_zeta),
            f_z: RealSpaceField::zeros(n_theta, n_zeta),
            f_lambda: RealSpaceField::zeros(n_theta, n_zeta),
        }
    }

    pub fn components(&self) -> [(&'static str, &RealSpaceField); 3] {
        [
            ("f_r", &self.f_r),
            ("f_z", &self.f_z),
            ("f_lambda", &self.f_lambda),
        ]
    }

    pub fn find_non_finite(&self) -> Option<(&'static str, usize, f64)> {
        for (name, field) in self.components() {
            if let Some((index, value)) = field.find_non_finite() {
                return Some((name, index, value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{ParityField, RealSpaceField, RealSpaceForces};

    #[test]
    fn field_indexing_is_row_major_in_theta() {
        let mut field = RealSpaceField::zeros(3, 2);
        field.set(1, 0, 4.0);
        field.add(1, 0, 0.5);
        assert_eq!(field.at(1, 0), 4.5);
        assert_eq!(field.as_slice()[2], 4.5);
    }

    #[test]
    fn parity_total_is_the_exact_sum_of_even_and_odd() {
        let mut parity = ParityField::zeros(2, 2);
        parity.even.set(0, 1, 1.25);
        parity.odd.set(0, 1, -0.75);
        assert_eq!(parity.total(0, 1), 0.5);
        assert_eq!(parity.combined().at(0, 1), 0.5);
    }

    #[test]
    fn non_finite_scan_names_the_offending_component() {
        let mut forces = RealSpaceForces::zeros(2, 2);
        forces.f_z.set(1, 1, f64::INFINITY);
        let (name, index, value) = forces.find_non_finite().expect("scan should find Inf");
        assert_eq!(name, "f_z");
        assert_eq!(index, 3);
        assert!(value.is_infinite());
    }
}

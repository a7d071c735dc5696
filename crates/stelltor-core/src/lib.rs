pub mod basis;
pub mod common;
pub mod diagnostics;
pub mod domain;
pub mod realspace;
pub mod spectral;
pub mod symmetry;
pub mod transform;

pub use basis::{FourierBasis, ReflectionMap, reflect_index};
pub use common::{
    ToleranceBand, ToleranceCategory, TolerancePolicy, TolerancePolicyError,
    load_tolerance_policy,
};
pub use diagnostics::{DiagnosticsSink, NullDiagnostics, TracingDiagnostics};
pub use domain::{AngularGrid, SymmetryMode, TransformError, TransformResult};
pub use realspace::{ParityField, RealSpaceField, RealSpaceForces, RealSpaceGeometry};
pub use spectral::{
    AsymmetricSector, ModeArray, SpectralCoefficients, SymmetricSector, canonical_modes,
};
pub use symmetry::SymmetrizedForces;
pub use transform::AngularTransform;

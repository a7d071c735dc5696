//! Injectable diagnostics hook.
//!
//! The caller hands the transform a sink capability at construction; the
//! core itself holds no global state and never prints.

use crate::domain::AngularGrid;

pub trait DiagnosticsSink: Send + Sync {
    /// Called when a transform starts, before any accumulation.
    fn transform_started(&self, _direction: &'static str, _grid: &AngularGrid) {}

    /// Called when the finiteness scan finds a NaN/Inf, right before the
    /// transform fails with `NonFiniteGeometry`.
    fn non_finite_detected(&self, _field: &'static str, _index: usize, _value: f64) {}
}

/// Default sink: forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn transform_started(&self, direction: &'static str, grid: &AngularGrid) {
        tracing::debug!(
            direction,
            m_pol = grid.m_pol(),
            n_tor = grid.n_tor(),
            n_theta_eff = grid.n_theta_eff(),
            n_zeta = grid.n_zeta(),
            symmetry = grid.symmetry().as_str(),
            "angular transform started"
        );
    }

    fn non_finite_detected(&self, field: &'static str, index: usize, value: f64) {
        tracing::warn!(field, index, value, "non-finite value in angular transform");
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl DiagnosticsSink for NullDiagnostics {}

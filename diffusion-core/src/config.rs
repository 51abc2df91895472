use serde::{Deserialize, Serialize};

use crate::error::HeatError;
use crate::preset::Preset;

/// Snapshot cap for 1D runs.
pub const MAX_SNAPSHOTS_1D: usize = 201;
/// Snapshot cap for 2D runs.
pub const MAX_SNAPSHOTS_2D: usize = 201;
/// 3D buffers are `(n+2)^3`, so fewer of them are kept.
pub const MAX_SNAPSHOTS_3D: usize = 101;

pub fn default_max_snapshots(dim: usize) -> usize {
    match dim {
        3 => MAX_SNAPSHOTS_3D,
        2 => MAX_SNAPSHOTS_2D,
        _ => MAX_SNAPSHOTS_1D,
    }
}

/// Parameters of one integration run.
///
/// `dt` is advisory: the planner clamps it below the stability bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    /// Interior points per axis.
    pub n: usize,
    /// Diffusivity.
    pub alpha: f64,
    /// Requested time step.
    pub dt: f64,
    /// Total simulated duration.
    pub t_end: f64,
    pub preset: Preset,
    /// Overrides the per-dimension snapshot cap when set.
    pub max_snapshots: Option<usize>,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            n: 80,
            alpha: 0.2,
            dt: 0.0005,
            t_end: 1.0,
            preset: Preset::Point,
            max_snapshots: None,
        }
    }
}

impl HeatConfig {
    pub fn new(n: usize, alpha: f64, dt: f64, t_end: f64, preset: Preset) -> Self {
        Self {
            n,
            alpha,
            dt,
            t_end,
            preset,
            max_snapshots: None,
        }
    }

    pub fn with_max_snapshots(mut self, cap: usize) -> Self {
        self.max_snapshots = Some(cap);
        self
    }

    pub fn snapshot_cap(&self, dim: usize) -> usize {
        self.max_snapshots
            .unwrap_or_else(|| default_max_snapshots(dim))
    }

    /// Reject configurations that would yield a nonsensical or unbounded run.
    pub fn validate(&self, dim: usize) -> Result<(), HeatError> {
        if self.n < 1 {
            return Err(HeatError::InvalidGrid { n: self.n });
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(HeatError::InvalidDiffusivity(self.alpha));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(HeatError::InvalidTimeStep(self.dt));
        }
        if !(self.t_end.is_finite() && self.t_end > 0.0) {
            return Err(HeatError::InvalidDuration(self.t_end));
        }
        let cap = self.snapshot_cap(dim);
        if cap < 2 {
            return Err(HeatError::InvalidSnapshotCap(cap));
        }
        if !self.preset.supports(dim) {
            return Err(HeatError::UnsupportedPreset {
                preset: self.preset,
                dim,
            });
        }
        Ok(())
    }
}

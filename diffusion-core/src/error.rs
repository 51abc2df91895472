use std::fmt;

use crate::preset::Preset;

/// Caller contract violations detected before a run starts.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatError {
    InvalidGrid { n: usize },
    InvalidDiffusivity(f64),
    InvalidTimeStep(f64),
    InvalidDuration(f64),
    InvalidSnapshotCap(usize),
    UnsupportedPreset { preset: Preset, dim: usize },
    UnknownPreset(String),
}

impl fmt::Display for HeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatError::InvalidGrid { n } => write!(f, "n must be >= 1 (got {n})"),
            HeatError::InvalidDiffusivity(a) => {
                write!(f, "alpha must be finite and > 0 (got {a})")
            }
            HeatError::InvalidTimeStep(dt) => write!(f, "dt must be finite and > 0 (got {dt})"),
            HeatError::InvalidDuration(t) => write!(f, "t_end must be finite and > 0 (got {t})"),
            HeatError::InvalidSnapshotCap(m) => {
                write!(f, "max_snapshots must be >= 2 (got {m})")
            }
            HeatError::UnsupportedPreset { preset, dim } => {
                write!(f, "preset '{preset}' is not available in {dim}D")
            }
            HeatError::UnknownPreset(tag) => write!(f, "unknown preset '{tag}'"),
        }
    }
}

impl std::error::Error for HeatError {}

//! Explicit finite-difference integration of the heat equation
//! `u_t = alpha * lap(u)` on the unit interval, square or cube with
//! homogeneous Dirichlet boundaries.
//!
//! A run plans a stable step ([`stability::plan`]), builds a preset initial
//! field ([`preset::build_initial`]), advances it with double-buffered forward
//! Euler ([`stencil::HeatField`]) and keeps a bounded number of snapshots
//! ([`sampler::run`]).

pub mod config;
pub mod error;
pub mod grid;
pub mod preset;
pub mod result;
pub mod sampler;
pub mod stability;
pub mod stencil;

pub use config::{HeatConfig, default_max_snapshots};
pub use error::HeatError;
pub use grid::{Dimension, GridCodec};
pub use preset::Preset;
pub use result::{HeatResult, HeatResult1D, HeatResult2D, HeatResult3D};
pub use sampler::run;
pub use stability::{StepPlan, plan};
pub use stencil::{HeatField, StencilStepper};

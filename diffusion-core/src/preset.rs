//! Named initial conditions on the unit hypercube.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeatError;
use crate::grid::GridCodec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Point,
    Half,
    Bump,
    TwoHumps,
    Corner,
    TwoSpots,
}

const PRESETS_1D: [Preset; 4] = [Preset::Point, Preset::Half, Preset::Bump, Preset::TwoHumps];
const PRESETS_2D_3D: [Preset; 4] = [Preset::Point, Preset::Half, Preset::Corner, Preset::TwoSpots];

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Point => "point",
            Preset::Half => "half",
            Preset::Bump => "bump",
            Preset::TwoHumps => "two-humps",
            Preset::Corner => "corner",
            Preset::TwoSpots => "two-spots",
        }
    }

    /// Presets available for a dimensionality; empty outside 1..=3.
    pub fn available(dim: usize) -> &'static [Preset] {
        match dim {
            1 => &PRESETS_1D,
            2 | 3 => &PRESETS_2D_3D,
            _ => &[],
        }
    }

    pub fn supports(self, dim: usize) -> bool {
        Self::available(dim).contains(&self)
    }

    /// Field value at position `x`; `None` if the preset has no form in `x.len()` dimensions.
    pub fn sample(self, x: &[f64]) -> Option<f64> {
        let v = match (self, x.len()) {
            (Preset::Point, 1) => indicator((x[0] - 0.5).abs() <= 0.05),
            (Preset::Point, 2) => indicator(x.iter().all(|&v| (v - 0.5).abs() <= 0.08)),
            (Preset::Point, 3) => indicator(dist2(x, &[0.5, 0.5, 0.5]) <= 0.04),
            (Preset::Half, 1..=3) => indicator(x[0] < 0.5),
            (Preset::Bump, 1) => gaussian(x[0], 0.5, 80.0),
            (Preset::TwoHumps, 1) => gaussian(x[0], 0.3, 200.0) + gaussian(x[0], 0.7, 200.0),
            (Preset::Corner, 2) => indicator(x.iter().all(|&v| v < 0.3)),
            (Preset::Corner, 3) => indicator(x.iter().all(|&v| v < 0.35)),
            (Preset::TwoSpots, 2) => {
                indicator(dist2(x, &[0.3, 0.5]) <= 0.01) + indicator(dist2(x, &[0.7, 0.5]) <= 0.01)
            }
            (Preset::TwoSpots, 3) => {
                indicator(dist2(x, &[0.3, 0.5, 0.5]) <= 0.03)
                    + indicator(dist2(x, &[0.7, 0.5, 0.5]) <= 0.03)
            }
            _ => return None,
        };
        Some(v)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "point" => Ok(Preset::Point),
            "half" => Ok(Preset::Half),
            "bump" => Ok(Preset::Bump),
            "two-humps" => Ok(Preset::TwoHumps),
            "corner" => Ok(Preset::Corner),
            "two-spots" => Ok(Preset::TwoSpots),
            other => Err(HeatError::UnknownPreset(other.to_string())),
        }
    }
}

/// Build the t = 0 field (len = (n+2)^D). Boundary entries are left at 0.
pub fn build_initial<const D: usize>(
    codec: &GridCodec<D>,
    preset: Preset,
) -> Result<Vec<f64>, HeatError> {
    if !preset.supports(D) {
        return Err(HeatError::UnsupportedPreset { preset, dim: D });
    }
    let mut f = vec![0.0f64; codec.len()];
    for coord in codec.interior() {
        let x = codec.position(&coord);
        if let Some(v) = preset.sample(&x) {
            f[codec.encode(coord)] = v;
        }
    }
    Ok(f)
}

fn indicator(hot: bool) -> f64 {
    if hot { 1.0 } else { 0.0 }
}

fn gaussian(x: f64, center: f64, sharpness: f64) -> f64 {
    (-sharpness * (x - center) * (x - center)).exp()
}

fn dist2(x: &[f64], c: &[f64]) -> f64 {
    x.iter().zip(c).map(|(a, b)| (a - b) * (a - b)).sum()
}

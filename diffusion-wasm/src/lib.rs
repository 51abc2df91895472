use diffusion_core::{Dimension, HeatConfig, HeatError, HeatResult, Preset, run};
use wasm_bindgen::prelude::*;

enum Run {
    One(HeatResult<1>),
    Two(HeatResult<2>),
    Three(HeatResult<3>),
}

macro_rules! with_result {
    ($run:expr, $r:ident => $body:expr) => {
        match $run {
            Run::One($r) => $body,
            Run::Two($r) => $body,
            Run::Three($r) => $body,
        }
    };
}

/// A finished run, read by the chart/animation layer.
#[wasm_bindgen]
pub struct HeatSimulation {
    inner: Run,
    compute_ms: f64,
}

#[wasm_bindgen]
impl HeatSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        dim: usize,
        n: usize,
        alpha: f64,
        dt: f64,
        t_end: f64,
        preset: &str,
    ) -> Result<HeatSimulation, JsValue> {
        let preset: Preset = preset.parse().map_err(to_js)?;
        let dim = Dimension::from_usize(dim)
            .ok_or_else(|| JsValue::from_str("dim must be 1, 2 or 3"))?;
        let cfg = HeatConfig::new(n, alpha, dt, t_end, preset);

        let t0 = now_ms();
        let inner = match dim {
            Dimension::One => Run::One(run::<1>(&cfg).map_err(to_js)?),
            Dimension::Two => Run::Two(run::<2>(&cfg).map_err(to_js)?),
            Dimension::Three => Run::Three(run::<3>(&cfg).map_err(to_js)?),
        };
        let t1 = now_ms();

        Ok(HeatSimulation {
            inner,
            compute_ms: t1 - t0,
        })
    }

    pub fn dim(&self) -> usize {
        match self.inner {
            Run::One(_) => 1,
            Run::Two(_) => 2,
            Run::Three(_) => 3,
        }
    }

    pub fn steps(&self) -> usize { with_result!(&self.inner, r => r.steps) }
    pub fn dt(&self) -> f64 { with_result!(&self.inner, r => r.dt) }
    pub fn h(&self) -> f64 { with_result!(&self.inner, r => r.h) }
    pub fn side(&self) -> usize { with_result!(&self.inner, r => r.side) }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }

    pub fn snapshot_count(&self) -> usize {
        with_result!(&self.inner, r => r.len())
    }

    pub fn time(&self, i: usize) -> f64 {
        with_result!(&self.inner, r => r.times.get(i).copied().unwrap_or(0.0))
    }

    pub fn times(&self) -> Vec<f64> {
        with_result!(&self.inner, r => r.times.clone())
    }

    // Copy-based JS access (reliable)
    pub fn snapshot(&self, i: usize) -> Vec<f64> {
        with_result!(&self.inner, r => r.snapshot(i).map(<[f64]>::to_vec).unwrap_or_default())
    }

    /// Axes beyond the run's dimensionality are ignored.
    pub fn cell_at(&self, i: usize, x: usize, y: usize, z: usize) -> f64 {
        match &self.inner {
            Run::One(r) => r.cell_at(i, [x]),
            Run::Two(r) => r.cell_at(i, [x, y]),
            Run::Three(r) => r.cell_at(i, [x, y, z]),
        }
    }

    pub fn frame_at(&self, t: f64) -> usize {
        with_result!(&self.inner, r => r.frame_at(t))
    }

    pub fn sup_norm(&self, i: usize) -> f64 {
        with_result!(&self.inner, r => r.sup_norm(i))
    }
}

fn to_js(e: HeatError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

//! Time loop with bounded snapshot recording.

use tracing::{debug, info};

use crate::config::HeatConfig;
use crate::error::HeatError;
use crate::grid::GridCodec;
use crate::preset::build_initial;
use crate::result::HeatResult;
use crate::stability::plan;
use crate::stencil::{HeatField, StencilStepper};

/// Steps between recorded snapshots so that at most `max_snapshots - 1`
/// strided records follow the initial one.
pub fn decimation_stride(steps: usize, max_snapshots: usize) -> usize {
    let slots = max_snapshots.saturating_sub(1).max(1);
    steps.div_ceil(slots).max(1)
}

fn should_record(n: usize, steps: usize, stride: usize) -> bool {
    n % stride == 0 || n == steps
}

/// Integrate `config` to `t_end` and return the decimated trajectory.
pub fn run<const D: usize>(config: &HeatConfig) -> Result<HeatResult<D>, HeatError> {
    config.validate(D)?;
    let codec = GridCodec::<D>::new(config.n)?;
    let step_plan = plan(config.n, config.alpha, config.dt, config.t_end, D);
    if step_plan.clamped {
        debug!(
            requested_dt = config.dt,
            dt = step_plan.dt,
            max_stable_dt = step_plan.max_stable_dt,
            "requested dt exceeds stability margin, clamped"
        );
    }

    let initial = build_initial(&codec, config.preset)?;
    let cap = config.snapshot_cap(D);
    let stride = decimation_stride(step_plan.steps, cap);
    debug!(
        dim = D,
        n = config.n,
        steps = step_plan.steps,
        stride,
        cap,
        "planned run"
    );

    let mut snapshots = Vec::with_capacity(cap.min(step_plan.steps.saturating_add(1)) + 1);
    let mut times = Vec::with_capacity(snapshots.capacity());
    snapshots.push(initial.clone());
    times.push(0.0);

    let stepper = StencilStepper::new(codec, config.alpha, step_plan.dt);
    let mut field = HeatField::new(codec, initial);
    for n in 1..=step_plan.steps {
        field.explicit_step(&stepper);
        if should_record(n, step_plan.steps, stride) {
            snapshots.push(field.clone_field());
            times.push(n as f64 * step_plan.dt);
        }
    }

    info!(
        dim = D,
        n = config.n,
        preset = %config.preset,
        steps = step_plan.steps,
        dt = step_plan.dt,
        snapshots = snapshots.len(),
        "run finished"
    );

    Ok(HeatResult {
        n: config.n,
        side: codec.side(),
        h: step_plan.h,
        alpha: config.alpha,
        preset: config.preset,
        steps: step_plan.steps,
        dt: step_plan.dt,
        snapshots,
        times,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;

    #[test]
    fn stride_keeps_record_count_under_cap() {
        for steps in [1, 2, 199, 200, 201, 2762, 2763, 40_001, 1_000_003] {
            for cap in [2, 3, 101, 201] {
                let stride = decimation_stride(steps, cap);
                let records = (1..=steps)
                    .filter(|&n| should_record(n, steps, stride))
                    .count();
                assert!(records < cap, "steps={steps} cap={cap} records={records}");
            }
        }
    }

    #[test]
    fn stride_is_one_for_short_runs() {
        assert_eq!(decimation_stride(1, 201), 1);
        assert_eq!(decimation_stride(200, 201), 1);
        assert_eq!(decimation_stride(201, 201), 2);
    }

    #[test]
    fn every_step_recorded_when_short() {
        let cfg = HeatConfig::new(5, 0.1, 1e-3, 5e-3, Preset::Half);
        let r = run::<1>(&cfg).unwrap();
        assert_eq!(r.len(), r.steps + 1);
        assert_eq!(r.times.len(), r.snapshots.len());
    }

    #[test]
    fn final_step_recorded_off_stride() {
        let cfg = HeatConfig::new(3, 0.1, 1e-3, 0.0105, Preset::Point).with_max_snapshots(4);
        let r = run::<2>(&cfg).unwrap();
        assert_eq!(r.steps, 11);
        // stride = ceil(11 / 3) = 4: records at 4, 8 and 11
        assert_eq!(r.len(), 4);
        assert_eq!(*r.times.last().unwrap(), r.steps as f64 * r.dt);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = HeatConfig::new(0, 0.1, 1e-3, 1.0, Preset::Half);
        assert_eq!(run::<3>(&cfg), Err(HeatError::InvalidGrid { n: 0 }));
        let cfg = HeatConfig::new(4, 0.1, 1e-3, 1.0, Preset::TwoHumps);
        assert!(matches!(
            run::<2>(&cfg),
            Err(HeatError::UnsupportedPreset { dim: 2, .. })
        ));
    }
}

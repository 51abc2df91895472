//! Forward-Euler update over the `2D + 1` point Laplacian stencil.

use crate::grid::GridCodec;

/// One explicit Euler step of `u_t = alpha * lap(u)`.
///
/// Reads only `current` and writes only the interior of `next`; the boundary
/// layer of `next` is never touched.
#[derive(Debug, Clone, Copy)]
pub struct StencilStepper<const D: usize> {
    codec: GridCodec<D>,
    alpha: f64,
    dt: f64,
}

impl<const D: usize> StencilStepper<D> {
    pub fn new(codec: GridCodec<D>, alpha: f64, dt: f64) -> Self {
        Self { codec, alpha, dt }
    }

    pub fn apply(&self, current: &[f64], next: &mut [f64]) {
        debug_assert_eq!(current.len(), self.codec.len());
        debug_assert_eq!(next.len(), self.codec.len());

        let h = self.codec.h();
        let dx2 = h * h;
        let strides = self.codec.strides();
        let centre_weight = 2.0 * D as f64;

        for coord in self.codec.interior() {
            let i = self.codec.encode(coord);
            let u = current[i];

            let mut neighbours = 0.0;
            for s in strides {
                neighbours += current[i - s] + current[i + s];
            }

            let lap = (neighbours - centre_weight * u) / dx2;
            next[i] = u + self.dt * self.alpha * lap;
        }
    }
}

/// Owned working state of a run: the live field plus its scratch twin.
///
/// Every step writes into `next` and then swaps, so no update within a step
/// observes a value produced by the same step.
#[derive(Debug, Clone)]
pub struct HeatField<const D: usize> {
    codec: GridCodec<D>,
    field: Vec<f64>,
    next: Vec<f64>,
}

impl<const D: usize> HeatField<D> {
    /// `initial` must be `codec.len()` long with a zero boundary layer.
    pub fn new(codec: GridCodec<D>, initial: Vec<f64>) -> Self {
        debug_assert_eq!(initial.len(), codec.len());
        Self {
            codec,
            next: vec![0.0; initial.len()],
            field: initial,
        }
    }

    pub fn codec(&self) -> &GridCodec<D> {
        &self.codec
    }

    pub fn field(&self) -> &[f64] {
        &self.field
    }

    pub fn clone_field(&self) -> Vec<f64> {
        self.field.clone()
    }

    pub fn explicit_step(&mut self, stepper: &StencilStepper<D>) {
        stepper.apply(&self.field, &mut self.next);
        self.swap_buffers();
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.field, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_spike_spreads_to_neighbours_1d() {
        let codec = GridCodec::<1>::new(5).unwrap();
        let h = codec.h();
        let dt = 0.25 * h * h;
        let mut init = vec![0.0; codec.len()];
        init[3] = 1.0;

        let mut field = HeatField::new(codec, init);
        field.explicit_step(&StencilStepper::new(codec, 1.0, dt));

        // coefficient alpha * dt / h^2 = 0.25
        let f = field.field();
        assert_relative_eq!(f[3], 0.5, epsilon = 1e-12);
        assert_relative_eq!(f[2], 0.25, epsilon = 1e-12);
        assert_relative_eq!(f[4], 0.25, epsilon = 1e-12);
        assert_eq!(f[1], 0.0);
        assert_eq!(f[0], 0.0);
        assert_eq!(f[6], 0.0);
    }

    #[test]
    fn update_reads_only_previous_state() {
        // In-place sweeping would feed f[1]'s new value into f[2].
        let codec = GridCodec::<1>::new(3).unwrap();
        let h = codec.h();
        let stepper = StencilStepper::new(codec, 1.0, 0.1 * h * h);
        let mut field = HeatField::new(codec, vec![0.0, 1.0, 0.0, 0.0, 0.0]);
        field.explicit_step(&stepper);
        let f = field.field();
        assert_relative_eq!(f[1], 0.8, epsilon = 1e-12);
        assert_relative_eq!(f[2], 0.1, epsilon = 1e-12);
        assert_eq!(f[3], 0.0);
    }

    #[test]
    fn stencil_uses_all_axes_in_3d() {
        let codec = GridCodec::<3>::new(3).unwrap();
        let h = codec.h();
        let dt = 0.1 * h * h;
        let mut init = vec![0.0; codec.len()];
        let centre = codec.encode([2, 2, 2]);
        init[centre] = 1.0;

        let mut field = HeatField::new(codec, init);
        field.explicit_step(&StencilStepper::new(codec, 1.0, dt));

        let f = field.field();
        assert_relative_eq!(f[centre], 1.0 - 6.0 * 0.1, epsilon = 1e-12);
        for n in [[1, 2, 2], [3, 2, 2], [2, 1, 2], [2, 3, 2], [2, 2, 1], [2, 2, 3]] {
            assert_relative_eq!(f[codec.encode(n)], 0.1, epsilon = 1e-12);
        }
        assert_eq!(f[codec.encode([1, 1, 2])], 0.0);
    }

    #[test]
    fn boundary_layer_stays_zero() {
        let codec = GridCodec::<2>::new(4).unwrap();
        let h = codec.h();
        let mut init = vec![0.0; codec.len()];
        for c in codec.interior() {
            init[codec.encode(c)] = 1.0;
        }
        let stepper = StencilStepper::new(codec, 0.3, 0.2 * h * h / 0.3);
        let mut field = HeatField::new(codec, init);
        for _ in 0..25 {
            field.explicit_step(&stepper);
            for idx in 0..codec.len() {
                if codec.is_boundary(&codec.decode(idx)) {
                    assert_eq!(field.field()[idx], 0.0);
                }
            }
        }
    }
}

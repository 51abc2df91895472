use serde::Serialize;

use crate::preset::Preset;

/// Decimated trajectory of one run. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatResult<const D: usize> {
    /// Interior points per axis.
    pub n: usize,
    /// Stored points per axis (`n + 2`).
    pub side: usize,
    pub h: f64,
    pub alpha: f64,
    pub preset: Preset,
    /// Steps actually taken.
    pub steps: usize,
    /// Step size actually used.
    pub dt: f64,
    pub snapshots: Vec<Vec<f64>>,
    pub times: Vec<f64>,
}

pub type HeatResult1D = HeatResult<1>;
pub type HeatResult2D = HeatResult<2>;
pub type HeatResult3D = HeatResult<3>;

impl<const D: usize> HeatResult<D> {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshot(&self, i: usize) -> Option<&[f64]> {
        self.snapshots.get(i).map(Vec::as_slice)
    }

    pub fn final_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Value at `coord` in snapshot `i`, or 0 when either is out of range.
    pub fn cell_at(&self, i: usize, coord: [usize; D]) -> f64 {
        let Some(snap) = self.snapshots.get(i) else {
            return 0.0;
        };
        let mut idx = 0usize;
        for c in coord {
            if c >= self.side {
                return 0.0;
            }
            idx = idx * self.side + c;
        }
        snap.get(idx).copied().unwrap_or(0.0)
    }

    /// Last snapshot recorded at or before `t`, clamped to the recorded range.
    pub fn frame_at(&self, t: f64) -> usize {
        self.times
            .partition_point(|&ti| ti <= t)
            .saturating_sub(1)
    }

    pub fn sup_norm(&self, i: usize) -> f64 {
        self.snapshot(i)
            .map(|s| s.iter().fold(0.0f64, |m, v| m.max(v.abs())))
            .unwrap_or(0.0)
    }

    /// Discrete integral of the field, `sum(u) * h^D`.
    pub fn total_heat(&self, i: usize) -> f64 {
        self.snapshot(i)
            .map(|s| s.iter().sum::<f64>() * self.h.powi(D as i32))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> HeatResult<2> {
        // n = 1, side = 3
        let mut a = vec![0.0; 9];
        a[4] = 1.0;
        let mut b = vec![0.0; 9];
        b[4] = -0.5;
        HeatResult {
            n: 1,
            side: 3,
            h: 0.5,
            alpha: 1.0,
            preset: Preset::Point,
            steps: 2,
            dt: 0.25,
            snapshots: vec![a, b],
            times: vec![0.0, 0.5],
        }
    }

    #[test]
    fn cell_at_reads_row_major() {
        let r = tiny();
        assert_eq!(r.cell_at(0, [1, 1]), 1.0);
        assert_eq!(r.cell_at(1, [1, 1]), -0.5);
        assert_eq!(r.cell_at(0, [0, 1]), 0.0);
    }

    #[test]
    fn cell_at_out_of_range_is_zero() {
        let r = tiny();
        assert_eq!(r.cell_at(2, [1, 1]), 0.0);
        assert_eq!(r.cell_at(0, [3, 1]), 0.0);
        assert_eq!(r.cell_at(0, [1, usize::MAX]), 0.0);
    }

    #[test]
    fn frame_selection_clamps() {
        let r = tiny();
        assert_eq!(r.frame_at(-1.0), 0);
        assert_eq!(r.frame_at(0.0), 0);
        assert_eq!(r.frame_at(0.49), 0);
        assert_eq!(r.frame_at(0.5), 1);
        assert_eq!(r.frame_at(10.0), 1);
    }

    #[test]
    fn norms() {
        let r = tiny();
        assert_eq!(r.sup_norm(0), 1.0);
        assert_eq!(r.sup_norm(1), 0.5);
        assert_eq!(r.sup_norm(5), 0.0);
        assert_eq!(r.total_heat(0), 0.25);
        assert_eq!(r.final_time(), 0.5);
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
    }
}

//! Flat-buffer indexing for boundary-inclusive grids on the unit hypercube.
//!
//! A grid with `n` interior points per axis stores `n + 2` points per axis;
//! index `0` and `n + 1` on any axis form the Dirichlet boundary layer.
//! Offsets are row-major with the last axis varying fastest.

use crate::error::HeatError;

/// Runtime selector for the monomorphized 1D/2D/3D code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    One,
    Two,
    Three,
}

impl Dimension {
    pub fn as_usize(self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    pub fn from_usize(d: usize) -> Option<Self> {
        match d {
            1 => Some(Dimension::One),
            2 => Some(Dimension::Two),
            3 => Some(Dimension::Three),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCodec<const D: usize> {
    n: usize,
    side: usize,
    strides: [usize; D],
}

impl<const D: usize> GridCodec<D> {
    const SUPPORTED: () = assert!(D >= 1 && D <= 3, "grids must have 1, 2 or 3 axes");

    pub fn new(n: usize) -> Result<Self, HeatError> {
        let () = Self::SUPPORTED;
        if n < 1 {
            return Err(HeatError::InvalidGrid { n });
        }
        let side = n + 2;
        let mut strides = [1usize; D];
        for a in (1..D).rev() {
            strides[a - 1] = strides[a] * side;
        }
        Ok(Self { n, side, strides })
    }

    /// Interior points per axis.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Stored points per axis, boundary included.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Offset distance between neighbours along each axis.
    pub fn strides(&self) -> [usize; D] {
        self.strides
    }

    /// Buffer length, `(n + 2)^D`.
    pub fn len(&self) -> usize {
        self.strides[0] * self.side
    }

    /// Grid spacing on the unit interval.
    pub fn h(&self) -> f64 {
        1.0 / (self.n + 1) as f64
    }

    pub fn encode(&self, coord: [usize; D]) -> usize {
        let mut idx = 0usize;
        for a in 0..D {
            idx += coord[a] * self.strides[a];
        }
        idx
    }

    /// Inverse of `encode`.
    pub fn decode(&self, mut idx: usize) -> [usize; D] {
        let mut coord = [0usize; D];
        for a in 0..D {
            coord[a] = idx / self.strides[a];
            idx %= self.strides[a];
        }
        coord
    }

    pub fn is_boundary(&self, coord: &[usize; D]) -> bool {
        coord.iter().any(|&c| c == 0 || c == self.side - 1)
    }

    /// Continuous position `i / (n + 1)` of a grid point.
    pub fn position(&self, coord: &[usize; D]) -> [f64; D] {
        let denom = (self.n + 1) as f64;
        let mut x = [0.0; D];
        for a in 0..D {
            x[a] = coord[a] as f64 / denom;
        }
        x
    }

    /// Iterator over interior coordinates, in buffer order.
    pub fn interior(&self) -> InteriorIter<D> {
        InteriorIter {
            n: self.n,
            next: Some([1; D]),
        }
    }
}

pub struct InteriorIter<const D: usize> {
    n: usize,
    next: Option<[usize; D]>,
}

impl<const D: usize> Iterator for InteriorIter<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        let mut c = cur;
        self.next = None;
        for a in (0..D).rev() {
            if c[a] < self.n {
                c[a] += 1;
                self.next = Some(c);
                break;
            }
            c[a] = 1;
        }
        Some(cur)
    }
}

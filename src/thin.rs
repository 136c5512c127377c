//! Zhang-Suen thinning.
//!
//! The grid is padded with one background pixel on every side so the
//! 8-neighbour ring is defined for every original pixel, including those on
//! the image border. Each sub-iteration evaluates all candidates against the
//! grid as it was when the sub-iteration started and only then clears the
//! marked pixels.

use log::debug;
use ndarray::{Array2, s};

use crate::grid::{BinaryGrid, RING};

/// The two Zhang-Suen sub-iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    First,
    Second,
}

/// A one-pixel-wide fixed point of the thinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    grid: BinaryGrid,
    passes: usize,
}

impl Skeleton {
    /// The skeleton pixels, same dimensions as the thinned input.
    pub fn grid(&self) -> &BinaryGrid {
        &self.grid
    }

    pub fn into_grid(self) -> BinaryGrid {
        self.grid
    }

    /// Full passes run, including the final pass that deleted nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl AsRef<BinaryGrid> for Skeleton {
    fn as_ref(&self) -> &BinaryGrid {
        &self.grid
    }
}

/// Thin `grid` to its skeleton.
pub fn skeletonize(grid: &BinaryGrid) -> Skeleton {
    Thinning::new(grid).run()
}

/// Step-wise Zhang-Suen state over a padded copy of the input.
#[derive(Debug, Clone)]
pub struct Thinning {
    padded: Array2<u8>,
    passes: usize,
}

impl Thinning {
    pub fn new(grid: &BinaryGrid) -> Self {
        let (h, w) = (grid.height(), grid.width());
        let mut padded = Array2::zeros((h + 2, w + 2));
        padded
            .slice_mut(s![1..=h, 1..=w])
            .assign(grid.as_array());
        Self { padded, passes: 0 }
    }

    /// Run one full pass (both sub-iterations) and return the number of pixels deleted.
    pub fn step(&mut self) -> usize {
        self.passes += 1;
        let first = sub_iteration(&mut self.padded, Phase::First);
        let second = sub_iteration(&mut self.padded, Phase::Second);
        first + second
    }

    /// Foreground pixels remaining.
    pub fn count(&self) -> usize {
        self.padded.iter().filter(|&&v| v != 0).count()
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The current state with the padding removed.
    pub fn snapshot(&self) -> BinaryGrid {
        let (h, w) = self.padded.dim();
        BinaryGrid::from_array(self.padded.slice(s![1..h - 1, 1..w - 1]).to_owned())
    }

    /// Repeat passes until one deletes nothing.
    pub fn run(mut self) -> Skeleton {
        let start = self.count();
        while self.step() > 0 {}
        debug!(
            "thinning converged after {} passes ({} -> {} pixels)",
            self.passes,
            start,
            self.count()
        );
        Skeleton {
            grid: self.snapshot(),
            passes: self.passes,
        }
    }
}

/// Mark against the unmodified grid, then delete everything marked at once.
fn sub_iteration(img: &mut Array2<u8>, phase: Phase) -> usize {
    let (h, w) = img.dim();
    let mut marked = Vec::new();

    for r in 1..h.saturating_sub(1) {
        for c in 1..w.saturating_sub(1) {
            if img[[r, c]] == 0 {
                continue;
            }
            let p = ring(img, r, c);
            if deletable(&p, phase) {
                marked.push((r, c));
            }
        }
    }

    for &(r, c) in &marked {
        img[[r, c]] = 0;
    }
    marked.len()
}

/// `P2..P9` of an interior pixel of the padded grid.
fn ring(img: &Array2<u8>, r: usize, c: usize) -> [u8; 8] {
    RING.map(|(dr, dc)| img[[(r as isize + dr) as usize, (c as isize + dc) as usize]])
}

fn deletable(p: &[u8; 8], phase: Phase) -> bool {
    let b: u8 = p.iter().sum();
    if !(2..=6).contains(&b) || transitions(p) != 1 {
        return false;
    }

    let [p2, _, p4, _, p6, _, p8, _] = *p;
    match phase {
        Phase::First => p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0,
        Phase::Second => p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0,
    }
}

/// 0→1 transitions around `P2, P3, ..., P9, P2`.
fn transitions(p: &[u8; 8]) -> usize {
    (0..8).filter(|&i| p[i] == 0 && p[(i + 1) % 8] == 1).count()
}

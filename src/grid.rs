use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold as ip_threshold};
use ndarray::{Array2, s};

use crate::SinglelineResult;

/// The 8-neighbour ring as `(d_row, d_col)` offsets, clockwise starting north
/// (`P2..P9` in Zhang-Suen terms). Thinning, graph adjacency and the tracer's
/// tie-breaks all enumerate neighbours in this order.
pub const RING: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Immutable-by-convention W×H grid of {0, 1}, origin top-left, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    cells: Array2<u8>,
}

impl BinaryGrid {
    /// All-background grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::zeros((height, width)),
        }
    }

    /// Build from a row-major buffer; any non-zero value counts as foreground.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> SinglelineResult<Self> {
        let mut cells = Array2::from_shape_vec((height, width), data)?;
        cells.mapv_inplace(|v| u8::from(v != 0));
        Ok(Self { cells })
    }

    /// Build by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        Self {
            cells: Array2::from_shape_fn((height, width), |(r, c)| u8::from(f(r, c))),
        }
    }

    /// Threshold a grayscale glyph raster: values strictly above `threshold` are stroke.
    pub fn from_gray(gray: &GrayImage, threshold: u8) -> Self {
        let binary = ip_threshold(gray, threshold, ThresholdType::Binary);
        let (w, h) = binary.dimensions();
        Self::from_fn(w as usize, h as usize, |r, c| {
            binary.get_pixel(c as u32, r as u32)[0] > 0
        })
    }

    pub(crate) fn from_array(cells: Array2<u8>) -> Self {
        Self { cells }
    }

    pub(crate) fn as_array(&self) -> &Array2<u8> {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// `true` if the grid has no foreground pixel (or no cells at all).
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    /// Whether `(row, col)` is a foreground pixel; out-of-range reads as background.
    pub fn get(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.cells
            .get((row as usize, col as usize))
            .is_some_and(|&v| v != 0)
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.cells[[row, col]] = u8::from(value);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Foreground pixels as `(row, col)` in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &v)| v != 0)
            .map(|(idx, _)| idx)
    }

    /// Foreground neighbours of `(row, col)` in [`RING`] order.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        RING.into_iter().filter_map(move |(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            self.get(r, c).then_some((r as usize, c as usize))
        })
    }

    /// Count of unordered 8-adjacent foreground pixel pairs.
    pub fn adjacent_pairs(&self) -> usize {
        let total: usize = self
            .foreground()
            .map(|(r, c)| self.neighbors(r, c).count())
            .sum();
        total / 2
    }

    /// Crop to the tight bounding box of the foreground.
    ///
    /// Returns the cropped grid and the `(col, row)` offset of its origin in
    /// this grid. A grid without foreground crops to an empty 0×0 grid.
    pub fn crop_to_content(&self) -> (BinaryGrid, (usize, usize)) {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (r, c) in self.foreground() {
            bounds = Some(match bounds {
                None => (r, r, c, c),
                Some((r0, r1, c0, c1)) => (r0.min(r), r1.max(r), c0.min(c), c1.max(c)),
            });
        }

        match bounds {
            Some((r0, r1, c0, c1)) => {
                let cells = self.cells.slice(s![r0..=r1, c0..=c1]).to_owned();
                (Self { cells }, (c0, r0))
            }
            None => (Self::new(0, 0), (0, 0)),
        }
    }

    /// Render as a grayscale image: foreground 255, background 0.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let v = self.cells[[y as usize, x as usize]];
            Luma([if v != 0 { 255 } else { 0 }])
        })
    }
}

#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> BinaryGrid {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    BinaryGrid::from_fn(width, height, |r, c| rows[r].as_bytes()[c] == b'#')
}

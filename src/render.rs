//! Debug images of the intermediate stages, drawn with `imageproc`.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::geom::Point;
use crate::grid::BinaryGrid;
use crate::marker::Marker;
use crate::shape::MarkerStyle;
use crate::trace::StrokePath;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([50, 50, 50]);
const MARKER: Rgb<u8> = Rgb([220, 30, 30]);

const PALETTE: [Rgb<u8>; 8] = [
    Rgb([230, 25, 75]),
    Rgb([60, 180, 75]),
    Rgb([0, 130, 200]),
    Rgb([245, 130, 48]),
    Rgb([145, 30, 180]),
    Rgb([70, 240, 240]),
    Rgb([240, 50, 230]),
    Rgb([210, 245, 60]),
];

/// Colour of the `index`-th traced path.
pub fn path_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Skeleton pixels white on black.
pub fn render_skeleton(skeleton: &BinaryGrid) -> GrayImage {
    skeleton.to_gray_image()
}

/// `grid` in dark grey with every path drawn over it in its palette colour.
pub fn render_trace(grid: &BinaryGrid, paths: &[StrokePath]) -> RgbImage {
    let mut canvas = background(grid);
    for (i, path) in paths.iter().enumerate() {
        draw_polyline(&mut canvas, path.points(), false, path_color(i));
        if let [p] = path.points() {
            put(&mut canvas, *p, path_color(i));
        }
    }
    canvas
}

/// The trace overlay with marker outlines on top. `markers` and `style` are in pixels.
pub fn render_markers(
    grid: &BinaryGrid,
    paths: &[StrokePath],
    markers: &[Marker],
    style: &MarkerStyle,
) -> RgbImage {
    let mut canvas = render_trace(grid, paths);
    for marker in markers {
        draw_polyline(&mut canvas, &style.outline(marker), true, MARKER);
    }
    canvas
}

fn background(grid: &BinaryGrid) -> RgbImage {
    let mut canvas =
        RgbImage::from_pixel(grid.width() as u32, grid.height() as u32, BACKGROUND);
    for (row, col) in grid.foreground() {
        canvas.put_pixel(col as u32, row as u32, FOREGROUND);
    }
    canvas
}

fn draw_polyline(canvas: &mut RgbImage, points: &[Point], closed: bool, color: Rgb<u8>) {
    let as_f32 = |p: Point| (p.x as f32, p.y as f32);
    for pair in points.windows(2) {
        draw_line_segment_mut(canvas, as_f32(pair[0]), as_f32(pair[1]), color);
    }
    if closed && points.len() > 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        draw_line_segment_mut(canvas, as_f32(last), as_f32(first), color);
    }
}

fn put(canvas: &mut RgbImage, p: Point, color: Rgb<u8>) {
    let (x, y) = (p.x.round(), p.y.round());
    if x >= 0.0 && y >= 0.0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

use crate::SinglelineResult;
use crate::config::positive;
use crate::geom::Point;

/// Maps pixel coordinates to output units: a uniform scale about an origin,
/// optionally flipping the downward pixel y axis to an upward one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelTransform {
    scale: f64,
    origin: Point,
    flip_y: bool,
}

impl Default for PixelTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PixelTransform {
    /// One pixel is one unit, y still points down.
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            origin: Point::new(0.0, 0.0),
            flip_y: false,
        }
    }

    /// `scale` units per pixel about `origin` (in pixels), y pointing down.
    pub fn new(scale: f64, origin: Point) -> SinglelineResult<Self> {
        positive("scale", scale)?;
        Ok(Self {
            scale,
            origin,
            flip_y: false,
        })
    }

    /// Font-unit transform for a glyph rendered at `render_size` pixels per em
    /// with its pen position on the baseline at `origin`; y points up.
    pub fn for_em(units_per_em: f64, render_size: f64, origin: Point) -> SinglelineResult<Self> {
        positive("units_per_em", units_per_em)?;
        positive("render_size", render_size)?;
        Ok(Self {
            scale: units_per_em / render_size,
            origin,
            flip_y: true,
        })
    }

    /// Set whether output y points up.
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn flips_y(&self) -> bool {
        self.flip_y
    }

    /// The same mapping for a grid whose origin sits at `(dx, dy)` pixels in
    /// the grid this transform was built for (e.g. after a crop).
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self {
            origin: Point::new(self.origin.x - dx, self.origin.y - dy),
            ..*self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        let x = (p.x - self.origin.x) * self.scale;
        let y = (p.y - self.origin.y) * self.scale;
        Point::new(x, if self.flip_y { -y } else { y })
    }

    /// Convert a length in output units to pixels.
    pub fn to_pixels(&self, units: f64) -> f64 {
        units / self.scale
    }
}

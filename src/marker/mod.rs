use crate::{SinglelineError, SinglelineResult};
use crate::geom::Point;
use crate::trace::StrokePath;
use crate::transform::PixelTransform;

pub mod dash;
pub mod dot;

/// Rotation of a dash marker in output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub cos: f64,
    pub sin: f64,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation { cos: 1.0, sin: 0.0 };

    /// Counter-clockwise rotation by `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { cos, sin }
    }

    /// Angle in radians, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    pub fn degrees(&self) -> f64 {
        self.angle().to_degrees()
    }

    /// Row-major 2×2 matrix `[[cos, -sin], [sin, cos]]`.
    pub fn matrix(&self) -> [[f64; 2]; 2] {
        [[self.cos, -self.sin], [self.sin, self.cos]]
    }

    pub fn rotate(&self, v: Point) -> Point {
        Point::new(
            self.cos * v.x - self.sin * v.y,
            self.sin * v.x + self.cos * v.y,
        )
    }
}

/// A placed output primitive, in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Dot { position: Point },
    Dash { position: Point, rotation: Rotation },
}

impl Marker {
    pub fn position(&self) -> Point {
        match *self {
            Marker::Dot { position } | Marker::Dash { position, .. } => position,
        }
    }

    pub fn rotation(&self) -> Option<Rotation> {
        match *self {
            Marker::Dot { .. } => None,
            Marker::Dash { rotation, .. } => Some(rotation),
        }
    }
}

/// A policy that walks the traced paths of one glyph and emits markers.
pub trait MarkerPlacer {
    type Options;

    /// Place markers along all `paths` of one glyph. Positions are mapped
    /// through `transform`; option lengths are in the transform's output units.
    fn place(
        &self,
        paths: &[StrokePath],
        transform: &PixelTransform,
        options: &Self::Options,
    ) -> SinglelineResult<Vec<Marker>>;
}

pub use dash::DashPlacer;
pub use dot::DotPlacer;

/// Upper bound on the markers one walk may schedule for a glyph.
pub const MAX_MARKERS_PER_GLYPH: usize = 1_000_000;

/// Convert the walk step `units` to pixels and check that walking `paths`
/// with it terminates: the step must be finite, positive, must move the
/// largest coordinate of the paths, and must not schedule more than
/// [`MAX_MARKERS_PER_GLYPH`] markers.
pub(crate) fn pixel_step(
    name: &'static str,
    units: f64,
    transform: &PixelTransform,
    paths: &[StrokePath],
) -> SinglelineResult<f64> {
    let step = transform.to_pixels(units);
    let invalid = SinglelineError::InvalidParameter { name, value: units };
    if !step.is_finite() || step <= 0.0 {
        return Err(invalid);
    }

    let extent = paths
        .iter()
        .flat_map(|p| p.points())
        .fold(0.0f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
    if extent + step == extent {
        return Err(invalid);
    }

    let total: f64 = paths.iter().map(StrokePath::arc_length).sum();
    if total / step > MAX_MARKERS_PER_GLYPH as f64 {
        return Err(invalid);
    }
    Ok(step)
}

/// Offsets `from, from + step, ...` that are `<= length`, counted up front.
pub(crate) fn offsets(from: f64, step: f64, length: f64) -> impl Iterator<Item = f64> {
    let count = if from <= length {
        ((length - from) / step).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |k| from + k as f64 * step)
}

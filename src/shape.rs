//! Outlines of placed markers, for building glyph contours or previews.

use std::f64::consts::TAU;

use crate::geom::Point;
use crate::marker::{Marker, Rotation};

/// Sides used to approximate a round dot.
pub const DEFAULT_DOT_SIDES: usize = 12;

/// Regular polygon of `sides` vertices on a circle of `radius` around `center`,
/// counter-clockwise in a y-up frame, starting at angle zero.
pub fn dot_outline(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    let sides = sides.max(3);
    (0..sides)
        .map(|k| {
            let (sin, cos) = (TAU * k as f64 / sides as f64).sin_cos();
            Point::new(center.x + radius * cos, center.y + radius * sin)
        })
        .collect()
}

/// Rectangle `length` long along the dash direction and `thickness` across it,
/// centred on `center`, counter-clockwise in a y-up frame.
pub fn dash_outline(center: Point, rotation: Rotation, length: f64, thickness: f64) -> [Point; 4] {
    let (hl, ht) = (length / 2.0, thickness / 2.0);
    [(-hl, -ht), (hl, -ht), (hl, ht), (-hl, ht)]
        .map(|(x, y)| center + rotation.rotate(Point::new(x, y)))
}

/// Marker sizes used when turning markers into outlines.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub dot_radius: f64,
    pub dot_sides: usize,
    pub dash_length: f64,
    pub dash_thickness: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            dot_radius: 20.0,
            dot_sides: DEFAULT_DOT_SIDES,
            dash_length: 40.0,
            dash_thickness: 20.0,
        }
    }
}

impl MarkerStyle {
    pub fn outline(&self, marker: &Marker) -> Vec<Point> {
        match *marker {
            Marker::Dot { position } => dot_outline(position, self.dot_radius, self.dot_sides),
            Marker::Dash { position, rotation } => {
                dash_outline(position, rotation, self.dash_length, self.dash_thickness).to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn signed_area(poly: &[Point]) -> f64 {
        let n = poly.len();
        (0..n)
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    #[test]
    fn dot_is_counter_clockwise_on_its_circle() {
        let center = Point::new(10.0, -5.0);
        let poly = dot_outline(center, 3.0, DEFAULT_DOT_SIDES);
        assert_eq!(poly.len(), 12);
        assert!(signed_area(&poly) > 0.0);
        for p in &poly {
            assert!((p.distance(center) - 3.0).abs() < 1e-9);
        }
        assert_eq!(poly[0], Point::new(13.0, -5.0));
    }

    #[test]
    fn degenerate_side_count_is_raised_to_a_triangle() {
        assert_eq!(dot_outline(Point::default(), 1.0, 1).len(), 3);
    }

    #[test]
    fn dash_follows_rotation() {
        let poly = dash_outline(
            Point::new(0.0, 0.0),
            Rotation::from_angle(FRAC_PI_2),
            10.0,
            2.0,
        );
        assert!((signed_area(&poly) - 20.0).abs() < 1e-9);
        // the long side now runs along y
        let ys: Vec<f64> = poly.iter().map(|p| p.y).collect();
        let span = ys.iter().cloned().fold(f64::MIN, f64::max) - ys.iter().cloned().fold(f64::MAX, f64::min);
        assert!((span - 10.0).abs() < 1e-9);
    }

    #[test]
    fn style_picks_outline_by_marker_kind() {
        let style = MarkerStyle::default();
        let dot = Marker::Dot {
            position: Point::default(),
        };
        let dash = Marker::Dash {
            position: Point::default(),
            rotation: Rotation::IDENTITY,
        };
        assert_eq!(style.outline(&dot).len(), DEFAULT_DOT_SIDES);
        assert_eq!(style.outline(&dash).len(), 4);
    }
}

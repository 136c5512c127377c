use log::debug;

use crate::SinglelineResult;
use crate::config::DotOptions;
use crate::geom::{Point, segments};
use crate::trace::StrokePath;
use crate::transform::PixelTransform;

use super::{Marker, MarkerPlacer, offsets, pixel_step};

/// Evenly spaced dots with glyph-wide minimum separation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotPlacer;

impl MarkerPlacer for DotPlacer {
    type Options = DotOptions;

    fn place(
        &self,
        paths: &[StrokePath],
        transform: &PixelTransform,
        options: &Self::Options,
    ) -> SinglelineResult<Vec<Marker>> {
        options.validate()?;
        let spacing = pixel_step("spacing", options.spacing, transform, paths)?;
        let mut layout = DotLayout::new(spacing, spacing * options.min_separation_ratio);
        for path in paths {
            layout.walk(path.points());
        }

        debug!(
            "placed {} dots over {} paths, rejected {} too close to an earlier dot",
            layout.accepted.len(),
            paths.len(),
            layout.rejected
        );
        Ok(layout
            .accepted
            .into_iter()
            .map(|p| Marker::Dot {
                position: transform.apply(p),
            })
            .collect())
    }
}

/// Accepted dot positions of one glyph, in pixels.
#[derive(Debug)]
struct DotLayout {
    spacing: f64,
    min_distance_sq: f64,
    accepted: Vec<Point>,
    rejected: usize,
}

impl DotLayout {
    fn new(spacing: f64, min_distance: f64) -> Self {
        Self {
            spacing,
            min_distance_sq: min_distance * min_distance,
            accepted: Vec::new(),
            rejected: 0,
        }
    }

    /// Accept `p` unless it is closer than the minimum distance to an earlier dot.
    fn offer(&mut self, p: Point) {
        if self
            .accepted
            .iter()
            .any(|q| q.distance_squared(p) < self.min_distance_sq)
        {
            self.rejected += 1;
        } else {
            self.accepted.push(p);
        }
    }

    /// Dot at the start, then one every `spacing` of arc length. The distance
    /// since the last dot carries across segments; a dot exactly on a segment
    /// end (`<=`) is emitted on that segment.
    fn walk(&mut self, points: &[Point]) {
        let Some(&first) = points.first() else {
            return;
        };
        self.offer(first);

        let mut carried = 0.0;
        for seg in segments(points) {
            let needed = (self.spacing - carried).max(0.0);
            if seg.length < needed {
                carried += seg.length;
                continue;
            }

            let mut last = needed;
            for at in offsets(needed, self.spacing, seg.length) {
                self.offer(seg.at(at));
                last = at;
            }
            carried = seg.length - last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SinglelineError;

    fn line(y: f64, len: usize) -> StrokePath {
        StrokePath::open((0..len).map(|x| Point::new(x as f64, y)).collect())
    }

    fn positions(markers: &[Marker]) -> Vec<Point> {
        markers.iter().map(Marker::position).collect()
    }

    mod place {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn straight_path_every_three_units() {
                let markers = DotPlacer
                    .place(
                        &[line(0.0, 10)],
                        &PixelTransform::identity(),
                        &DotOptions::new(3.0),
                    )
                    .unwrap();
                let xs: Vec<f64> = positions(&markers).iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![0.0, 3.0, 6.0, 9.0]);
                for pair in markers.windows(2) {
                    assert!(pair[0].position().distance(pair[1].position()) >= 1.8);
                }
                assert!(markers.iter().all(|m| matches!(m, Marker::Dot { .. })));
            }

            #[test]
            fn parallel_strokes_are_deduplicated() {
                let paths = [line(0.0, 41), line(1.0, 41)];
                let markers = DotPlacer
                    .place(&paths, &PixelTransform::identity(), &DotOptions::new(10.0))
                    .unwrap();
                let pts = positions(&markers);
                // the first stroke alone yields x = 0, 10, 20, 30, 40
                assert_eq!(pts.len(), 5);
                for (i, a) in pts.iter().enumerate() {
                    for b in &pts[i + 1..] {
                        assert!(a.distance(*b) >= 6.0);
                    }
                }
            }

            #[test]
            fn ratio_zero_disables_dedup() {
                let paths = [line(0.0, 41), line(1.0, 41)];
                let opts = DotOptions::new(10.0).with_min_separation_ratio(0.0);
                let markers = DotPlacer
                    .place(&paths, &PixelTransform::identity(), &opts)
                    .unwrap();
                assert_eq!(markers.len(), 10);
            }

            #[test]
            fn remainder_carries_across_segments() {
                // segments of 2.5 with spacing 4: dots at arc length 0, 4, 8
                let path = StrokePath::open(vec![
                    Point::new(0.0, 0.0),
                    Point::new(2.5, 0.0),
                    Point::new(5.0, 0.0),
                    Point::new(7.5, 0.0),
                    Point::new(10.0, 0.0),
                ]);
                let markers = DotPlacer
                    .place(&[path], &PixelTransform::identity(), &DotOptions::new(4.0))
                    .unwrap();
                let xs: Vec<f64> = positions(&markers).iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![0.0, 4.0, 8.0]);
            }

            #[test]
            fn long_segment_gets_several_dots() {
                let path = StrokePath::open(vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0)]);
                let markers = DotPlacer
                    .place(&[path], &PixelTransform::identity(), &DotOptions::new(2.5))
                    .unwrap();
                let ys: Vec<f64> = positions(&markers).iter().map(|p| p.y).collect();
                assert_eq!(ys, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
            }

            #[test]
            fn duplicate_points_do_not_disturb_spacing() {
                let path = StrokePath::open(vec![
                    Point::new(0.0, 0.0),
                    Point::new(2.0, 0.0),
                    Point::new(2.0, 0.0),
                    Point::new(6.0, 0.0),
                ]);
                let markers = DotPlacer
                    .place(&[path], &PixelTransform::identity(), &DotOptions::new(3.0))
                    .unwrap();
                let xs: Vec<f64> = positions(&markers).iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![0.0, 3.0, 6.0]);
            }

            #[test]
            fn spacing_is_converted_to_pixels() {
                // 10 units per pixel: 30 units = 3 pixels
                let transform = PixelTransform::new(10.0, Point::default()).unwrap();
                let markers = DotPlacer
                    .place(&[line(0.0, 10)], &transform, &DotOptions::new(30.0))
                    .unwrap();
                let xs: Vec<f64> = positions(&markers).iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![0.0, 30.0, 60.0, 90.0]);
            }

            #[test]
            fn single_point_path_gets_one_dot() {
                let path = StrokePath::open(vec![Point::new(4.0, 4.0)]);
                let markers = DotPlacer
                    .place(&[path], &PixelTransform::identity(), &DotOptions::new(3.0))
                    .unwrap();
                assert_eq!(positions(&markers), vec![Point::new(4.0, 4.0)]);
            }

            #[test]
            fn no_paths_no_dots() {
                let markers = DotPlacer
                    .place(&[], &PixelTransform::identity(), &DotOptions::default())
                    .unwrap();
                assert!(markers.is_empty());
            }

            #[test]
            fn spacing_below_pixel_precision_is_an_error() {
                // 1 unit is 1e-300 px, lost next to a 10 px coordinate
                let transform = PixelTransform::new(1e300, Point::default()).unwrap();
                let err = DotPlacer
                    .place(&[line(0.0, 11)], &transform, &DotOptions::new(1.0))
                    .unwrap_err();
                assert!(matches!(
                    err,
                    SinglelineError::InvalidParameter {
                        name: "spacing",
                        ..
                    }
                ));
            }

            #[test]
            fn invalid_spacing_is_an_error() {
                let err = DotPlacer
                    .place(
                        &[line(0.0, 3)],
                        &PixelTransform::identity(),
                        &DotOptions::new(-1.0),
                    )
                    .unwrap_err();
                assert!(matches!(err, SinglelineError::InvalidParameter { .. }));
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            fn path() -> impl Strategy<Value = StrokePath> {
                proptest::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 1..30).prop_map(
                    |raw| StrokePath::open(raw.into_iter().map(|(x, y)| Point::new(x, y)).collect()),
                )
            }

            proptest! {
                /// accepted dots never violate the minimum separation
                #[test]
                fn separation_holds_across_paths(
                    paths in proptest::collection::vec(path(), 1..4),
                    spacing in 1.0f64..20.0,
                    ratio in 0.0f64..1.0
                ) {
                    let opts = DotOptions::new(spacing).with_min_separation_ratio(ratio);
                    let markers = DotPlacer
                        .place(&paths, &PixelTransform::identity(), &opts)
                        .unwrap();
                    let pts = positions(&markers);
                    let min = spacing * ratio;
                    for (i, a) in pts.iter().enumerate() {
                        for b in &pts[i + 1..] {
                            prop_assert!(a.distance(*b) >= min - 1e-9);
                        }
                    }
                    // the first point of the first path is always accepted
                    prop_assert_eq!(pts[0], paths[0].points()[0]);
                }
            }
        }
    }
}

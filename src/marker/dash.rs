use log::debug;

use crate::SinglelineResult;
use crate::config::DashOptions;
use crate::geom::segments;
use crate::trace::StrokePath;
use crate::transform::PixelTransform;

use super::{Marker, MarkerPlacer, Rotation, offsets, pixel_step};

/// Dashes aligned with the local path direction, one every `dash_length + gap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashPlacer;

impl MarkerPlacer for DashPlacer {
    type Options = DashOptions;

    fn place(
        &self,
        paths: &[StrokePath],
        transform: &PixelTransform,
        options: &Self::Options,
    ) -> SinglelineResult<Vec<Marker>> {
        options.validate()?;
        let stride = pixel_step("stride", options.stride(), transform, paths)?;
        let first = transform.to_pixels(options.dash_length) / 2.0;

        let mut markers = Vec::new();
        for path in paths {
            let mut walked = 0.0;
            let mut next = first;
            for seg in segments(path.points()) {
                let angle = seg.dy.atan2(seg.dx);
                let rotation = Rotation::from_angle(if transform.flips_y() {
                    -angle
                } else {
                    angle
                });
                let end = walked + seg.length;
                for at in offsets(next, stride, end) {
                    markers.push(Marker::Dash {
                        position: transform.apply(seg.at(at - walked)),
                        rotation,
                    });
                    next = at + stride;
                }
                walked += seg.length;
            }
        }

        debug!("placed {} dashes over {} paths", markers.len(), paths.len());
        Ok(markers)
    }
}

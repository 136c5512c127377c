use crate::geom::Point;
use crate::marker::Marker;
use crate::shape::MarkerStyle;

/// Options for the SVG preview of a marker set.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub style: MarkerStyle,
    /// Empty border around the markers, in output units.
    pub margin: f64,
    /// Output units have y pointing up (font units); flip for SVG.
    pub y_up: bool,
    pub fill: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            style: MarkerStyle::default(),
            margin: 10.0,
            y_up: true,
            fill: "black".to_string(),
        }
    }
}

/// Render `markers` as an SVG document: dots as circles, dashes as rotated rects.
pub fn markers_to_svg(markers: &[Marker], options: &SvgOptions) -> String {
    let to_svg = |p: Point| if options.y_up { Point::new(p.x, -p.y) } else { p };
    let extent: Vec<Point> = markers
        .iter()
        .flat_map(|m| options.style.outline(m))
        .map(to_svg)
        .collect();

    let (min, max) = bounds(extent.iter()).unwrap_or_default();
    let m = options.margin;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">\n",
        min.x - m,
        min.y - m,
        max.x - min.x + 2.0 * m,
        max.y - min.y + 2.0 * m
    );
    svg.push_str(&format!("<g fill=\"{}\">\n", options.fill));
    for marker in markers {
        let c = to_svg(marker.position());
        let element = match marker {
            Marker::Dot { .. } => format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>\n",
                c.x, c.y, options.style.dot_radius
            ),
            Marker::Dash { rotation, .. } => {
                let (l, t) = (options.style.dash_length, options.style.dash_thickness);
                // flipping y mirrors the rotation
                let degrees = if options.y_up {
                    -rotation.degrees()
                } else {
                    rotation.degrees()
                };
                format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" transform=\"rotate({:.2} {:.2} {:.2})\"/>\n",
                    c.x - l / 2.0,
                    c.y - t / 2.0,
                    l,
                    t,
                    degrees,
                    c.x,
                    c.y
                )
            }
        };
        svg.push_str(&element);
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn bounds<'a>(points: impl Iterator<Item = &'a Point>) -> Option<(Point, Point)> {
    points.fold(None, |acc, &p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )),
    })
}

use crate::geom::Point;

/// Rounds applied by the tracer unless the caller asks otherwise.
pub const DEFAULT_SMOOTHING_ITERATIONS: usize = 3;

/// 1:2:1 Laplacian smoothing with fixed endpoints, repeated `iterations` times.
///
/// Each round reads only the previous round's output. Paths of fewer than
/// three points have no interior and come back unchanged.
pub fn smooth_points(points: &[Point], iterations: usize) -> Vec<Point> {
    let mut current = points.to_vec();
    if current.len() < 3 {
        return current;
    }

    let mut next = current.clone();
    for _ in 0..iterations {
        for i in 1..current.len() - 1 {
            let (a, p, b) = (current[i - 1], current[i], current[i + 1]);
            next[i] = Point::new(
                (a.x + 2.0 * p.x + b.x) / 4.0,
                (a.y + 2.0 * p.y + b.y) / 4.0,
            );
        }
        std::mem::swap(&mut current, &mut next);
    }
    current
}

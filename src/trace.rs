//! Path tracing over a skeleton graph.
//!
//! Every adjacency of the skeleton is walked exactly once. Walks start at
//! endpoints and junctions; a component made only of degree-2 nodes gets its
//! first node as a synthetic start so closed strokes are still traced.

use std::collections::HashSet;

use log::debug;

use crate::config::TraceSettings;
use crate::geom::Point;
use crate::graph::{NodeId, SkeletonGraph};
use crate::smooth::smooth_points;

/// Shape of a traced path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Runs between two singular nodes (or stops at a dead end).
    Open,
    /// Returns to its own start; the first point is repeated at the end.
    Closed,
    /// An isolated skeleton pixel.
    Single,
}

/// An ordered point sequence in pixel coordinates (`x` = column, `y` = row).
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    points: Vec<Point>,
    kind: PathKind,
}

impl StrokePath {
    pub fn new(points: Vec<Point>, kind: PathKind) -> Self {
        Self { points, kind }
    }

    /// An open path through `points`.
    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, PathKind::Open)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind == PathKind::Closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Skeleton edges this path covers, including a loop's closing edge.
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn arc_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Apply `iterations` further smoothing rounds in place.
    pub fn smooth(&mut self, iterations: usize) {
        if iterations > 0 {
            self.points = smooth_points(&self.points, iterations);
        }
    }

    /// A smoothed copy.
    pub fn smoothed(&self, iterations: usize) -> Self {
        let mut out = self.clone();
        out.smooth(iterations);
        out
    }
}

/// Edges consumed so far by one trace; never shared between skeletons.
#[derive(Debug, Default)]
struct VisitedEdges {
    edges: HashSet<(NodeId, NodeId)>,
}

impl VisitedEdges {
    fn key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if a <= b { (a, b) } else { (b, a) }
    }

    fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&Self::key(a, b))
    }

    /// Mark `a-b` visited; `false` if it already was.
    fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        self.edges.insert(Self::key(a, b))
    }
}

/// Trace and smooth with `settings.smoothing_iterations` rounds.
pub fn trace_paths(graph: &SkeletonGraph, settings: &TraceSettings) -> Vec<StrokePath> {
    let mut paths = trace_raw_paths(graph);
    for path in &mut paths {
        path.smooth(settings.smoothing_iterations);
    }
    paths
}

/// Trace without smoothing; points sit on pixel centres.
pub fn trace_raw_paths(graph: &SkeletonGraph) -> Vec<StrokePath> {
    let mut visited = VisitedEdges::default();
    let mut paths = Vec::new();

    for start in start_nodes(graph) {
        let neighbors = graph.neighbors(start);
        if neighbors.is_empty() {
            paths.push(StrokePath::new(vec![point_of(graph, start)], PathKind::Single));
            continue;
        }
        for &first in neighbors {
            if visited.contains(start, first) {
                continue;
            }
            paths.push(walk(graph, start, first, &mut visited));
        }
    }

    debug!(
        "traced {} paths over {} nodes / {} edges",
        paths.len(),
        graph.nodes().len(),
        graph.edge_count()
    );
    paths
}

/// Singular nodes per component, or the component's first node if it has none.
fn start_nodes(graph: &SkeletonGraph) -> Vec<NodeId> {
    let mut starts = Vec::new();
    for component in graph.components() {
        let before = starts.len();
        starts.extend(component.iter().copied().filter(|&id| graph.is_singular(id)));
        if starts.len() == before {
            starts.push(component[0]);
        }
    }
    starts
}

fn walk(
    graph: &SkeletonGraph,
    start: NodeId,
    first: NodeId,
    visited: &mut VisitedEdges,
) -> StrokePath {
    visited.insert(start, first);
    let mut ids = vec![start, first];
    let (mut prev, mut cur) = (start, first);

    while cur != start && !graph.is_singular(cur) {
        let Some(next) = graph.neighbors(cur).iter().copied().find(|&n| n != prev) else {
            break;
        };
        if !visited.insert(cur, next) {
            break;
        }
        ids.push(next);
        prev = cur;
        cur = next;
    }

    let kind = if cur == start {
        PathKind::Closed
    } else {
        PathKind::Open
    };
    let points = ids.into_iter().map(|id| point_of(graph, id)).collect();
    StrokePath::new(points, kind)
}

fn point_of(graph: &SkeletonGraph, id: NodeId) -> Point {
    let node = graph.node(id);
    Point::from_cell(node.row, node.col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BinaryGrid, grid_from_rows};

    fn raw(rows: &[&str]) -> Vec<StrokePath> {
        trace_raw_paths(&SkeletonGraph::build(&grid_from_rows(rows)))
    }

    fn cells(path: &StrokePath) -> Vec<(usize, usize)> {
        path.points()
            .iter()
            .map(|p| (p.y as usize, p.x as usize))
            .collect()
    }

    mod trace_raw_paths {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn empty_skeleton_yields_nothing() {
                assert!(raw(&["...", "..."]).is_empty());
            }

            #[test]
            fn isolated_pixel_is_single_point_path() {
                let paths = raw(&["...", ".#.", "..."]);
                assert_eq!(paths.len(), 1);
                assert_eq!(paths[0].kind(), PathKind::Single);
                assert_eq!(paths[0].points(), &[Point::new(1.0, 1.0)]);
                assert_eq!(paths[0].edge_count(), 0);
            }

            #[test]
            fn straight_line_is_one_open_path() {
                let paths = raw(&["#####"]);
                assert_eq!(paths.len(), 1);
                assert_eq!(paths[0].kind(), PathKind::Open);
                assert_eq!(cells(&paths[0]), vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
            }

            #[test]
            fn pure_ring_gets_synthetic_start() {
                let paths = raw(&[
                    "..#..", //
                    ".#.#.", //
                    "#...#", //
                    ".#.#.", //
                    "..#..", //
                ]);
                assert_eq!(paths.len(), 1);
                let ring = &paths[0];
                assert!(ring.is_closed());
                assert_eq!(ring.len(), 9);
                assert_eq!(ring.points().first(), ring.points().last());
                let visited: HashSet<_> = cells(ring).into_iter().collect();
                assert_eq!(visited.len(), 8);
                // starts at the first ring pixel and leaves through its SE neighbour before SW
                assert_eq!(cells(ring)[..2], [(0, 2), (1, 3)]);
            }

            #[test]
            fn junction_splits_strokes() {
                let paths = raw(&[
                    "#...#", //
                    ".#.#.", //
                    "..#..", //
                    "..#..", //
                ]);
                let traced: Vec<_> = paths.iter().map(cells).collect();
                assert_eq!(
                    traced,
                    vec![
                        vec![(0, 0), (1, 1), (2, 2)],
                        vec![(0, 4), (1, 3), (2, 2)],
                        vec![(2, 2), (3, 2)],
                    ]
                );
            }

            #[test]
            fn loop_through_junction_closes_on_it() {
                // a ring with a tail: the ring returns to the junction it started from
                let paths = raw(&[
                    ".#.", //
                    "#.#", //
                    ".#.", //
                    ".#.", //
                    ".#.", //
                ]);
                let total: usize = paths.iter().map(StrokePath::edge_count).sum();
                let grid = grid_from_rows(&[".#.", "#.#", ".#.", ".#.", ".#."]);
                assert_eq!(total, grid.adjacent_pairs());
                assert!(paths.iter().any(|p| p.is_closed()));
            }

            #[test]
            fn every_component_is_traced() {
                let paths = raw(&["##...#", "......", "..#..."]);
                assert_eq!(paths.len(), 3);
                assert_eq!(
                    paths.iter().filter(|p| p.kind() == PathKind::Single).count(),
                    2
                );
            }

            #[test]
            fn deterministic() {
                let rows = [
                    "#.#.#", //
                    ".###.", //
                    "##.##", //
                    ".###.", //
                    "#.#.#", //
                ];
                assert_eq!(raw(&rows), raw(&rows));
            }
        }

        mod prop {
            use super::*;
            use crate::thin::skeletonize;
            use proptest::prelude::*;

            fn random_grid() -> impl Strategy<Value = BinaryGrid> {
                (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
                    proptest::collection::vec(proptest::bool::weighted(0.45), w * h).prop_map(
                        move |cells| BinaryGrid::from_fn(w, h, |r, c| cells[r * w + c]),
                    )
                })
            }

            fn check_coverage(grid: &BinaryGrid) -> Result<(), TestCaseError> {
                let paths = trace_raw_paths(&SkeletonGraph::build(grid));
                let mut seen = HashSet::new();
                let mut total = 0;
                for path in &paths {
                    for pair in path.points().windows(2) {
                        let a = (pair[0].y as usize, pair[0].x as usize);
                        let b = (pair[1].y as usize, pair[1].x as usize);
                        prop_assert!(a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1 && a != b);
                        let key = if a <= b { (a, b) } else { (b, a) };
                        prop_assert!(seen.insert(key), "edge {:?} traced twice", key);
                        total += 1;
                    }
                }
                prop_assert_eq!(total, grid.adjacent_pairs());
                Ok(())
            }

            proptest! {
                /// every adjacency of an arbitrary pixel set is traced exactly once
                #[test]
                fn covers_every_edge_once(grid in random_grid()) {
                    check_coverage(&grid)?;
                }

                /// same on thinned input
                #[test]
                fn covers_skeleton_edges_once(grid in random_grid()) {
                    check_coverage(skeletonize(&grid).grid())?;
                }

                /// smoothing never changes how many points a path has
                #[test]
                fn smoothing_keeps_point_counts(grid in random_grid()) {
                    let graph = SkeletonGraph::build(&grid);
                    let raw = trace_raw_paths(&graph);
                    let smoothed = trace_paths(&graph, &TraceSettings::default());
                    prop_assert_eq!(raw.len(), smoothed.len());
                    for (a, b) in raw.iter().zip(&smoothed) {
                        prop_assert_eq!(a.len(), b.len());
                        prop_assert_eq!(a.kind(), b.kind());
                    }
                }
            }
        }
    }

    mod smoothing {
        use super::*;

        #[test]
        fn zero_iterations_returns_raw_paths() {
            let graph = SkeletonGraph::build(&grid_from_rows(&["#...", ".#..", ".##."]));
            let settings = TraceSettings::default().with_smoothing_iterations(0);
            assert_eq!(trace_paths(&graph, &settings), trace_raw_paths(&graph));
        }

        #[test]
        fn default_smoothing_rounds_staircase() {
            let graph = SkeletonGraph::build(&grid_from_rows(&["#..", ".#.", ".#.", "..#"]));
            let raw = trace_raw_paths(&graph);
            let smoothed = trace_paths(&graph, &TraceSettings::default());
            assert_ne!(raw, smoothed);
            assert_eq!(raw[0].points().first(), smoothed[0].points().first());
            assert_eq!(raw[0].points().last(), smoothed[0].points().last());
        }

        #[test]
        fn extra_rounds_stack_on_default() {
            let graph = SkeletonGraph::build(&grid_from_rows(&["#....", ".#...", "..###"]));
            let raw = trace_raw_paths(&graph);
            let default = trace_paths(&graph, &TraceSettings::default());
            let five = trace_paths(&graph, &TraceSettings::default().with_smoothing_iterations(5));
            assert_eq!(default[0].smoothed(2), five[0]);
            assert_eq!(raw[0].smoothed(5), five[0]);
        }
    }
}

use std::collections::VecDeque;

use crate::grid::BinaryGrid;

pub type NodeId = usize;

/// Node classification by 8-connected degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Degree 1.
    Endpoint,
    /// Degree 0 or at least 3.
    Junction,
    /// Degree 2.
    Interior,
}

impl NodeKind {
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            1 => NodeKind::Endpoint,
            2 => NodeKind::Interior,
            _ => NodeKind::Junction,
        }
    }

    /// Endpoints and junctions are where traced paths start and stop.
    pub fn is_singular(self) -> bool {
        !matches!(self, NodeKind::Interior)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub row: usize,
    pub col: usize,
    pub degree: usize,
    pub kind: NodeKind,
}

/// Node/adjacency view of a skeleton.
///
/// Nodes are numbered in row-major order and every adjacency list follows the
/// clockwise-from-north ring, so traversals over the graph are deterministic.
#[derive(Debug, Clone, Default)]
pub struct SkeletonGraph {
    width: usize,
    height: usize,
    nodes: Vec<Node>,
    node_at: Vec<Option<NodeId>>,
    adjacency: Vec<Vec<NodeId>>,
}

impl SkeletonGraph {
    pub fn build(skeleton: &BinaryGrid) -> Self {
        let (width, height) = (skeleton.width(), skeleton.height());
        let mut node_at = vec![None; width * height];
        let mut cells = Vec::new();
        for (r, c) in skeleton.foreground() {
            node_at[r * width + c] = Some(cells.len());
            cells.push((r, c));
        }

        let adjacency: Vec<Vec<NodeId>> = cells
            .iter()
            .map(|&(r, c)| {
                skeleton
                    .neighbors(r, c)
                    .filter_map(|(nr, nc)| node_at[nr * width + nc])
                    .collect()
            })
            .collect();

        let nodes = cells
            .iter()
            .zip(&adjacency)
            .enumerate()
            .map(|(id, (&(row, col), adj))| Node {
                id,
                row,
                col,
                degree: adj.len(),
                kind: NodeKind::from_degree(adj.len()),
            })
            .collect();

        Self {
            width,
            height,
            nodes,
            node_at,
            adjacency,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.node_at[row * self.width + col]
    }

    /// Neighbours of `id` in ring order.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id]
    }

    pub fn is_singular(&self, id: NodeId) -> bool {
        self.nodes[id].kind.is_singular()
    }

    /// Number of unordered adjacent node pairs.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn num_endpoints(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Endpoint)
            .count()
    }

    pub fn num_junctions(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Junction)
            .count()
    }

    pub fn iter_singular(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind.is_singular())
    }

    /// 8-connected components, each sorted by node id, ordered by their first node.
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut label = vec![false; self.nodes.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for seed in 0..self.nodes.len() {
            if label[seed] {
                continue;
            }
            label[seed] = true;
            queue.push_back(seed);

            let mut members = Vec::new();
            while let Some(id) = queue.pop_front() {
                members.push(id);
                for &next in &self.adjacency[id] {
                    if !label[next] {
                        label[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }

        components
    }
}

//! # Exact-pair octree (3D)
//!
//! This module partitions the body registry into an octree so that pairwise
//! work is organised by region, while still visiting **every** unordered pair
//! exactly once. It is not an approximation: the pair set produced by
//! [`Octree::for_each_pair`] is identical to the brute-force `i < j` scan.
//!
//! ## Build
//!
//! - The root is a cube of half extent `root_range`, centred at the origin or
//!   at a focus position.
//! - A node subdivides into 8 children when it holds more than
//!   `max_body_count` bodies, is shallower than `max_depth` and has no
//!   children yet.
//! - Each body goes to the first child (in creation order) whose cube fully
//!   contains its sphere. Bodies that fit no child stay in the node as
//!   *straddlers*.
//! - Children that received at least one body are built recursively.
//!
//! Children are created starting from the `(+,+,+)` octant (see
//! `OCTANT_SIGNS`). A zero-radius body lying exactly on a splitting plane fits
//! more than one child and goes to whichever comes first in that order.
//!
//! ## Traversal
//!
//! For each node, in depth-first order:
//!
//! 1. every pair inside the node's own body list,
//! 2. every straddler of every ancestor against every body of the node,
//! 3. for each pair of children `i < j`, every body of subtree `i` against
//!    every body of subtree `j`,
//!
//! then recurse into the non-empty children with this node's bodies added to
//! the ancestor list. Since every body lives in exactly one node, each pair
//! falls into exactly one of those three cases: same node, ancestor and
//! descendant, or split below their lowest common ancestor.
//!
//! Node aggregates for a Barnes–Hut style approximation would slot in here
//! but are not computed.

use log::{debug, trace};

use super::error::SimError;
use super::states::{Body, NVec3};

/// Index of a node inside [`Octree::nodes`]
pub type NodeId = usize;

/// Offset direction of each child from its parent's centre, in creation order
const OCTANT_SIGNS: [[f64; 3]; 8] = [
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
];

/// Tuning knobs for building the tree
#[derive(Debug, Clone, PartialEq)]
pub struct OctreeConfig {
    pub max_depth: usize, // deepest level a node may be created at
    pub max_body_count: usize, // bodies a node may hold before it splits
    pub root_range: f64, // half extent of the root cube
    pub rebuild_interval: u32, // rebuild every N physics updates
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_body_count: 4,
            root_range: 100.0,
            rebuild_interval: 1,
        }
    }
}

impl OctreeConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_body_count < 1 {
            return Err(SimError::InvalidMaxBodyCount(self.max_body_count));
        }
        if self.rebuild_interval < 1 {
            return Err(SimError::InvalidRebuildInterval(self.rebuild_interval));
        }
        if !(self.root_range.is_finite() && self.root_range > 0.0) {
            return Err(SimError::InvalidParameter { name: "root_range", value: self.root_range });
        }
        Ok(())
    }
}

/// One cubic cell of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct OctreeNode {
    pub center: NVec3,
    pub half_extent: f64,
    pub depth: usize,
    pub children: Option<[NodeId; 8]>, // None while a leaf
    pub bodies: Vec<usize>, // registry indices owned by this node
}

impl OctreeNode {
    fn new(center: NVec3, half_extent: f64, depth: usize) -> Self {
        Self {
            center,
            half_extent,
            depth,
            children: None,
            bodies: Vec::new(),
        }
    }

    /// Whether the whole sphere of `body` lies inside this cube
    ///
    /// |p - c| + radius <= half_extent on every axis
    pub fn contains(&self, body: &Body) -> bool {
        (0..3).all(|axis| (body.x[axis] - self.center[axis]).abs() + body.radius <= self.half_extent)
    }
}

/// Read-only snapshot of a node for debug drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub center: NVec3,
    pub half_extent: f64,
    pub depth: usize,
}

/// Arena-backed octree over the body registry
///
/// Nodes refer to bodies by registry index only, so the tree can be thrown
/// away and rebuilt without touching body state.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    root: NodeId,
    max_depth: usize,
    max_body_count: usize,
}

impl Octree {
    /// Build a tree over `bodies`, with the root cube centred at `center`
    pub fn build(bodies: &[Body], config: &OctreeConfig, center: NVec3) -> Self {
        let mut root = OctreeNode::new(center, config.root_range, 0);
        root.bodies = (0..bodies.len()).collect();

        let mut tree = Octree {
            nodes: vec![root],
            root: 0,
            max_depth: config.max_depth,
            max_body_count: config.max_body_count,
        };
        tree.build_node(tree.root, bodies);

        debug!(
            "octree rebuilt: {} bodies, {} nodes, depth {}",
            bodies.len(),
            tree.nodes.len(),
            tree.depth()
        );
        tree
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn root(&self) -> &OctreeNode {
        &self.nodes[self.root]
    }

    /// Deepest level reached by any node
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Number of bodies the tree was built over
    pub fn body_count(&self) -> usize {
        self.nodes.iter().map(|n| n.bodies.len()).sum()
    }

    /// Every node's cube, parents before children
    pub fn boxes(&self) -> impl Iterator<Item = NodeBox> + '_ {
        self.nodes.iter().map(|n| NodeBox {
            center: n.center,
            half_extent: n.half_extent,
            depth: n.depth,
        })
    }

    /// Visit every unordered body pair exactly once, lower index first
    pub fn for_each_pair<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize),
    {
        let mut ancestors = Vec::new();
        self.visit_node(self.root, &mut ancestors, &mut |a, b| {
            if a < b { visit(a, b) } else { visit(b, a) }
        });
    }

    // helpers ==============================================================================

    /// Split `node_idx` if it is over capacity, bucket its bodies and recurse
    fn build_node(&mut self, node_idx: NodeId, bodies: &[Body]) {
        let node = &self.nodes[node_idx];
        if node.bodies.len() <= self.max_body_count || node.depth >= self.max_depth || node.children.is_some() {
            trace!(
                "leaf at depth {} holds {} bodies (max count {}, max depth {})",
                node.depth,
                node.bodies.len(),
                self.max_body_count,
                self.max_depth
            );
            return;
        }

        let children = self.subdivide(node_idx);

        // First fitting child wins; everything else straddles
        let mut buckets: [Vec<usize>; 8] = Default::default();
        let mut straddlers = Vec::new();
        for bi in std::mem::take(&mut self.nodes[node_idx].bodies) {
            let body = &bodies[bi];
            match children.iter().position(|&c| self.nodes[c].contains(body)) {
                Some(k) => buckets[k].push(bi),
                None => straddlers.push(bi),
            }
        }
        self.nodes[node_idx].bodies = straddlers;

        for (&child, bucket) in children.iter().zip(buckets) {
            if bucket.is_empty() {
                continue;
            }
            self.nodes[child].bodies = bucket;
            self.build_node(child, bodies);
        }
    }

    /// Create the 8 children of `node_idx` and return their ids, in
    /// [`OCTANT_SIGNS`] order
    fn subdivide(&mut self, node_idx: NodeId) -> [NodeId; 8] {
        let parent = &self.nodes[node_idx];
        let half = 0.5 * parent.half_extent;
        let center = parent.center;
        let depth = parent.depth + 1;

        let mut ids = [0; 8];
        for (id, [sx, sy, sz]) in ids.iter_mut().zip(OCTANT_SIGNS) {
            let offset = half * NVec3::new(sx, sy, sz);
            *id = self.nodes.len();
            self.nodes.push(OctreeNode::new(center + offset, half, depth));
        }
        self.nodes[node_idx].children = Some(ids);

        trace!("subdivided node {} at depth {}", node_idx, depth - 1);
        ids
    }

    fn visit_node<F>(&self, node_idx: NodeId, ancestors: &mut Vec<usize>, visit: &mut F)
    where
        F: FnMut(usize, usize),
    {
        let node = &self.nodes[node_idx];

        // (1) pairs within this node
        for (k, &a) in node.bodies.iter().enumerate() {
            for &b in &node.bodies[k + 1..] {
                visit(a, b);
            }
        }

        // (2) ancestor straddlers against this node
        for &a in ancestors.iter() {
            for &b in &node.bodies {
                visit(a, b);
            }
        }

        let Some(children) = node.children else {
            return;
        };

        // (3) bodies split across two different children
        let subtrees: Vec<Vec<usize>> = children.iter().map(|&c| self.subtree_bodies(c)).collect();
        for i in 0..subtrees.len() {
            for j in (i + 1)..subtrees.len() {
                for &a in &subtrees[i] {
                    for &b in &subtrees[j] {
                        visit(a, b);
                    }
                }
            }
        }

        let mark = ancestors.len();
        ancestors.extend_from_slice(&node.bodies);
        for (&child, subtree) in children.iter().zip(&subtrees) {
            if !subtree.is_empty() {
                self.visit_node(child, ancestors, visit);
            }
        }
        ancestors.truncate(mark);
    }

    /// All bodies stored at or below `node_idx`
    fn subtree_bodies(&self, node_idx: NodeId) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![node_idx];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            out.extend_from_slice(&node.bodies);
            if let Some(children) = node.children {
                stack.extend_from_slice(&children);
            }
        }
        out
    }
}

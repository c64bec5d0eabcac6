//! Bottom-up terrain quadtree builder
//!
//! The asset pipeline hands over a flat, row-major N x N grid of leaf
//! tiles (N a power of two). The builder folds the grid level by level:
//! every pass groups each 2x2 block into one internal node and halves the
//! row width, until a single root remains. Internal nodes aggregate their
//! children's screen-space rectangles for later LOD/visibility queries.
//!
//! Nodes live in one pre-sized arena indexed by [`NodeId`]; no node is
//! moved or reallocated after its level is built.

use thiserror::Error;

use crate::foundation::math::{Vec2, Vec3};

/// Number of level-of-detail tiers each leaf carries index ranges for.
pub const LOD_TIERS: usize = 4;

/// Invalid structural input to the quadtree builder.
///
/// A malformed grid is a fatal precondition violation: the builder rejects
/// it before attempting any fold rather than producing a partially-built,
/// unbalanced tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainError {
    /// The leaf list is not a power-of-two square grid
    #[error("terrain leaf grid must be a power-of-two square, got {0} leaves")]
    InvalidGrid(usize),
}

/// One triangle of a leaf tile's local geometry.
#[derive(Debug, Clone, Copy)]
pub struct TerrainTriangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

/// Index-buffer window for one LOD tier of one leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LodRange {
    /// First index into the shared terrain index buffer
    pub first_index: u32,
    /// Number of primitives to draw at this tier
    pub primitive_count: u32,
}

/// Screen-space rectangle, upper-left to lower-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Upper-left corner
    pub upper_left: Vec2,
    /// Lower-right corner
    pub lower_right: Vec2,
}

impl ScreenRect {
    /// Rectangle covering both inputs: componentwise min of upper-lefts,
    /// max of lower-rights.
    pub fn union(&self, other: &ScreenRect) -> ScreenRect {
        ScreenRect {
            upper_left: self.upper_left.inf(&other.upper_left),
            lower_right: self.lower_right.sup(&other.lower_right),
        }
    }
}

/// A leaf tile: its own triangle set, per-tier index windows, and bounds.
#[derive(Debug, Clone)]
pub struct TerrainLeaf {
    /// Local triangle geometry of this tile
    pub triangles: Vec<TerrainTriangle>,
    /// Index-buffer window per LOD tier
    pub lod_ranges: [LodRange; LOD_TIERS],
    /// Screen-space bounds of this tile
    pub bounds: ScreenRect,
}

/// Arena index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of one arena node.
#[derive(Debug, Clone)]
pub enum TerrainNodeKind {
    /// A grid tile
    Leaf(TerrainLeaf),
    /// An internal node with exactly four children, in the order
    /// `[start, start+1, start+row, start+row+1]` of the folded level
    Branch([NodeId; 4]),
}

/// One node of the built tree.
#[derive(Debug, Clone)]
pub struct TerrainNode {
    /// Aggregated screen-space bounds of this subtree
    pub bounds: ScreenRect,
    /// Leaf payload or child links
    pub kind: TerrainNodeKind,
}

/// Immutable quadtree over the terrain tile grid.
#[derive(Debug, Clone)]
pub struct TerrainQuadtree {
    nodes: Vec<TerrainNode>,
    root: NodeId,
    leaf_count: usize,
}

impl TerrainQuadtree {
    /// Fold a row-major grid of leaves into a balanced quadtree.
    ///
    /// The leaf count must be `4^k` for some `k >= 0` (an N x N grid with
    /// N a power of two); anything else is rejected before any fold runs.
    pub fn build(leaves: Vec<TerrainLeaf>) -> Result<Self, TerrainError> {
        let side = grid_side(leaves.len()).ok_or(TerrainError::InvalidGrid(leaves.len()))?;
        let leaf_count = leaves.len();

        // Total node count over all levels is known up front:
        // leaves + leaves/4 + ... + 1.
        let mut capacity = 0;
        let mut level_size = leaf_count;
        loop {
            capacity += level_size;
            if level_size == 1 {
                break;
            }
            level_size /= 4;
        }

        let mut nodes = Vec::with_capacity(capacity);
        let mut level: Vec<NodeId> = Vec::with_capacity(leaf_count);
        for leaf in leaves {
            level.push(push_node(
                &mut nodes,
                TerrainNode {
                    bounds: leaf.bounds,
                    kind: TerrainNodeKind::Leaf(leaf),
                },
            ));
        }

        let mut row = side;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len() / 4);

            for block_y in 0..row / 2 {
                for block_x in 0..row / 2 {
                    let start = (block_y * 2) * row + block_x * 2;
                    let children = [
                        level[start],
                        level[start + 1],
                        level[start + row],
                        level[start + row + 1],
                    ];

                    let bounds = children
                        .iter()
                        .skip(1)
                        .fold(nodes[children[0].index()].bounds, |acc, id| {
                            acc.union(&nodes[id.index()].bounds)
                        });

                    next.push(push_node(
                        &mut nodes,
                        TerrainNode {
                            bounds,
                            kind: TerrainNodeKind::Branch(children),
                        },
                    ));
                }
            }

            level = next;
            row /= 2;
        }

        let root = level[0];
        Ok(Self {
            nodes,
            root,
            leaf_count,
        })
    }

    /// The single root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &TerrainNode {
        &self.nodes[id.index()]
    }

    /// Children of `id`, or `None` for a leaf.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        match self.node(id).kind {
            TerrainNodeKind::Leaf(_) => None,
            TerrainNodeKind::Branch(children) => Some(children),
        }
    }

    /// Number of leaf tiles the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Total node count across all levels.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of fold passes from the leaf level to the root.
    pub fn depth(&self) -> u32 {
        let mut depth = 0;
        let mut id = self.root;
        while let Some(children) = self.children(id) {
            depth += 1;
            id = children[0];
        }
        depth
    }
}

fn push_node(nodes: &mut Vec<TerrainNode>, node: TerrainNode) -> NodeId {
    let id = NodeId(u32::try_from(nodes.len()).expect("terrain arena exceeds u32 indices"));
    nodes.push(node);
    id
}

/// Side length of the grid if `count` is a power-of-two square, else None.
fn grid_side(count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let side = (count as f64).sqrt().round() as usize;
    (side * side == count && side.is_power_of_two()).then_some(side)
}

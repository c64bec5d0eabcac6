//! Static terrain partitioning
//!
//! Builds a balanced quadtree over a row-major grid of terrain tiles so the
//! renderer can select level-of-detail index ranges per visible region.
//! The tree is built once from pre-deserialized leaf data and is immutable
//! afterwards; this module performs no I/O.

pub mod quadtree;

pub use quadtree::{
    LodRange, NodeId, ScreenRect, TerrainError, TerrainLeaf, TerrainNode, TerrainNodeKind,
    TerrainQuadtree, TerrainTriangle, LOD_TIERS,
};

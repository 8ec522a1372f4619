//! Shared types and utilities for procedural house meshes
//!
//! This crate provides the pieces shared between:
//! - `house-gen` (geometry generators)
//! - `house-export` (manifest driven export tool)
//!
//! # Modules
//!
//! - [`packing`] - Interleaved vertex layout (44 byte stride, u16 indices)
//! - [`buffer`] - Shared vertex/index buffer and the cursor passed between generators
//! - [`model`] - Attribute/index descriptors for the renderer
//! - [`error`] - Geometry error type

pub mod buffer;
pub mod error;
pub mod model;
pub mod packing;

pub use buffer::{BufferCursor, SharedBuffer};
pub use error::GeometryError;
pub use model::{AttributeSpec, AttributeType, DataType, HOUSE_ATTRIBUTES, IndexSpec, ModelSpec};
pub use packing::{
    INDEX_SIZE, MAX_INDEX_VALUE, NORMAL_COMPONENTS, NORMAL_OFFSET, POSITION_COMPONENTS,
    POSITION_OFFSET, PackedVertex, TANGENT_COMPONENTS, TANGENT_OFFSET, TEXCOORD_COMPONENTS,
    TEXCOORD_OFFSET, VERTEX_STRIDE, pack_vertex, unpack_vertex,
};

//! Model descriptors handed to the renderer
//!
//! A `ModelSpec` says where one mesh component lives in the shared buffer and
//! how its vertices are laid out. Indices are already biased to global vertex
//! numbers, so attribute offsets are relative to the start of the vertex
//! region rather than to the component's first vertex.

use serde::Serialize;

use crate::buffer::BufferCursor;
use crate::packing::{
    INDEX_SIZE, NORMAL_COMPONENTS, NORMAL_OFFSET, POSITION_COMPONENTS, POSITION_OFFSET,
    TANGENT_COMPONENTS, TANGENT_OFFSET, TEXCOORD_COMPONENTS, TEXCOORD_OFFSET, VERTEX_STRIDE,
};

/// Vertex attribute semantic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    Position,
    Normal,
    Texcoord,
    Tangent,
}

/// Component data type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// 32-bit float
    Float,
    /// 16-bit unsigned integer
    UnsignedShort,
}

impl DataType {
    /// Size of one component in bytes
    pub const fn size(self) -> u32 {
        match self {
            DataType::Float => 4,
            DataType::UnsignedShort => 2,
        }
    }
}

/// One vertex attribute declaration
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AttributeSpec {
    pub attribute: AttributeType,
    pub components: u32,
    pub data_type: DataType,
    /// Byte offset of the attribute within a vertex
    pub offset: u32,
    pub stride: u32,
}

/// Index range declaration
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IndexSpec {
    pub data_type: DataType,
    /// Byte offset of the first index in the index region
    pub byte_offset: usize,
    /// Number of indices
    pub count: u32,
}

/// Attribute layout shared by every house mesh component
pub const HOUSE_ATTRIBUTES: [AttributeSpec; 4] = [
    AttributeSpec {
        attribute: AttributeType::Position,
        components: POSITION_COMPONENTS,
        data_type: DataType::Float,
        offset: POSITION_OFFSET,
        stride: VERTEX_STRIDE,
    },
    AttributeSpec {
        attribute: AttributeType::Normal,
        components: NORMAL_COMPONENTS,
        data_type: DataType::Float,
        offset: NORMAL_OFFSET,
        stride: VERTEX_STRIDE,
    },
    AttributeSpec {
        attribute: AttributeType::Texcoord,
        components: TEXCOORD_COMPONENTS,
        data_type: DataType::Float,
        offset: TEXCOORD_OFFSET,
        stride: VERTEX_STRIDE,
    },
    AttributeSpec {
        attribute: AttributeType::Tangent,
        components: TANGENT_COMPONENTS,
        data_type: DataType::Float,
        offset: TANGENT_OFFSET,
        stride: VERTEX_STRIDE,
    },
];

/// Descriptor for one mesh component inside a shared buffer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelSpec {
    pub name: String,
    pub attributes: [AttributeSpec; 4],
    pub index: IndexSpec,
    /// Byte offset of the component's first vertex
    pub vertex_offset: usize,
    pub vertex_count: u32,
    /// Global number of the component's first vertex
    pub base_vertex: u32,
}

impl ModelSpec {
    /// Describe everything written between two cursors
    pub fn between(name: impl Into<String>, start: BufferCursor, end: BufferCursor) -> Self {
        Self {
            name: name.into(),
            attributes: HOUSE_ATTRIBUTES,
            index: IndexSpec {
                data_type: DataType::UnsignedShort,
                byte_offset: start.index_offset,
                count: ((end.index_offset - start.index_offset) / INDEX_SIZE as usize) as u32,
            },
            vertex_offset: start.vertex_offset,
            vertex_count: end.vertex_count - start.vertex_count,
            base_vertex: start.vertex_count,
        }
    }

    /// Size of the component's vertex data in bytes
    pub fn vertex_byte_len(&self) -> usize {
        self.vertex_count as usize * VERTEX_STRIDE as usize
    }

    /// Size of the component's index data in bytes
    pub fn index_byte_len(&self) -> usize {
        self.index.count as usize * self.index.data_type.size() as usize
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> u32 {
        self.index.count / 3
    }

    /// Look up one attribute declaration
    pub fn attribute(&self, attribute: AttributeType) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.attribute == attribute)
    }
}

//! Output file formats
//!
//! `.hgeo` layout (all header fields little-endian):
//!
//! | Bytes | Content |
//! |---|---|
//! | 24 | [`HouseMeshHeader`] |
//! | 16 × mesh_count | [`MeshRange`] per mesh |
//! | stride × vertex_count | Interleaved vertices |
//! | 2 × index_count | u16 indices, already biased to global vertex numbers |

use anyhow::{Result, bail};
use house_common::{INDEX_SIZE, ModelSpec, SharedBuffer, VERTEX_STRIDE};
use house_gen::{Decal, Segment};
use serde::Serialize;
use std::io::Write;

pub const HGEO_MAGIC: [u8; 4] = *b"HGEO";
pub const HGEO_VERSION: u16 = 1;

/// Fixed header at the start of a `.hgeo` file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HouseMeshHeader {
    pub version: u16,
    pub stride: u16,
    pub vertex_count: u32,
    pub index_count: u32,
    pub mesh_count: u32,
}

impl HouseMeshHeader {
    pub const SIZE: usize = 24;

    pub fn new(vertex_count: u32, index_count: u32, mesh_count: u32) -> Self {
        Self {
            version: HGEO_VERSION,
            stride: VERTEX_STRIDE as u16,
            vertex_count,
            index_count,
            mesh_count,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&HGEO_MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.stride.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.mesh_count.to_le_bytes());
        // reserved bytes stay 0
        bytes
    }

    /// Read header from bytes, `None` on short input or a wrong magic
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || bytes[0..4] != HGEO_MAGIC {
            return None;
        }
        Some(Self {
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            stride: u16::from_le_bytes([bytes[6], bytes[7]]),
            vertex_count: read_u32(bytes, 8),
            index_count: read_u32(bytes, 12),
            mesh_count: read_u32(bytes, 16),
        })
    }
}

/// Vertex and index range of one mesh inside a `.hgeo` file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshRange {
    pub base_vertex: u32,
    pub vertex_count: u32,
    pub first_index: u32,
    pub index_count: u32,
}

impl MeshRange {
    pub const SIZE: usize = 16;

    pub fn of(spec: &ModelSpec) -> Self {
        Self {
            base_vertex: spec.base_vertex,
            vertex_count: spec.vertex_count,
            first_index: (spec.index.byte_offset / INDEX_SIZE as usize) as u32,
            index_count: spec.index.count,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.base_vertex.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.first_index.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.index_count.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            base_vertex: read_u32(bytes, 0),
            vertex_count: read_u32(bytes, 4),
            first_index: read_u32(bytes, 8),
            index_count: read_u32(bytes, 12),
        })
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Write a complete `.hgeo` file for the whole buffer
pub fn write_house_mesh<W: Write>(
    w: &mut W,
    buffer: &SharedBuffer,
    meshes: &[&ModelSpec],
) -> Result<()> {
    let vertices = buffer.vertex_bytes();
    let indices = buffer.index_bytes();
    if vertices.len() % VERTEX_STRIDE as usize != 0 {
        bail!("Vertex region is not a whole number of vertices");
    }

    let vertex_count = (vertices.len() / VERTEX_STRIDE as usize) as u32;
    let index_count = (indices.len() / INDEX_SIZE as usize) as u32;
    let header = HouseMeshHeader::new(vertex_count, index_count, meshes.len() as u32);

    w.write_all(&header.to_bytes())?;
    for spec in meshes {
        w.write_all(&MeshRange::of(spec).to_bytes())?;
    }
    w.write_all(vertices)?;
    for chunk in indices.chunks_exact(INDEX_SIZE as usize) {
        let index = u16::from_ne_bytes([chunk[0], chunk[1]]);
        w.write_all(&index.to_le_bytes())?;
    }

    Ok(())
}

/// JSON side file describing the buffer contents
#[derive(Debug, Serialize)]
pub struct HouseDescriptor<'a> {
    pub name: &'a str,
    pub vertex_stride: u32,
    pub vertex_count: u32,
    pub index_count: u32,
    pub meshes: Vec<&'a ModelSpec>,
    pub decals: Vec<DecalRecord>,
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Serialize)]
pub struct DecalRecord {
    pub kind: &'static str,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub size: [f32; 2],
}

impl From<&Decal> for DecalRecord {
    fn from(decal: &Decal) -> Self {
        Self {
            kind: decal.kind.as_str(),
            position: decal.position.to_array(),
            normal: decal.normal.to_array(),
            size: decal.size.to_array(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentRecord {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub flat: bool,
    pub start_join: bool,
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        Self {
            start: segment.start.to_array(),
            end: segment.end.to_array(),
            flat: segment.flat,
            start_join: segment.start_join,
        }
    }
}

/// Write the JSON descriptor
pub fn write_descriptor<W: Write>(w: &mut W, descriptor: &HouseDescriptor) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, descriptor)?;
    writeln!(w)?;
    Ok(())
}

//! house-export library
//!
//! Builds procedural houses described by a TOML manifest and writes them as
//! `.hgeo` binary meshes with JSON descriptors and optional OBJ previews.

pub mod build;
pub mod formats;
pub mod manifest;

pub use build::{BuildReport, BuiltHouse, build_all, generate};
pub use formats::{HGEO_MAGIC, HGEO_VERSION, HouseMeshHeader, MeshRange};
pub use manifest::{Manifest, load_manifest, validate};

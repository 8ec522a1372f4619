//! Procedural house shell generation
//!
//! Turns a footprint (a chain of [`Segment`]s) into GPU-ready meshes packed
//! into one [`SharedBuffer`]:
//!
//! - [`body`] - Wall boxes around each segment
//! - [`roof`] - Two-layer pitched roofs (per segment or from a closed outline)
//! - [`fascia`] - Trim strips under the eaves
//! - [`decal`] - Window and door placements
//! - [`layout`] - Seeded footprint layouts
//! - [`house`] - Runs all of the above in order over one buffer
//!
//! All generators take a [`BufferCursor`] and return the advanced cursor, so
//! later components append after earlier ones with correctly biased indices.
//!
//! # Example
//!
//! ```
//! use house_gen::{HouseGenerator, HouseOptions};
//!
//! let options = HouseOptions {
//!     seed: Some(1),
//!     ..HouseOptions::default()
//! };
//! let (buffer, house) = HouseGenerator::generate_house(3.0, 2.0, 2.0, 0.5, &options).unwrap();
//! assert_eq!(buffer.vertex_bytes().len(), house.cursor.vertex_offset);
//! ```

pub mod body;
pub mod decal;
pub mod export;
pub mod face;
pub mod fascia;
pub mod house;
pub mod layout;
pub mod packer;
pub mod roof;
pub mod segment;

pub use body::BodyGenerator;
pub use decal::{Decal, DecalGenerator, DecalKind};
pub use export::write_obj;
pub use face::Face;
pub use fascia::FasciaGenerator;
pub use house::{House, HouseGenerator, HouseOptions};
pub use layout::SegmentGenerator;
pub use packer::{MeshOutput, pack_faces};
pub use roof::{RoofGenerator, RoofParams, RoofPolyData, generate_roof_positions, inset_outline};
pub use segment::{DirNorm, Segment, resolve_dir_norm};

pub use house_common::{BufferCursor, GeometryError, ModelSpec, SharedBuffer};

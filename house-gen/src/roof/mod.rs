//! Roof generation
//!
//! - `positions`: slope and hip faces for one footprint segment
//! - `curve`: shell faces between a closed outline and its inset
//! - `generator`: two-layer roof meshes packed into the shared buffer

mod curve;
mod generator;
mod positions;

pub use curve::{CURVE_SHELL_GAP, generate_roof_positions_from_curve, inset_outline, signed_area};
pub use generator::{DEFAULT_ROOF_THICKNESS, RoofGenerator, RoofParams};
pub use positions::{
    RoofPolyData, RoofSlope, SlopeSide, generate_roof_positions, rotate_half_turn,
};

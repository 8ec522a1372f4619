//! House manifest (house.toml) parsing and validation
//!
//! ```toml
//! [output]
//! dir = "out"
//! name = "cottage"
//!
//! [house]
//! height_body = 3.0
//! height_roof = 2.0
//! extrude = 2.0
//! overhang = 0.5
//! seed = 42
//!
//! [[footprint]]
//! start = [0.0, 0.0]
//! end = [8.0, 0.0]
//!
//! [outline]
//! points = [[0.0, 0.0], [10.0, 0.0], [10.0, 6.0], [0.0, 6.0]]
//! inset = 3.0
//! ```

use anyhow::{Context, Result, bail};
use glam::Vec2;
use house_gen::roof::DEFAULT_ROOF_THICKNESS;
use house_gen::{HouseOptions, Segment};
use serde::Deserialize;
use std::path::Path;

/// Parsed manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    /// Segment house built with the full generator chain
    pub house: Option<HouseConfig>,
    /// Explicit footprint for `[house]`, replaces the seeded layout
    #[serde(default)]
    pub footprint: Vec<FootprintSegment>,
    /// Roof built from a closed outline
    pub outline: Option<OutlineConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Also write a Wavefront OBJ
    #[serde(default = "default_true")]
    pub obj: bool,
    /// Also write the JSON descriptor
    #[serde(default = "default_true")]
    pub descriptor: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseConfig {
    #[serde(default = "default_height_body")]
    pub height_body: f32,
    #[serde(default = "default_height_roof")]
    pub height_roof: f32,
    #[serde(default = "default_extrude")]
    pub extrude: f32,
    #[serde(default = "default_overhang")]
    pub overhang: f32,
    pub seed: Option<u64>,
    #[serde(default = "default_thickness_roof")]
    pub thickness_roof: f32,
    #[serde(default = "default_tex_scale")]
    pub tex_scale_roof: f32,
    #[serde(default = "default_tex_scale")]
    pub tex_scale_body: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootprintSegment {
    pub start: [f32; 2],
    pub end: [f32; 2],
    #[serde(default)]
    pub flat: bool,
    #[serde(default)]
    pub start_join: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutlineConfig {
    pub points: Vec<[f32; 2]>,
    /// How far the ridge outline sits inside the wall outline
    #[serde(default = "default_inset")]
    pub inset: f32,
    #[serde(default = "default_height_roof")]
    pub height: f32,
    #[serde(default = "default_height_body")]
    pub y_offset: f32,
    #[serde(default = "default_tex_scale")]
    pub tex_scale: f32,
}

fn default_dir() -> String { "out".to_string() }
fn default_name() -> String { "house".to_string() }
fn default_true() -> bool { true }
fn default_height_body() -> f32 { 3.0 }
fn default_height_roof() -> f32 { 2.0 }
fn default_extrude() -> f32 { 2.0 }
fn default_overhang() -> f32 { 0.5 }
fn default_thickness_roof() -> f32 { DEFAULT_ROOF_THICKNESS }
fn default_tex_scale() -> f32 { 1.0 }
fn default_inset() -> f32 { 1.0 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            name: default_name(),
            obj: true,
            descriptor: true,
        }
    }
}

impl FootprintSegment {
    pub fn to_segment(self) -> Segment {
        Segment {
            start: Vec2::from_array(self.start),
            end: Vec2::from_array(self.end),
            flat: self.flat,
            start_join: self.start_join,
        }
    }
}

impl OutlineConfig {
    pub fn points(&self) -> Vec<Vec2> {
        self.points.iter().copied().map(Vec2::from_array).collect()
    }
}

impl Manifest {
    /// Generator options for `[house]`, with the CLI seed taking precedence
    pub fn house_options(&self, house: &HouseConfig, seed: Option<u64>) -> HouseOptions {
        let segments = (!self.footprint.is_empty())
            .then(|| self.footprint.iter().map(|s| s.to_segment()).collect());
        HouseOptions {
            seed: seed.or(house.seed),
            tex_scale_roof: house.tex_scale_roof,
            tex_scale_body: house.tex_scale_body,
            thickness_roof: house.thickness_roof,
            segments,
        }
    }
}

/// Load a manifest from disk
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    parse_manifest(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))
}

/// Parse manifest text
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

/// Check a manifest for values the generators cannot build
pub fn validate(manifest: &Manifest) -> Result<()> {
    let name = &manifest.output.name;
    if name.is_empty() || name.contains(['/', '\\']) {
        bail!("[output] name must be a plain file name, got {:?}", name);
    }

    if manifest.house.is_none() && manifest.outline.is_none() {
        bail!("Manifest needs a [house] or an [outline] section");
    }

    if let Some(house) = &manifest.house {
        validate_house(house)?;
    } else if !manifest.footprint.is_empty() {
        bail!("[[footprint]] segments need a [house] section");
    }

    for (i, segment) in manifest.footprint.iter().enumerate() {
        let segment = segment.to_segment();
        if !segment.start.is_finite() || !segment.end.is_finite() {
            bail!("footprint segment {} has non-finite coordinates", i);
        }
        if segment.length() < house_gen::segment::MIN_SEGMENT_LENGTH {
            bail!("footprint segment {} has zero length", i);
        }
    }

    if let Some(outline) = &manifest.outline {
        validate_outline(outline)?;
    }

    Ok(())
}

fn validate_house(house: &HouseConfig) -> Result<()> {
    if !(house.extrude > 0.0 && house.extrude.is_finite()) {
        bail!("[house] extrude must be > 0, got {}", house.extrude);
    }
    for (key, value) in [
        ("height_body", house.height_body),
        ("height_roof", house.height_roof),
        ("overhang", house.overhang),
        ("thickness_roof", house.thickness_roof),
    ] {
        if !value.is_finite() || value < 0.0 {
            bail!("[house] {} must be >= 0, got {}", key, value);
        }
    }
    Ok(())
}

fn validate_outline(outline: &OutlineConfig) -> Result<()> {
    if outline.points.len() < 3 {
        bail!(
            "[outline] needs at least 3 points, got {}",
            outline.points.len()
        );
    }
    let points = outline.points();
    if points.iter().any(|p| !p.is_finite()) {
        bail!("[outline] points must be finite");
    }
    for i in 0..points.len() {
        let next = points[(i + 1) % points.len()];
        if points[i].distance(next) < house_gen::segment::MIN_SEGMENT_LENGTH {
            bail!("[outline] point {} repeats its neighbour", i);
        }
    }
    if !(outline.inset > 0.0 && outline.inset.is_finite()) {
        bail!("[outline] inset must be > 0, got {}", outline.inset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let manifest = parse_manifest("[house]\n").unwrap();
        assert_eq!(manifest.output.dir, "out");
        assert_eq!(manifest.output.name, "house");
        assert!(manifest.output.obj);
        assert!(manifest.output.descriptor);

        let house = manifest.house.unwrap();
        assert_eq!(house.height_body, 3.0);
        assert_eq!(house.extrude, 2.0);
        assert_eq!(house.thickness_roof, DEFAULT_ROOF_THICKNESS);
        assert!(house.seed.is_none());
    }

    #[test]
    fn test_footprint_replaces_layout() {
        let manifest = parse_manifest(
            r#"
            [house]
            seed = 3

            [[footprint]]
            start = [0.0, 0.0]
            end = [8.0, 0.0]

            [[footprint]]
            start = [8.0, 0.0]
            end = [8.0, 6.0]
            start_join = true
            "#,
        )
        .unwrap();
        validate(&manifest).unwrap();

        let house = manifest.house.clone().unwrap();
        let options = manifest.house_options(&house, None);
        let segments = options.segments.unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[1].start_join);
        assert_eq!(options.seed, Some(3));
    }

    #[test]
    fn test_cli_seed_wins() {
        let manifest = parse_manifest("[house]\nseed = 3\n").unwrap();
        let house = manifest.house.clone().unwrap();
        assert_eq!(manifest.house_options(&house, Some(9)).seed, Some(9));
    }

    #[test]
    fn test_empty_manifest_is_invalid() {
        let manifest = parse_manifest("").unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(parse_manifest("[house]\nheigth_body = 2.0\n").is_err());
    }

    #[test]
    fn test_invalid_values() {
        let bad_extrude = parse_manifest("[house]\nextrude = 0.0\n").unwrap();
        assert!(validate(&bad_extrude).is_err());

        let bad_name = parse_manifest("[output]\nname = \"a/b\"\n[house]\n").unwrap();
        assert!(validate(&bad_name).is_err());

        let orphan_footprint = parse_manifest(
            r#"
            [[footprint]]
            start = [0.0, 0.0]
            end = [1.0, 0.0]

            [outline]
            points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            "#,
        )
        .unwrap();
        assert!(validate(&orphan_footprint).is_err());
    }

    #[test]
    fn test_outline_validation() {
        let too_few = parse_manifest("[outline]\npoints = [[0.0, 0.0], [1.0, 0.0]]\n").unwrap();
        assert!(validate(&too_few).is_err());

        let repeated = parse_manifest(
            "[outline]\npoints = [[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]\n",
        )
        .unwrap();
        assert!(validate(&repeated).is_err());

        let ok = parse_manifest(
            "[outline]\npoints = [[0.0, 0.0], [10.0, 0.0], [10.0, 6.0], [0.0, 6.0]]\ninset = 3.0\n",
        )
        .unwrap();
        validate(&ok).unwrap();
    }
}

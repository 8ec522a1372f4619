//! Build pipeline: manifest -> generators -> output files

use anyhow::{Context, Result};
use house_common::{BufferCursor, INDEX_SIZE, ModelSpec, SharedBuffer, VERTEX_STRIDE};
use house_gen::{Decal, HouseGenerator, RoofGenerator, Segment, inset_outline, write_obj};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::formats::{
    DecalRecord, HouseDescriptor, SegmentRecord, write_descriptor, write_house_mesh,
};
use crate::manifest::{Manifest, validate};

/// Files written by one build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub mesh: PathBuf,
    pub descriptor: Option<PathBuf>,
    pub obj: Option<PathBuf>,
    pub vertex_count: u32,
    pub index_count: u32,
}

/// Everything generated from a manifest, before it is written out
pub struct BuiltHouse {
    pub buffer: SharedBuffer,
    pub meshes: Vec<ModelSpec>,
    pub decals: Vec<Decal>,
    pub segments: Vec<Segment>,
    pub cursor: BufferCursor,
}

/// Run the generators described by `manifest` into one shared buffer
pub fn generate(manifest: &Manifest, seed: Option<u64>) -> Result<BuiltHouse> {
    let mut buffer = SharedBuffer::new();
    let mut cursor = BufferCursor::START;
    let mut meshes = Vec::new();
    let mut decals = Vec::new();
    let mut segments = Vec::new();

    if let Some(house_config) = &manifest.house {
        let options = manifest.house_options(house_config, seed);
        let house = HouseGenerator::generate_house_into(
            &mut buffer,
            cursor,
            house_config.height_body,
            house_config.height_roof,
            house_config.extrude,
            house_config.overhang,
            &options,
        )
        .context("Failed to generate house")?;

        info!(
            "  house: {} segments, {} decals",
            house.segments.len(),
            house.decals.len()
        );
        cursor = house.cursor;
        meshes.extend([house.body, house.roof, house.fascia]);
        decals = house.decals;
        segments = house.segments;
    }

    if let Some(outline) = &manifest.outline {
        let footprint = outline.points();
        let roof_outline =
            inset_outline(&footprint, outline.inset).context("Failed to inset roof outline")?;
        let output = RoofGenerator::generate_roof_from_curve(
            &footprint,
            &roof_outline,
            outline.height,
            outline.y_offset,
            outline.tex_scale,
            &mut buffer,
            cursor,
        )
        .context("Failed to generate outline roof")?;

        info!("  outline roof: {} points", footprint.len());
        cursor = output.cursor;
        let mut spec = output.spec;
        spec.name = "outline_roof".to_string();
        meshes.push(spec);
    }

    Ok(BuiltHouse {
        buffer,
        meshes,
        decals,
        segments,
        cursor,
    })
}

/// Validate, generate and write every output the manifest asks for
///
/// A relative `[output] dir` is resolved against `base_dir` (the manifest's
/// directory); `output` replaces it entirely.
pub fn build_all(
    manifest: &Manifest,
    base_dir: &Path,
    output: Option<&Path>,
    seed: Option<u64>,
) -> Result<BuildReport> {
    validate(manifest)?;

    let out_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => base_dir.join(&manifest.output.dir),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let built = generate(manifest, seed)?;
    let name = &manifest.output.name;
    let meshes: Vec<&ModelSpec> = built.meshes.iter().collect();
    let vertex_count = built.cursor.vertex_count;
    let index_count = (built.buffer.index_bytes().len() / INDEX_SIZE as usize) as u32;

    let mesh_path = out_dir.join(format!("{name}.hgeo"));
    let mut writer = BufWriter::new(create(&mesh_path)?);
    write_house_mesh(&mut writer, &built.buffer, &meshes)
        .with_context(|| format!("Failed to write mesh: {}", mesh_path.display()))?;
    info!("  -> {}", mesh_path.display());

    let descriptor = if manifest.output.descriptor {
        let path = out_dir.join(format!("{name}.json"));
        let descriptor = HouseDescriptor {
            name,
            vertex_stride: VERTEX_STRIDE,
            vertex_count,
            index_count,
            meshes: meshes.clone(),
            decals: built.decals.iter().map(DecalRecord::from).collect(),
            segments: built.segments.iter().map(SegmentRecord::from).collect(),
        };
        let mut writer = BufWriter::new(create(&path)?);
        write_descriptor(&mut writer, &descriptor)
            .with_context(|| format!("Failed to write descriptor: {}", path.display()))?;
        info!("  -> {}", path.display());
        Some(path)
    } else {
        None
    };

    let obj = if manifest.output.obj {
        let path = out_dir.join(format!("{name}.obj"));
        let mut writer = BufWriter::new(create(&path)?);
        write_obj(&mut writer, &built.buffer, &meshes)
            .with_context(|| format!("Failed to write OBJ: {}", path.display()))?;
        info!("  -> {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(BuildReport {
        mesh: mesh_path,
        descriptor,
        obj,
        vertex_count,
        index_count,
    })
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest;

    const HOUSE_AND_OUTLINE: &str = r#"
        [house]
        seed = 11

        [[footprint]]
        start = [0.0, 0.0]
        end = [8.0, 0.0]

        [outline]
        points = [[20.0, 0.0], [30.0, 0.0], [30.0, 6.0], [20.0, 6.0]]
        inset = 3.0
    "#;

    #[test]
    fn test_outline_roof_appends_after_house() {
        let manifest = parse_manifest(HOUSE_AND_OUTLINE).unwrap();
        let built = generate(&manifest, None).unwrap();

        let names: Vec<&str> = built.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["body", "roof", "fascia", "outline_roof"]);

        // body 16 + roof 28 + fascia 16, then 2 quads + 2 triangles per layer
        assert_eq!(built.meshes[3].base_vertex, 60);
        assert_eq!(built.meshes[3].vertex_count, 28);
        assert_eq!(built.cursor.vertex_count, 88);
        assert_eq!(built.buffer.vertex_bytes().len(), 88 * 44);
    }

    #[test]
    fn test_outline_only() {
        let manifest = parse_manifest(
            "[outline]\npoints = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]\n",
        )
        .unwrap();
        let built = generate(&manifest, None).unwrap();
        assert_eq!(built.meshes.len(), 1);
        assert!(built.decals.is_empty());
        // Inset 1 keeps all four ridge edges: 4 quads per layer
        assert_eq!(built.cursor.vertex_count, 32);
    }

    #[test]
    fn test_build_all_writes_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = parse_manifest(&format!(
            "[output]\nname = \"cottage\"\nobj = false\n{HOUSE_AND_OUTLINE}"
        ))
        .unwrap();
        let report = build_all(&manifest, dir.path(), None, None).unwrap();

        assert_eq!(report.mesh, dir.path().join("out").join("cottage.hgeo"));
        assert!(report.mesh.exists());
        assert!(report.descriptor.unwrap().exists());
        assert!(report.obj.is_none());
        assert_eq!(report.vertex_count, 88);
    }
}

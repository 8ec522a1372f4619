//! Wavefront OBJ export of packed meshes

use std::io::{self, Write};

use house_common::{INDEX_SIZE, ModelSpec, SharedBuffer, VERTEX_STRIDE, unpack_vertex};

/// Write the meshes described by `specs` as OBJ
///
/// Vertices are decoded back out of `buffer`; every spec becomes one `o`
/// object. Face indices are 1-based and count every vertex written before,
/// so for specs covering the buffer from its start they equal the global
/// packed index plus one.
pub fn write_obj<W: Write>(
    writer: &mut W,
    buffer: &SharedBuffer,
    specs: &[&ModelSpec],
) -> io::Result<()> {
    writeln!(writer, "# house mesh")?;
    let mut written: u32 = 0;

    for spec in specs {
        writeln!(writer, "o {}", spec.name)?;

        let vertices = (0..spec.vertex_count as usize)
            .map(|i| {
                let start = spec.vertex_offset + i * VERTEX_STRIDE as usize;
                buffer
                    .vertex_bytes()
                    .get(start..)
                    .and_then(unpack_vertex)
                    .ok_or_else(|| {
                        invalid_data(format!("{}: vertex {} out of range", spec.name, i))
                    })
            })
            .collect::<io::Result<Vec<_>>>()?;

        for vertex in &vertices {
            let [x, y, z] = vertex.position;
            writeln!(writer, "v {x} {y} {z}")?;
        }
        for vertex in &vertices {
            let [u, v] = vertex.texcoord;
            writeln!(writer, "vt {u} {v}")?;
        }
        for vertex in &vertices {
            let [x, y, z] = vertex.normal;
            writeln!(writer, "vn {x} {y} {z}")?;
        }

        let first_index = spec.index.byte_offset / INDEX_SIZE as usize;
        let mut triangle = [0u32; 3];
        for i in 0..spec.index.count as usize {
            let index = buffer
                .index_at(first_index + i)
                .ok_or_else(|| invalid_data(format!("{}: index {} out of range", spec.name, i)))?;
            let local = (index as u32)
                .checked_sub(spec.base_vertex)
                .filter(|&local| local < spec.vertex_count)
                .ok_or_else(|| {
                    invalid_data(format!("{}: index {} outside the mesh", spec.name, index))
                })?;
            triangle[i % 3] = written + local + 1;
            if i % 3 == 2 {
                let [a, b, c] = triangle;
                writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            }
        }

        written += spec.vertex_count;
    }

    Ok(())
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

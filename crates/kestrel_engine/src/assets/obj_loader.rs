//! OBJ file loader for 3D models
//!
//! Parses the subset of Wavefront OBJ the engine consumes: vertex positions,
//! normals, texture coordinates, and faces in the `v`, `v/vt`, `v//vn`, and
//! `v/vt/vn` index forms. Polygons are fan-triangulated; identical
//! position/texcoord/normal triples are deduplicated into a single vertex.

use super::LoadError;
use crate::render::{Mesh, Vertex};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Wavefront OBJ mesh loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file from disk
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mesh = Self::load_obj_from(BufReader::new(file))?;
        log::info!(
            "loaded {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertices().len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ data from any buffered reader
    pub fn load_obj_from<R: BufRead>(reader: R) -> Result<Mesh, LoadError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut texcoords: Vec<[f32; 2]> = Vec::new();

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        // (position, texcoord, normal) index triple -> emitted vertex index
        let mut dedup: HashMap<(usize, Option<usize>, Option<usize>), u32> = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else { continue };
            let parts: Vec<&str> = parts.collect();

            match keyword {
                "v" => positions.push(parse_vec3(&parts, "vertex position")?),
                "vn" => normals.push(parse_vec3(&parts, "vertex normal")?),
                "vt" => texcoords.push(parse_vec2(&parts, "texture coordinate")?),
                "f" => {
                    if parts.len() < 3 {
                        return Err(LoadError::InvalidFormat(format!(
                            "face with fewer than 3 vertices: {line}"
                        )));
                    }

                    let mut face: Vec<u32> = Vec::with_capacity(parts.len());
                    for corner in &parts {
                        let triple = parse_corner(corner, positions.len(), texcoords.len(), normals.len())?;
                        let index = *dedup.entry(triple).or_insert_with(|| {
                            let (pos, tex, norm) = triple;
                            vertices.push(Vertex {
                                position: positions[pos],
                                normal: norm.map_or([0.0, 0.0, 0.0], |n| normals[n]),
                                texcoord: tex.map_or([0.0, 0.0], |t| texcoords[t]),
                            });
                            u32::try_from(vertices.len() - 1).unwrap_or(u32::MAX)
                        });
                        face.push(index);
                    }

                    // Fan-triangulate: (0, i, i+1) for each interior edge
                    for i in 1..face.len() - 1 {
                        indices.push(face[0]);
                        indices.push(face[i]);
                        indices.push(face[i + 1]);
                    }
                }
                // Groups, materials, smoothing groups and the like are ignored
                _ => {}
            }
        }

        if indices.is_empty() {
            return Err(LoadError::InvalidFormat("no faces found".to_string()));
        }

        fill_missing_normals(&mut vertices, &indices);
        Ok(Mesh::new(vertices, indices))
    }
}

fn parse_f32(text: &str, what: &str) -> Result<f32, LoadError> {
    text.parse()
        .map_err(|_| LoadError::Parse(format!("invalid {what} component: {text}")))
}

fn parse_vec3(parts: &[&str], what: &str) -> Result<[f32; 3], LoadError> {
    if parts.len() < 3 {
        return Err(LoadError::Parse(format!("{what} needs 3 components")));
    }
    Ok([
        parse_f32(parts[0], what)?,
        parse_f32(parts[1], what)?,
        parse_f32(parts[2], what)?,
    ])
}

fn parse_vec2(parts: &[&str], what: &str) -> Result<[f32; 2], LoadError> {
    if parts.len() < 2 {
        return Err(LoadError::Parse(format!("{what} needs 2 components")));
    }
    Ok([parse_f32(parts[0], what)?, parse_f32(parts[1], what)?])
}

/// Parse one `v[/vt][/vn]` face corner into 0-based indices
fn parse_corner(
    corner: &str,
    position_count: usize,
    texcoord_count: usize,
    normal_count: usize,
) -> Result<(usize, Option<usize>, Option<usize>), LoadError> {
    let mut fields = corner.split('/');

    let position = resolve_index(
        fields.next().unwrap_or(""),
        position_count,
        "position",
    )?
    .ok_or_else(|| LoadError::Parse(format!("face corner missing position index: {corner}")))?;
    let texcoord = resolve_index(fields.next().unwrap_or(""), texcoord_count, "texcoord")?;
    let normal = resolve_index(fields.next().unwrap_or(""), normal_count, "normal")?;

    Ok((position, texcoord, normal))
}

/// Resolve a 1-based (or negative, relative) OBJ index into a 0-based one
fn resolve_index(field: &str, count: usize, what: &str) -> Result<Option<usize>, LoadError> {
    if field.is_empty() {
        return Ok(None);
    }
    let raw: i64 = field
        .parse()
        .map_err(|_| LoadError::Parse(format!("invalid {what} index: {field}")))?;

    let resolved = if raw > 0 {
        usize::try_from(raw - 1).ok()
    } else if raw < 0 {
        count.checked_sub(usize::try_from(-raw).ok().unwrap_or(usize::MAX))
    } else {
        None
    };

    match resolved {
        Some(index) if index < count => Ok(Some(index)),
        _ => Err(LoadError::InvalidFormat(format!(
            "{what} index {raw} out of range (have {count})"
        ))),
    }
}

/// Give vertices with no source normal a flat normal from their first face
fn fill_missing_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        let normal = flat_normal(vertices[a].position, vertices[b].position, vertices[c].position);
        for index in [a, b, c] {
            if vertices[index].normal == [0.0, 0.0, 0.0] {
                vertices[index].normal = normal;
            }
        }
    }
}

fn flat_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > f32::EPSILON {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
# a unit quad with normals and texcoords
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_load_quad_fan_triangulated() {
        let mesh = ObjLoader::load_obj_from(Cursor::new(QUAD)).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices()[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices()[2].texcoord, [1.0, 1.0]);
    }

    #[test]
    fn test_shared_corners_deduplicated() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
";
        let mesh = ObjLoader::load_obj_from(Cursor::new(obj)).unwrap();
        // 4 unique corners across 2 triangles
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_missing_normals_get_flat_normal() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let mesh = ObjLoader::load_obj_from(Cursor::new(obj)).unwrap();
        for vertex in mesh.vertices() {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_negative_indices_resolve_relatively() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
";
        let mesh = ObjLoader::load_obj_from(Cursor::new(obj)).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices()[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let obj = "v 0 0 0\nf 1 2 3\n";
        let result = ObjLoader::load_obj_from(Cursor::new(obj));
        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn test_malformed_position_rejected() {
        let obj = "v 0 zero 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let result = ObjLoader::load_obj_from(Cursor::new(obj));
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_empty_file_rejected() {
        let result = ObjLoader::load_obj_from(Cursor::new("# nothing here\n"));
        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ObjLoader::load_obj("does/not/exist.obj");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}

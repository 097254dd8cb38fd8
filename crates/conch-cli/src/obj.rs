//! Minimal OBJ polygon mesh reader and writer.
//!
//! Reads `v` and `f` records into a [`Mesh`] and writes meshes back out,
//! including `vt` records and `v/vt` face corners when a UV map is named.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use conch::{Mesh, Point3, VertexId};

/// Read a polygon mesh from an OBJ file.
pub fn read(path: &Path) -> Result<Mesh> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse OBJ text into a mesh.
///
/// Only `v` and `f` records contribute; texture/normal indices on face
/// corners are ignored on input, as are all other record types. Face
/// indices may be 1-based or negative (relative to the vertices read so
/// far), as OBJ allows.
pub fn parse(text: &str) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    let mut verts: Vec<VertexId> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let coords: Vec<f64> = fields
                    .take(3)
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("line {lineno}: bad vertex coordinate"))?;
                if coords.len() != 3 {
                    bail!("line {lineno}: vertex needs 3 coordinates");
                }
                verts.push(mesh.add_vertex(Point3::new(coords[0], coords[1], coords[2])));
            }
            Some("f") => {
                let mut face: Vec<VertexId> = Vec::new();
                for corner in fields {
                    let vert_field = corner.split('/').next().unwrap_or(corner);
                    let idx: i64 = vert_field
                        .parse()
                        .with_context(|| format!("line {lineno}: bad face index"))?;
                    let resolved = match idx {
                        0 => bail!("line {lineno}: face index 0 is not valid"),
                        i if i > 0 => i as usize - 1,
                        i => {
                            let back = (-i) as usize;
                            if back > verts.len() {
                                bail!("line {lineno}: face index {i} out of range");
                            }
                            verts.len() - back
                        }
                    };
                    let &vert = verts
                        .get(resolved)
                        .with_context(|| format!("line {lineno}: face index out of range"))?;
                    face.push(vert);
                }
                mesh.add_face(&face)
                    .with_context(|| format!("line {lineno}: bad face"))?;
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Write a polygon mesh to an OBJ file.
///
/// When `uv_map` names an existing UV map, corners with a value are
/// written as `v/vt` references; identical UV values share one `vt`
/// record.
pub fn write(path: &Path, mesh: &Mesh, uv_map: Option<&str>) -> Result<()> {
    fs::write(path, format(mesh, uv_map)).with_context(|| format!("writing {}", path.display()))
}

/// Format a polygon mesh as OBJ text.
pub fn format(mesh: &Mesh, uv_map: Option<&str>) -> String {
    let mut out = String::new();

    let mut index: HashMap<VertexId, usize> = HashMap::new();
    for (i, (id, vert)) in mesh.vertices().enumerate() {
        index.insert(id, i + 1);
        let p = vert.point;
        let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
    }

    let map = uv_map.and_then(|name| mesh.uv_map(name));
    let mut vt_values: Vec<(f64, f64)> = Vec::new();
    let mut vt_index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut face_records: Vec<String> = Vec::new();

    for (fid, face) in mesh.faces() {
        let mut rec = String::from("f");
        for &v in face.verts() {
            let vi = index[&v];
            match map.and_then(|m| m.get(fid, v)) {
                Some(uv) => {
                    let key = (uv.x.to_bits(), uv.y.to_bits());
                    let ti = *vt_index.entry(key).or_insert_with(|| {
                        vt_values.push((uv.x, uv.y));
                        vt_values.len()
                    });
                    let _ = write!(rec, " {vi}/{ti}");
                }
                None => {
                    let _ = write!(rec, " {vi}");
                }
            }
        }
        face_records.push(rec);
    }

    for (u, v) in &vt_values {
        let _ = writeln!(out, "vt {u} {v}");
    }
    for rec in &face_records {
        let _ = writeln!(out, "{rec}");
    }

    out
}

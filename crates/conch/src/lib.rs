#![warn(missing_docs)]

//! High-level facade for conch seashell generation.
//!
//! Ties the pieces together the way a host mesh editor would: collect the
//! profile polygons from a mesh (selected ones, or all of them), walk the
//! shell generation, and commit the resulting vertices, quads and UVs
//! back into the mesh.
//!
//! # Example
//!
//! ```
//! use conch::{build_shell, Mesh, Parameters, Point3};
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(-1.0, 1.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(-1.0, -1.0, 0.0));
//! let d = mesh.add_vertex(Point3::new(1.0, -1.0, 0.0));
//! mesh.add_face(&[a, b, c, d]).unwrap();
//!
//! let params = Parameters {
//!     loops: 1,
//!     sides: 4,
//!     ..Parameters::default()
//! };
//! let report = build_shell(&mut mesh, &params).unwrap();
//! assert_eq!(report.faces_added, 16);
//! assert_eq!(mesh.face_count(), 17);
//! ```

pub use conch_loft;
pub use conch_math;
pub use conch_mesh;
pub use conch_profile;

pub use conch_loft::{generate, steps, GeneratedQuad, LoftError, Parameters, ShellGeometry};
pub use conch_math::{Axis, Point2, Point3};
pub use conch_mesh::{FaceId, Mesh, MeshError, VertexId};
pub use conch_profile::{collect_profiles, ProfileLoop};

use thiserror::Error;

/// Errors from building a shell into a mesh.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    /// Shell generation rejected the parameters.
    #[error(transparent)]
    Loft(#[from] LoftError),

    /// A mesh edit failed for a reason other than a duplicate face.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Counts from one [`build_shell`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of generated rings.
    pub rings: usize,
    /// Vertex records created.
    pub vertices_added: usize,
    /// Quad faces created.
    pub faces_added: usize,
    /// Quads skipped because an identical face already existed.
    pub faces_skipped: usize,
}

/// Build a seashell surface into `mesh`.
///
/// Collects the profile polygons (selected ones if any, otherwise all),
/// then walks the shell generation ring by ring, creating vertex and face
/// records as it goes. The first ring of quads is stitched onto the
/// source polygons' existing vertices. When `params.make_uvs` is set, the
/// destination UV map is created if missing and every generated quad
/// corner receives its texture coordinates.
///
/// A quad whose vertex set already exists in the mesh is skipped and
/// counted, not an error. A mesh with no qualifying polygons yields an
/// all-zero report and no edits.
///
/// # Errors
///
/// [`BuildError::Loft`] when the parameters are rejected;
/// [`BuildError::Mesh`] when a mesh edit fails for a reason other than
/// [`MeshError::DuplicateFace`].
pub fn build_shell(mesh: &mut Mesh, params: &Parameters) -> Result<BuildReport, BuildError> {
    let profiles = collect_profiles(mesh);
    if profiles.is_empty() {
        return Ok(BuildReport::default());
    }

    if params.make_uvs {
        mesh.ensure_uv_map(&params.uv_map_name);
    }

    let mut report = BuildReport::default();

    // Front rows start as the source polygons' own vertices.
    let mut fronts: Vec<Vec<VertexId>> = profiles
        .iter()
        .map(|p| p.verts().iter().map(|&(v, _)| v).collect())
        .collect();

    for step in conch_loft::steps(&profiles, params)? {
        let backs: Vec<Vec<VertexId>> = step
            .loops
            .iter()
            .map(|row| row.iter().map(|&p| mesh.add_vertex(p)).collect())
            .collect();
        report.vertices_added += backs.iter().map(Vec::len).sum::<usize>();

        for quad in &step.quads {
            let ids = quad.corners.map(|c| {
                if c.ring == step.ring {
                    backs[c.loop_idx][c.vert]
                } else {
                    fronts[c.loop_idx][c.vert]
                }
            });
            match mesh.add_face(&ids) {
                Ok(face) => {
                    report.faces_added += 1;
                    if let Some(uvs) = &quad.uvs {
                        // The map exists; it was ensured above.
                        if let Some(map) = mesh.uv_map_mut(&params.uv_map_name) {
                            for (&vert, &uv) in ids.iter().zip(uvs.iter()) {
                                map.set(face, vert, uv);
                            }
                        }
                    }
                }
                Err(MeshError::DuplicateFace) => {
                    report.faces_skipped += 1;
                    log::debug!("skipping quad: a face with these vertices already exists");
                }
                Err(e) => return Err(e.into()),
            }
        }

        fronts = backs;
        report.rings += 1;
    }

    mesh.mark_changed();
    log::debug!(
        "built shell: {} rings, {} vertices, {} faces ({} skipped)",
        report.rings,
        report.vertices_added,
        report.faces_added,
        report.faces_skipped
    );
    Ok(report)
}

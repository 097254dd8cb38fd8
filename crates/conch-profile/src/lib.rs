#![warn(missing_docs)]

//! Profile polygon collection.
//!
//! Reads the source polygons a shell will be lofted from: every selected
//! polygon of the mesh, or every polygon when nothing is selected. Each
//! qualifying polygon becomes one [`ProfileLoop`] in mesh order, with its
//! native vertex winding preserved.

use conch_math::Point3;
use conch_mesh::{Mesh, VertexId};

/// One closed source polygon boundary: an ordered, cyclic ring of vertex
/// positions together with the mesh vertices they came from.
///
/// Loops are immutable once collected. The source vertex ids let the
/// commit layer stitch the first generated ring back onto the existing
/// polygon instead of duplicating its vertices.
#[derive(Debug, Clone)]
pub struct ProfileLoop {
    verts: Vec<(VertexId, Point3)>,
}

impl ProfileLoop {
    /// Create a loop from `(source vertex, position)` pairs in winding order.
    pub fn new(verts: Vec<(VertexId, Point3)>) -> Self {
        Self { verts }
    }

    /// Create a loop from bare positions, not backed by mesh vertices.
    ///
    /// The source ids are null keys, so such a loop can feed generation
    /// directly but cannot be stitched back onto an existing polygon by a
    /// commit layer.
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self {
            verts: points
                .into_iter()
                .map(|p| (VertexId::default(), p))
                .collect(),
        }
    }

    /// The ring as `(source vertex, position)` pairs, in winding order.
    pub fn verts(&self) -> &[(VertexId, Point3)] {
        &self.verts
    }

    /// Position of vertex `k`.
    pub fn point(&self, k: usize) -> Point3 {
        self.verts[k].1
    }

    /// Source mesh vertex of vertex `k`.
    pub fn source(&self, k: usize) -> VertexId {
        self.verts[k].0
    }

    /// Number of vertices in the loop.
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// True if the loop has no vertices.
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}

/// Collect profile loops from a mesh.
///
/// Operates on explicitly selected polygons if any exist, otherwise on
/// every polygon. Read-only: the mesh is not modified. A mesh with zero
/// qualifying polygons yields an empty list, which downstream generation
/// treats as a valid empty result rather than an error.
pub fn collect_profiles(mesh: &Mesh) -> Vec<ProfileLoop> {
    let use_selection = mesh.has_selection();

    mesh.faces()
        .filter(|(_, face)| !use_selection || face.selected())
        .map(|(_, face)| {
            ProfileLoop::new(
                face.verts()
                    .iter()
                    .map(|&v| (v, mesh.position(v)))
                    .collect(),
            )
        })
        .collect()
}

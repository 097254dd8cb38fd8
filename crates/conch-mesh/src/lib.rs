#![warn(missing_docs)]

//! Editable polygon mesh for the conch shell-generation kernel.
//!
//! Holds vertex and polygon records, per-polygon selection state, and
//! named UV maps with per-corner values. This is the mesh the profile
//! collector reads from and the commit layer writes generated geometry
//! into.

use std::collections::{HashMap, HashSet};

use conch_math::{Point2, Point3};
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Key for a vertex record.
    pub struct VertexId;

    /// Key for a polygon record.
    pub struct FaceId;
}

/// Errors from mesh edits.
#[derive(Debug, Clone, Error)]
pub enum MeshError {
    /// A polygon needs at least 3 vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A vertex id does not belong to this mesh.
    #[error("vertex id does not belong to this mesh")]
    UnknownVertex,

    /// A polygon with the same vertex set already exists.
    #[error("a polygon with these vertices already exists")]
    DuplicateFace,
}

/// A vertex record.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position in 3D space.
    pub point: Point3,
}

/// A polygon record: an ordered, cyclic list of vertex ids.
#[derive(Debug, Clone)]
pub struct Face {
    verts: Vec<VertexId>,
    selected: bool,
}

impl Face {
    /// The polygon's vertices in winding order.
    pub fn verts(&self) -> &[VertexId] {
        &self.verts
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// True if the polygon has no vertices (never the case for stored faces).
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Whether the polygon is currently selected.
    pub fn selected(&self) -> bool {
        self.selected
    }
}

/// A named UV map holding one (u, v) value per polygon corner.
///
/// Values are keyed by `(face, vertex)`, so a vertex shared by several
/// polygons can carry a different UV on each of them.
#[derive(Debug, Clone, Default)]
pub struct UvMap {
    values: HashMap<(FaceId, VertexId), Point2>,
}

impl UvMap {
    /// Set the UV value for one polygon corner.
    pub fn set(&mut self, face: FaceId, vert: VertexId, uv: Point2) {
        self.values.insert((face, vert), uv);
    }

    /// Get the UV value for one polygon corner.
    pub fn get(&self, face: FaceId, vert: VertexId) -> Option<Point2> {
        self.values.get(&(face, vert)).copied()
    }

    /// Number of corners with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no corner has a value yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An editable polygon mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: SlotMap<VertexId, Vertex>,
    faces: SlotMap<FaceId, Face>,
    // Sorted vertex sets of existing polygons, for duplicate rejection.
    face_index: HashSet<Vec<VertexId>>,
    uv_maps: HashMap<String, UvMap>,
    changed: bool,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex at `point`.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        self.vertices.insert(Vertex { point })
    }

    /// Position of a vertex.
    ///
    /// Panics if `v` does not belong to this mesh; vertex ids are never
    /// invalidated because the mesh has no vertex removal.
    pub fn position(&self, v: VertexId) -> Point3 {
        self.vertices[v].point
    }

    /// Add a polygon over existing vertices, in winding order.
    ///
    /// # Errors
    ///
    /// - [`MeshError::TooFewVertices`] for fewer than 3 vertices
    /// - [`MeshError::UnknownVertex`] if any id is not in this mesh
    /// - [`MeshError::DuplicateFace`] if a polygon over the same vertex
    ///   set already exists
    pub fn add_face(&mut self, verts: &[VertexId]) -> Result<FaceId, MeshError> {
        if verts.len() < 3 {
            return Err(MeshError::TooFewVertices(verts.len()));
        }
        if verts.iter().any(|&v| !self.vertices.contains_key(v)) {
            return Err(MeshError::UnknownVertex);
        }

        let mut key: Vec<VertexId> = verts.to_vec();
        key.sort_unstable();
        if self.face_index.contains(&key) {
            return Err(MeshError::DuplicateFace);
        }
        self.face_index.insert(key);

        Ok(self.faces.insert(Face {
            verts: verts.to_vec(),
            selected: false,
        }))
    }

    /// Look up a polygon record.
    pub fn face(&self, f: FaceId) -> Option<&Face> {
        self.faces.get(f)
    }

    /// Iterate all polygons in creation order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    /// Iterate all vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygons.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Set a polygon's selection flag. Returns false for an unknown id.
    pub fn select_face(&mut self, f: FaceId, selected: bool) -> bool {
        match self.faces.get_mut(f) {
            Some(face) => {
                face.selected = selected;
                true
            }
            None => false,
        }
    }

    /// True if at least one polygon is selected.
    pub fn has_selection(&self) -> bool {
        self.faces.values().any(|f| f.selected)
    }

    /// Get the UV map with the given name, creating it if missing.
    pub fn ensure_uv_map(&mut self, name: &str) -> &mut UvMap {
        self.uv_maps.entry(name.to_string()).or_default()
    }

    /// Look up a UV map by name.
    pub fn uv_map(&self, name: &str) -> Option<&UvMap> {
        self.uv_maps.get(name)
    }

    /// Mutable access to a UV map by name.
    pub fn uv_map_mut(&mut self, name: &str) -> Option<&mut UvMap> {
        self.uv_maps.get_mut(name)
    }

    /// Names of all UV maps.
    pub fn uv_map_names(&self) -> impl Iterator<Item = &str> {
        self.uv_maps.keys().map(String::as_str)
    }

    /// Flag the mesh as topologically modified.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Read and clear the modified flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}

#![warn(missing_docs)]

//! Seashell surface generation for the conch kernel.
//!
//! Repeatedly duplicates a source profile polygon, transforms each copy
//! through a combined scale/rotation/translation along a chosen axis, and
//! stitches successive copies with quadrilateral faces, producing a
//! spiral, tapering tube.
//!
//! The generation is a pure, deterministic computation: profile loops and
//! a [`Parameters`] value in, vertex rings and quads out. [`steps`] walks
//! the shell one ring at a time so only the previous and current ring are
//! ever resident; [`generate`] collects the whole walk when a materialized
//! result is more convenient.
//!
//! # Example
//!
//! ```
//! use conch_loft::{generate, Parameters};
//! use conch_math::Point3;
//! use conch_mesh::Mesh;
//! use conch_profile::collect_profiles;
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(-1.0, 1.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(-1.0, -1.0, 0.0));
//! let d = mesh.add_vertex(Point3::new(1.0, -1.0, 0.0));
//! mesh.add_face(&[a, b, c, d]).unwrap();
//!
//! let profiles = collect_profiles(&mesh);
//! let params = Parameters {
//!     loops: 1,
//!     sides: 4,
//!     ..Parameters::default()
//! };
//! let shell = generate(&profiles, &params).unwrap();
//! assert_eq!(shell.rings.len(), 4);
//! assert_eq!(shell.quads.len(), 16);
//! ```

mod generate;
mod params;
mod transform;

pub use generate::{
    generate, steps, GeneratedQuad, GeneratedRing, RingStep, ShellGeometry, ShellSteps, VertRef,
};
pub use params::{Parameters, MIN_SCALE};
pub use transform::transform_point;

use thiserror::Error;

/// Errors from shell generation.
#[derive(Debug, Clone, Error)]
pub enum LoftError {
    /// The loop count must be at least 1.
    #[error("loop count must be at least 1")]
    InvalidLoops,

    /// The sides-per-loop count must be at least 1.
    #[error("sides per loop must be at least 1")]
    InvalidSides,
}

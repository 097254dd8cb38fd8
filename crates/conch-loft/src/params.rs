//! Generation parameters.

use conch_math::Axis;
use serde::{Deserialize, Serialize};

/// Scale values at or below this are clamped before use, so the per-step
/// scale derivation never divides by zero.
pub const MIN_SCALE: f64 = 1.0e-6;

/// Parameter set for one shell generation pass.
///
/// An explicit immutable value, handed to each call; any "sticky last
/// used" behavior belongs to whatever front end drives the generator.
/// All fields deserialize with their defaults filled in, so a preset file
/// may name only the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Axis of revolution and taper.
    pub axis: Axis,
    /// Number of full revolutions. Must be at least 1.
    pub loops: u32,
    /// Angular subdivisions per revolution. Must be at least 1.
    pub sides: u32,
    /// Distance of the apex along the axis; divided by `scale` internally.
    pub offset: f64,
    /// Per-revolution shrink factor toward the apex. Values at or below
    /// [`MIN_SCALE`] are clamped rather than rejected.
    pub scale: f64,
    /// Whether to emit per-corner texture coordinates.
    pub make_uvs: bool,
    /// Total U-axis texture repeat count scaling factor.
    pub u_wrap: f64,
    /// V-axis texture coordinate scaling factor.
    pub v_wrap: f64,
    /// Declared for host interface compatibility. The generation math does
    /// not currently read it.
    pub rotate_v_wrap: bool,
    /// Name of the destination texture coordinate channel.
    pub uv_map_name: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            loops: 4,
            sides: 20,
            offset: 1.0,
            scale: 0.6,
            make_uvs: true,
            u_wrap: 0.2,
            v_wrap: 1.0,
            rotate_v_wrap: false,
            uv_map_name: "UVMap".to_string(),
        }
    }
}

impl Parameters {
    /// The scale factor with the degenerate-zero guard applied.
    pub fn clamped_scale(&self) -> f64 {
        if self.scale < MIN_SCALE {
            MIN_SCALE
        } else {
            self.scale
        }
    }

    /// Total number of generated rings (`loops × sides`).
    pub fn step_count(&self) -> usize {
        self.loops as usize * self.sides as usize
    }
}

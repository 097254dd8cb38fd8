//! The shell walk: transformed vertex rings and the quads stitching them.

use conch_math::{Point2, Point3};
use conch_profile::ProfileLoop;

use crate::{transform_point, LoftError, Parameters};

/// Reference to one shell vertex.
///
/// Ring 0 is the source profile itself; rings `1..=n` are generated. A
/// commit layer maps ring-0 references to the existing host vertices and
/// allocates new records for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertRef {
    /// Ring index (0 = source profile).
    pub ring: usize,
    /// Index of the profile loop within the generation pass.
    pub loop_idx: usize,
    /// Vertex index within the loop.
    pub vert: usize,
}

/// One generated quadrilateral face.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuad {
    /// Corner vertex references in winding order: `front[l]`, `front[k]`,
    /// `back[k]`, `back[l]` with `l = (k + 1) mod loop_len`. This keeps
    /// the quad's orientation consistent with the source polygon's
    /// winding as the surface grows.
    pub corners: [VertRef; 4],
    /// Per-corner texture coordinates aligned with `corners`, present
    /// when UVs were requested.
    pub uvs: Option<[Point2; 4]>,
}

/// One ring of generated vertices, grouped per profile loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRing {
    /// New vertex positions, one row per input loop, in loop order.
    pub loops: Vec<Vec<Point3>>,
}

/// One step of the shell walk.
#[derive(Debug, Clone)]
pub struct RingStep {
    /// Ring index of the vertices produced by this step (`1..=n`).
    pub ring: usize,
    /// New vertex positions, one row per input loop, in loop order.
    pub loops: Vec<Vec<Point3>>,
    /// Quads stitching this ring to the previous one.
    pub quads: Vec<GeneratedQuad>,
}

/// The full generation result: all rings and all quads.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellGeometry {
    /// Generated rings in step order.
    pub rings: Vec<GeneratedRing>,
    /// Generated quads in step order.
    pub quads: Vec<GeneratedQuad>,
}

/// Iterator over the shell walk, one ring step at a time.
///
/// Vertices are always transformed from the ORIGINAL profile positions
/// with the accumulated rotation and scale, so the walk needs only the
/// constant profile plus the ring under construction; consumers that
/// stitch faces keep the previous ring themselves. This bounds peak
/// memory for large `loops × sides` products.
pub struct ShellSteps<'a> {
    profiles: &'a [ProfileLoop],
    axis: conch_math::Axis,
    n: usize,
    rot_step: f64,
    step_scale: f64,
    cen: f64,
    make_uvs: bool,
    usiz: f64,
    v_wrap: f64,
    i: usize,
    sc: f64,
    rt: f64,
}

impl Iterator for ShellSteps<'_> {
    type Item = RingStep;

    fn next(&mut self) -> Option<RingStep> {
        if self.i >= self.n {
            return None;
        }
        self.sc *= self.step_scale;
        self.rt += self.rot_step;

        let i = self.i;
        let ring = i + 1;
        let n = self.n as f64;

        let mut rows = Vec::with_capacity(self.profiles.len());
        let mut quads = Vec::new();

        for (loop_idx, profile) in self.profiles.iter().enumerate() {
            let row: Vec<Point3> = profile
                .verts()
                .iter()
                .map(|(_, p)| transform_point(self.axis, self.rt, self.sc, self.cen, p))
                .collect();

            let nvert = profile.len();
            for k in 0..nvert {
                let l = (k + 1) % nvert;
                let corners = [
                    VertRef { ring: ring - 1, loop_idx, vert: l },
                    VertRef { ring: ring - 1, loop_idx, vert: k },
                    VertRef { ring, loop_idx, vert: k },
                    VertRef { ring, loop_idx, vert: l },
                ];
                let uvs = self.make_uvs.then(|| {
                    let u_front = (1.0 - i as f64 / n) * self.usiz;
                    let u_back = (1.0 - (i + 1) as f64 / n) * self.usiz;
                    let v_k = 1.0 - k as f64 / nvert as f64 * self.v_wrap;
                    let v_k1 = 1.0 - (k + 1) as f64 / nvert as f64 * self.v_wrap;
                    [
                        Point2::new(u_front, v_k1),
                        Point2::new(u_front, v_k),
                        Point2::new(u_back, v_k),
                        Point2::new(u_back, v_k1),
                    ]
                });
                quads.push(GeneratedQuad { corners, uvs });
            }
            rows.push(row);
        }

        self.i += 1;
        Some(RingStep {
            ring,
            loops: rows,
            quads,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ShellSteps<'_> {}

/// Start a shell walk over `profiles` with `params`.
///
/// Yields `loops × sides` ring steps; each step carries one new ring of
/// vertices per profile loop and the quads stitching it to the previous
/// ring. An empty profile list yields an empty walk.
///
/// # Errors
///
/// [`LoftError::InvalidLoops`] / [`LoftError::InvalidSides`] when either
/// count is zero.
pub fn steps<'a>(
    profiles: &'a [ProfileLoop],
    params: &Parameters,
) -> Result<ShellSteps<'a>, LoftError> {
    if params.loops < 1 {
        return Err(LoftError::InvalidLoops);
    }
    if params.sides < 1 {
        return Err(LoftError::InvalidSides);
    }

    let scale = params.clamped_scale();
    let n = if profiles.is_empty() {
        0
    } else {
        params.step_count()
    };

    Ok(ShellSteps {
        profiles,
        axis: params.axis,
        n,
        rot_step: std::f64::consts::PI / params.sides as f64,
        step_scale: scale.powf(1.0 / params.sides as f64),
        cen: params.offset / scale,
        make_uvs: params.make_uvs,
        usiz: params.step_count() as f64 * params.u_wrap,
        v_wrap: params.v_wrap,
        i: 0,
        sc: 1.0,
        rt: 0.0,
    })
}

/// Generate the whole shell at once.
///
/// Convenience over [`steps`] for callers that want the materialized
/// result: all rings (grouped per loop) plus all quads.
///
/// # Errors
///
/// Same as [`steps`].
pub fn generate(
    profiles: &[ProfileLoop],
    params: &Parameters,
) -> Result<ShellGeometry, LoftError> {
    let mut rings = Vec::new();
    let mut quads = Vec::new();
    for step in steps(profiles, params)? {
        rings.push(GeneratedRing { loops: step.loops });
        quads.extend(step.quads);
    }
    Ok(ShellGeometry { rings, quads })
}

#[cfg(test)]
mod tests {
    use super::*;
    use conch_math::{Axis, Vec3};

    fn square() -> ProfileLoop {
        ProfileLoop::from_points(vec![
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ])
    }

    fn triangle() -> ProfileLoop {
        ProfileLoop::from_points(vec![
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ])
    }

    fn resolve(profiles: &[ProfileLoop], shell: &ShellGeometry, r: VertRef) -> Point3 {
        if r.ring == 0 {
            profiles[r.loop_idx].point(r.vert)
        } else {
            shell.rings[r.ring - 1].loops[r.loop_idx][r.vert]
        }
    }

    fn newell_normal(pts: &[Point3]) -> Vec3 {
        let mut n = Vec3::zeros();
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n
    }

    #[test]
    fn test_ring_and_quad_counts() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 2,
            sides: 3,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        assert_eq!(shell.rings.len(), 6);
        for ring in &shell.rings {
            assert_eq!(ring.loops.len(), 1);
            assert_eq!(ring.loops[0].len(), 4);
        }
        assert_eq!(shell.quads.len(), 6 * 4);
    }

    #[test]
    fn test_multiple_loops_share_the_progression() {
        let profiles = vec![square(), triangle()];
        let params = Parameters {
            loops: 1,
            sides: 5,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        assert_eq!(shell.rings.len(), 5);
        for ring in &shell.rings {
            assert_eq!(ring.loops.len(), 2);
            assert_eq!(ring.loops[0].len(), 4);
            assert_eq!(ring.loops[1].len(), 3);
        }
        // 5 steps × (4 + 3) quads
        assert_eq!(shell.quads.len(), 35);
    }

    #[test]
    fn test_square_taper_scenario() {
        // Unit square, axis Z, one revolution of four sides, offset 1,
        // scale 0.5: apex center sits at z = 1 / 0.5 = 2, and after the
        // full revolution the axis distance from it has halved.
        let profiles = vec![square()];
        let params = Parameters {
            axis: Axis::Z,
            loops: 1,
            sides: 4,
            offset: 1.0,
            scale: 0.5,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        assert_eq!(shell.rings.len(), 4);
        assert_eq!(shell.quads.len(), 16);

        let cen = 2.0;
        for p in &shell.rings[3].loops[0] {
            assert!(((p.z - cen).abs() - 1.0).abs() < 1e-9, "z = {}", p.z);
        }

        // Four steps of π/4 add up to a half turn at half scale:
        // (1, 1, 0) lands on (-0.5, -0.5, 1).
        let p = shell.rings[3].loops[0][0];
        assert!((p.x - -0.5).abs() < 1e-9);
        assert!((p.y - -0.5).abs() < 1e-9);
        assert!((p.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_cycle_advances_half_a_turn() {
        let profiles = vec![square()];
        let params = Parameters {
            axis: Axis::Z,
            loops: 1,
            sides: 2,
            offset: 0.0,
            scale: 1.0,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        // After the final step the accumulated rotation is π, not 2π:
        // (1, 1, 0) maps to (-1, -1, 0).
        let p = shell.rings[1].loops[0][0];
        assert!((p.x - -1.0).abs() < 1e-9);
        assert!((p.y - -1.0).abs() < 1e-9);
        assert!((p.z - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_quad_corner_topology() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 1,
            sides: 2,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();

        let q = &shell.quads[0];
        let vr = |ring, vert| VertRef { ring, loop_idx: 0, vert };
        assert_eq!(q.corners, [vr(0, 1), vr(0, 0), vr(1, 0), vr(1, 1)]);

        // Last quad of the first step wraps around the loop.
        let q = &shell.quads[3];
        assert_eq!(q.corners, [vr(0, 0), vr(0, 3), vr(1, 3), vr(1, 0)]);
    }

    #[test]
    fn test_winding_is_consistent() {
        // Counter-clockwise profile viewed along +Z: every quad's normal
        // must keep the same orientation relative to the axis, across all
        // steps.
        let profiles = vec![square()];
        let params = Parameters {
            axis: Axis::Z,
            loops: 1,
            sides: 6,
            offset: 1.0,
            scale: 0.5,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();

        let mut signs = Vec::new();
        for quad in &shell.quads {
            let pts: Vec<Point3> = quad
                .corners
                .iter()
                .map(|&c| resolve(&profiles, &shell, c))
                .collect();
            let normal = newell_normal(&pts);
            let centroid = Point3::new(
                pts.iter().map(|p| p.x).sum::<f64>() / 4.0,
                pts.iter().map(|p| p.y).sum::<f64>() / 4.0,
                0.0,
            );
            let radial = Vec3::new(centroid.x, centroid.y, 0.0);
            let dot = normal.dot(&radial);
            assert!(dot.abs() > 1e-9, "degenerate quad orientation");
            signs.push(dot.signum());
        }
        assert!(signs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_uv_boundaries() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 1,
            sides: 4,
            u_wrap: 2.0,
            v_wrap: 1.0,
            make_uvs: true,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        let usiz = 4.0 * 2.0;

        // First step, k = 0: the (front, k) corner starts at U = usiz,
        // V = 1.
        let uvs = shell.quads[0].uvs.unwrap();
        assert!((uvs[1].x - usiz).abs() < 1e-12);
        assert!((uvs[1].y - 1.0).abs() < 1e-12);
        // (front, k+1) shares U and drops V by v_wrap / nvert.
        assert!((uvs[0].x - usiz).abs() < 1e-12);
        assert!((uvs[0].y - 0.75).abs() < 1e-12);

        // Last step, last k: the (back, k+1) corner reaches U = 0,
        // V = 1 - v_wrap.
        let uvs = shell.quads[15].uvs.unwrap();
        assert!(uvs[3].x.abs() < 1e-12);
        assert!((uvs[3].y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_uvs_when_disabled() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 1,
            sides: 2,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        assert!(shell.quads.iter().all(|q| q.uvs.is_none()));
    }

    #[test]
    fn test_scale_monotonicity() {
        let profiles = vec![square()];
        let mut params = Parameters {
            axis: Axis::Z,
            loops: 2,
            sides: 4,
            offset: 1.0,
            scale: 0.5,
            make_uvs: false,
            ..Parameters::default()
        };

        let shell = generate(&profiles, &params).unwrap();
        let cen = params.offset / params.scale;
        let dists: Vec<f64> = shell
            .rings
            .iter()
            .map(|r| (r.loops[0][0].z - cen).abs())
            .collect();
        assert!(dists.windows(2).all(|w| w[1] < w[0]), "{dists:?}");

        params.scale = 1.5;
        let shell = generate(&profiles, &params).unwrap();
        let cen = params.offset / params.scale;
        let dists: Vec<f64> = shell
            .rings
            .iter()
            .map(|r| (r.loops[0][0].z - cen).abs())
            .collect();
        assert!(dists.windows(2).all(|w| w[1] > w[0]), "{dists:?}");
    }

    #[test]
    fn test_determinism() {
        let profiles = vec![square(), triangle()];
        let params = Parameters::default();
        let a = generate(&profiles, &params).unwrap();
        let b = generate(&profiles, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let params = Parameters::default();
        let shell = generate(&[], &params).unwrap();
        assert!(shell.rings.is_empty());
        assert!(shell.quads.is_empty());

        let mut walk = steps(&[], &params).unwrap();
        assert_eq!(walk.len(), 0);
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_invalid_counts_rejected() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 0,
            ..Parameters::default()
        };
        assert!(matches!(
            generate(&profiles, &params),
            Err(LoftError::InvalidLoops)
        ));

        let params = Parameters {
            sides: 0,
            ..Parameters::default()
        };
        assert!(matches!(
            generate(&profiles, &params),
            Err(LoftError::InvalidSides)
        ));
    }

    #[test]
    fn test_degenerate_scale_is_clamped_not_fatal() {
        let profiles = vec![square()];
        let params = Parameters {
            loops: 1,
            sides: 2,
            scale: 0.0,
            make_uvs: false,
            ..Parameters::default()
        };
        let shell = generate(&profiles, &params).unwrap();
        assert_eq!(shell.rings.len(), 2);
        for ring in &shell.rings {
            for p in &ring.loops[0] {
                assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{left_normal, segment_direction, signed_area};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Limits for the miter offset at each room corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsetConfig {
    /// Largest allowed offset as a multiple of the inset distance. A limit of
    /// 4.0 clips corners sharper than about 29°.
    pub max_miter_ratio: f64,
    /// `sin(halfAngle)` below which an unclamped corner is reported unstable.
    pub instability_sin: f64,
}

impl Default for InsetConfig {
    fn default() -> Self {
        Self {
            max_miter_ratio: 4.0,
            instability_sin: 1e-3,
        }
    }
}

/// Why an inset corner is not an exact miter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsetWarningKind {
    /// The edge normals cancel out (hairpin corner); the vertex was moved
    /// along the incoming edge's normal instead.
    DegenerateVertex,
    /// The miter exceeded [`InsetConfig::max_miter_ratio`] and was clamped.
    MiterClamped,
    /// The miter is close to diverging but within the configured ratio.
    Unstable,
}

/// Numeric-instability report for one vertex of an inset polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsetWarning {
    pub vertex: usize,
    /// Half of the interior angle at the vertex, in radians.
    pub half_angle: f64,
    pub kind: InsetWarningKind,
}

/// Offsets a closed outline toward its interior by `distance`.
///
/// Each vertex moves along the bisector of its two inward edge normals by
/// `distance / sin(halfAngle)`, so both adjacent edges end up exactly
/// `distance` inside the outline. Works for either winding.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` for a non-finite distance, a zero-area
/// outline, or a zero-length edge.
pub fn inset_polygon(
    outline: &[Point2],
    distance: f64,
    config: &InsetConfig,
) -> Result<(Vec<Point2>, Vec<InsetWarning>)> {
    if !distance.is_finite() {
        return Err(GeometryError::Degenerate(format!("inset distance {distance}")).into());
    }
    let winding = signed_area(outline).signum();
    if outline.len() < 3 || winding == 0.0 {
        return Err(GeometryError::Degenerate("outline encloses no area".to_owned()).into());
    }

    let inward = |dir: Vector2| left_normal(dir) * winding;
    let n = outline.len();
    let mut inset = Vec::with_capacity(n);
    let mut warnings = Vec::new();

    for i in 0..n {
        let prev = &outline[(i + n - 1) % n];
        let curr = &outline[i];
        let next = &outline[(i + 1) % n];

        let d_in = segment_direction(prev, curr)?;
        let d_out = segment_direction(curr, next)?;
        let n_in = inward(d_in);
        let n_out = inward(d_out);

        // Unsigned angle between the two edges seen from `curr`. A reflex
        // corner gives the same sine as its explementary angle.
        let back = -d_in;
        let angle = back.perp(&d_out).abs().atan2(back.dot(&d_out));
        let half_angle = angle * 0.5;

        let bisector = n_in + n_out;
        let len = bisector.norm();
        if len < 1e-9 {
            warn!(vertex = i, "inset corner folds back on itself");
            warnings.push(InsetWarning {
                vertex: i,
                half_angle,
                kind: InsetWarningKind::DegenerateVertex,
            });
            inset.push(curr + n_in * distance);
            continue;
        }

        let sin_half = half_angle.sin();
        let ratio = if sin_half > TOLERANCE { 1.0 / sin_half } else { f64::INFINITY };
        let factor = if ratio > config.max_miter_ratio {
            warn!(vertex = i, half_angle, "inset miter clamped");
            warnings.push(InsetWarning {
                vertex: i,
                half_angle,
                kind: InsetWarningKind::MiterClamped,
            });
            config.max_miter_ratio
        } else {
            if sin_half < config.instability_sin {
                warn!(vertex = i, half_angle, "inset miter numerically unstable");
                warnings.push(InsetWarning {
                    vertex: i,
                    half_angle,
                    kind: InsetWarningKind::Unstable,
                });
            }
            ratio
        };

        inset.push(curr + bisector / len * (distance * factor));
    }

    Ok((inset, warnings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::polygon_area;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn rect(w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    #[test]
    fn rectangle_inset_ccw() {
        let (inset, warnings) =
            inset_polygon(&rect(4000.0, 3000.0), 50.0, &InsetConfig::default()).unwrap();
        assert!(warnings.is_empty());
        let expected = [(50.0, 50.0), (3950.0, 50.0), (3950.0, 2950.0), (50.0, 2950.0)];
        for (p, (x, y)) in inset.iter().zip(expected) {
            assert_relative_eq!(p.x, x, epsilon = 1e-9);
            assert_relative_eq!(p.y, y, epsilon = 1e-9);
        }
        assert_relative_eq!(polygon_area(&inset), 3900.0 * 2900.0, epsilon = 1e-6);
    }

    #[test]
    fn rectangle_inset_cw_goes_inward_too() {
        let mut outline = rect(4000.0, 3000.0);
        outline.reverse();
        let (inset, _) = inset_polygon(&outline, 50.0, &InsetConfig::default()).unwrap();
        assert_relative_eq!(polygon_area(&inset), 3900.0 * 2900.0, epsilon = 1e-6);
    }

    #[test]
    fn l_shape_reflex_corner() {
        let outline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(6000.0, 0.0),
            Point2::new(6000.0, 2000.0),
            Point2::new(2000.0, 2000.0),
            Point2::new(2000.0, 6000.0),
            Point2::new(0.0, 6000.0),
        ];
        let (inset, warnings) = inset_polygon(&outline, 100.0, &InsetConfig::default()).unwrap();
        assert!(warnings.is_empty());
        assert_relative_eq!(inset[3].x, 1900.0, epsilon = 1e-9);
        assert_relative_eq!(inset[3].y, 1900.0, epsilon = 1e-9);
        assert!(polygon_area(&inset) < polygon_area(&outline));
    }

    #[test]
    fn collinear_vertex_moves_by_distance() {
        let outline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            Point2::new(2000.0, 0.0),
            Point2::new(2000.0, 1000.0),
            Point2::new(0.0, 1000.0),
        ];
        let (inset, warnings) = inset_polygon(&outline, 10.0, &InsetConfig::default()).unwrap();
        assert!(warnings.is_empty());
        assert_relative_eq!(inset[1].x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(inset[1].y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn sharp_corner_is_clamped_and_flagged() {
        let outline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10_000.0, 0.0),
            Point2::new(0.0, 500.0),
        ];
        let config = InsetConfig::default();
        let (inset, warnings) = inset_polygon(&outline, 10.0, &config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].vertex, 1);
        assert_eq!(warnings[0].kind, InsetWarningKind::MiterClamped);
        let moved = nalgebra::distance(&inset[1], &outline[1]);
        assert_relative_eq!(moved, 10.0 * config.max_miter_ratio, epsilon = 1e-9);
    }

    #[test]
    fn rejects_zero_area_outline() {
        let outline = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        assert!(inset_polygon(&outline, 1.0, &InsetConfig::default()).is_err());
    }

    proptest! {
        #[test]
        fn larger_distance_moves_every_vertex_further(
            w in 500.0f64..8000.0,
            h in 500.0f64..8000.0,
            skew in -400.0f64..400.0,
            d in 1.0f64..100.0,
            extra in 0.5f64..50.0,
        ) {
            let outline = vec![
                Point2::new(0.0, 0.0),
                Point2::new(w, 0.0),
                Point2::new(w + skew, h),
                Point2::new(skew * 0.5, h),
            ];
            let config = InsetConfig::default();
            let (near, _) = inset_polygon(&outline, d, &config).unwrap();
            let (far, _) = inset_polygon(&outline, d + extra, &config).unwrap();
            for i in 0..outline.len() {
                let a = nalgebra::distance(&near[i], &outline[i]);
                let b = nalgebra::distance(&far[i], &outline[i]);
                prop_assert!(b > a, "vertex {} offset {} not greater than {}", i, b, a);
            }
        }
    }
}

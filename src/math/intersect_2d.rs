use super::{Point2, Vector2, TOLERANCE};

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive when `a -> b -> c` turns counter-clockwise. Swapping `a` and `b`
/// negates the result exactly, so the sign is stable under endpoint swaps.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (a.x * (b.y - c.y) + b.x * (c.y - a.y)) + c.x * (a.y - b.y)
}

/// Strict proper-crossing test between segments `p1-p2` and `p3-p4`.
///
/// Each segment's endpoints must lie strictly on opposite sides of the other
/// segment's line. Touching endpoints and collinear overlap do not count.
#[must_use]
pub fn segments_intersect(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> bool {
    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Bounded segment-segment intersection in 2D, endpoints included.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments never intersect here.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.perp(&db);
    let scale = da.norm() * db.norm();
    if scale < TOLERANCE || cross.abs() < TOLERANCE * scale {
        return None;
    }

    let d: Vector2 = b0 - a0;
    let t = d.perp(&db) / cross;
    let u = d.perp(&da) / cross;

    let eps = 1e-9;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_intersect(&p(0.0, 0.0), &p(10.0, 10.0), &p(0.0, 10.0), &p(10.0, 0.0)));
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 0.0), &p(10.0, 10.0)));
    }

    #[test]
    fn t_junction_is_not_a_crossing() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, 0.0), &p(5.0, 5.0)));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 1.0), &p(3.0, -1.0)));
    }

    #[test]
    fn intersection_point_mid_span() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(10.0, 0.0), &p(4.0, -2.0), &p(4.0, 8.0))
                .unwrap();
        assert_relative_eq!(pt.x, 4.0);
        assert_relative_eq!(pt.y, 0.0);
        assert_relative_eq!(t, 0.4);
        assert_relative_eq!(u, 0.2);
    }

    #[test]
    fn intersection_point_at_shared_endpoint() {
        let (pt, _, _) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(5.0, 0.0), &p(5.0, 0.0), &p(5.0, 5.0))
                .unwrap();
        assert_relative_eq!(pt.x, 5.0);
        assert_relative_eq!(pt.y, 0.0);
    }

    #[test]
    fn parallel_segments_have_no_point() {
        assert!(
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(5.0, 0.0), &p(0.0, 1.0), &p(5.0, 1.0))
                .is_none()
        );
    }

    proptest! {
        #[test]
        fn crossing_test_is_symmetric_under_endpoint_swap(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0,
            cx in -100.0f64..100.0, cy in -100.0f64..100.0,
            dx in -100.0f64..100.0, dy in -100.0f64..100.0,
        ) {
            let (a, b, c, d) = (p(ax, ay), p(bx, by), p(cx, cy), p(dx, dy));
            prop_assert_eq!(segments_intersect(&a, &b, &c, &d), segments_intersect(&b, &a, &d, &c));
            prop_assert_eq!(segments_intersect(&a, &b, &c, &d), segments_intersect(&c, &d, &a, &b));
        }
    }
}

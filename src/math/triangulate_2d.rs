use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use super::polygon_2d::{point_in_polygon, signed_area, vertex_centroid};
use super::{Point2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Triangulates a simple polygon with a constrained Delaunay triangulation.
///
/// The outline edges are inserted as constraints and only the triangles
/// inside the outline are returned. Works for either winding.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] for fewer than 3 vertices,
/// coordinates the triangulation rejects, or outline edges that cross.
pub fn triangulate(polygon: &[Point2]) -> Result<Vec<[Point2; 3]>> {
    if polygon.len() < 3 {
        return Err(GeometryError::Degenerate("polygon needs at least 3 vertices".into()).into());
    }

    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    let mut handles = Vec::with_capacity(polygon.len());
    for p in polygon {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| GeometryError::Degenerate(format!("CDT insert: {e}")))?;
        handles.push(h);
    }
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(GeometryError::Degenerate("outline edges cross".into()).into());
        }
        cdt.add_constraint(from, to);
    }

    // Constraint edges follow the outline, so every face lies wholly inside
    // or outside it; its centroid decides which.
    let triangles = cdt
        .inner_faces()
        .map(|face| {
            face.vertices().map(|v| {
                let pos = v.position();
                Point2::new(pos.x, pos.y)
            })
        })
        .filter(|tri| {
            vertex_centroid(tri).is_some_and(|centroid| point_in_polygon(&centroid, polygon))
        })
        .collect();
    Ok(triangles)
}

/// Estimates an interior anchor point for labelling a polygon.
///
/// Quadrilaterals use the vertex centroid. Other polygons are triangulated and
/// the centroid of the largest triangle is returned, which keeps the anchor
/// away from thin wings of L-shaped rooms. Returns `None` for fewer than 3
/// vertices, zero-area input, or an outline that cannot be triangulated.
#[must_use]
pub fn visual_center(polygon: &[Point2]) -> Option<Point2> {
    if polygon.len() < 3 || signed_area(polygon).abs() < TOLERANCE {
        return None;
    }
    if polygon.len() == 4 {
        return vertex_centroid(polygon);
    }

    let best = triangulate(polygon)
        .ok()?
        .into_iter()
        .max_by(|x, y| triangle_area(x).total_cmp(&triangle_area(y)))?;
    if triangle_area(&best) < TOLERANCE {
        return None;
    }
    vertex_centroid(&best)
}

fn triangle_area(tri: &[Point2; 3]) -> f64 {
    signed_area(tri).abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::polygon_area;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn triangulation_covers_area() {
        let pts = l_shape();
        let tris = triangulate(&pts).unwrap();
        assert_eq!(tris.len(), pts.len() - 2);
        let sum: f64 = tris.iter().map(triangle_area).sum();
        assert_relative_eq!(sum, polygon_area(&pts), epsilon = 1e-9);
    }

    #[test]
    fn triangulation_skips_reflex_notch() {
        let pts = l_shape();
        for tri in triangulate(&pts).unwrap() {
            let c = vertex_centroid(&tri).unwrap();
            assert!(!(c.x > 2.0 && c.y > 2.0), "triangle {tri:?} fills the notch");
        }
    }

    #[test]
    fn triangulation_clockwise_input() {
        let mut pts = l_shape();
        pts.reverse();
        let sum: f64 = triangulate(&pts).unwrap().iter().map(triangle_area).sum();
        assert_relative_eq!(sum, 36.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_outline_is_rejected() {
        let bowtie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(-1.0, 2.0),
        ];
        assert!(triangulate(&bowtie).is_err());
    }

    #[test]
    fn rectangle_uses_vertex_centroid() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(8.0, 0.0),
            Point2::new(8.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let c = visual_center(&pts).unwrap();
        assert_relative_eq!(c.x, 4.0);
        assert_relative_eq!(c.y, 2.0);
    }

    #[test]
    fn l_shape_center_is_inside() {
        let pts = l_shape();
        let c = visual_center(&pts).unwrap();
        assert!(point_in_polygon(&c, &pts), "anchor {c:?} outside polygon");
    }

    #[test]
    fn triangle_center() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(0.0, 3.0)];
        let c = visual_center(&pts).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(visual_center(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).is_none());
        let collinear = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(visual_center(&collinear).is_none());
    }
}

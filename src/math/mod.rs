pub mod intersect_2d;
pub mod polygon_2d;
pub mod triangulate_2d;

use serde::{Deserialize, Serialize};

/// 2D point type (model-space coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance under which two intersection points or wall endpoints are
/// considered the same location.
pub const JUNCTION_TOLERANCE: f64 = 1e-3;

/// Grid step used to quantize coordinates into a [`PointKey`].
pub const KEY_QUANTUM: f64 = 1e-3;

/// Quantized integer coordinates identifying a location in the plan.
///
/// Two points that round to the same grid cell share a key, so wall endpoints
/// can be compared without formatting floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
}

impl PointKey {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_point(p: &Point2) -> Self {
        Self {
            x: (p.x / KEY_QUANTUM).round() as i64,
            y: (p.y / KEY_QUANTUM).round() as i64,
        }
    }
}

/// Returns `true` if the two points are within [`JUNCTION_TOLERANCE`].
#[must_use]
pub fn same_location(a: &Point2, b: &Point2) -> bool {
    nalgebra::distance_squared(a, b) < JUNCTION_TOLERANCE * JUNCTION_TOLERANCE
}

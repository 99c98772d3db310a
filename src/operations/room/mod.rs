mod inset;
mod order;

pub use inset::{inset_polygon, InsetConfig, InsetWarning, InsetWarningKind};
pub use order::order_loop;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::polygon_2d::polygon_area;
use crate::math::triangulate_2d::visual_center;
use crate::math::Point2;
use crate::plan::Wall;

/// A room derived from a closed loop of walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResult {
    /// Wall-centerline vertices in loop order.
    pub ordered_outline: Vec<Point2>,
    /// Interior boundary, offset inward to compensate for wall thickness.
    pub inset_polygon: Vec<Point2>,
    /// Usable floor area: the area of the inset polygon.
    pub area: f64,
    /// Anchor for the room label.
    pub visual_center: Option<Point2>,
    /// Corners whose inset is not an exact miter.
    pub warnings: Vec<InsetWarning>,
}

impl RoomResult {
    /// Returns `true` if any corner hit a near-degenerate angle.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Builds a room polygon from an unordered set of boundary walls.
///
/// `inset_distance` is the thickness compensation chosen by the caller
/// (typically half the wall thickness at the current scale).
#[derive(Debug)]
pub struct BuildRoom<'a> {
    walls: &'a [Wall],
    inset_distance: f64,
    config: InsetConfig,
}

impl<'a> BuildRoom<'a> {
    /// Creates a new room build over `walls`.
    #[must_use]
    pub fn new(walls: &'a [Wall], inset_distance: f64) -> Self {
        Self {
            walls,
            inset_distance,
            config: InsetConfig::default(),
        }
    }

    /// Sets custom miter limits.
    #[must_use]
    pub fn with_config(mut self, config: InsetConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// - `InputError` if a wall has unusable geometry
    /// - `TopologyError` if the walls do not form exactly one closed loop
    /// - `GeometryError` if the loop encloses no area
    pub fn execute(&self) -> Result<RoomResult> {
        for wall in self.walls {
            wall.validate()?;
        }

        let ordered_outline = order_loop(self.walls)?;
        let (inset_polygon, warnings) =
            inset_polygon(&ordered_outline, self.inset_distance, &self.config)?;
        let area = polygon_area(&inset_polygon);
        let center = visual_center(&inset_polygon).or_else(|| visual_center(&ordered_outline));

        Ok(RoomResult {
            ordered_outline,
            inset_polygon,
            area,
            visual_center: center,
            warnings,
        })
    }
}

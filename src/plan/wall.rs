use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::math::{Point2, TOLERANCE};

/// Identifier of a wall in the external plan store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(pub u64);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a wall is built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    #[default]
    Wall,
    Partition,
}

/// A straight wall segment, as stored by the plan.
///
/// Coordinates are model-space floats. A wall is an immutable snapshot for the
/// duration of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub thickness: f64,
    pub height: f64,
    #[serde(default)]
    pub application_type: ApplicationType,
    #[serde(default)]
    pub fill_gap_mode: bool,
    #[serde(default)]
    pub gap_fill_height: Option<f64>,
}

impl Wall {
    /// Creates a full-height wall between two points.
    #[must_use]
    pub fn new(id: u64, start: (f64, f64), end: (f64, f64), thickness: f64, height: f64) -> Self {
        Self {
            id: WallId(id),
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            thickness,
            height,
            application_type: ApplicationType::Wall,
            fill_gap_mode: false,
            gap_fill_height: None,
        }
    }

    /// Marks the wall as a partition.
    #[must_use]
    pub fn partition(mut self) -> Self {
        self.application_type = ApplicationType::Partition;
        self
    }

    /// Overrides the panel length with a gap-fill height.
    #[must_use]
    pub fn with_gap_fill(mut self, height: f64) -> Self {
        self.fill_gap_mode = true;
        self.gap_fill_height = Some(height);
        self
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        Point2::new(self.start_x, self.start_y)
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        Point2::new(self.end_x, self.end_y)
    }

    /// Centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start(), &self.end())
    }

    /// Length of the panels on this wall: the gap-fill height when gap-fill
    /// mode is on, else the wall height.
    #[must_use]
    pub fn panel_length(&self) -> f64 {
        match (self.fill_gap_mode, self.gap_fill_height) {
            (true, Some(h)) => h,
            _ => self.height,
        }
    }

    /// Checks that every numeric field is usable.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), InputError> {
        let coords = [
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("end_x", self.end_x),
            ("end_y", self.end_y),
        ];
        for (field, value) in coords {
            if !value.is_finite() {
                return Err(InputError::NonFinite { wall: self.id, field });
            }
        }

        let mut positives = vec![("thickness", self.thickness), ("height", self.height)];
        if self.fill_gap_mode {
            if let Some(h) = self.gap_fill_height {
                positives.push(("gap_fill_height", h));
            }
        }
        for (field, value) in positives {
            if !value.is_finite() {
                return Err(InputError::NonFinite { wall: self.id, field });
            }
            if value <= 0.0 {
                return Err(InputError::NonPositive {
                    wall: self.id,
                    field,
                    value,
                });
            }
        }

        if self.length() < TOLERANCE {
            return Err(InputError::ZeroLength { wall: self.id });
        }
        Ok(())
    }
}

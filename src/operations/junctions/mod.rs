mod wall_joints;

pub use wall_joints::wall_joints;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::InputError;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{same_location, Point2};
use crate::plan::{JoiningMethod, PersistedJoint, Wall, WallId};

/// Two walls meeting at a junction, with the method used to join them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallPair {
    pub wall1_id: WallId,
    pub wall2_id: WallId,
    pub joining_method: JoiningMethod,
}

impl WallPair {
    /// Returns `true` if `wall` is one of the two walls of this pair.
    #[must_use]
    pub fn involves(&self, wall: WallId) -> bool {
        self.wall1_id == wall || self.wall2_id == wall
    }
}

/// A point where two or more walls meet or cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub point: Point2,
    pub pairs: Vec<WallPair>,
}

/// Output of [`FindJunctions`].
#[derive(Debug, Clone, Default)]
pub struct JunctionSet {
    /// Junctions in order of discovery.
    pub junctions: Vec<Junction>,
    /// Walls left out of the comparison because their geometry was unusable.
    pub skipped: Vec<InputError>,
}

/// Computes every wall junction of a plan.
///
/// Each unordered pair of valid walls is intersected (shared endpoints and
/// mid-span crossings both count), intersection points within
/// [`crate::math::JUNCTION_TOLERANCE`] are merged into one junction, and each
/// pair picks up its persisted joining method, defaulting to
/// [`JoiningMethod::ButtIn`].
#[derive(Debug)]
pub struct FindJunctions<'a> {
    walls: &'a [Wall],
    joints: &'a [PersistedJoint],
}

impl<'a> FindJunctions<'a> {
    /// Creates a new junction search over `walls`, using `joints` as overrides.
    #[must_use]
    pub fn new(walls: &'a [Wall], joints: &'a [PersistedJoint]) -> Self {
        Self { walls, joints }
    }

    /// Executes the search. Recomputation on the same input is identical.
    #[must_use]
    pub fn execute(&self) -> JunctionSet {
        let mut set = JunctionSet::default();

        let valid: Vec<&Wall> = self
            .walls
            .iter()
            .filter(|w| match w.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(wall = %w.id, %err, "wall excluded from junction search");
                    set.skipped.push(err);
                    false
                }
            })
            .collect();

        for i in 0..valid.len() {
            for j in (i + 1)..valid.len() {
                let (a, b) = (valid[i], valid[j]);
                let Some(point) = wall_intersection(a, b) else {
                    continue;
                };
                let pair = WallPair {
                    wall1_id: a.id,
                    wall2_id: b.id,
                    joining_method: self.joining_method(a.id, b.id),
                };
                add_pair(&mut set.junctions, point, pair);
            }
        }

        set
    }

    fn joining_method(&self, a: WallId, b: WallId) -> JoiningMethod {
        self.joints
            .iter()
            .find(|j| j.matches(a, b))
            .map_or(JoiningMethod::default(), |j| j.joining_method)
    }
}

/// Intersection point of two wall centerlines, if any.
///
/// Parallel walls only meet when they share an endpoint.
fn wall_intersection(a: &Wall, b: &Wall) -> Option<Point2> {
    let (a0, a1, b0, b1) = (a.start(), a.end(), b.start(), b.end());
    segment_segment_intersect_2d(&a0, &a1, &b0, &b1)
        .map(|(pt, _, _)| pt)
        .or_else(|| {
            [a0, a1]
                .into_iter()
                .find(|p| same_location(p, &b0) || same_location(p, &b1))
        })
}

/// Adds a pair to the junction at `point`, creating the junction if needed.
fn add_pair(junctions: &mut Vec<Junction>, point: Point2, pair: WallPair) {
    if let Some(existing) = junctions
        .iter_mut()
        .find(|j| same_location(&j.point, &point))
    {
        existing.pairs.push(pair);
    } else {
        junctions.push(Junction {
            point,
            pairs: vec![pair],
        });
    }
}

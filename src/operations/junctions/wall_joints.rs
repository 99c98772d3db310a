use crate::math::{same_location, Point2};
use crate::plan::{JoiningMethod, JointSpec, Wall};

use super::Junction;

/// Derives the joint type of each end of `wall` from the plan's junctions.
///
/// The left end is the wall's start point and the right end its end point.
/// An end is mitred if any pair involving the wall at a junction on that end
/// is mitred. Crossings along the span do not affect either end.
#[must_use]
pub fn wall_joints(wall: &Wall, junctions: &[Junction]) -> JointSpec {
    let left = end_joint(wall, &wall.start(), junctions);
    let right = end_joint(wall, &wall.end(), junctions);
    if left == right {
        JointSpec::Uniform(left)
    } else {
        JointSpec::PerSide { left, right }
    }
}

fn end_joint(wall: &Wall, end: &Point2, junctions: &[Junction]) -> JoiningMethod {
    let mitred = junctions
        .iter()
        .filter(|j| same_location(&j.point, end))
        .flat_map(|j| j.pairs.iter())
        .filter(|p| p.involves(wall.id))
        .any(|p| p.joining_method == JoiningMethod::Cut45);
    if mitred {
        JoiningMethod::Cut45
    } else {
        JoiningMethod::ButtIn
    }
}

//! Wall and joint records fed in by the plan store.

mod joint;
mod wall;

pub use joint::{JoiningMethod, JointSpec, PersistedJoint};
pub use wall::{ApplicationType, Wall, WallId};

use serde::{Deserialize, Serialize};

use super::WallId;

/// How two walls are joined where they meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoiningMethod {
    /// Square-cut abutment.
    #[default]
    #[serde(rename = "butt_in")]
    ButtIn,
    /// Mitred corner.
    #[serde(rename = "45_cut")]
    Cut45,
}

/// A joining method saved by the user for one wall pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedJoint {
    pub wall_1: WallId,
    pub wall_2: WallId,
    pub joining_method: JoiningMethod,
}

impl PersistedJoint {
    #[must_use]
    pub fn new(wall_1: u64, wall_2: u64, joining_method: JoiningMethod) -> Self {
        Self {
            wall_1: WallId(wall_1),
            wall_2: WallId(wall_2),
            joining_method,
        }
    }

    /// Returns `true` if this joint is for the given pair, in either order.
    #[must_use]
    pub fn matches(&self, a: WallId, b: WallId) -> bool {
        (self.wall_1 == a && self.wall_2 == b) || (self.wall_1 == b && self.wall_2 == a)
    }
}

/// Joint type of a wall's two ends, as seen by the panel engine.
///
/// Resolved once at the call boundary into a per-side pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointSpec {
    Uniform(JoiningMethod),
    PerSide {
        left: JoiningMethod,
        right: JoiningMethod,
    },
}

impl JointSpec {
    /// Returns `(left, right)`.
    #[must_use]
    pub fn sides(self) -> (JoiningMethod, JoiningMethod) {
        match self {
            Self::Uniform(m) => (m, m),
            Self::PerSide { left, right } => (left, right),
        }
    }
}

impl From<JoiningMethod> for JointSpec {
    fn from(m: JoiningMethod) -> Self {
        Self::Uniform(m)
    }
}

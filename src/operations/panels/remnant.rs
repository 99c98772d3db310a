use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::debug;

use crate::math::TOLERANCE;
use crate::plan::JoiningMethod;

slotmap::new_key_type! {
    /// Key of a remnant in a [`RemnantInventory`].
    pub struct RemnantId;
}

/// Cut profile of a remnant's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "45_cut")]
    Cut45,
}

/// Leftover stock kept after a side panel was cut from a full panel.
///
/// A mitred edge makes the two faces of the piece differ by the wall
/// thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remnant {
    /// Creation order within the session; also the remnant's display id.
    pub order: u64,
    pub wall_thickness: f64,
    pub longer_face: f64,
    pub shorter_face: f64,
    pub left_edge: EdgeType,
    pub right_edge: EdgeType,
}

impl Remnant {
    fn is_usable(&self) -> bool {
        self.longer_face > TOLERANCE && self.shorter_face > TOLERANCE
    }

    fn fits(&self, needed: f64, wall_thickness: f64, joint: JoiningMethod) -> bool {
        if (self.wall_thickness - wall_thickness).abs() > TOLERANCE {
            return false;
        }
        match joint {
            JoiningMethod::Cut45 => self.longer_face >= needed,
            JoiningMethod::ButtIn => {
                self.right_edge == EdgeType::Straight && self.shorter_face >= needed
            }
        }
    }

    /// Shrinks this remnant after a piece of `width` was taken from it.
    fn take(&mut self, width: f64, wall_thickness: f64, joint: JoiningMethod) {
        match (joint, self.left_edge) {
            (JoiningMethod::Cut45, EdgeType::Cut45) => {
                // The existing mitre is consumed by the new piece.
                self.longer_face -= width;
                self.shorter_face = self.longer_face;
                self.left_edge = EdgeType::Straight;
            }
            (JoiningMethod::Cut45, EdgeType::Straight) => {
                self.longer_face = self.longer_face - width + wall_thickness;
                self.shorter_face = self.longer_face - wall_thickness;
                self.left_edge = EdgeType::Cut45;
            }
            (JoiningMethod::ButtIn, _) => {
                self.longer_face -= width;
                self.shorter_face -= width;
                self.right_edge = EdgeType::Straight;
            }
        }
    }
}

/// Session-scoped store of remnants, scanned in creation order.
#[derive(Debug, Default)]
pub struct RemnantInventory {
    remnants: SlotMap<RemnantId, Remnant>,
    order: Vec<RemnantId>,
    next_order: u64,
}

impl RemnantInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RemnantId) -> Option<&Remnant> {
        self.remnants.get(id)
    }

    /// Iterates remnants oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (RemnantId, &Remnant)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.remnants.get(id).map(|r| (id, r)))
    }

    /// First remnant (oldest first) that can supply a piece of `needed` width.
    ///
    /// A mitred piece only needs the longer face to be long enough; a square
    /// piece needs a straight right edge and a long enough shorter face.
    #[must_use]
    pub fn find_compatible(
        &self,
        needed: f64,
        wall_thickness: f64,
        joint: JoiningMethod,
    ) -> Option<RemnantId> {
        self.iter()
            .find(|(_, r)| r.fits(needed, wall_thickness, joint))
            .map(|(id, _)| id)
    }

    /// Cuts a piece from an existing remnant, then drops exhausted remnants.
    ///
    /// Returns `false` if `id` is no longer in the inventory.
    pub fn cut(
        &mut self,
        id: RemnantId,
        width: f64,
        wall_thickness: f64,
        joint: JoiningMethod,
    ) -> bool {
        let Some(remnant) = self.remnants.get_mut(id) else {
            return false;
        };
        remnant.take(width, wall_thickness, joint);
        debug!(
            remnant = remnant.order,
            width,
            longer = remnant.longer_face,
            shorter = remnant.shorter_face,
            "reused remnant"
        );
        self.purge();
        true
    }

    /// Records the unused part of a fresh stock panel of `stock_width` after a
    /// piece of `width` was cut from it. Returns `None` if nothing usable is
    /// left over.
    pub fn spawn(
        &mut self,
        stock_width: f64,
        width: f64,
        wall_thickness: f64,
        joint: JoiningMethod,
    ) -> Option<RemnantId> {
        let (longer_face, shorter_face, left_edge) = match joint {
            JoiningMethod::Cut45 => {
                let longer = stock_width - width + wall_thickness;
                (longer, longer - wall_thickness, EdgeType::Cut45)
            }
            JoiningMethod::ButtIn => {
                let face = stock_width - width;
                (face, face, EdgeType::Straight)
            }
        };
        let remnant = Remnant {
            order: self.next_order,
            wall_thickness,
            longer_face,
            shorter_face,
            left_edge,
            right_edge: EdgeType::Straight,
        };
        self.next_order += 1;

        if !remnant.is_usable() {
            debug!(width, "stock fully consumed, no remnant");
            return None;
        }
        debug!(
            remnant = remnant.order,
            longer = longer_face,
            shorter = shorter_face,
            "new remnant"
        );
        let id = self.remnants.insert(remnant);
        self.order.push(id);
        Some(id)
    }

    /// Removes remnants with a non-positive face.
    pub fn purge(&mut self) {
        let remnants = &mut self.remnants;
        self.order.retain(|&id| {
            let keep = remnants.get(id).is_some_and(Remnant::is_usable);
            if !keep {
                if let Some(r) = remnants.remove(id) {
                    debug!(remnant = r.order, "remnant used up");
                }
            }
            keep
        });
    }

    /// Empties the inventory and restarts creation order.
    pub fn clear(&mut self) {
        self.remnants.clear();
        self.order.clear();
        self.next_order = 0;
    }

    /// Snapshot of the inventory, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Remnant> {
        self.iter().map(|(_, r)| r.clone()).collect()
    }
}

mod config;
mod remnant;

pub use config::{HeightRule, PanelConfig};
pub use remnant::{EdgeType, Remnant, RemnantId, RemnantInventory};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::InputError;
use crate::math::TOLERANCE;
use crate::plan::{JoiningMethod, JointSpec, Wall, WallId};

/// Kind of a panel in a wall's cutting plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    /// Uncut stock panel.
    Full,
    /// Piece cut from a fresh stock panel.
    Side,
    /// Piece cut from a remnant of an earlier cut.
    Leftover,
}

/// Where a cut panel sits along its wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    Left,
    Right,
    Center,
}

/// Why a panel deviates from the plain full/side layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationNote {
    /// A short remainder was merged with the last full panel and split into
    /// two side panels.
    SplitOptimized,
    /// Width was moved between a full panel and the side panel.
    ToleranceAdjusted,
    /// The wall is narrower than the minimum panel width; the panel is wider
    /// than the wall.
    PolicyCompromise,
}

/// One piece of stock in a wall's cutting plan. Never mutated once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub wall_id: Option<WallId>,
    /// Cut width along the wall.
    pub width: f64,
    /// Width actually covered on the wall, when it differs from `width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_width: Option<f64>,
    pub length: f64,
    #[serde(rename = "type")]
    pub panel_type: PanelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PanelPosition>,
    pub joint_type: JoiningMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_note: Option<OptimizationNote>,
}

impl Panel {
    fn full(width: f64, length: f64) -> Self {
        Self {
            wall_id: None,
            width,
            actual_width: None,
            length,
            panel_type: PanelType::Full,
            position: None,
            joint_type: JoiningMethod::ButtIn,
            optimization_note: None,
        }
    }

    /// Width this panel covers on the wall.
    #[must_use]
    pub fn covered_width(&self) -> f64 {
        self.actual_width.unwrap_or(self.width)
    }

    /// Returns `true` if the panel is wider than the wall it was made for.
    #[must_use]
    pub fn is_policy_compromise(&self) -> bool {
        self.optimization_note == Some(OptimizationNote::PolicyCompromise)
    }
}

/// Running panel counts of one calculation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelAnalysis {
    /// Uncut stock panels placed on walls.
    pub full_panels: usize,
    /// Pieces cut from fresh stock.
    pub cut_panels: usize,
    /// Pieces cut from remnants.
    pub leftover_panels: usize,
    /// Fresh stock panels consumed to cut pieces.
    pub full_panels_used_for_cutting: usize,
    /// All panels placed on walls.
    pub total_panels: usize,
}

impl PanelAnalysis {
    /// Stock panels that have to be ordered.
    #[must_use]
    pub fn stock_panels(&self) -> usize {
        self.full_panels + self.full_panels_used_for_cutting
    }
}

/// Allocates wall lengths to fixed-width stock panels.
///
/// One engine is one calculation session: remnants left by earlier walls are
/// reused by later ones, so walls must be fed in plan order and the engine
/// must not be shared between concurrent runs.
#[derive(Debug, Default)]
pub struct PanelCuttingEngine {
    config: PanelConfig,
    inventory: RemnantInventory,
    analysis: PanelAnalysis,
}

impl PanelCuttingEngine {
    /// Creates a new session with the given stock parameters.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            inventory: RemnantInventory::new(),
            analysis: PanelAnalysis::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn analysis(&self) -> PanelAnalysis {
        self.analysis
    }

    #[must_use]
    pub fn remnants(&self) -> &RemnantInventory {
        &self.inventory
    }

    /// Drops all remnants and counters.
    pub fn reset(&mut self) {
        self.inventory.clear();
        self.analysis = PanelAnalysis::default();
    }

    /// Computes the panels of one wall record.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the wall geometry is unusable.
    pub fn calculate_wall(
        &mut self,
        wall: &Wall,
        joints: JointSpec,
    ) -> Result<Vec<Panel>, InputError> {
        wall.validate()?;
        let mut panels =
            self.calculate_panels(wall.length(), wall.thickness, joints, wall.panel_length())?;
        for panel in &mut panels {
            panel.wall_id = Some(wall.id);
        }
        Ok(panels)
    }

    /// Splits a wall of `wall_length` into full and cut panels, left to right.
    ///
    /// The covered widths always add up to `wall_length`, except for walls
    /// narrower than the minimum panel width (see
    /// [`OptimizationNote::PolicyCompromise`]).
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidDimension` if any dimension is not a
    /// positive finite number.
    pub fn calculate_panels(
        &mut self,
        wall_length: f64,
        wall_thickness: f64,
        joints: impl Into<JointSpec>,
        wall_height: f64,
    ) -> Result<Vec<Panel>, InputError> {
        for (field, value) in [
            ("wall_length", wall_length),
            ("wall_thickness", wall_thickness),
            ("wall_height", wall_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::InvalidDimension { field, value });
            }
        }

        let joints: JointSpec = joints.into();
        let (left, right) = joints.sides();
        let stock = self.config.max_panel_width;
        let rule = self.config.rule_for(wall_height);

        let (full_count, remaining) = split_stock(wall_length, stock);

        let cut = Cut {
            thickness: wall_thickness,
            length: wall_height,
        };

        let panels = if remaining == 0.0 {
            self.full_run(full_count, wall_height)
        } else if remaining < rule.min_panel_width {
            if full_count > 0 {
                self.split_with_last_full(full_count, remaining, cut, left, right)
            } else {
                self.forced_minimum(rule.min_panel_width, wall_length, cut, left, right)
            }
        } else if remaining <= rule.threshold {
            self.single_side(full_count, remaining, cut, left, right)
        } else {
            self.two_sides(full_count, remaining, cut, left, right)
        };

        self.analysis.total_panels += panels.len();
        Ok(panels)
    }

    fn full_run(&mut self, count: usize, length: f64) -> Vec<Panel> {
        self.analysis.full_panels += count;
        vec![Panel::full(self.config.max_panel_width, length); count]
    }

    /// Short remainder: give back the last full panel and split it together
    /// with the remainder into two near-equal side panels.
    fn split_with_last_full(
        &mut self,
        full_count: usize,
        remaining: f64,
        cut: Cut,
        left: JoiningMethod,
        right: JoiningMethod,
    ) -> Vec<Panel> {
        let combined = self.config.max_panel_width + remaining;
        let left_width = (combined / 2.0).floor();
        let right_width = combined - left_width;

        let mut panels = Vec::with_capacity(full_count + 1);
        let note = Some(OptimizationNote::SplitOptimized);
        panels.push(self.cut_piece(left_width, cut, left, PanelPosition::Left, note));
        panels.extend(self.full_run(full_count - 1, cut.length));
        panels.push(self.cut_piece(right_width, cut, right, PanelPosition::Right, note));
        panels
    }

    // TODO: confirm with product whether walls shorter than the minimum
    // panel width should get a panel cut to the wall length instead.
    fn forced_minimum(
        &mut self,
        min_panel_width: f64,
        wall_length: f64,
        cut: Cut,
        left: JoiningMethod,
        right: JoiningMethod,
    ) -> Vec<Panel> {
        warn!(wall_length, min_panel_width, "wall shorter than minimum panel width");
        let joint = if left == JoiningMethod::Cut45 || right == JoiningMethod::Cut45 {
            JoiningMethod::Cut45
        } else {
            JoiningMethod::ButtIn
        };
        vec![self.cut_piece(
            min_panel_width,
            cut,
            joint,
            PanelPosition::Center,
            Some(OptimizationNote::PolicyCompromise),
        )]
    }

    /// Medium remainder: one side panel, widened by the tolerance adjustment
    /// taken from the full panel at the other end.
    fn single_side(
        &mut self,
        full_count: usize,
        remaining: f64,
        cut: Cut,
        left: JoiningMethod,
        right: JoiningMethod,
    ) -> Vec<Panel> {
        let adjustment = if full_count > 0 {
            self.config.tolerance_adjustment
        } else {
            0.0
        };
        let width = remaining + adjustment;

        let (position, joint) = if left == right {
            (PanelPosition::Right, right)
        } else {
            let mitred_side = if left == JoiningMethod::Cut45 {
                PanelPosition::Left
            } else {
                PanelPosition::Right
            };
            let has_remnant = self
                .inventory
                .find_compatible(width, cut.thickness, JoiningMethod::Cut45)
                .is_some();
            if has_remnant {
                (mitred_side, JoiningMethod::Cut45)
            } else {
                let square_side = if mitred_side == PanelPosition::Left {
                    PanelPosition::Right
                } else {
                    PanelPosition::Left
                };
                (square_side, JoiningMethod::ButtIn)
            }
        };

        let note = (adjustment > 0.0).then_some(OptimizationNote::ToleranceAdjusted);
        let side = self.cut_piece(width, cut, joint, position, note);
        let mut fulls = self.full_run(full_count, cut.length);
        if adjustment > 0.0 {
            let opposite = if position == PanelPosition::Left {
                fulls.last_mut()
            } else {
                fulls.first_mut()
            };
            if let Some(full) = opposite {
                full.actual_width = Some(full.width - adjustment);
                full.optimization_note = Some(OptimizationNote::ToleranceAdjusted);
            }
        }

        if position == PanelPosition::Left {
            std::iter::once(side).chain(fulls).collect()
        } else {
            fulls.push(side);
            fulls
        }
    }

    /// Large remainder: split evenly into a side panel at each end.
    fn two_sides(
        &mut self,
        full_count: usize,
        remaining: f64,
        cut: Cut,
        left: JoiningMethod,
        right: JoiningMethod,
    ) -> Vec<Panel> {
        let left_width = (remaining / 2.0).floor();
        let right_width = remaining - left_width;

        let mut panels = Vec::with_capacity(full_count + 2);
        panels.push(self.cut_piece(left_width, cut, left, PanelPosition::Left, None));
        panels.extend(self.full_run(full_count, cut.length));
        panels.push(self.cut_piece(right_width, cut, right, PanelPosition::Right, None));
        panels
    }

    /// Cuts one piece, from a compatible remnant when there is one, else from
    /// fresh stock whose unused part becomes a new remnant.
    fn cut_piece(
        &mut self,
        width: f64,
        cut: Cut,
        joint: JoiningMethod,
        position: PanelPosition,
        note: Option<OptimizationNote>,
    ) -> Panel {
        let panel_type = match self.inventory.find_compatible(width, cut.thickness, joint) {
            Some(id) => {
                self.inventory.cut(id, width, cut.thickness, joint);
                self.analysis.leftover_panels += 1;
                PanelType::Leftover
            }
            None => {
                debug!(width, ?joint, "cutting from new stock");
                self.inventory
                    .spawn(self.config.max_panel_width, width, cut.thickness, joint);
                self.analysis.cut_panels += 1;
                self.analysis.full_panels_used_for_cutting += 1;
                PanelType::Side
            }
        };
        Panel {
            wall_id: None,
            width,
            actual_width: None,
            length: cut.length,
            panel_type,
            position: Some(position),
            joint_type: joint,
            optimization_note: note,
        }
    }
}

/// Per-wall inputs shared by every piece cut for that wall.
#[derive(Debug, Clone, Copy)]
struct Cut {
    thickness: f64,
    length: f64,
}

/// Relative length noise absorbed when matching a wall against whole stock
/// widths.
const LENGTH_SNAP: f64 = 1e-9;

/// Number of whole stock panels in `wall_length` and the remainder.
///
/// Remainders within float noise of zero or of a full stock width snap to
/// zero, so walls derived from rotated coordinates still fill exactly.
fn split_stock(wall_length: f64, stock: f64) -> (usize, f64) {
    let snap = TOLERANCE.max(wall_length * LENGTH_SNAP);
    let mut remaining = wall_length % stock;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut full_count = ((wall_length - remaining) / stock).round() as usize;
    if remaining < snap {
        remaining = 0.0;
    } else if stock - remaining < snap {
        remaining = 0.0;
        full_count += 1;
    }
    (full_count, remaining)
}

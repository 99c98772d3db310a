use std::fmt::Display;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{info, warn};

use crate::error::InputError;
use crate::plan::{JointSpec, PersistedJoint, Wall, WallId};

use super::junctions::{wall_joints, FindJunctions, Junction};
use super::panels::{Panel, PanelAnalysis, PanelConfig, PanelCuttingEngine, Remnant};

/// Cutting plan of one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallPanels {
    pub wall_id: WallId,
    pub joints: JointSpec,
    pub panels: Vec<Panel>,
}

/// A wall that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallFailure {
    pub wall_id: WallId,
    #[serde(serialize_with = "serialize_display")]
    pub error: InputError,
}

fn serialize_display<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of a plan-wide calculation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanReport {
    pub junctions: Vec<Junction>,
    /// Per-wall panels, in plan order.
    pub walls: Vec<WallPanels>,
    /// Walls skipped for invalid input.
    pub failures: Vec<WallFailure>,
    pub analysis: PanelAnalysis,
    /// Remnants left over at the end of the pass, oldest first.
    pub remnants: Vec<Remnant>,
}

impl PlanReport {
    /// All panels of the plan, in plan order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.walls.iter().flat_map(|w| w.panels.iter())
    }
}

/// Runs junction detection and panel cutting over a whole plan.
///
/// Walls are processed strictly in the given order with a single engine, so
/// remnants from earlier walls feed later ones. Reordering the walls can
/// change the result.
#[derive(Debug)]
pub struct CalculatePlan<'a> {
    walls: &'a [Wall],
    joints: &'a [PersistedJoint],
    config: PanelConfig,
}

impl<'a> CalculatePlan<'a> {
    /// Creates a new plan pass with default stock parameters.
    #[must_use]
    pub fn new(walls: &'a [Wall], joints: &'a [PersistedJoint]) -> Self {
        Self {
            walls,
            joints,
            config: PanelConfig::default(),
        }
    }

    /// Sets custom stock parameters.
    #[must_use]
    pub fn with_config(mut self, config: PanelConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the pass. Invalid walls are reported in
    /// [`PlanReport::failures`] without stopping the others.
    #[must_use]
    pub fn execute(&self) -> PlanReport {
        let junctions = FindJunctions::new(self.walls, self.joints).execute().junctions;
        let mut engine = PanelCuttingEngine::new(self.config);
        let mut report = PlanReport::default();

        for wall in self.walls {
            let joints = wall_joints(wall, &junctions);
            match engine.calculate_wall(wall, joints) {
                Ok(panels) => report.walls.push(WallPanels {
                    wall_id: wall.id,
                    joints,
                    panels,
                }),
                Err(error) => {
                    warn!(wall = %wall.id, %error, "wall skipped");
                    report.failures.push(WallFailure {
                        wall_id: wall.id,
                        error,
                    });
                }
            }
        }

        report.analysis = engine.analysis();
        report.remnants = engine.remnants().to_vec();
        report.junctions = junctions;
        info!(
            walls = report.walls.len(),
            failed = report.failures.len(),
            total_panels = report.analysis.total_panels,
            stock_panels = report.analysis.stock_panels(),
            "plan calculated"
        );
        report
    }
}

mod calculate_plan;
pub mod junctions;
pub mod panels;
pub mod room;
mod summary;

pub use calculate_plan::{CalculatePlan, PlanReport, WallFailure, WallPanels};
pub use junctions::FindJunctions;
pub use panels::PanelCuttingEngine;
pub use room::BuildRoom;
pub use summary::{MaterialLine, MaterialSummary};

//! Computes junctions, rooms and panel cutting plans for a plan file.
//!
//! ```text
//! RUST_LOG=wallpanel=debug cargo run --example plan -- demos/plan/sample.json
//! ```

use std::error::Error;
use std::fs;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use wallpanel::operations::panels::PanelConfig;
use wallpanel::operations::{BuildRoom, CalculatePlan, MaterialSummary};
use wallpanel::plan::{PersistedJoint, Wall, WallId};

#[derive(Debug, Deserialize)]
struct PlanFile {
    walls: Vec<Wall>,
    #[serde(default)]
    joints: Vec<PersistedJoint>,
    #[serde(default)]
    config: PanelConfig,
    /// Each room is a list of wall ids closing a loop.
    #[serde(default)]
    rooms: Vec<Vec<WallId>>,
    #[serde(default = "default_inset")]
    inset_distance: f64,
}

fn default_inset() -> f64 {
    50.0
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/plan/sample.json".to_owned());
    let plan: PlanFile = serde_json::from_str(&fs::read_to_string(&path)?)?;

    let report = CalculatePlan::new(&plan.walls, &plan.joints)
        .with_config(plan.config)
        .execute();

    println!("=== {} junctions ===", report.junctions.len());
    for j in &report.junctions {
        let pairs: Vec<String> = j
            .pairs
            .iter()
            .map(|p| format!("{}-{} {:?}", p.wall1_id, p.wall2_id, p.joining_method))
            .collect();
        println!("  ({:.1}, {:.1}): {}", j.point.x, j.point.y, pairs.join(", "));
    }

    for (i, ids) in plan.rooms.iter().enumerate() {
        let walls: Vec<Wall> = plan
            .walls
            .iter()
            .filter(|w| ids.contains(&w.id))
            .cloned()
            .collect();
        match BuildRoom::new(&walls, plan.inset_distance).execute() {
            Ok(room) => println!(
                "room {i}: {} vertices, area {:.0}{}",
                room.ordered_outline.len(),
                room.area,
                if room.is_unstable() { " (unstable corners)" } else { "" }
            ),
            Err(err) => println!("room {i}: {err}"),
        }
    }

    println!("=== panels ===");
    for wall in &report.walls {
        println!("  wall {} {:?}", wall.wall_id, wall.joints);
        for p in &wall.panels {
            println!(
                "    {:?} {:.0} x {:.0}{}{}",
                p.panel_type,
                p.covered_width(),
                p.length,
                p.position.map(|pos| format!(" {pos:?}")).unwrap_or_default(),
                p.optimization_note.map(|n| format!(" [{n:?}]")).unwrap_or_default(),
            );
        }
    }
    for failure in &report.failures {
        println!("  skipped: {}", failure.error);
    }

    let summary = MaterialSummary::from_report(&report);
    println!("=== material ({} stock panels) ===", summary.stock_panels);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

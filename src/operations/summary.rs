use std::collections::BTreeMap;

use serde::Serialize;

use super::calculate_plan::PlanReport;
use super::panels::{Panel, PanelType};

/// Panels of one size and kind, counted over a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLine {
    pub panel_type: PanelType,
    pub width: f64,
    pub length: f64,
    pub count: usize,
}

/// Cutting list of a calculated plan, grouped by kind, width and length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialSummary {
    /// Sorted by kind, then width, then length.
    pub lines: Vec<MaterialLine>,
    /// Stock panels to order: full panels plus the ones consumed by cuts.
    pub stock_panels: usize,
}

impl MaterialSummary {
    #[must_use]
    pub fn from_report(report: &PlanReport) -> Self {
        let mut groups: BTreeMap<(PanelType, u64, u64), MaterialLine> = BTreeMap::new();
        for panel in report.panels() {
            groups
                .entry(group_key(panel))
                .and_modify(|line| line.count += 1)
                .or_insert(MaterialLine {
                    panel_type: panel.panel_type,
                    width: panel.width,
                    length: panel.length,
                    count: 1,
                });
        }
        Self {
            lines: groups.into_values().collect(),
            stock_panels: report.analysis.stock_panels(),
        }
    }
}

/// Orders positive dimensions by their bit patterns, which sort like the
/// values themselves.
fn group_key(panel: &Panel) -> (PanelType, u64, u64) {
    (panel.panel_type, panel.width.to_bits(), panel.length.to_bits())
}

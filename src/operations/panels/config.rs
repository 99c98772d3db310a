use serde::{Deserialize, Serialize};

/// Remainder limits that apply to one wall-height class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRule {
    /// Largest remainder still covered by a single side panel.
    pub threshold: f64,
    /// Narrowest panel that may be cut.
    pub min_panel_width: f64,
}

/// Stock and policy parameters of the panel cutting engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Width of one stock panel.
    pub max_panel_width: f64,
    /// Walls at least this tall use [`PanelConfig::tall`].
    pub tall_wall_height: f64,
    pub short: HeightRule,
    pub tall: HeightRule,
    /// Width moved from a full panel to a single side panel for fabrication
    /// tolerance.
    pub tolerance_adjustment: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            max_panel_width: 1150.0,
            tall_wall_height: 5000.0,
            short: HeightRule {
                threshold: 600.0,
                min_panel_width: 300.0,
            },
            tall: HeightRule {
                threshold: 1000.0,
                min_panel_width: 500.0,
            },
            tolerance_adjustment: 20.0,
        }
    }
}

impl PanelConfig {
    /// Height class of a wall.
    #[must_use]
    pub fn rule_for(&self, wall_height: f64) -> HeightRule {
        if wall_height < self.tall_wall_height {
            self.short
        } else {
            self.tall
        }
    }
}

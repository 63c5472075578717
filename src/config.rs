//! Simulator configuration.
//!
//! The host page may POST a JSON document to `/api/ark/config`; every field is
//! optional and falls back to the defaults below. Icon templates are consumed
//! once, when the catalogue is loaded; the rest is read by the engine.

use serde::{Deserialize, Serialize};

use crate::ark::category::Category;
use crate::error::Result;

/// Largest accepted bulk step. No node goes anywhere near this high.
pub const MAX_BULK_STEP: u32 = 1000;

const ICON_BASE: &str = "https://cdn-lostark.game.onstove.com/efui_iconatlas";

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Level step of the bulk (modifier) buttons.
    #[serde(default = "default_bulk_step")]
    pub bulk_step: u32,
    /// Point summary label; `{points}` and `{category}` are substituted.
    #[serde(default = "default_point_label")]
    pub point_label: String,
    #[serde(default)]
    pub icons: IconTemplates,
    #[serde(default)]
    pub costs: CostTable,
}

fn default_bulk_step() -> u32 { 10 }
fn default_point_label() -> String { "{points}포인트".into() }

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bulk_step: default_bulk_step(),
            point_label: default_point_label(),
            icons: IconTemplates::default(),
            costs: CostTable::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: SimConfig = serde_json::from_str(json)?;
        if config.bulk_step == 0 {
            config.bulk_step = default_bulk_step();
        }
        config.bulk_step = config.bulk_step.min(MAX_BULK_STEP);
        Ok(config)
    }

    /// Bulk step as a signed delta; always in `1..=MAX_BULK_STEP`.
    pub fn step(&self) -> i32 {
        i32::try_from(self.bulk_step.clamp(1, MAX_BULK_STEP)).unwrap_or(i32::MAX)
    }

    /// Render the point summary label for a category.
    pub fn format_points(&self, category: Category, points: u32) -> String {
        self.point_label
            .replace("{points}", &points.to_string())
            .replace("{category}", category.label())
    }
}

/// URL templates for node icons, keyed by the shape of the icon id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTemplates {
    /// Evolution nodes, `{id}`.
    pub evolution: String,
    /// Ids without an underscore, `{id}`.
    pub single: String,
    /// `folder_suffix` ids.
    pub pair: String,
    /// Ids with more than two underscore-separated parts.
    pub composite: String,
    /// Used when the catalogue carries no icon id.
    pub fallback: String,
}

impl Default for IconTemplates {
    fn default() -> Self {
        Self {
            evolution: format!("{ICON_BASE}/ark_passive_evolution/ark_passive_evolution_{{id}}.png"),
            single: format!("{ICON_BASE}/ark_passive_01/ark_passive_01_{{id}}.png"),
            pair: format!("{ICON_BASE}/ark_passive_{{folder}}/ark_passive_{{folder}}_{{suffix}}.png"),
            composite: format!("{ICON_BASE}/{{folder}}/{{folder}}_{{suffix}}.png"),
            fallback: format!("{ICON_BASE}/ark_passive_evolution/ark_passive_evolution_1_1.png"),
        }
    }
}

/// Points spent per node level, by category and tier (index 0 = tier 1).
/// A catalogue node's own `cost` overrides this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    pub evolution: [u32; 5],
    pub enlightenment: [u32; 5],
    pub leap: [u32; 5],
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            evolution: [1, 10, 10, 10, 15],
            enlightenment: [1, 1, 1, 1, 1],
            leap: [1, 1, 1, 1, 1],
        }
    }
}

impl CostTable {
    /// Per-level cost for a tier. Out-of-range tiers cost nothing.
    pub fn per_level(&self, category: Category, tier: u8) -> u32 {
        let row = match category {
            Category::Evolution => &self.evolution,
            Category::Enlightenment => &self.enlightenment,
            Category::Leap => &self.leap,
        };
        tier.checked_sub(1)
            .and_then(|i| row.get(i as usize))
            .copied()
            .unwrap_or(0)
    }
}

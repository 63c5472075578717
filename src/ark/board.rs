//! Simulation state: one Ark Passive board as a plain value.
//!
//! A `Board` is what the engine keeps twice: the baseline reported by the
//! armory and the working copy the user edits. Levels are typed; an
//! allocation's effect description is regenerated from its level on every
//! write and is never read back once the baseline has been imported.

use serde::{Deserialize, Serialize};

use crate::ark::catalogue::{ClassCatalogue, MasterNode, NodeKey};
use crate::ark::category::Category;
use crate::ark::codec;
use crate::ark::snapshot::{Effect, PointSummary, Snapshot};
use crate::config::SimConfig;

/// An active effect on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// `None` for armory effects that match no catalogue node. Those are
    /// carried through untouched.
    pub key: Option<NodeKey>,
    pub level: u32,
    pub effect: Effect,
}

/// Level change of one node between two boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDelta {
    pub category: Category,
    pub node: String,
    #[serde(default)]
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    allocations: Vec<Allocation>,
    /// Indexed by `Category::index()`.
    points: [PointSummary; 3],
}

impl Board {
    /// Import an armory snapshot, binding each effect to its catalogue node.
    ///
    /// Nodes are visited in catalogue order and each claims the first
    /// unclaimed effect whose description contains its name.
    pub fn resolve(snapshot: &Snapshot, catalogue: &ClassCatalogue, config: &SimConfig) -> Self {
        let effects = &snapshot.effects;
        let mut claimed: Vec<Option<(NodeKey, u32)>> = vec![None; effects.len()];
        let mut dropped = vec![false; effects.len()];

        for node in catalogue.nodes() {
            let hit = effects.iter().enumerate().find(|(i, e)| {
                claimed[*i].is_none()
                    && !dropped[*i]
                    && codec::effect_matches_node(e, &node.name, node.category)
            });
            let Some((i, effect)) = hit else { continue };
            let level = codec::extract_level(&effect.description);
            if level == 0 {
                tracing::warn!("ark: dropping {} {} with no level", node.category, node.name);
                dropped[i] = true;
                continue;
            }
            claimed[i] = Some((node.key(), level));
        }

        let mut allocations = Vec::with_capacity(effects.len());
        for (i, effect) in effects.iter().enumerate() {
            if dropped[i] {
                continue;
            }
            match claimed[i].take() {
                Some((key, level)) => {
                    let mut alloc = Allocation { key: Some(key), level, effect: effect.clone() };
                    if let Some(node) = alloc.key.as_ref().and_then(|k| catalogue.node(k)) {
                        if level > node.max {
                            tracing::warn!(
                                "ark: {} {} at Lv.{} exceeds max {}, clamping",
                                node.category,
                                node.name,
                                level,
                                node.max
                            );
                            alloc.level = node.max;
                            alloc.effect.description = codec::with_level(&effect.description, node.max);
                        }
                    }
                    if alloc.level > 0 {
                        allocations.push(alloc);
                    }
                }
                None => {
                    tracing::debug!("ark: unresolved effect {:?}", effect.description);
                    allocations.push(Allocation { key: None, level: 0, effect: effect.clone() });
                }
            }
        }

        let mut board = Board { allocations, points: empty_points() };
        let mut reported = [false; 3];
        for record in &snapshot.points {
            match PointSummary::from_record(record) {
                Some(summary) => {
                    let idx = summary.category.index();
                    reported[idx] = true;
                    board.points[idx] = summary;
                }
                None => tracing::warn!("ark: ignoring points for {:?}", record.name),
            }
        }
        for category in Category::ALL {
            if !reported[category.index()] {
                board.recompute_points(category, catalogue, config);
            }
        }
        board
    }

    /// Current level of a node, 0 when inactive.
    pub fn level_of(&self, key: &NodeKey) -> u32 {
        self.allocation(key).map_or(0, |a| a.level)
    }

    pub fn is_active(&self, key: &NodeKey) -> bool {
        self.allocation(key).is_some()
    }

    pub fn points_for(&self, category: Category) -> &PointSummary {
        &self.points[category.index()]
    }

    pub fn points(&self) -> &[PointSummary] {
        &self.points
    }

    pub fn effect_for(&self, key: &NodeKey) -> Option<&Effect> {
        self.allocation(key).map(|a| &a.effect)
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Project back to the wire shape.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            effects: self.allocations.iter().map(|a| a.effect.clone()).collect(),
            points: self.points.iter().map(PointSummary::to_record).collect(),
        }
    }

    /// Nodes whose level differs from `baseline`, in catalogue order.
    pub fn diff(&self, baseline: &Board, catalogue: &ClassCatalogue) -> Vec<LevelDelta> {
        catalogue
            .nodes()
            .iter()
            .filter_map(|node| {
                let key = node.key();
                let from = baseline.level_of(&key);
                let to = self.level_of(&key);
                (from != to).then(|| LevelDelta {
                    category: node.category,
                    node: node.name.clone(),
                    from,
                    to,
                })
            })
            .collect()
    }

    fn allocation(&self, key: &NodeKey) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.key.as_ref() == Some(key))
    }

    /// Write a node's level. 0 removes the effect; a new effect is appended.
    pub(crate) fn write_level(&mut self, node: &MasterNode, level: u32) {
        let key = node.key();
        let pos = self.allocations.iter().position(|a| a.key.as_ref() == Some(&key));
        match (pos, level) {
            (Some(i), 0) => {
                self.allocations.remove(i);
            }
            (None, 0) => {}
            (Some(i), _) => {
                let alloc = &mut self.allocations[i];
                alloc.level = level;
                alloc.effect.description = codec::with_level(&alloc.effect.description, level);
            }
            (None, _) => {
                let label = node.category.label();
                self.allocations.push(Allocation {
                    key: Some(key),
                    level,
                    effect: Effect {
                        name: format!("{} {}", label, node.name),
                        description: format!("{} {} Lv.{}", label, node.name, level),
                        icon: node.icon_url.clone(),
                        tooltip: node.tooltip.clone(),
                    },
                });
            }
        }
    }

    /// Re-derive a category's point summary from its active nodes.
    pub(crate) fn recompute_points(
        &mut self,
        category: Category,
        catalogue: &ClassCatalogue,
        config: &SimConfig,
    ) {
        let total = self
            .allocations
            .iter()
            .filter_map(|a| a.key.as_ref().map(|k| (k, a.level)))
            .filter(|(k, _)| k.category == category)
            .filter_map(|(k, level)| catalogue.node(k).map(|n| n.point_cost(level, config)))
            .fold(0u32, u32::saturating_add);
        self.points[category.index()] = PointSummary {
            category,
            current_points: total,
            label: config.format_points(category, total),
        };
    }
}

/// Apply level targets to a board, returning the new board.
///
/// Targets are clamped into `[0, max]`; unknown nodes are skipped.
pub fn apply_delta(
    board: &Board,
    deltas: &[LevelDelta],
    catalogue: &ClassCatalogue,
    config: &SimConfig,
) -> Board {
    let mut next = board.clone();
    let mut touched = [false; 3];
    for delta in deltas {
        let Some(node) = catalogue.find(delta.category, &delta.node) else {
            tracing::warn!("ark: skipping unknown node {} {}", delta.category, delta.node);
            continue;
        };
        let level = delta.to.min(node.max);
        if next.level_of(&node.key()) != level {
            next.write_level(node, level);
            touched[node.category.index()] = true;
        }
    }
    for category in Category::ALL {
        if touched[category.index()] {
            next.recompute_points(category, catalogue, config);
        }
    }
    next
}

fn empty_points() -> [PointSummary; 3] {
    Category::ALL.map(|category| PointSummary {
        category,
        current_points: 0,
        label: String::new(),
    })
}

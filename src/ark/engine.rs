//! Allocation engine: the what-if state machine over one character's board.
//!
//! Each node is either Inactive (no effect, level 0) or Active (effect
//! present, level in `[1, max]`). Level edits walk between those states;
//! `reset` overwrites the working copy with the baseline wholesale.
//!
//! Every committed change bumps `revision` and pushes the full working
//! snapshot to the registered sink before returning. Rejected edits (out of
//! bounds, unknown node) change nothing and publish nothing.

use std::rc::Rc;

use crate::ark::board::{self, Board, LevelDelta};
use crate::ark::catalogue::{ClassCatalogue, MasterNode, NodeKey};
use crate::ark::category::Category;
use crate::ark::snapshot::{PointSummary, Snapshot};
use crate::config::SimConfig;

/// Receives the working snapshot after every committed mutation.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> SnapshotSink for F {
    fn publish(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Result of a level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Unchanged,
    Activated { level: u32 },
    Changed { from: u32, to: u32 },
    Deactivated { from: u32 },
}

impl Adjustment {
    fn between(from: u32, to: u32) -> Self {
        match (from, to) {
            _ if from == to => Adjustment::Unchanged,
            (0, level) => Adjustment::Activated { level },
            (from, 0) => Adjustment::Deactivated { from },
            (from, to) => Adjustment::Changed { from, to },
        }
    }

    pub fn is_change(self) -> bool {
        self != Adjustment::Unchanged
    }
}

/// The node the detail/edit panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub key: NodeKey,
}

pub struct AllocationEngine {
    catalogue: Rc<ClassCatalogue>,
    config: SimConfig,
    baseline: Board,
    working: Board,
    detail: Option<DetailView>,
    revision: u64,
    sink: Option<Box<dyn SnapshotSink>>,
}

impl AllocationEngine {
    /// Start a session on `baseline`. The working copy begins equal to it.
    pub fn new(catalogue: Rc<ClassCatalogue>, config: SimConfig, baseline: &Snapshot) -> Self {
        let baseline = Board::resolve(baseline, &catalogue, &config);
        Self {
            working: baseline.clone(),
            baseline,
            catalogue,
            config,
            detail: None,
            revision: 0,
            sink: None,
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn SnapshotSink>) {
        self.sink = Some(sink);
    }

    pub fn catalogue(&self) -> &ClassCatalogue {
        &self.catalogue
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn baseline(&self) -> &Board {
        &self.baseline
    }

    pub fn working(&self) -> &Board {
        &self.working
    }

    /// Bumped on every committed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn level_of(&self, key: &NodeKey) -> u32 {
        self.working.level_of(key)
    }

    pub fn is_active(&self, key: &NodeKey) -> bool {
        self.working.is_active(key)
    }

    pub fn points_for(&self, category: Category) -> &PointSummary {
        self.working.points_for(category)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.working.to_snapshot()
    }

    /// Nodes edited away from the baseline.
    pub fn diff(&self) -> Vec<LevelDelta> {
        self.working.diff(&self.baseline, &self.catalogue)
    }

    /// Raise or lower a node by `delta` levels, clamped to `[0, max]`.
    pub fn adjust_level(&mut self, key: &NodeKey, delta: i32) -> Adjustment {
        let Some(node) = self.catalogue.node(key) else {
            tracing::warn!("ark: adjust on unknown node {:?}", key);
            return Adjustment::Unchanged;
        };
        let current = self.working.level_of(key);
        let next = (current as i64 + delta as i64).clamp(0, node.max as i64) as u32;
        self.commit(key, next)
    }

    pub fn adjust_node(&mut self, node: &MasterNode, delta: i32) -> Adjustment {
        self.adjust_level(&node.key(), delta)
    }

    /// Set a node to `desired` directly; `desired <= 0` deactivates it.
    pub fn set_level(&mut self, key: &NodeKey, desired: i64) -> Adjustment {
        let Some(node) = self.catalogue.node(key) else {
            tracing::warn!("ark: set on unknown node {:?}", key);
            return Adjustment::Unchanged;
        };
        let next = desired.clamp(0, node.max as i64) as u32;
        self.commit(key, next)
    }

    /// Apply several level targets at once; publishes once if anything moved.
    /// Returns the number of nodes whose level changed.
    pub fn apply_deltas(&mut self, deltas: &[LevelDelta]) -> usize {
        let next = board::apply_delta(&self.working, deltas, &self.catalogue, &self.config);
        let changed = next.diff(&self.working, &self.catalogue).len();
        if changed == 0 {
            return 0;
        }
        self.working = next;
        self.bump();
        tracing::debug!("ark: applied {} level changes", changed);
        changed
    }

    /// Throw away every edit and start again from the baseline.
    pub fn reset(&mut self) {
        self.working = self.baseline.clone();
        self.detail = None;
        self.bump();
        tracing::debug!("ark: working copy reset to baseline");
    }

    /// Adopt a freshly fetched baseline for the same class. Edits made
    /// against the previous baseline are discarded.
    pub fn load_baseline(&mut self, snapshot: &Snapshot) {
        self.baseline = Board::resolve(snapshot, &self.catalogue, &self.config);
        self.reset();
    }

    pub fn open_detail(&mut self, key: &NodeKey) -> Option<&DetailView> {
        if self.catalogue.node(key).is_none() {
            return None;
        }
        self.detail = Some(DetailView { key: key.clone() });
        self.detail.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Apply a level typed into the detail panel. No panel, no change.
    pub fn apply_detail(&mut self, desired: i64) -> Adjustment {
        match self.detail.as_ref().map(|d| d.key.clone()) {
            Some(key) => self.set_level(&key, desired),
            None => Adjustment::Unchanged,
        }
    }

    fn commit(&mut self, key: &NodeKey, next: u32) -> Adjustment {
        let current = self.working.level_of(key);
        let outcome = Adjustment::between(current, next);
        if !outcome.is_change() {
            return outcome;
        }
        let Some(node) = self.catalogue.node(key) else {
            return Adjustment::Unchanged;
        };
        self.working.write_level(node, next);
        self.working.recompute_points(node.category, &self.catalogue, &self.config);
        tracing::debug!("ark: {} {} Lv.{} -> Lv.{}", node.category, node.name, current, next);
        self.bump();
        outcome
    }

    fn bump(&mut self) {
        self.revision += 1;
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&self.working.to_snapshot());
        }
    }
}

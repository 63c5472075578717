//! Master catalogue: the static, per-class list of allocatable nodes.
//!
//! Loaded once from JSON:
//!
//! ```text
//! {
//!   "버서커": {
//!     "진화":   [ { "name": "치명", "tier": 1, "icon": "1_1", "max": 30 }, ... ],
//!     "깨달음": [ ... ],
//!     "도약":   [ ... ]
//!   }
//! }
//! ```
//!
//! Every node gets a synthetic key `(category, normalized name)`. Because
//! baseline effects are matched to nodes by substring, a category whose node
//! names contain one another is rejected at load time.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::ark::category::Category;
use crate::ark::codec::normalize;
use crate::ark::icon::IconRef;
use crate::config::SimConfig;
use crate::error::{Error, Result};

/// Stable identity of a node within one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub category: Category,
    /// Node name with all whitespace removed.
    pub node: String,
}

impl NodeKey {
    pub fn new(category: Category, name: &str) -> Self {
        Self { category, node: normalize(name) }
    }
}

/// One allocatable node.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterNode {
    pub name: String,
    pub tier: u8,
    pub icon_id: String,
    pub max: u32,
    pub category: Category,
    pub icon: IconRef,
    pub icon_url: String,
    /// Points per level when it differs from the configured table.
    pub cost: Option<u32>,
    /// Tooltip source copied into effects created for this node.
    pub tooltip: String,
}

impl MasterNode {
    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.category, &self.name)
    }

    /// Points this node consumes at `level`.
    pub fn point_cost(&self, level: u32, config: &SimConfig) -> u32 {
        let per_level = self
            .cost
            .unwrap_or_else(|| config.costs.per_level(self.category, self.tier));
        per_level.saturating_mul(level)
    }
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    tier: u8,
    #[serde(default, alias = "iconId")]
    icon: String,
    #[serde(default)]
    max: u32,
    #[serde(default)]
    cost: Option<u32>,
    #[serde(default)]
    tooltip: Option<String>,
}

/// All nodes of one class, in catalogue order (grouped by category).
#[derive(Debug, Clone)]
pub struct ClassCatalogue {
    class: String,
    nodes: Vec<MasterNode>,
    index: HashMap<NodeKey, usize>,
}

impl ClassCatalogue {
    fn build(
        class: &str,
        raw: HashMap<String, Vec<RawNode>>,
        config: &SimConfig,
    ) -> Result<Self> {
        let mut boards: BTreeMap<Category, Vec<RawNode>> = BTreeMap::new();
        for (label, nodes) in raw {
            let category =
                Category::from_label(&label).ok_or_else(|| Error::UnknownCategory(label.clone()))?;
            boards.entry(category).or_default().extend(nodes);
        }

        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for (category, raw_nodes) in boards {
            let start = nodes.len();
            for raw in raw_nodes {
                let name = raw.name.trim().to_string();
                if normalize(&name).is_empty() {
                    return Err(Error::EmptyNodeName { category });
                }
                if !(1..=5).contains(&raw.tier) {
                    return Err(Error::InvalidTier { category, name, tier: raw.tier });
                }
                let icon = IconRef::classify(&raw.icon, category);
                let node = MasterNode {
                    icon_url: icon.url(&config.icons),
                    icon,
                    icon_id: raw.icon,
                    name,
                    tier: raw.tier,
                    max: raw.max,
                    category,
                    cost: raw.cost,
                    tooltip: raw.tooltip.unwrap_or_default(),
                };
                if index.insert(node.key(), nodes.len()).is_some() {
                    return Err(Error::DuplicateNode { category, name: node.name });
                }
                nodes.push(node);
            }
            check_overlaps(category, &nodes[start..])?;
        }

        Ok(Self { class: class.to_string(), nodes, index })
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn node(&self, key: &NodeKey) -> Option<&MasterNode> {
        self.index.get(key).map(|&i| &self.nodes[i])
    }

    /// Look a node up by display name (whitespace-insensitive).
    pub fn find(&self, category: Category, name: &str) -> Option<&MasterNode> {
        self.node(&NodeKey::new(category, name))
    }

    pub fn nodes(&self) -> &[MasterNode] {
        &self.nodes
    }

    pub fn nodes_in(&self, category: Category) -> impl Iterator<Item = &MasterNode> {
        self.nodes.iter().filter(move |n| n.category == category)
    }
}

/// Reject categories where one node name is contained in another, which
/// would make effect matching pick the wrong node.
fn check_overlaps(category: Category, nodes: &[MasterNode]) -> Result<()> {
    let keys: Vec<(NodeKey, &str)> = nodes.iter().map(|n| (n.key(), n.name.as_str())).collect();
    for (i, (a, a_name)) in keys.iter().enumerate() {
        for (b, b_name) in &keys[i + 1..] {
            let (shorter, longer) = if a.node.len() <= b.node.len() {
                ((a, a_name), (b, b_name))
            } else {
                ((b, b_name), (a, a_name))
            };
            if longer.0.node.contains(&shorter.0.node) {
                return Err(Error::AmbiguousNodeNames {
                    category,
                    shorter: shorter.1.to_string(),
                    longer: longer.1.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Catalogue for every class.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    classes: HashMap<String, Rc<ClassCatalogue>>,
}

impl Catalogue {
    pub fn from_json(json: &str, config: &SimConfig) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, Vec<RawNode>>> = serde_json::from_str(json)?;
        let mut classes = HashMap::with_capacity(raw.len());
        for (class, boards) in raw {
            let class = class.trim().to_string();
            let built = ClassCatalogue::build(&class, boards, config)?;
            tracing::debug!("catalogue: {} nodes for {}", built.nodes.len(), class);
            classes.insert(class, Rc::new(built));
        }
        Ok(Self { classes })
    }

    pub fn class(&self, name: &str) -> Option<Rc<ClassCatalogue>> {
        self.classes.get(name.trim()).cloned()
    }

    /// Class names, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

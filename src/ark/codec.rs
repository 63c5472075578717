//! Effect codec: reads and writes the `Lv.N` token embedded in effect
//! descriptions, and matches effects to catalogue nodes by name.
//!
//! The armory data has no node ids, so matching is whitespace-insensitive
//! substring containment. It runs once, when a baseline is imported
//! (see `board::Board::resolve`); edits afterwards go through node keys.

use regex::Regex;
use std::sync::LazyLock;

use crate::ark::category::Category;
use crate::ark::snapshot::Effect;

static LEVEL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Lv\.(\d+)").expect("invalid regex"));

/// Level carried by a description. No token (or an unparsable one) is 0.
pub fn extract_level(description: &str) -> u32 {
    LEVEL_TOKEN
        .captures(description)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Rewrite the level token in place, or append one when there is none.
pub fn with_level(description: &str, level: u32) -> String {
    let token = format!("Lv.{level}");
    if let Some(m) = LEVEL_TOKEN.find(description) {
        let mut out = String::with_capacity(description.len() + 4);
        out.push_str(&description[..m.start()]);
        out.push_str(&token);
        out.push_str(&description[m.end()..]);
        return out;
    }
    let base = description.trim_end();
    if base.is_empty() {
        token
    } else {
        format!("{base} {token}")
    }
}

/// Strip all whitespace.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Category an effect belongs to, judged by its name.
pub fn effect_category(effect: &Effect) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|c| effect.name.contains(c.label()))
}

/// Whether `effect` represents the node called `node_name` in `category`.
pub fn effect_matches_node(effect: &Effect, node_name: &str, category: Category) -> bool {
    let needle = normalize(node_name);
    !needle.is_empty()
        && effect.name.contains(category.label())
        && normalize(&effect.description).contains(&needle)
}

/// Index of the first effect representing the node, if the node is active.
pub fn match_node_to_effects(node_name: &str, category: Category, effects: &[Effect]) -> Option<usize> {
    effects
        .iter()
        .position(|e| effect_matches_node(e, node_name, category))
}

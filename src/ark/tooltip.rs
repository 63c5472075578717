//! Tooltip text for a node at a given level.
//!
//! Templates are keyed by class (or `"*"` for lines shared by every class),
//! category, node name and level:
//!
//! ```text
//! { "*":      { "진화":   { "치명": { "1": ["치명 +50"], ... } } },
//!   "버서커": { "깨달음": { "광전사의 비기": { "1": [ ... ] } } } }
//! ```
//!
//! Lookups never fail; missing data yields a single placeholder line.

use std::collections::{BTreeMap, HashMap};

use crate::ark::category::Category;
use crate::ark::codec::normalize;
use crate::error::Result;

pub const NO_TOOLTIP: &str = "툴팁 데이터 없음";

/// Class key for templates shared by every class.
const COMMON: &str = "*";

type Levels = BTreeMap<u32, Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct TooltipTable {
    entries: HashMap<(String, Category, String), Levels>,
}

impl TooltipTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, HashMap<String, Levels>>> =
            serde_json::from_str(json)?;
        let mut entries = HashMap::new();
        for (class, categories) in raw {
            for (label, nodes) in categories {
                let Some(category) = Category::from_label(&label) else {
                    tracing::warn!("tooltips: skipping unknown category {:?}", label);
                    continue;
                };
                for (node, levels) in nodes {
                    entries.insert((class.trim().to_string(), category, normalize(&node)), levels);
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines describing `node` at exactly `level` for `class`. Class-specific
    /// text wins over the shared entry.
    pub fn describe(&self, category: Category, node: &str, level: u32, class: &str) -> TooltipLines<'_> {
        let node = normalize(node);
        [class.trim(), COMMON]
            .into_iter()
            .find_map(|c| {
                self.entries
                    .get(&(c.to_string(), category, node.clone()))
                    .and_then(|levels| levels.get(&level))
            })
            .map_or(TooltipLines::Placeholder(Some(NO_TOOLTIP)), |lines| {
                TooltipLines::Lines(lines.iter())
            })
    }
}

/// Lazy sequence of tooltip lines.
pub enum TooltipLines<'a> {
    Lines(std::slice::Iter<'a, String>),
    Placeholder(Option<&'static str>),
}

impl<'a> TooltipLines<'a> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TooltipLines::Placeholder(_))
    }
}

impl<'a> Iterator for TooltipLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            TooltipLines::Lines(iter) => iter.next().map(String::as_str),
            TooltipLines::Placeholder(line) => line.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ark::fixtures;

    fn table() -> TooltipTable {
        TooltipTable::from_json(fixtures::TOOLTIPS_JSON).unwrap()
    }

    #[test]
    fn shared_lines_for_any_class() {
        let table = table();
        let lines: Vec<&str> = table
            .describe(Category::Evolution, "끝없는 마나", 2, "소서리스")
            .collect();
        assert_eq!(lines, vec!["마나 회복 +20%", "스킬 재사용 대기시간 -2%"]);
    }

    #[test]
    fn class_lines_win() {
        let table = table();
        let lines: Vec<&str> = table.describe(Category::Evolution, "치명", 11, fixtures::CLASS).collect();
        assert_eq!(lines, vec!["버서커 전용 치명 +550"]);
        let lines: Vec<&str> = table.describe(Category::Evolution, "치명", 10, fixtures::CLASS).collect();
        assert_eq!(lines, vec!["치명 +500"]);
    }

    #[test]
    fn node_names_are_whitespace_insensitive() {
        let table = table();
        let lines: Vec<&str> = table.describe(Category::Evolution, "끝없는마나", 1, "").collect();
        assert_eq!(lines, vec!["마나 회복 +10%"]);
    }

    #[test]
    fn missing_data_yields_placeholder() {
        let table = table();
        let missing = table.describe(Category::Leap, "초월적인 힘", 1, fixtures::CLASS);
        assert!(missing.is_placeholder());
        assert_eq!(missing.collect::<Vec<_>>(), vec![NO_TOOLTIP]);
        let wrong_level: Vec<&str> = table.describe(Category::Evolution, "치명", 3, "").collect();
        assert_eq!(wrong_level, vec![NO_TOOLTIP]);
        let blank = TooltipTable::default();
        let empty: Vec<&str> = blank.describe(Category::Evolution, "치명", 1, "").collect();
        assert_eq!(empty, vec![NO_TOOLTIP]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TooltipTable::from_json(r#"{"*":{"진화":{"치명":{"one":["x"]}}}}"#).is_err());
        assert!(TooltipTable::from_json("not json").is_err());
    }
}

//! Wire shapes exchanged with the character-data collaborator.
//!
//! The armory payload is parsed defensively: absent or `null` fields become
//! empty strings / zero, and the `{ "ArkPassive": { ... } }` envelope is
//! unwrapped when present.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ark::category::Category;
use crate::error::Result;

/// An active node allocation as the armory reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "Name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Display text with the level embedded as a `Lv.N` token.
    #[serde(rename = "Description", default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "Icon", default, deserialize_with = "null_as_empty")]
    pub icon: String,
    #[serde(rename = "ToolTip", default, deserialize_with = "null_as_empty")]
    pub tooltip: String,
}

/// Wire form of a point summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(rename = "Name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "Value", default, deserialize_with = "null_as_zero")]
    pub value: i64,
    #[serde(rename = "Description", default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Per-category aggregate of spent points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointSummary {
    pub category: Category,
    pub current_points: u32,
    pub label: String,
}

impl PointSummary {
    /// `None` when the record names no known category.
    pub fn from_record(record: &PointRecord) -> Option<Self> {
        let category = Category::from_label(&record.name)?;
        Some(Self {
            category,
            current_points: record.value.clamp(0, u32::MAX as i64) as u32,
            label: record.description.clone(),
        })
    }

    pub fn to_record(&self) -> PointRecord {
        PointRecord {
            name: self.category.label().to_string(),
            value: self.current_points as i64,
            description: self.label.clone(),
        }
    }
}

/// `{ Effects, Points }` as exchanged with the rest of the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "Effects", default, deserialize_with = "null_as_default")]
    pub effects: Vec<Effect>,
    #[serde(rename = "Points", default, deserialize_with = "null_as_default")]
    pub points: Vec<PointRecord>,
}

impl Snapshot {
    /// Parse a snapshot, accepting either the bare object or the armory
    /// profile envelope that nests it under `ArkPassive`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(inner) = value.get_mut("ArkPassive").map(serde_json::Value::take) {
            value = inner;
        }
        if value.is_null() {
            return Ok(Snapshot::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(d: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(d)?.unwrap_or(0))
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

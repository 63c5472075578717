//! Node icon resolution.
//!
//! Icon ids come in a handful of shapes and each shape maps to a different
//! CDN path. The shape is classified once when the catalogue is loaded.

use crate::ark::category::Category;
use crate::config::IconTemplates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    /// Evolution nodes share one atlas keyed only by id.
    Evolution { id: String },
    /// No underscore in the id.
    SingleToken { id: String },
    /// `folder_suffix`.
    PairToken { folder: String, suffix: String },
    /// `a_b_c...`: folder is everything before the last underscore.
    CompositeToken { folder: String, suffix: String },
    /// No icon id in the data.
    Missing,
}

impl IconRef {
    pub fn classify(icon_id: &str, category: Category) -> Self {
        let id = icon_id.trim();
        if id.is_empty() {
            return IconRef::Missing;
        }
        if category == Category::Evolution {
            return IconRef::Evolution { id: id.to_string() };
        }
        let parts = id.split('_').count();
        match (parts, id.rsplit_once('_')) {
            (2, Some((folder, suffix))) => IconRef::PairToken {
                folder: folder.to_string(),
                suffix: suffix.to_string(),
            },
            (_, Some((folder, suffix))) => IconRef::CompositeToken {
                folder: folder.to_string(),
                suffix: suffix.to_string(),
            },
            (_, None) => IconRef::SingleToken { id: id.to_string() },
        }
    }

    pub fn url(&self, templates: &IconTemplates) -> String {
        match self {
            IconRef::Evolution { id } => templates.evolution.replace("{id}", id),
            IconRef::SingleToken { id } => templates.single.replace("{id}", id),
            IconRef::PairToken { folder, suffix } => templates
                .pair
                .replace("{folder}", folder)
                .replace("{suffix}", suffix),
            IconRef::CompositeToken { folder, suffix } => templates
                .composite
                .replace("{folder}", folder)
                .replace("{suffix}", suffix),
            IconRef::Missing => templates.fallback.clone(),
        }
    }
}

/// Classify and resolve in one step.
pub fn resolve_icon(icon_id: &str, category: Category, templates: &IconTemplates) -> String {
    IconRef::classify(icon_id, category).url(templates)
}

//! Errors raised while loading host-supplied data (config, catalogue,
//! tooltip templates, character snapshots).
//!
//! Simulation operations never return these: once data is loaded, every
//! problem is recovered locally and the UI shows "no data" instead.

use thiserror::Error;

use crate::ark::category::Category;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("node {name:?} in {category} has tier {tier}, expected 1..=5")]
    InvalidTier {
        category: Category,
        name: String,
        tier: u8,
    },

    #[error("node with an empty name in {category}")]
    EmptyNodeName { category: Category },

    #[error("duplicate node {name:?} in {category}")]
    DuplicateNode { category: Category, name: String },

    #[error("ambiguous nodes in {category}: {shorter:?} is contained in {longer:?}")]
    AmbiguousNodeNames {
        category: Category,
        shorter: String,
        longer: String,
    },

    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("no catalogue loaded")]
    NoCatalogue,

    #[error("no character loaded")]
    NoCharacter,
}

pub type Result<T> = std::result::Result<T, Error>;

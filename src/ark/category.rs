//! The three independent point pools of the Ark Passive board.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "진화")]
    Evolution,
    #[serde(rename = "깨달음")]
    Enlightenment,
    #[serde(rename = "도약")]
    Leap,
}

impl Category {
    /// Display order, which is also the order point summaries are emitted in.
    pub const ALL: [Category; 3] = [Category::Evolution, Category::Enlightenment, Category::Leap];

    /// Korean label used by the armory data and inside effect names.
    pub fn label(self) -> &'static str {
        match self {
            Category::Evolution => "진화",
            Category::Enlightenment => "깨달음",
            Category::Leap => "도약",
        }
    }

    /// ASCII slug for DOM ids and CSS hooks.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Evolution => "evolution",
            Category::Enlightenment => "enlightenment",
            Category::Leap => "leap",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Accepts the Korean label or the English name (any case).
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s || c.slug().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

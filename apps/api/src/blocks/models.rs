use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Derived quality tier. Ordered: good < strong < essential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    #[default]
    Good,
    Strong,
    Essential,
}

impl StrengthLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Good => "good",
            StrengthLevel::Strong => "strong",
            StrengthLevel::Essential => "essential",
        }
    }

    /// Additive ranking bonus for this tier.
    pub fn ranking_bonus(&self) -> f64 {
        match self {
            StrengthLevel::Essential => 2.0,
            StrengthLevel::Strong => 1.0,
            StrengthLevel::Good => 0.5,
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrengthLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" => Ok(StrengthLevel::Good),
            "strong" => Ok(StrengthLevel::Strong),
            "essential" => Ok(StrengthLevel::Essential),
            other => Err(format!("unknown strength level '{other}'")),
        }
    }
}

/// A reusable CV achievement statement plus its derived classification.
///
/// `content` is canonical: customization produces a new string and never
/// writes back into the block. `id` is assigned by the persistence layer and
/// is `None` for freshly ingested blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: Option<i64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub title: String,
    pub content: String,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
    pub strength_level: StrengthLevel,
    pub role_types: Vec<String>,
    pub company_types: Vec<String>,
}

impl Block {
    /// Natural key used for idempotent imports.
    pub fn natural_key(&self) -> (&str, &str) {
        (self.category.as_str(), self.title.as_str())
    }
}

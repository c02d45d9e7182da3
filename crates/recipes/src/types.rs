//! Core types for recipe retrieval.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque recipe identifier.
///
/// The recipe service hands out numbers today, but nothing downstream does
/// arithmetic on them, so they are kept as text and accepted in either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => RecipeId::from(n),
            RawId::Text(s) => RecipeId(s),
        })
    }
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// One hit from the match phase (`findByIngredients`).
///
/// The service sends much more (used/missed ingredient breakdowns, image
/// URLs); only what ranking needs is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMatch {
    #[serde(default)]
    pub id: Option<RecipeId>,

    #[serde(default = "untitled")]
    pub title: String,

    #[serde(default, rename = "usedIngredientCount")]
    pub used_ingredient_count: u32,

    #[serde(default, rename = "missedIngredientCount")]
    pub missed_ingredient_count: u32,
}

impl RecipeMatch {
    pub fn new(id: impl Into<RecipeId>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            used_ingredient_count: 0,
            missed_ingredient_count: 0,
        }
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Body of `/{id}/information`, trimmed to what is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeInformation {
    #[serde(default)]
    pub summary: String,
}

/// A recipe that survived both retrieval phases.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCandidate {
    pub id: RecipeId,
    pub title: String,
    /// Descriptive summary from the detail phase; empty when the service had none
    pub summary: String,
}

impl RecipeCandidate {
    pub fn new(id: impl Into<RecipeId>, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }
}

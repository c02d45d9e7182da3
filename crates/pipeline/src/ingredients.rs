//! The ingredient set handed from detection to recipe retrieval.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

use crate::filters::normalize_label;

/// Distinct, normalized ingredient names in lexicographic order.
///
/// Ordering is part of the contract: the recipe query and the "no recipes"
/// report are both rendered from it, and they must not depend on the order
/// the detector happened to list objects in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    names: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    /// Normalizes every name, drops blanks and duplicates, and sorts.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let names: BTreeSet<String> = iter
            .into_iter()
            .map(|s| normalize_label(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl Deref for IngredientSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.names
    }
}

/// Renders as a bracketed, quoted list: `['egg', 'flour']`.
impl fmt::Display for IngredientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", name.replace('\'', "\\'"))?;
        }
        f.write_str("]")
    }
}

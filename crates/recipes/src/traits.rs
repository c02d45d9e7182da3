//! The port the recipe finder talks through.

use std::future::Future;

use crate::error::Result;
use crate::types::{RecipeId, RecipeInformation, RecipeMatch};

/// Remote recipe catalogue.
///
/// ## Design Note
/// - `Send + Sync` so one client can serve concurrent invocations
/// - Implementations decide what "no data" looks like on their wire; the
///   contract is that a response which is not a list of matches comes back
///   as an empty `Vec`, never as an error
pub trait RecipeApi: Send + Sync {
    /// Match phase: recipes that use the given ingredients.
    ///
    /// # Arguments
    /// * `ingredients` - ordered ingredient names, sent comma-joined
    /// * `number` - maximum number of matches to return
    fn find_by_ingredients(
        &self,
        ingredients: &[String],
        number: usize,
    ) -> impl Future<Output = Result<Vec<RecipeMatch>>> + Send;

    /// Detail phase: full information for one recipe.
    fn information(&self, id: &RecipeId) -> impl Future<Output = Result<RecipeInformation>> + Send;
}

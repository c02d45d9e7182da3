//! Recipe Finder - two-phase candidate retrieval
//!
//! ## Algorithm
//! 1. Match phase: one query with the comma-joined ingredient list, capped
//!    at `max_results`, ignoring pantry staples
//! 2. Detail phase: for each match, fetch its information to get a summary
//!    - a failed fetch drops that match and the batch carries on
//! 3. Return the survivors in match order
//!
//! Detail fetches run with at most `fan_out` in flight. Results are buffered
//! in order, so the output never depends on which fetch finishes first.

use futures::future;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::error::{RecipeError, Result};
use crate::traits::RecipeApi;
use crate::types::{RecipeCandidate, RecipeMatch};

/// Default cap on match-phase results.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Finds recipe candidates for an ingredient list
pub struct RecipeFinder<A> {
    api: A,

    /// Match-phase page size
    max_results: usize,

    /// Maximum concurrent detail fetches (1 = strictly sequential)
    fan_out: usize,
}

impl<A: RecipeApi> RecipeFinder<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            max_results: DEFAULT_MAX_RESULTS,
            fan_out: 1,
        }
    }

    /// Configure the match-phase page size (default: 5)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Configure how many detail fetches may be in flight (default: 1)
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Find candidates for `ingredients`: match phase, then detail phase.
    ///
    /// # Returns
    /// * `Ok(candidates)` - in match order, minus those whose detail fetch failed
    /// * `Err` - the match phase itself failed; callers treat this as "no recipes"
    pub async fn find(&self, ingredients: &[String]) -> Result<Vec<RecipeCandidate>> {
        let matches = self.match_recipes(ingredients).await?;
        Ok(self.fetch_details(matches).await)
    }

    /// Match phase: one query, capped at `max_results`.
    #[instrument(skip(self, ingredients), fields(ingredients = ingredients.len()))]
    pub async fn match_recipes(&self, ingredients: &[String]) -> Result<Vec<RecipeMatch>> {
        let mut matches = self
            .api
            .find_by_ingredients(ingredients, self.max_results)
            .await?;
        matches.truncate(self.max_results);
        debug!("Match phase returned {} recipes", matches.len());
        Ok(matches)
    }

    /// Detail phase: fetch a summary per match, in match order.
    ///
    /// Matches whose fetch fails are dropped, so the result may be empty even
    /// when `matches` is not.
    pub async fn fetch_details(&self, matches: Vec<RecipeMatch>) -> Vec<RecipeCandidate> {
        if matches.is_empty() {
            return Vec::new();
        }

        let matched = matches.len();
        let candidates: Vec<RecipeCandidate> = stream::iter(matches)
            .map(|recipe| async move {
                let title = recipe.title.clone();
                match self.fetch_detail(recipe).await {
                    Ok(candidate) => Some(candidate),
                    Err(e) => {
                        warn!("Dropping recipe {:?}: {}", title, e);
                        None
                    }
                }
            })
            .buffered(self.fan_out)
            .filter_map(future::ready)
            .collect()
            .await;

        info!(
            "Detail phase kept {} of {} matched recipes",
            candidates.len(),
            matched
        );
        candidates
    }

    async fn fetch_detail(&self, recipe: RecipeMatch) -> Result<RecipeCandidate> {
        let id = recipe.id.ok_or(RecipeError::MissingId)?;
        let info = self.api.information(&id).await?;
        Ok(RecipeCandidate {
            id,
            title: recipe.title,
            summary: info.summary,
        })
    }
}

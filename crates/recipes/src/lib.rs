//! # Recipes Crate
//!
//! Turns an ingredient list into recipe candidates using an external recipe
//! service.
//!
//! ## Components
//!
//! ### RecipeApi
//! The port to the recipe service: one match query, one detail query.
//!
//! ### SpoonacularClient
//! HTTP implementation of `RecipeApi` for `findByIngredients` and
//! `{id}/information`.
//!
//! ### RecipeFinder
//! Runs the match phase, then the detail phase per match, dropping matches
//! whose details could not be fetched.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recipes::{RecipeFinder, SpoonacularClient, DEFAULT_BASE_URL};
//!
//! let api = SpoonacularClient::new(DEFAULT_BASE_URL, api_key, timeout)?;
//! let finder = RecipeFinder::new(api).with_max_results(5);
//! let candidates = finder.find(&["egg".into(), "flour".into()]).await?;
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod spoonacular;
pub mod finder;

pub use error::{RecipeError, Result};
pub use types::{RecipeCandidate, RecipeId, RecipeInformation, RecipeMatch};
pub use traits::RecipeApi;
pub use spoonacular::{SpoonacularClient, DEFAULT_BASE_URL};
pub use finder::{RecipeFinder, DEFAULT_MAX_RESULTS};

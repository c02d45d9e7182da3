use thiserror::Error;

/// Errors from the recipe service
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Recipe service returned status {status} for {what}")]
    Status { status: u16, what: String },

    #[error("Invalid response from recipe service: {0}")]
    InvalidResponse(String),

    #[error("Recipe match has no identifier")]
    MissingId,
}

pub type Result<T> = std::result::Result<T, RecipeError>;

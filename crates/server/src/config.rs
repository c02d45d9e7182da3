//! Configuration for the recipe pipeline.
//!
//! Everything the controller needs from its environment arrives through
//! [`PipelineConfig`]. Core logic never reads the process environment;
//! only binaries call [`PipelineConfig::from_env`].

use std::env;
use std::time::Duration;

use pipeline::filters::{DEFAULT_MIN_CONFIDENCE, DEFAULT_NON_FOOD};
use recipes::{DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS};
use thiserror::Error;

pub const DEFAULT_SENTIMENT_ENDPOINT: &str = "http://localhost:50051";
pub const DEFAULT_RESULTS_PREFIX: &str = "results/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building or validating configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Settings for one pipeline deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Base URL of the object detector (`/predict`, `/healthcheck`)
    pub detector_endpoint: String,
    pub recipe_api_key: String,
    pub recipe_base_url: String,
    pub sentiment_endpoint: String,

    /// Detections must be strictly above this confidence
    pub min_confidence: f64,
    /// Detector classes that are never ingredients
    pub non_food: Vec<String>,

    /// Match-phase page size
    pub max_recipes: usize,
    pub ignore_pantry: bool,

    /// Key prefix of output artifacts; inputs under it are ignored
    pub results_prefix: String,
    pub request_timeout: Duration,
    /// Per-candidate calls allowed in flight (1 = sequential)
    pub fan_out: usize,
}

impl PipelineConfig {
    /// Create a configuration with defaults for everything but the two
    /// settings that have none.
    pub fn new(detector_endpoint: impl Into<String>, recipe_api_key: impl Into<String>) -> Self {
        Self {
            detector_endpoint: detector_endpoint.into(),
            recipe_api_key: recipe_api_key.into(),
            recipe_base_url: DEFAULT_BASE_URL.to_string(),
            sentiment_endpoint: DEFAULT_SENTIMENT_ENDPOINT.to_string(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            non_food: DEFAULT_NON_FOOD.iter().map(|s| s.to_string()).collect(),
            max_recipes: DEFAULT_MAX_RESULTS,
            ignore_pantry: true,
            results_prefix: DEFAULT_RESULTS_PREFIX.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fan_out: 1,
        }
    }

    pub fn with_recipe_base_url(mut self, url: impl Into<String>) -> Self {
        self.recipe_base_url = url.into();
        self
    }

    pub fn with_sentiment_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sentiment_endpoint = endpoint.into();
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_non_food<I, S>(mut self, non_food: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_food = non_food.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_recipes(mut self, max_recipes: usize) -> Self {
        self.max_recipes = max_recipes;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Check ranges and required values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detector_endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("detector_endpoint"));
        }
        if self.recipe_api_key.trim().is_empty() {
            return Err(ConfigError::Missing("recipe_api_key"));
        }
        if self.recipe_base_url.trim().is_empty() {
            return Err(ConfigError::Missing("recipe_base_url"));
        }
        if self.sentiment_endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("sentiment_endpoint"));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence",
                value: self.min_confidence.to_string(),
            });
        }
        if self.max_recipes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_recipes",
                value: "0".into(),
            });
        }
        if self.fan_out == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fan_out",
                value: "0".into(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout",
                value: "0s".into(),
            });
        }
        Ok(())
    }

    /// Read settings from the process environment.
    ///
    /// Required: `DETECTOR_URL`, `RECIPE_API_KEY`. Optional: `RECIPE_BASE_URL`,
    /// `SENTIMENT_URL`, `MIN_CONFIDENCE`, `NON_FOOD` (comma-separated),
    /// `MAX_RECIPES`, `IGNORE_PANTRY`, `RESULTS_PREFIX`,
    /// `REQUEST_TIMEOUT_SECS`, `FAN_OUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let detector = lookup("DETECTOR_URL").ok_or(ConfigError::Missing("DETECTOR_URL"))?;
        let api_key = lookup("RECIPE_API_KEY").ok_or(ConfigError::Missing("RECIPE_API_KEY"))?;
        let mut config = Self::new(detector, api_key);

        if let Some(url) = lookup("RECIPE_BASE_URL") {
            config.recipe_base_url = url;
        }
        if let Some(url) = lookup("SENTIMENT_URL") {
            config.sentiment_endpoint = url;
        }
        if let Some(v) = lookup("MIN_CONFIDENCE") {
            config.min_confidence = parse("MIN_CONFIDENCE", &v)?;
        }
        if let Some(v) = lookup("NON_FOOD") {
            config.non_food = split_list(&v);
        }
        if let Some(v) = lookup("MAX_RECIPES") {
            config.max_recipes = parse("MAX_RECIPES", &v)?;
        }
        if let Some(v) = lookup("IGNORE_PANTRY") {
            config.ignore_pantry = parse("IGNORE_PANTRY", &v)?;
        }
        if let Some(v) = lookup("RESULTS_PREFIX") {
            config.results_prefix = v;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("FAN_OUT") {
            config.fan_out = parse("FAN_OUT", &v)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

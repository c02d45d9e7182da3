//! # Recipe Orchestrator
//!
//! This module coordinates one pipeline run per input image:
//! 1. Download the image and run object detection
//! 2. Filter detections into an ingredient set
//! 3. Find recipe candidates (match phase, then detail phase)
//! 4. Score every candidate's summary with the sentiment service
//! 5. Rank and format the report
//! 6. Write exactly one text artifact for the input
//!
//! ## States
//! `Start -> Filtered -> { NoIngredients | FoundRecipes -> { NoRecipes | Scored -> Done } }`
//!
//! Only `NoIngredients`, `NoRecipes` and `Done` are terminal, and each one
//! yields exactly one report. Errors that are not locally recoverable abort
//! the run before anything is written.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument, warn};

use pipeline::{rank_and_format, FilterPipeline, IngredientSet, Report, ScoredCandidate};
use recipes::{RecipeApi, RecipeCandidate, RecipeFinder, SpoonacularClient};
use sentiment_client::{SentimentClient, SentimentScorer};
use vision::{Detection, Detector, DetectorClient};

use crate::config::PipelineConfig;
use crate::event::StorageEvent;
use crate::storage::BlobStore;

/// Report written when filtering leaves nothing edible.
pub const NO_INGREDIENTS_MESSAGE: &str = "No edible ingredients detected.";

/// Where a run currently is (or ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Filtered,
    NoIngredients,
    FoundRecipes,
    NoRecipes,
    Scored,
    Done,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineState::NoIngredients | PipelineState::NoRecipes | PipelineState::Done
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Start => "START",
            PipelineState::Filtered => "FILTERED",
            PipelineState::NoIngredients => "NO_INGREDIENTS",
            PipelineState::FoundRecipes => "FOUND_RECIPES",
            PipelineState::NoRecipes => "NO_RECIPES",
            PipelineState::Scored => "SCORED",
            PipelineState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Terminal result of one run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    NoIngredients,
    NoRecipes { ingredients: IngredientSet },
    Ranked { ingredients: IngredientSet, report: Report },
}

impl PipelineOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            PipelineOutcome::NoIngredients => PipelineState::NoIngredients,
            PipelineOutcome::NoRecipes { .. } => PipelineState::NoRecipes,
            PipelineOutcome::Ranked { .. } => PipelineState::Done,
        }
    }

    /// The artifact this outcome writes.
    pub fn report(&self) -> Report {
        match self {
            PipelineOutcome::NoIngredients => Report::message(NO_INGREDIENTS_MESSAGE),
            PipelineOutcome::NoRecipes { ingredients } => {
                Report::message(format!("No recipes found for ingredients: {ingredients}"))
            }
            PipelineOutcome::Ranked { report, .. } => report.clone(),
        }
    }

    pub fn report_text(&self) -> String {
        self.report().body()
    }
}

/// Orchestrator wired to the real network clients
pub type LiveOrchestrator<B> =
    RecipeOrchestrator<DetectorClient, SpoonacularClient, SentimentClient, B>;

/// Main orchestrator that coordinates the pipeline
pub struct RecipeOrchestrator<D, A, S, B> {
    config: Arc<PipelineConfig>,
    detector: D,
    finder: RecipeFinder<A>,
    filter_pipeline: Arc<FilterPipeline>,
    scorer: S,
    store: B,
}

impl<B: BlobStore> LiveOrchestrator<B> {
    /// Build clients for every collaborator named in `config`.
    ///
    /// This is async because the sentiment client connects eagerly.
    pub async fn connect(config: PipelineConfig, store: B) -> Result<Self> {
        config.validate().context("Invalid pipeline configuration")?;

        let detector = DetectorClient::new(&config.detector_endpoint, config.request_timeout)
            .context("Building detector client")?;
        let recipe_api = SpoonacularClient::new(
            &config.recipe_base_url,
            &config.recipe_api_key,
            config.request_timeout,
        )
        .context("Building recipe client")?
        .with_ignore_pantry(config.ignore_pantry);
        let scorer = SentimentClient::connect(&config.sentiment_endpoint, config.request_timeout)
            .await
            .context("Connecting to sentiment service")?;

        Self::new(config, detector, recipe_api, scorer, store)
    }
}

impl<D, A, S, B> RecipeOrchestrator<D, A, S, B>
where
    D: Detector,
    A: RecipeApi,
    S: SentimentScorer,
    B: BlobStore,
{
    /// Create a new orchestrator from explicit collaborators
    pub fn new(config: PipelineConfig, detector: D, recipe_api: A, scorer: S, store: B) -> Result<Self> {
        config.validate().context("Invalid pipeline configuration")?;

        let filter_pipeline = Arc::new(FilterPipeline::edible(
            config.min_confidence,
            &config.non_food,
        ));
        let finder = RecipeFinder::new(recipe_api)
            .with_max_results(config.max_recipes)
            .with_fan_out(config.fan_out);

        Ok(Self {
            config: Arc::new(config),
            detector,
            finder,
            filter_pipeline,
            scorer,
            store,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn recipe_api(&self) -> &A {
        self.finder.api()
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    /// Entry point for a storage trigger.
    ///
    /// # Returns
    /// * `Ok(None)` - the object is one of our own results; nothing was done
    /// * `Ok(Some(outcome))` - the run reached a terminal state and its report was written
    /// * `Err` - a fatal upstream failure; nothing was written
    #[instrument(skip(self), fields(bucket = %event.bucket, name = %event.name))]
    pub async fn handle_event(&self, event: &StorageEvent) -> Result<Option<PipelineOutcome>> {
        if event.is_result(&self.config.results_prefix) {
            debug!("Ignoring our own output {}", event.name);
            return Ok(None);
        }

        let image = self
            .store
            .download(&event.bucket, &event.name)
            .await
            .with_context(|| format!("Downloading {}/{}", event.bucket, event.name))?;

        let outcome = self.process_image(image, event.file_name()).await?;

        let path = event.result_path(&self.config.results_prefix);
        self.store
            .upload(&event.bucket, &path, outcome.report_text())
            .await
            .with_context(|| format!("Uploading {}/{}", event.bucket, path))?;

        info!("Wrote {} report to {}/{}", outcome.state(), event.bucket, path);
        Ok(Some(outcome))
    }

    /// Detect objects in one image and run the rest of the pipeline.
    pub async fn process_image(&self, image: Bytes, file_name: &str) -> Result<PipelineOutcome> {
        let detections = self
            .detector
            .detect(image, file_name)
            .await
            .context("Object detection failed")?;
        self.run(detections).await
    }

    /// Run the pipeline from raw detections to a terminal outcome.
    pub async fn run(&self, detections: Vec<Detection>) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        debug!("State {}", PipelineState::Start);

        let ingredients = self.extract_ingredients(detections);
        debug!("State {}", PipelineState::Filtered);
        if ingredients.is_empty() {
            info!("No edible ingredients detected");
            return Ok(PipelineOutcome::NoIngredients);
        }

        let matches = match self.finder.match_recipes(&ingredients).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Recipe match phase failed: {}", e);
                Vec::new()
            }
        };
        if matches.is_empty() {
            info!("No recipes found for {}", ingredients);
            return Ok(PipelineOutcome::NoRecipes { ingredients });
        }
        debug!(
            "State {} ({} matches)",
            PipelineState::FoundRecipes,
            matches.len()
        );

        // may be empty if every detail fetch failed; that still ends in DONE
        let candidates = self.finder.fetch_details(matches).await;

        let scored = self.score_candidates(candidates).await?;
        debug!("State {}", PipelineState::Scored);

        let report = rank_and_format(scored);
        info!(
            "Ranked {} recipes in {:.2?}",
            report.lines().len(),
            start_time.elapsed()
        );
        Ok(PipelineOutcome::Ranked {
            ingredients,
            report,
        })
    }

    /// Filter raw detections into the ingredient set
    pub fn extract_ingredients(&self, detections: Vec<Detection>) -> IngredientSet {
        debug!("Raw detections: {:?}", detections);
        let ingredients = self.filter_pipeline.ingredients(detections);
        debug!("Filtered ingredients: {}", ingredients);
        ingredients
    }

    /// Score every candidate's summary, preserving candidate order.
    ///
    /// A sentiment failure is fatal for the run.
    async fn score_candidates(&self, candidates: Vec<RecipeCandidate>) -> Result<Vec<ScoredCandidate>> {
        stream::iter(candidates)
            .map(|candidate| async move {
                let score = self
                    .scorer
                    .score(&candidate.summary)
                    .await
                    .with_context(|| format!("Scoring recipe {} ({})", candidate.id, candidate.title))?;
                debug!("{} scored {:.3}", candidate.title, score);
                Ok::<_, anyhow::Error>(ScoredCandidate::from((candidate, score)))
            })
            .buffered(self.config.fan_out)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use recipes::{RecipeError, RecipeId, RecipeInformation, RecipeMatch};
    use sentiment_client::SentimentClientError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use vision::VisionError;

    // ============================================================================
    // Fakes
    // ============================================================================

    #[derive(Default)]
    struct FakeDetector {
        detections: Vec<Detection>,
        malformed: bool,
    }

    impl Detector for FakeDetector {
        async fn detect(&self, _image: Bytes, _file_name: &str) -> vision::Result<Vec<Detection>> {
            if self.malformed {
                return Err(VisionError::InvalidJson {
                    body: "<html>".to_string(),
                });
            }
            Ok(self.detections.clone())
        }
    }

    #[derive(Default)]
    struct FakeRecipes {
        /// (id, title, summary)
        recipes: Vec<(String, String, String)>,
        failing_details: Vec<String>,
        match_error: bool,
        match_calls: Mutex<Vec<Vec<String>>>,
    }

    impl RecipeApi for FakeRecipes {
        async fn find_by_ingredients(
            &self,
            ingredients: &[String],
            _number: usize,
        ) -> recipes::Result<Vec<RecipeMatch>> {
            self.match_calls.lock().unwrap().push(ingredients.to_vec());
            if self.match_error {
                return Err(RecipeError::InvalidResponse("not json".into()));
            }
            Ok(self
                .recipes
                .iter()
                .map(|(id, title, _)| RecipeMatch::new(id.as_str(), title.as_str()))
                .collect())
        }

        async fn information(&self, id: &RecipeId) -> recipes::Result<RecipeInformation> {
            if self.failing_details.iter().any(|f| f == id.as_str()) {
                return Err(RecipeError::Status {
                    status: 500,
                    what: id.to_string(),
                });
            }
            let summary = self
                .recipes
                .iter()
                .find(|(rid, _, _)| rid == id.as_str())
                .map(|(_, _, summary)| summary.clone())
                .unwrap_or_default();
            Ok(RecipeInformation { summary })
        }
    }

    /// Scores a summary by looking it up; unknown text is neutral
    #[derive(Default)]
    struct FakeScorer {
        scores: HashMap<String, f32>,
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl SentimentScorer for FakeScorer {
        async fn score(&self, text: &str) -> Result<f32, SentimentClientError> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(SentimentClientError::AnalysisError("unavailable".into()));
            }
            Ok(self.scores.get(text).copied().unwrap_or(0.0))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<HashMap<(String, String), Bytes>>,
    }

    impl MemoryStore {
        fn with_object(bucket: &str, name: &str, data: &'static [u8]) -> Self {
            let store = Self::default();
            store.objects.lock().unwrap().insert(
                (bucket.to_string(), name.to_string()),
                Bytes::from_static(data),
            );
            store
        }

        fn text(&self, bucket: &str, name: &str) -> Option<String> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), name.to_string()))
                .map(|b| String::from_utf8_lossy(b).into_owned())
        }

        fn len(&self) -> usize {
            self.objects.lock().unwrap().len()
        }
    }

    impl BlobStore for MemoryStore {
        async fn download(&self, bucket: &str, name: &str) -> Result<Bytes, StorageError> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), name.to_string()))
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: name.to_string(),
                })
        }

        async fn upload(&self, bucket: &str, path: &str, text: String) -> Result<(), StorageError> {
            self.objects
                .lock()
                .unwrap()
                .insert((bucket.to_string(), path.to_string()), Bytes::from(text));
            Ok(())
        }
    }

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    type TestOrchestrator = RecipeOrchestrator<FakeDetector, FakeRecipes, FakeScorer, MemoryStore>;

    fn test_config() -> PipelineConfig {
        PipelineConfig::new("http://detector.test", "test-key")
    }

    fn recipes(items: &[(&str, &str, &str)]) -> FakeRecipes {
        FakeRecipes {
            recipes: items
                .iter()
                .map(|(id, title, summary)| (id.to_string(), title.to_string(), summary.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    fn scorer(items: &[(&str, f32)]) -> FakeScorer {
        FakeScorer {
            scores: items.iter().map(|(t, s)| (t.to_string(), *s)).collect(),
            ..Default::default()
        }
    }

    fn build(
        detector: FakeDetector,
        recipe_api: FakeRecipes,
        scorer: FakeScorer,
        store: MemoryStore,
    ) -> TestOrchestrator {
        RecipeOrchestrator::new(test_config(), detector, recipe_api, scorer, store)
            .expect("Failed to create orchestrator")
    }

    fn food() -> Vec<Detection> {
        vec![
            Detection::new("flour", 0.8),
            Detection::new("egg", 0.9),
            Detection::new("egg", 0.4),
            Detection::new("bowl", 0.99),
        ]
    }

    fn abc_recipes() -> FakeRecipes {
        recipes(&[("1", "A", "meh"), ("2", "B", "great"), ("3", "C", "also great")])
    }

    fn abc_scorer() -> FakeScorer {
        scorer(&[("meh", 0.2), ("great", 0.8), ("also great", 0.8)])
    }

    // ============================================================================
    // Unit Tests: run
    // ============================================================================

    #[tokio::test]
    async fn test_empty_detections_report_no_ingredients() {
        let orchestrator = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let outcome = orchestrator.run(vec![]).await.unwrap();

        assert_eq!(outcome, PipelineOutcome::NoIngredients);
        assert_eq!(outcome.report_text(), "No edible ingredients detected.");
        assert!(orchestrator.recipe_api().match_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_excluded_reports_no_ingredients() {
        let orchestrator = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let detections = vec![
            Detection::new("bowl", 0.95),
            Detection::new("cup", 0.9),
            Detection::new("apple", 0.30),
        ];
        let outcome = orchestrator.run(detections).await.unwrap();

        assert_eq!(outcome.report_text(), "No edible ingredients detected.");
        assert_eq!(outcome.state(), PipelineState::NoIngredients);
    }

    #[tokio::test]
    async fn test_no_matches_reports_ingredient_list() {
        let orchestrator = build(
            FakeDetector::default(),
            FakeRecipes::default(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(
            outcome.report_text(),
            "No recipes found for ingredients: ['egg', 'flour']"
        );
        assert_eq!(
            *orchestrator.recipe_api().match_calls.lock().unwrap(),
            vec![vec!["egg".to_string(), "flour".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_match_phase_failure_reports_no_recipes() {
        let mut api = abc_recipes();
        api.match_error = true;
        let orchestrator = build(FakeDetector::default(), api, abc_scorer(), MemoryStore::default());

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(outcome.state(), PipelineState::NoRecipes);
        assert_eq!(
            outcome.report_text(),
            "No recipes found for ingredients: ['egg', 'flour']"
        );
    }

    #[tokio::test]
    async fn test_all_details_failing_yields_empty_report() {
        let mut api = recipes(&[("1", "A", "x")]);
        api.failing_details.push("1".to_string());
        let orchestrator = build(FakeDetector::default(), api, abc_scorer(), MemoryStore::default());

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(outcome.state(), PipelineState::Done);
        assert_eq!(outcome.report_text(), "");
        assert!(orchestrator.scorer().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_details_failing_writes_empty_artifact() {
        let detector = FakeDetector {
            detections: food(),
            malformed: false,
        };
        let mut api = abc_recipes();
        api.failing_details = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let store = MemoryStore::with_object("photos", "fridge.jpg", b"jpeg");
        let orchestrator = build(detector, api, abc_scorer(), store);

        let outcome = orchestrator
            .handle_event(&StorageEvent::new("photos", "fridge.jpg"))
            .await
            .unwrap()
            .expect("event should be processed");

        assert_eq!(outcome.state(), PipelineState::Done);
        assert_eq!(
            orchestrator.store().text("photos", "results/fridge.jpg.txt").unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_ranked_report_orders_by_score_with_stable_ties() {
        let orchestrator = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(outcome.state(), PipelineState::Done);
        assert_eq!(
            outcome.report_text(),
            "B: sentiment score 0.80\nC: sentiment score 0.80\nA: sentiment score 0.20"
        );
    }

    #[tokio::test]
    async fn test_detail_failure_drops_only_that_candidate() {
        let mut api = abc_recipes();
        api.failing_details.push("2".to_string());
        let orchestrator = build(FakeDetector::default(), api, abc_scorer(), MemoryStore::default());

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(
            outcome.report_text(),
            "C: sentiment score 0.80\nA: sentiment score 0.20"
        );
        assert_eq!(
            *orchestrator.scorer().seen.lock().unwrap(),
            vec!["meh".to_string(), "also great".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_summary_is_scored_as_is() {
        let orchestrator = build(
            FakeDetector::default(),
            recipes(&[("9", "Mystery Stew", "")]),
            scorer(&[("", -0.1)]),
            MemoryStore::default(),
        );

        let outcome = orchestrator.run(food()).await.unwrap();

        assert_eq!(outcome.report_text(), "Mystery Stew: sentiment score -0.10");
        assert_eq!(*orchestrator.scorer().seen.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_sentiment_failure_is_fatal() {
        let mut failing = abc_scorer();
        failing.fail = true;
        let orchestrator = build(FakeDetector::default(), abc_recipes(), failing, MemoryStore::default());

        assert!(orchestrator.run(food()).await.is_err());
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let orchestrator = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let first = orchestrator.run(food()).await.unwrap().report_text();
        let second = orchestrator.run(food()).await.unwrap().report_text();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fan_out_matches_sequential_output() {
        let sequential = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );
        let parallel = RecipeOrchestrator::new(
            test_config().with_fan_out(3),
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        )
        .unwrap();

        let a = sequential.run(food()).await.unwrap().report_text();
        let b = parallel.run(food()).await.unwrap().report_text();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_configured_exclusions_apply() {
        let orchestrator = RecipeOrchestrator::new(
            test_config().with_non_food(["egg"]),
            FakeDetector::default(),
            FakeRecipes::default(),
            abc_scorer(),
            MemoryStore::default(),
        )
        .unwrap();

        let outcome = orchestrator.run(food()).await.unwrap();

        // bowl is no longer excluded, egg is
        assert_eq!(
            outcome.report_text(),
            "No recipes found for ingredients: ['bowl', 'flour']"
        );
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let result = RecipeOrchestrator::new(
            test_config().with_min_confidence(-0.1),
            FakeDetector::default(),
            FakeRecipes::default(),
            FakeScorer::default(),
            MemoryStore::default(),
        );
        assert!(result.is_err());
    }

    // ============================================================================
    // Integration Tests: handle_event
    // ============================================================================

    #[tokio::test]
    async fn test_handle_event_writes_one_report() {
        let detector = FakeDetector {
            detections: food(),
            malformed: false,
        };
        let store = MemoryStore::with_object("photos", "fridge.jpg", b"jpeg");
        let orchestrator = build(detector, abc_recipes(), abc_scorer(), store);

        let outcome = orchestrator
            .handle_event(&StorageEvent::new("photos", "fridge.jpg"))
            .await
            .unwrap()
            .expect("event should be processed");

        assert_eq!(outcome.state(), PipelineState::Done);
        assert_eq!(orchestrator.store().len(), 2);
        assert_eq!(
            orchestrator.store().text("photos", "results/fridge.jpg.txt").unwrap(),
            "B: sentiment score 0.80\nC: sentiment score 0.80\nA: sentiment score 0.20"
        );
    }

    #[tokio::test]
    async fn test_handle_event_writes_terminal_literal() {
        let store = MemoryStore::with_object("photos", "empty.jpg", b"jpeg");
        let orchestrator = build(FakeDetector::default(), abc_recipes(), abc_scorer(), store);

        orchestrator
            .handle_event(&StorageEvent::new("photos", "empty.jpg"))
            .await
            .unwrap();

        assert_eq!(
            orchestrator.store().text("photos", "results/empty.jpg.txt").unwrap(),
            "No edible ingredients detected."
        );
    }

    #[tokio::test]
    async fn test_handle_event_ignores_own_results() {
        let store = MemoryStore::with_object("photos", "results/fridge.jpg.txt", b"old");
        let orchestrator = build(FakeDetector::default(), abc_recipes(), abc_scorer(), store);

        let outcome = orchestrator
            .handle_event(&StorageEvent::new("photos", "results/fridge.jpg.txt"))
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(orchestrator.store().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_detector_output_writes_nothing() {
        let detector = FakeDetector {
            detections: vec![],
            malformed: true,
        };
        let store = MemoryStore::with_object("photos", "fridge.jpg", b"jpeg");
        let orchestrator = build(detector, abc_recipes(), abc_scorer(), store);

        let result = orchestrator
            .handle_event(&StorageEvent::new("photos", "fridge.jpg"))
            .await;

        assert!(result.is_err());
        assert_eq!(orchestrator.store().len(), 1);
    }

    #[tokio::test]
    async fn test_sentiment_failure_writes_nothing() {
        let detector = FakeDetector {
            detections: food(),
            malformed: false,
        };
        let mut failing = abc_scorer();
        failing.fail = true;
        let store = MemoryStore::with_object("photos", "fridge.jpg", b"jpeg");
        let orchestrator = build(detector, abc_recipes(), failing, store);

        let result = orchestrator
            .handle_event(&StorageEvent::new("photos", "fridge.jpg"))
            .await;

        assert!(result.is_err());
        assert!(orchestrator.store().text("photos", "results/fridge.jpg.txt").is_none());
    }

    #[tokio::test]
    async fn test_missing_image_is_an_error() {
        let orchestrator = build(
            FakeDetector::default(),
            abc_recipes(),
            abc_scorer(),
            MemoryStore::default(),
        );

        let result = orchestrator
            .handle_event(&StorageEvent::new("photos", "ghost.jpg"))
            .await;

        assert!(result.is_err());
        assert_eq!(orchestrator.store().len(), 0);
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::NoIngredients.is_terminal());
        assert!(PipelineState::NoRecipes.is_terminal());
        assert!(PipelineState::Done.is_terminal());
        assert!(!PipelineState::Scored.is_terminal());
        assert_eq!(PipelineState::FoundRecipes.to_string(), "FOUND_RECIPES");
    }
}

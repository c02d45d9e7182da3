//! Ranker & Formatter - orders scored recipes and renders the report.
//!
//! ## Algorithm
//! 1. Pair each candidate's title with its sentiment score
//! 2. Stable sort by score, highest first; equal scores keep scoring order
//! 3. Render one `"<title>: sentiment score <score:.2>"` line per entry
//! 4. Join lines with `\n`

use std::cmp::Ordering;
use std::fmt;

use recipes::RecipeCandidate;

/// A recipe title with the polarity of its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub title: String,
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(title: impl Into<String>, score: f32) -> Self {
        Self {
            title: title.into(),
            score,
        }
    }

    pub fn render(&self) -> String {
        format!("{}: sentiment score {:.2}", self.title, self.score)
    }
}

impl From<(RecipeCandidate, f32)> for ScoredCandidate {
    fn from((candidate, score): (RecipeCandidate, f32)) -> Self {
        Self::new(candidate.title, score)
    }
}

/// NaN has no place in a polarity ordering; it sinks below every real score.
fn descending(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.total_cmp(&a.score),
    }
}

/// Sort by score descending. `sort_by` is stable, so ties stay in input order.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(descending);
    scored
}

/// The terminal text artifact of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// A report consisting of one fixed line.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Body as written to the output sink.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body())
    }
}

/// Rank scored candidates and render them as a report.
pub fn rank_and_format<I, T>(pairs: I) -> Report
where
    I: IntoIterator<Item = T>,
    T: Into<ScoredCandidate>,
{
    let ranked = rank(pairs.into_iter().map(Into::into).collect());
    Report {
        lines: ranked.iter().map(ScoredCandidate::render).collect(),
    }
}

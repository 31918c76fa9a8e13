//! # Render Options
//!
//! Tunables for the rewriter: which line classifier to use, its thresholds,
//! and which bare roots count as ordinary words on lyric lines.
//!
//! Options load from YAML. Every key is optional:
//!
//! ```yaml
//! classifier: space-density   # or alpha-density
//! min-line-length: 6
//! density-threshold: 0.2
//! ambiguous-words: [A, E, La, Mi, Si, Sol]
//! ```
//!
//! ```rust
//! use chordsheet::RenderOptions;
//!
//! let options = RenderOptions::from_yaml("classifier: alpha-density\ndensity-threshold: 0.6")?;
//! assert!(options.is_ambiguous_word("La"));
//! # Ok::<(), chordsheet::SheetError>(())
//! ```

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::classify::{
    AlphaDensity, LineClassifier, LineKind, SpaceDensity, DEFAULT_ALPHA_THRESHOLD,
    DEFAULT_MIN_LENGTH, DEFAULT_SPACE_THRESHOLD,
};
use crate::error::SheetError;

/// Bare roots that are also common words in Spanish lyrics
pub const DEFAULT_AMBIGUOUS_WORDS: [&str; 6] = ["A", "E", "La", "Mi", "Si", "Sol"];

/// Raw options for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRenderOptions {
    classifier: Option<String>,
    min_line_length: Option<usize>,
    density_threshold: Option<f64>,
    ambiguous_words: Option<Vec<String>>,
}

/// The line classifier selected by configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classifier {
    SpaceDensity(SpaceDensity),
    AlphaDensity(AlphaDensity),
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::SpaceDensity(SpaceDensity::default())
    }
}

impl LineClassifier for Classifier {
    fn classify(&self, line: &str) -> LineKind {
        match self {
            Classifier::SpaceDensity(c) => c.classify(line),
            Classifier::AlphaDensity(c) => c.classify(line),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub classifier: Classifier,
    pub ambiguous_words: BTreeSet<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            ambiguous_words: DEFAULT_AMBIGUOUS_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl RenderOptions {
    pub fn from_yaml(content: &str) -> Result<Self, SheetError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawRenderOptions =
            serde_yaml::from_str(content).map_err(|e| SheetError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRenderOptions) -> Result<Self, SheetError> {
        let min_length = raw.min_line_length.unwrap_or(DEFAULT_MIN_LENGTH);

        if let Some(threshold) = raw.density_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(SheetError::ConfigError(format!(
                    "density-threshold must be between 0 and 1, got {}",
                    threshold
                )));
            }
        }

        let classifier = match raw.classifier.as_deref().unwrap_or("space-density") {
            "space-density" => Classifier::SpaceDensity(SpaceDensity {
                min_length,
                threshold: raw.density_threshold.unwrap_or(DEFAULT_SPACE_THRESHOLD),
            }),
            "alpha-density" => Classifier::AlphaDensity(AlphaDensity {
                min_length,
                threshold: raw.density_threshold.unwrap_or(DEFAULT_ALPHA_THRESHOLD),
            }),
            other => {
                return Err(SheetError::ConfigError(format!(
                    "Unknown classifier '{}'. Expected: space-density or alpha-density",
                    other
                )))
            }
        };

        let ambiguous_words = match raw.ambiguous_words {
            Some(words) => words.into_iter().map(|w| w.trim().to_string()).collect(),
            None => Self::default().ambiguous_words,
        };

        Ok(Self {
            classifier,
            ambiguous_words,
        })
    }

    pub fn is_ambiguous_word(&self, word: &str) -> bool {
        self.ambiguous_words.contains(word)
    }
}

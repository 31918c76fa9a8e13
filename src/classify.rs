//! # Line Classification
//!
//! Decides whether a line is a chord line (sparse, short tokens spread out
//! to sit above syllables) or a lyric line (dense prose). The label only
//! matters for bare roots that double as ordinary words; see
//! [`crate::render`].
//!
//! Two heuristics of the same shape are provided, both measuring the share
//! of "lyric-looking" content in the line:
//!
//! - [`SpaceDensity`]: ratio of space characters to line length. Above the
//!   threshold means chord line.
//! - [`AlphaDensity`]: ratio of alphabetic characters to line length. Above
//!   the threshold means lyric line.
//!
//! Lines no longer than `min_length` characters are chord lines under both.
//! Thresholds are product judgments, not derived values; they are exposed
//! through [`crate::config::RenderOptions`]. Any `Fn(&str) -> LineKind` is
//! also a classifier.
//!
//! ```rust
//! use chordsheet::classify::{LineClassifier, LineKind, SpaceDensity};
//!
//! let classifier = SpaceDensity::default();
//! assert_eq!(classifier.classify("La    Mi    Fa#"), LineKind::Chord);
//! assert_eq!(
//!     classifier.classify("Vamos a cantar con alegria La gloria de Dios"),
//!     LineKind::Lyric
//! );
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Chord,
    Lyric,
}

pub trait LineClassifier {
    fn classify(&self, line: &str) -> LineKind;
}

impl<F> LineClassifier for F
where
    F: Fn(&str) -> LineKind,
{
    fn classify(&self, line: &str) -> LineKind {
        self(line)
    }
}

pub const DEFAULT_MIN_LENGTH: usize = 6;
pub const DEFAULT_SPACE_THRESHOLD: f64 = 0.2;
pub const DEFAULT_ALPHA_THRESHOLD: f64 = 0.7;

/// Chord line when `spaces / length > threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceDensity {
    pub min_length: usize,
    pub threshold: f64,
}

impl Default for SpaceDensity {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            threshold: DEFAULT_SPACE_THRESHOLD,
        }
    }
}

impl LineClassifier for SpaceDensity {
    fn classify(&self, line: &str) -> LineKind {
        let length = line.chars().count();
        if length <= self.min_length {
            return LineKind::Chord;
        }
        let spaces = line.chars().filter(|&c| c == ' ').count();
        if spaces as f64 / length as f64 > self.threshold {
            LineKind::Chord
        } else {
            LineKind::Lyric
        }
    }
}

/// Lyric line when `alphabetic / length > threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaDensity {
    pub min_length: usize,
    pub threshold: f64,
}

impl Default for AlphaDensity {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl LineClassifier for AlphaDensity {
    fn classify(&self, line: &str) -> LineKind {
        let length = line.chars().count();
        if length <= self.min_length {
            return LineKind::Chord;
        }
        let alphabetic = line.chars().filter(|c| c.is_alphabetic()).count();
        if alphabetic as f64 / length as f64 > self.threshold {
            LineKind::Lyric
        } else {
            LineKind::Chord
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LYRIC: &str = "Vamos a cantar con alegria La gloria de Dios";
    const CHORDS: &str = "La    Mi    Fa#";

    #[test]
    fn test_space_density() {
        let c = SpaceDensity::default();
        assert_eq!(c.classify(CHORDS), LineKind::Chord);
        assert_eq!(c.classify(LYRIC), LineKind::Lyric);
    }

    #[test]
    fn test_short_lines_are_chord_lines() {
        let c = SpaceDensity::default();
        assert_eq!(c.classify("Hola"), LineKind::Chord);
        assert_eq!(c.classify("abcdef"), LineKind::Chord);
        // Seven characters, no spaces
        assert_eq!(c.classify("abcdefg"), LineKind::Lyric);
        assert_eq!(AlphaDensity::default().classify("Señor"), LineKind::Chord);
    }

    #[test]
    fn test_space_threshold_is_strict() {
        // 2 spaces in 10 characters is exactly 0.2
        let c = SpaceDensity::default();
        assert_eq!(c.classify("abc de fgh"), LineKind::Lyric);
        assert_eq!(c.classify("ab  cd efg"), LineKind::Chord);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let c = SpaceDensity {
            min_length: 6,
            threshold: 0.2,
        };
        // Six characters but more than six bytes
        assert_eq!(c.classify("ñañaña"), LineKind::Chord);
    }

    #[test]
    fn test_alpha_density() {
        let c = AlphaDensity::default();
        assert_eq!(c.classify(CHORDS), LineKind::Chord);
        assert_eq!(c.classify(LYRIC), LineKind::Lyric);
        assert_eq!(c.classify("Am7   G7/B   C#m7"), LineKind::Chord);
    }

    #[test]
    fn test_tunable_threshold() {
        let strict = SpaceDensity {
            min_length: 6,
            threshold: 0.15,
        };
        // 7 spaces in 40 characters = 0.175
        let line = "Que alegria cuando me dijeron vamos a la";
        assert_eq!(line.chars().count(), 40);
        assert_eq!(strict.classify(line), LineKind::Chord);
        assert_eq!(SpaceDensity::default().classify(line), LineKind::Lyric);
    }

    #[test]
    fn test_closure_classifier() {
        let always_lyric = |_: &str| LineKind::Lyric;
        assert_eq!(always_lyric.classify(CHORDS), LineKind::Lyric);
    }
}

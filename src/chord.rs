//! # Chord Token Grammar
//!
//! Recognizes chord symbols among the whitespace-delimited runs of a line.
//!
//! ## Grammar
//! ```text
//! chord  = ROOT SUFFIX*            (must cover the whole run)
//! ROOT   = Do#? | Re#? | Mi | Fa#? | Sol#? | La#? | Si
//!        | [A-G] [#b]?
//! SUFFIX = # b m M d i a t u s j 0-9
//! ```
//!
//! Roots are lexed longest-first: Latin syllables before single letters, and
//! an accidental is taken into the root when that root spelling allows it.
//! Because `#` and `b` are also suffix characters, taking the longest root
//! never turns a matching run into a non-matching one.
//!
//! ## Examples
//! ```rust
//! use chordsheet::chord::parse_token;
//!
//! let chord = parse_token("Rem7").unwrap();
//! assert_eq!((chord.root.as_str(), chord.suffix.as_str()), ("Re", "m7"));
//!
//! let chord = parse_token("Bbsus4").unwrap();
//! assert_eq!((chord.root.as_str(), chord.suffix.as_str()), ("Bb", "sus4"));
//!
//! assert!(parse_token("Dios").is_none()); // 'o' is not a suffix character
//! ```

use std::fmt;

use serde::Serialize;

use crate::notes::{canonicalize_flat, transpose, NamingSystem, PitchClass};

/// Latin syllables and whether they take a trailing `#` into the root
const LATIN_ROOTS: [(&str, bool); 7] = [
    ("Do", true),
    ("Re", true),
    ("Mi", false),
    ("Fa", true),
    ("Sol", true),
    ("La", true),
    ("Si", false),
];

/// A run that matched the chord grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordToken {
    /// Root exactly as spelled in the input (or as produced by transposition)
    pub root: String,
    /// Quality and extensions, never altered by transposition
    pub suffix: String,
}

impl ChordToken {
    pub fn new(root: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    /// True when the chord is only a root, e.g. `La` or `F#`
    pub fn is_bare(&self) -> bool {
        self.suffix.is_empty()
    }

    /// Naming system of the root, if it resolves to a pitch class
    pub fn naming_system(&self) -> Option<NamingSystem> {
        PitchClass::from_name(&self.root).map(|(_, system)| system)
    }

    /// Shift the root by `semitones`, keeping the suffix verbatim.
    ///
    /// A zero shift echoes the input spelling, flats included. Any other
    /// shift canonicalizes flats and emits sharp or Latin spellings.
    pub fn transposed(&self, semitones: i32) -> ChordToken {
        if semitones == 0 {
            return self.clone();
        }
        let root = transpose(canonicalize_flat(&self.root), semitones);
        ChordToken::new(root, self.suffix.as_str())
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)
    }
}

/// One run of a line: whitespace or a non-whitespace word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Whitespace(&'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Whitespace(s) | Token::Word(s) => s,
        }
    }
}

fn is_suffix_char(c: char) -> bool {
    matches!(
        c,
        '#' | 'b' | 'm' | 'M' | 'd' | 'i' | 'a' | 't' | 'u' | 's' | 'j' | '0'..='9'
    )
}

/// Byte length of the longest root at the start of `word`
fn lex_root(word: &str) -> Option<usize> {
    for (syllable, takes_sharp) in LATIN_ROOTS {
        if let Some(rest) = word.strip_prefix(syllable) {
            let sharp = takes_sharp && rest.starts_with('#');
            return Some(syllable.len() + usize::from(sharp));
        }
    }

    let mut chars = word.chars();
    match chars.next() {
        Some('A'..='G') => {}
        _ => return None,
    }
    match chars.next() {
        Some('#') | Some('b') => Some(2),
        _ => Some(1),
    }
}

/// Parse a whole non-whitespace run as a chord.
///
/// Returns `None` for plain words: no recognized root, or any character
/// after the root outside the suffix class.
pub fn parse_token(word: &str) -> Option<ChordToken> {
    let root_len = lex_root(word)?;
    let (root, suffix) = word.split_at(root_len);
    if suffix.chars().all(is_suffix_char) {
        Some(ChordToken::new(root, suffix))
    } else {
        None
    }
}

/// Split a line into alternating whitespace and word runs.
///
/// Runs are returned verbatim, so concatenating them gives back `line`.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (pos, c) in line.char_indices() {
        let ws = c.is_whitespace();
        match in_whitespace {
            Some(prev) if prev != ws => {
                tokens.push(make_token(&line[start..pos], prev));
                start = pos;
            }
            _ => {}
        }
        in_whitespace = Some(ws);
    }

    if let Some(ws) = in_whitespace {
        tokens.push(make_token(&line[start..], ws));
    }

    tokens
}

fn make_token(run: &str, whitespace: bool) -> Token<'_> {
    if whitespace {
        Token::Whitespace(run)
    } else {
        Token::Word(run)
    }
}

//! # Line-Aware Rewriter
//!
//! Turns lyric text with interleaved chord lines into a [`RenderedDocument`]:
//! chords are detected, transposed and marked, and everything else is kept
//! verbatim so the chords stay aligned above their syllables.
//!
//! ## Pipeline (per line)
//! 1. Blank or whitespace-only line → [`RenderedLine::Blank`]
//! 2. Classify the line (chord line vs lyric line)
//! 3. Split into whitespace and word runs, whitespace kept as-is
//! 4. Match each word against the chord grammar
//! 5. On lyric lines, bare roots that are ordinary words (`La`, `Si`, `A`...)
//!    stay plain text. A root with a suffix (`La7`) is always a chord.
//! 6. Transpose chord roots; suffixes are never touched
//!
//! A zero shift skips the transposer entirely and echoes the chord as
//! written, flats included.
//!
//! ## Output
//! - [`RenderedDocument::to_html`]: chords in `<b>`, whitespace as `&nbsp;`,
//!   lines joined with `<br>`, blank lines as a lone `&nbsp;`
//! - [`RenderedDocument::to_plain_text`]: transposed text without markup
//!
//! ## Example
//! ```rust
//! use chordsheet::render_text;
//!
//! let doc = render_text("La    Mi    Fa#\nLa gloria de Dios en el cielo brilla", 2);
//! assert_eq!(
//!     doc.to_html(),
//!     "<b>Si</b>&nbsp;&nbsp;&nbsp;&nbsp;<b>Fa#</b>&nbsp;&nbsp;&nbsp;&nbsp;<b>Sol#</b>\
//!      <br>La&nbsp;gloria&nbsp;de&nbsp;Dios&nbsp;en&nbsp;el&nbsp;cielo&nbsp;brilla"
//! );
//! ```

use std::borrow::Cow;

use quick_xml::escape::escape;
use serde::Serialize;
use tracing::{debug, trace};

use crate::chord::{parse_token, tokenize_line, ChordToken, Token};
use crate::classify::{LineClassifier, LineKind};
use crate::config::RenderOptions;

pub const NBSP: &str = "&nbsp;";
pub const LINE_BREAK: &str = "<br>";
pub const EMPHASIS_OPEN: &str = "<b>";
pub const EMPHASIS_CLOSE: &str = "</b>";

/// A piece of a rendered line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Fragment {
    /// Literal text, passed through
    Text(String),
    /// A whitespace run exactly as in the source
    Space(String),
    /// A detected chord, already transposed
    Chord(ChordToken),
}

impl Fragment {
    pub fn is_markup(&self) -> bool {
        matches!(self, Fragment::Chord(_))
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Fragment::Text(s) | Fragment::Space(s) => Cow::Borrowed(s),
            Fragment::Chord(chord) => Cow::Owned(chord.to_string()),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Fragment::Text(s) => out.push_str(&escape(s.as_str())),
            Fragment::Space(s) => {
                for _ in s.chars() {
                    out.push_str(NBSP);
                }
            }
            Fragment::Chord(chord) => {
                out.push_str(EMPHASIS_OPEN);
                out.push_str(&escape(chord.to_string().as_str()));
                out.push_str(EMPHASIS_CLOSE);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fragments", rename_all = "lowercase")]
pub enum RenderedLine {
    /// Empty or whitespace-only source line
    Blank,
    Fragments(Vec<Fragment>),
}

impl RenderedLine {
    pub fn fragments(&self) -> &[Fragment] {
        match self {
            RenderedLine::Blank => &[],
            RenderedLine::Fragments(fragments) => fragments,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            RenderedLine::Blank => NBSP.to_string(),
            RenderedLine::Fragments(fragments) => {
                let mut out = String::new();
                for fragment in fragments {
                    fragment.write_html(&mut out);
                }
                out
            }
        }
    }

    pub fn to_plain_text(&self) -> String {
        self.fragments().iter().map(|f| f.text()).collect()
    }
}

/// The rendering of one (text, semitones) pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub semitones: i32,
    pub lines: Vec<RenderedLine>,
}

impl RenderedDocument {
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All chords in document order
    pub fn chords(&self) -> impl Iterator<Item = &ChordToken> {
        self.lines
            .iter()
            .flat_map(|line| line.fragments())
            .filter_map(|fragment| match fragment {
                Fragment::Chord(chord) => Some(chord),
                _ => None,
            })
    }

    pub fn to_html(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::to_html)
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }

    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::to_plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render with the default classifier and word list.
///
/// Empty input gives an empty document.
pub fn render_text(source: &str, semitones: i32) -> RenderedDocument {
    render_text_with(source, semitones, &RenderOptions::default())
}

pub fn render_text_with(source: &str, semitones: i32, options: &RenderOptions) -> RenderedDocument {
    render_with_classifier(source, semitones, &options.classifier, options)
}

/// Render with a caller-supplied classifier in place of `options.classifier`
pub fn render_with_classifier<C>(
    source: &str,
    semitones: i32,
    classifier: &C,
    options: &RenderOptions,
) -> RenderedDocument
where
    C: LineClassifier + ?Sized,
{
    if source.is_empty() {
        return RenderedDocument {
            semitones,
            lines: Vec::new(),
        };
    }

    let lines: Vec<RenderedLine> = source
        .split('\n')
        .map(|line| render_line(line, semitones, classifier, options))
        .collect();

    let document = RenderedDocument { semitones, lines };
    debug!(
        lines = document.lines.len(),
        chords = document.chords().count(),
        semitones,
        "rendered document"
    );
    document
}

fn render_line<C>(line: &str, semitones: i32, classifier: &C, options: &RenderOptions) -> RenderedLine
where
    C: LineClassifier + ?Sized,
{
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return RenderedLine::Blank;
    }

    let kind = classifier.classify(line);
    trace!(?kind, line, "classified line");

    let fragments = tokenize_line(line)
        .into_iter()
        .map(|token| match token {
            Token::Whitespace(run) => Fragment::Space(run.to_string()),
            Token::Word(word) => render_word(word, kind, semitones, options),
        })
        .collect();

    RenderedLine::Fragments(fragments)
}

fn render_word(word: &str, kind: LineKind, semitones: i32, options: &RenderOptions) -> Fragment {
    match parse_token(word) {
        Some(chord)
            if kind == LineKind::Lyric
                && chord.is_bare()
                && options.is_ambiguous_word(&chord.root) =>
        {
            Fragment::Text(word.to_string())
        }
        Some(chord) => Fragment::Chord(chord.transposed(semitones)),
        None => Fragment::Text(word.to_string()),
    }
}

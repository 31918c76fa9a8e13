//! # Song Documents
//!
//! A stored song is a small text document: `Label: value` header lines, a
//! blank separator, then the lyric body with its chord lines.
//!
//! ```text
//! Title: Alabaré
//! Author: Popular
//! Category: Entrada
//! Reference: https://example.org/alabare
//!
//! Do              Sol
//! Alabaré, alabaré, alabaré a mi Señor
//! ```
//!
//! Labels are case-insensitive and accept Spanish aliases (`Título`,
//! `Autor`, `Categoría`, `Referencia`, `URL`). A document whose first
//! non-empty line is not a recognized label has no header and is all body.

use quick_xml::escape::escape;
use serde::Serialize;
use tracing::debug;

use crate::config::RenderOptions;
use crate::error::SheetError;
use crate::render::{render_text_with, RenderedDocument};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    /// Empty when the document has no header
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub metadata: SongMetadata,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Label {
    Title,
    Author,
    Category,
    Reference,
}

impl Label {
    fn from_str(name: &str) -> Option<Label> {
        match name.trim().to_lowercase().as_str() {
            "title" | "título" | "titulo" => Some(Label::Title),
            "author" | "autor" => Some(Label::Author),
            "category" | "categoría" | "categoria" => Some(Label::Category),
            "reference" | "referencia" | "url" => Some(Label::Reference),
            _ => None,
        }
    }
}

fn split_label(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(label, value)| (label.trim(), value.trim()))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Song {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            metadata: SongMetadata {
                title: title.into(),
                ..SongMetadata::default()
            },
            body: body.into(),
        }
    }

    pub fn parse(document: &str) -> Result<Song, SheetError> {
        let lines: Vec<&str> = document.split('\n').collect();

        let start = lines.iter().position(|line| !line.trim().is_empty());
        let has_header = start
            .and_then(|idx| split_label(lines[idx]))
            .and_then(|(label, _)| Label::from_str(label))
            .is_some();

        let start = match start {
            Some(idx) if has_header => idx,
            _ => {
                debug!("song document has no metadata header");
                return Ok(Song {
                    metadata: SongMetadata::default(),
                    body: document.to_string(),
                });
            }
        };

        let mut metadata = SongMetadata::default();
        let mut seen: Vec<Label> = Vec::new();
        let mut idx = start;

        while idx < lines.len() && !lines[idx].trim().is_empty() {
            let line_number = idx + 1;
            let (name, value) = split_label(lines[idx]).ok_or_else(|| SheetError::MetadataError {
                line: line_number,
                message: format!("Expected 'Label: value', found '{}'", lines[idx].trim()),
            })?;
            let label = Label::from_str(name).ok_or_else(|| SheetError::MetadataError {
                line: line_number,
                message: format!(
                    "Unknown label '{}'. Expected: Title, Author, Category, or Reference",
                    name
                ),
            })?;
            if seen.contains(&label) {
                return Err(SheetError::MetadataError {
                    line: line_number,
                    message: format!("Duplicate label '{}'", name),
                });
            }
            seen.push(label);

            match label {
                Label::Title => metadata.title = value.to_string(),
                Label::Author => metadata.author = non_empty(value),
                Label::Category => metadata.category = non_empty(value),
                Label::Reference => metadata.reference = non_empty(value),
            }
            idx += 1;
        }

        if metadata.title.is_empty() {
            return Err(SheetError::MetadataError {
                line: start + 1,
                message: "Header is missing a title".to_string(),
            });
        }

        // Skip the single blank separator line
        let body = lines.get(idx + 1..).map(|rest| rest.join("\n")).unwrap_or_default();

        Ok(Song { metadata, body })
    }

    /// Case-insensitive substring match on the title. An empty query matches.
    pub fn title_matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self
                .metadata
                .title
                .to_lowercase()
                .contains(&query.to_lowercase())
    }

    pub fn render(&self, semitones: i32, options: &RenderOptions) -> RenderedDocument {
        render_text_with(&self.body, semitones, options)
    }
}

/// Render a song as a self-contained viewer block: title heading, rule, body.
pub fn render_song_html(song: &Song, semitones: i32, options: &RenderOptions) -> String {
    let body = song.render(semitones, options).to_html();
    if song.metadata.title.is_empty() {
        format!(r#"<div class="chord-sheet">{}</div>"#, body)
    } else {
        format!(
            r#"<div class="chord-sheet"><h2>{}</h2><hr>{}</div>"#,
            escape(song.metadata.title.as_str()),
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "Title: Alabaré\nAuthor: Popular\nCategory: Entrada\nReference: https://example.org/alabare\n\nDo              Sol\nAlabaré, alabaré, alabaré a mi Señor";

    #[test]
    fn test_parse_full_header() {
        let song = Song::parse(DOCUMENT).unwrap();
        assert_eq!(song.metadata.title, "Alabaré");
        assert_eq!(song.metadata.author.as_deref(), Some("Popular"));
        assert_eq!(song.metadata.category.as_deref(), Some("Entrada"));
        assert_eq!(
            song.metadata.reference.as_deref(),
            Some("https://example.org/alabare")
        );
        assert_eq!(
            song.body,
            "Do              Sol\nAlabaré, alabaré, alabaré a mi Señor"
        );
    }

    #[test]
    fn test_spanish_labels() {
        let song = Song::parse("Título: Pescador\nAUTOR: Gabaraín\nCategoría: Comunión\n\nRe  La").unwrap();
        assert_eq!(song.metadata.title, "Pescador");
        assert_eq!(song.metadata.author.as_deref(), Some("Gabaraín"));
        assert_eq!(song.metadata.category.as_deref(), Some("Comunión"));
        assert_eq!(song.metadata.reference, None);
        assert_eq!(song.body, "Re  La");
    }

    #[test]
    fn test_body_keeps_inner_blank_lines() {
        let song = Song::parse("Title: X\n\nDo\n\nSol\n").unwrap();
        assert_eq!(song.body, "Do\n\nSol\n");
    }

    #[test]
    fn test_no_header_is_all_body() {
        let text = "Do    Sol\nCantaré al Señor";
        let song = Song::parse(text).unwrap();
        assert_eq!(song.metadata, SongMetadata::default());
        assert_eq!(song.body, text);
    }

    #[test]
    fn test_header_only() {
        let song = Song::parse("Title: Empty").unwrap();
        assert_eq!(song.metadata.title, "Empty");
        assert_eq!(song.body, "");
    }

    #[test]
    fn test_unknown_label_reports_line() {
        let err = Song::parse("Title: X\nColour: red\n\nDo").unwrap_err();
        match err {
            SheetError::MetadataError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("Colour"));
            }
            other => panic!("Expected MetadataError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_title() {
        let err = Song::parse("Author: Someone\n\nDo").unwrap_err();
        assert!(matches!(err, SheetError::MetadataError { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_label() {
        let err = Song::parse("Title: A\nTitle: B\n\nDo").unwrap_err();
        assert!(matches!(err, SheetError::MetadataError { line: 2, .. }));
    }

    #[test]
    fn test_title_matches() {
        let song = Song::new("Alabaré a mi Señor", "");
        assert!(song.title_matches("alabaré"));
        assert!(song.title_matches("SEÑOR"));
        assert!(song.title_matches(""));
        assert!(!song.title_matches("pescador"));
    }

    #[test]
    fn test_render_song_html() {
        let song = Song::new("Tú & yo", "Do   Sol");
        let html = render_song_html(&song, 2, &RenderOptions::default());
        assert_eq!(
            html,
            r#"<div class="chord-sheet"><h2>Tú &amp; yo</h2><hr><b>Re</b>&nbsp;&nbsp;&nbsp;<b>La</b></div>"#
        );
    }

    #[test]
    fn test_render_song_without_title() {
        let song = Song::new("", "Do");
        let html = render_song_html(&song, 0, &RenderOptions::default());
        assert_eq!(html, r#"<div class="chord-sheet"><b>Do</b></div>"#);
    }
}

//! # chordsheet
//!
//! Detects chord symbols in lyric sheets, transposes them, and renders the
//! sheet with chords highlighted and their alignment above the lyrics kept.
//!
//! Both Latin (`Do Re Mi`) and American (`C D E`) note names are supported.
//!
//! ```rust
//! use chordsheet::render_text;
//!
//! let sheet = "Rem7      Sol\nTe alabaré, Señor, con todo el corazón";
//! let doc = render_text(sheet, 1);
//! assert_eq!(
//!     doc.to_plain_text(),
//!     "Re#m7      Sol#\nTe alabaré, Señor, con todo el corazón"
//! );
//! ```

pub mod chord;
pub mod classify;
pub mod config;
pub mod error;
pub mod notes;
pub mod render;
pub mod song;

pub use chord::{parse_token, ChordToken};
pub use classify::{LineClassifier, LineKind};
pub use config::RenderOptions;
pub use error::*;
pub use notes::{transpose, NamingSystem, PitchClass};
pub use render::{render_text, render_text_with, Fragment, RenderedDocument, RenderedLine};
pub use song::{render_song_html, Song, SongMetadata};

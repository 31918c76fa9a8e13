use std::env;
use std::fs;
use std::process;

use chordsheet::{render_song_html, RenderOptions, Song};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: chordsheet [--transpose N] [--format html|text|json] [--config options.yaml] <song.txt> [output]";

/// Range offered to singers; the library itself accepts any shift
const MAX_SHIFT: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Html,
    Text,
    Json,
}

struct Args {
    semitones: i32,
    format: Format,
    config_path: Option<String>,
    input_path: String,
    output_path: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut semitones = 0;
    let mut format = Format::Html;
    let mut config_path = None;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--transpose" | "-t" => {
                let value = iter.next().ok_or("--transpose requires a value")?;
                semitones = value
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid semitone count '{}'", value))?;
                if !(-MAX_SHIFT..=MAX_SHIFT).contains(&semitones) {
                    return Err(format!(
                        "--transpose must be between -{} and {}, got {}",
                        MAX_SHIFT, MAX_SHIFT, semitones
                    ));
                }
            }
            "--format" | "-f" => {
                let value = iter.next().ok_or("--format requires a value")?;
                format = match value.as_str() {
                    "html" => Format::Html,
                    "text" => Format::Text,
                    "json" => Format::Json,
                    other => return Err(format!("Unknown format '{}'", other)),
                };
            }
            "--config" | "-c" => {
                let value = iter.next().ok_or("--config requires a path")?;
                config_path = Some(value.clone());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option '{}'", flag));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let input_path = positional.next().ok_or("Missing input file")?;
    let output_path = positional.next();
    if positional.next().is_some() {
        return Err("Too many arguments".to_string());
    }

    Ok(Args {
        semitones,
        format,
        config_path,
        input_path,
        output_path,
    })
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chordsheet=warn")))
        .init();

    let raw_args: Vec<String> = env::args().collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let options = match &args.config_path {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match RenderOptions::from_yaml(&content) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        None => RenderOptions::default(),
    };

    let source = match fs::read_to_string(&args.input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", args.input_path, e);
            process::exit(1);
        }
    };

    let song = match Song::parse(&source) {
        Ok(song) => song,
        Err(e) => {
            eprintln!("Error in '{}': {}", args.input_path, e);
            process::exit(1);
        }
    };
    tracing::info!(title = %song.metadata.title, semitones = args.semitones, "rendering song");

    let output = match args.format {
        Format::Html => render_song_html(&song, args.semitones, &options),
        Format::Text => song.render(args.semitones, &options).to_plain_text(),
        Format::Json => {
            let document = song.render(args.semitones, &options);
            let payload = serde_json::json!({
                "metadata": song.metadata,
                "document": document,
            });
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    match args.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote {} to {}", song_label(&song), path);
        }
        None => {
            println!("{}", output);
        }
    }
}

fn song_label(song: &Song) -> &str {
    if song.metadata.title.is_empty() {
        "song"
    } else {
        &song.metadata.title
    }
}

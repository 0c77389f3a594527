//! Command line surface and per-command TOML settings.
//!
//! Each command reads `<command>.toml` from the working directory when it
//! exists, or the file named by `--config`. Flags given on the command line
//! override the file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::vocabulary::BlankLines;

#[derive(Parser, Debug)]
#[command(name = "wordpack")]
#[command(about = "Pack text word embeddings into a word list and a flat f32 buffer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert text embedding files into embedding-words.json and embedding-values.bin
    Pack {
        /// Text embedding files, read in order; earlier files win on duplicate words
        inputs: Vec<PathBuf>,
        #[arg(long)]
        words_out: Option<PathBuf>,
        #[arg(long)]
        values_out: Option<PathBuf>,
        #[arg(long, value_enum)]
        blank_lines: Option<BlankLines>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Embed a plain word list and write it in the text embedding format
    Embed {
        word_list: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the nearest neighbours of a word and their position on an axis
    Nearest {
        word: String,
        #[arg(short = 'k', long)]
        neighbors: Option<usize>,
        #[command(flatten)]
        packed: PackedArgs,
    },
    /// Interactive terminal explorer over packed embeddings
    Explore {
        #[command(flatten)]
        packed: PackedArgs,
    },
}

/// Options shared by the commands that read packed embeddings.
#[derive(clap::Args, Debug, Default)]
pub struct PackedArgs {
    #[arg(long)]
    pub words: Option<PathBuf>,
    #[arg(long)]
    pub values: Option<PathBuf>,
    #[arg(long)]
    pub left: Option<String>,
    #[arg(long)]
    pub right: Option<String>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Settings for the `pack` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackSettings {
    pub inputs: Vec<PathBuf>,
    pub words_out: PathBuf,
    pub values_out: PathBuf,
    pub blank_lines: BlankLines,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("w2v_gnews_small.txt")],
            words_out: PathBuf::from("embedding-words.json"),
            values_out: PathBuf::from("embedding-values.bin"),
            blank_lines: BlankLines::Skip,
        }
    }
}

/// Settings for the `embed` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbedSettings {
    pub word_list: PathBuf,
    pub output: PathBuf,
    pub show_download_progress: bool,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            word_list: PathBuf::from("words.txt"),
            output: PathBuf::from("word_embeddings.txt"),
            show_download_progress: true,
        }
    }
}

/// Settings for the `nearest` and `explore` commands.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuerySettings {
    pub words: PathBuf,
    pub values: PathBuf,
    pub left: String,
    pub right: String,
    pub neighbors: usize,
    pub suggestions: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            words: PathBuf::from("embedding-words.json"),
            values: PathBuf::from("embedding-values.bin"),
            left: "he".to_string(),
            right: "she".to_string(),
            neighbors: 20,
            suggestions: 10,
        }
    }
}

impl QuerySettings {
    pub fn apply(&mut self, args: PackedArgs) {
        if let Some(words) = args.words {
            self.words = words;
        }
        if let Some(values) = args.values {
            self.values = values;
        }
        if let Some(left) = args.left {
            self.left = left;
        }
        if let Some(right) = args.right {
            self.right = right;
        }
    }
}

/// Loads TOML settings for the requested command, falling back to defaults when missing.
pub fn load_settings<T>(command: &str, explicit: Option<PathBuf>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let (candidate, explicit_provided) = match explicit {
        Some(path) => (path, true),
        None => (PathBuf::from(format!("{command}.toml")), false),
    };

    if candidate.exists() {
        let raw = std::fs::read_to_string(&candidate).with_context(|| {
            format!(
                "failed to read configuration for `{command}` from {}",
                candidate.display()
            )
        })?;
        toml::from_str(&raw).with_context(|| {
            format!(
                "failed to parse TOML configuration for `{command}` at {}",
                candidate.display()
            )
        })
    } else if explicit_provided {
        bail!(
            "configuration file for `{command}` not found at {}",
            candidate.display()
        );
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn load_settings_returns_default_when_missing() {
        let settings: PackSettings =
            load_settings("definitely-not-a-command", None).expect("default settings");
        assert_eq!(settings, PackSettings::default());
    }

    #[test]
    fn load_settings_errors_for_missing_explicit_path() {
        let result: Result<PackSettings> =
            load_settings("pack", Some(PathBuf::from("definitely_missing.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_settings_parses_partial_toml() {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.into_temp_path();
        std::fs::write(
            &path,
            r#"inputs = ["a.txt", "b.txt"]
blank_lines = "keep"
"#,
        )
        .expect("write config");

        let settings: PackSettings =
            load_settings("pack", Some(path.to_path_buf())).expect("parsed settings");
        assert_eq!(
            settings.inputs,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert_eq!(settings.blank_lines, BlankLines::Keep);
        assert_eq!(settings.words_out, PathBuf::from("embedding-words.json"));
    }

    #[test]
    fn flags_override_query_settings() {
        let mut settings = QuerySettings::default();
        settings.apply(PackedArgs {
            left: Some("good".to_string()),
            right: Some("bad".to_string()),
            ..PackedArgs::default()
        });
        assert_eq!(settings.left, "good");
        assert_eq!(settings.right, "bad");
        assert_eq!(settings.words, PathBuf::from("embedding-words.json"));
    }

    #[test]
    fn cli_parses_pack_inputs() {
        let cli = Cli::parse_from(["wordpack", "pack", "a.txt", "b.txt", "--blank-lines", "keep"]);
        match cli.command {
            Command::Pack {
                inputs,
                blank_lines,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(blank_lines, Some(BlankLines::Keep));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

//! Configuration loading and parsing.
//!
//! Parses `lined.toml` (or an override path provided by the binary). Two
//! sections are recognised:
//!
//! * `[styles]` maps semantic categories (prompt, right prompt, mode banner,
//!   tip, completion, current completion, already-typed qualifier) to SGR
//!   tags, with a
//!   nested `[styles.tokens]` table mapping token kinds to tags.
//! * `[terminal]` carries `fallback_columns`, the width used when the width
//!   query fails before any successful query.
//!
//! Tags are opaque strings interpolated verbatim into `ESC[<tag>m`. Every field
//! defaults when absent and unknown fields are ignored.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "lined.toml";

/// Semantic category -> SGR tag table handed to the renderer at construction.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Styles {
    pub prompt: String,
    pub rprompt: String,
    pub mode: String,
    pub tip: String,
    /// Tag for a candidate spliced into the input line.
    pub completion: String,
    pub current_completion: String,
    /// Qualifier appended to a candidate's tag for parts the user already typed.
    pub already_typed: String,
    pub tokens: HashMap<String, String>,
}

impl Default for Styles {
    fn default() -> Self {
        let tokens = [
            ("plain", ""),
            ("bareword", ""),
            ("single_quoted", "33"),
            ("double_quoted", "33"),
            ("variable", "35"),
            ("wildcard", ""),
            ("tilde", ""),
            ("comment", "34"),
            ("error", "31;3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            prompt: String::new(),
            rprompt: "7".to_string(),
            mode: "1;7;33".to_string(),
            tip: String::new(),
            completion: "1".to_string(),
            current_completion: "7".to_string(),
            already_typed: ";4".to_string(),
            tokens,
        }
    }
}

impl Styles {
    /// Tag for a token kind; unmapped kinds render unstyled.
    pub fn token(&self, kind: &str) -> &str {
        self.tokens.get(kind).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default = "TerminalConfig::default_fallback_columns")]
    pub fallback_columns: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            fallback_columns: Self::default_fallback_columns(),
        }
    }
}

impl TerminalConfig {
    const fn default_fallback_columns() -> u16 {
        80
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub styles: Styles,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

impl Config {
    pub fn styles(&self) -> &Styles {
        &self.file.styles
    }

    /// Width used when querying the terminal fails; never zero.
    pub fn fallback_columns(&self) -> u16 {
        self.file.terminal.fallback_columns.max(1)
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lined").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                token_kinds = file.styles.tokens.len(),
                fallback_columns = file.terminal.fallback_columns,
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            // Unparseable file: keep running on defaults.
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

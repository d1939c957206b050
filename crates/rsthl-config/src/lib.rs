//! Configuration management for rst2html-highlight.
//!
//! Parses `rst2html.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [html]
//! stylesheets = ["css/highlight.css"]
//! embed_stylesheet = true
//! initial_header_level = 2
//!
//! [highlight]
//! token_names = "short"
//! syntaxes_dir = "syntaxes"
//!
//! [report]
//! level = "warning"
//! strict = false
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override stylesheet paths.
    pub stylesheets: Option<Vec<PathBuf>>,
    /// Override whether stylesheets are embedded or linked.
    pub embed_stylesheet: Option<bool>,
    /// Override page template file.
    pub template: Option<PathBuf>,
    /// Override document title.
    pub title: Option<String>,
    /// Override heading level of top-level sections.
    pub initial_header_level: Option<u8>,
    /// Override title promotion.
    pub doctitle: Option<bool>,
    /// Override token class naming.
    pub token_names: Option<TokenNames>,
    /// Override extra grammar directory.
    pub syntaxes_dir: Option<PathBuf>,
    /// Override report level.
    pub report_level: Option<ReportLevel>,
    /// Override strict mode.
    pub strict: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rst2html.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML output configuration (paths are relative strings from TOML).
    html: HtmlConfigRaw,
    /// Highlighting configuration (paths are relative strings from TOML).
    highlight: HighlightConfigRaw,
    /// System message reporting configuration.
    pub report: ReportConfig,

    /// Resolved HTML configuration (set after loading).
    #[serde(skip)]
    pub html_resolved: HtmlConfig,
    /// Resolved highlighting configuration (set after loading).
    #[serde(skip)]
    pub highlight_resolved: HighlightConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw HTML configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HtmlConfigRaw {
    stylesheets: Option<Vec<String>>,
    embed_stylesheet: Option<bool>,
    template: Option<String>,
    title: Option<String>,
    initial_header_level: Option<u8>,
    doctitle: Option<bool>,
    language: Option<String>,
}

/// Resolved HTML configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlConfig {
    /// Stylesheet files; empty means the built-in stylesheet.
    pub stylesheets: Vec<PathBuf>,
    /// Embed stylesheets in the page instead of linking them.
    pub embed_stylesheet: bool,
    /// Page template file.
    pub template: Option<PathBuf>,
    /// Document title override.
    pub title: Option<String>,
    /// Heading level of top-level sections.
    pub initial_header_level: u8,
    /// Promote a lone top-level section to the document title.
    pub doctitle: bool,
    /// Document language.
    pub language: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            stylesheets: Vec::new(),
            embed_stylesheet: true,
            template: None,
            title: None,
            initial_header_level: 2,
            doctitle: true,
            language: "en".to_owned(),
        }
    }
}

/// Raw highlighting configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HighlightConfigRaw {
    token_names: Option<TokenNames>,
    syntaxes_dir: Option<String>,
}

/// Resolved highlighting configuration with absolute paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightConfig {
    /// CSS class naming of highlighted tokens.
    pub token_names: TokenNames,
    /// Directory with extra `.sublime-syntax` grammars.
    pub syntaxes_dir: Option<PathBuf>,
}

/// System message reporting configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Lowest level of reported system messages.
    pub level: ReportLevel,
    /// Fail when a warning or worse was reported.
    pub strict: bool,
}

/// CSS class naming of highlighted tokens.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenNames {
    #[default]
    Short,
    Long,
    None,
}

impl FromStr for TokenNames {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            "none" => Ok(Self::None),
            _ => Err(format!("expected short, long or none, got \"{s}\"")),
        }
    }
}

impl fmt::Display for TokenNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Short => "short",
            Self::Long => "long",
            Self::None => "none",
        })
    }
}

/// Lowest reported system message level.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Info,
    #[default]
    Warning,
    Error,
    Severe,
    /// Report nothing.
    None,
}

impl FromStr for ReportLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" | "1" => Ok(Self::Info),
            "warning" | "2" => Ok(Self::Warning),
            "error" | "3" => Ok(Self::Error),
            "severe" | "4" => Ok(Self::Severe),
            "none" | "5" => Ok(Self::None),
            _ => Err(format!(
                "expected info, warning, error, severe or none, got \"{s}\""
            )),
        }
    }
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Severe => "severe",
            Self::None => "none",
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rst2html.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated after the overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let html = &mut self.html_resolved;
        if let Some(stylesheets) = &settings.stylesheets {
            html.stylesheets.clone_from(stylesheets);
        }
        if let Some(embed) = settings.embed_stylesheet {
            html.embed_stylesheet = embed;
        }
        if let Some(template) = &settings.template {
            html.template = Some(template.clone());
        }
        if let Some(title) = &settings.title {
            html.title = Some(title.clone());
        }
        if let Some(level) = settings.initial_header_level {
            html.initial_header_level = level;
        }
        if let Some(doctitle) = settings.doctitle {
            html.doctitle = doctitle;
        }
        if let Some(token_names) = settings.token_names {
            self.highlight_resolved.token_names = token_names;
        }
        if let Some(dir) = &settings.syntaxes_dir {
            self.highlight_resolved.syntaxes_dir = Some(dir.clone());
        }
        if let Some(level) = settings.report_level {
            self.report.level = level;
        }
        if let Some(strict) = settings.strict {
            self.report.strict = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        discover_from(&cwd)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.html_resolved.initial_header_level;
        if !(1..=6).contains(&level) {
            return Err(ConfigError::Validation(format!(
                "html.initial_header_level must be between 1 and 6, got {level}"
            )));
        }
        if self.html_resolved.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "html.language cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = HtmlConfig::default();
        let html = &self.html;
        self.html_resolved = HtmlConfig {
            stylesheets: html
                .stylesheets
                .iter()
                .flatten()
                .map(|s| config_dir.join(s))
                .collect(),
            embed_stylesheet: html.embed_stylesheet.unwrap_or(defaults.embed_stylesheet),
            template: html.template.as_ref().map(|t| config_dir.join(t)),
            title: html.title.clone(),
            initial_header_level: html
                .initial_header_level
                .unwrap_or(defaults.initial_header_level),
            doctitle: html.doctitle.unwrap_or(defaults.doctitle),
            language: html.language.clone().unwrap_or(defaults.language),
        };

        self.highlight_resolved = HighlightConfig {
            token_names: self.highlight.token_names.unwrap_or_default(),
            syntaxes_dir: self
                .highlight
                .syntaxes_dir
                .as_ref()
                .map(|d| config_dir.join(d)),
        };
    }
}

/// Find the config file in `start` or its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

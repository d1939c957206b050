//! Document conversion, the default command.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rsthl_config::{CliSettings, Config, HighlightConfig, HtmlConfig, ReportLevel, TokenNames};
use rsthl_highlight::{
    CodeBlockDirective, DEFAULT_STYLESHEET, Highlighter, LexerRegistry, SyntaxSource,
};
use rsthl_renderer::{
    DirectiveRegistry, HtmlSettings, Level, PublishSettings, Publisher, Stylesheet,
};

use crate::error::CliError;
use crate::output::Output;

/// Conversion arguments.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Source file (default: stdin; "-" also reads stdin).
    source: Option<PathBuf>,

    /// Destination file (default: stdout; "-" also writes stdout).
    destination: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rst2html.toml).
    #[arg(short, long, env = "RST2HTML_CONFIG")]
    config: Option<PathBuf>,

    /// Stylesheet file; repeat for several (overrides config).
    #[arg(long = "stylesheet", value_name = "PATH")]
    stylesheets: Vec<PathBuf>,

    /// Embed stylesheets in the output (default).
    #[arg(long)]
    embed_stylesheet: bool,

    /// Link stylesheets instead of embedding them.
    #[arg(long, conflicts_with = "embed_stylesheet")]
    link_stylesheet: bool,

    /// Page template file with %(name)s placeholders.
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Document title, overriding the promoted section title.
    #[arg(long)]
    title: Option<String>,

    /// Heading level of top-level sections, 1-6 (default: 2).
    #[arg(long, value_name = "LEVEL")]
    initial_header_level: Option<u8>,

    /// Do not promote a lone top-level section to the document title.
    #[arg(long)]
    no_doc_title: bool,

    /// Token class names of code blocks: short, long or none.
    #[arg(long, value_name = "NAMES")]
    syntax_highlight: Option<TokenNames>,

    /// Directory with extra .sublime-syntax grammars.
    #[arg(long, value_name = "DIR")]
    syntaxes_dir: Option<PathBuf>,

    /// Report system messages at or above this level: info, warning, error,
    /// severe or none.
    #[arg(short, long, value_name = "LEVEL")]
    report: Option<ReportLevel>,

    /// Exit with status 1 if any warning or worse was reported.
    #[arg(long)]
    strict: bool,

    /// Show the cause chain of errors.
    #[arg(long)]
    pub traceback: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// List available languages and exit.
    #[arg(long)]
    list_languages: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails, or in strict
    /// mode when warnings were reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            stylesheets: (!self.stylesheets.is_empty()).then(|| self.stylesheets.clone()),
            embed_stylesheet: self
                .link_stylesheet
                .then_some(false)
                .or(self.embed_stylesheet.then_some(true)),
            template: self.template.clone(),
            title: self.title.clone(),
            initial_header_level: self.initial_header_level,
            doctitle: self.no_doc_title.then_some(false),
            token_names: self.syntax_highlight,
            syntaxes_dir: self.syntaxes_dir.clone(),
            report_level: self.report,
            strict: self.strict.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        if self.list_languages {
            let registry = LexerRegistry::load(&syntax_source(&config.highlight_resolved))?;
            return super::languages::list_languages(&registry, &mut std::io::stdout().lock());
        }

        let source_name = display_name(self.source.as_deref(), "<stdin>");
        let source = read_source(self.source.as_deref())?;

        let directives = DirectiveRegistry::new()
            .with_admonitions()
            .with(CodeBlockDirective::new(highlighter(
                &config.highlight_resolved,
                &output,
            )));
        let settings = PublishSettings {
            html: html_settings(&config.html_resolved, config.report.level)?,
            doctitle: config.html_resolved.doctitle,
        };
        let published = Publisher::new(&directives)
            .with_settings(settings)
            .publish(&source)?;

        write_destination(self.destination.as_deref(), &published.html)?;

        if let Some(threshold) = level(config.report.level) {
            for message in published.messages.iter().filter(|m| m.level >= threshold) {
                output.system_message(&source_name, message);
            }
        }
        tracing::info!(
            source = %source_name,
            destination = %display_name(self.destination.as_deref(), "<stdout>"),
            messages = published.messages.len(),
            "Converted document"
        );

        if config.report.strict {
            let count = published
                .messages
                .iter()
                .filter(|m| m.level >= Level::Warning)
                .count();
            if count > 0 {
                return Err(CliError::Strict { count });
            }
        }
        Ok(())
    }
}

/// Whether a path argument means a standard stream.
fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn display_name(path: Option<&Path>, stdio: &str) -> String {
    match path {
        Some(p) if !is_stdio(Some(p)) => p.display().to_string(),
        _ => stdio.to_owned(),
    }
}

fn read_source(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(p) if !is_stdio(Some(p)) => read_file(p),
        _ => {
            let mut source = String::new();
            std::io::stdin().lock().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_destination(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    match path {
        Some(p) if !is_stdio(Some(p)) => {
            std::fs::write(p, html).map_err(|source| CliError::Write {
                path: p.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn syntax_source(config: &HighlightConfig) -> SyntaxSource {
    config
        .syntaxes_dir
        .clone()
        .map_or(SyntaxSource::Defaults, SyntaxSource::Directory)
}

/// Build the highlighter, degrading to verbatim code if grammars fail to load.
fn highlighter(config: &HighlightConfig, output: &Output) -> Highlighter {
    let token_names = match config.token_names {
        TokenNames::Short => rsthl_highlight::TokenNames::Short,
        TokenNames::Long => rsthl_highlight::TokenNames::Long,
        TokenNames::None => return Highlighter::unavailable(),
    };
    match LexerRegistry::load(&syntax_source(config)) {
        Ok(registry) => Highlighter::new(registry).with_token_names(token_names),
        Err(err) => {
            tracing::warn!(error = %err, "Lexers unavailable, code blocks are not highlighted");
            output.warning(&format!("Warning: {err}; code blocks are not highlighted"));
            Highlighter::unavailable().with_token_names(token_names)
        }
    }
}

fn html_settings(config: &HtmlConfig, report: ReportLevel) -> Result<HtmlSettings, CliError> {
    let stylesheets = if config.stylesheets.is_empty() {
        vec![Stylesheet::Embedded(DEFAULT_STYLESHEET.to_owned())]
    } else if config.embed_stylesheet {
        config
            .stylesheets
            .iter()
            .map(|path| read_file(path).map(Stylesheet::Embedded))
            .collect::<Result<_, _>>()?
    } else {
        config
            .stylesheets
            .iter()
            .map(|path| Stylesheet::Link(path.display().to_string()))
            .collect()
    };
    let template = config.template.as_deref().map(read_file).transpose()?;

    Ok(HtmlSettings {
        stylesheets,
        template,
        title: config.title.clone(),
        initial_header_level: config.initial_header_level,
        language: config.language.clone(),
        report_level: level(report),
        ..HtmlSettings::default()
    })
}

/// Lowest reported message level; `None` reports nothing.
fn level(report: ReportLevel) -> Option<Level> {
    match report {
        ReportLevel::Info => Some(Level::Info),
        ReportLevel::Warning => Some(Level::Warning),
        ReportLevel::Error => Some(Level::Error),
        ReportLevel::Severe => Some(Level::Severe),
        ReportLevel::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stdio_paths() {
        assert!(is_stdio(None));
        assert!(is_stdio(Some(Path::new("-"))));
        assert!(!is_stdio(Some(Path::new("doc.rst"))));
        assert_eq!(display_name(Some(Path::new("-")), "<stdin>"), "<stdin>");
        assert_eq!(display_name(Some(Path::new("doc.rst")), "<stdin>"), "doc.rst");
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level(ReportLevel::Info), Some(Level::Info));
        assert_eq!(level(ReportLevel::Severe), Some(Level::Severe));
        assert_eq!(level(ReportLevel::None), None);
    }

    #[test]
    fn test_default_stylesheet_is_embedded() {
        let settings = html_settings(&HtmlConfig::default(), ReportLevel::Warning).unwrap();
        assert_eq!(
            settings.stylesheets,
            vec![Stylesheet::Embedded(DEFAULT_STYLESHEET.to_owned())]
        );
        assert_eq!(settings.report_level, Some(Level::Warning));
    }

    #[test]
    fn test_configured_stylesheets() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("site.css");
        std::fs::write(&css, "body { margin: 0; }").unwrap();

        let mut config = HtmlConfig {
            stylesheets: vec![css.clone()],
            ..HtmlConfig::default()
        };
        let embedded = html_settings(&config, ReportLevel::None).unwrap();
        assert_eq!(
            embedded.stylesheets,
            vec![Stylesheet::Embedded("body { margin: 0; }".to_owned())]
        );
        assert_eq!(embedded.report_level, None);

        config.embed_stylesheet = false;
        let linked = html_settings(&config, ReportLevel::Warning).unwrap();
        assert_eq!(
            linked.stylesheets,
            vec![Stylesheet::Link(css.display().to_string())]
        );
    }

    #[test]
    fn test_missing_stylesheet_fails() {
        let config = HtmlConfig {
            stylesheets: vec![PathBuf::from("/nonexistent/site.css")],
            ..HtmlConfig::default()
        };
        let err = html_settings(&config, ReportLevel::Warning).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_highlighter_degrades_on_missing_grammars() {
        let dir = tempfile::tempdir().unwrap();
        let config = HighlightConfig {
            syntaxes_dir: Some(dir.path().join("missing")),
            ..HighlightConfig::default()
        };
        let highlighter = highlighter(&config, &Output::new());
        let tokens: Vec<_> = highlighter.classify("python", "import os").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "import os");
        assert_eq!(tokens[0].class, "");
    }

    #[test]
    fn test_write_and_read_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_destination(Some(path.as_path()), "<p>x</p>").unwrap();
        assert_eq!(read_source(Some(path.as_path())).unwrap(), "<p>x</p>");
    }
}

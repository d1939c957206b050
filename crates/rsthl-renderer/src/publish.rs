//! Publishing pipeline: parse, transform, write.

use crate::directive::DirectiveRegistry;
use crate::html::{HtmlSettings, HtmlWriter, TemplateError};
use crate::nodes::{Document, SystemMessage};
use crate::{parser, transforms};

/// Publishing error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Settings for one publish run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishSettings {
    pub html: HtmlSettings,
    /// Promote a lone top-level section to the document title.
    pub doctitle: bool,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            html: HtmlSettings::default(),
            doctitle: true,
        }
    }
}

/// Result of publishing a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishOutput {
    /// Complete HTML page.
    pub html: String,
    /// Plain-text document title, if one was promoted.
    pub title: Option<String>,
    /// System messages in the order they were reported.
    pub messages: Vec<SystemMessage>,
}

/// Converts reStructuredText to HTML using an explicit directive registry.
pub struct Publisher<'r> {
    registry: &'r DirectiveRegistry,
    settings: PublishSettings,
}

impl<'r> Publisher<'r> {
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            settings: PublishSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PublishSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parse and transform a document without writing it.
    #[must_use]
    pub fn document(&self, source: &str) -> Document {
        let mut document = parser::parse(source, self.registry);
        transforms::apply(&mut document, self.settings.doctitle);
        document
    }

    /// Convert a source document into an HTML page.
    pub fn publish(&self, source: &str) -> Result<PublishOutput, PublishError> {
        let document = self.document(source);
        let html = HtmlWriter::new(&self.settings.html).page(&document)?;
        let title = document.title_text();
        tracing::debug!(
            title = title.as_deref().unwrap_or(""),
            messages = document.messages.len(),
            bytes = html.len(),
            "Published document"
        );
        Ok(PublishOutput {
            html,
            title,
            messages: document.messages,
        })
    }
}

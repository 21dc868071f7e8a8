//! Pulls notice elements back out of buffered admin output.
//!
//! The stored html is whatever producers printed while rendering notices, so it
//! is often a fragment, sometimes broken. html5ever repairs it, we select every
//! element carrying the `notice` class token and serialize the matches again, in
//! document order, as one standalone blob.

use std::borrow::Cow;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::filters::Filters;
use crate::models::ExtractionResult;

/// `notice` as a whitespace separated class token, `noticeable` does not match.
pub const NOTICE_EXPRESSION: &str = r#"[class~="notice"]"#;

static NOTICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(NOTICE_EXPRESSION).expect("default notice selector"));

const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Clone, Debug)]
pub struct Extractor {
    expression: String,
    selector: Selector,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            expression: NOTICE_EXPRESSION.to_owned(),
            selector: NOTICE_SELECTOR.clone(),
        }
    }
}

impl Extractor {
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        let selector = Selector::parse(&expression)
            .map_err(|e| anyhow!("invalid notice selector `{expression}`: {e:?}"))?;
        Ok(Self {
            expression,
            selector,
        })
    }

    /// Runs the selection filter over `configured` (or the default expression).
    /// A result that does not compile falls back to the default.
    pub fn from_filters(filters: &Filters, configured: Option<&str>) -> Self {
        let expression = filters.apply_selector(configured.unwrap_or(NOTICE_EXPRESSION).to_owned());
        if expression == NOTICE_EXPRESSION {
            return Self::default();
        }

        Self::new(expression).unwrap_or_else(|e| {
            tracing::warn!("{e:#}, using {NOTICE_EXPRESSION}");
            Self::default()
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn extract(&self, raw: &str) -> ExtractionResult {
        if raw.trim().is_empty() {
            return ExtractionResult::empty();
        }

        let document = Html::parse_document(raw);
        for error in &document.errors {
            tracing::trace!("html: {error}");
        }

        let nodes = document
            .select(&self.selector)
            .map(|node| node.html())
            .collect::<Vec<_>>();

        let count = nodes.len();
        let content = nodes.join("\n").trim().to_owned();

        tracing::debug!(count, expression = %self.expression, "notices extracted");

        ExtractionResult { count, content }
    }

    pub fn extract_bytes(&self, raw: &[u8]) -> ExtractionResult {
        self.extract(&normalize(raw))
    }
}

/// Best effort utf-8 view of stored bytes, never fails.
pub fn normalize(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

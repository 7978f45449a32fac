//! Remote number lookup and the report pipeline.
//!
//! One GET per lookup, fixed timeout, no retry. The response body is
//! loosely-typed JSON; anything that is not a top-level mapping is wrapped
//! as `{"raw": <value>}` so redaction and rendering always see a mapping.
//! A successful render always attempts a history append, even when the
//! caller discards the report text.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::history::{HistoryError, HistoryStore};
use crate::report::{self, ReportFormatter};

/// Character cap on derived history summaries.
const SUMMARY_MAX_CHARS: usize = 100;

/// Errors from the lookup API call.
///
/// All variants surface to the user as the same generic "try later"
/// message; the variants exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP transport failure or timeout.
    #[error("lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API responded with a non-success status.
    #[error("lookup API returned status {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// Non-empty response body was not valid JSON.
    #[error("lookup API returned invalid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// HTTP client bound to the lookup endpoint template.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    api_base: String,
}

impl LookupClient {
    /// Build a client for `api_base` with the given request timeout.
    ///
    /// The queried digits are appended verbatim to `api_base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into(),
        })
    }

    /// Fetch the raw payload for `number`, normalized to a mapping.
    ///
    /// An empty body is tolerated and treated as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failure, timeout, non-success
    /// status, or a body that is not JSON. Single attempt, no retry.
    pub async fn fetch(&self, number: &str) -> Result<Map<String, Value>, LookupError> {
        let url = format!("{}{number}", self.api_base);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(normalize_shape(value))
    }
}

/// Force a top-level mapping shape.
///
/// The API occasionally returns a bare list or scalar; those are wrapped
/// under a `raw` key rather than surfaced as errors.
pub fn normalize_shape(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("raw".to_owned(), other);
            map
        }
    }
}

/// Derive the compact history summary from a cleaned payload.
///
/// Precedence: `status`, else `sim`, else the first remaining value in
/// iteration order, else `"No summary"`. A null or blank `status`/`sim`
/// falls through to the next candidate. Nested values are serialized to
/// JSON. The result is capped at 100 characters.
pub fn derive_summary(fields: &Map<String, Value>) -> String {
    let chosen = non_blank(fields.get("status"))
        .or_else(|| non_blank(fields.get("sim")))
        .or_else(|| fields.values().next());

    let text = match chosen {
        None | Some(Value::Null) => "No summary".to_owned(),
        Some(Value::String(s)) if s.trim().is_empty() => "No summary".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
        Some(other) => other.to_string(),
    };

    text.chars().take(SUMMARY_MAX_CHARS).collect()
}

/// Treat null and blank-string values as absent for summary selection.
fn non_blank(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// A fully rendered lookup, ready to send and to log.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// Queried digits.
    pub number: String,
    /// HTML-mode report text.
    pub text: String,
    /// Compact summary for the history log.
    pub summary: String,
}

/// Orchestrates fetch, redaction, rendering, and the history side effect.
pub struct LookupService {
    client: LookupClient,
    formatter: ReportFormatter,
    history: Arc<HistoryStore>,
}

impl LookupService {
    /// Assemble the service from its injected parts.
    pub fn new(client: LookupClient, formatter: ReportFormatter, history: Arc<HistoryStore>) -> Self {
        Self {
            client,
            formatter,
            history,
        }
    }

    /// Fetch and render a report for `number`. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the API cannot be reached or returns
    /// garbage; redaction and rendering themselves never fail.
    pub async fn fetch_report(&self, number: &str) -> Result<RenderedReport, LookupError> {
        let payload = self.client.fetch(number).await?;
        let cleaned = report::cleanup(&payload);
        let text = self.formatter.render(number, &cleaned);
        let summary = derive_summary(&cleaned);
        debug!(number, summary = %summary, "report rendered");
        Ok(RenderedReport {
            number: number.to_owned(),
            text,
            summary,
        })
    }

    /// Append a rendered report to the user's history.
    ///
    /// # Errors
    ///
    /// Returns the underlying persistence error so callers that care
    /// (the save action) can acknowledge failure.
    pub async fn record(&self, user_id: &str, rendered: &RenderedReport) -> Result<(), HistoryError> {
        self.history
            .append(user_id, &rendered.number, &rendered.summary)
            .await
    }

    /// Full pipeline: fetch, render, then record history.
    ///
    /// The append happens on every success path, even if the caller never
    /// displays the report. A failed append is logged and does not fail
    /// the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the fetch/render step fails.
    pub async fn lookup(&self, user_id: &str, number: &str) -> Result<RenderedReport, LookupError> {
        let rendered = self.fetch_report(number).await?;
        if let Err(err) = self.record(user_id, &rendered).await {
            warn!(user_id, number, error = %err, "history append failed");
        }
        Ok(rendered)
    }
}

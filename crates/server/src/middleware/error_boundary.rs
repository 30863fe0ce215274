//! Failure-to-response conversion.
//!
//! The pipeline never converts failures on its own; this middleware is the
//! one place that does. In development mode it renders a diagnostic
//! response negotiated from the request's `Accept` header (JSON payload or
//! HTML page). In production mode it reports the failure to an injected
//! [`ErrorSink`] and answers with a plain 500.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use indoc::formatdoc;
use serde::Serialize;
use tracing::error;
use weft_message::{Message, Response, ResponseFactory, ServerRequest};

use crate::middleware::{BoxError, Middleware};
use crate::pipeline::Next;

#[cfg(test)]
use mockall::automock;

/// Which surface failures get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Rich diagnostics in the response itself.
    Development,
    /// Report to the sink, answer a bare 500.
    #[default]
    Production,
}

/// Boundary collaborator receiving production failures.
#[cfg_attr(test, automock)]
pub trait ErrorSink: Send + Sync {
    /// `message` is the failure's display form, `trace` its debug form.
    fn error(&self, message: &str, trace: &str);
}

/// [`ErrorSink`] logging through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn error(&self, message: &str, trace: &str) {
        error!(trace = %trace, "{message}");
    }
}

#[derive(Serialize)]
struct Diagnostic<'a> {
    status: &'static str,
    message: String,
    trace: &'a str,
}

/// Middleware converting downstream failures into responses.
pub struct ErrorBoundary {
    mode: ExecutionMode,
    sink: Arc<dyn ErrorSink>,
}

impl fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBoundary").field("mode", &self.mode).finish()
    }
}

impl ErrorBoundary {
    /// A boundary reporting through [`TracingSink`].
    pub fn new(mode: ExecutionMode) -> Self {
        Self::with_sink(mode, Arc::new(TracingSink))
    }

    pub fn with_sink(mode: ExecutionMode, sink: Arc<dyn ErrorSink>) -> Self {
        Self { mode, sink }
    }

    fn development_response(&self, wants_json: bool, err: &BoxError) -> Result<Response, BoxError> {
        let factory = ResponseFactory::new();
        let trace = format!("{err:?}");

        if wants_json {
            let diagnostic = Diagnostic { status: "error", message: err.to_string(), trace: &trace };
            return Ok(factory.json(&diagnostic)?.with_status(500));
        }

        let page = formatdoc! {r#"
            <!DOCTYPE html>
            <html>
            <head><title>Unhandled failure</title></head>
            <body>
            <h1>Unhandled failure</h1>
            <p>{message}</p>
            <pre>{trace}</pre>
            </body>
            </html>
        "#,
            message = escape_html(&err.to_string()),
            trace = escape_html(&trace),
        };

        let response =
            factory.internal_server_error().with_header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref());
        response.body().write_str(&page);
        Ok(response)
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[async_trait]
impl Middleware for ErrorBoundary {
    async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
        let wants_json = request.accepts_json();

        match next.handle(request).await {
            Ok(response) => Ok(response),
            Err(err) => match self.mode {
                ExecutionMode::Development => self.development_response(wants_json, &err),
                ExecutionMode::Production => {
                    self.sink.error(&err.to_string(), &format!("{err:?}"));
                    Ok(ResponseFactory::new().internal_server_error())
                }
            },
        }
    }
}

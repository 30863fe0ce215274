//! The middleware pipeline.
//!
//! A [`Pipeline`] pairs a [`MiddlewareRegistry`] with an ordered sequence
//! of tokens. Invocation threads its position through [`Next`] values
//! instead of keeping a cursor, so a pipeline carries no per-request state:
//! one pipeline value can serve any number of requests.

use std::fmt;

use tracing::{debug, trace};
use weft_message::{Response, ResponseFactory, ServerRequest};

use crate::error::PipelineError;
use crate::middleware::{BoxError, Middleware};
use crate::registry::MiddlewareRegistry;

/// Ordered middleware sequence over a registry.
pub struct Pipeline {
    registry: MiddlewareRegistry,
    sequence: Vec<String>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("registry", &self.registry).field("sequence", &self.sequence).finish()
    }
}

/// The response produced when the sequence is exhausted.
fn terminal_response() -> Response {
    ResponseFactory::new().ok()
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Number of stages in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Runs `request` through the sequence, starting at the first stage.
    ///
    /// Each stage is resolved to a fresh instance and invoked with a
    /// [`Next`] pointing at the stage after it. When the sequence is
    /// exhausted — immediately, for an empty pipeline — the terminal
    /// response (status 200, empty body) is returned. Middleware failures
    /// are not converted; they surface to the caller.
    pub async fn handle(&self, request: ServerRequest) -> Result<Response, BoxError> {
        self.next_at(0).handle(request).await
    }

    fn next_at(&self, index: usize) -> Next<'_> {
        Next { pipeline: self, index }
    }
}

/// Handle onto the remainder of a pipeline, passed to middleware as the
/// delegation target.
#[derive(Debug, Clone, Copy)]
pub struct Next<'a> {
    pipeline: &'a Pipeline,
    index: usize,
}

impl Next<'_> {
    /// Invokes the stage this handle points at, or returns the terminal
    /// response when the sequence is exhausted.
    pub async fn handle(self, request: ServerRequest) -> Result<Response, BoxError> {
        let Some(token) = self.pipeline.sequence.get(self.index) else {
            trace!("sequence exhausted, returning terminal response");
            return Ok(terminal_response());
        };

        let middleware = self
            .pipeline
            .registry
            .resolve(token)
            .ok_or_else(|| PipelineError::unknown_middleware(token))?;

        debug!(token = %token, index = self.index, "dispatching middleware");
        middleware.process(request, self.pipeline.next_at(self.index + 1)).await
    }
}

/// Builds a [`Pipeline`]; the sequence is append-only and frozen at
/// [`build`](Self::build).
#[derive(Default)]
pub struct PipelineBuilder {
    registry: MiddlewareRegistry,
    sequence: Vec<String>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder").field("registry", &self.registry).field("sequence", &self.sequence).finish()
    }
}

impl PipelineBuilder {
    /// Registers a factory without appending it to the sequence.
    pub fn register<F, M>(mut self, token: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        self.registry.register(token, factory);
        self
    }

    /// Appends a previously registered token to the sequence.
    pub fn via(mut self, token: impl Into<String>) -> Self {
        self.sequence.push(token.into());
        self
    }

    /// Appends several tokens in order.
    pub fn via_all<I>(mut self, tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sequence.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Registers a factory and appends its token in one step.
    pub fn with<F, M>(self, token: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        let token = token.into();
        self.register(token.clone(), factory).via(token)
    }

    pub fn build(self) -> Pipeline {
        Pipeline { registry: self.registry, sequence: self.sequence }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use weft_message::Message;

    use super::*;

    struct ShortCircuit;

    #[async_trait]
    impl Middleware for ShortCircuit {
        async fn process(&self, _request: ServerRequest, _next: Next<'_>) -> Result<Response, BoxError> {
            Ok(ResponseFactory::new().forbidden())
        }
    }

    struct Tagging;

    #[async_trait]
    impl Middleware for Tagging {
        async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
            let request = request.with_attribute("tagged", true);
            let response = next.handle(request).await?;
            Ok(response.with_header("X-Tagged", "yes"))
        }
    }

    struct AssertTagged;

    #[async_trait]
    impl Middleware for AssertTagged {
        async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
            assert_eq!(request.attribute("tagged"), Some(&serde_json::json!(true)));
            next.handle(request).await
        }
    }

    struct Failing;

    #[async_trait]
    impl Middleware for Failing {
        async fn process(&self, _request: ServerRequest, _next: Next<'_>) -> Result<Response, BoxError> {
            Err("boom".into())
        }
    }

    #[tokio::test]
    async fn empty_pipeline_returns_the_terminal_response() {
        let pipeline = Pipeline::builder().build();

        let response = pipeline.handle(ServerRequest::new()).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.body().contents(), "");
    }

    #[tokio::test]
    async fn short_circuit_skips_later_stages() {
        let pipeline = Pipeline::builder()
            .with("guard", || ShortCircuit)
            .with("never-reached", || Failing)
            .build();

        let response = pipeline.handle(ServerRequest::new()).await.unwrap();

        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn stages_see_the_transformed_request() {
        let pipeline = Pipeline::builder()
            .with("tagging", || Tagging)
            .with("assert-tagged", || AssertTagged)
            .build();

        let response = pipeline.handle(ServerRequest::new()).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.header_line("X-Tagged"), "yes");
    }

    #[tokio::test]
    async fn failures_surface_to_the_caller() {
        let pipeline = Pipeline::builder().with("failing", || Failing).build();

        let err = pipeline.handle(ServerRequest::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn unregistered_tokens_are_a_setup_error() {
        let pipeline = Pipeline::builder().via("missing").build();

        let err = pipeline.handle(ServerRequest::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "no middleware registered for token 'missing'");
    }

    #[tokio::test]
    async fn a_pipeline_value_is_reusable_across_requests() {
        let pipeline = Pipeline::builder().with("tagging", || Tagging).build();

        for _ in 0..3 {
            let response = pipeline.handle(ServerRequest::new()).await.unwrap();
            assert_eq!(response.status(), 200);
            assert_eq!(response.header_line("X-Tagged"), "yes");
        }
    }

    #[tokio::test]
    async fn via_all_appends_in_order() {
        let pipeline = Pipeline::builder()
            .register("guard", || ShortCircuit)
            .register("tagging", || Tagging)
            .via_all(["tagging", "guard"])
            .build();

        assert_eq!(pipeline.len(), 2);

        let response = pipeline.handle(ServerRequest::new()).await.unwrap();

        // Tagging wraps the guard's short-circuit response.
        assert_eq!(response.status(), 403);
        assert_eq!(response.header_line("X-Tagged"), "yes");
    }
}

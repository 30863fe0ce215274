//! The middleware contract.

pub mod error_boundary;

use async_trait::async_trait;
use weft_message::{Response, ServerRequest};

use crate::pipeline::Next;

/// Failure type flowing out of middleware and the pipeline.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A stage in request processing.
///
/// A middleware may inspect or transform the request, delegate to the rest
/// of the chain via `next.handle(request)` (zero or more times, typically
/// once), transform the response it gets back, or short-circuit by
/// returning its own response without delegating.
///
/// Failures propagate to the pipeline caller untouched; converting them
/// into responses is itself a middleware concern (see
/// [`error_boundary::ErrorBoundary`]).
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError>;
}

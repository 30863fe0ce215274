//! Middleware pipeline and response dispatch over `weft-message` values.
//!
//! A [`Pipeline`] runs a [`ServerRequest`](weft_message::ServerRequest)
//! through an ordered sequence of [`Middleware`] stages. Stages are
//! registered as factories under opaque tokens and constructed fresh per
//! dispatch; the pipeline itself holds no per-request state, so one value
//! serves any number of requests. When every stage has delegated, the
//! pipeline answers with the terminal response (200, empty body).
//!
//! Failures are never converted into responses by the pipeline — that is
//! the job of [`ErrorBoundary`], the one middleware that catches.
//!
//! # Example
//!
//! ```
//! use weft_message::{Message, Response, ServerRequest};
//! use weft_server::{BoxError, Middleware, Next, Pipeline};
//!
//! struct Greet;
//!
//! #[async_trait::async_trait]
//! impl Middleware for Greet {
//!     async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
//!         let response = next.handle(request).await?;
//!         response.body().write_str("hello");
//!         Ok(response)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), BoxError> {
//! let pipeline = Pipeline::builder().with("greet", || Greet).build();
//!
//! let response = pipeline.handle(ServerRequest::new()).await?;
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body().contents(), "hello");
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod middleware;

mod error;
mod pipeline;
mod registry;

pub use dispatcher::ResponseDispatcher;
pub use error::{DispatchError, PipelineError};
pub use middleware::error_boundary::{ErrorBoundary, ErrorSink, ExecutionMode, TracingSink};
pub use middleware::{BoxError, Middleware};
pub use pipeline::{Next, Pipeline, PipelineBuilder};
pub use registry::MiddlewareRegistry;

//! Immutable HTTP message and URI value objects.
//!
//! This crate models the *shape* of HTTP exchanges — URIs, requests,
//! responses, headers, bodies — as copy-on-write values. Every `with_*`
//! mutator returns a new instance and leaves the receiver untouched; the
//! only mutable state is the body stream, which is a shared handle by
//! design. It is not a wire parser: transport concerns live behind the
//! small boundary types in [`context`] and [`upload`].
//!
//! # Example
//!
//! ```
//! use weft_message::context::{REQUEST_METHOD, REQUEST_URI};
//! use weft_message::{Message, ResponseFactory, ServerContext, ServerRequest};
//!
//! let context = ServerContext::builder()
//!     .param(REQUEST_METHOD, "GET")
//!     .param(REQUEST_URI, "/greet")
//!     .param("HTTP_ACCEPT", "application/json")
//!     .build();
//!
//! let request = ServerRequest::from_context(&context);
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.request_target(), "/greet");
//! assert!(request.accepts_json());
//!
//! let response = ResponseFactory::new().not_found();
//! assert_eq!(response.status(), 404);
//! assert_eq!(response.reason(), "Not Found");
//!
//! // Copy-on-write: the original response is untouched.
//! let tagged = response.with_header("X-Request-Id", "abc123");
//! assert!(!response.has_header("X-Request-Id"));
//! assert!(tagged.has_header("X-Request-Id"));
//! ```

pub mod context;
pub mod status;
pub mod upload;

mod body;
mod error;
mod factory;
mod header;
mod message;
mod query;
mod request;
mod response;
mod uri;

pub use body::Body;
pub use context::{Params, ServerContext, ServerContextBuilder};
pub use error::MessageError;
pub use factory::ResponseFactory;
pub use header::{HeaderBag, HeaderValues};
pub use message::{Message, Parts};
pub use query::{Query, QueryValue};
pub use request::{Request, ServerRequest};
pub use response::Response;
pub use uri::{Uri, UriComponents};

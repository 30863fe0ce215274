//! End-to-end pipeline scenarios over the public API.

use async_trait::async_trait;
use serde_json::json;
use weft_message::context::{REQUEST_METHOD, REQUEST_URI, SERVER_PROTOCOL};
use weft_message::{Message, Response, ServerContext, ServerRequest};
use weft_server::{BoxError, Middleware, Next, Pipeline, ResponseDispatcher};

/// Marks whatever the rest of the chain produced as 404.
struct NotFound;

#[async_trait]
impl Middleware for NotFound {
    async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
        Ok(next.handle(request).await?.with_status(404))
    }
}

/// Writes a fixed JSON payload into the delegated response's body.
struct JsonBody;

impl JsonBody {
    fn payload() -> serde_json::Value {
        json!({ "status": "fail" })
    }
}

#[async_trait]
impl Middleware for JsonBody {
    async fn process(&self, request: ServerRequest, next: Next<'_>) -> Result<Response, BoxError> {
        let response = next.handle(request).await?;
        response.body().write_str(&Self::payload().to_string());
        Ok(response)
    }
}

fn request() -> ServerRequest {
    let context = ServerContext::builder()
        .param(SERVER_PROTOCOL, "HTTP/1.1")
        .param(REQUEST_METHOD, "GET")
        .param(REQUEST_URI, "/")
        .build();
    ServerRequest::from_context(&context)
}

#[tokio::test]
async fn empty_pipeline_answers_ok_with_empty_body() {
    let pipeline = Pipeline::builder().build();

    let response = pipeline.handle(request()).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body().contents(), "");
}

#[tokio::test]
async fn not_found_then_json_body_composes() {
    let pipeline = Pipeline::builder()
        .with("not-found", || NotFound)
        .with("json-body", || JsonBody)
        .build();

    let response = pipeline.handle(request()).await.unwrap();

    // The json stage wrote into the response already carrying 404.
    assert_eq!(response.status(), 404);
    assert_eq!(response.body().contents(), JsonBody::payload().to_string());
}

#[tokio::test]
async fn handled_response_dispatches_onto_a_writer() {
    let pipeline = Pipeline::builder()
        .with("not-found", || NotFound)
        .with("json-body", || JsonBody)
        .build();

    let response = pipeline.handle(request()).await.unwrap();

    let mut out: Vec<u8> = Vec::new();
    ResponseDispatcher::new().send(&response, &mut out).await.unwrap();

    let wire = String::from_utf8(out).unwrap();
    assert!(wire.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(wire.ends_with(&format!("\r\n\r\n{}", JsonBody::payload())));
}

#[tokio::test]
async fn the_same_pipeline_serves_consecutive_requests() {
    let pipeline = Pipeline::builder()
        .with("not-found", || NotFound)
        .with("json-body", || JsonBody)
        .build();

    for _ in 0..2 {
        let response = pipeline.handle(request()).await.unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(response.body().contents(), JsonBody::payload().to_string());
    }
}

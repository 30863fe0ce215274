use async_trait::async_trait;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use weft_message::context::{REQUEST_METHOD, REQUEST_URI, SERVER_PROTOCOL};
use weft_message::{Message, Response, ResponseFactory, ServerContext, ServerRequest};
use weft_server::{BoxError, ErrorBoundary, ExecutionMode, Middleware, Next, Pipeline, ResponseDispatcher};

/// Answers JSON when the client asks for it, plain text otherwise.
struct Greet;

#[async_trait]
impl Middleware for Greet {
    async fn process(&self, request: ServerRequest, _next: Next<'_>) -> Result<Response, BoxError> {
        let factory = ResponseFactory::new();

        if request.accepts_json() {
            return Ok(factory.json(&serde_json::json!({ "greeting": "hello" }))?);
        }

        let response = factory.ok().with_header("Content-Type", "text/plain");
        response.body().write_str("hello\n");
        Ok(response)
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let pipeline = Pipeline::builder()
        .with("errors", || ErrorBoundary::new(ExecutionMode::Development))
        .with("greet", || Greet)
        .build();

    let context = ServerContext::builder()
        .param(SERVER_PROTOCOL, "HTTP/1.1")
        .param(REQUEST_METHOD, "GET")
        .param(REQUEST_URI, "/greet")
        .param("HTTP_ACCEPT", "application/json")
        .build();

    let request = ServerRequest::from_context(&context);
    info!(request_target = %request.request_target(), "handling request");

    let response = pipeline.handle(request).await?;

    let mut stdout = tokio::io::stdout();
    ResponseDispatcher::new().send(&response, &mut stdout).await?;

    Ok(())
}

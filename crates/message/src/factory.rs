//! Canonical response construction.

use serde::Serialize;

use crate::context::ServerContext;
use crate::error::MessageError;
use crate::message::Message;
use crate::response::Response;
use crate::status::{
    STATUS_BAD_GATEWAY, STATUS_BAD_REQUEST, STATUS_CREATED, STATUS_FORBIDDEN, STATUS_GATEWAY_TIMEOUT,
    STATUS_INTERNAL_SERVER_ERROR, STATUS_METHOD_NOT_ALLOWED, STATUS_NOT_FOUND, STATUS_OK, STATUS_SEE_OTHER,
    STATUS_SERVICE_UNAVAILABLE, STATUS_TOO_MANY_REQUESTS, STATUS_UNAUTHORIZED, STATUS_UNPROCESSABLE_ENTITY,
};

/// Builds canonical [`Response`] values: status helpers, JSON bodies,
/// redirects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFactory;

impl ResponseFactory {
    pub fn new() -> Self {
        Self
    }

    /// A response with the given status. An empty `reason` selects the
    /// standard phrase for the code; unknown codes end up with `""`.
    pub fn create_response(&self, status: u16, reason: &str) -> Response {
        let response = Response::new().with_status(status);
        if reason.is_empty() { response } else { response.with_reason(reason) }
    }

    pub fn ok(&self) -> Response {
        self.create_response(STATUS_OK, "")
    }

    pub fn created(&self) -> Response {
        self.create_response(STATUS_CREATED, "")
    }

    pub fn bad_request(&self) -> Response {
        self.create_response(STATUS_BAD_REQUEST, "")
    }

    pub fn unauthorized(&self) -> Response {
        self.create_response(STATUS_UNAUTHORIZED, "")
    }

    pub fn forbidden(&self) -> Response {
        self.create_response(STATUS_FORBIDDEN, "")
    }

    pub fn not_found(&self) -> Response {
        self.create_response(STATUS_NOT_FOUND, "")
    }

    pub fn method_not_allowed(&self) -> Response {
        self.create_response(STATUS_METHOD_NOT_ALLOWED, "")
    }

    pub fn unprocessable_entity(&self) -> Response {
        self.create_response(STATUS_UNPROCESSABLE_ENTITY, "")
    }

    pub fn too_many_requests(&self) -> Response {
        self.create_response(STATUS_TOO_MANY_REQUESTS, "")
    }

    pub fn internal_server_error(&self) -> Response {
        self.create_response(STATUS_INTERNAL_SERVER_ERROR, "")
    }

    pub fn bad_gateway(&self) -> Response {
        self.create_response(STATUS_BAD_GATEWAY, "")
    }

    pub fn service_unavailable(&self) -> Response {
        self.create_response(STATUS_SERVICE_UNAVAILABLE, "")
    }

    pub fn gateway_timeout(&self) -> Response {
        self.create_response(STATUS_GATEWAY_TIMEOUT, "")
    }

    /// A 200 response carrying `data` serialized as a JSON body, with
    /// `Content-Type: application/json`.
    pub fn json<T: Serialize>(&self, data: &T) -> Result<Response, MessageError> {
        let payload = serde_json::to_string(data)?;

        let response = self.ok().with_header("Content-Type", mime::APPLICATION_JSON.as_ref());
        response.body().write_str(&payload);

        Ok(response)
    }

    /// A 303 See Other redirect to `url`.
    pub fn redirect(&self, url: &str) -> Response {
        self.redirect_with_status(url, STATUS_SEE_OTHER)
    }

    pub fn redirect_with_status(&self, url: &str, status: u16) -> Response {
        self.create_response(status, "").with_header("Location", url)
    }

    /// Redirects to the context's `Referer` header; the `Location` ends up
    /// empty when the context carries none.
    pub fn redirect_back(&self, context: &ServerContext) -> Response {
        self.redirect(&context.header("Referer").unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::status::reason_phrase;

    #[test]
    fn create_response_fills_the_standard_phrase() {
        let factory = ResponseFactory::new();

        let response = factory.create_response(404, "");
        assert_eq!(response.status(), 404);
        assert_eq!(response.reason(), "Not Found");

        let response = factory.create_response(404, "Missing");
        assert_eq!(response.reason(), "Missing");

        assert_eq!(factory.create_response(999, "").reason(), "");
    }

    #[test]
    fn convenience_constructors() {
        let factory = ResponseFactory::new();
        let cases: [(Response, u16); 13] = [
            (factory.ok(), 200),
            (factory.created(), 201),
            (factory.bad_request(), 400),
            (factory.unauthorized(), 401),
            (factory.forbidden(), 403),
            (factory.not_found(), 404),
            (factory.method_not_allowed(), 405),
            (factory.unprocessable_entity(), 422),
            (factory.too_many_requests(), 429),
            (factory.internal_server_error(), 500),
            (factory.bad_gateway(), 502),
            (factory.service_unavailable(), 503),
            (factory.gateway_timeout(), 504),
        ];

        for (response, status) in cases {
            assert_eq!(response.status(), status);
            assert_eq!(response.reason(), reason_phrase(status));
        }
    }

    #[test]
    fn json_sets_body_and_content_type() {
        let data = json!({
            "status": "success",
            "message": "Some random message.",
        });

        let response = ResponseFactory::new().json(&data).unwrap();

        assert_eq!(response.body().contents(), data.to_string());
        assert_eq!(response.header_line("Content-Type"), "application/json");
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn redirect_defaults_to_see_other() {
        let response = ResponseFactory::new().redirect("https://example.com");

        assert_eq!(response.status(), 303);
        assert_eq!(response.reason(), "See Other");
        assert_eq!(response.header_line("Location"), "https://example.com");
    }

    #[test]
    fn redirect_back_uses_the_context_referer() {
        let context = ServerContext::builder().param("HTTP_REFERER", "http://localhost/api/test").build();

        let response = ResponseFactory::new().redirect_back(&context);

        assert_eq!(response.status(), 303);
        assert_eq!(response.header_line("Location"), "http://localhost/api/test");
    }
}

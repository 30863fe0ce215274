//! Request messages: the outbound [`Request`] and the inbound
//! [`ServerRequest`] with its server-side parameter bags.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::context::{Params, QUERY_STRING, REQUEST_METHOD, SERVER_PROTOCOL, ServerContext};
use crate::message::{Message, Parts};
use crate::query::Query;
use crate::upload::UploadedFiles;
use crate::uri::Uri;

/// `HTTP/1.1` yields `1.1`; anything unrecognizable falls back to `1.1`.
fn version_from_protocol(protocol: &str) -> String {
    match protocol.split_once('/') {
        Some((_, version)) if !version.is_empty() => version.to_owned(),
        _ => "1.1".to_owned(),
    }
}

/// An immutable HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    parts: Parts,
    method: String,
    uri: Uri,
    request_target: Option<String>,
}

impl Default for Request {
    fn default() -> Self {
        Self { parts: Parts::new(), method: "GET".to_owned(), uri: Uri::new(), request_target: None }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request from the injected server context: method, URI,
    /// protocol version and headers all come from the context.
    pub fn from_context(context: &ServerContext) -> Self {
        let mut parts = Parts::new();
        parts.version = version_from_protocol(context.param(SERVER_PROTOCOL).unwrap_or_default());
        for (name, value) in context.headers() {
            parts.headers.append(&name, vec![value]);
        }

        Self {
            parts,
            method: context.param(REQUEST_METHOD).unwrap_or("GET").to_owned(),
            uri: Uri::from_context(context),
            request_target: None,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Stores the method verbatim; no case normalization.
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        Self { method: method.into(), ..self.clone() }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Replaces the URI, updating the `Host` header from the new URI's
    /// host when it has one.
    pub fn with_uri(&self, uri: Uri) -> Self {
        self.apply_uri(uri, false)
    }

    /// Replaces the URI but keeps an already-present `Host` header.
    pub fn with_uri_preserving_host(&self, uri: Uri) -> Self {
        self.apply_uri(uri, true)
    }

    fn apply_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        let mut new = Self { uri, ..self.clone() };

        if new.uri.host().is_empty() {
            return new;
        }

        let keep_existing = preserve_host && new.has_header("Host");
        if !keep_existing {
            let host = match new.uri.port() {
                Some(port) => format!("{}:{port}", new.uri.host()),
                None => new.uri.host().to_owned(),
            };
            new = new.with_header("Host", host);
        }

        new
    }

    /// The request target: an explicit override, or `path[?query]` from
    /// the URI, or `/` when both are empty.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }

        let mut target = self.uri.path().to_owned();
        let query = self.uri.query_string();
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query);
        }

        if target.is_empty() { "/".to_owned() } else { target }
    }

    pub fn with_request_target(&self, target: impl Into<String>) -> Self {
        Self { request_target: Some(target.into()), ..self.clone() }
    }
}

impl Message for Request {
    fn parts(&self) -> &Parts {
        &self.parts
    }

    fn with_parts(&self, parts: Parts) -> Self {
        Self { parts, ..self.clone() }
    }
}

/// An inbound request as seen by server-side middleware.
///
/// Adds the server-side bags to [`Request`]: server params (set once at
/// construction, read-only), cookies, parsed query, uploaded files, parsed
/// body and request-scoped attributes. Everything except the server params
/// has a copy-on-write mutator.
#[derive(Debug, Clone, Default)]
pub struct ServerRequest {
    request: Request,
    server_params: Params,
    cookie_params: Params,
    query_params: Query,
    uploaded_files: UploadedFiles,
    parsed_body: Option<Value>,
    attributes: BTreeMap<String, Value>,
}

impl ServerRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a server request from the injected context; parsed body and
    /// attributes start empty.
    pub fn from_context(context: &ServerContext) -> Self {
        Self {
            request: Request::from_context(context),
            server_params: context.params().clone(),
            cookie_params: context.cookies().clone(),
            query_params: Query::parse(context.param(QUERY_STRING).unwrap_or_default()),
            uploaded_files: context.uploads().clone(),
            parsed_body: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> &str {
        self.request.method()
    }

    pub fn with_method(&self, method: impl Into<String>) -> Self {
        Self { request: self.request.with_method(method), ..self.clone() }
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn with_uri(&self, uri: Uri) -> Self {
        Self { request: self.request.with_uri(uri), ..self.clone() }
    }

    pub fn with_uri_preserving_host(&self, uri: Uri) -> Self {
        Self { request: self.request.with_uri_preserving_host(uri), ..self.clone() }
    }

    pub fn request_target(&self) -> String {
        self.request.request_target()
    }

    pub fn with_request_target(&self, target: impl Into<String>) -> Self {
        Self { request: self.request.with_request_target(target), ..self.clone() }
    }

    /// The transport-provided parameters; set once, no mutator.
    pub fn server_params(&self) -> &Params {
        &self.server_params
    }

    pub fn cookie_params(&self) -> &Params {
        &self.cookie_params
    }

    pub fn with_cookie_params(&self, cookie_params: Params) -> Self {
        Self { cookie_params, ..self.clone() }
    }

    pub fn query_params(&self) -> &Query {
        &self.query_params
    }

    pub fn with_query_params(&self, query_params: Query) -> Self {
        Self { query_params, ..self.clone() }
    }

    pub fn uploaded_files(&self) -> &UploadedFiles {
        &self.uploaded_files
    }

    pub fn with_uploaded_files(&self, uploaded_files: UploadedFiles) -> Self {
        Self { uploaded_files, ..self.clone() }
    }

    /// The deserialized body, when some middleware has parsed it.
    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    /// `None` clears a previously parsed body.
    pub fn with_parsed_body(&self, parsed_body: Option<Value>) -> Self {
        Self { parsed_body, ..self.clone() }
    }

    /// Request-scoped out-of-band data, keyed by name.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn with_attribute(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut new = self.clone();
        new.attributes.insert(name.into(), value.into());
        new
    }

    /// Removes an attribute; a no-op when absent.
    pub fn without_attribute(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.attributes.remove(name);
        new
    }

    /// Loose `Accept` check: any mention of `json` counts.
    pub fn accepts_json(&self) -> bool {
        self.header_line("Accept").contains("json")
    }

    /// Loose `Accept` check: any mention of `html` counts.
    pub fn accepts_html(&self) -> bool {
        self.header_line("Accept").contains("html")
    }

    /// Loose `Accept` check: any mention of `xml` counts.
    pub fn accepts_xml(&self) -> bool {
        self.header_line("Accept").contains("xml")
    }
}

impl Message for ServerRequest {
    fn parts(&self) -> &Parts {
        self.request.parts()
    }

    fn with_parts(&self, parts: Parts) -> Self {
        Self { request: self.request.with_parts(parts), ..self.clone() }
    }
}

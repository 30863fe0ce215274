//! The injected "current process HTTP context".
//!
//! Everything the factories would otherwise read from ambient process
//! state — server parameters, raw headers, cookies, upload descriptors —
//! arrives through an explicit [`ServerContext`] value instead. Tests build
//! synthetic contexts with [`ServerContext::builder`].

use std::collections::BTreeMap;

use crate::upload::{UploadNode, UploadedFiles};

/// Read-only string parameter mapping.
pub type Params = BTreeMap<String, String>;

/// Protocol token parameter, e.g. `HTTP/1.1`.
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
/// Request host parameter.
pub const HTTP_HOST: &str = "HTTP_HOST";
/// Listening port parameter.
pub const SERVER_PORT: &str = "SERVER_PORT";
/// Raw request URI parameter (path plus optional query).
pub const REQUEST_URI: &str = "REQUEST_URI";
/// Raw query string parameter.
pub const QUERY_STRING: &str = "QUERY_STRING";
/// Request method parameter.
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";

const HEADER_PARAM_PREFIX: &str = "HTTP_";

/// Snapshot of the transport-provided request environment.
#[derive(Debug, Clone, Default)]
pub struct ServerContext {
    params: Params,
    headers: Vec<(String, String)>,
    cookies: Params,
    uploads: UploadedFiles,
}

impl ServerContext {
    /// A context with nothing in it; factories fall back to defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ServerContextBuilder {
        ServerContextBuilder::default()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Raw header list: the explicit one when provided, otherwise headers
    /// recovered from `HTTP_*`-prefixed parameters.
    pub fn headers(&self) -> Vec<(String, String)> {
        if !self.headers.is_empty() {
            return self.headers.clone();
        }

        self.params
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(HEADER_PARAM_PREFIX)
                    .map(|rest| (header_name_from_param(rest), value.clone()))
            })
            .collect()
    }

    /// First header value for `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .into_iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn cookies(&self) -> &Params {
        &self.cookies
    }

    pub fn uploads(&self) -> &UploadedFiles {
        &self.uploads
    }
}

/// `USER_AGENT` becomes `User-Agent`.
fn header_name_from_param(param: &str) -> String {
    param
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Default)]
pub struct ServerContextBuilder {
    params: Params,
    headers: Vec<(String, String)>,
    cookies: Params,
    uploads: UploadedFiles,
}

impl ServerContextBuilder {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn upload(mut self, name: impl Into<String>, node: UploadNode) -> Self {
        self.uploads.insert(name, node);
        self
    }

    pub fn build(self) -> ServerContext {
        ServerContext { params: self.params, headers: self.headers, cookies: self.cookies, uploads: self.uploads }
    }
}

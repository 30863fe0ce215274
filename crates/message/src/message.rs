//! Shared message state and the copy-on-write message contract.

use crate::body::Body;
use crate::header::{HeaderBag, HeaderValues};

/// State common to every message: protocol version, headers, body.
#[derive(Debug, Clone)]
pub struct Parts {
    pub(crate) version: String,
    pub(crate) headers: HeaderBag,
    pub(crate) body: Body,
}

impl Default for Parts {
    fn default() -> Self {
        Self { version: "1.1".to_owned(), headers: HeaderBag::new(), body: Body::empty() }
    }
}

impl Parts {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The message contract shared by requests and responses.
///
/// Every `with_*` method returns a new instance and leaves the receiver
/// untouched. Header and parameter containers are deep-copied on write;
/// the body is the one exception — [`with_body`](Self::with_body) shares
/// the stream handle, so writes through any holder are visible to all.
///
/// Implementors provide [`parts`](Self::parts) and
/// [`with_parts`](Self::with_parts); everything else is derived.
pub trait Message: Sized {
    fn parts(&self) -> &Parts;

    /// Rebuilds this message around replacement [`Parts`], keeping all
    /// type-specific state.
    fn with_parts(&self, parts: Parts) -> Self;

    /// HTTP protocol version, e.g. `"1.1"`.
    fn protocol_version(&self) -> &str {
        &self.parts().version
    }

    /// Stores the version verbatim; no validation.
    fn with_protocol_version(&self, version: impl Into<String>) -> Self {
        let mut parts = self.parts().clone();
        parts.version = version.into();
        self.with_parts(parts)
    }

    fn headers(&self) -> &HeaderBag {
        &self.parts().headers
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().has(name)
    }

    /// All values for `name`; empty when absent.
    fn header(&self, name: &str) -> Vec<String> {
        self.headers().values(name)
    }

    /// The `,`-joined value line for `name`; `""` when absent.
    fn header_line(&self, name: &str) -> String {
        self.headers().line(name)
    }

    /// Replaces every value of `name` with the given value(s).
    fn with_header(&self, name: &str, values: impl Into<HeaderValues>) -> Self {
        let mut parts = self.parts().clone();
        parts.headers.set(name, values.into().into_vec());
        self.with_parts(parts)
    }

    /// Appends to the value list of `name`, creating it if absent.
    fn with_added_header(&self, name: &str, values: impl Into<HeaderValues>) -> Self {
        let mut parts = self.parts().clone();
        parts.headers.append(name, values.into().into_vec());
        self.with_parts(parts)
    }

    /// Removes `name`; a no-op when absent.
    fn without_header(&self, name: &str) -> Self {
        let mut parts = self.parts().clone();
        parts.headers.remove(name);
        self.with_parts(parts)
    }

    /// The body stream handle.
    fn body(&self) -> &Body {
        &self.parts().body
    }

    /// Replaces the body handle; content is shared, not copied.
    fn with_body(&self, body: Body) -> Self {
        let mut parts = self.parts().clone();
        parts.body = body;
        self.with_parts(parts)
    }
}

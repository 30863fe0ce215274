//! The response message.

use crate::message::{Message, Parts};
use crate::status::{STATUS_OK, reason_phrase};

/// An immutable HTTP response.
///
/// The status code is stored verbatim — out-of-range codes are not
/// rejected, they simply have no standard reason phrase. The phrase
/// defaults to the standard one for the code and can be overridden with
/// [`with_reason`](Self::with_reason).
#[derive(Debug, Clone)]
pub struct Response {
    parts: Parts,
    status: u16,
    reason: Option<String>,
}

impl Default for Response {
    fn default() -> Self {
        Self { parts: Parts::new(), status: STATUS_OK, reason: None }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns a copy with the given status; an explicit reason phrase is
    /// dropped so the standard phrase for the new code applies.
    pub fn with_status(&self, status: u16) -> Self {
        Self { status, reason: None, ..self.clone() }
    }

    /// The explicit reason phrase if one was set, otherwise the standard
    /// phrase for the status code, otherwise `""`.
    pub fn reason(&self) -> &str {
        match &self.reason {
            Some(reason) => reason,
            None => reason_phrase(self.status),
        }
    }

    pub fn with_reason(&self, reason: impl Into<String>) -> Self {
        Self { reason: Some(reason.into()), ..self.clone() }
    }
}

impl Message for Response {
    fn parts(&self) -> &Parts {
        &self.parts
    }

    fn with_parts(&self, parts: Parts) -> Self {
        Self { parts, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::STATUS_NOT_FOUND;

    #[test]
    fn defaults_to_ok() {
        let response = Response::new();

        assert_eq!(response.status(), 200);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.protocol_version(), "1.1");
        assert!(response.body().is_empty());
    }

    #[test]
    fn with_status_switches_the_standard_phrase() {
        let response = Response::new().with_status(STATUS_NOT_FOUND);

        assert_eq!(response.status(), 404);
        assert_eq!(response.reason(), "Not Found");
    }

    #[test]
    fn nonstandard_codes_have_no_phrase() {
        assert_eq!(Response::new().with_status(999).reason(), "");
    }

    #[test]
    fn explicit_reason_wins_until_the_status_changes() {
        let response = Response::new().with_status(404).with_reason("Gone Fishing");
        assert_eq!(response.reason(), "Gone Fishing");

        assert_eq!(response.with_status(404).reason(), "Not Found");
    }

    #[test]
    fn header_laws_hold_for_responses() {
        let response = Response::new().with_header("Test-Header", "Test");

        assert!(response.has_header("test-header"));
        assert_eq!(
            response.with_added_header("Test-Header", vec!["test1", "test2"]).header_line("Test-Header"),
            "Test,test1,test2"
        );
        assert!(!response.without_header("Test-Header").has_header("Test-Header"));

        // The receiver is untouched by all three.
        assert_eq!(response.header("Test-Header"), vec!["Test".to_owned()]);
    }

    #[test]
    fn with_status_leaves_the_receiver_untouched() {
        let response = Response::new();
        let _ = response.with_status(404);

        assert_eq!(response.status(), 200);
    }
}

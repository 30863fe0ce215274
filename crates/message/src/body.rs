//! Shared, seekable message body stream.
//!
//! A [`Body`] is a handle to an in-memory byte buffer with a read/write
//! cursor. Cloning a body (and `with_body` on a message) shares the handle,
//! never the content: every holder sees the same buffer and the same cursor
//! position. The handle is internally synchronized, but a body should be
//! treated as owned by exactly one in-flight request-processing path at a
//! time — the cursor is shared sequential state, not a per-reader view.

use std::fmt;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct BodyInner {
    buffer: BytesMut,
    pos: usize,
}

/// Handle to a shared, seekable byte stream.
#[derive(Debug, Clone, Default)]
pub struct Body {
    inner: Arc<Mutex<BodyInner>>,
}

impl Body {
    /// A new, empty stream.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Writes at the cursor, overwriting existing bytes and extending the
    /// buffer past the end. Advances the cursor and returns the number of
    /// bytes written.
    pub fn write(&self, data: &[u8]) -> usize {
        let mut inner = self.inner.lock();
        let pos = inner.pos;
        let overlap = (inner.buffer.len() - pos).min(data.len());

        inner.buffer[pos..pos + overlap].copy_from_slice(&data[..overlap]);
        inner.buffer.extend_from_slice(&data[overlap..]);
        inner.pos += data.len();

        data.len()
    }

    pub fn write_str(&self, data: &str) -> usize {
        self.write(data.as_bytes())
    }

    /// Reads up to `max` bytes from the cursor, advancing it.
    pub fn read(&self, max: usize) -> Bytes {
        let mut inner = self.inner.lock();
        let start = inner.pos;
        let end = (start + max).min(inner.buffer.len());
        inner.pos = end;

        Bytes::copy_from_slice(&inner.buffer[start..end])
    }

    /// Moves the cursor, clamped to the buffer length.
    pub fn seek(&self, pos: usize) {
        let mut inner = self.inner.lock();
        inner.pos = pos.min(inner.buffer.len());
    }

    pub fn rewind(&self) {
        self.seek(0);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().buffer.is_empty()
    }

    /// The entire buffer as a lossy UTF-8 string, cursor untouched.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().buffer).into_owned()
    }

    /// A copy of the entire buffer, cursor untouched.
    pub fn bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner.lock().buffer)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::from(value.as_bytes().to_vec())
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::from(value.into_bytes())
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        let body = Self::empty();
        {
            let mut inner = body.inner.lock();
            inner.buffer.extend_from_slice(&value);
        }
        body
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}

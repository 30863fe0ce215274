//! Serializes a final response onto a transport writer.

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use weft_message::{Message, Response};

use crate::error::DispatchError;

/// Writes one response per exchange: status line, headers, blank line,
/// body bytes verbatim.
///
/// A dispatcher tracks whether it already sent; a second
/// [`send`](Self::send) fails with [`DispatchError::HeadersAlreadySent`]
/// before touching the writer.
#[derive(Debug, Default)]
pub struct ResponseDispatcher {
    sent: bool,
}

impl ResponseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    pub async fn send<W>(&mut self, response: &Response, writer: &mut W) -> Result<(), DispatchError>
    where
        W: AsyncWrite + Unpin,
    {
        if self.sent {
            return Err(DispatchError::HeadersAlreadySent);
        }
        self.sent = true;

        let mut buffer = BytesMut::new();

        let status_line =
            format!("HTTP/{} {} {}", response.protocol_version(), response.status(), response.reason());
        buffer.extend_from_slice(status_line.trim_end().as_bytes());
        buffer.extend_from_slice(b"\r\n");

        for (name, _) in response.headers().iter() {
            buffer.extend_from_slice(name.as_bytes());
            buffer.extend_from_slice(b": ");
            buffer.extend_from_slice(response.header_line(name).as_bytes());
            buffer.extend_from_slice(b"\r\n");
        }

        buffer.extend_from_slice(b"\r\n");
        buffer.extend_from_slice(&response.body().bytes());

        writer.write_all(&buffer).await?;
        writer.flush().await?;
        Ok(())
    }
}

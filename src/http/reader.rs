use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::{self, ParseError};
use crate::http::request::RequestHead;

/// Cap on buffered head bytes. A peer that sends this much without a
/// blank line is not speaking HTTP we recognize.
const MAX_HEAD_BYTES: usize = 64 * 1024;

/// I/O-level failure while reading from the connection.
///
/// `Closed` and `Timeout` terminate the connection silently; a `Parse`
/// failure is answered with 400 first. `Timeout` is produced by the
/// connection loop when the idle deadline lapses around a read.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Peer closed (EOF) or reset the connection mid-head.
    #[error("connection closed by peer")]
    Closed,
    /// The idle-read deadline expired.
    #[error("idle read deadline expired")]
    Timeout,
    /// Fewer body bytes available than the declared Content-Length.
    #[error("request body shorter than declared")]
    ShortBody,
    /// The buffered head bytes did not form a valid request.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Buffered reader that lifts request heads and bounded bodies off a
/// byte stream.
///
/// One lives per connection. Bytes read past the end of a head (the
/// start of a body, or of the next pipelined request) stay in the
/// carry-over buffer and are consumed before the socket is touched
/// again.
pub struct RequestReader {
    buf: BytesMut,
}

impl RequestReader {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// Reads until a complete head (`\r\n\r\n`-terminated) is buffered,
    /// then parses it. The terminator is consumed; surplus bytes remain
    /// buffered.
    pub async fn read_head<R>(&mut self, stream: &mut R) -> Result<RequestHead, WireError>
    where
        R: AsyncRead + Unpin,
    {
        loop {
            if let Some(end) = parser::find_head_end(&self.buf) {
                let head = parser::parse_head(&self.buf[..end])?;
                self.buf.advance(end + 4);
                return Ok(head);
            }

            if self.buf.len() >= MAX_HEAD_BYTES {
                // No request line in sight within bounds.
                return Err(ParseError::BadRequestLine.into());
            }

            let n = stream
                .read_buf(&mut self.buf)
                .await
                .map_err(|_| WireError::Closed)?;
            if n == 0 {
                return Err(WireError::Closed);
            }
        }
    }

    /// Reads exactly `len` body bytes: carry-over buffer first, then the
    /// socket. EOF or a transport error before `len` bytes is
    /// [`WireError::ShortBody`].
    pub async fn read_body<R>(&mut self, stream: &mut R, len: usize) -> Result<Bytes, WireError>
    where
        R: AsyncRead + Unpin,
    {
        while self.buf.len() < len {
            let n = stream
                .read_buf(&mut self.buf)
                .await
                .map_err(|_| WireError::ShortBody)?;
            if n == 0 {
                return Err(WireError::ShortBody);
            }
        }
        Ok(self.buf.split_to(len).freeze())
    }
}

impl Default for RequestReader {
    fn default() -> Self {
        Self::new()
    }
}

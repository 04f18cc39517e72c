use crate::http::request::{HeaderMap, Method, RequestHead};

/// Malformed input detected while parsing a request head.
///
/// These are distinct from I/O conditions (peer gone, deadline expired):
/// a parse error always earns the client a 400 before the connection is
/// torn down, while I/O conditions terminate silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Request line did not split into exactly three fields.
    #[error("malformed request line")]
    BadRequestLine,
    /// Third request-line field did not start with `HTTP/`.
    #[error("unsupported protocol")]
    UnsupportedProtocol,
    /// `Content-Length` present but not a non-negative integer.
    #[error("invalid Content-Length")]
    BadContentLength,
}

/// Finds the end of the request head: the offset of the first
/// `\r\n\r\n` in `buf`, or `None` if the head is still incomplete.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parses a complete request head (everything before the blank line,
/// exclusive of the terminating `\r\n\r\n`).
///
/// The request line must split on whitespace into exactly three fields,
/// and the third must begin with `HTTP/`. Header lines are split at the
/// first colon with both sides trimmed; lines without a colon, or with
/// the colon in the first column, are skipped rather than rejected.
/// Duplicate header names keep the first value seen.
pub fn parse_head(head: &[u8]) -> Result<RequestHead, ParseError> {
    let head = std::str::from_utf8(head).map_err(|_| ParseError::BadRequestLine)?;

    let mut lines = head.split("\r\n");

    // Request line: METHOD SP PATH SP VERSION
    let request_line = lines.next().ok_or(ParseError::BadRequestLine)?;
    let mut fields = request_line.split_whitespace();
    let (Some(method), Some(path), Some(version), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::BadRequestLine);
    };
    if !version.starts_with("HTTP/") {
        return Err(ParseError::UnsupportedProtocol);
    }

    // Header block
    let mut headers = HeaderMap::new();
    for line in lines {
        match line.find(':') {
            // No colon, or colon in column zero: not a header, skip it.
            None | Some(0) => continue,
            Some(idx) => {
                let name = line[..idx].trim();
                let value = line[idx + 1..].trim();
                headers.append(name, value);
            }
        }
    }

    Ok(RequestHead {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
    })
}

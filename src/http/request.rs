use crate::http::parser::ParseError;

/// HTTP request methods.
///
/// The server implements GET and POST; anything else parses to
/// `Unsupported` and is carried through routing, where only the
/// `/files/*` routes actually filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - retrieve a resource
    Get,
    /// POST - submit data
    Post,
    /// Any other method token
    Unsupported,
}

impl Method {
    /// Maps a request-line method token onto the enum. Unknown tokens are
    /// not a parse failure; they become [`Method::Unsupported`].
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Unsupported,
        }
    }
}

/// Header collection with case-insensitive names.
///
/// Backed by a `Vec` in arrival order. Lookup scans for the first name
/// that matches ignoring ASCII case, so duplicate headers resolve
/// first-wins; later duplicates stay in the collection but are never
/// returned by [`HeaderMap::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, preserving any existing entry with the same name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Returns the first value whose name matches ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The parsed head of a request: request line plus header block.
///
/// Created at the top of each connection-loop iteration and discarded
/// once the response has gone out. The body is not part of the head;
/// the loop reads it on demand, bounded by [`RequestHead::content_length`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHead {
    /// The HTTP method
    pub method: Method,
    /// Request path, verbatim from the request line (no percent-decoding)
    pub path: String,
    /// Protocol field from the request line (e.g. "HTTP/1.1")
    pub version: String,
    /// Parsed header block
    pub headers: HeaderMap,
}

impl RequestHead {
    /// Retrieves a header value by name (case-insensitive, first-wins).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The declared body length.
    ///
    /// `Ok(None)` when the header is absent (a zero-length body for our
    /// purposes). A value that is not a non-negative integer is
    /// [`ParseError::BadContentLength`]; callers that never touch the
    /// body never see that error.
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        match self.header("Content-Length") {
            None => Ok(None),
            Some(v) => v
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseError::BadContentLength),
        }
    }

    /// Whether the client asked for the connection to be torn down after
    /// this exchange. HTTP/1.1 keep-alive is the default; only an explicit
    /// `Connection: close` (any case) ends the loop.
    pub fn wants_close(&self) -> bool {
        self.header("Connection")
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }

    /// Whether the client advertised gzip support. Deliberately a plain
    /// substring check on `Accept-Encoding`, not a full quality-list parse.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .map(|v| v.contains("gzip"))
            .unwrap_or(false)
    }

    /// The `User-Agent` value, or the empty string if the header is absent.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_with(name: &str, value: &str) -> RequestHead {
        let mut headers = HeaderMap::new();
        headers.append(name, value);
        RequestHead {
            method: Method::Get,
            path: "/".to_string(),
            version: "HTTP/1.1".to_string(),
            headers,
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let head = head_with("User-Agent", "curl/8.5.0");
        assert_eq!(head.header("user-agent"), Some("curl/8.5.0"));
        assert_eq!(head.header("USER-AGENT"), Some("curl/8.5.0"));
    }

    #[test]
    fn duplicate_headers_resolve_first_wins() {
        let mut headers = HeaderMap::new();
        headers.append("Accept-Encoding", "br");
        headers.append("accept-encoding", "gzip");
        assert_eq!(headers.get("Accept-Encoding"), Some("br"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn content_length_taxonomy() {
        assert_eq!(head_with("Host", "x").content_length(), Ok(None));
        assert_eq!(head_with("Content-Length", "12").content_length(), Ok(Some(12)));
        assert_eq!(
            head_with("Content-Length", "-5").content_length(),
            Err(ParseError::BadContentLength)
        );
        assert_eq!(
            head_with("Content-Length", "twelve").content_length(),
            Err(ParseError::BadContentLength)
        );
    }

    #[test]
    fn connection_close_is_case_insensitive() {
        assert!(head_with("Connection", "Close").wants_close());
        assert!(head_with("connection", "CLOSE").wants_close());
        assert!(!head_with("Connection", "keep-alive").wants_close());
        assert!(!head_with("Host", "x").wants_close());
    }
}

//! Route table and the fixed endpoint handlers.
//!
//! The table is built once at startup and shared immutably by every
//! connection task; there is no runtime registration.

pub mod handlers;

use crate::http::request::Method;

/// How a pattern claims a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The whole path must equal the literal.
    Exact(&'static str),
    /// The path must start with the literal; the remainder is captured
    /// verbatim (no decoding, no segment interpretation).
    Prefix(&'static str),
}

/// The fixed endpoints behind the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Echo,
    UserAgent,
    Files,
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub pattern: Pattern,
    pub endpoint: Endpoint,
}

/// Outcome of resolving a request against the table.
///
/// This is the whole dispatch surface: captures are owned so the match
/// outlives the request path it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Root,
    Echo(String),
    UserAgent,
    FilesGet(String),
    FilesPost(String),
    MethodNotAllowed,
    NotFound,
}

/// Immutable path-to-endpoint mapping.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The server's fixed table: `/` and `/user-agent` exact, `/echo/`
    /// and `/files/` by prefix, everything else unmatched.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route {
                    pattern: Pattern::Exact("/"),
                    endpoint: Endpoint::Root,
                },
                Route {
                    pattern: Pattern::Exact("/user-agent"),
                    endpoint: Endpoint::UserAgent,
                },
                Route {
                    pattern: Pattern::Prefix("/echo/"),
                    endpoint: Endpoint::Echo,
                },
                Route {
                    pattern: Pattern::Prefix("/files/"),
                    endpoint: Endpoint::Files,
                },
            ],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves a method/path pair to a dispatch decision.
    ///
    /// The patterns are mutually exclusive by construction: neither
    /// exact path extends a prefix and the prefixes share no cover, so
    /// the scan order cannot change the outcome.
    ///
    /// Only `/files/*` filters on method: GET reads, POST writes, and
    /// anything else is refused with 405. The other endpoints answer
    /// whatever method reaches them, a deliberate simplification.
    pub fn resolve(&self, method: Method, path: &str) -> RouteMatch {
        for route in &self.routes {
            let captured = match route.pattern {
                Pattern::Exact(literal) if path == literal => "",
                Pattern::Prefix(literal) if path.starts_with(literal) => &path[literal.len()..],
                _ => continue,
            };

            return match route.endpoint {
                Endpoint::Root => RouteMatch::Root,
                Endpoint::Echo => RouteMatch::Echo(captured.to_string()),
                Endpoint::UserAgent => RouteMatch::UserAgent,
                Endpoint::Files => match method {
                    Method::Get => RouteMatch::FilesGet(captured.to_string()),
                    Method::Post => RouteMatch::FilesPost(captured.to_string()),
                    Method::Unsupported => RouteMatch::MethodNotAllowed,
                },
            };
        }

        RouteMatch::NotFound
    }
}

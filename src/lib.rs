//! filament - Minimal HTTP/1.1 server over raw TCP
//!
//! A from-scratch rendition of the HTTP/1.1 wire protocol: request
//! parsing, keep-alive connections, gzip content negotiation, and
//! file-backed GET/POST, with no HTTP stack underneath.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
pub mod store;

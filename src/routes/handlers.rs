//! Bodies for the fixed endpoints.
//!
//! Handlers only build [`Response`] values; reading the connection and
//! framing bytes stay with the connection loop and writer.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::request::RequestHead;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::store::{FileStore, StoreError};

/// The fixed OK body for `/`.
pub fn root() -> Response {
    Response::plain_text("OK\n")
}

/// Returns the captured `/echo/` suffix verbatim, gzip-compressed when
/// the request advertised `Accept-Encoding: gzip`. The compressed
/// length is what ends up in `Content-Length`.
pub fn echo(suffix: &str, head: &RequestHead) -> Response {
    if !head.accepts_gzip() {
        return Response::plain_text(suffix.to_string());
    }

    match gzip(suffix.as_bytes()) {
        Ok(compressed) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .header("Content-Encoding", "gzip")
            .body(compressed)
            .build(),
        Err(err) => {
            tracing::error!(error = %err, "gzip encoding failed");
            Response::internal_error()
        }
    }
}

/// Returns the request's `User-Agent` value for `/user-agent`, empty
/// if the header was absent.
pub fn user_agent(head: &RequestHead) -> Response {
    Response::plain_text(head.user_agent().to_string())
}

/// Streams a stored file for `GET /files/{name}`. Every failure mode
/// (no directory configured, refused name, open or stat error)
/// collapses to an empty 404.
pub async fn file_get(store: Option<&FileStore>, name: &str) -> Response {
    let Some(store) = store else {
        return Response::not_found();
    };

    match store.open(name).await {
        Ok((file, len)) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .file_body(file, len)
            .build(),
        Err(err) => {
            tracing::debug!(name, error = %err, "file read failed");
            Response::not_found()
        }
    }
}

/// `POST /files/{name}` with the body already read in full. Refused
/// names are 404, filesystem failures 500, success an empty 201.
pub async fn file_save(store: &FileStore, name: &str, body: &[u8]) -> Response {
    match store.save(name, body).await {
        Ok(()) => Response::created(),
        Err(StoreError::Refused) => Response::not_found(),
        Err(StoreError::Io(err)) => {
            tracing::warn!(name, error = %err, "file write failed");
            Response::internal_error()
        }
    }
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Frames the head of a response: status line, `Name: Value\r\n` per
/// header (order unspecified), then the blank separator line.
fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (name, value) in &resp.headers {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes a complete response onto the connection: framed head, then
/// the in-memory body or the streamed file.
pub async fn send_response<W>(stream: &mut W, response: Response) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(&serialize_head(&response)).await?;

    match response.body {
        Body::Bytes(bytes) => {
            if !bytes.is_empty() {
                stream.write_all(&bytes).await?;
            }
        }
        Body::File { mut file, .. } => {
            tokio::io::copy(&mut file, stream).await?;
        }
    }

    stream.flush().await
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::http::reader::{RequestReader, WireError};
use crate::http::request::RequestHead;
use crate::http::response::Response;
use crate::http::writer;
use crate::routes::{RouteMatch, RouteTable, handlers};
use crate::store::FileStore;

/// Connection-loop states.
///
/// `Awaiting` re-arms the idle deadline and waits for a head;
/// `Dispatch` routes a parsed head and runs its handler (reading the
/// body on the files-POST path); `Respond` writes the response and
/// decides between looping and closing. `Closed` ends the task and the
/// socket drops with it, exactly once.
enum State {
    Awaiting,
    Dispatch(RequestHead),
    Respond { response: Response, close: bool },
    Closed,
}

/// One accepted connection, owned by one task.
///
/// Nothing here is shared with other connections except the immutable
/// route table; the socket, the carry-over read buffer and the deadline
/// live and die with this value.
pub struct Connection {
    stream: TcpStream,
    reader: RequestReader,
    routes: Arc<RouteTable>,
    store: Option<FileStore>,
    idle_timeout: Duration,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        routes: Arc<RouteTable>,
        store: Option<FileStore>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            reader: RequestReader::new(),
            routes,
            store,
            idle_timeout,
        }
    }

    /// Serves requests until the peer leaves, asks to close, times out,
    /// or sends something unparseable.
    ///
    /// Every protocol failure is translated here into a response or a
    /// silent close; only transport errors while writing escape, so the
    /// acceptor can log them.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut state = State::Awaiting;

        loop {
            state = match state {
                State::Awaiting => self.await_request().await,

                State::Dispatch(head) => self.dispatch(head).await,

                State::Respond { response, close } => {
                    writer::send_response(&mut self.stream, response).await?;
                    if close { State::Closed } else { State::Awaiting }
                }

                State::Closed => break,
            };
        }

        Ok(())
    }

    /// Waits for the next request head under a freshly armed idle
    /// deadline. Malformed input gets a 400 and unconditionally closes;
    /// EOF and deadline expiry close without a response.
    async fn await_request(&mut self) -> State {
        let head = with_deadline(self.idle_timeout, self.reader.read_head(&mut self.stream)).await;
        match head {
            Ok(head) => State::Dispatch(head),

            Err(WireError::Parse(err)) => {
                debug!(error = %err, "malformed request");
                State::Respond {
                    response: Response::bad_request(),
                    close: true,
                }
            }

            Err(WireError::Timeout) => {
                debug!("idle deadline expired");
                State::Closed
            }

            // Peer closed or reset; nothing sensible to answer.
            Err(_) => State::Closed,
        }
    }

    /// Routes a parsed head and produces the response for it.
    async fn dispatch(&mut self, head: RequestHead) -> State {
        debug!(method = ?head.method, path = %head.path, "request");

        // An explicit `Connection: close` ends the loop after this
        // exchange; a broken body read forces the same, since the
        // stream position is no longer trustworthy.
        let mut close = head.wants_close();

        let response = match self.routes.resolve(head.method, &head.path) {
            RouteMatch::Root => handlers::root(),
            RouteMatch::Echo(suffix) => handlers::echo(&suffix, &head),
            RouteMatch::UserAgent => handlers::user_agent(&head),
            RouteMatch::FilesGet(name) => handlers::file_get(self.store.as_ref(), &name).await,
            RouteMatch::FilesPost(name) => match &self.store {
                None => Response::not_found(),
                Some(store) => match head.content_length() {
                    Ok(Some(declared)) => {
                        let body = with_deadline(
                            self.idle_timeout,
                            self.reader.read_body(&mut self.stream, declared),
                        )
                        .await;
                        match body {
                            Ok(body) => handlers::file_save(store, &name, &body).await,
                            // Short, stalled or broken body.
                            Err(_) => {
                                close = true;
                                Response::bad_request()
                            }
                        }
                    }
                    // Content-Length missing or unparseable; the body,
                    // if any, was never consumed.
                    _ => {
                        close = true;
                        Response::bad_request()
                    }
                },
            },
            RouteMatch::MethodNotAllowed => Response::method_not_allowed(),
            RouteMatch::NotFound => Response::not_found(),
        };

        State::Respond { response, close }
    }
}

/// Arms the idle deadline around one read. Expiry surfaces as
/// [`WireError::Timeout`].
async fn with_deadline<T>(
    idle: Duration,
    read: impl Future<Output = Result<T, WireError>>,
) -> Result<T, WireError> {
    match timeout(idle, read).await {
        Ok(outcome) => outcome,
        Err(_) => Err(WireError::Timeout),
    }
}

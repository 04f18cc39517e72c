//! HTTP/1.1 wire protocol, implemented directly over the socket.
//!
//! # Architecture
//!
//! - **`parser`**: pure request-head parsing from buffered bytes
//! - **`reader`**: buffered socket reads, head extraction, bounded body reads
//! - **`request`**: parsed request head and header access
//! - **`response`**: response representation with builder
//! - **`writer`**: response framing and transmission
//! - **`connection`**: the per-connection state machine tying it together
//!
//! # Connection state machine
//!
//! Each accepted connection cycles through:
//!
//! ```text
//!        ┌──────────────┐
//!        │   Awaiting   │ ← idle deadline armed, wait for a head
//!        └──────┬───────┘
//!               │ head parsed          (EOF/deadline → Closed, silently)
//!               ▼
//!        ┌──────────────┐
//!        │   Dispatch   │ ← route, run handler, read body if needed
//!        └──────┬───────┘
//!               │ response ready       (malformed head → Respond 400, close)
//!               ▼
//!        ┌──────────────┐
//!        │   Respond    │ ← frame and write the response
//!        └──────┬───────┘
//!               │
//!               ├─ keep-alive → Awaiting (same connection)
//!               └─ close → Closed
//! ```
//!
//! HTTP/1.1 keep-alive is the default: only `Connection: close`, a
//! malformed request, a broken body read, EOF, or the idle deadline end
//! the loop.

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;

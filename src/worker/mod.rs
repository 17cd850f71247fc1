//! Backend worker task and its message protocol.
//!
//! The UI task posts [`BackendRequest`]s over an unbounded channel; the
//! worker processes them sequentially against the service ports and sends
//! [`BackendResponse`]s back. Trace context rides along with every request so
//! worker spans link to the UI spans that caused them.

pub mod handler;
pub mod messages;

pub use handler::Backend;
pub use messages::{BackendRequest, BackendResponse, FailureKind, RequestOp, TraceContext};

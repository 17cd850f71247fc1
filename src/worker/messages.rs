//! Message protocol between the UI task and the backend worker task.
//!
//! This module defines the request and response types carried over the worker
//! channels, plus trace context propagation so worker spans link back to the
//! UI span that triggered them.

use crate::domain::{Book, BookDraft, BookRef, Category, Identity, Page, Role, TeacherBook};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when posting requests to the worker task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// A backend operation for the worker to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestOp {
    /// Authenticate with the given credentials.
    Login {
        email: String,
        password: String,
        role: Role,
    },

    /// Create a new account.
    Register {
        email: String,
        password: String,
        name: String,
        role: Role,
    },

    /// Load the book catalog, optionally narrowed to one category.
    ListBooks { category: Option<Category> },

    /// Fetch the content of one page of a book.
    FetchPage { book_id: String, page: u32 },

    /// Ask the assistant for a reply in the given context.
    AssistantReply {
        book: Option<BookRef>,
        /// Page number and title, when asked from the reader.
        page: Option<(u32, String)>,
        text: String,
    },

    /// Report that the reader reached the last page of a book.
    MarkCompleted { book_id: String },

    /// Load the teacher's managed book list.
    ListManagedBooks,

    /// Create a new draft book from the teacher dashboard.
    CreateBook { draft: BookDraft },
}

impl RequestOp {
    /// Short operation name for log and span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::ListBooks { .. } => "list_books",
            Self::FetchPage { .. } => "fetch_page",
            Self::AssistantReply { .. } => "assistant_reply",
            Self::MarkCompleted { .. } => "mark_completed",
            Self::ListManagedBooks => "list_managed_books",
            Self::CreateBook { .. } => "create_book",
        }
    }
}

/// A request posted to the worker: the operation plus the trace context of
/// the span that issued it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRequest {
    pub op: RequestOp,

    /// Trace context for linking spans across tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceContext>,
}

impl BackendRequest {
    /// Wraps an operation with the current trace context attached.
    #[must_use]
    pub fn new(op: RequestOp) -> Self {
        Self {
            op,
            trace: TraceContext::from_current(),
        }
    }
}

/// What a request failed as, so the UI can route the message to the right
/// surface (form banner, status line, chat transcript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Auth,
    Registration,
    Catalog,
    Assistant,
}

/// Responses sent from the worker task back to the UI task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackendResponse {
    /// Authentication succeeded.
    LoggedIn { identity: Identity },

    /// Registration succeeded; the new account is signed in.
    Registered { identity: Identity },

    /// The book catalog was loaded.
    Books { books: Vec<Book> },

    /// A page of content arrived.
    Page {
        book_id: String,
        page: u32,
        content: Page,
    },

    /// The assistant produced a reply.
    AssistantReply { text: String },

    /// Completion of a book was recorded.
    Completed { book_id: String },

    /// The teacher's managed books were loaded.
    ManagedBooks { books: Vec<TeacherBook> },

    /// A draft book was created.
    BookCreated { book: TeacherBook },

    /// A request failed.
    Failed {
        kind: FailureKind,
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_context_absent_without_subscriber() {
        // No tracing subscriber is installed in unit tests, so the current
        // span context is invalid and capture yields None.
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = BackendRequest {
            op: RequestOp::FetchPage {
                book_id: "2".to_string(),
                page: 7,
            },
            trace: Some(TraceContext {
                trace_id: "0".repeat(32),
                parent_span_id: "0".repeat(16),
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: BackendRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn op_names_are_stable() {
        assert_eq!(RequestOp::ListManagedBooks.name(), "list_managed_books");
        assert_eq!(
            RequestOp::MarkCompleted {
                book_id: "1".to_string()
            }
            .name(),
            "mark_completed"
        );
    }
}

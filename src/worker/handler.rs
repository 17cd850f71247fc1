//! Backend worker task for asynchronous service operations.
//!
//! This module runs all service calls off the UI task so the event loop never
//! blocks on simulated (or, later, real) network latency. Requests are
//! processed strictly in arrival order, one at a time, which keeps response
//! ordering deterministic. It includes distributed tracing support for
//! cross-task observability.

use crate::services::{AssistantService, AuthService, CatalogService, ServiceError};
use crate::worker::messages::{BackendRequest, BackendResponse, FailureKind, RequestOp};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// The worker side of the backend channel pair.
///
/// Holds the service ports and processes one request at a time. Constructed
/// once at startup and moved into the spawned task.
pub struct Backend {
    auth: Arc<dyn AuthService>,
    catalog: Arc<dyn CatalogService>,
    assistant: Arc<dyn AssistantService>,
}

impl Backend {
    /// Creates a worker over the given service adapters.
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthService>,
        catalog: Arc<dyn CatalogService>,
        assistant: Arc<dyn AssistantService>,
    ) -> Self {
        Self {
            auth,
            catalog,
            assistant,
        }
    }

    /// Spawns the worker task and returns the channel pair the UI talks over.
    ///
    /// The task ends when the request sender is dropped. Responses for
    /// requests issued before the drop are still delivered.
    #[must_use]
    pub fn spawn(
        self,
    ) -> (
        mpsc::UnboundedSender<BackendRequest>,
        mpsc::UnboundedReceiver<BackendResponse>,
    ) {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<BackendRequest>();
        let (response_tx, response_rx) = mpsc::unbounded_channel::<BackendResponse>();

        tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let response = self.handle_request(request).await;
                if response_tx.send(response).is_err() {
                    // UI side went away, nothing left to do.
                    break;
                }
            }
            tracing::debug!("backend worker shutting down");
        });

        (request_tx, response_rx)
    }

    /// Reconstructs the parent OpenTelemetry context from the serialized
    /// trace information in a request, allowing spans created in the worker
    /// task to be linked to their parent spans in the UI task.
    fn parent_trace_context(request: &BackendRequest) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace = request.trace.as_ref()?;

        let trace_id = TraceId::from_hex(&trace.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Processes one request and produces its response.
    ///
    /// Opens a span named after the operation, parented to the request's
    /// trace context, and runs the dispatch instrumented with it. The span
    /// is attached through `Instrument` rather than an entered guard so the
    /// future stays `Send` for `tokio::spawn`.
    pub async fn handle_request(&self, request: BackendRequest) -> BackendResponse {
        let span = tracing::debug_span!("backend_handle_request", operation = request.op.name());
        if let Some(parent) = Self::parent_trace_context(&request) {
            span.set_parent(parent);
        }
        self.dispatch(request.op).instrument(span).await
    }

    async fn dispatch(&self, op: RequestOp) -> BackendResponse {
        match op {
            RequestOp::Login {
                email,
                password,
                role,
            } => Self::respond(
                FailureKind::Auth,
                self.auth.login(&email, &password, role).await,
                |identity| {
                    tracing::debug!(user = %identity.name, role = identity.role.label(), "login succeeded");
                    BackendResponse::LoggedIn { identity }
                },
            ),

            RequestOp::Register {
                email,
                password,
                name,
                role,
            } => Self::respond(
                FailureKind::Registration,
                self.auth.register(&email, &password, &name, role).await,
                |identity| {
                    tracing::debug!(user = %identity.name, "registration succeeded");
                    BackendResponse::Registered { identity }
                },
            ),

            RequestOp::ListBooks { category } => Self::respond(
                FailureKind::Catalog,
                self.catalog.list_books(category).await,
                |books| {
                    tracing::debug!(book_count = books.len(), "catalog loaded");
                    BackendResponse::Books { books }
                },
            ),

            RequestOp::FetchPage { book_id, page } => Self::respond(
                FailureKind::Catalog,
                self.catalog.page_content(&book_id, page).await,
                |content| {
                    tracing::debug!(book_id = %book_id, page = page, "page fetched");
                    BackendResponse::Page {
                        book_id,
                        page,
                        content,
                    }
                },
            ),

            RequestOp::AssistantReply { book, page, text } => {
                let page_ctx = page.as_ref().map(|(n, title)| (*n, title.as_str()));
                Self::respond(
                    FailureKind::Assistant,
                    self.assistant.reply(book.as_ref(), page_ctx, &text).await,
                    |text| BackendResponse::AssistantReply { text },
                )
            }

            RequestOp::MarkCompleted { book_id } => Self::respond(
                FailureKind::Catalog,
                self.catalog.mark_completed(&book_id).await,
                |()| {
                    tracing::debug!(book_id = %book_id, "completion recorded");
                    BackendResponse::Completed { book_id }
                },
            ),

            RequestOp::ListManagedBooks => Self::respond(
                FailureKind::Catalog,
                self.catalog.list_managed_books().await,
                |books| {
                    tracing::debug!(book_count = books.len(), "managed books loaded");
                    BackendResponse::ManagedBooks { books }
                },
            ),

            RequestOp::CreateBook { draft } => Self::respond(
                FailureKind::Catalog,
                self.catalog.create_book(draft).await,
                |book| {
                    tracing::debug!(title = %book.title, "draft book created");
                    BackendResponse::BookCreated { book }
                },
            ),
        }
    }

    /// Helper for turning a port result into a response with consistent
    /// failure logging.
    fn respond<T, F>(
        kind: FailureKind,
        result: Result<T, ServiceError>,
        on_success: F,
    ) -> BackendResponse
    where
        F: FnOnce(T) -> BackendResponse,
    {
        match result {
            Ok(value) => on_success(value),
            Err(e) => {
                tracing::debug!(error = %e, "service call failed");
                BackendResponse::Failed {
                    kind,
                    message: e.to_string(),
                }
            }
        }
    }
}

//! Service contracts (traits) for the external collaborators.
//!
//! These traits form the boundary between the UI core and the services it
//! will eventually call for real: authentication, book content, and assistant
//! inference. The prototype ships mock adapters only, but every call site goes
//! through these ports so real HTTP clients can be substituted without
//! touching the application layer.

use crate::domain::{Book, BookDraft, BookRef, Category, Identity, Page, Role, TeacherBook};
use async_trait::async_trait;

/// Error type for all port operations.
///
/// This is the discriminated failure taxonomy surfaced to the UI: each
/// variant maps to a distinct presentation (form banner, inline message, or
/// status line). The mock adapters never produce the failure variants, but
/// real adapters will.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Credentials were rejected by the auth backend.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already exists for the given email.
    #[error("an account already exists for {0}")]
    DuplicateRegistration(String),

    /// The referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transient network or service failure; retryable.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// A convenience alias for port results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Authentication and account creation.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates and returns the signed-in identity.
    async fn login(&self, email: &str, password: &str, role: Role) -> ServiceResult<Identity>;

    /// Creates an account and returns the signed-in identity.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> ServiceResult<Identity>;
}

/// Book catalog, content, and management operations.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists catalog entries, optionally restricted to one category.
    async fn list_books(&self, filter: Option<Category>) -> ServiceResult<Vec<Book>>;

    /// Resolves a catalog entry by id.
    async fn book(&self, book_id: &str) -> ServiceResult<Book>;

    /// Fetches one page of book content.
    async fn page_content(&self, book_id: &str, page: u32) -> ServiceResult<Page>;

    /// Total page count for a book.
    async fn page_count(&self, book_id: &str) -> ServiceResult<u32>;

    /// Records that the current user finished reading a book.
    async fn mark_completed(&self, book_id: &str) -> ServiceResult<()>;

    /// Lists books from the management (teacher) perspective.
    async fn list_managed_books(&self) -> ServiceResult<Vec<TeacherBook>>;

    /// Creates a new managed book from draft metadata.
    ///
    /// File upload and processing belong to an external collaborator; only
    /// metadata travels through this port.
    async fn create_book(&self, draft: BookDraft) -> ServiceResult<TeacherBook>;
}

/// The simulated AI reading assistant.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Produces one assistant reply for a user message.
    ///
    /// `book` and `page` carry the reading context: both present when asking
    /// from inside the reader, only `book` when a book is selected, neither
    /// for free-form questions.
    async fn reply(
        &self,
        book: Option<&BookRef>,
        page: Option<(u32, &str)>,
        text: &str,
    ) -> ServiceResult<String>;
}

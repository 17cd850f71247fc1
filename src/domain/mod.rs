//! Domain layer for the LearnBooks prototype.
//!
//! Core types shared across the application, independent of terminal,
//! rendering, or service-adapter concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`identity`]: Authenticated user and role
//! - [`book`]: Catalog entries, selections, pages, teacher-managed books
//! - [`message`]: Chat transcript entries

pub mod book;
pub mod error;
pub mod identity;
pub mod message;

pub use book::{Book, BookDraft, BookRef, BookStatus, Category, Page, TeacherBook};
pub use error::{LearnBooksError, Result};
pub use identity::{Identity, Role};
pub use message::{ChatMessage, Sender};

//! Book catalog and selection types.
//!
//! [`Book`] is a read-only catalog entry as served by the (mock) content
//! service. [`BookRef`] is the lightweight reference held as the current
//! selection and threaded into the reader and chat screens.

use serde::{Deserialize, Serialize};

/// Subject category of a catalog entry.
///
/// Used both as a book attribute and (wrapped in `Option` with `None` meaning
/// "all") as the library filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Science,
    Math,
    History,
    Language,
}

impl Category {
    /// All categories in display order, used to cycle the library filter.
    pub const ALL: [Self; 4] = [Self::Science, Self::Math, Self::History, Self::Language];

    /// Human-readable label for the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Math => "Math",
            Self::History => "History",
            Self::Language => "Language",
        }
    }
}

/// A read-only book catalog entry.
///
/// In a real deployment this is owned by an external content service; the
/// prototype serves a fixed mock set through the catalog port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f32,
    pub students_count: u32,
    pub category: Category,
}

impl Book {
    /// The lightweight reference used as the current selection.
    #[must_use]
    pub fn to_ref(&self) -> BookRef {
        BookRef {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

/// The currently chosen book, consumed by the reader and chat screens.
///
/// Optional at the application level; cleared on logout or an explicit back
/// action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub id: String,
    pub title: String,
    pub author: String,
}

/// Publication state of a teacher-managed book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// Visible to students in the library.
    Active,
    /// Uploaded but not yet published.
    Draft,
}

impl BookStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
        }
    }
}

/// A book as seen from the teacher management dashboard.
///
/// Extends the catalog entry with engagement counters and publication state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub students_count: u32,
    pub chats_count: u32,
    pub rating: f32,
    pub status: BookStatus,
}

/// Metadata for a new book submitted from the teacher dashboard.
///
/// The actual file upload and processing happen in an external collaborator;
/// the prototype only carries the metadata through the create-book port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: Option<Category>,
    pub description: String,
}

/// A single page of book content as returned by the content service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub body: String,
}

//! Library screen state: the book list, category filter, fuzzy search, and
//! cursor.
//!
//! Filtering happens in two stages. The category filter narrows the source
//! list, then the fuzzy query ranks and highlights what remains. The cursor
//! indexes into the filtered list and wraps at both ends.

use crate::domain::{Book, Category};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A book surviving the current filters, with the character indices of the
/// title that matched the query (for highlight rendering).
#[derive(Debug, Clone)]
pub struct FilteredBook {
    pub book: Book,
    pub highlight: Vec<usize>,
}

/// State of the library screen.
pub struct LibraryState {
    /// Full catalog as loaded from the backend.
    books: Vec<Book>,
    /// Books surviving the category filter and fuzzy query.
    filtered: Vec<FilteredBook>,
    /// Active category filter, `None` meaning all categories.
    category: Option<Category>,
    /// Fuzzy search query.
    pub query: String,
    /// Cursor into `filtered`.
    selected_index: usize,
    /// Whether the catalog fetch is in flight.
    pub loading: bool,
    matcher: SkimMatcherV2,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            filtered: Vec::new(),
            category: None,
            query: String::new(),
            selected_index: 0,
            loading: false,
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl std::fmt::Debug for LibraryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryState")
            .field("books", &self.books.len())
            .field("filtered", &self.filtered.len())
            .field("category", &self.category)
            .field("query", &self.query)
            .field("selected_index", &self.selected_index)
            .field("loading", &self.loading)
            .finish()
    }
}

impl LibraryState {
    /// Replaces the catalog and reapplies the current filters.
    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.loading = false;
        self.apply_filters();
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn filtered(&self) -> &[FilteredBook] {
        &self.filtered
    }

    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// The book under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Book> {
        self.filtered.get(self.selected_index).map(|f| &f.book)
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Looks a book up by id in the full catalog, ignoring filters.
    #[must_use]
    pub fn book_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Advances the category filter: All → each category in order → All.
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::ALL[0]),
            Some(current) => {
                let idx = Category::ALL.iter().position(|c| *c == current);
                match idx {
                    Some(i) if i + 1 < Category::ALL.len() => Some(Category::ALL[i + 1]),
                    _ => None,
                }
            }
        };
        self.apply_filters();
    }

    /// Recomputes the filtered list after a query edit.
    pub fn query_changed(&mut self) {
        self.apply_filters();
    }

    /// Moves the cursor down, wrapping past the end.
    pub fn move_selection_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered.len();
    }

    /// Moves the cursor up, wrapping past the start.
    pub fn move_selection_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = self
            .selected_index
            .checked_sub(1)
            .unwrap_or(self.filtered.len() - 1);
    }

    fn apply_filters(&mut self) {
        let query = self.query.trim();
        self.filtered = self
            .books
            .iter()
            .filter(|b| self.category.map_or(true, |c| b.category == c))
            .filter_map(|b| {
                if query.is_empty() {
                    return Some(FilteredBook {
                        book: b.clone(),
                        highlight: Vec::new(),
                    });
                }
                let haystack = format!("{} {}", b.title, b.author);
                // Match indices are character positions, so the title
                // boundary must be counted in characters as well.
                let title_chars = b.title.chars().count();
                self.matcher
                    .fuzzy_indices(&haystack, query)
                    .map(|(_, indices)| FilteredBook {
                        book: b.clone(),
                        highlight: indices.into_iter().filter(|i| *i < title_chars).collect(),
                    })
            })
            .collect();
        if self.selected_index >= self.filtered.len() {
            self.selected_index = self.filtered.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::mock_catalog;

    fn loaded() -> LibraryState {
        let mut lib = LibraryState::default();
        lib.set_books(mock_catalog());
        lib
    }

    #[test]
    fn unfiltered_list_shows_whole_catalog() {
        let lib = loaded();
        assert_eq!(lib.filtered().len(), 4);
    }

    #[test]
    fn category_filter_narrows_list() {
        let mut lib = loaded();
        lib.cycle_category();
        assert_eq!(lib.category(), Some(Category::Science));
        assert_eq!(lib.filtered().len(), 1);
        assert_eq!(lib.filtered()[0].book.category, Category::Science);
    }

    #[test]
    fn category_cycle_returns_to_all() {
        let mut lib = loaded();
        for _ in 0..Category::ALL.len() + 1 {
            lib.cycle_category();
        }
        assert_eq!(lib.category(), None);
        assert_eq!(lib.filtered().len(), 4);
    }

    #[test]
    fn fuzzy_query_matches_title() {
        let mut lib = loaded();
        lib.query = "science".to_string();
        lib.query_changed();
        assert_eq!(lib.filtered().len(), 1);
        assert!(!lib.filtered()[0].highlight.is_empty());
    }

    #[test]
    fn author_match_is_not_highlighted_in_a_multibyte_title() {
        let mut lib = LibraryState::default();
        lib.set_books(vec![Book {
            id: "9".to_string(),
            title: "รามเกียรติ์".to_string(),
            author: "Valmiki".to_string(),
            description: String::new(),
            rating: 4.5,
            students_count: 10,
            category: Category::Language,
        }]);
        lib.query = "valmiki".to_string();
        lib.query_changed();

        // The query hits the author only, so no title position lights up.
        assert_eq!(lib.filtered().len(), 1);
        assert!(lib.filtered()[0].highlight.is_empty());
    }

    #[test]
    fn no_match_empties_list_without_panicking_cursor() {
        let mut lib = loaded();
        lib.move_selection_down();
        lib.query = "zzzzzzz".to_string();
        lib.query_changed();
        assert!(lib.filtered().is_empty());
        assert!(lib.selected().is_none());
        lib.move_selection_down();
        lib.move_selection_up();
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut lib = loaded();
        lib.move_selection_up();
        assert_eq!(lib.selected_index(), 3);
        lib.move_selection_down();
        assert_eq!(lib.selected_index(), 0);
    }

    #[test]
    fn unknown_id_lookup_is_none() {
        let lib = loaded();
        assert!(lib.book_by_id("999").is_none());
        assert!(lib.book_by_id("2").is_some());
    }
}

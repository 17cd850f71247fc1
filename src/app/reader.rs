//! Reader screen state: pagination, zoom, and completion.
//!
//! All transitions clamp instead of erroring. The finished flag is derived
//! from the page position rather than stored, so it can never disagree with
//! the page number.

use crate::domain::Page;

/// Zoom bounds and step, in percent.
pub const ZOOM_MIN: u8 = 50;
pub const ZOOM_MAX: u8 = 200;
pub const ZOOM_STEP: u8 = 25;
pub const ZOOM_DEFAULT: u8 = 100;

/// Per-session reading state for the selected book.
#[derive(Debug, Clone)]
pub struct ReaderState {
    /// Current page, always in `1..=total_pages`.
    current_page: u32,
    /// Total pages of the open book.
    total_pages: u32,
    /// Zoom percentage, always in `ZOOM_MIN..=ZOOM_MAX`.
    zoom: u8,
    /// Content of the current page, once fetched.
    pub page: Option<Page>,
    /// Whether a page fetch is in flight.
    pub loading: bool,
    /// Set once completion has been reported, so finishing a book posts the
    /// backend notification exactly once per read-through.
    pub completion_reported: bool,
}

impl ReaderState {
    /// Fresh reader state for a book with `total_pages` pages, opened at
    /// page 1.
    #[must_use]
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            zoom: ZOOM_DEFAULT,
            page: None,
            loading: false,
            completion_reported: false,
        }
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// The book is finished exactly when the last page is open.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Advances one page, clamped at the last page.
    ///
    /// Returns `true` if the page actually changed (and content must be
    /// refetched).
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            self.page = None;
            true
        } else {
            false
        }
    }

    /// Goes back one page, clamped at page 1.
    ///
    /// Returns `true` if the page actually changed.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            self.page = None;
            true
        } else {
            false
        }
    }

    /// Restarts the book at page 1 and re-arms completion reporting.
    pub fn read_again(&mut self) {
        self.current_page = 1;
        self.page = None;
        self.completion_reported = false;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn zoom_reset(&mut self) {
        self.zoom = ZOOM_DEFAULT;
    }
}

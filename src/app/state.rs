//! Application state management.
//!
//! This module defines [`AppState`], the central state container for the
//! application. It is the single source of truth for all transient UI state:
//! who is signed in, which view tag is active, which book is selected, and
//! the per-screen state bundles (library, chat, reader, teacher dashboard,
//! auth forms).
//!
//! State is mutated only by the event handler; the renderer sees it through
//! the view model computed per frame. That unidirectional flow keeps every
//! transition testable without a terminal.

use crate::app::chat::{ChatContext, ChatState, PageRef};
use crate::app::forms::{DraftForm, LoginForm, RegisterForm};
use crate::app::library::LibraryState;
use crate::app::reader::ReaderState;
use crate::app::router::{self, Screen};
use crate::app::view::{AuthScreen, InputMode, View};
use crate::domain::{BookRef, Identity, TeacherBook};
use crate::ui::theme::Theme;

/// Aggregate counters shown at the top of the teacher dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeacherStats {
    pub total_books: usize,
    pub total_students: u32,
    pub total_chats: u32,
    pub avg_rating: f32,
}

/// State of the teacher management container.
#[derive(Debug, Default)]
pub struct TeacherState {
    /// Managed books, loaded on first entry to the dashboard.
    pub books: Vec<TeacherBook>,
    pub loading: bool,
    /// Whether the managed book list has been requested at least once.
    pub loaded: bool,
    /// The add-book form is open.
    pub adding: bool,
    pub draft: DraftForm,
}

impl TeacherState {
    /// Aggregates the dashboard counters from the managed book list.
    #[must_use]
    pub fn stats(&self) -> TeacherStats {
        let total_books = self.books.len();
        let total_students = self.books.iter().map(|b| b.students_count).sum();
        let total_chats = self.books.iter().map(|b| b.chats_count).sum();
        let avg_rating = if total_books == 0 {
            0.0
        } else {
            self.books.iter().map(|b| b.rating).sum::<f32>() / total_books as f32
        };
        TeacherStats {
            total_books,
            total_students,
            total_chats,
            avg_rating,
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to key events and worker
/// responses. Everything here is per-session: nothing survives a restart.
pub struct AppState {
    /// The signed-in user, `None` while on the auth screens.
    pub identity: Option<Identity>,
    /// Which auth screen shows while signed out.
    pub auth_screen: AuthScreen,
    /// An auth request is in flight; submits are suppressed meanwhile.
    pub auth_busy: bool,
    /// Navigation tag; the router derives the rendered screen from it.
    pub view: View,
    /// Current keybinding interpretation.
    pub input_mode: InputMode,
    /// The currently chosen book, threaded into the reader and chat.
    pub selection: Option<BookRef>,

    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub library: LibraryState,
    pub chat: ChatState,
    /// Present only while a book is open in the reader.
    pub reader: Option<ReaderState>,
    pub teacher: TeacherState,

    /// Transient status line message.
    pub status: Option<String>,
    pub theme: Theme,
}

impl AppState {
    /// Fresh signed-out state on the login screen.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            identity: None,
            auth_screen: AuthScreen::Login,
            auth_busy: false,
            view: View::Dashboard,
            input_mode: InputMode::Normal,
            selection: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            library: LibraryState::default(),
            chat: ChatState::new(),
            reader: None,
            teacher: TeacherState::default(),
            status: None,
            theme,
        }
    }

    /// The screen the router resolves for the current state.
    #[must_use]
    pub fn screen(&self) -> Screen {
        router::resolve(
            self.identity.as_ref(),
            self.view,
            self.selection.as_ref(),
            self.auth_screen,
        )
    }

    /// Installs a signed-in identity and moves to its landing view.
    ///
    /// Credentials are dropped from the forms; they are never retained past
    /// the auth round-trip.
    pub fn sign_in(&mut self, identity: Identity) {
        self.view = View::landing_for(identity.role);
        self.identity = Some(identity);
        self.auth_busy = false;
        self.login_form = LoginForm::default();
        self.register_form = RegisterForm::default();
        self.input_mode = InputMode::Normal;
    }

    /// Clears the session back to the signed-out baseline.
    ///
    /// Everything user-scoped goes: identity, selection, reader, chat
    /// transcript, teacher data. The next sign-in starts clean.
    pub fn sign_out(&mut self) {
        self.identity = None;
        self.selection = None;
        self.reader = None;
        self.view = View::Dashboard;
        self.auth_screen = AuthScreen::Login;
        self.auth_busy = false;
        self.input_mode = InputMode::Normal;
        self.chat = ChatState::new();
        self.teacher = TeacherState::default();
        self.status = None;
    }

    /// Makes `book` the current selection and moves to the chat view.
    pub fn select_book(&mut self, book: BookRef) {
        self.chat.set_context(ChatContext {
            book: Some(book.clone()),
            page: None,
        });
        self.selection = Some(book);
        self.view = View::Chat;
    }

    /// Drops the selection (and any open reader) and re-greets contextless.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.reader = None;
        self.chat.set_context(ChatContext::default());
    }

    /// Opens the reader on the current selection at page 1.
    ///
    /// No-op without a selection; the router would bounce the view back to
    /// the library anyway.
    pub fn open_reader(&mut self, total_pages: u32) {
        if self.selection.is_none() {
            return;
        }
        self.reader = Some(ReaderState::new(total_pages));
        self.view = View::Reader;
        self.sync_chat_context();
    }

    /// Re-derives the assistant context from the selection and reader state.
    pub fn sync_chat_context(&mut self) {
        let page = self.reader.as_ref().map(|r| PageRef {
            number: r.current_page(),
            title: r
                .page
                .as_ref()
                .map_or_else(|| format!("Page {}", r.current_page()), |p| p.title.clone()),
        });
        self.chat.set_context(ChatContext {
            book: self.selection.clone(),
            page,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookStatus, Category, Role};

    fn identity(role: Role) -> Identity {
        Identity {
            id: "1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            role,
        }
    }

    fn book() -> BookRef {
        BookRef {
            id: "2".to_string(),
            title: "Foundations of Mathematics for Life".to_string(),
            author: "Somying Lekkanit".to_string(),
        }
    }

    #[test]
    fn starts_signed_out_on_login() {
        let state = AppState::new(Theme::default());
        assert!(state.identity.is_none());
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn sign_in_lands_on_role_view() {
        let mut state = AppState::new(Theme::default());
        state.login_form.password = "secret1".to_string();
        state.sign_in(identity(Role::Student));
        assert_eq!(state.view, View::Chat);
        assert!(state.login_form.password.is_empty());

        let mut state = AppState::new(Theme::default());
        state.sign_in(identity(Role::Teacher));
        assert_eq!(state.view, View::TeacherDashboard);
    }

    #[test]
    fn sign_out_clears_user_scoped_state() {
        let mut state = AppState::new(Theme::default());
        state.sign_in(identity(Role::Student));
        state.select_book(book());
        state.open_reader(45);
        state.sign_out();
        assert!(state.identity.is_none());
        assert!(state.selection.is_none());
        assert!(state.reader.is_none());
        assert_eq!(state.view, View::Dashboard);
        assert_eq!(state.auth_screen, AuthScreen::Login);
        assert_eq!(state.chat.messages().len(), 1);
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn select_book_moves_to_chat_with_context() {
        let mut state = AppState::new(Theme::default());
        state.sign_in(identity(Role::Student));
        state.view = View::Library;
        state.select_book(book());
        assert_eq!(state.view, View::Chat);
        assert_eq!(state.selection.as_ref().unwrap().id, "2");
        assert!(state
            .chat
            .messages()
            .last()
            .unwrap()
            .text
            .contains("Foundations of Mathematics for Life"));
    }

    #[test]
    fn open_reader_without_selection_is_noop() {
        let mut state = AppState::new(Theme::default());
        state.sign_in(identity(Role::Student));
        state.open_reader(45);
        assert!(state.reader.is_none());
    }

    #[test]
    fn teacher_stats_aggregate() {
        let mut teacher = TeacherState::default();
        teacher.books = vec![
            TeacherBook {
                id: "1".to_string(),
                title: "A".to_string(),
                author: "X".to_string(),
                category: Category::Science,
                students_count: 100,
                chats_count: 10,
                rating: 4.0,
                status: BookStatus::Active,
            },
            TeacherBook {
                id: "2".to_string(),
                title: "B".to_string(),
                author: "Y".to_string(),
                category: Category::Math,
                students_count: 50,
                chats_count: 30,
                rating: 5.0,
                status: BookStatus::Draft,
            },
        ];
        let stats = teacher.stats();
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.total_students, 150);
        assert_eq!(stats.total_chats, 40);
        assert!((stats.avg_rating - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_teacher_stats_are_zero() {
        let stats = TeacherState::default().stats();
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.avg_rating, 0.0);
    }
}

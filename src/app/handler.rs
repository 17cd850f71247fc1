//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and worker responses, translating them into state changes and action
//! sequences. It is the primary control flow coordinator for the
//! application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal or the worker channel
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! Key events are already semantic at this point; the binding from raw key
//! codes to events happens in the main loop, keyed by the active screen and
//! input mode.

use crate::app::reader::ReaderState;
use crate::app::router::Screen;
use crate::app::state::AppState;
use crate::app::view::{AuthScreen, InputMode, View};
use crate::domain::error::Result;
use crate::services::MOCK_TOTAL_PAGES;
use crate::worker::{BackendRequest, BackendResponse, FailureKind, RequestOp};

/// Side effects emitted by the event handler for the main loop to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Post a request to the backend worker.
    Backend(BackendRequest),
    /// Tear down the terminal and exit.
    Quit,
}

/// Events triggered by user input or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes these sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the list cursor up by one position (wraps at the top).
    MoveUp,
    /// Moves the list cursor down by one position (wraps at the bottom).
    MoveDown,
    /// Context-dependent confirm: submit the focused form, open the book
    /// under the cursor, or send the chat composer.
    Activate,
    /// Appends a character to the focused text input.
    Char(char),
    /// Removes the last character from the focused text input.
    Backspace,
    /// Moves focus to the next form field.
    NextField,
    /// Flips the role toggle on the active auth form.
    ToggleRole,
    /// Switches between the login and register screens.
    ToggleAuthScreen,
    /// Enters editing mode (printable keys become text input).
    StartEditing,
    /// Leaves editing mode back to normal navigation.
    StopEditing,

    /// Navigates to a view tag.
    GoTo(View),
    /// Selects a book by id (unknown ids are ignored).
    SelectBook(String),
    /// Opens the reader on the current selection.
    OpenReader,
    /// Opens the profile screen.
    OpenProfile,
    /// Context-dependent back action.
    Back,
    /// Drops the current selection and returns to the library.
    ClearSelection,

    /// Reader: advance one page.
    NextPage,
    /// Reader: go back one page.
    PrevPage,
    /// Reader: restart the finished book at page 1.
    ReadAgain,
    ZoomIn,
    ZoomOut,
    ZoomReset,

    /// Library: advance the category filter.
    CycleCategory,
    /// Teacher dashboard: open or close the add-book form.
    ToggleAddBook,

    /// Signs the current user out.
    Logout,
    /// Exits the application.
    Quit,

    /// A response arrived from the backend worker.
    Backend(BackendResponse),
}

/// Processes an event against the current state.
///
/// Returns whether the UI should re-render, plus the actions the main loop
/// must execute. Unknown or out-of-context events are ignored rather than
/// treated as errors: navigation must never crash the application.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let mut actions = Vec::new();
    let should_render = match event {
        Event::MoveUp => {
            if state.screen() == Screen::Library {
                state.library.move_selection_up();
                true
            } else {
                false
            }
        }
        Event::MoveDown => {
            if state.screen() == Screen::Library {
                state.library.move_selection_down();
                true
            } else {
                false
            }
        }

        Event::Activate => handle_activate(state, &mut actions),

        Event::Char(c) => handle_char(state, *c),
        Event::Backspace => handle_backspace(state),
        Event::NextField => handle_next_field(state),
        Event::ToggleRole => handle_toggle_role(state),

        Event::ToggleAuthScreen => {
            if state.identity.is_none() {
                state.auth_screen = match state.auth_screen {
                    AuthScreen::Login => AuthScreen::Register,
                    AuthScreen::Register => AuthScreen::Login,
                };
                true
            } else {
                false
            }
        }

        Event::StartEditing => {
            state.input_mode = InputMode::Editing;
            true
        }
        Event::StopEditing => {
            state.input_mode = InputMode::Normal;
            true
        }

        Event::GoTo(view) => handle_goto(state, *view, &mut actions),

        Event::SelectBook(id) => match state.library.book_by_id(id) {
            Some(book) => {
                let book = book.to_ref();
                state.select_book(book);
                true
            }
            None => {
                tracing::debug!(book_id = %id, "ignoring selection of unknown book");
                false
            }
        },

        Event::OpenReader => {
            if state.identity.is_some() && state.selection.is_some() {
                state.open_reader(MOCK_TOTAL_PAGES);
                request_current_page(state, &mut actions);
                true
            } else {
                false
            }
        }

        Event::OpenProfile => {
            if state.identity.is_some() {
                state.view = View::Profile;
                true
            } else {
                false
            }
        }

        Event::Back => handle_back(state),

        Event::ClearSelection => {
            if state.identity.is_some() {
                state.clear_selection();
                state.view = View::Library;
                true
            } else {
                false
            }
        }

        Event::NextPage => handle_page_turn(state, &mut actions, PageTurn::Forward),
        Event::PrevPage => handle_page_turn(state, &mut actions, PageTurn::Backward),

        Event::ReadAgain => match state.reader.as_mut() {
            Some(reader) if reader.is_finished() => {
                reader.read_again();
                state.sync_chat_context();
                request_current_page(state, &mut actions);
                true
            }
            _ => false,
        },

        Event::ZoomIn => zoom(state, ReaderState::zoom_in),
        Event::ZoomOut => zoom(state, ReaderState::zoom_out),
        Event::ZoomReset => zoom(state, ReaderState::zoom_reset),

        Event::CycleCategory => match state.screen() {
            Screen::Library => {
                state.library.cycle_category();
                true
            }
            Screen::TeacherDashboard if state.teacher.adding => {
                state.teacher.draft.cycle_category();
                true
            }
            _ => false,
        },

        Event::ToggleAddBook => {
            if state.screen() == Screen::TeacherDashboard {
                state.teacher.adding = !state.teacher.adding;
                if !state.teacher.adding {
                    state.teacher.draft = Default::default();
                    state.input_mode = InputMode::Normal;
                }
                true
            } else {
                false
            }
        }

        Event::Logout => {
            if state.identity.is_some() {
                state.sign_out();
                true
            } else {
                false
            }
        }

        Event::Quit => {
            actions.push(Action::Quit);
            false
        }

        Event::Backend(response) => handle_backend_response(state, response.clone(), &mut actions),
    };

    Ok((should_render, actions))
}

fn zoom(state: &mut AppState, f: impl FnOnce(&mut ReaderState)) -> bool {
    match state.reader.as_mut() {
        Some(reader) if state.view == View::Reader => {
            f(reader);
            true
        }
        _ => false,
    }
}

#[derive(Clone, Copy)]
enum PageTurn {
    Forward,
    Backward,
}

/// Turns a reader page, fetching the new content and reporting completion
/// the first time the last page is reached.
fn handle_page_turn(state: &mut AppState, actions: &mut Vec<Action>, turn: PageTurn) -> bool {
    let Some(reader) = state.reader.as_mut() else {
        return false;
    };
    if state.view != View::Reader {
        return false;
    }

    let moved = match turn {
        PageTurn::Forward => reader.next_page(),
        PageTurn::Backward => reader.prev_page(),
    };
    if !moved {
        return false;
    }

    if reader.is_finished() && !reader.completion_reported {
        reader.completion_reported = true;
        if let Some(selection) = state.selection.as_ref() {
            actions.push(Action::Backend(BackendRequest::new(
                RequestOp::MarkCompleted {
                    book_id: selection.id.clone(),
                },
            )));
        }
    }

    state.sync_chat_context();
    request_current_page(state, actions);
    true
}

/// Posts a fetch for the reader's current page.
fn request_current_page(state: &mut AppState, actions: &mut Vec<Action>) {
    let (Some(reader), Some(selection)) = (state.reader.as_mut(), state.selection.as_ref()) else {
        return;
    };
    reader.loading = true;
    actions.push(Action::Backend(BackendRequest::new(RequestOp::FetchPage {
        book_id: selection.id.clone(),
        page: reader.current_page(),
    })));
}

/// The confirm action, dispatched on the active screen.
fn handle_activate(state: &mut AppState, actions: &mut Vec<Action>) -> bool {
    match state.screen() {
        Screen::Login => {
            if state.auth_busy {
                return false;
            }
            if !state.login_form.validate() {
                return true;
            }
            state.auth_busy = true;
            state.login_form.banner = None;
            actions.push(Action::Backend(BackendRequest::new(RequestOp::Login {
                email: state.login_form.email.trim().to_string(),
                password: state.login_form.password.clone(),
                role: state.login_form.role,
            })));
            true
        }
        Screen::Register => {
            if state.auth_busy {
                return false;
            }
            if !state.register_form.validate() {
                return true;
            }
            state.auth_busy = true;
            state.register_form.banner = None;
            actions.push(Action::Backend(BackendRequest::new(RequestOp::Register {
                email: state.register_form.email.trim().to_string(),
                password: state.register_form.password.clone(),
                name: state.register_form.name.trim().to_string(),
                role: state.register_form.role,
            })));
            true
        }
        Screen::Library => match state.library.selected() {
            Some(book) => {
                let book = book.to_ref();
                state.select_book(book);
                state.input_mode = InputMode::Normal;
                true
            }
            None => false,
        },
        Screen::Chat | Screen::Reader => {
            let Some(text) = state.chat.send() else {
                return true;
            };
            let context = state.chat.context();
            actions.push(Action::Backend(BackendRequest::new(
                RequestOp::AssistantReply {
                    book: context.book.clone(),
                    page: context
                        .page
                        .as_ref()
                        .map(|p| (p.number, p.title.clone())),
                    text,
                },
            )));
            true
        }
        Screen::TeacherDashboard => {
            if !state.teacher.adding {
                return false;
            }
            if !state.teacher.draft.validate() {
                return true;
            }
            actions.push(Action::Backend(BackendRequest::new(RequestOp::CreateBook {
                draft: state.teacher.draft.to_draft(),
            })));
            true
        }
        Screen::Dashboard | Screen::Profile(_) => false,
    }
}

/// Routes a typed character to whichever text input the screen owns.
fn handle_char(state: &mut AppState, c: char) -> bool {
    if state.input_mode != InputMode::Editing {
        return false;
    }
    match state.screen() {
        Screen::Login => {
            state.login_form.focused_buffer().push(c);
            true
        }
        Screen::Register => {
            state.register_form.focused_buffer().push(c);
            true
        }
        Screen::Library => {
            state.library.query.push(c);
            state.library.query_changed();
            true
        }
        Screen::Chat | Screen::Reader => {
            state.chat.input.push(c);
            true
        }
        Screen::TeacherDashboard if state.teacher.adding => {
            match state.teacher.draft.focused_buffer() {
                Some(buffer) => {
                    buffer.push(c);
                    true
                }
                None => false,
            }
        }
        _ => false,
    }
}

fn handle_backspace(state: &mut AppState) -> bool {
    if state.input_mode != InputMode::Editing {
        return false;
    }
    match state.screen() {
        Screen::Login => state.login_form.focused_buffer().pop().is_some(),
        Screen::Register => state.register_form.focused_buffer().pop().is_some(),
        Screen::Library => {
            let changed = state.library.query.pop().is_some();
            if changed {
                state.library.query_changed();
            }
            changed
        }
        Screen::Chat | Screen::Reader => state.chat.input.pop().is_some(),
        Screen::TeacherDashboard if state.teacher.adding => state
            .teacher
            .draft
            .focused_buffer()
            .and_then(String::pop)
            .is_some(),
        _ => false,
    }
}

fn handle_next_field(state: &mut AppState) -> bool {
    match state.screen() {
        Screen::Login => {
            state.login_form.focus = state.login_form.focus.next();
            true
        }
        Screen::Register => {
            state.register_form.focus = state.register_form.focus.next();
            true
        }
        Screen::TeacherDashboard if state.teacher.adding => {
            state.teacher.draft.focus = state.teacher.draft.focus.next();
            true
        }
        _ => false,
    }
}

fn handle_toggle_role(state: &mut AppState) -> bool {
    match state.screen() {
        Screen::Login => {
            state.login_form.role = state.login_form.role.other();
            true
        }
        Screen::Register => {
            state.register_form.role = state.register_form.role.other();
            true
        }
        _ => false,
    }
}

/// Navigation to a view tag, lazily loading that view's data on first entry.
fn handle_goto(state: &mut AppState, view: View, actions: &mut Vec<Action>) -> bool {
    if state.identity.is_none() {
        return false;
    }
    state.view = view;
    state.input_mode = InputMode::Normal;

    if view == View::Library && state.library.books().is_empty() && !state.library.loading {
        request_library(state, actions);
    }
    if view.is_teacher_tag() && !state.teacher.loaded {
        request_managed_books(state, actions);
    }
    true
}

fn handle_back(state: &mut AppState) -> bool {
    match state.screen() {
        Screen::Reader => {
            // Closing the reader returns to the assistant with the book
            // still selected; the page context is dropped.
            state.reader = None;
            state.view = View::Chat;
            state.sync_chat_context();
            true
        }
        Screen::Profile(target) => {
            state.view = target;
            true
        }
        Screen::Chat => {
            state.view = View::Library;
            true
        }
        _ => false,
    }
}

fn request_library(state: &mut AppState, actions: &mut Vec<Action>) {
    state.library.loading = true;
    actions.push(Action::Backend(BackendRequest::new(RequestOp::ListBooks {
        category: None,
    })));
}

fn request_managed_books(state: &mut AppState, actions: &mut Vec<Action>) {
    state.teacher.loading = true;
    state.teacher.loaded = true;
    actions.push(Action::Backend(BackendRequest::new(
        RequestOp::ListManagedBooks,
    )));
}

/// Applies a worker response to the state.
fn handle_backend_response(
    state: &mut AppState,
    response: BackendResponse,
    actions: &mut Vec<Action>,
) -> bool {
    match response {
        BackendResponse::LoggedIn { identity } | BackendResponse::Registered { identity } => {
            let role = identity.role;
            state.sign_in(identity);
            // Prefetch the data behind the landing view.
            match role {
                crate::domain::Role::Student => request_library(state, actions),
                crate::domain::Role::Teacher => request_managed_books(state, actions),
            }
            true
        }
        BackendResponse::Books { books } => {
            state.library.set_books(books);
            true
        }
        BackendResponse::Page {
            book_id,
            page,
            content,
        } => {
            let matches_current = state.selection.as_ref().map(|s| s.id.as_str())
                == Some(book_id.as_str())
                && state.reader.as_ref().map(ReaderState::current_page) == Some(page);
            if let Some(reader) = state.reader.as_mut() {
                reader.loading = false;
                if matches_current {
                    reader.page = Some(content);
                } else {
                    tracing::debug!(book_id = %book_id, page = page, "dropping stale page response");
                }
            }
            if matches_current {
                state.sync_chat_context();
            }
            true
        }
        BackendResponse::AssistantReply { text } => {
            state.chat.receive_reply(text);
            true
        }
        BackendResponse::Completed { book_id } => {
            tracing::debug!(book_id = %book_id, "reading progress saved");
            state.status = Some("Reading progress saved".to_string());
            true
        }
        BackendResponse::ManagedBooks { books } => {
            state.teacher.books = books;
            state.teacher.loading = false;
            true
        }
        BackendResponse::BookCreated { book } => {
            state.status = Some(format!("\"{}\" added as a draft", book.title));
            state.teacher.books.push(book);
            state.teacher.adding = false;
            state.teacher.draft = Default::default();
            state.input_mode = InputMode::Normal;
            true
        }
        BackendResponse::Failed { kind, message } => {
            match kind {
                FailureKind::Auth => {
                    state.auth_busy = false;
                    state.login_form.banner = Some(message);
                }
                FailureKind::Registration => {
                    state.auth_busy = false;
                    state.register_form.banner = Some(message);
                }
                FailureKind::Catalog => {
                    state.library.loading = false;
                    state.teacher.loading = false;
                    if let Some(reader) = state.reader.as_mut() {
                        reader.loading = false;
                    }
                    state.status = Some(message);
                }
                FailureKind::Assistant => {
                    state.chat.is_typing = false;
                    state.status = Some(message);
                }
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Role, Sender};
    use crate::services::mock::mock_catalog;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    fn dispatch(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn identity(role: Role) -> Identity {
        Identity {
            id: "1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            role,
        }
    }

    fn signed_in_student(state: &mut AppState) {
        let actions = dispatch(
            state,
            Event::Backend(BackendResponse::LoggedIn {
                identity: identity(Role::Student),
            }),
        );
        // Landing prefetch for the library.
        assert!(matches!(
            actions.as_slice(),
            [Action::Backend(BackendRequest {
                op: RequestOp::ListBooks { category: None },
                ..
            })]
        ));
        dispatch(
            state,
            Event::Backend(BackendResponse::Books {
                books: mock_catalog(),
            }),
        );
    }

    fn backend_op(actions: &[Action]) -> &RequestOp {
        match actions {
            [Action::Backend(request)] => &request.op,
            other => panic!("expected one backend action, got {other:?}"),
        }
    }

    #[test]
    fn invalid_login_emits_no_request() {
        let mut state = state();
        let actions = dispatch(&mut state, Event::Activate);
        assert!(actions.is_empty());
        assert!(!state.login_form.errors.is_empty());
        assert!(!state.auth_busy);
    }

    #[test]
    fn valid_login_posts_request_and_blocks_resubmit() {
        let mut state = state();
        state.login_form.email = "somying@school.ac.th".to_string();
        state.login_form.password = "secret1".to_string();
        let actions = dispatch(&mut state, Event::Activate);
        assert!(matches!(backend_op(&actions), RequestOp::Login { .. }));
        assert!(state.auth_busy);

        // Second submit while in flight is swallowed.
        let actions = dispatch(&mut state, Event::Activate);
        assert!(actions.is_empty());
    }

    #[test]
    fn login_response_lands_on_role_view() {
        let mut state = state();
        signed_in_student(&mut state);
        assert_eq!(state.view, View::Chat);
        assert!(!state.auth_busy);

        let mut state = AppState::new(Theme::default());
        let actions = dispatch(
            &mut state,
            Event::Backend(BackendResponse::LoggedIn {
                identity: identity(Role::Teacher),
            }),
        );
        assert_eq!(state.view, View::TeacherDashboard);
        assert!(matches!(backend_op(&actions), RequestOp::ListManagedBooks));
    }

    #[test]
    fn auth_failure_sets_banner_and_unblocks() {
        let mut state = state();
        state.auth_busy = true;
        dispatch(
            &mut state,
            Event::Backend(BackendResponse::Failed {
                kind: FailureKind::Auth,
                message: "invalid credentials".to_string(),
            }),
        );
        assert!(!state.auth_busy);
        assert_eq!(state.login_form.banner.as_deref(), Some("invalid credentials"));
    }

    #[test]
    fn unknown_book_selection_is_silent() {
        let mut state = state();
        signed_in_student(&mut state);
        let actions = dispatch(&mut state, Event::SelectBook("999".to_string()));
        assert!(actions.is_empty());
        assert!(state.selection.is_none());
        assert_eq!(state.view, View::Chat);
    }

    #[test]
    fn known_book_selection_moves_to_chat() {
        let mut state = state();
        signed_in_student(&mut state);
        state.view = View::Library;
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        assert_eq!(state.selection.as_ref().unwrap().id, "2");
        assert_eq!(state.view, View::Chat);
    }

    #[test]
    fn reader_opens_at_page_one_and_fetches() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        let actions = dispatch(&mut state, Event::OpenReader);
        let reader = state.reader.as_ref().unwrap();
        assert_eq!(reader.current_page(), 1);
        assert_eq!(reader.total_pages(), MOCK_TOTAL_PAGES);
        assert!(matches!(
            backend_op(&actions),
            RequestOp::FetchPage { page: 1, .. }
        ));
    }

    #[test]
    fn finishing_a_book_reports_completion_once() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::OpenReader);

        // Walk to the second-to-last page.
        for _ in 1..(MOCK_TOTAL_PAGES - 1) {
            let actions = dispatch(&mut state, Event::NextPage);
            assert!(!actions
                .iter()
                .any(|a| matches!(a, Action::Backend(r) if matches!(r.op, RequestOp::MarkCompleted { .. }))));
        }

        // The final turn reports completion alongside the page fetch.
        let actions = dispatch(&mut state, Event::NextPage);
        assert!(state.reader.as_ref().unwrap().is_finished());
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::Backend(r) if matches!(r.op, RequestOp::MarkCompleted { .. }))));

        // Clamped at the end; no further requests.
        let actions = dispatch(&mut state, Event::NextPage);
        assert!(actions.is_empty());

        // Stepping back and forward again does not re-report.
        dispatch(&mut state, Event::PrevPage);
        let actions = dispatch(&mut state, Event::NextPage);
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::Backend(r) if matches!(r.op, RequestOp::MarkCompleted { .. }))));
    }

    #[test]
    fn read_again_restarts_and_rearms_completion() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::OpenReader);
        for _ in 1..MOCK_TOTAL_PAGES {
            dispatch(&mut state, Event::NextPage);
        }
        assert!(state.reader.as_ref().unwrap().is_finished());

        dispatch(&mut state, Event::ReadAgain);
        let reader = state.reader.as_ref().unwrap();
        assert_eq!(reader.current_page(), 1);
        assert!(!reader.completion_reported);
    }

    #[test]
    fn zoom_only_applies_in_reader_view() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::OpenReader);
        dispatch(&mut state, Event::ZoomIn);
        assert_eq!(state.reader.as_ref().unwrap().zoom(), 125);
        dispatch(&mut state, Event::ZoomReset);
        assert_eq!(state.reader.as_ref().unwrap().zoom(), 100);
    }

    #[test]
    fn blank_chat_send_emits_nothing() {
        let mut state = state();
        signed_in_student(&mut state);
        state.chat.input = "   ".to_string();
        let actions = dispatch(&mut state, Event::Activate);
        assert!(actions.is_empty());
        assert!(!state.chat.is_typing);
    }

    #[test]
    fn chat_send_round_trip() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        state.chat.input = "what is this book about?".to_string();
        let actions = dispatch(&mut state, Event::Activate);
        match backend_op(&actions) {
            RequestOp::AssistantReply { book, page, .. } => {
                assert_eq!(book.as_ref().unwrap().id, "2");
                assert!(page.is_none());
            }
            other => panic!("unexpected op: {other:?}"),
        }
        assert!(state.chat.is_typing);

        dispatch(
            &mut state,
            Event::Backend(BackendResponse::AssistantReply {
                text: "here is an answer".to_string(),
            }),
        );
        assert!(!state.chat.is_typing);
        let last = state.chat.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "here is an answer");
    }

    #[test]
    fn back_from_reader_returns_to_chat_keeping_selection() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::OpenReader);
        dispatch(&mut state, Event::Back);
        assert_eq!(state.view, View::Chat);
        assert!(state.reader.is_none());
        assert!(state.selection.is_some());
    }

    #[test]
    fn logout_returns_to_login_and_clears_session() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::Logout);
        assert!(state.identity.is_none());
        assert!(state.selection.is_none());
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn stale_page_response_is_dropped() {
        let mut state = state();
        signed_in_student(&mut state);
        dispatch(&mut state, Event::SelectBook("2".to_string()));
        dispatch(&mut state, Event::OpenReader);
        dispatch(&mut state, Event::NextPage);

        // Response for page 1 arrives after we already moved to page 2.
        dispatch(
            &mut state,
            Event::Backend(BackendResponse::Page {
                book_id: "2".to_string(),
                page: 1,
                content: crate::domain::Page {
                    title: "old".to_string(),
                    body: "old".to_string(),
                },
            }),
        );
        assert!(state.reader.as_ref().unwrap().page.is_none());

        dispatch(
            &mut state,
            Event::Backend(BackendResponse::Page {
                book_id: "2".to_string(),
                page: 2,
                content: crate::domain::Page {
                    title: "current".to_string(),
                    body: "current".to_string(),
                },
            }),
        );
        assert_eq!(
            state.reader.as_ref().unwrap().page.as_ref().unwrap().title,
            "current"
        );
    }

    #[test]
    fn create_book_flow_appends_draft() {
        let mut state = state();
        dispatch(
            &mut state,
            Event::Backend(BackendResponse::LoggedIn {
                identity: identity(Role::Teacher),
            }),
        );
        dispatch(
            &mut state,
            Event::Backend(BackendResponse::ManagedBooks { books: Vec::new() }),
        );
        dispatch(&mut state, Event::ToggleAddBook);
        assert!(state.teacher.adding);

        // Incomplete draft is rejected locally.
        let actions = dispatch(&mut state, Event::Activate);
        assert!(actions.is_empty());
        assert!(!state.teacher.draft.errors.is_empty());

        state.teacher.draft.title = "New Book".to_string();
        state.teacher.draft.author = "Someone".to_string();
        dispatch(&mut state, Event::CycleCategory);
        let actions = dispatch(&mut state, Event::Activate);
        assert!(matches!(backend_op(&actions), RequestOp::CreateBook { .. }));

        dispatch(
            &mut state,
            Event::Backend(BackendResponse::BookCreated {
                book: crate::domain::TeacherBook {
                    id: "99".to_string(),
                    title: "New Book".to_string(),
                    author: "Someone".to_string(),
                    category: crate::domain::Category::Science,
                    students_count: 0,
                    chats_count: 0,
                    rating: 0.0,
                    status: crate::domain::BookStatus::Draft,
                },
            }),
        );
        assert!(!state.teacher.adding);
        assert_eq!(state.teacher.books.len(), 1);
        assert_eq!(state.teacher.stats().total_books, 1);
    }

    #[test]
    fn editing_mode_gates_text_input() {
        let mut state = state();
        signed_in_student(&mut state);
        state.view = View::Library;

        // Normal mode: characters are commands, not text.
        dispatch(&mut state, Event::Char('x'));
        assert!(state.library.query.is_empty());

        dispatch(&mut state, Event::StartEditing);
        dispatch(&mut state, Event::Char('s'));
        dispatch(&mut state, Event::Char('c'));
        assert_eq!(state.library.query, "sc");
        dispatch(&mut state, Event::Backspace);
        assert_eq!(state.library.query, "s");
    }

    #[test]
    fn quit_emits_quit_action() {
        let mut state = state();
        let actions = dispatch(&mut state, Event::Quit);
        assert_eq!(actions, vec![Action::Quit]);
    }
}

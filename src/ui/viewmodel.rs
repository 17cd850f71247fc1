//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are created via [`compute_viewmodel`] once per frame and
//! consumed by the renderer; they contain no business logic, only
//! display-ready data (labels, pre-formatted lines, highlight indices).

use crate::app::forms::{DraftField, LoginField, RegisterField};
use crate::app::router::{nav_items, Screen};
use crate::app::state::{AppState, TeacherStats};
use crate::app::view::InputMode;
use crate::domain::Sender;

/// Complete per-frame view model.
#[derive(Debug, Clone)]
pub struct FrameViewModel {
    pub header: HeaderInfo,
    /// Navigation bar entries; empty while signed out.
    pub nav: Vec<NavItem>,
    pub footer: FooterInfo,
    /// Transient status line message, shown above the footer.
    pub status: Option<String>,
    pub screen: ScreenViewModel,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Signed-in user line, e.g. "Somying (Student)".
    pub user_line: Option<String>,
}

/// One navigation bar entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: String,
    pub is_active: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit | tab: next field").
    pub keybindings: String,
}

/// One rendered form field.
#[derive(Debug, Clone)]
pub struct FieldViewModel {
    pub label: String,
    /// Value to display; password fields are already masked here.
    pub value: String,
    pub is_focused: bool,
    pub error: Option<String>,
}

/// Which auth form is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

/// View model for the login and register screens.
#[derive(Debug, Clone)]
pub struct AuthViewModel {
    pub kind: AuthKind,
    pub fields: Vec<FieldViewModel>,
    /// Selected role label for the role toggle row.
    pub role_label: String,
    /// Form-level failure banner.
    pub banner: Option<String>,
    /// A request is in flight; the submit hint shows a spinner note.
    pub busy: bool,
}

/// One library row.
#[derive(Debug, Clone)]
pub struct BookItemViewModel {
    pub title: String,
    pub author: String,
    /// Pre-formatted metadata, e.g. "Science | 4.8 | 1205 students".
    pub meta: String,
    pub description: String,
    pub is_selected: bool,
    /// Title character indices matched by the fuzzy query.
    pub highlight: Vec<usize>,
}

/// View model for the library screen.
#[derive(Debug, Clone)]
pub struct LibraryViewModel {
    pub query: String,
    /// Active filter label, e.g. "All" or "Science".
    pub category_label: String,
    pub items: Vec<BookItemViewModel>,
    pub loading: bool,
}

/// One chat transcript line group.
#[derive(Debug, Clone)]
pub struct MessageViewModel {
    pub sender_label: String,
    pub time_label: String,
    pub text: String,
    pub is_user: bool,
}

/// View model for the assistant chat screen.
#[derive(Debug, Clone)]
pub struct ChatViewModel {
    /// Context line under the header, e.g. the selected book title.
    pub context_line: Option<String>,
    pub messages: Vec<MessageViewModel>,
    pub is_typing: bool,
    pub input: String,
    pub quick_actions: Vec<String>,
}

/// View model for the reader screen.
#[derive(Debug, Clone)]
pub struct ReaderViewModel {
    pub book_title: String,
    pub page_title: String,
    pub body: String,
    /// Pre-formatted indicator, e.g. "Page 3 / 45".
    pub page_indicator: String,
    /// Zoom label, e.g. "100%".
    pub zoom_label: String,
    pub finished: bool,
    pub loading: bool,
}

/// One managed book row on the teacher dashboard.
#[derive(Debug, Clone)]
pub struct TeacherBookViewModel {
    pub title: String,
    pub author: String,
    /// Pre-formatted counters, e.g. "892 students | 2156 chats | 4.6".
    pub meta: String,
    pub status_label: String,
    pub is_draft: bool,
}

/// View model for the teacher management container.
#[derive(Debug, Clone)]
pub struct TeacherViewModel {
    pub stats: TeacherStats,
    pub books: Vec<TeacherBookViewModel>,
    pub loading: bool,
    /// The add-book form, present while it is open.
    pub draft: Option<Vec<FieldViewModel>>,
}

/// View model for the profile screen.
#[derive(Debug, Clone)]
pub struct ProfileViewModel {
    pub name: String,
    pub email: String,
    pub role_label: String,
}

/// Screen-specific portion of the frame.
#[derive(Debug, Clone)]
pub enum ScreenViewModel {
    Auth(AuthViewModel),
    Dashboard { welcome: String },
    Library(LibraryViewModel),
    Chat(ChatViewModel),
    Reader(ReaderViewModel),
    Teacher(TeacherViewModel),
    Profile(ProfileViewModel),
}

/// Transforms the application state into a renderable frame.
///
/// `cols` bounds pre-wrapped text widths; row-level windowing is left to the
/// renderer, which knows how much vertical space each section gets.
#[must_use]
pub fn compute_viewmodel(state: &AppState, cols: usize) -> FrameViewModel {
    let screen = state.screen();

    let header = HeaderInfo {
        title: "LearnBooks".to_string(),
        user_line: state
            .identity
            .as_ref()
            .map(|id| format!("{} ({})", id.name, id.role.label())),
    };

    let nav = match state.identity.as_ref() {
        Some(identity) => nav_items(identity.role)
            .iter()
            .map(|(view, label)| NavItem {
                label: (*label).to_string(),
                is_active: *view == state.view,
            })
            .collect(),
        None => Vec::new(),
    };

    let footer = FooterInfo {
        keybindings: keybindings_for(screen, state.input_mode),
    };

    let screen_vm = match screen {
        Screen::Login => ScreenViewModel::Auth(login_viewmodel(state)),
        Screen::Register => ScreenViewModel::Auth(register_viewmodel(state)),
        Screen::Dashboard => ScreenViewModel::Dashboard {
            welcome: state
                .identity
                .as_ref()
                .map_or_else(String::new, |id| format!("Welcome back, {}!", id.name)),
        },
        Screen::Library => ScreenViewModel::Library(library_viewmodel(state)),
        Screen::Chat => ScreenViewModel::Chat(chat_viewmodel(state)),
        Screen::Reader => ScreenViewModel::Reader(reader_viewmodel(state, cols)),
        Screen::TeacherDashboard => ScreenViewModel::Teacher(teacher_viewmodel(state)),
        Screen::Profile(_) => {
            let identity = state.identity.as_ref();
            ScreenViewModel::Profile(ProfileViewModel {
                name: identity.map_or_else(String::new, |id| id.name.clone()),
                email: identity.map_or_else(String::new, |id| id.email.clone()),
                role_label: identity.map_or("", |id| id.role.label()).to_string(),
            })
        }
    };

    FrameViewModel {
        header,
        nav,
        footer,
        status: state.status.clone(),
        screen: screen_vm,
    }
}

fn keybindings_for(screen: Screen, mode: InputMode) -> String {
    if mode == InputMode::Editing {
        return "enter: confirm | esc: stop editing | tab: next field".to_string();
    }
    match screen {
        Screen::Login => "i: edit | tab: field | t: role | r: register | enter: sign in | q: quit"
            .to_string(),
        Screen::Register => {
            "i: edit | tab: field | t: role | l: log in | enter: create account | q: quit"
                .to_string()
        }
        Screen::Library => {
            "j/k: move | enter: open | /: search | c: category | 1-3: nav | p: profile | q: quit"
                .to_string()
        }
        Screen::Chat => {
            "i: type | enter: send | b: library | r: read | 1-3: nav | o: logout | q: quit"
                .to_string()
        }
        Screen::Reader => {
            "h/l: page | +/-/0: zoom | i: ask | enter: send | a: read again | esc: back | q: quit"
                .to_string()
        }
        Screen::TeacherDashboard => {
            "n: new book | i: edit | c: category | 1-3: nav | p: profile | o: logout | q: quit"
                .to_string()
        }
        Screen::Dashboard | Screen::Profile(_) => {
            "1-3: nav | esc: back | o: logout | q: quit".to_string()
        }
    }
}

fn login_viewmodel(state: &AppState) -> AuthViewModel {
    let form = &state.login_form;
    AuthViewModel {
        kind: AuthKind::Login,
        fields: vec![
            FieldViewModel {
                label: "Email".to_string(),
                value: form.email.clone(),
                is_focused: form.focus == LoginField::Email,
                error: form.error_for(LoginField::Email).map(str::to_string),
            },
            FieldViewModel {
                label: "Password".to_string(),
                value: "*".repeat(form.password.chars().count()),
                is_focused: form.focus == LoginField::Password,
                error: form.error_for(LoginField::Password).map(str::to_string),
            },
        ],
        role_label: form.role.label().to_string(),
        banner: form.banner.clone(),
        busy: state.auth_busy,
    }
}

fn register_viewmodel(state: &AppState) -> AuthViewModel {
    let form = &state.register_form;
    AuthViewModel {
        kind: AuthKind::Register,
        fields: vec![
            FieldViewModel {
                label: "Name".to_string(),
                value: form.name.clone(),
                is_focused: form.focus == RegisterField::Name,
                error: form.error_for(RegisterField::Name).map(str::to_string),
            },
            FieldViewModel {
                label: "Email".to_string(),
                value: form.email.clone(),
                is_focused: form.focus == RegisterField::Email,
                error: form.error_for(RegisterField::Email).map(str::to_string),
            },
            FieldViewModel {
                label: "Password".to_string(),
                value: "*".repeat(form.password.chars().count()),
                is_focused: form.focus == RegisterField::Password,
                error: form.error_for(RegisterField::Password).map(str::to_string),
            },
            FieldViewModel {
                label: "Confirm password".to_string(),
                value: "*".repeat(form.confirm_password.chars().count()),
                is_focused: form.focus == RegisterField::ConfirmPassword,
                error: form
                    .error_for(RegisterField::ConfirmPassword)
                    .map(str::to_string),
            },
        ],
        role_label: form.role.label().to_string(),
        banner: form.banner.clone(),
        busy: state.auth_busy,
    }
}

fn library_viewmodel(state: &AppState) -> LibraryViewModel {
    let items = state
        .library
        .filtered()
        .iter()
        .enumerate()
        .map(|(i, filtered)| {
            let b = &filtered.book;
            BookItemViewModel {
                title: b.title.clone(),
                author: b.author.clone(),
                meta: format!(
                    "{} | {:.1} | {} students",
                    b.category.label(),
                    b.rating,
                    b.students_count
                ),
                description: b.description.clone(),
                is_selected: i == state.library.selected_index(),
                highlight: filtered.highlight.clone(),
            }
        })
        .collect();

    LibraryViewModel {
        query: state.library.query.clone(),
        category_label: state
            .library
            .category()
            .map_or("All", |c| c.label())
            .to_string(),
        items,
        loading: state.library.loading,
    }
}

fn chat_viewmodel(state: &AppState) -> ChatViewModel {
    let context = state.chat.context();
    let context_line = match (&context.book, &context.page) {
        (Some(book), Some(page)) => Some(format!("{} - page {}", book.title, page.number)),
        (Some(book), None) => Some(format!("{} by {}", book.title, book.author)),
        (None, _) => None,
    };

    let messages = state
        .chat
        .messages()
        .iter()
        .map(|m| MessageViewModel {
            sender_label: match m.sender {
                Sender::Bot => "Assistant".to_string(),
                Sender::User => state
                    .identity
                    .as_ref()
                    .map_or_else(|| "You".to_string(), |id| id.name.clone()),
            },
            time_label: m.time_label(),
            text: m.text.clone(),
            is_user: m.sender == Sender::User,
        })
        .collect();

    ChatViewModel {
        context_line,
        messages,
        is_typing: state.chat.is_typing,
        input: state.chat.input.clone(),
        quick_actions: context
            .quick_actions()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

fn reader_viewmodel(state: &AppState, cols: usize) -> ReaderViewModel {
    let reader = state.reader.as_ref();
    let (page_title, body) = reader
        .and_then(|r| r.page.as_ref())
        .map_or((String::new(), String::new()), |p| {
            (p.title.clone(), p.body.clone())
        });
    // Zoom narrows the text column; zooming out can never exceed the
    // printable width or the renderer would truncate every line.
    let zoom = reader.map_or(100, |r| u32::from(r.zoom()));
    let printable = cols.saturating_sub(6).max(20);
    let text_width = (printable as u32 * 100 / zoom.max(1)) as usize;
    let body = crate::ui::helpers::wrap_text(&body, text_width.clamp(20, printable));

    ReaderViewModel {
        book_title: state
            .selection
            .as_ref()
            .map_or_else(String::new, |s| s.title.clone()),
        page_title,
        body,
        page_indicator: reader.map_or_else(String::new, |r| {
            format!("Page {} / {}", r.current_page(), r.total_pages())
        }),
        zoom_label: format!("{zoom}%"),
        finished: reader.is_some_and(|r| r.is_finished()),
        loading: reader.is_some_and(|r| r.loading),
    }
}

fn teacher_viewmodel(state: &AppState) -> TeacherViewModel {
    let books = state
        .teacher
        .books
        .iter()
        .map(|b| TeacherBookViewModel {
            title: b.title.clone(),
            author: b.author.clone(),
            meta: format!(
                "{} students | {} chats | {:.1}",
                b.students_count, b.chats_count, b.rating
            ),
            status_label: b.status.label().to_string(),
            is_draft: b.status == crate::domain::BookStatus::Draft,
        })
        .collect();

    let draft = state.teacher.adding.then(|| {
        let form = &state.teacher.draft;
        vec![
            FieldViewModel {
                label: "Title".to_string(),
                value: form.title.clone(),
                is_focused: form.focus == DraftField::Title,
                error: form.error_for(DraftField::Title).map(str::to_string),
            },
            FieldViewModel {
                label: "Author".to_string(),
                value: form.author.clone(),
                is_focused: form.focus == DraftField::Author,
                error: form.error_for(DraftField::Author).map(str::to_string),
            },
            FieldViewModel {
                label: "Category".to_string(),
                value: form.category.map_or("-", |c| c.label()).to_string(),
                is_focused: form.focus == DraftField::Category,
                error: form.error_for(DraftField::Category).map(str::to_string),
            },
            FieldViewModel {
                label: "Description".to_string(),
                value: form.description.clone(),
                is_focused: form.focus == DraftField::Description,
                error: None,
            },
        ]
    });

    TeacherViewModel {
        stats: state.teacher.stats(),
        books,
        loading: state.teacher.loading,
        draft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Event;
    use crate::domain::{Identity, Role};
    use crate::services::mock::mock_catalog;
    use crate::ui::theme::Theme;
    use crate::worker::BackendResponse;

    fn signed_in_student() -> AppState {
        let mut state = AppState::new(Theme::default());
        crate::app::handle_event(
            &mut state,
            &Event::Backend(BackendResponse::LoggedIn {
                identity: Identity {
                    id: "1".to_string(),
                    email: "somying@school.ac.th".to_string(),
                    name: "Somying".to_string(),
                    role: Role::Student,
                },
            }),
        )
        .unwrap();
        crate::app::handle_event(
            &mut state,
            &Event::Backend(BackendResponse::Books {
                books: mock_catalog(),
            }),
        )
        .unwrap();
        state
    }

    #[test]
    fn signed_out_frame_has_no_nav() {
        let state = AppState::new(Theme::default());
        let vm = compute_viewmodel(&state, 80);
        assert!(vm.nav.is_empty());
        assert!(matches!(vm.screen, ScreenViewModel::Auth(_)));
        assert!(vm.header.user_line.is_none());
    }

    #[test]
    fn password_fields_are_masked() {
        let mut state = AppState::new(Theme::default());
        state.login_form.password = "secret1".to_string();
        let vm = compute_viewmodel(&state, 80);
        let ScreenViewModel::Auth(auth) = vm.screen else {
            panic!("expected auth screen");
        };
        assert_eq!(auth.fields[1].value, "*******");
    }

    #[test]
    fn student_frame_shows_nav_and_user() {
        let state = signed_in_student();
        let vm = compute_viewmodel(&state, 80);
        assert_eq!(vm.nav.len(), 3);
        assert_eq!(vm.header.user_line.as_deref(), Some("Somying (Student)"));
        assert!(matches!(vm.screen, ScreenViewModel::Chat(_)));
    }

    #[test]
    fn library_frame_marks_cursor_row() {
        let mut state = signed_in_student();
        state.view = crate::app::View::Library;
        crate::app::handle_event(&mut state, &Event::MoveDown).unwrap();
        let vm = compute_viewmodel(&state, 80);
        let ScreenViewModel::Library(lib) = vm.screen else {
            panic!("expected library screen");
        };
        assert_eq!(lib.items.len(), 4);
        assert!(lib.items[1].is_selected);
        assert!(!lib.items[0].is_selected);
    }

    #[test]
    fn zoomed_out_reader_stays_within_the_printable_width() {
        let mut state = signed_in_student();
        crate::app::handle_event(&mut state, &Event::SelectBook("2".to_string())).unwrap();
        crate::app::handle_event(&mut state, &Event::OpenReader).unwrap();
        crate::app::handle_event(
            &mut state,
            &Event::Backend(BackendResponse::Page {
                book_id: "2".to_string(),
                page: 1,
                content: crate::domain::Page {
                    title: "Long".to_string(),
                    body: "word ".repeat(60).trim_end().to_string(),
                },
            }),
        )
        .unwrap();
        crate::app::handle_event(&mut state, &Event::ZoomOut).unwrap();
        crate::app::handle_event(&mut state, &Event::ZoomOut).unwrap();

        let vm = compute_viewmodel(&state, 80);
        let ScreenViewModel::Reader(reader) = vm.screen else {
            panic!("expected reader screen");
        };
        assert_eq!(reader.zoom_label, "50%");
        assert!(!reader.body.is_empty());
        for line in reader.body.lines() {
            assert!(line.chars().count() <= 74, "line overflows: {line:?}");
        }
    }

    #[test]
    fn reader_frame_reports_finish_state() {
        let mut state = signed_in_student();
        crate::app::handle_event(&mut state, &Event::SelectBook("2".to_string())).unwrap();
        crate::app::handle_event(&mut state, &Event::OpenReader).unwrap();
        let vm = compute_viewmodel(&state, 80);
        let ScreenViewModel::Reader(reader) = vm.screen else {
            panic!("expected reader screen");
        };
        assert_eq!(reader.page_indicator, "Page 1 / 45");
        assert_eq!(reader.zoom_label, "100%");
        assert!(!reader.finished);
        assert_eq!(reader.book_title, "Foundations of Mathematics for Life");
    }
}

//! Terminal entry point for LearnBooks.
//!
//! Owns everything the library core deliberately avoids: terminal setup and
//! teardown, the async event loop, and the binding from raw key presses to
//! semantic [`Event`]s. Bindings depend on the active screen and input mode,
//! mirroring the keybinding help the footer shows:
//!
//! - Editing mode: printable keys type into the focused field, `Esc` leaves
//!   editing, `Tab` moves focus, `Enter` confirms.
//! - Auth screens: `i` edit, `t` role toggle, `r`/`l` switch form, `Enter`
//!   submit.
//! - Library: `j`/`k` move, `Enter` open, `/` search, `c` category filter.
//! - Chat: `i` type, `Enter` send, `b` library, `r` read.
//! - Reader: `h`/`l` turn pages, `+`/`-`/`0` zoom, `i`/`Enter` ask the
//!   assistant, `a` read again, `Esc` back.
//! - Teacher dashboard: `n` add book, `c` cycle the draft category.
//! - Signed in: `1`-`3` jump to the corresponding navigation menu entry.
//! - Everywhere: `q` (outside editing) or `Ctrl+C` quits.

use crossterm::{
    cursor::{Hide, Show},
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures_util::StreamExt;
use learnbooks::app::{handle_event, nav_items, Action, AppState, Event, Screen, View};
use learnbooks::observability::init_tracing;
use learnbooks::services::{MockAssistantService, MockAuthService, MockCatalogService};
use learnbooks::worker::{Backend, BackendRequest, BackendResponse};
use learnbooks::{Config, InputMode, LearnBooksError};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> learnbooks::Result<()> {
    let config = Config::load();
    init_tracing(&config);

    let mut state = learnbooks::initialize(&config);

    let backend = if config.mock_latency {
        Backend::new(
            Arc::new(MockAuthService::new()),
            Arc::new(MockCatalogService::new()),
            Arc::new(MockAssistantService::new()),
        )
    } else {
        Backend::new(
            Arc::new(MockAuthService::instant()),
            Arc::new(MockCatalogService::instant()),
            Arc::new(MockAssistantService::instant()),
        )
    };
    let (request_tx, response_rx) = backend.spawn();

    setup_panic_hook();
    setup_terminal()?;
    let result = run(&mut state, &request_tx, response_rx).await;
    restore_terminal()?;
    result
}

/// The main event loop.
///
/// Waits on the terminal event stream and the worker response channel at the
/// same time, feeds both into [`handle_event`], executes the returned
/// actions, and redraws when the handler says the frame changed.
async fn run(
    state: &mut AppState,
    request_tx: &mpsc::UnboundedSender<BackendRequest>,
    mut response_rx: mpsc::UnboundedReceiver<BackendResponse>,
) -> learnbooks::Result<()> {
    let mut term_events = EventStream::new();
    let (mut cols, mut rows) = crossterm::terminal::size()?;

    draw(state, rows, cols)?;

    loop {
        let event = tokio::select! {
            term = term_events.next() => match term {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    match map_key(state, key) {
                        Some(event) => event,
                        None => continue,
                    }
                }
                Some(Ok(TermEvent::Resize(new_cols, new_rows))) => {
                    cols = new_cols;
                    rows = new_rows;
                    draw(state, rows, cols)?;
                    continue;
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },

            response = response_rx.recv() => match response {
                Some(response) => Event::Backend(response),
                None => {
                    return Err(LearnBooksError::Worker(
                        "backend response channel closed".to_string(),
                    ));
                }
            },
        };

        let (should_render, actions) = handle_event(state, &event)?;

        for action in actions {
            match action {
                Action::Backend(request) => {
                    request_tx
                        .send(request)
                        .map_err(|e| LearnBooksError::Worker(e.to_string()))?;
                }
                Action::Quit => return Ok(()),
            }
        }

        if should_render {
            draw(state, rows, cols)?;
        }
    }
}

/// Translates a key press into a semantic event for the current screen.
///
/// Returns `None` for keys that have no binding in the current context; the
/// loop simply ignores those.
fn map_key(state: &AppState, key: KeyEvent) -> Option<Event> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Event::Quit);
    }

    if state.input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc => Some(Event::StopEditing),
            KeyCode::Tab => Some(Event::NextField),
            KeyCode::Enter => Some(Event::Activate),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Event::Char(c))
            }
            _ => None,
        };
    }

    if key.code == KeyCode::Char('q') {
        return Some(Event::Quit);
    }

    // Digit keys jump straight to a navigation menu entry.
    if let (Some(identity), KeyCode::Char(c @ '1'..='3')) = (state.identity.as_ref(), key.code) {
        let items = nav_items(identity.role);
        let index = c as usize - '1' as usize;
        return Some(Event::GoTo(items[index].0));
    }

    match state.screen() {
        Screen::Login => match key.code {
            KeyCode::Char('i') => Some(Event::StartEditing),
            KeyCode::Tab => Some(Event::NextField),
            KeyCode::Char('t') => Some(Event::ToggleRole),
            KeyCode::Char('r') => Some(Event::ToggleAuthScreen),
            KeyCode::Enter => Some(Event::Activate),
            _ => None,
        },
        Screen::Register => match key.code {
            KeyCode::Char('i') => Some(Event::StartEditing),
            KeyCode::Tab => Some(Event::NextField),
            KeyCode::Char('t') => Some(Event::ToggleRole),
            KeyCode::Char('l') => Some(Event::ToggleAuthScreen),
            KeyCode::Enter => Some(Event::Activate),
            _ => None,
        },
        Screen::Library => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Event::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::MoveUp),
            KeyCode::Enter => Some(Event::Activate),
            KeyCode::Char('/') => Some(Event::StartEditing),
            KeyCode::Char('c') => Some(Event::CycleCategory),
            KeyCode::Char('p') => Some(Event::OpenProfile),
            KeyCode::Char('o') => Some(Event::Logout),
            _ => None,
        },
        Screen::Chat => match key.code {
            KeyCode::Char('i') => Some(Event::StartEditing),
            KeyCode::Enter => Some(Event::Activate),
            KeyCode::Char('b') => Some(Event::GoTo(View::Library)),
            KeyCode::Char('r') => Some(Event::OpenReader),
            KeyCode::Char('p') => Some(Event::OpenProfile),
            KeyCode::Char('o') => Some(Event::Logout),
            KeyCode::Esc => Some(Event::Back),
            _ => None,
        },
        Screen::Reader => match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Event::PrevPage),
            KeyCode::Char('l') | KeyCode::Right => Some(Event::NextPage),
            KeyCode::Char('+' | '=') => Some(Event::ZoomIn),
            KeyCode::Char('-') => Some(Event::ZoomOut),
            KeyCode::Char('0') => Some(Event::ZoomReset),
            KeyCode::Char('i') => Some(Event::StartEditing),
            KeyCode::Enter => Some(Event::Activate),
            KeyCode::Char('a') => Some(Event::ReadAgain),
            KeyCode::Esc => Some(Event::Back),
            _ => None,
        },
        Screen::TeacherDashboard => match key.code {
            KeyCode::Char('n') => Some(Event::ToggleAddBook),
            KeyCode::Char('i') => Some(Event::StartEditing),
            KeyCode::Tab => Some(Event::NextField),
            KeyCode::Char('c') => Some(Event::CycleCategory),
            KeyCode::Enter => Some(Event::Activate),
            KeyCode::Char('p') => Some(Event::OpenProfile),
            KeyCode::Char('o') => Some(Event::Logout),
            KeyCode::Esc if state.teacher.adding => Some(Event::ToggleAddBook),
            _ => None,
        },
        Screen::Dashboard | Screen::Profile(_) => match key.code {
            KeyCode::Esc => Some(Event::Back),
            KeyCode::Char('o') => Some(Event::Logout),
            _ => None,
        },
    }
}

/// Clears the terminal and renders one frame.
fn draw(state: &AppState, rows: u16, cols: u16) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All))?;
    learnbooks::ui::render(state, rows as usize, cols as usize);
    stdout.flush()
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)
}

fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Restores the terminal before the default panic output runs, so a panic
/// message is not lost inside the alternate screen.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnbooks::domain::{Book, Category, Identity, Role};
    use learnbooks::ui::Theme;
    use learnbooks::worker::BackendResponse;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn signed_in(role: Role) -> AppState {
        let mut state = AppState::new(Theme::default());
        handle_event(
            &mut state,
            &Event::Backend(BackendResponse::LoggedIn {
                identity: Identity {
                    id: "1".to_string(),
                    email: "a@b.c".to_string(),
                    name: "A".to_string(),
                    role,
                },
            }),
        )
        .unwrap();
        state
    }

    #[test]
    fn digit_keys_follow_the_nav_menu() {
        let student = signed_in(Role::Student);
        assert_eq!(
            map_key(&student, key(KeyCode::Char('2'))),
            Some(Event::GoTo(View::Library))
        );
        assert_eq!(
            map_key(&student, key(KeyCode::Char('3'))),
            Some(Event::GoTo(View::Dashboard))
        );

        let teacher = signed_in(Role::Teacher);
        assert_eq!(
            map_key(&teacher, key(KeyCode::Char('2'))),
            Some(Event::GoTo(View::TeacherBooks))
        );
        assert_eq!(
            map_key(&teacher, key(KeyCode::Char('3'))),
            Some(Event::GoTo(View::TeacherAnalytics))
        );
    }

    #[test]
    fn digit_keys_are_inert_while_signed_out() {
        let state = AppState::new(Theme::default());
        assert_eq!(map_key(&state, key(KeyCode::Char('1'))), None);
    }

    #[test]
    fn reader_keys_reach_the_chat_composer() {
        let mut state = signed_in(Role::Student);
        handle_event(
            &mut state,
            &Event::Backend(BackendResponse::Books {
                books: vec![Book {
                    id: "1".to_string(),
                    title: "T".to_string(),
                    author: "A".to_string(),
                    description: String::new(),
                    rating: 4.0,
                    students_count: 1,
                    category: Category::Science,
                }],
            }),
        )
        .unwrap();
        handle_event(&mut state, &Event::SelectBook("1".to_string())).unwrap();
        handle_event(&mut state, &Event::OpenReader).unwrap();
        assert_eq!(state.screen(), Screen::Reader);

        assert_eq!(
            map_key(&state, key(KeyCode::Char('i'))),
            Some(Event::StartEditing)
        );
        assert_eq!(map_key(&state, key(KeyCode::Enter)), Some(Event::Activate));
    }
}

//! End-to-end flow tests driving the state machine against the real worker
//! dispatch path with zero-latency service adapters.

use learnbooks::app::{handle_event, Action, AppState, Event, Screen, View};
use learnbooks::services::{
    MockAssistantService, MockAuthService, MockCatalogService, MOCK_TOTAL_PAGES,
};
use learnbooks::ui::Theme;
use learnbooks::worker::{Backend, RequestOp};
use std::collections::VecDeque;
use std::sync::Arc;

fn instant_backend() -> Backend {
    Backend::new(
        Arc::new(MockAuthService::instant()),
        Arc::new(MockCatalogService::instant()),
        Arc::new(MockAssistantService::instant()),
    )
}

/// Feeds one event through the handler and round-trips every emitted backend
/// request, including requests triggered by the responses themselves.
///
/// Returns the operations that were dispatched, in order.
async fn dispatch(state: &mut AppState, backend: &Backend, event: Event) -> Vec<RequestOp> {
    let mut ops = Vec::new();
    let mut queue = VecDeque::from([event]);

    while let Some(event) = queue.pop_front() {
        let (_, actions) = handle_event(state, &event).expect("event handling failed");
        for action in actions {
            match action {
                Action::Backend(request) => {
                    ops.push(request.op.clone());
                    let response = backend.handle_request(request).await;
                    queue.push_back(Event::Backend(response));
                }
                Action::Quit => {}
            }
        }
    }

    ops
}

async fn type_text(state: &mut AppState, backend: &Backend, text: &str) {
    for c in text.chars() {
        dispatch(state, backend, Event::Char(c)).await;
    }
}

/// Signs in as a student by typing into the login form.
async fn sign_in_student(state: &mut AppState, backend: &Backend) {
    dispatch(state, backend, Event::StartEditing).await;
    type_text(state, backend, "somying@school.ac.th").await;
    dispatch(state, backend, Event::NextField).await;
    type_text(state, backend, "password1").await;
    dispatch(state, backend, Event::StopEditing).await;

    let ops = dispatch(state, backend, Event::Activate).await;
    assert!(matches!(ops[0], RequestOp::Login { .. }));
}

#[tokio::test]
async fn student_reads_a_book_to_completion() {
    let backend = instant_backend();
    let mut state = AppState::new(Theme::default());

    sign_in_student(&mut state, &backend).await;

    // Students land on the assistant chat and the library loads eagerly.
    assert!(state.identity.is_some());
    assert_eq!(state.screen(), Screen::Chat);
    assert_eq!(state.library.filtered().len(), 4);

    // Pick the second book from the library list.
    dispatch(&mut state, &backend, Event::GoTo(View::Library)).await;
    assert_eq!(state.screen(), Screen::Library);
    dispatch(&mut state, &backend, Event::MoveDown).await;
    dispatch(&mut state, &backend, Event::Activate).await;

    assert_eq!(state.screen(), Screen::Chat);
    let selection = state.selection.clone().expect("book should be selected");
    assert_eq!(selection.id, "2");

    // Open the reader; page one arrives with content.
    let ops = dispatch(&mut state, &backend, Event::OpenReader).await;
    assert!(matches!(ops[0], RequestOp::FetchPage { .. }));
    let reader = state.reader.as_ref().expect("reader should be open");
    assert_eq!(reader.current_page(), 1);
    assert_eq!(reader.total_pages(), MOCK_TOTAL_PAGES);
    assert_eq!(
        reader.page.as_ref().map(|p| p.title.as_str()),
        Some("Chapter 1: The Motion of Objects")
    );

    // Walk to the last page; completion is reported exactly once.
    let mut completions = 0;
    for _ in 1..MOCK_TOTAL_PAGES {
        let ops = dispatch(&mut state, &backend, Event::NextPage).await;
        completions += ops
            .iter()
            .filter(|op| matches!(op, RequestOp::MarkCompleted { .. }))
            .count();
    }
    assert_eq!(completions, 1);
    assert!(state.reader.as_ref().is_some_and(|r| r.is_finished()));
    assert_eq!(state.status.as_deref(), Some("Reading progress saved"));

    // Turning past the end does nothing.
    let ops = dispatch(&mut state, &backend, Event::NextPage).await;
    assert!(ops.is_empty());

    // Read again restarts at page one without re-reporting completion.
    let ops = dispatch(&mut state, &backend, Event::ReadAgain).await;
    assert!(matches!(ops[0], RequestOp::FetchPage { .. }));
    let reader = state.reader.as_ref().expect("reader should stay open");
    assert_eq!(reader.current_page(), 1);
    assert!(!reader.is_finished());

    // Back returns to the chat with the selection intact.
    dispatch(&mut state, &backend, Event::Back).await;
    assert_eq!(state.screen(), Screen::Chat);
    assert!(state.selection.is_some());
}

#[tokio::test]
async fn assistant_reply_carries_reading_context() {
    let backend = instant_backend();
    let mut state = AppState::new(Theme::default());

    sign_in_student(&mut state, &backend).await;

    dispatch(&mut state, &backend, Event::GoTo(View::Library)).await;
    dispatch(&mut state, &backend, Event::Activate).await;
    dispatch(&mut state, &backend, Event::OpenReader).await;

    dispatch(&mut state, &backend, Event::StartEditing).await;
    type_text(&mut state, &backend, "What is motion?").await;
    let ops = dispatch(&mut state, &backend, Event::Activate).await;

    match &ops[0] {
        RequestOp::AssistantReply { book, page, text } => {
            assert_eq!(book.as_ref().map(|b| b.id.as_str()), Some("1"));
            assert_eq!(page.as_ref().map(|(n, _)| *n), Some(1));
            assert_eq!(text, "What is motion?");
        }
        other => panic!("expected an assistant request, got {other:?}"),
    }

    // The reply landed in the transcript and the typing indicator cleared.
    assert!(!state.chat.is_typing);
    let last = state.chat.messages().last().expect("transcript is empty");
    assert_eq!(last.sender, learnbooks::domain::Sender::Bot);
    assert!(!last.text.is_empty());
}

#[tokio::test]
async fn teacher_lands_on_dashboard_with_managed_books() {
    let backend = instant_backend();
    let mut state = AppState::new(Theme::default());

    dispatch(&mut state, &backend, Event::ToggleRole).await;
    dispatch(&mut state, &backend, Event::StartEditing).await;
    type_text(&mut state, &backend, "somchai@school.ac.th").await;
    dispatch(&mut state, &backend, Event::NextField).await;
    type_text(&mut state, &backend, "password1").await;
    dispatch(&mut state, &backend, Event::StopEditing).await;
    dispatch(&mut state, &backend, Event::Activate).await;

    assert_eq!(state.screen(), Screen::TeacherDashboard);
    assert!(state.teacher.loaded);
    assert!(!state.teacher.books.is_empty());
    assert!(state.teacher.stats().total_books >= 1);
}

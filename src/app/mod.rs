//! Application core: state, events, routing, and per-screen state bundles.
//!
//! Everything in here is synchronous and side-effect free apart from the
//! actions the handler emits. The main loop feeds events in; state mutations
//! and backend requests come out.

pub mod chat;
pub mod forms;
pub mod handler;
pub mod library;
pub mod reader;
pub mod router;
pub mod state;
pub mod view;

pub use handler::{handle_event, Action, Event};
pub use router::{nav_items, Screen};
pub use state::{AppState, TeacherState, TeacherStats};
pub use view::{AuthScreen, InputMode, View};

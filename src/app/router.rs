//! The view router: (identity, view tag, selection) → exactly one screen.
//!
//! Routing is total by construction: every combination of navigation state
//! maps to a defined [`Screen`], and bad state degrades to a sensible view
//! instead of erroring. Navigation must never crash the application.

use crate::app::view::{AuthScreen, View};
use crate::domain::{BookRef, Identity, Role};

/// The screen actually rendered for the current navigation state.
///
/// Distinct from [`View`]: several view tags can resolve to the same screen
/// (the teacher tags), and a view tag can be overridden by missing state
/// (reader without a selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Library,
    Reader,
    Chat,
    TeacherDashboard,
    /// Profile, with the view its back action returns to.
    Profile(View),
}

/// Resolves the screen to render.
///
/// Transition table:
/// - no identity → `Login`, or `Register` if the user toggled it;
/// - `Reader` with no selection → `Library` (self-healing fallback, not an
///   error);
/// - any teacher tag → the one `TeacherDashboard` container;
/// - `Profile` → `Profile` with a role-computed back target.
///
/// Students can technically hold a teacher tag (and vice versa); the router
/// does not enforce role restrictions, only the navigation menus do.
// TODO: split TeacherBooks/TeacherAnalytics into their own screens once the
// teacher container renders per-tab content.
#[must_use]
pub fn resolve(
    identity: Option<&Identity>,
    view: View,
    selection: Option<&BookRef>,
    auth_screen: AuthScreen,
) -> Screen {
    let Some(identity) = identity else {
        return match auth_screen {
            AuthScreen::Login => Screen::Login,
            AuthScreen::Register => Screen::Register,
        };
    };

    match view {
        View::Dashboard => Screen::Dashboard,
        View::Library => Screen::Library,
        View::Reader => {
            if selection.is_some() {
                Screen::Reader
            } else {
                tracing::debug!("reader requested without a selection, falling back to library");
                Screen::Library
            }
        }
        View::Chat => Screen::Chat,
        View::TeacherDashboard | View::TeacherBooks | View::TeacherAnalytics => {
            Screen::TeacherDashboard
        }
        View::Profile => Screen::Profile(View::profile_back_target(identity.role)),
    }
}

/// Navigation menu entries for a role.
///
/// This construction, not the router, is what keeps students out of the
/// teacher views in practice.
#[must_use]
pub const fn nav_items(role: Role) -> [(View, &'static str); 3] {
    match role {
        Role::Teacher => [
            (View::TeacherDashboard, "Overview"),
            (View::TeacherBooks, "Manage Books"),
            (View::TeacherAnalytics, "Analytics"),
        ],
        Role::Student => [
            (View::Chat, "AI Assistant"),
            (View::Library, "Library"),
            (View::Dashboard, "Overview"),
        ],
    }
}

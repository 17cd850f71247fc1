//! View and input mode state types for the application.
//!
//! The [`View`] enum is the navigation tag the router dispatches on. It is a
//! closed enumeration so that adding a view is a compile-time-checked change:
//! the router's match must stay exhaustive.
//!
//! [`InputMode`] controls keybinding interpretation: in `Normal` mode keys
//! are commands, in `Editing` mode printable keys feed whichever text input
//! the current screen owns (auth form field, chat composer, library search,
//! or the teacher's add-book form).

use crate::domain::Role;
use serde::{Deserialize, Serialize};

/// Navigation tag for the current view.
///
/// Mutated only by navigation intents; never persisted. The three teacher
/// tags intentionally route to the same container (see
/// [`router`](crate::app::router)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Dashboard,
    Library,
    Reader,
    Chat,
    TeacherDashboard,
    TeacherBooks,
    TeacherAnalytics,
    Profile,
}

impl View {
    /// The view a user lands on right after signing in.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::Teacher => Self::TeacherDashboard,
            Role::Student => Self::Chat,
        }
    }

    /// The view the profile screen's back action returns to.
    #[must_use]
    pub const fn profile_back_target(role: Role) -> Self {
        match role {
            Role::Teacher => Self::TeacherDashboard,
            Role::Student => Self::Chat,
        }
    }

    /// Whether this is one of the teacher management tags.
    #[must_use]
    pub const fn is_teacher_tag(self) -> bool {
        matches!(
            self,
            Self::TeacherDashboard | Self::TeacherBooks | Self::TeacherAnalytics
        )
    }
}

/// Current input handling mode.
///
/// Determines whether printable keys are commands or text input. The footer
/// reflects the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command mode.
    Normal,
    /// Printable keys feed the focused text input of the current screen.
    Editing,
}

/// Which auth screen is shown while no identity is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScreen {
    Login,
    Register,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_view_depends_on_role() {
        assert_eq!(View::landing_for(Role::Teacher), View::TeacherDashboard);
        assert_eq!(View::landing_for(Role::Student), View::Chat);
    }

    #[test]
    fn profile_back_target_depends_on_role() {
        assert_eq!(
            View::profile_back_target(Role::Teacher),
            View::TeacherDashboard
        );
        assert_eq!(View::profile_back_target(Role::Student), View::Chat);
    }
}

//! Client shell navigation model.
//!
//! The UI shell is a five-screen application driven by a view state machine.
//! The server owns the typed model: session resolution computes the initial
//! view, and the transition table is the single source of truth for which
//! navigations are legal. Unknown transitions are rejected with a typed
//! error rather than falling through to a placeholder screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The screens of the client shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Loading,
    Auth,
    Profile,
    Dashboard,
    Report,
    Admin,
}

/// Outcome of resolving the auth session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// No authenticated user.
    SignedOut,
    /// Authenticated, but the stored profile has no name yet.
    NeedsProfile,
    /// Authenticated with a named profile.
    Ready,
}

/// Navigation events the shell can emit. Externally tagged on the wire:
/// unit events are bare strings (`"openReport"`), resolution carries its
/// payload (`{"resolve": "ready"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavEvent {
    /// Auth-provider callback resolved.
    Resolve(Resolution),
    OpenProfile,
    OpenDashboard,
    OpenReport,
    OpenAdmin,
    SignOut,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no transition from {from:?} on {event:?}")]
pub struct InvalidTransition {
    pub from: ViewState,
    pub event: NavEvent,
}

impl ViewState {
    /// The view an authenticated session lands on. Users without a named
    /// profile are routed to the profile editor first.
    pub fn initial(resolution: Resolution) -> ViewState {
        match resolution {
            Resolution::SignedOut => ViewState::Auth,
            Resolution::NeedsProfile => ViewState::Profile,
            Resolution::Ready => ViewState::Dashboard,
        }
    }

    fn is_authenticated(self) -> bool {
        matches!(
            self,
            ViewState::Profile | ViewState::Dashboard | ViewState::Report | ViewState::Admin
        )
    }
}

/// Applies a navigation event to a view state.
///
/// Adjacency: `Loading`/`Auth` resolve into `Auth`, `Profile` or `Dashboard`;
/// `Dashboard ⇄ Profile`, `Dashboard ⇄ Report`, `Dashboard ⇄ Admin`; any
/// authenticated view returns to `Auth` on sign-out. Everything else is an
/// `InvalidTransition`.
pub fn transition(from: ViewState, event: NavEvent) -> Result<ViewState, InvalidTransition> {
    use NavEvent::*;
    use ViewState::*;

    match (from, event) {
        (Loading | Auth, Resolve(resolution)) => Ok(ViewState::initial(resolution)),
        (Dashboard, OpenProfile) => Ok(Profile),
        (Profile, OpenDashboard) => Ok(Dashboard),
        (Dashboard, OpenReport) => Ok(Report),
        (Report, OpenDashboard) => Ok(Dashboard),
        (Dashboard, OpenAdmin) => Ok(Admin),
        (Admin, OpenDashboard) => Ok(Dashboard),
        (state, SignOut) if state.is_authenticated() => Ok(Auth),
        (from, event) => Err(InvalidTransition { from, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NavEvent::*;
    use ViewState::*;

    #[test]
    fn test_resolution_routes_from_loading() {
        assert_eq!(transition(Loading, Resolve(Resolution::SignedOut)), Ok(Auth));
        assert_eq!(
            transition(Loading, Resolve(Resolution::NeedsProfile)),
            Ok(Profile)
        );
        assert_eq!(transition(Loading, Resolve(Resolution::Ready)), Ok(Dashboard));
    }

    #[test]
    fn test_resolution_routes_after_sign_in() {
        assert_eq!(transition(Auth, Resolve(Resolution::Ready)), Ok(Dashboard));
        assert_eq!(
            transition(Auth, Resolve(Resolution::NeedsProfile)),
            Ok(Profile)
        );
    }

    #[test]
    fn test_dashboard_roundtrips() {
        for (open, screen) in [(OpenProfile, Profile), (OpenReport, Report), (OpenAdmin, Admin)] {
            assert_eq!(transition(Dashboard, open), Ok(screen));
            assert_eq!(transition(screen, OpenDashboard), Ok(Dashboard));
        }
    }

    #[test]
    fn test_sign_out_from_any_authenticated_view() {
        for state in [Profile, Dashboard, Report, Admin] {
            assert_eq!(transition(state, SignOut), Ok(Auth));
        }
    }

    #[test]
    fn test_sign_out_rejected_when_not_authenticated() {
        assert!(transition(Auth, SignOut).is_err());
        assert!(transition(Loading, SignOut).is_err());
    }

    #[test]
    fn test_non_adjacent_navigation_rejected() {
        // Report and Admin are only reachable from Dashboard.
        assert!(transition(Report, OpenProfile).is_err());
        assert!(transition(Profile, OpenReport).is_err());
        assert!(transition(Admin, OpenProfile).is_err());
        assert!(transition(Auth, OpenDashboard).is_err());
        // An already-resolved view cannot resolve again.
        let err = transition(Dashboard, Resolve(Resolution::Ready)).unwrap_err();
        assert_eq!(err.from, Dashboard);
    }

    #[test]
    fn test_view_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ViewState::Dashboard).unwrap(),
            "\"dashboard\""
        );
    }

    #[test]
    fn test_nav_event_wire_format() {
        assert_eq!(
            serde_json::from_str::<NavEvent>("\"openReport\"").unwrap(),
            OpenReport
        );
        assert_eq!(
            serde_json::from_str::<NavEvent>(r#"{"resolve":"ready"}"#).unwrap(),
            Resolve(Resolution::Ready)
        );
    }
}

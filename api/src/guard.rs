use crate::session::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// Who may see a guarded screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    SignedIn,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Startup credential check still running: show a placeholder, do not redirect.
    Loading,
    Unauthenticated,
    /// Signed in but lacking the role the screen needs.
    Forbidden,
    Authenticated,
}

impl GuardState {
    pub fn evaluate(session: &Session, requirement: Requirement) -> Self {
        if session.loading {
            return GuardState::Loading;
        }
        match (&session.user, requirement) {
            (None, _) => GuardState::Unauthenticated,
            (Some(user), Requirement::Admin) if !user.is_admin() => GuardState::Forbidden,
            (Some(_), _) => GuardState::Authenticated,
        }
    }

    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            GuardState::Unauthenticated => Some(LOGIN_ROUTE),
            GuardState::Forbidden => Some(HOME_ROUTE),
            GuardState::Loading | GuardState::Authenticated => None,
        }
    }
}

/// Screens only anonymous visitors should see (login, register) bounce
/// signed-in users home. Returns the redirect, if any.
pub fn anonymous_only(session: &Session) -> Option<&'static str> {
    if !session.loading && session.is_authenticated() {
        Some(HOME_ROUTE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserKind};

    fn user(tipo: UserKind) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "nome": "Carla",
            "email": "carla@example.com",
            "tipo": tipo,
        }))
        .unwrap()
    }

    #[test]
    fn test_loading_renders_placeholder_without_redirect() {
        let state = GuardState::evaluate(&Session::initial(), Requirement::SignedIn);
        assert_eq!(state, GuardState::Loading);
        assert_eq!(state.redirect_target(), None);

        // loading wins even if a user is somehow present
        let odd = Session {
            user: Some(user(UserKind::Cliente)),
            loading: true,
        };
        assert_eq!(GuardState::evaluate(&odd, Requirement::Admin), GuardState::Loading);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        for requirement in [Requirement::SignedIn, Requirement::Admin] {
            let state = GuardState::evaluate(&Session::anonymous(), requirement);
            assert_eq!(state, GuardState::Unauthenticated);
            assert_eq!(state.redirect_target(), Some(LOGIN_ROUTE));
        }
    }

    #[test]
    fn test_signed_in_renders() {
        let session = Session::authenticated(user(UserKind::Freelancer));
        let state = GuardState::evaluate(&session, Requirement::SignedIn);
        assert_eq!(state, GuardState::Authenticated);
        assert_eq!(state.redirect_target(), None);
    }

    #[test]
    fn test_admin_screen_forbids_regular_users() {
        let session = Session::authenticated(user(UserKind::Cliente));
        let state = GuardState::evaluate(&session, Requirement::Admin);
        assert_eq!(state, GuardState::Forbidden);
        assert_eq!(state.redirect_target(), Some(HOME_ROUTE));

        let admin = Session::authenticated(user(UserKind::Admin));
        assert_eq!(
            GuardState::evaluate(&admin, Requirement::Admin),
            GuardState::Authenticated
        );
    }

    #[test]
    fn test_anonymous_only_screens() {
        assert_eq!(anonymous_only(&Session::initial()), None);
        assert_eq!(anonymous_only(&Session::anonymous()), None);
        assert_eq!(
            anonymous_only(&Session::authenticated(user(UserKind::Cliente))),
            Some(HOME_ROUTE)
        );
    }
}

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::User;
use crate::resources::auth;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "E-mail ou senha incorretos.";

/// The authenticated user and whether the startup credential check is still running.
///
/// `loading` starts `true` and settles to `false` once, after
/// [`SessionStore::initialize`]. `user` is only ever set from a successful
/// identity fetch (or an optimistic edit of that same user).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

impl Session {
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Replace the user after a local edit (e.g. profile form).
    /// Ignored when nobody is signed in or the ids differ.
    pub fn set_user(&mut self, user: User) {
        if self.user_id() == Some(user.id) {
            self.user = Some(user);
        }
    }

    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Apply the outcome of [`SessionStore::refresh`]. A failed refresh has
    /// already dropped the credential, so the session follows it out.
    pub fn apply_refresh(&mut self, outcome: Result<User, ApiError>) -> Result<(), ApiError> {
        match outcome {
            Ok(user) => {
                self.sign_in(user);
                Ok(())
            }
            Err(e) => {
                self.sign_out();
                Err(e)
            }
        }
    }
}

/// The only place session transitions touch the network or the persisted credential.
#[derive(Clone)]
pub struct SessionStore {
    client: ApiClient,
}

impl SessionStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Startup check. A failed identity fetch means "not authenticated"; it is not retried.
    pub async fn initialize(&self) -> Session {
        let credentials = self.client.credentials();
        if credentials.access_token().is_none() {
            info!("No persisted credential, starting anonymous");
            credentials.clear();
            return Session::anonymous();
        }

        match auth::current_user(&self.client).await {
            Ok(user) => {
                info!("Restored session for user {}", user.id);
                credentials.set_user_id(user.id);
                Session::authenticated(user)
            }
            Err(e) => {
                warn!("Identity check failed, clearing credential: {}", e);
                credentials.clear();
                Session::anonymous()
            }
        }
    }

    /// Exchange e-mail and password for a bearer credential, then load the user.
    /// Nothing is persisted unless both steps succeed.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let mut missing = FieldErrors::new();
        if email.trim().is_empty() {
            missing.insert("email", "Informe o e-mail.");
        }
        if password.is_empty() {
            missing.insert("password", "Informe a senha.");
        }
        missing.into_result().map_err(ApiError::Invalid)?;

        let credentials = self.client.credentials();
        credentials.clear();

        let tokens = auth::obtain_token(&self.client, email.trim(), password)
            .await
            .map_err(|e| match e {
                ApiError::Rejected { status: 400 | 401, .. } => {
                    ApiError::Invalid(FieldErrors::general_message(INVALID_CREDENTIALS_MESSAGE))
                }
                other => other,
            })?;

        credentials.set_access_token(&tokens.access);
        match auth::current_user(&self.client).await {
            Ok(user) => {
                credentials.set_user_id(user.id);
                info!("User {} logged in", user.id);
                Ok(user)
            }
            Err(e) => {
                warn!("Login succeeded but identity fetch failed: {}", e);
                credentials.clear();
                Err(e)
            }
        }
    }

    /// Refetch the current identity. Failure clears the credential.
    pub async fn refresh(&self) -> Result<User, ApiError> {
        match auth::current_user(&self.client).await {
            Ok(user) => {
                self.client.credentials().set_user_id(user.id);
                Ok(user)
            }
            Err(e) => {
                warn!("Identity refresh failed: {}", e);
                self.client.credentials().clear();
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        info!("Logging out");
        self.client.credentials().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserKind;

    fn user(id: i64) -> User {
        User {
            id,
            nome: "Bruno".into(),
            email: "bruno@example.com".into(),
            tipo: UserKind::Cliente,
            is_staff: false,
            telefone: None,
            bio: None,
            habilidades: vec![],
            foto: None,
            advertencias: 0,
            suspenso_ate: None,
            banido: false,
        }
    }

    #[test]
    fn test_initial_is_loading_without_user() {
        let s = Session::default();
        assert!(s.loading);
        assert!(s.user.is_none());
    }

    #[test]
    fn test_set_user_only_updates_same_user() {
        let mut s = Session::authenticated(user(1));
        let mut edited = user(1);
        edited.nome = "Bruno Souza".into();
        s.set_user(edited.clone());
        assert_eq!(s.user, Some(edited));

        s.set_user(user(2));
        assert_eq!(s.user_id(), Some(1));

        let mut anon = Session::anonymous();
        anon.set_user(user(1));
        assert!(anon.user.is_none());
    }

    #[test]
    fn test_sign_out_settles_loading() {
        let mut s = Session::initial();
        s.sign_out();
        assert_eq!(s, Session::anonymous());
    }

    #[test]
    fn test_apply_refresh_replaces_or_drops_user() {
        let mut s = Session::authenticated(user(1));
        let mut warned = user(1);
        warned.advertencias = 2;
        assert!(s.apply_refresh(Ok(warned.clone())).is_ok());
        assert_eq!(s.user, Some(warned));

        let err = s.apply_refresh(Err(ApiError::SessionExpired)).unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(s, Session::anonymous());
    }
}

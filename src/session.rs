use freela_api::models::User;
use freela_api::{ApiClient, ApiError, Session, SessionStore};
use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

/// App-wide session handle. `Copy`, so event handlers can capture it freely.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Session>,
    store: StoredValue<SessionStore>,
}

impl SessionContext {
    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.with(Session::user_id)
    }

    /// Optimistic local edit of the signed-in user (profile form).
    pub fn set_user(&self, user: User) {
        self.session.update(|s| s.set_user(user));
    }

    pub async fn login(&self, email: String, password: String) -> Result<(), ApiError> {
        let store = self.store.get_value();
        let user = store.login(&email, &password).await?;
        self.session.update(|s| s.sign_in(user));
        Ok(())
    }

    /// Reload the signed-in user from the server. A failure signs out, since
    /// the store has already dropped the credential.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let store = self.store.get_value();
        let outcome = store.refresh().await;
        let result = self.session.try_update(|s| s.apply_refresh(outcome));
        match result {
            Some(Err(e)) => {
                warn!("Session ended by identity refresh: {}", e);
                Err(e)
            }
            _ => Ok(()),
        }
    }

    /// [`Self::refresh`] when `user_id` is the signed-in user.
    pub async fn refresh_if_current(&self, user_id: i64) {
        if self.user_id() == Some(user_id) {
            let _ = self.refresh().await;
        }
    }

    pub fn logout(&self) {
        self.store.with_value(SessionStore::logout);
        self.session.update(Session::sign_out);
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Owns the session for everything below it. Runs the startup credential
/// check once and signs the user out whenever the API reports an expired token.
#[component]
pub fn SessionProvider(client: ApiClient, children: Children) -> impl IntoView {
    let session = RwSignal::new(Session::initial());
    client.on_session_ended(move || session.update(Session::sign_out));

    let ctx = SessionContext {
        session,
        store: StoredValue::new(SessionStore::new(client.clone())),
    };
    provide_context(ctx);
    provide_context(client);

    Effect::new(move |_| {
        spawn_local(async move {
            let store = ctx.store.get_value();
            let initial = store.initialize().await;
            session.set(initial);
        });
    });

    children()
}

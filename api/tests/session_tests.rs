mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{client_with, user_json, ScriptedTransport};
use freela_api::session::INVALID_CREDENTIALS_MESSAGE;
use freela_api::transport::{Body, Method};
use freela_api::{ApiError, GuardState, Requirement, Session, SessionStore};
use serde_json::json;

#[tokio::test]
async fn test_initialize_without_credential_is_anonymous() {
    let transport = ScriptedTransport::new();
    let store = SessionStore::new(client_with(transport.clone()));

    let session = store.initialize().await;

    assert_eq!(session, Session::anonymous());
    assert_eq!(transport.request_count(), 0, "No identity fetch without a credential");
}

#[tokio::test]
async fn test_initialize_restores_user_from_credential() {
    let transport = ScriptedTransport::new();
    transport.respond(200, user_json(12, "cliente"));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("persisted-token");
    let store = SessionStore::new(client.clone());

    let session = store.initialize().await;

    assert!(!session.loading);
    assert_eq!(session.user_id(), Some(12));
    assert_eq!(client.credentials().user_id(), Some(12));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("/usuarios/me/"));
    assert_eq!(requests[0].bearer.as_deref(), Some("persisted-token"));
}

#[tokio::test]
async fn test_initialize_failure_clears_persisted_state() {
    let transport = ScriptedTransport::new();
    transport.respond(401, json!({"detail": "Token inválido."}));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("expired");
    client.credentials().set_user_id(12);

    let session = SessionStore::new(client.clone()).initialize().await;

    assert_eq!(session, Session::anonymous());
    assert_eq!(client.credentials().access_token(), None);
    assert_eq!(client.credentials().user_id(), None);
    assert_eq!(transport.request_count(), 1, "No retry after a failed identity fetch");
}

#[tokio::test]
async fn test_initialize_network_failure_is_not_retried() {
    let transport = ScriptedTransport::new();
    transport.fail_network();
    let client = client_with(transport.clone());
    client.credentials().set_access_token("token");

    let session = SessionStore::new(client.clone()).initialize().await;

    assert_eq!(session, Session::anonymous());
    assert_eq!(client.credentials().access_token(), None);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_login_success_persists_token_then_loads_user() {
    let transport = ScriptedTransport::new();
    transport
        .respond(200, json!({"access": "fresh-token", "refresh": "r"}))
        .respond(200, user_json(3, "freelancer"));
    let client = client_with(transport.clone());
    let store = SessionStore::new(client.clone());

    let user = store.login("  u3@example.com ", "segura123").await.unwrap();

    assert_eq!(user.id, 3);
    assert_eq!(client.credentials().access_token().as_deref(), Some("fresh-token"));
    assert_eq!(client.credentials().user_id(), Some(3));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Post);
    assert!(requests[0].url.ends_with("/token/"));
    assert_eq!(requests[0].bearer, None);
    assert_eq!(
        requests[0].body,
        Body::Json(json!({"email": "u3@example.com", "password": "segura123"}))
    );
    assert!(requests[1].url.ends_with("/usuarios/me/"));
    assert_eq!(requests[1].bearer.as_deref(), Some("fresh-token"));

    let mut session = Session::anonymous();
    session.sign_in(user);
    assert_eq!(
        GuardState::evaluate(&session, Requirement::SignedIn),
        GuardState::Authenticated
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_persists_nothing() {
    let transport = ScriptedTransport::new();
    transport.respond(
        401,
        json!({"detail": "No active account found with the given credentials"}),
    );
    let client = client_with(transport.clone());
    let store = SessionStore::new(client.clone());

    let err = store.login("u3@example.com", "errada").await.unwrap_err();

    assert_eq!(err.user_message(), INVALID_CREDENTIALS_MESSAGE);
    assert!(matches!(err, ApiError::Invalid(_)));
    assert_eq!(client.credentials().access_token(), None);
    assert_eq!(transport.request_count(), 1, "No identity fetch after a failed login");
}

#[tokio::test]
async fn test_login_network_failure_keeps_fallback_message() {
    let transport = ScriptedTransport::new();
    transport.fail_network();
    let client = client_with(transport.clone());

    let err = SessionStore::new(client.clone())
        .login("u3@example.com", "segura123")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(client.credentials().access_token(), None);
}

#[tokio::test]
async fn test_login_identity_failure_rolls_back_token() {
    let transport = ScriptedTransport::new();
    transport
        .respond(200, json!({"access": "fresh-token"}))
        .respond(500, json!({"detail": "Erro interno."}));
    let client = client_with(transport.clone());

    let result = SessionStore::new(client.clone())
        .login("u3@example.com", "segura123")
        .await;

    assert!(result.is_err());
    assert_eq!(client.credentials().access_token(), None);
}

#[tokio::test]
async fn test_login_blank_fields_send_nothing() {
    let transport = ScriptedTransport::new();
    let store = SessionStore::new(client_with(transport.clone()));

    let err = store.login("  ", "").await.unwrap_err();

    assert_eq!(err.field("email").as_deref(), Some("Informe o e-mail."));
    assert_eq!(err.field("password").as_deref(), Some("Informe a senha."));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_unauthorized_response_ends_session() {
    let transport = ScriptedTransport::new();
    transport.respond(401, json!({"detail": "Token expirado."}));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("stale");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    client.on_session_ended(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = freela_api::resources::contracts::list(&client).await.unwrap_err();

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(client.credentials().access_token(), None);
}

#[tokio::test]
async fn test_other_failures_keep_session() {
    let transport = ScriptedTransport::new();
    transport.respond(403, json!({"detail": "Sem permissão."}));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("valid");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    client.on_session_ended(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = freela_api::resources::contracts::list(&client).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Sem permissão.");
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(client.credentials().access_token().as_deref(), Some("valid"));
}

#[tokio::test]
async fn test_refresh_failure_clears_credential() {
    let transport = ScriptedTransport::new();
    transport.respond(404, json!({"detail": "Não encontrado."}));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("token");

    let result = SessionStore::new(client.clone()).refresh().await;

    assert!(result.is_err());
    assert_eq!(client.credentials().access_token(), None);
}

#[tokio::test]
async fn test_refresh_picks_up_moderation_changes() {
    let transport = ScriptedTransport::new();
    let mut body = user_json(7, "freelancer");
    body["advertencias"] = json!(2);
    transport.respond(200, body);
    let client = client_with(transport.clone());
    client.credentials().set_access_token("token");
    let mut session = Session::authenticated(
        serde_json::from_value(user_json(7, "freelancer")).unwrap(),
    );

    let outcome = SessionStore::new(client.clone()).refresh().await;
    session.apply_refresh(outcome).unwrap();

    assert_eq!(session.user.as_ref().map(|u| u.advertencias), Some(2));
    assert_eq!(client.credentials().user_id(), Some(7));
}

#[tokio::test]
async fn test_failed_refresh_signs_session_out() {
    let transport = ScriptedTransport::new();
    transport.respond(403, json!({"detail": "Conta suspensa."}));
    let client = client_with(transport.clone());
    client.credentials().set_access_token("token");
    let mut session = Session::authenticated(
        serde_json::from_value(user_json(7, "freelancer")).unwrap(),
    );

    let outcome = SessionStore::new(client.clone()).refresh().await;

    assert!(session.apply_refresh(outcome).is_err());
    assert_eq!(session, Session::anonymous());
    assert_eq!(client.credentials().access_token(), None);
}

#[tokio::test]
async fn test_logout_clears_credential_without_request() {
    let transport = ScriptedTransport::new();
    let client = client_with(transport.clone());
    client.credentials().set_access_token("token");
    client.credentials().set_user_id(5);

    SessionStore::new(client.clone()).logout();

    assert_eq!(client.credentials().access_token(), None);
    assert_eq!(client.credentials().user_id(), None);
    assert_eq!(transport.request_count(), 0);
}

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{TokenPair, User};

#[derive(Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// `POST /token/`
pub async fn obtain_token(client: &ApiClient, email: &str, password: &str) -> Result<TokenPair, ApiError> {
    client
        .post("/token/", &TokenRequest { email, password })
        .await
}

/// `GET /usuarios/me/`
pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    client.get("/usuarios/me/").await
}

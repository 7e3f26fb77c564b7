use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Listing, Rating};
use crate::validation;

/// `GET /avaliacoes/feitas/`: ratings the signed-in user gave.
pub async fn given(client: &ApiClient) -> Result<Vec<Rating>, ApiError> {
    let listing: Listing<Rating> = client.get("/avaliacoes/feitas/").await?;
    Ok(listing.into_vec())
}

/// `GET /avaliacoes/recebidas/`: ratings the signed-in user received.
pub async fn received(client: &ApiClient) -> Result<Vec<Rating>, ApiError> {
    let listing: Listing<Rating> = client.get("/avaliacoes/recebidas/").await?;
    Ok(listing.into_vec())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingDraft {
    pub contrato: i64,
    pub nota: u8,
    pub comentario: String,
}

#[derive(Serialize)]
struct RatingPayload<'a> {
    contrato: i64,
    nota: u8,
    #[serde(skip_serializing_if = "str::is_empty")]
    comentario: &'a str,
}

/// `POST /avaliacoes/`
pub async fn create(client: &ApiClient, draft: &RatingDraft) -> Result<Rating, ApiError> {
    let nota = validation::rating_score(draft.nota).map_err(ApiError::Invalid)?;
    let rating: Rating = client
        .post(
            "/avaliacoes/",
            &RatingPayload {
                contrato: draft.contrato,
                nota,
                comentario: draft.comentario.trim(),
            },
        )
        .await?;
    info!("Rated contract {} with {}", draft.contrato, nota);
    Ok(rating)
}

/// Contracts from `finished` that the user has not rated yet.
pub fn pending_contracts(finished: &[i64], given: &[Rating]) -> Vec<i64> {
    finished
        .iter()
        .copied()
        .filter(|id| !given.iter().any(|r| r.contrato == *id))
        .collect()
}

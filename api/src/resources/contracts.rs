use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Contract, ContractStatus, Listing};

/// `GET /contratos/`: contracts where the signed-in user is a party.
pub async fn list(client: &ApiClient) -> Result<Vec<Contract>, ApiError> {
    let listing: Listing<Contract> = client.get("/contratos/").await?;
    Ok(listing.into_vec())
}

/// `GET /contratos/{id}/`
pub async fn get(client: &ApiClient, id: i64) -> Result<Contract, ApiError> {
    client.get(&format!("/contratos/{}/", id)).await
}

#[derive(Serialize)]
struct StatusPayload {
    status: ContractStatus,
}

async fn set_status(client: &ApiClient, id: i64, status: ContractStatus) -> Result<Contract, ApiError> {
    let contract: Contract = client
        .patch(&format!("/contratos/{}/", id), &StatusPayload { status })
        .await?;
    info!("Contract {} is now {}", id, contract.status.as_str());
    Ok(contract)
}

/// `PATCH /contratos/{id}/` with `status = concluido`.
pub async fn finish(client: &ApiClient, id: i64) -> Result<Contract, ApiError> {
    set_status(client, id, ContractStatus::Concluido).await
}

/// `PATCH /contratos/{id}/` with `status = cancelado`.
pub async fn cancel(client: &ApiClient, id: i64) -> Result<Contract, ApiError> {
    set_status(client, id, ContractStatus::Cancelado).await
}

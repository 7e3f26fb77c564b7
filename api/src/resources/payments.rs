use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Listing, Payment};

/// `GET /pagamentos/`
pub async fn list(client: &ApiClient) -> Result<Vec<Payment>, ApiError> {
    let listing: Listing<Payment> = client.get("/pagamentos/").await?;
    Ok(listing.into_vec())
}

#[derive(Serialize)]
struct NewPayment {
    contrato: i64,
}

/// `POST /pagamentos/`. The answer carries the third-party `checkout_url`.
pub async fn create(client: &ApiClient, contract_id: i64) -> Result<Payment, ApiError> {
    let payment: Payment = client
        .post("/pagamentos/", &NewPayment { contrato: contract_id })
        .await?;
    info!("Started payment {} for contract {}", payment.id, contract_id);
    Ok(payment)
}

/// `GET /pagamentos/{id}/`, polled while the checkout is pending.
pub async fn status(client: &ApiClient, id: i64) -> Result<Payment, ApiError> {
    client.get(&format!("/pagamentos/{}/", id)).await
}

/// Replace or insert a payment in a loaded list, newest first.
pub fn upsert(list: &mut Vec<Payment>, payment: Payment) {
    match list.iter_mut().find(|p| p.id == payment.id) {
        Some(slot) => *slot = payment,
        None => list.insert(0, payment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn payment(id: i64, status: PaymentStatus) -> Payment {
        Payment {
            id,
            contrato: 1,
            valor: 100.0,
            status,
            checkout_url: None,
            data_criacao: None,
        }
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut list = vec![payment(1, PaymentStatus::Pendente)];
        upsert(&mut list, payment(1, PaymentStatus::Aprovado));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].status, PaymentStatus::Aprovado);

        upsert(&mut list, payment(2, PaymentStatus::Pendente));
        assert_eq!(list.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_only_pending_keeps_polling() {
        assert!(!PaymentStatus::Pendente.is_terminal());
        assert!(PaymentStatus::Aprovado.is_terminal());
        assert!(PaymentStatus::Recusado.is_terminal());
    }
}

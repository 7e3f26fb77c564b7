use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::{decimal_string, Listing, Proposal, ProposalStatus};
use crate::validation::{self, INVALID_VALUE_MESSAGE};

/// `GET /propostas/?trabalho={id}`, visible to the job owner.
pub async fn list_for_job(client: &ApiClient, job_id: i64) -> Result<Vec<Proposal>, ApiError> {
    let listing: Listing<Proposal> = client
        .get_with_query("/propostas/", &[("trabalho", job_id.to_string())])
        .await?;
    Ok(listing.into_vec())
}

/// `GET /propostas/`: the signed-in freelancer's own proposals.
pub async fn list_mine(client: &ApiClient) -> Result<Vec<Proposal>, ApiError> {
    let listing: Listing<Proposal> = client.get("/propostas/").await?;
    Ok(listing.into_vec())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalDraft {
    pub descricao: String,
    pub valor: String,
    /// Days, as typed.
    pub prazo_estimado: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct ProposalPayload {
    trabalho: i64,
    descricao: String,
    valor: String,
    prazo_estimado: u32,
}

impl ProposalDraft {
    fn payload(&self, job_id: i64) -> Result<ProposalPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::required(&mut errors, "descricao", &self.descricao, "Descreva sua proposta.");
        let valor = validation::positive_amount(&mut errors, "valor", &self.valor, INVALID_VALUE_MESSAGE);
        let prazo = match self.prazo_estimado.trim().parse::<u32>() {
            Ok(days) if days > 0 => Some(days),
            _ => {
                errors.insert("prazo_estimado", "Informe o prazo em dias (maior que zero).");
                None
            }
        };
        errors.into_result()?;

        match (valor, prazo) {
            (Some(valor), Some(prazo_estimado)) => Ok(ProposalPayload {
                trabalho: job_id,
                descricao: self.descricao.trim().to_string(),
                valor: decimal_string(valor),
                prazo_estimado,
            }),
            _ => Err(FieldErrors::general_message("Verifique os campos do formulário.")),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.payload(0).map(|_| ())
    }
}

/// `POST /propostas/`
pub async fn create(client: &ApiClient, job_id: i64, draft: &ProposalDraft) -> Result<Proposal, ApiError> {
    let payload = draft.payload(job_id).map_err(ApiError::Invalid)?;
    let proposal: Proposal = client.post("/propostas/", &payload).await?;
    info!("Sent proposal {} for job {}", proposal.id, job_id);
    Ok(proposal)
}

/// Decision on a pending proposal.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Accept,
    /// Reason as typed; must have at least 20 characters.
    Reject(String),
}

#[derive(Debug, Serialize, PartialEq)]
struct StatusPayload {
    status: ProposalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    motivo_recusa: Option<String>,
}

impl Decision {
    fn payload(&self) -> Result<StatusPayload, FieldErrors> {
        match self {
            Decision::Accept => Ok(StatusPayload {
                status: ProposalStatus::Aceita,
                motivo_recusa: None,
            }),
            Decision::Reject(reason) => Ok(StatusPayload {
                status: ProposalStatus::Recusada,
                motivo_recusa: Some(validation::rejection_reason(reason)?),
            }),
        }
    }
}

/// `PATCH /propostas/{id}/alterar-status/`. A rejection without a valid
/// reason fails locally and sends nothing.
pub async fn decide(client: &ApiClient, id: i64, decision: &Decision) -> Result<Proposal, ApiError> {
    let payload = decision.payload().map_err(ApiError::Invalid)?;
    let proposal: Proposal = client
        .patch(&format!("/propostas/{}/alterar-status/", id), &payload)
        .await?;
    info!("Proposal {} is now {}", id, proposal.status.label());
    Ok(proposal)
}

/// `DELETE /propostas/{id}/`: a freelancer withdrawing a pending proposal.
pub async fn withdraw(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/propostas/{}/", id)).await
}

/// Replace one proposal in a loaded list after a status change.
pub fn replace(list: &mut [Proposal], updated: Proposal) {
    if let Some(slot) = list.iter_mut().find(|p| p.id == updated.id) {
        *slot = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_payload() {
        let draft = ProposalDraft {
            descricao: " Entrego em uma semana ".into(),
            valor: "900".into(),
            prazo_estimado: "7".into(),
        };
        assert_eq!(
            draft.payload(4).unwrap(),
            ProposalPayload {
                trabalho: 4,
                descricao: "Entrego em uma semana".into(),
                valor: "900.00".into(),
                prazo_estimado: 7,
            }
        );
    }

    #[test]
    fn test_proposal_draft_errors() {
        let draft = ProposalDraft {
            descricao: String::new(),
            valor: "0".into(),
            prazo_estimado: "0".into(),
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.first("descricao").is_some());
        assert_eq!(errors.first("valor"), Some(INVALID_VALUE_MESSAGE));
        assert!(errors.first("prazo_estimado").is_some());
    }

    #[test]
    fn test_decision_payloads() {
        let accept = serde_json::to_value(Decision::Accept.payload().unwrap()).unwrap();
        assert_eq!(accept, serde_json::json!({"status": "aceita"}));

        let reject = Decision::Reject("Orçamento acima do esperado.".into())
            .payload()
            .unwrap();
        assert_eq!(
            serde_json::to_value(reject).unwrap(),
            serde_json::json!({"status": "recusada", "motivo_recusa": "Orçamento acima do esperado."})
        );

        assert!(Decision::Reject("não".into()).payload().is_err());
    }
}

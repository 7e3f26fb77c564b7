use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::{Listing, PunishmentKind, Report, ReportKind, ReportStatus};
use crate::validation;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub denunciado: i64,
    pub tipo: Option<ReportKind>,
    pub motivo: String,
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    denunciado: i64,
    tipo: ReportKind,
    motivo: &'a str,
}

impl ReportDraft {
    pub fn validate(&self) -> Result<ReportKind, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.denunciado <= 0 {
            errors.insert("denunciado", "Informe o usuário denunciado.");
        }
        if self.tipo.is_none() {
            errors.insert("tipo", "Escolha o tipo da denúncia.");
        }
        validation::min_chars(&mut errors, "motivo", &self.motivo, 10, "Descreva o motivo com pelo menos 10 caracteres.");
        errors.into_result()?;
        self.tipo
            .ok_or_else(|| FieldErrors::single("tipo", "Escolha o tipo da denúncia."))
    }
}

/// `POST /denuncias/`
pub async fn create(client: &ApiClient, draft: &ReportDraft) -> Result<Report, ApiError> {
    let tipo = draft.validate().map_err(ApiError::Invalid)?;
    let report: Report = client
        .post(
            "/denuncias/",
            &ReportPayload {
                denunciado: draft.denunciado,
                tipo,
                motivo: draft.motivo.trim(),
            },
        )
        .await?;
    info!("Filed report {} against user {}", report.id, draft.denunciado);
    Ok(report)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub tipo: Option<ReportKind>,
}

impl ReportFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.map(|s| s.as_str().to_string()).unwrap_or_default()),
            ("tipo", self.tipo.map(|t| t.as_str().to_string()).unwrap_or_default()),
        ]
    }
}

/// `GET /denuncias/` with optional filters. Admins see every report,
/// everyone else only the ones they filed.
pub async fn list(client: &ApiClient, filter: &ReportFilter) -> Result<Vec<Report>, ApiError> {
    let listing: Listing<Report> = client.get_with_query("/denuncias/", &filter.query()).await?;
    Ok(listing.into_vec())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminResponse {
    pub status: ReportStatus,
    pub resposta: String,
}

#[derive(Serialize)]
struct ResponsePayload<'a> {
    status: ReportStatus,
    resposta_admin: &'a str,
}

/// `PATCH /denuncias/{id}/responder/`
pub async fn respond(client: &ApiClient, id: i64, response: &AdminResponse) -> Result<Report, ApiError> {
    let mut errors = FieldErrors::new();
    validation::required(&mut errors, "resposta_admin", &response.resposta, "Escreva uma resposta.");
    errors.into_result().map_err(ApiError::Invalid)?;

    let report: Report = client
        .patch(
            &format!("/denuncias/{}/responder/", id),
            &ResponsePayload {
                status: response.status,
                resposta_admin: response.resposta.trim(),
            },
        )
        .await?;
    info!("Answered report {} as {}", id, report.status.as_str());
    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punishment {
    Warning,
    Suspension { days: u32 },
    Ban,
}

#[derive(Debug, Serialize, PartialEq)]
struct PunishmentPayload {
    tipo: PunishmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    dias: Option<u32>,
}

impl Punishment {
    pub fn kind(self) -> PunishmentKind {
        match self {
            Punishment::Warning => PunishmentKind::Advertencia,
            Punishment::Suspension { .. } => PunishmentKind::Suspensao,
            Punishment::Ban => PunishmentKind::Banimento,
        }
    }

    fn payload(self) -> Result<PunishmentPayload, FieldErrors> {
        let dias = match self {
            Punishment::Suspension { days: 0 } => {
                return Err(FieldErrors::single("dias", "Informe por quantos dias suspender."))
            }
            Punishment::Suspension { days } => Some(days),
            Punishment::Warning | Punishment::Ban => None,
        };
        Ok(PunishmentPayload {
            tipo: self.kind(),
            dias,
        })
    }
}

/// `POST /denuncias/{id}/aplicar-punicao/`
pub async fn apply_punishment(client: &ApiClient, id: i64, punishment: Punishment) -> Result<Report, ApiError> {
    let payload = punishment.payload().map_err(ApiError::Invalid)?;
    let report: Report = client
        .post(&format!("/denuncias/{}/aplicar-punicao/", id), &payload)
        .await?;
    info!("Applied {} for report {}", punishment.kind().as_str(), id);
    Ok(report)
}

/// `POST /denuncias/{id}/remover-punicao/`
pub async fn undo_punishment(client: &ApiClient, id: i64) -> Result<Report, ApiError> {
    let report: Report = client
        .post(&format!("/denuncias/{}/remover-punicao/", id), &serde_json::json!({}))
        .await?;
    info!("Removed punishment for report {}", id);
    Ok(report)
}

/// Replace one report in a loaded list. When a filter is active and the
/// report no longer matches it, it is dropped from the list.
pub fn replace(list: &mut Vec<Report>, updated: Report, filter: &ReportFilter) {
    let matches = filter.status.map_or(true, |s| s == updated.status)
        && filter.tipo.map_or(true, |t| t == updated.tipo);
    if matches {
        if let Some(slot) = list.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated;
        }
    } else {
        list.retain(|r| r.id != updated.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: i64, status: ReportStatus) -> Report {
        Report {
            id,
            denunciante: 1,
            denunciante_nome: None,
            denunciado: 2,
            denunciado_nome: None,
            tipo: ReportKind::Spam,
            motivo: "Mensagens repetidas".into(),
            status,
            resposta_admin: None,
            punicao_aplicada: None,
            data_criacao: None,
        }
    }

    #[test]
    fn test_suspension_needs_days() {
        assert!(Punishment::Suspension { days: 0 }.payload().is_err());
        assert_eq!(
            Punishment::Suspension { days: 7 }.payload().unwrap(),
            PunishmentPayload {
                tipo: PunishmentKind::Suspensao,
                dias: Some(7),
            }
        );
        let ban = serde_json::to_value(Punishment::Ban.payload().unwrap()).unwrap();
        assert_eq!(ban, serde_json::json!({"tipo": "banimento"}));
    }

    #[test]
    fn test_report_draft_validation() {
        let draft = ReportDraft {
            denunciado: 2,
            tipo: None,
            motivo: "ruim".into(),
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.first("tipo").is_some());
        assert!(errors.first("motivo").is_some());
        assert!(errors.first("denunciado").is_none());

        let nobody = ReportDraft {
            denunciado: 0,
            ..draft.clone()
        };
        assert!(nobody.validate().unwrap_err().first("denunciado").is_some());

        let ok = ReportDraft {
            tipo: Some(ReportKind::Fraude),
            motivo: "Pediu pagamento fora da plataforma.".into(),
            ..draft
        };
        assert_eq!(ok.validate(), Ok(ReportKind::Fraude));
    }

    #[test]
    fn test_replace_respects_active_filter() {
        let filter = ReportFilter {
            status: Some(ReportStatus::Pendente),
            tipo: None,
        };
        let mut list = vec![report(1, ReportStatus::Pendente), report(2, ReportStatus::Pendente)];
        replace(&mut list, report(1, ReportStatus::Resolvida), &filter);
        assert_eq!(list.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

        let mut unfiltered = vec![report(1, ReportStatus::Pendente)];
        replace(&mut unfiltered, report(1, ReportStatus::Resolvida), &ReportFilter::default());
        assert_eq!(unfiltered[0].status, ReportStatus::Resolvida);
    }

    #[test]
    fn test_filter_query_blank_when_unset() {
        let q = ReportFilter::default().query();
        assert!(q.iter().all(|(_, v)| v.is_empty()));
    }
}

use chrono::NaiveDate;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::{decimal_string, Job, JobStatus, Listing};
use crate::transport::{Attachment, FormPart};
use crate::validation::{self, INVALID_BUDGET_MESSAGE};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub search: String,
    pub status: Option<JobStatus>,
    /// Only jobs posted by the signed-in client.
    pub mine: bool,
}

impl JobFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("search", self.search.clone())];
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if self.mine {
            query.push(("meus", "true".to_string()));
        }
        query
    }
}

/// `GET /trabalhos/`
pub async fn list(client: &ApiClient, filter: &JobFilter) -> Result<Vec<Job>, ApiError> {
    let listing: Listing<Job> = client.get_with_query("/trabalhos/", &filter.query()).await?;
    Ok(listing.into_vec())
}

/// `GET /trabalhos/{id}/`
pub async fn get(client: &ApiClient, id: i64) -> Result<Job, ApiError> {
    client.get(&format!("/trabalhos/{}/", id)).await
}

/// Job form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDraft {
    pub titulo: String,
    pub descricao: String,
    pub orcamento: String,
    /// `YYYY-MM-DD`
    pub prazo: String,
    pub habilidades: String,
}

impl JobDraft {
    pub fn from_job(job: &Job) -> Self {
        Self {
            titulo: job.titulo.clone(),
            descricao: job.descricao.clone(),
            orcamento: decimal_string(job.orcamento),
            prazo: job.prazo.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            habilidades: job.habilidades.join(", "),
        }
    }

    /// Check the form and build the multipart body. `today` bounds the deadline.
    pub fn to_parts(&self, attachment: Option<Attachment>, today: NaiveDate) -> Result<Vec<FormPart>, FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::required(&mut errors, "titulo", &self.titulo, "Informe o título do trabalho.");
        validation::required(&mut errors, "descricao", &self.descricao, "Descreva o trabalho.");
        let budget = validation::positive_amount(&mut errors, "orcamento", &self.orcamento, INVALID_BUDGET_MESSAGE);
        let deadline = validation::future_date(&mut errors, "prazo", &self.prazo, today);
        errors.into_result()?;

        let (Some(budget), Some(deadline)) = (budget, deadline) else {
            return Err(FieldErrors::general_message("Verifique os campos do formulário."));
        };

        let mut parts = vec![
            FormPart::text("titulo", self.titulo.trim()),
            FormPart::text("descricao", self.descricao.trim()),
            FormPart::text("orcamento", decimal_string(budget)),
            FormPart::text("prazo", deadline.format("%Y-%m-%d").to_string()),
        ];
        for skill in validation::split_skills(&self.habilidades) {
            parts.push(FormPart::text("habilidades", skill));
        }
        if let Some(file) = attachment {
            parts.push(FormPart::file("anexo", file));
        }
        Ok(parts)
    }
}

/// `POST /trabalhos/` (multipart). Invalid drafts never reach the network.
pub async fn create(
    client: &ApiClient,
    draft: &JobDraft,
    attachment: Option<Attachment>,
    today: NaiveDate,
) -> Result<Job, ApiError> {
    let parts = draft.to_parts(attachment, today).map_err(ApiError::Invalid)?;
    let job: Job = client.post_multipart("/trabalhos/", parts).await?;
    info!("Created job {}", job.id);
    Ok(job)
}

/// `PATCH /trabalhos/{id}/` (multipart). Without a new attachment the old one is kept.
pub async fn update(
    client: &ApiClient,
    id: i64,
    draft: &JobDraft,
    attachment: Option<Attachment>,
    today: NaiveDate,
) -> Result<Job, ApiError> {
    let parts = draft.to_parts(attachment, today).map_err(ApiError::Invalid)?;
    let job: Job = client.patch_multipart(&format!("/trabalhos/{}/", id), parts).await?;
    info!("Updated job {}", job.id);
    Ok(job)
}

/// `DELETE /trabalhos/{id}/`
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/trabalhos/{}/", id)).await?;
    info!("Deleted job {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::PartValue;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    fn draft() -> JobDraft {
        JobDraft {
            titulo: "Landing page".into(),
            descricao: "Página de captura para curso.".into(),
            orcamento: "1.200,00".into(),
            prazo: "2026-06-01".into(),
            habilidades: "HTML, CSS".into(),
        }
    }

    #[test]
    fn test_parts_from_valid_draft() {
        let parts = draft().to_parts(None, today()).unwrap();
        let text = |name: &str| -> Vec<String> {
            parts
                .iter()
                .filter(|p| p.name == name)
                .filter_map(|p| match &p.value {
                    PartValue::Text(t) => Some(t.clone()),
                    PartValue::File(_) => None,
                })
                .collect()
        };
        assert_eq!(text("orcamento"), vec!["1200.00".to_string()]);
        assert_eq!(text("prazo"), vec!["2026-06-01".to_string()]);
        assert_eq!(text("habilidades"), vec!["HTML".to_string(), "CSS".to_string()]);
        assert!(parts.iter().all(|p| p.name != "anexo"));
    }

    #[test]
    fn test_dot_grouped_budget_is_thousands() {
        let draft = JobDraft { orcamento: "1.500".into(), ..draft() };
        let parts = draft.to_parts(None, today()).unwrap();
        let budget = parts.iter().find(|p| p.name == "orcamento").map(|p| &p.value);
        assert_eq!(budget, Some(&PartValue::Text("1500.00".into())));
    }

    #[test]
    fn test_attachment_becomes_file_part() {
        let file = Attachment {
            file_name: "briefing.pdf".into(),
            mime: Some("application/pdf".into()),
            bytes: vec![1, 2, 3],
        };
        let parts = draft().to_parts(Some(file.clone()), today()).unwrap();
        let anexo = parts.iter().find(|p| p.name == "anexo").unwrap();
        assert_eq!(anexo.value, PartValue::File(file));
    }

    #[test]
    fn test_zero_or_negative_budget_is_rejected() {
        for budget in ["0", "-50", "abc"] {
            let bad = JobDraft {
                orcamento: budget.into(),
                ..draft()
            };
            let errors = bad.to_parts(None, today()).unwrap_err();
            assert_eq!(errors.first("orcamento"), Some(INVALID_BUDGET_MESSAGE));
        }
    }

    #[test]
    fn test_filter_query() {
        let filter = JobFilter {
            search: "logo".into(),
            status: Some(JobStatus::Aberto),
            mine: true,
        };
        assert_eq!(
            filter.query(),
            vec![
                ("search", "logo".to_string()),
                ("status", "aberto".to_string()),
                ("meus", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_draft_round_trips_existing_job() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": 1,
            "titulo": "Logo",
            "descricao": "Logo para padaria",
            "orcamento": "350.00",
            "prazo": "2026-07-01",
            "status": "aberto",
            "habilidades": ["Illustrator"],
            "cliente": 9
        }))
        .unwrap();
        let d = JobDraft::from_job(&job);
        assert_eq!(d.orcamento, "350.00");
        assert_eq!(d.prazo, "2026-07-01");
        assert_eq!(d.habilidades, "Illustrator");
    }
}

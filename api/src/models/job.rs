use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::de_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Aberto,
    EmAndamento,
    Concluido,
    Cancelado,
}

impl JobStatus {
    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Aberto => "Aberto",
            JobStatus::EmAndamento => "Em andamento",
            JobStatus::Concluido => "Concluído",
            JobStatus::Cancelado => "Cancelado",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Aberto => "aberto",
            JobStatus::EmAndamento => "em_andamento",
            JobStatus::Concluido => "concluido",
            JobStatus::Cancelado => "cancelado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    #[serde(deserialize_with = "de_decimal")]
    pub orcamento: f64,
    #[serde(default)]
    pub prazo: Option<NaiveDate>,
    pub status: JobStatus,
    #[serde(default)]
    pub habilidades: Vec<String>,
    /// URL of the uploaded attachment, if any.
    #[serde(default)]
    pub anexo: Option<String>,
    pub cliente: i64,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub data_criacao: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Aberto
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.cliente == user_id
    }
}

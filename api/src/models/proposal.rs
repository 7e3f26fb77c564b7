use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pendente,
    Aceita,
    Recusada,
}

impl ProposalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProposalStatus::Pendente => "Pendente",
            ProposalStatus::Aceita => "Aceita",
            ProposalStatus::Recusada => "Recusada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: i64,
    pub trabalho: i64,
    #[serde(default)]
    pub trabalho_titulo: Option<String>,
    pub freelancer: i64,
    #[serde(default)]
    pub freelancer_nome: Option<String>,
    pub descricao: String,
    #[serde(deserialize_with = "de_decimal")]
    pub valor: f64,
    /// Estimated delivery time in days.
    pub prazo_estimado: u32,
    pub status: ProposalStatus,
    #[serde(default)]
    pub motivo_recusa: Option<String>,
    #[serde(default)]
    pub data_envio: Option<DateTime<Utc>>,
}

impl Proposal {
    pub fn is_pending(&self) -> bool {
        self.status == ProposalStatus::Pendente
    }
}

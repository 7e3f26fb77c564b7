use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pendente,
    Aprovado,
    Recusado,
    Cancelado,
    Reembolsado,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pendente => "Pendente",
            PaymentStatus::Aprovado => "Aprovado",
            PaymentStatus::Recusado => "Recusado",
            PaymentStatus::Cancelado => "Cancelado",
            PaymentStatus::Reembolsado => "Reembolsado",
        }
    }

    /// Whether the checkout has finished and polling can stop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pendente)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub contrato: i64,
    #[serde(deserialize_with = "de_decimal")]
    pub valor: f64,
    pub status: PaymentStatus,
    /// Third-party checkout page to send the payer to.
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub data_criacao: Option<DateTime<Utc>>,
}

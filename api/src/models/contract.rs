use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Ativo,
    Concluido,
    Cancelado,
}

impl ContractStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::Ativo => "Ativo",
            ContractStatus::Concluido => "Concluído",
            ContractStatus::Cancelado => "Cancelado",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Ativo => "ativo",
            ContractStatus::Concluido => "concluido",
            ContractStatus::Cancelado => "cancelado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub trabalho: i64,
    #[serde(default)]
    pub trabalho_titulo: Option<String>,
    pub cliente: i64,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    pub freelancer: i64,
    #[serde(default)]
    pub freelancer_nome: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub valor: f64,
    pub status: ContractStatus,
    #[serde(default)]
    pub data_inicio: Option<NaiveDate>,
    #[serde(default)]
    pub data_fim: Option<NaiveDate>,
}

impl Contract {
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Ativo
    }

    pub fn involves(&self, user_id: i64) -> bool {
        self.cliente == user_id || self.freelancer == user_id
    }

    /// The other party of the contract, seen from `user_id`.
    pub fn counterpart(&self, user_id: i64) -> i64 {
        if self.cliente == user_id {
            self.freelancer
        } else {
            self.cliente
        }
    }
}

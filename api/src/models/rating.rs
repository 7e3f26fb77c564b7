use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub contrato: i64,
    pub avaliador: i64,
    #[serde(default)]
    pub avaliador_nome: Option<String>,
    pub avaliado: i64,
    #[serde(default)]
    pub avaliado_nome: Option<String>,
    /// 1 to 5.
    pub nota: u8,
    #[serde(default)]
    pub comentario: Option<String>,
    #[serde(default)]
    pub data: Option<DateTime<Utc>>,
}

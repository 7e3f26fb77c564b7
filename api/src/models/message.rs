use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub contrato: i64,
    pub remetente: i64,
    #[serde(default)]
    pub remetente_nome: Option<String>,
    pub conteudo: String,
    pub data_envio: DateTime<Utc>,
    #[serde(default)]
    pub editada: bool,
}

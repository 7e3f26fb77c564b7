use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub mensagem: String,
    pub lida: bool,
    /// In-app route the notification points at.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub data: Option<DateTime<Utc>>,
}

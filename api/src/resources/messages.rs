use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::{Listing, Message};
use crate::validation;

/// `GET /mensagens/?contrato={id}`, oldest first.
pub async fn list(client: &ApiClient, contract_id: i64) -> Result<Vec<Message>, ApiError> {
    let listing: Listing<Message> = client
        .get_with_query("/mensagens/", &[("contrato", contract_id.to_string())])
        .await?;
    let mut messages = listing.into_vec();
    messages.sort_by_key(|m| (m.data_envio, m.id));
    Ok(messages)
}

fn content(raw: &str) -> Result<&str, ApiError> {
    let mut errors = FieldErrors::new();
    validation::required(&mut errors, "conteudo", raw, "Escreva uma mensagem.");
    errors.into_result().map_err(ApiError::Invalid)?;
    Ok(raw.trim())
}

#[derive(Serialize)]
struct NewMessage<'a> {
    contrato: i64,
    conteudo: &'a str,
}

#[derive(Serialize)]
struct EditMessage<'a> {
    conteudo: &'a str,
}

/// `POST /mensagens/`
pub async fn send(client: &ApiClient, contract_id: i64, raw: &str) -> Result<Message, ApiError> {
    let conteudo = content(raw)?;
    client
        .post("/mensagens/", &NewMessage { contrato: contract_id, conteudo })
        .await
}

/// `PATCH /mensagens/{id}/`
pub async fn edit(client: &ApiClient, id: i64, raw: &str) -> Result<Message, ApiError> {
    let conteudo = content(raw)?;
    let message: Message = client
        .patch(&format!("/mensagens/{}/", id), &EditMessage { conteudo })
        .await?;
    info!("Edited message {}", id);
    Ok(message)
}

/// `DELETE /mensagens/{id}/`
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/mensagens/{}/", id)).await?;
    info!("Deleted message {}", id);
    Ok(())
}

/// Edit/delete windows for one's own messages. These only decide which
/// buttons to show, from the local clock; the server may still refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageWindows {
    pub edit: Duration,
    pub delete: Duration,
}

impl MessageWindows {
    pub fn from_secs(edit_secs: i64, delete_secs: i64) -> Self {
        Self {
            edit: Duration::seconds(edit_secs),
            delete: Duration::seconds(delete_secs),
        }
    }

    fn within(window: Duration, message: &Message, user_id: i64, now: DateTime<Utc>) -> bool {
        message.remetente == user_id && now.signed_duration_since(message.data_envio) <= window
    }

    pub fn can_edit(&self, message: &Message, user_id: i64, now: DateTime<Utc>) -> bool {
        Self::within(self.edit, message, user_id, now)
    }

    pub fn can_delete(&self, message: &Message, user_id: i64, now: DateTime<Utc>) -> bool {
        Self::within(self.delete, message, user_id, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(id: i64, remetente: i64, minute: u32) -> Message {
        Message {
            id,
            contrato: 1,
            remetente,
            remetente_nome: None,
            conteudo: format!("mensagem {}", id),
            data_envio: Utc.with_ymd_and_hms(2026, 4, 1, 10, minute, 0).unwrap(),
            editada: false,
        }
    }

    #[test]
    fn test_windows_apply_to_own_messages_only() {
        let windows = MessageWindows::from_secs(300, 600);
        let m = msg(1, 7, 0);
        let at = |minute: u32| Utc.with_ymd_and_hms(2026, 4, 1, 10, minute, 0).unwrap();

        assert!(windows.can_edit(&m, 7, at(5)));
        assert!(!windows.can_edit(&m, 7, at(6)));
        assert!(windows.can_delete(&m, 7, at(9)));
        assert!(!windows.can_delete(&m, 7, at(11)));
        assert!(!windows.can_edit(&m, 8, at(1)));
    }

    #[test]
    fn test_edit_window_closes_on_clock_alone() {
        let windows = MessageWindows::from_secs(300, 600);
        let m = msg(1, 7, 0);
        let sent = m.data_envio;
        // the same message, re-checked as the clock ticks past five minutes
        let open: Vec<bool> = [299, 300, 301]
            .into_iter()
            .map(|secs| windows.can_edit(&m, 7, sent + Duration::seconds(secs)))
            .collect();
        assert_eq!(open, vec![true, true, false]);
        assert!(windows.can_delete(&m, 7, sent + Duration::seconds(301)));
    }

    #[test]
    fn test_blank_content_rejected() {
        assert!(matches!(content("   "), Err(ApiError::Invalid(_))));
        assert_eq!(content(" oi ").unwrap(), "oi");
    }
}

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Listing, Notification};

/// `GET /notificacoes/`
pub async fn list(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    let listing: Listing<Notification> = client.get("/notificacoes/").await?;
    Ok(listing.into_vec())
}

#[derive(Serialize)]
struct ReadPayload {
    lida: bool,
}

/// `PATCH /notificacoes/{id}/` setting `lida`.
pub async fn mark_read(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .patch::<_, serde_json::Value>(&format!("/notificacoes/{}/", id), &ReadPayload { lida: true })
        .await?;
    Ok(())
}

/// Outcome of marking every unread notification.
#[derive(Debug, Default, PartialEq)]
pub struct MarkAllReport {
    pub marked: Vec<i64>,
    pub failed: Vec<(i64, ApiError)>,
}

impl MarkAllReport {
    pub fn first_error(&self) -> Option<&ApiError> {
        self.failed.first().map(|(_, e)| e)
    }
}

/// One `PATCH` per unread notification, issued together. Returns only
/// after every request has settled; callers flip local flags from the
/// report, never before.
pub async fn mark_all_read(client: &ApiClient, notifications: &[Notification]) -> MarkAllReport {
    let unread: Vec<i64> = notifications.iter().filter(|n| !n.lida).map(|n| n.id).collect();
    let results = join_all(unread.iter().map(|id| mark_read(client, *id))).await;

    let mut report = MarkAllReport::default();
    for (id, result) in unread.into_iter().zip(results) {
        match result {
            Ok(()) => report.marked.push(id),
            Err(e) => {
                warn!("Failed to mark notification {} read: {}", id, e);
                report.failed.push((id, e));
            }
        }
    }
    info!(
        "Marked {} notifications read ({} failed)",
        report.marked.len(),
        report.failed.len()
    );
    report
}

/// Flip `lida` for exactly the given ids.
pub fn apply_read(notifications: &mut [Notification], ids: &[i64]) {
    for notification in notifications.iter_mut().filter(|n| ids.contains(&n.id)) {
        notification.lida = true;
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.lida).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: i64, lida: bool) -> Notification {
        Notification {
            id,
            mensagem: format!("Notificação {}", id),
            lida,
            link: None,
            data: None,
        }
    }

    #[test]
    fn test_apply_read_touches_only_given_ids() {
        let mut list = vec![n(1, false), n(2, false), n(3, true)];
        apply_read(&mut list, &[2]);
        assert_eq!(
            list.iter().map(|x| x.lida).collect::<Vec<_>>(),
            vec![false, true, true]
        );
        assert_eq!(unread_count(&list), 1);
    }
}

use freela_api::resources::notifications;
use freela_api::PollGate;
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::hooks::{use_cancel_token, use_config, use_interval};
use crate::session::{use_api, use_session};

/// Unread count shared by the bell and the notifications page.
#[derive(Clone, Copy)]
pub struct UnreadCount(pub RwSignal<usize>);

/// Unread-notification counter, refreshed on an interval while mounted.
#[component]
pub fn NotificationBell() -> impl IntoView {
    let client = use_api();
    let config = use_config();
    let token = use_cancel_token();
    let gate = PollGate::new();
    let UnreadCount(unread) = expect_context::<UnreadCount>();
    let ctx = use_session();
    let polled_once = StoredValue::new(false);

    let refresh = move || {
        let Some(ticket) = gate.try_enter() else {
            debug!("Notification poll still running, skipping tick");
            return;
        };
        let client = client.clone();
        let token = token.clone();
        spawn_local(async move {
            if let Ok(list) = token.run(notifications::list(&client)).await {
                let count = notifications::unread_count(&list);
                let grew = count > unread.get_untracked();
                unread.set(count);
                // Warnings, suspensions and reinstatements arrive as notifications.
                if grew && polled_once.try_get_value().unwrap_or(false) {
                    let _ = ctx.refresh().await;
                }
                polled_once.try_set_value(true);
            }
            drop(ticket);
        });
    };

    refresh();
    use_interval(config.notification_poll_secs, refresh);

    view! {
        <a href="/notificacoes" class="nav-link notification-bell" title="Notificações">
            "\u{1F514}"
            <Show when=move || { unread.get() > 0 }>
                <span class="unread-count">{move || unread.get()}</span>
            </Show>
        </a>
    }
}

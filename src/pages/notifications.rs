use freela_api::format;
use freela_api::models::Notification;
use freela_api::resources::notifications;
use freela_api::{Loadable, PollGate, ViewPhase};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::notification_bell::UnreadCount;
use crate::hooks::{use_cancel_token, use_config, use_interval};
use crate::pages::{dismiss, load_error};
use crate::session::use_api;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let config = use_config();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let gate = StoredValue::new(PollGate::new());
    let inbox = RwSignal::new(Loadable::<Vec<Notification>>::pending());
    let marking_all = RwSignal::new(false);

    let refresh = move || {
        let Some(ticket) = gate.with_value(PollGate::try_enter) else {
            debug!("Notification refresh still running, skipping");
            return;
        };
        inbox.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(notifications::list(&client)).await;
            inbox.update(|s| s.resolve(result));
            drop(ticket);
        });
    };
    refresh();
    use_interval(config.notification_poll_secs, refresh);

    let mark_one = move |id: i64| {
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            match token.run(notifications::mark_read(&client, id)).await {
                Ok(()) => inbox.update(|s| s.patch(|list| notifications::apply_read(list, &[id]))),
                Err(freela_api::ApiError::Cancelled) => {}
                Err(e) => inbox.update(|s| s.set_error(e.user_message())),
            }
        });
    };

    let mark_all = move |_| {
        if marking_all.get_untracked() {
            return;
        }
        let current = inbox.with_untracked(|s| s.items());
        if notifications::unread_count(&current) == 0 {
            return;
        }
        marking_all.set(true);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let report = notifications::mark_all_read(&client, &current).await;
            if token.is_cancelled() {
                return;
            }
            inbox.update(|s| {
                s.patch(|list| notifications::apply_read(list, &report.marked));
                if let Some(e) = report.first_error() {
                    s.set_error(e.user_message());
                }
            });
            marking_all.set(false);
        });
    };

    let unread = move || inbox.with(|s| s.data().map_or(0, |list| notifications::unread_count(list)));

    let UnreadCount(badge) = expect_context::<UnreadCount>();
    Effect::new(move |_| {
        if inbox.with(|s| s.data().is_some()) {
            badge.set(unread());
        }
    });

    view! {
        <div class="page notifications-page">
            <div class="page-header">
                <h2>"Notificações"</h2>
                <button
                    class="btn btn-small"
                    on:click=mark_all
                    disabled=move || marking_all.get() || unread() == 0
                >
                    {move || if marking_all.get() { "Marcando..." } else { "Marcar todas como lidas" }}
                </button>
            </div>
            <ErrorBanner message=load_error(inbox) on_dismiss=dismiss(inbox) on_retry=Callback::new(move |_| refresh()) />
            {move || match inbox.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando notificações..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar as notificações."</p> }.into_any(),
                ViewPhase::Ready if inbox.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhuma notificação."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="notification-list">
                        {inbox
                            .with(|s| s.items())
                            .into_iter()
                            .map(|n| {
                                let id = n.id;
                                let class = if n.lida { "notification" } else { "notification notification-unread" };
                                view! {
                                    <li class=class>
                                        <div class="notification-body">
                                            {match n.link.clone() {
                                                Some(href) => view! { <a href=href>{n.mensagem.clone()}</a> }.into_any(),
                                                None => view! { <span>{n.mensagem.clone()}</span> }.into_any(),
                                            }}
                                            {n.data.map(|d| view! { <span class="muted">{format::date_time(d)}</span> })}
                                        </div>
                                        {(!n.lida).then(|| view! {
                                            <button class="btn-link" on:click=move |_| mark_one(id)>"Marcar como lida"</button>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
            }}
        </div>
    }
}

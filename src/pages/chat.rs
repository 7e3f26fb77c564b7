use chrono::Utc;
use freela_api::format;
use freela_api::models::{Contract, Message};
use freela_api::resources::messages::{self, MessageWindows};
use freela_api::resources::contracts;
use freela_api::{Loadable, PollGate, Submission, ViewPhase};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::field_error::FieldError;
use crate::hooks::{use_cancel_token, use_config, use_interval};
use crate::pages::{dismiss, field_error, load_error, route_id, submission_banner};
use crate::session::{use_api, use_session};

/// Messages of one contract, refreshed on an interval.
#[component]
pub fn ChatPage() -> impl IntoView {
    let ctx = use_session();
    let config = use_config();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let gate = StoredValue::new(PollGate::new());
    let contract_id = route_id();
    let windows = MessageWindows::from_secs(config.message_edit_window_secs, config.message_delete_window_secs);

    let contract = RwSignal::new(None::<Contract>);
    let thread = RwSignal::new(Loadable::<Vec<Message>>::pending());
    let now = RwSignal::new(Utc::now());
    let draft = RwSignal::new(String::new());
    let sending = RwSignal::new(Submission::default());
    let editing = RwSignal::new(None::<(i64, String)>);
    let action = RwSignal::new(Submission::default());

    let poll = move || {
        let Some(id) = contract_id.get_untracked() else { return };
        // A refresh would rebuild the list under the open editor.
        if editing.with_untracked(Option::is_some) {
            return;
        }
        let Some(ticket) = gate.with_value(PollGate::try_enter) else {
            debug!("Message poll still running, skipping tick");
            return;
        };
        thread.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(messages::list(&client, id)).await;
            thread.update(|s| s.resolve(result));
            drop(ticket);
        });
    };

    Effect::new(move |_| {
        let Some(id) = contract_id.get() else { return };
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            if let Ok(found) = token.run(contracts::get(&client, id)).await {
                contract.set(Some(found));
            }
        });
        poll();
    });
    use_interval(config.chat_poll_secs, poll);
    // Edit/delete buttons expire on the clock, independent of polling.
    use_interval(1, move || now.set(Utc::now()));

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = contract_id.get_untracked() else { return };
        if sending.with_untracked(|s| s.pending) {
            return;
        }
        sending.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        let text = draft.get_untracked();
        spawn_local(async move {
            match token.run(messages::send(&client, id, &text)).await {
                Ok(message) => {
                    thread.update(|s| s.patch(|list| list.push(message)));
                    draft.set(String::new());
                    sending.update(|s| s.succeed("Enviada"));
                }
                Err(e) => sending.update(|s| s.fail(e)),
            }
        });
    };

    let save_edit = move |_| {
        let Some((id, text)) = editing.get_untracked() else { return };
        action.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            match token.run(messages::edit(&client, id, &text)).await {
                Ok(updated) => {
                    thread.update(|s| {
                        s.patch(|list| {
                            if let Some(slot) = list.iter_mut().find(|m| m.id == updated.id) {
                                *slot = updated;
                            }
                        })
                    });
                    editing.set(None);
                    action.update(|s| s.succeed("Mensagem editada"));
                }
                Err(e) => action.update(|s| s.fail(e)),
            }
        });
    };

    let remove = move |id: i64| {
        if !window().confirm_with_message("Apagar esta mensagem?").unwrap_or(false) {
            return;
        }
        action.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            match messages::delete(&client, id).await {
                Ok(()) => {
                    thread.update(|s| s.patch(|list| list.retain(|m| m.id != id)));
                    action.update(|s| s.succeed("Mensagem apagada"));
                }
                Err(e) => action.update(|s| s.fail(e)),
            }
        });
    };

    let bubble = move |m: Message| {
        let user_id = ctx.user_id().unwrap_or_default();
        let class = if m.remetente == user_id { "message message-own" } else { "message" };
        let for_edit = m.clone();
        let can_edit = move || windows.can_edit(&for_edit, user_id, now.get());
        let for_delete = m.clone();
        let can_delete = move || windows.can_delete(&for_delete, user_id, now.get());
        let id = m.id;
        let author = m.remetente_nome.unwrap_or_default();
        let sent_at = format::date_time(m.data_envio);
        let edited = m.editada;
        let body = m.conteudo;
        let original = body.clone();
        let is_editing = move || editing.with(|e| e.as_ref().is_some_and(|(eid, _)| *eid == id));

        view! {
            <li class=class>
                <div class="message-meta">
                    <span class="message-author">{author}</span>
                    <span class="message-time">{sent_at}</span>
                    {edited.then(|| view! { <span class="muted">"(editada)"</span> })}
                </div>
                <Show
                    when=is_editing
                    fallback=move || view! { <p class="message-body">{body.clone()}</p> }
                >
                    <textarea
                        class="input"
                        rows="2"
                        prop:value=move || editing.with(|e| e.as_ref().map(|(_, t)| t.clone()).unwrap_or_default())
                        on:input=move |ev| editing.set(Some((id, event_target_value(&ev))))
                    ></textarea>
                    <div class="card-actions">
                        <button class="btn btn-small btn-primary" on:click=save_edit>"Salvar"</button>
                        <button class="btn btn-small" on:click=move |_| editing.set(None)>"Cancelar"</button>
                    </div>
                </Show>
                <div class="message-actions">
                    {move || can_edit().then(|| {
                        let original = original.clone();
                        view! {
                            <button class="btn-link" on:click=move |_| editing.set(Some((id, original.clone())))>"Editar"</button>
                        }
                    })}
                    {move || can_delete().then(|| view! {
                        <button class="btn-link" on:click=move |_| remove(id)>"Apagar"</button>
                    })}
                </div>
            </li>
        }
    };

    view! {
        <div class="page chat-page">
            <div class="page-header">
                <h2>
                    {move || contract.with(|c| {
                        c.as_ref()
                            .and_then(|c| c.trabalho_titulo.clone())
                            .unwrap_or_else(|| "Mensagens".to_string())
                    })}
                </h2>
                <a href="/contratos" class="btn btn-small">"Voltar"</a>
            </div>
            <ErrorBanner message=load_error(thread) on_dismiss=dismiss(thread) on_retry=Callback::new(move |_| poll()) />
            <ErrorBanner message=submission_banner(action) on_dismiss=Callback::new(move |_| action.set(Submission::default())) />

            {move || match thread.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando mensagens..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar as mensagens."</p> }.into_any(),
                ViewPhase::Ready if thread.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhuma mensagem ainda."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="message-list">
                        {thread.with(|s| s.items()).into_iter().map(bubble).collect_view()}
                    </ul>
                }
                .into_any(),
            }}

            <form class="chat-form" on:submit=on_send>
                <textarea
                    class="input"
                    rows="2"
                    placeholder="Escreva uma mensagem"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                ></textarea>
                <FieldError message=field_error(sending, "conteudo") />
                <ErrorBanner message=submission_banner(sending) />
                <button type="submit" class="btn btn-primary" disabled=move || sending.with(|s| s.pending)>"Enviar"</button>
            </form>
        </div>
    }
}

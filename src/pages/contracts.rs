use freela_api::format;
use freela_api::models::{Contract, ContractStatus};
use freela_api::resources::contracts;
use freela_api::{Loadable, Submission, ViewPhase};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, load_error, submission_banner, submission_success};
use crate::session::{use_api, use_session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Finish,
    Cancel,
}

impl Action {
    fn prompt(self) -> &'static str {
        match self {
            Action::Finish => "Marcar este contrato como concluído?",
            Action::Cancel => "Cancelar este contrato?",
        }
    }
}

#[component]
pub fn ContractsPage() -> impl IntoView {
    let ctx = use_session();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let list = RwSignal::new(Loadable::<Vec<Contract>>::pending());
    let action = RwSignal::new(Submission::default());

    let load = move || {
        list.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(contracts::list(&client)).await;
            list.update(|s| s.resolve(result));
        });
    };
    load();

    let run = move |id: i64, which: Action| {
        if action.with_untracked(|s| s.pending) {
            return;
        }
        if !window().confirm_with_message(which.prompt()).unwrap_or(false) {
            return;
        }
        action.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = match which {
                Action::Finish => token.run(contracts::finish(&client, id)).await,
                Action::Cancel => token.run(contracts::cancel(&client, id)).await,
            };
            match result {
                Ok(updated) => {
                    let message = format!("Contrato {}", updated.status.label().to_lowercase());
                    list.update(|s| {
                        s.patch(|items| {
                            if let Some(slot) = items.iter_mut().find(|c| c.id == updated.id) {
                                *slot = updated;
                            }
                        })
                    });
                    action.update(|s| s.succeed(message));
                }
                Err(e) => action.update(|s| s.fail(e)),
            }
        });
    };

    let contract_card = move |c: Contract| {
        let user_id = ctx.user_id().unwrap_or_default();
        let is_client = c.cliente == user_id;
        let active = c.is_active();
        let finished = c.status == ContractStatus::Concluido;
        let id = c.id;
        let other_name = if is_client {
            c.freelancer_nome.clone()
        } else {
            c.cliente_nome.clone()
        };
        view! {
            <li class="card contract-card">
                <div class="card-header">
                    <span class="card-title">{c.trabalho_titulo.clone().unwrap_or_else(|| format!("Contrato #{}", id))}</span>
                    <StatusBadge status=c.status />
                </div>
                <div class="card-meta">
                    <span class="budget">{format::brl(c.valor)}</span>
                    <span>{if is_client { "Freelancer: " } else { "Cliente: " }} {other_name.unwrap_or_default()}</span>
                    {c.data_inicio.map(|d| view! { <span>"Início: " {format::date(d)}</span> })}
                    {c.data_fim.map(|d| view! { <span>"Fim: " {format::date(d)}</span> })}
                </div>
                <div class="card-actions">
                    <a href=format!("/contratos/{}/chat", id) class="btn btn-small">"Mensagens"</a>
                    {(is_client && active).then(|| view! {
                        <a href=format!("/pagamentos?contrato={}", id) class="btn btn-small">"Pagar"</a>
                        <button class="btn btn-small btn-primary" on:click=move |_| run(id, Action::Finish)>"Concluir"</button>
                        <button class="btn btn-small btn-danger" on:click=move |_| run(id, Action::Cancel)>"Cancelar"</button>
                    })}
                    {finished.then(|| view! {
                        <a href=format!("/avaliacoes?contrato={}", id) class="btn btn-small">"Avaliar"</a>
                    })}
                    <a href=format!("/denuncias?usuario={}", c.counterpart(user_id)) class="link-muted">"Denunciar"</a>
                </div>
            </li>
        }
    };

    view! {
        <div class="page contracts-page">
            <h2>"Contratos"</h2>
            <ErrorBanner message=load_error(list) on_dismiss=dismiss(list) on_retry=Callback::new(move |_| load()) />
            <ErrorBanner message=submission_banner(action) on_dismiss=Callback::new(move |_| action.set(Submission::default())) />
            <SuccessNote message=submission_success(action) />
            {move || match list.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando contratos..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar os contratos."</p> }.into_any(),
                ViewPhase::Ready if list.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhum contrato por enquanto."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="card-list">
                        {list.with(|s| s.items()).into_iter().map(contract_card).collect_view()}
                    </ul>
                }
                .into_any(),
            }}
        </div>
    }
}

use freela_api::format;
use freela_api::models::Proposal;
use freela_api::resources::proposals;
use freela_api::{Loadable, ViewPhase};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, load_error};
use crate::session::use_api;

/// Proposals the signed-in freelancer has sent.
#[component]
pub fn MyProposalsPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let list = RwSignal::new(Loadable::<Vec<Proposal>>::pending());

    let load = move || {
        list.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(proposals::list_mine(&client)).await;
            list.update(|s| s.resolve(result));
        });
    };
    load();

    let withdraw = move |id: i64| {
        let confirmed = window()
            .confirm_with_message("Retirar esta proposta?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let client = api.get_value();
        spawn_local(async move {
            match proposals::withdraw(&client, id).await {
                Ok(()) => list.update(|s| s.patch(|items| items.retain(|p| p.id != id))),
                Err(e) => list.update(|s| s.set_error(e.user_message())),
            }
        });
    };

    view! {
        <div class="page proposals-page">
            <h2>"Minhas propostas"</h2>
            <ErrorBanner message=load_error(list) on_dismiss=dismiss(list) on_retry=Callback::new(move |_| load()) />
            {move || match list.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando propostas..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar suas propostas."</p> }.into_any(),
                ViewPhase::Ready if list.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Você ainda não enviou propostas."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="card-list">
                        {list
                            .with(|s| s.items())
                            .into_iter()
                            .map(|p| {
                                let id = p.id;
                                let pending = p.is_pending();
                                view! {
                                    <li class="card proposal-card">
                                        <div class="card-header">
                                            <a href=format!("/trabalhos/{}", p.trabalho) class="card-title">
                                                {p.trabalho_titulo.clone().unwrap_or_else(|| format!("Trabalho #{}", p.trabalho))}
                                            </a>
                                            <StatusBadge status=p.status />
                                        </div>
                                        <p class="card-body">{p.descricao.clone()}</p>
                                        <div class="card-meta">
                                            <span class="budget">{format::brl(p.valor)}</span>
                                            <span>{format!("{} dias", p.prazo_estimado)}</span>
                                            {p.data_envio.map(|d| view! { <span>"Enviada em " {format::date_time(d)}</span> })}
                                        </div>
                                        {p.motivo_recusa.clone().map(|m| view! { <p class="muted">"Motivo da recusa: " {m}</p> })}
                                        {pending.then(|| view! {
                                            <button class="btn btn-small" on:click=move |_| withdraw(id)>"Retirar"</button>
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

use freela_api::format;
use freela_api::models::Payment;
use freela_api::resources::payments;
use freela_api::{Loadable, PollGate, Submission, ViewPhase};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::status_badge::StatusBadge;
use crate::hooks::{use_cancel_token, use_config, use_interval};
use crate::pages::{dismiss, load_error, submission_banner, submission_success};
use crate::session::use_api;

fn open_checkout(url: &str) {
    if let Err(e) = window().open_with_url_and_target(url, "_blank") {
        warn!("Could not open checkout window: {:?}", e);
    }
}

/// Payments of the signed-in user. Pending checkouts are re-checked on an
/// interval until the provider settles them.
#[component]
pub fn PaymentsPage() -> impl IntoView {
    let config = use_config();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let gate = StoredValue::new(PollGate::new());
    let query = use_query_map();
    let contract_to_pay = Memo::new(move |_| query.read().get("contrato").and_then(|raw| raw.parse::<i64>().ok()));

    let list = RwSignal::new(Loadable::<Vec<Payment>>::pending());
    let checkout = RwSignal::new(Submission::default());

    let load = move || {
        list.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(payments::list(&client)).await;
            list.update(|s| s.resolve(result));
        });
    };
    load();

    let poll_pending = move || {
        let pending: Vec<i64> = list.with_untracked(|s| {
            s.data()
                .map(|items| items.iter().filter(|p| !p.status.is_terminal()).map(|p| p.id).collect())
                .unwrap_or_default()
        });
        if pending.is_empty() {
            return;
        }
        let Some(ticket) = gate.with_value(PollGate::try_enter) else {
            debug!("Payment poll still running, skipping tick");
            return;
        };
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            for id in pending {
                match token.run(payments::status(&client, id)).await {
                    Ok(payment) => {
                        if payment.status.is_terminal() {
                            debug!("Payment {} settled as {}", id, payment.status.label());
                        }
                        list.update(|s| s.patch(|items| payments::upsert(items, payment)));
                    }
                    Err(freela_api::ApiError::Cancelled) => break,
                    Err(e) => warn!("Payment {} status check failed: {}", id, e),
                }
            }
            drop(ticket);
        });
    };
    use_interval(config.payment_poll_secs, poll_pending);

    let start_payment = move |_| {
        let Some(contract_id) = contract_to_pay.get_untracked() else { return };
        if checkout.with_untracked(|s| s.pending) {
            return;
        }
        checkout.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            match token.run(payments::create(&client, contract_id)).await {
                Ok(payment) => {
                    if let Some(url) = payment.checkout_url.as_deref() {
                        open_checkout(url);
                    }
                    list.update(|s| s.patch(|items| payments::upsert(items, payment)));
                    checkout.update(|s| s.succeed("Pagamento criado. Conclua-o na janela do checkout."));
                }
                Err(e) => checkout.update(|s| s.fail(e)),
            }
        });
    };

    let payment_row = |p: Payment| {
        let checkout_url = p.checkout_url.clone().filter(|_| !p.status.is_terminal());
        view! {
            <tr>
                <td>{format!("#{}", p.id)}</td>
                <td>{format!("Contrato #{}", p.contrato)}</td>
                <td>{format::brl(p.valor)}</td>
                <td><StatusBadge status=p.status /></td>
                <td>{p.data_criacao.map(format::date_time).unwrap_or_default()}</td>
                <td>
                    {checkout_url.map(|url| view! {
                        <a href=url target="_blank" rel="noopener" class="btn btn-small">"Ir para o checkout"</a>
                    })}
                </td>
            </tr>
        }
    };

    view! {
        <div class="page payments-page">
            <h2>"Pagamentos"</h2>

            {move || contract_to_pay.get().map(|id| view! {
                <section class="section checkout-section">
                    <p>{format!("Gerar pagamento para o contrato #{}.", id)}</p>
                    <button class="btn btn-primary" on:click=start_payment disabled=move || checkout.with(|s| s.pending)>
                        {move || if checkout.with(|s| s.pending) { "Gerando..." } else { "Pagar agora" }}
                    </button>
                    <ErrorBanner message=submission_banner(checkout) />
                    <SuccessNote message=submission_success(checkout) />
                </section>
            })}

            <ErrorBanner message=load_error(list) on_dismiss=dismiss(list) on_retry=Callback::new(move |_| load()) />
            {move || match list.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando pagamentos..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar os pagamentos."</p> }.into_any(),
                ViewPhase::Ready if list.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhum pagamento registrado."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Pagamento"</th>
                                <th>"Contrato"</th>
                                <th>"Valor"</th>
                                <th>"Status"</th>
                                <th>"Data"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{list.with(|s| s.items()).into_iter().map(payment_row).collect_view()}</tbody>
                    </table>
                }
                .into_any(),
            }}
        </div>
    }
}

use freela_api::format;
use freela_api::models::{Contract, ContractStatus, Rating};
use freela_api::resources::ratings::{self, RatingDraft};
use freela_api::resources::contracts;
use freela_api::{Loadable, Submission, ViewPhase};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::field_error::FieldError;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, field_error, load_error, submission_banner, submission_success};
use crate::session::use_api;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Given,
    Received,
}

#[component]
pub fn RatingsPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let query = use_query_map();

    let tab = RwSignal::new(Tab::Received);
    let given = RwSignal::new(Loadable::<Vec<Rating>>::pending());
    let received = RwSignal::new(Loadable::<Vec<Rating>>::pending());
    let finished = RwSignal::new(Loadable::<Vec<Contract>>::pending());
    let draft = RwSignal::new(RatingDraft {
        nota: 5,
        ..RatingDraft::default()
    });
    let submission = RwSignal::new(Submission::default());

    // The three lists load independently; one failing leaves the others usable.
    let load = move || {
        given.update(Loadable::begin);
        received.update(Loadable::begin);
        finished.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        {
            let (client, token) = (client.clone(), token.clone());
            spawn_local(async move {
                let result = token.run(ratings::given(&client)).await;
                given.update(|s| s.resolve(result));
            });
        }
        {
            let (client, token) = (client.clone(), token.clone());
            spawn_local(async move {
                let result = token.run(ratings::received(&client)).await;
                received.update(|s| s.resolve(result));
            });
        }
        spawn_local(async move {
            let result = token
                .run(contracts::list(&client))
                .await
                .map(|all| all.into_iter().filter(|c| c.status == ContractStatus::Concluido).collect());
            finished.update(|s| s.resolve(result));
        });
    };
    load();

    let pending = Memo::new(move |_| {
        let ids: Vec<i64> = finished.with(|s| s.items().iter().map(|c| c.id).collect());
        let unrated = given.with(|s| ratings::pending_contracts(&ids, &s.items()));
        finished.with(|s| {
            s.items()
                .into_iter()
                .filter(|c| unrated.contains(&c.id))
                .collect::<Vec<_>>()
        })
    });

    // Preselect the contract from `?contrato=` once it shows up as pending.
    Effect::new(move |_| {
        let wanted = query.read().get("contrato").and_then(|raw| raw.parse::<i64>().ok());
        let available = pending.with(|list| list.iter().map(|c| c.id).collect::<Vec<_>>());
        let current = draft.with_untracked(|d| d.contrato);
        let chosen = match wanted {
            Some(id) if available.contains(&id) => id,
            _ if available.contains(&current) => current,
            _ => available.first().copied().unwrap_or_default(),
        };
        if chosen != current {
            draft.update(|d| d.contrato = chosen);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submission.with_untracked(|s| s.pending) {
            return;
        }
        submission.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        let form = draft.get_untracked();
        spawn_local(async move {
            match token.run(ratings::create(&client, &form)).await {
                Ok(rating) => {
                    given.update(|s| s.patch(|list| list.insert(0, rating)));
                    draft.update(|d| {
                        d.comentario.clear();
                        d.nota = 5;
                    });
                    submission.update(|s| s.succeed("Avaliação enviada"));
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    };

    let rating_row = move |r: Rating| {
        let who = match tab.get_untracked() {
            Tab::Given => r.avaliado_nome.clone().unwrap_or_else(|| format!("Usuário #{}", r.avaliado)),
            Tab::Received => r.avaliador_nome.clone().unwrap_or_else(|| format!("Usuário #{}", r.avaliador)),
        };
        view! {
            <li class="card rating-card">
                <div class="card-header">
                    <span class="card-title">{who}</span>
                    <span class="stars" title=format!("{} de 5", r.nota)>{format::stars(r.nota)}</span>
                </div>
                {r.comentario.clone().map(|c| view! { <p class="card-body">{c}</p> })}
                <div class="card-meta">
                    <span>{format!("Contrato #{}", r.contrato)}</span>
                    {r.data.map(|d| view! { <span>{format::date_time(d)}</span> })}
                </div>
            </li>
        }
    };

    let current = move || match tab.get() {
        Tab::Given => given,
        Tab::Received => received,
    };

    view! {
        <div class="page ratings-page">
            <h2>"Avaliações"</h2>
            {move || {
                received
                    .with(|s| format::average_score(s.items().iter().map(|r| r.nota)))
                    .map(|avg| view! { <p class="average">{format!("Sua média: {:.1} de 5", avg).replace('.', ",")}</p> })
            }}

            <Show when=move || pending.with(|p| !p.is_empty())>
                <section class="section">
                    <h3>"Avaliar contrato concluído"</h3>
                    <form class="form" on:submit=on_submit>
                        <div class="form-group">
                            <label for="rating-contrato">"Contrato"</label>
                            <select
                                id="rating-contrato"
                                class="input"
                                on:change=move |ev| {
                                    let id = event_target_value(&ev).parse::<i64>().unwrap_or_default();
                                    draft.update(|d| d.contrato = id);
                                }
                            >
                                {move || pending
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let id = c.id;
                                        view! {
                                            <option value=id.to_string() selected=move || draft.with(|d| d.contrato == id)>
                                                {c.trabalho_titulo.clone().unwrap_or_else(|| format!("Contrato #{}", id))}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-group">
                            <label for="rating-nota">"Nota"</label>
                            <select
                                id="rating-nota"
                                class="input"
                                on:change=move |ev| {
                                    let nota = event_target_value(&ev).parse::<u8>().unwrap_or_default();
                                    draft.update(|d| d.nota = nota);
                                }
                            >
                                {(1..=5u8)
                                    .rev()
                                    .map(|n| view! {
                                        <option value=n.to_string() selected=move || draft.with(|d| d.nota == n)>
                                            {format::stars(n)}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                            <FieldError message=field_error(submission, "nota") />
                        </div>
                        <div class="form-group">
                            <label for="rating-comentario">"Comentário (opcional)"</label>
                            <textarea
                                id="rating-comentario"
                                class="input"
                                rows="3"
                                prop:value=move || draft.with(|d| d.comentario.clone())
                                on:input=move |ev| draft.update(|d| d.comentario = event_target_value(&ev))
                            ></textarea>
                        </div>
                        <ErrorBanner message=submission_banner(submission) />
                        <SuccessNote message=submission_success(submission) />
                        <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                            "Enviar avaliação"
                        </button>
                    </form>
                </section>
            </Show>

            <div class="tabs">
                <button
                    class=move || if tab.get() == Tab::Received { "tab tab-active" } else { "tab" }
                    on:click=move |_| tab.set(Tab::Received)
                >
                    "Recebidas"
                </button>
                <button
                    class=move || if tab.get() == Tab::Given { "tab tab-active" } else { "tab" }
                    on:click=move |_| tab.set(Tab::Given)
                >
                    "Feitas"
                </button>
            </div>

            {move || {
                let state = current();
                view! {
                    <ErrorBanner message=load_error(state) on_dismiss=dismiss(state) on_retry=Callback::new(move |_| load()) />
                }
            }}
            {move || {
                let state = current();
                match state.with(Loadable::phase) {
                    ViewPhase::Loading => view! { <p class="loading">"Carregando avaliações..."</p> }.into_any(),
                    ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar as avaliações."</p> }.into_any(),
                    ViewPhase::Ready if state.with(|s| s.is_empty()) => {
                        view! { <p class="empty">"Nenhuma avaliação."</p> }.into_any()
                    }
                    ViewPhase::Ready => view! {
                        <ul class="card-list">
                            {state.with(|s| s.items()).into_iter().map(rating_row).collect_view()}
                        </ul>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

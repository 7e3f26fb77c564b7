use freela_api::format;
use freela_api::models::{Job, JobStatus};
use freela_api::resources::jobs::{self, JobFilter};
use freela_api::{Loadable, ViewPhase};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, load_error};
use crate::session::{use_api, use_session};

const STATUS_FILTERS: [JobStatus; 4] = [
    JobStatus::Aberto,
    JobStatus::EmAndamento,
    JobStatus::Concluido,
    JobStatus::Cancelado,
];

/// Job board: open jobs by default, with text search and a status filter.
/// Clients can narrow it to their own postings.
#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_session();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let filter = RwSignal::new(JobFilter {
        status: Some(JobStatus::Aberto),
        ..JobFilter::default()
    });
    let jobs = RwSignal::new(Loadable::<Vec<Job>>::pending());
    let is_client = move || ctx.session.with(|s| s.user.as_ref().is_some_and(|u| u.is_client()));

    let load = move || {
        jobs.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        let filter = filter.get_untracked();
        spawn_local(async move {
            let result = token.run(jobs::list(&client, &filter)).await;
            jobs.update(|s| s.resolve(result));
        });
    };
    load();

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load();
    };

    let job_card = |job: Job| {
        let href = format!("/trabalhos/{}", job.id);
        view! {
            <li class="card job-card">
                <div class="card-header">
                    <a href=href class="card-title">{job.titulo.clone()}</a>
                    <StatusBadge status=job.status />
                </div>
                <p class="card-body">{job.descricao.clone()}</p>
                <div class="card-meta">
                    <span class="budget">{format::brl(job.orcamento)}</span>
                    {job.prazo.map(|d| view! { <span>"Prazo: " {format::date(d)}</span> })}
                    {job.cliente_nome.clone().map(|n| view! { <span>"Cliente: " {n}</span> })}
                </div>
                <div class="tags">
                    {job.habilidades.iter().map(|h| view! { <span class="tag">{h.clone()}</span> }).collect_view()}
                </div>
            </li>
        }
    };

    view! {
        <div class="page home-page">
            <div class="page-header">
                <h2>"Trabalhos"</h2>
                <Show when=is_client>
                    <a href="/trabalhos/novo" class="btn btn-primary">"Publicar trabalho"</a>
                </Show>
            </div>

            <form class="filter-bar" on:submit=on_search>
                <input
                    type="search"
                    class="input"
                    placeholder="Buscar por título, descrição ou habilidade"
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="input"
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        filter.update(|f| f.status = STATUS_FILTERS.into_iter().find(|s| s.as_str() == raw));
                        load();
                    }
                >
                    <option value="" selected=move || filter.with(|f| f.status.is_none())>"Todos"</option>
                    {STATUS_FILTERS
                        .into_iter()
                        .map(|status| view! {
                            <option
                                value=status.as_str()
                                selected=move || filter.with(|f| f.status == Some(status))
                            >
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <Show when=is_client>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || filter.with(|f| f.mine)
                            on:change=move |ev| {
                                filter.update(|f| f.mine = event_target_checked(&ev));
                                load();
                            }
                        />
                        "Somente meus trabalhos"
                    </label>
                </Show>
                <button type="submit" class="btn">"Buscar"</button>
            </form>

            <ErrorBanner
                message=load_error(jobs)
                on_dismiss=dismiss(jobs)
                on_retry=Callback::new(move |_| load())
            />

            {move || match jobs.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando trabalhos..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar os trabalhos."</p> }.into_any(),
                ViewPhase::Ready if jobs.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhum trabalho encontrado."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="card-list">
                        {jobs.with(|s| s.items()).into_iter().map(job_card).collect_view()}
                    </ul>
                }
                .into_any(),
            }}
        </div>
    }
}

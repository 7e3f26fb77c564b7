use freela_api::format;
use freela_api::models::{Report, ReportKind};
use freela_api::resources::reports::{self, ReportDraft, ReportFilter};
use freela_api::{Loadable, Submission, ViewPhase};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::field_error::FieldError;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, field_error, load_error, submission_banner, submission_success};
use crate::session::use_api;

/// File a report against another user and follow the ones already filed.
#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let query = use_query_map();
    let draft = RwSignal::new(ReportDraft::default());
    let submission = RwSignal::new(Submission::default());
    let filed = RwSignal::new(Loadable::<Vec<Report>>::pending());

    Effect::new(move |_| {
        if let Some(id) = query.read().get("usuario").and_then(|raw| raw.parse::<i64>().ok()) {
            draft.update(|d| d.denunciado = id);
        }
    });

    let load = move || {
        filed.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(reports::list(&client, &ReportFilter::default())).await;
            filed.update(|s| s.resolve(result));
        });
    };
    load();

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
            match token.run(reports::create(&client, &form)).await {
                Ok(report) => {
                    filed.update(|s| s.patch(|list| list.insert(0, report)));
                    draft.update(|d| {
                        d.tipo = None;
                        d.motivo.clear();
                    });
                    submission.update(|s| s.succeed("Denúncia enviada. A equipe de moderação vai analisá-la."));
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    };

    view! {
        <div class="page reports-page">
            <h2>"Denúncias"</h2>
            <section class="section">
                <h3>"Nova denúncia"</h3>
                <form class="form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="report-denunciado">"ID do usuário denunciado"</label>
                        <input
                            id="report-denunciado"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || draft.with(|d| if d.denunciado > 0 { d.denunciado.to_string() } else { String::new() })
                            on:input=move |ev| {
                                let id = event_target_value(&ev).trim().parse::<i64>().unwrap_or_default();
                                draft.update(|d| d.denunciado = id);
                            }
                        />
                        <FieldError message=field_error(submission, "denunciado") />
                    </div>
                    <div class="form-group">
                        <label for="report-tipo">"Tipo"</label>
                        <select
                            id="report-tipo"
                            class="input"
                            on:change=move |ev| {
                                let kind = ReportKind::parse(&event_target_value(&ev));
                                draft.update(|d| d.tipo = kind);
                            }
                        >
                            <option value="" selected=move || draft.with(|d| d.tipo.is_none())>"Selecione"</option>
                            {ReportKind::ALL
                                .into_iter()
                                .map(|kind| view! {
                                    <option value=kind.as_str() selected=move || draft.with(|d| d.tipo == Some(kind))>
                                        {kind.label()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                        <FieldError message=field_error(submission, "tipo") />
                    </div>
                    <div class="form-group">
                        <label for="report-motivo">"Motivo"</label>
                        <textarea
                            id="report-motivo"
                            class="input"
                            rows="4"
                            prop:value=move || draft.with(|d| d.motivo.clone())
                            on:input=move |ev| draft.update(|d| d.motivo = event_target_value(&ev))
                        ></textarea>
                        <FieldError message=field_error(submission, "motivo") />
                    </div>
                    <ErrorBanner message=submission_banner(submission) />
                    <SuccessNote message=submission_success(submission) />
                    <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                        "Enviar denúncia"
                    </button>
                </form>
            </section>

            <section class="section">
                <h3>"Minhas denúncias"</h3>
                <ErrorBanner message=load_error(filed) on_dismiss=dismiss(filed) on_retry=Callback::new(move |_| load()) />
                {move || match filed.with(Loadable::phase) {
                    ViewPhase::Loading => view! { <p class="loading">"Carregando denúncias..."</p> }.into_any(),
                    ViewPhase::Failed => ().into_any(),
                    ViewPhase::Ready if filed.with(|s| s.is_empty()) => {
                        view! { <p class="empty">"Você não registrou denúncias."</p> }.into_any()
                    }
                    ViewPhase::Ready => view! {
                        <ul class="card-list">
                            {filed
                                .with(|s| s.items())
                                .into_iter()
                                .map(|r| view! {
                                    <li class="card report-card">
                                        <div class="card-header">
                                            <span class="card-title">
                                                {r.denunciado_nome.clone().unwrap_or_else(|| format!("Usuário #{}", r.denunciado))}
                                            </span>
                                            <StatusBadge status=r.status />
                                        </div>
                                        <div class="card-meta">
                                            <span>{r.tipo.label()}</span>
                                            {r.data_criacao.map(|d| view! { <span>{format::date_time(d)}</span> })}
                                        </div>
                                        <p class="card-body">{r.motivo.clone()}</p>
                                        {r.resposta_admin.clone().map(|a| view! { <p class="admin-answer">"Resposta: " {a}</p> })}
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                }}
            </section>
        </div>
    }
}

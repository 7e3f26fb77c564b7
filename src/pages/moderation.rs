use freela_api::format;
use freela_api::models::{PunishmentKind, Report, ReportKind, ReportStatus};
use freela_api::resources::reports::{self, AdminResponse, Punishment, ReportFilter};
use freela_api::{Loadable, Submission, ViewPhase};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::field_error::FieldError;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, field_error, load_error, submission_banner, submission_success};
use crate::session::{use_api, use_session};

/// Admin queue of reports: filter, answer, punish or lift a punishment.
#[component]
pub fn ModerationPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let filter = RwSignal::new(ReportFilter {
        status: Some(ReportStatus::Pendente),
        tipo: None,
    });
    let queue = RwSignal::new(Loadable::<Vec<Report>>::pending());

    let load = move || {
        queue.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        let filter = filter.get_untracked();
        spawn_local(async move {
            let result = token.run(reports::list(&client, &filter)).await;
            queue.update(|s| s.resolve(result));
        });
    };
    load();

    let on_updated = Callback::new(move |report: Report| {
        let active = filter.get_untracked();
        queue.update(|s| s.patch(|list| reports::replace(list, report, &active)));
    });

    view! {
        <div class="page moderation-page">
            <h2>"Moderação"</h2>
            <div class="filter-bar">
                <select
                    class="input"
                    on:change=move |ev| {
                        let status = ReportStatus::parse(&event_target_value(&ev));
                        filter.update(|f| f.status = status);
                        load();
                    }
                >
                    <option value="" selected=move || filter.with(|f| f.status.is_none())>"Todos os status"</option>
                    {ReportStatus::ALL
                        .into_iter()
                        .map(|status| view! {
                            <option value=status.as_str() selected=move || filter.with(|f| f.status == Some(status))>
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <select
                    class="input"
                    on:change=move |ev| {
                        let kind = ReportKind::parse(&event_target_value(&ev));
                        filter.update(|f| f.tipo = kind);
                        load();
                    }
                >
                    <option value="" selected=move || filter.with(|f| f.tipo.is_none())>"Todos os tipos"</option>
                    {ReportKind::ALL
                        .into_iter()
                        .map(|kind| view! {
                            <option value=kind.as_str() selected=move || filter.with(|f| f.tipo == Some(kind))>
                                {kind.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>

            <ErrorBanner message=load_error(queue) on_dismiss=dismiss(queue) on_retry=Callback::new(move |_| load()) />
            {move || match queue.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando denúncias..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Não foi possível carregar as denúncias."</p> }.into_any(),
                ViewPhase::Ready if queue.with(|s| s.is_empty()) => {
                    view! { <p class="empty">"Nenhuma denúncia com esses filtros."</p> }.into_any()
                }
                ViewPhase::Ready => view! {
                    <ul class="card-list">
                        {queue
                            .with(|s| s.items())
                            .into_iter()
                            .map(|report| view! { <ModerationCard report=report on_updated=on_updated /> })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn ModerationCard(report: Report, on_updated: Callback<Report>) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let ctx = use_session();
    let accused = report.denunciado;
    let id = report.id;
    let answer = RwSignal::new(AdminResponse {
        status: if report.is_open() { ReportStatus::Resolvida } else { report.status },
        resposta: report.resposta_admin.clone().unwrap_or_default(),
    });
    let punishment = RwSignal::new(PunishmentKind::Advertencia);
    let days = RwSignal::new(String::from("7"));
    let outcome = RwSignal::new(Submission::default());

    let finish = move |result: Result<Report, freela_api::ApiError>, message: &'static str| match result {
        Ok(updated) => {
            outcome.update(|s| s.succeed(message));
            on_updated.run(updated);
        }
        Err(e) => outcome.update(|s| s.fail(e)),
    };

    let respond = move |_| {
        if outcome.with_untracked(|s| s.pending) {
            return;
        }
        outcome.update(Submission::start);
        let client = api.get_value();
        let response = answer.get_untracked();
        spawn_local(async move {
            finish(reports::respond(&client, id, &response).await, "Resposta registrada");
        });
    };

    let punish = move |_| {
        if outcome.with_untracked(|s| s.pending) {
            return;
        }
        let chosen = match punishment.get_untracked() {
            PunishmentKind::Advertencia => Punishment::Warning,
            PunishmentKind::Suspensao => Punishment::Suspension {
                days: days.with_untracked(|d| d.trim().parse::<u32>().unwrap_or(0)),
            },
            PunishmentKind::Banimento => Punishment::Ban,
        };
        if chosen == Punishment::Ban
            && !window()
                .confirm_with_message("Banir este usuário da plataforma?")
                .unwrap_or(false)
        {
            return;
        }
        outcome.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            finish(reports::apply_punishment(&client, id, chosen).await, "Punição aplicada");
            ctx.refresh_if_current(accused).await;
        });
    };

    let undo = move |_| {
        if outcome.with_untracked(|s| s.pending) {
            return;
        }
        outcome.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            finish(reports::undo_punishment(&client, id).await, "Punição removida");
            ctx.refresh_if_current(accused).await;
        });
    };

    let in_force = report.punicao_aplicada;

    view! {
        <li class="card moderation-card">
            <div class="card-header">
                <span class="card-title">
                    {report.denunciado_nome.clone().unwrap_or_else(|| format!("Usuário #{}", report.denunciado))}
                </span>
                <StatusBadge status=report.status />
            </div>
            <div class="card-meta">
                <span>{report.tipo.label()}</span>
                <span>
                    "Por: "
                    {report.denunciante_nome.clone().unwrap_or_else(|| format!("Usuário #{}", report.denunciante))}
                </span>
                {report.data_criacao.map(|d| view! { <span>{format::date_time(d)}</span> })}
            </div>
            <p class="card-body">{report.motivo.clone()}</p>

            <div class="form-group">
                <label>"Resposta"</label>
                <textarea
                    class="input"
                    rows="2"
                    prop:value=move || answer.with(|a| a.resposta.clone())
                    on:input=move |ev| answer.update(|a| a.resposta = event_target_value(&ev))
                ></textarea>
                <FieldError message=field_error(outcome, "resposta_admin") />
                <div class="input-row">
                    <select
                        class="input"
                        on:change=move |ev| {
                            if let Some(status) = ReportStatus::parse(&event_target_value(&ev)) {
                                answer.update(|a| a.status = status);
                            }
                        }
                    >
                        {ReportStatus::ALL
                            .into_iter()
                            .map(|status| view! {
                                <option value=status.as_str() selected=move || answer.with(|a| a.status == status)>
                                    {status.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                    <button class="btn btn-small" on:click=respond>"Responder"</button>
                </div>
            </div>

            {match in_force {
                Some(kind) => view! {
                    <div class="punishment">
                        <span>"Punição em vigor: " {kind.label()}</span>
                        <button class="btn btn-small" on:click=undo>"Remover punição"</button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="punishment input-row">
                        <select
                            class="input"
                            on:change=move |ev| {
                                let kind = match event_target_value(&ev).as_str() {
                                    "suspensao" => PunishmentKind::Suspensao,
                                    "banimento" => PunishmentKind::Banimento,
                                    _ => PunishmentKind::Advertencia,
                                };
                                punishment.set(kind);
                            }
                        >
                            {[PunishmentKind::Advertencia, PunishmentKind::Suspensao, PunishmentKind::Banimento]
                                .into_iter()
                                .map(|kind| view! {
                                    <option value=kind.as_str() selected=move || punishment.get() == kind>
                                        {kind.label()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                        <Show when=move || punishment.get() == PunishmentKind::Suspensao>
                            <input
                                type="number"
                                min="1"
                                class="input input-narrow"
                                title="Dias de suspensão"
                                prop:value=move || days.get()
                                on:input=move |ev| days.set(event_target_value(&ev))
                            />
                        </Show>
                        <button class="btn btn-small btn-danger" on:click=punish>"Aplicar punição"</button>
                    </div>
                    <FieldError message=field_error(outcome, "dias") />
                }
                .into_any(),
            }}

            <ErrorBanner message=submission_banner(outcome) />
            <SuccessNote message=submission_success(outcome) />
        </li>
    }
}

use freela_api::format;
use freela_api::models::{Job, Proposal};
use freela_api::resources::jobs;
use freela_api::resources::proposals::{self, Decision, ProposalDraft};
use freela_api::{Loadable, Submission, ViewPhase};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::field_error::FieldError;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_cancel_token;
use crate::pages::{dismiss, field_error, load_error, route_id, submission_banner, submission_success};
use crate::session::{use_api, use_session};

#[component]
pub fn JobDetailPage() -> impl IntoView {
    let ctx = use_session();
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let job_id = route_id();
    let job = RwSignal::new(Loadable::<Job>::pending());
    let proposals = RwSignal::new(Loadable::<Vec<Proposal>>::pending());
    let removal = RwSignal::new(Submission::default());
    let deleted = RwSignal::new(false);

    let load_proposals = move |id: i64| {
        proposals.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(proposals::list_for_job(&client, id)).await;
            proposals.update(|s| s.resolve(result));
        });
    };

    let load = move || {
        let Some(id) = job_id.get_untracked() else {
            job.update(|s| s.resolve(Err(freela_api::ApiError::Invalid(
                freela_api::FieldErrors::general_message("Trabalho não encontrado."),
            ))));
            return;
        };
        job.update(Loadable::begin);
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            let result = token.run(jobs::get(&client, id)).await;
            let owned = match (&result, ctx.user_id()) {
                (Ok(found), Some(user_id)) => found.is_owned_by(user_id),
                _ => false,
            };
            job.update(|s| s.resolve(result));
            if owned {
                load_proposals(id);
            }
        });
    };

    Effect::new(move |_| {
        job_id.track();
        load();
    });

    let is_owner = move || {
        let user_id = ctx.user_id();
        job.with(|s| s.data().zip(user_id).is_some_and(|(j, uid)| j.is_owned_by(uid)))
    };
    let can_propose = move || {
        let freelancer = ctx.session.with(|s| s.user.as_ref().is_some_and(|u| u.is_freelancer()));
        freelancer && job.with(|s| s.data().is_some_and(Job::is_open))
    };

    let delete_job = move |_| {
        let Some(id) = job_id.get_untracked() else { return };
        let confirmed = window()
            .confirm_with_message("Excluir este trabalho? Esta ação não pode ser desfeita.")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        removal.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            match jobs::delete(&client, id).await {
                Ok(()) => deleted.set(true),
                Err(e) => removal.update(|s| s.fail(e)),
            }
        });
    };

    let on_decided = Callback::new(move |updated: Proposal| {
        let accepted = updated.status == freela_api::models::ProposalStatus::Aceita;
        proposals.update(|s| s.patch(|list| proposals::replace(list, updated)));
        // Accepting closes the job and settles the other proposals server-side.
        if accepted {
            load();
        }
    });

    view! {
        <div class="page job-detail-page">
            {move || deleted.get().then(|| view! { <Redirect path="/" /> })}
            <ErrorBanner message=load_error(job) on_dismiss=dismiss(job) on_retry=Callback::new(move |_| load()) />
            {move || match job.with(Loadable::phase) {
                ViewPhase::Loading => view! { <p class="loading">"Carregando trabalho..."</p> }.into_any(),
                ViewPhase::Failed => view! { <p class="empty">"Trabalho indisponível."</p> }.into_any(),
                ViewPhase::Ready => job.with(|s| s.data().cloned()).map(|j| view! { <JobSummary job=j /> }).into_any(),
            }}

            <Show when=is_owner>
                <div class="owner-actions">
                    <a href=move || format!("/trabalhos/{}/editar", job_id.get().unwrap_or_default()) class="btn">"Editar"</a>
                    <button class="btn btn-danger" on:click=delete_job disabled=move || removal.with(|s| s.pending)>"Excluir"</button>
                </div>
                <ErrorBanner message=submission_banner(removal) />

                <section class="section">
                    <h3>"Propostas recebidas"</h3>
                    <ErrorBanner
                        message=load_error(proposals)
                        on_dismiss=dismiss(proposals)
                        on_retry=Callback::new(move |_| {
                            if let Some(id) = job_id.get_untracked() {
                                load_proposals(id);
                            }
                        })
                    />
                    {move || match proposals.with(Loadable::phase) {
                        ViewPhase::Loading => view! { <p class="loading">"Carregando propostas..."</p> }.into_any(),
                        ViewPhase::Failed => ().into_any(),
                        ViewPhase::Ready if proposals.with(|s| s.is_empty()) => {
                            view! { <p class="empty">"Nenhuma proposta ainda."</p> }.into_any()
                        }
                        ViewPhase::Ready => view! {
                            <ul class="card-list">
                                {proposals
                                    .with(|s| s.items())
                                    .into_iter()
                                    .map(|p| view! { <ProposalReview proposal=p on_decided=on_decided /> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any(),
                    }}
                </section>
            </Show>

            <Show when=can_propose>
                <ProposalForm job_id=Signal::derive(move || job_id.get().unwrap_or_default()) />
            </Show>
        </div>
    }
}

#[component]
fn JobSummary(job: Job) -> impl IntoView {
    let report_href = format!("/denuncias?usuario={}", job.cliente);
    view! {
        <article class="job-summary">
            <div class="page-header">
                <h2>{job.titulo.clone()}</h2>
                <StatusBadge status=job.status />
            </div>
            <p class="job-description">{job.descricao.clone()}</p>
            <dl class="details">
                <dt>"Orçamento"</dt>
                <dd>{format::brl(job.orcamento)}</dd>
                <dt>"Prazo"</dt>
                <dd>{job.prazo.map(format::date).unwrap_or_else(|| "Não informado".to_string())}</dd>
                <dt>"Cliente"</dt>
                <dd>{job.cliente_nome.clone().unwrap_or_default()}</dd>
            </dl>
            <div class="tags">
                {job.habilidades.iter().map(|h| view! { <span class="tag">{h.clone()}</span> }).collect_view()}
            </div>
            {job.anexo.clone().map(|url| view! {
                <a href=url target="_blank" rel="noopener" class="attachment-link">"Ver anexo"</a>
            })}
            <a href=report_href class="link-muted">"Denunciar cliente"</a>
        </article>
    }
}

/// One received proposal with accept / reject controls while pending.
#[component]
fn ProposalReview(proposal: Proposal, on_decided: Callback<Proposal>) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let id = proposal.id;
    let pending = proposal.is_pending();
    let rejecting = RwSignal::new(false);
    let reason = RwSignal::new(String::new());
    let decision = RwSignal::new(Submission::default());

    let decide = move |choice: Decision| {
        if decision.with_untracked(|s| s.pending) {
            return;
        }
        decision.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            match proposals::decide(&client, id, &choice).await {
                Ok(updated) => {
                    decision.update(|s| s.succeed(format!("Proposta {}", updated.status.label().to_lowercase())));
                    on_decided.run(updated);
                }
                Err(e) => decision.update(|s| s.fail(e)),
            }
        });
    };

    view! {
        <li class="card proposal-card">
            <div class="card-header">
                <span class="card-title">{proposal.freelancer_nome.clone().unwrap_or_else(|| format!("Freelancer #{}", proposal.freelancer))}</span>
                <StatusBadge status=proposal.status />
            </div>
            <p class="card-body">{proposal.descricao.clone()}</p>
            <div class="card-meta">
                <span class="budget">{format::brl(proposal.valor)}</span>
                <span>{format!("{} dias", proposal.prazo_estimado)}</span>
            </div>
            {proposal.motivo_recusa.clone().map(|m| view! { <p class="muted">"Motivo da recusa: " {m}</p> })}

            <Show when=move || pending>
                <div class="card-actions">
                    <button
                        class="btn btn-primary"
                        disabled=move || decision.with(|s| s.pending)
                        on:click=move |_| decide(Decision::Accept)
                    >
                        "Aceitar"
                    </button>
                    <button class="btn" on:click=move |_| rejecting.update(|r| *r = !*r)>"Recusar"</button>
                </div>
                <Show when=move || rejecting.get()>
                    <div class="form-group">
                        <label>"Motivo da recusa (mínimo 20 caracteres)"</label>
                        <textarea
                            class="input"
                            rows="3"
                            prop:value=move || reason.get()
                            on:input=move |ev| reason.set(event_target_value(&ev))
                        ></textarea>
                        <FieldError message=field_error(decision, "motivo_recusa") />
                        <button
                            class="btn btn-danger"
                            disabled=move || decision.with(|s| s.pending)
                            on:click=move |_| decide(Decision::Reject(reason.get_untracked()))
                        >
                            "Confirmar recusa"
                        </button>
                    </div>
                </Show>
            </Show>
            <ErrorBanner message=submission_banner(decision) />
            <SuccessNote message=submission_success(decision) />
        </li>
    }
}

/// Freelancer's proposal for an open job.
#[component]
fn ProposalForm(#[prop(into)] job_id: Signal<i64>) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let draft = RwSignal::new(ProposalDraft::default());
    let submission = RwSignal::new(Submission::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submission.with_untracked(|s| s.pending) {
            return;
        }
        submission.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        let form = draft.get_untracked();
        let id = job_id.get_untracked();
        spawn_local(async move {
            match token.run(proposals::create(&client, id, &form)).await {
                Ok(_) => {
                    draft.set(ProposalDraft::default());
                    submission.update(|s| s.succeed("Proposta enviada"));
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    };

    view! {
        <section class="section">
            <h3>"Enviar proposta"</h3>
            <form class="form" on:submit=on_submit>
                <div class="form-group">
                    <label for="proposal-descricao">"Descrição"</label>
                    <textarea
                        id="proposal-descricao"
                        class="input"
                        rows="4"
                        prop:value=move || draft.with(|d| d.descricao.clone())
                        on:input=move |ev| draft.update(|d| d.descricao = event_target_value(&ev))
                    ></textarea>
                    <FieldError message=field_error(submission, "descricao") />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="proposal-valor">"Valor (R$)"</label>
                        <input
                            id="proposal-valor"
                            type="text"
                            inputmode="decimal"
                            class="input"
                            prop:value=move || draft.with(|d| d.valor.clone())
                            on:input=move |ev| draft.update(|d| d.valor = event_target_value(&ev))
                        />
                        <FieldError message=field_error(submission, "valor") />
                    </div>
                    <div class="form-group">
                        <label for="proposal-prazo">"Prazo estimado (dias)"</label>
                        <input
                            id="proposal-prazo"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || draft.with(|d| d.prazo_estimado.clone())
                            on:input=move |ev| draft.update(|d| d.prazo_estimado = event_target_value(&ev))
                        />
                        <FieldError message=field_error(submission, "prazo_estimado") />
                    </div>
                </div>
                <ErrorBanner message=submission_banner(submission) />
                <SuccessNote message=submission_success(submission) />
                <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                    "Enviar proposta"
                </button>
            </form>
        </section>
    }
}

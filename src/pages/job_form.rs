use freela_api::models::Job;
use freela_api::resources::jobs::{self, JobDraft};
use freela_api::{Attachment, Submission};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::field_error::FieldError;
use crate::hooks::use_cancel_token;
use crate::pages::{field_error, route_id, submission_banner, today};
use crate::session::use_api;
use crate::upload::{read_attachment, selected_file};

/// Create a job, or edit one when the route carries an id.
#[component]
pub fn JobFormPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let token = StoredValue::new(use_cancel_token());
    let navigate = use_navigate();
    let job_id = route_id();
    let draft = RwSignal::new(JobDraft::default());
    let existing = RwSignal::new(None::<Job>);
    let attachment = RwSignal::new(None::<Attachment>);
    let submission = RwSignal::new(Submission::default());

    Effect::new(move |_| {
        let Some(id) = job_id.get() else { return };
        let client = api.get_value();
        let token = token.get_value();
        spawn_local(async move {
            match token.run(jobs::get(&client, id)).await {
                Ok(job) => {
                    draft.set(JobDraft::from_job(&job));
                    existing.set(Some(job));
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    });

    let on_file = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            attachment.set(None);
            return;
        };
        spawn_local(async move {
            match read_attachment(file).await {
                Ok(file) => attachment.set(Some(file)),
                Err(message) => submission.update(|s| s.fail(freela_api::ApiError::Network(message))),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submission.with_untracked(|s| s.pending) {
            return;
        }
        submission.update(Submission::start);
        let client = api.get_value();
        let token = token.get_value();
        let navigate = navigate.clone();
        let form = draft.get_untracked();
        let file = attachment.get_untracked();
        let id = job_id.get_untracked();
        spawn_local(async move {
            let result = match id {
                Some(id) => token.run(jobs::update(&client, id, &form, file, today())).await,
                None => token.run(jobs::create(&client, &form, file, today())).await,
            };
            match result {
                Ok(job) => {
                    submission.update(|s| s.succeed("Trabalho salvo"));
                    navigate(&format!("/trabalhos/{}", job.id), Default::default());
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    };

    let title = move || if job_id.get().is_some() { "Editar trabalho" } else { "Publicar trabalho" };

    view! {
        <div class="page job-form-page">
            <h2>{title}</h2>
            <form class="form" on:submit=on_submit>
                <div class="form-group">
                    <label for="job-titulo">"Título"</label>
                    <input
                        id="job-titulo"
                        type="text"
                        class="input"
                        prop:value=move || draft.with(|d| d.titulo.clone())
                        on:input=move |ev| draft.update(|d| d.titulo = event_target_value(&ev))
                    />
                    <FieldError message=field_error(submission, "titulo") />
                </div>
                <div class="form-group">
                    <label for="job-descricao">"Descrição"</label>
                    <textarea
                        id="job-descricao"
                        class="input"
                        rows="6"
                        prop:value=move || draft.with(|d| d.descricao.clone())
                        on:input=move |ev| draft.update(|d| d.descricao = event_target_value(&ev))
                    ></textarea>
                    <FieldError message=field_error(submission, "descricao") />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="job-orcamento">"Orçamento (R$)"</label>
                        <input
                            id="job-orcamento"
                            type="text"
                            inputmode="decimal"
                            class="input"
                            placeholder="1.500,00"
                            prop:value=move || draft.with(|d| d.orcamento.clone())
                            on:input=move |ev| draft.update(|d| d.orcamento = event_target_value(&ev))
                        />
                        <FieldError message=field_error(submission, "orcamento") />
                    </div>
                    <div class="form-group">
                        <label for="job-prazo">"Prazo"</label>
                        <input
                            id="job-prazo"
                            type="date"
                            class="input"
                            prop:value=move || draft.with(|d| d.prazo.clone())
                            on:input=move |ev| draft.update(|d| d.prazo = event_target_value(&ev))
                        />
                        <FieldError message=field_error(submission, "prazo") />
                    </div>
                </div>
                <div class="form-group">
                    <label for="job-habilidades">"Habilidades (separadas por vírgula)"</label>
                    <input
                        id="job-habilidades"
                        type="text"
                        class="input"
                        prop:value=move || draft.with(|d| d.habilidades.clone())
                        on:input=move |ev| draft.update(|d| d.habilidades = event_target_value(&ev))
                    />
                    <FieldError message=field_error(submission, "habilidades") />
                </div>
                <div class="form-group">
                    <label for="job-anexo">"Anexo (opcional)"</label>
                    {move || existing.with(|j| j.as_ref().and_then(|j| j.anexo.clone())).map(|url| view! {
                        <a href=url target="_blank" rel="noopener" class="attachment-link">"Anexo atual"</a>
                    })}
                    <input id="job-anexo" type="file" class="input" on:change=on_file />
                    {move || attachment.with(|a| a.as_ref().map(|a| a.file_name.clone())).map(|name| view! {
                        <span class="file-name">{name}</span>
                    })}
                    <FieldError message=field_error(submission, "anexo") />
                </div>

                <ErrorBanner message=submission_banner(submission) />
                <div class="form-actions">
                    <a href="/" class="btn">"Cancelar"</a>
                    <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                        {move || if submission.with(|s| s.pending) { "Salvando..." } else { "Salvar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

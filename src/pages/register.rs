use freela_api::guard::{anonymous_only, HOME_ROUTE};
use freela_api::models::UserKind;
use freela_api::resources::users::{self, Registration};
use freela_api::Submission;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::field_error::FieldError;
use crate::pages::{field_error, submission_banner};
use crate::session::{use_api, use_session};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_session();
    let client = use_api();
    let navigate = use_navigate();
    let form = RwSignal::new(Registration::default());
    let submission = RwSignal::new(Submission::default());

    let bounce = navigate.clone();
    Effect::new(move |_| {
        if let Some(target) = ctx.session.with(anonymous_only) {
            bounce(target, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submission.with_untracked(|s| s.pending) {
            return;
        }
        submission.update(Submission::start);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let draft = form.get_untracked();
            if let Err(e) = users::register(&client, &draft).await {
                submission.update(|s| s.fail(e));
                return;
            }
            submission.update(|s| s.succeed("Conta criada"));
            // Sign straight in with the credentials just chosen.
            match ctx.login(draft.email.clone(), draft.password.clone()).await {
                Ok(()) => navigate(HOME_ROUTE, Default::default()),
                Err(e) => {
                    warn!("Sign-in after registration failed: {}", e);
                    navigate("/login", Default::default());
                }
            }
        });
    };

    let text_input = move |id: &'static str, label: &'static str, kind: &'static str, get: fn(&Registration) -> String, set: fn(&mut Registration, String)| {
        view! {
            <div class="form-group">
                <label for=format!("register-{}", id)>{label}</label>
                <input
                    id=format!("register-{}", id)
                    type=kind
                    class="input"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
                <FieldError message=field_error(submission, id) />
            </div>
        }
    };

    view! {
        <div class="page auth-page">
            <h2>"Criar conta"</h2>
            <form class="form" on:submit=on_submit>
                {text_input("nome", "Nome", "text", |f| f.nome.clone(), |f, v| f.nome = v)}
                {text_input("email", "E-mail", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {text_input("telefone", "Telefone (opcional)", "tel", |f| f.telefone.clone(), |f, v| f.telefone = v)}
                {text_input("password", "Senha", "password", |f| f.password.clone(), |f, v| f.password = v)}
                {text_input("password_confirm", "Confirme a senha", "password", |f| f.password_confirm.clone(), |f, v| f.password_confirm = v)}

                <fieldset class="form-group">
                    <legend>"Quero..."</legend>
                    <label class="radio">
                        <input
                            type="radio"
                            name="tipo"
                            prop:checked=move || form.with(|f| f.tipo == Some(UserKind::Cliente))
                            on:change=move |_| form.update(|f| f.tipo = Some(UserKind::Cliente))
                        />
                        "Contratar (cliente)"
                    </label>
                    <label class="radio">
                        <input
                            type="radio"
                            name="tipo"
                            prop:checked=move || form.with(|f| f.tipo == Some(UserKind::Freelancer))
                            on:change=move |_| form.update(|f| f.tipo = Some(UserKind::Freelancer))
                        />
                        "Trabalhar (freelancer)"
                    </label>
                    <FieldError message=field_error(submission, "tipo") />
                </fieldset>

                <ErrorBanner message=submission_banner(submission) />
                <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                    {move || if submission.with(|s| s.pending) { "Enviando..." } else { "Cadastrar" }}
                </button>
            </form>
            <p class="auth-switch">"Já tem conta? " <a href="/login">"Entrar"</a></p>
        </div>
    }
}

use freela_api::guard::{anonymous_only, HOME_ROUTE};
use freela_api::Submission;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::ErrorBanner;
use crate::components::field_error::FieldError;
use crate::pages::{field_error, submission_banner};
use crate::session::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let submission = RwSignal::new(Submission::default());

    // Already signed in: nothing to do here.
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
        let navigate = navigate.clone();
        spawn_local(async move {
            match ctx.login(email.get_untracked(), password.get_untracked()).await {
                Ok(()) => {
                    submission.update(|s| s.succeed("Login realizado"));
                    navigate(HOME_ROUTE, Default::default());
                }
                Err(e) => submission.update(|s| s.fail(e)),
            }
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Entrar"</h2>
            <form class="form" on:submit=on_submit>
                <div class="form-group">
                    <label for="login-email">"E-mail"</label>
                    <input
                        id="login-email"
                        type="email"
                        class="input"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <FieldError message=field_error(submission, "email") />
                </div>
                <div class="form-group">
                    <label for="login-password">"Senha"</label>
                    <input
                        id="login-password"
                        type="password"
                        class="input"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <FieldError message=field_error(submission, "password") />
                </div>
                <ErrorBanner message=submission_banner(submission) />
                <button type="submit" class="btn btn-primary" disabled=move || submission.with(|s| s.pending)>
                    {move || if submission.with(|s| s.pending) { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
            <p class="auth-switch">"Ainda não tem conta? " <a href="/cadastro">"Cadastre-se"</a></p>
        </div>
    }
}

use freela_api::models::User;
use freela_api::resources::users::{self, PasswordChange, ProfileUpdate};
use freela_api::validation::split_skills;
use freela_api::Submission;
use leptos::prelude::*;
use tracing::info;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_banner::{ErrorBanner, SuccessNote};
use crate::components::field_error::FieldError;
use crate::pages::{field_error, submission_banner, submission_success};
use crate::session::{use_api, use_session};

fn apply_locally(user: &User, form: &ProfileUpdate) -> User {
    let optional = |raw: &str| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    User {
        nome: form.nome.trim().to_string(),
        telefone: optional(&form.telefone),
        bio: optional(&form.bio),
        habilidades: split_skills(&form.habilidades),
        ..user.clone()
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_session();
    let api = StoredValue::new(use_api());
    let profile = RwSignal::new(ctx.user().map(|u| ProfileUpdate::from_user(&u)).unwrap_or_default());
    let saving = RwSignal::new(Submission::default());
    let password = RwSignal::new(PasswordChange::default());
    let changing = RwSignal::new(Submission::default());
    let deleting = RwSignal::new(Submission::default());

    let save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(before) = ctx.user() else { return };
        if saving.with_untracked(|s| s.pending) {
            return;
        }
        saving.update(Submission::start);
        let form = profile.get_untracked();
        if !form.nome.trim().is_empty() {
            ctx.set_user(apply_locally(&before, &form));
        }
        let client = api.get_value();
        spawn_local(async move {
            match users::update_profile(&client, before.id, &form).await {
                Ok(saved) => {
                    ctx.set_user(saved);
                    saving.update(|s| s.succeed("Perfil atualizado"));
                    let _ = ctx.refresh().await;
                }
                Err(e) => {
                    ctx.set_user(before);
                    saving.update(|s| s.fail(e));
                }
            }
        });
    };

    let change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = ctx.user_id() else { return };
        if changing.with_untracked(|s| s.pending) {
            return;
        }
        changing.update(Submission::start);
        let form = password.get_untracked();
        let client = api.get_value();
        spawn_local(async move {
            match users::change_password(&client, id, &form).await {
                Ok(()) => {
                    password.set(PasswordChange::default());
                    changing.update(|s| s.succeed("Senha alterada"));
                }
                Err(e) => changing.update(|s| s.fail(e)),
            }
        });
    };

    let delete_account = move |_| {
        let Some(id) = ctx.user_id() else { return };
        let confirmed = window()
            .confirm_with_message("Excluir sua conta? Esta ação não pode ser desfeita.")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.update(Submission::start);
        let client = api.get_value();
        spawn_local(async move {
            match users::delete_account(&client, id).await {
                Ok(()) => {
                    info!("Account {} removed, signing out", id);
                    ctx.logout();
                }
                Err(e) => deleting.update(|s| s.fail(e)),
            }
        });
    };

    let header = move || {
        ctx.user().map(|u| {
            view! {
                <div class="profile-header">
                    <h2>{u.nome.clone()}</h2>
                    <span class="muted">{u.email.clone()} " · " {u.tipo.label()}</span>
                    {(u.advertencias > 0).then(|| view! {
                        <p class="warning-note">{format!("Advertências recebidas: {}", u.advertencias)}</p>
                    })}
                </div>
            }
        })
    };

    view! {
        <div class="page profile-page">
            {header}

            <section class="section">
                <h3>"Dados do perfil"</h3>
                <form class="form" on:submit=save_profile>
                    <div class="form-group">
                        <label for="profile-nome">"Nome"</label>
                        <input
                            id="profile-nome"
                            type="text"
                            class="input"
                            prop:value=move || profile.with(|p| p.nome.clone())
                            on:input=move |ev| profile.update(|p| p.nome = event_target_value(&ev))
                        />
                        <FieldError message=field_error(saving, "nome") />
                    </div>
                    <div class="form-group">
                        <label for="profile-telefone">"Telefone"</label>
                        <input
                            id="profile-telefone"
                            type="tel"
                            class="input"
                            prop:value=move || profile.with(|p| p.telefone.clone())
                            on:input=move |ev| profile.update(|p| p.telefone = event_target_value(&ev))
                        />
                        <FieldError message=field_error(saving, "telefone") />
                    </div>
                    <div class="form-group">
                        <label for="profile-bio">"Sobre você"</label>
                        <textarea
                            id="profile-bio"
                            class="input"
                            rows="4"
                            prop:value=move || profile.with(|p| p.bio.clone())
                            on:input=move |ev| profile.update(|p| p.bio = event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-group">
                        <label for="profile-habilidades">"Habilidades (separadas por vírgula)"</label>
                        <input
                            id="profile-habilidades"
                            type="text"
                            class="input"
                            prop:value=move || profile.with(|p| p.habilidades.clone())
                            on:input=move |ev| profile.update(|p| p.habilidades = event_target_value(&ev))
                        />
                    </div>
                    <ErrorBanner message=submission_banner(saving) />
                    <SuccessNote message=submission_success(saving) />
                    <button type="submit" class="btn btn-primary" disabled=move || saving.with(|s| s.pending)>"Salvar"</button>
                </form>
            </section>

            <section class="section">
                <h3>"Alterar senha"</h3>
                <form class="form" on:submit=change_password>
                    <div class="form-group">
                        <label for="password-current">"Senha atual"</label>
                        <input
                            id="password-current"
                            type="password"
                            class="input"
                            autocomplete="current-password"
                            prop:value=move || password.with(|p| p.current.clone())
                            on:input=move |ev| password.update(|p| p.current = event_target_value(&ev))
                        />
                        <FieldError message=field_error(changing, "senha_atual") />
                    </div>
                    <div class="form-group">
                        <label for="password-new">"Nova senha"</label>
                        <input
                            id="password-new"
                            type="password"
                            class="input"
                            autocomplete="new-password"
                            prop:value=move || password.with(|p| p.new.clone())
                            on:input=move |ev| password.update(|p| p.new = event_target_value(&ev))
                        />
                        <FieldError message=field_error(changing, "nova_senha") />
                    </div>
                    <div class="form-group">
                        <label for="password-confirm">"Confirme a nova senha"</label>
                        <input
                            id="password-confirm"
                            type="password"
                            class="input"
                            autocomplete="new-password"
                            prop:value=move || password.with(|p| p.confirm.clone())
                            on:input=move |ev| password.update(|p| p.confirm = event_target_value(&ev))
                        />
                        <FieldError message=field_error(changing, "confirmacao") />
                    </div>
                    <ErrorBanner message=submission_banner(changing) />
                    <SuccessNote message=submission_success(changing) />
                    <button type="submit" class="btn btn-primary" disabled=move || changing.with(|s| s.pending)>
                        "Alterar senha"
                    </button>
                </form>
            </section>

            <section class="section danger-zone">
                <h3>"Excluir conta"</h3>
                <p class="section-description">"Remove sua conta e encerra a sessão."</p>
                <ErrorBanner message=submission_banner(deleting) />
                <button class="btn btn-danger" on:click=delete_account disabled=move || deleting.with(|s| s.pending)>
                    "Excluir minha conta"
                </button>
            </section>
        </div>
    }
}

use leptos::prelude::*;

/// Dismissible error message with an optional retry button.
/// Renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-text">{move || message.get().unwrap_or_default()}</span>
                {on_retry.map(|retry| view! {
                    <button class="btn btn-small" on:click=move |_| retry.run(())>"Tentar novamente"</button>
                })}
                {on_dismiss.map(|dismiss| view! {
                    <button class="btn-close" title="Fechar" on:click=move |_| dismiss.run(())>"\u{2715}"</button>
                })}
            </div>
        </Show>
    }
}

/// Short-lived confirmation text, e.g. "Perfil atualizado".
#[component]
pub fn SuccessNote(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="success-note">{move || message.get().unwrap_or_default()}</div>
        </Show>
    }
}

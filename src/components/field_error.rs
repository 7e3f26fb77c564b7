use leptos::prelude::*;

#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || message.get().map(|text| view! { <span class="field-error">{text}</span> })
}

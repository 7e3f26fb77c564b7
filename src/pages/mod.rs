pub mod chat;
pub mod contracts;
pub mod home;
pub mod job_detail;
pub mod job_form;
pub mod login;
pub mod moderation;
pub mod my_proposals;
pub mod notifications;
pub mod payments;
pub mod profile;
pub mod ratings;
pub mod register;
pub mod reports;

use freela_api::view_state::SUCCESS_NOTE_SECS;
use freela_api::{Loadable, Submission};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::prelude::*;

use crate::hooks::start_timeout;

/// Inline error for one form field.
pub fn field_error(submission: RwSignal<Submission>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || submission.with(|s| s.field(field)))
}

pub fn submission_banner(submission: RwSignal<Submission>) -> Signal<Option<String>> {
    Signal::derive(move || submission.with(Submission::banner))
}

/// Success note that clears itself after a few seconds. The pending timer is
/// re-armed for each new note and cancelled when the caller unmounts.
pub fn submission_success(submission: RwSignal<Submission>) -> Signal<Option<String>> {
    let timer = StoredValue::new(None::<TimeoutHandle>);
    Effect::new(move |_| {
        let shown = submission.with(|s| s.success.clone());
        if let Some(handle) = timer.get_value() {
            handle.clear();
        }
        let next = shown.and_then(|message| {
            start_timeout(SUCCESS_NOTE_SECS, move || {
                submission.update(|s| s.expire_success(&message));
            })
        });
        timer.set_value(next);
    });
    on_cleanup(move || {
        if let Some(handle) = timer.try_get_value().flatten() {
            handle.clear();
        }
    });
    Signal::derive(move || submission.with(|s| s.success.clone()))
}

pub fn load_error<T: Send + Sync + 'static>(state: RwSignal<Loadable<T>>) -> Signal<Option<String>> {
    Signal::derive(move || state.with(|s| s.error().map(str::to_string)))
}

pub fn dismiss<T: Send + Sync + 'static>(state: RwSignal<Loadable<T>>) -> Callback<()> {
    Callback::new(move |_| state.update(Loadable::dismiss_error))
}

/// Current route parameter parsed as an id.
pub fn route_id() -> Memo<Option<i64>> {
    let params = leptos_router::hooks::use_params_map();
    Memo::new(move |_| params.read().get("id").and_then(|raw| raw.parse::<i64>().ok()))
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

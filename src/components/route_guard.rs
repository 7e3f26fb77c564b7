use freela_api::guard::LOGIN_ROUTE;
use freela_api::{GuardState, Requirement};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::session::use_session;

/// Renders `children` only for a signed-in user (an admin when `admin` is set).
/// While the startup credential check runs a placeholder is shown and no
/// redirect happens.
#[component]
pub fn RequireAuth(#[prop(optional)] admin: bool, children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    let requirement = if admin {
        Requirement::Admin
    } else {
        Requirement::SignedIn
    };
    let state = Memo::new(move |_| ctx.session.with(|s| GuardState::evaluate(s, requirement)));

    move || match state.get() {
        GuardState::Loading => view! { <div class="page-loading">"Carregando..."</div> }.into_any(),
        GuardState::Authenticated => children().into_any(),
        other => {
            let target = other.redirect_target().unwrap_or(LOGIN_ROUTE);
            view! { <Redirect path=target /> }.into_any()
        }
    }
}

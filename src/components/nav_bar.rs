use leptos::prelude::*;

use crate::components::notification_bell::NotificationBell;
use crate::session::use_session;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_session();

    let signed_in = move || ctx.session.with(|s| s.is_authenticated());
    let is_admin = move || ctx.session.with(|s| s.is_admin());
    let user_name = move || ctx.session.with(|s| s.user.as_ref().map(|u| u.nome.clone()).unwrap_or_default());

    // Guarded routes redirect to the login screen once the session clears.
    let logout = move |_| ctx.logout();

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">"Freela"</a>
            <Show
                when=signed_in
                fallback=|| view! {
                    <ul class="nav-list">
                        <li class="nav-item"><a href="/login" class="nav-link">"Entrar"</a></li>
                        <li class="nav-item"><a href="/cadastro" class="nav-link">"Cadastrar"</a></li>
                    </ul>
                }
            >
                <ul class="nav-list">
                    <li class="nav-item"><a href="/" class="nav-link">"Trabalhos"</a></li>
                    <li class="nav-item"><a href="/propostas" class="nav-link">"Propostas"</a></li>
                    <li class="nav-item"><a href="/contratos" class="nav-link">"Contratos"</a></li>
                    <li class="nav-item"><a href="/pagamentos" class="nav-link">"Pagamentos"</a></li>
                    <li class="nav-item"><a href="/avaliacoes" class="nav-link">"Avaliações"</a></li>
                    <li class="nav-item"><a href="/denuncias" class="nav-link">"Denúncias"</a></li>
                    <Show when=is_admin>
                        <li class="nav-item"><a href="/moderacao" class="nav-link">"Moderação"</a></li>
                    </Show>
                </ul>
                <div class="nav-user">
                    <NotificationBell />
                    <a href="/perfil" class="nav-link">{user_name}</a>
                    <button class="btn btn-small" on:click=logout>"Sair"</button>
                </div>
            </Show>
        </nav>
    }
}

use freela_api::{ApiClient, ClientConfig};
use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::nav_bar::NavBar;
use crate::components::notification_bell::UnreadCount;
use crate::components::route_guard::RequireAuth;
use crate::pages::chat::ChatPage;
use crate::pages::contracts::ContractsPage;
use crate::pages::home::HomePage;
use crate::pages::job_detail::JobDetailPage;
use crate::pages::job_form::JobFormPage;
use crate::pages::login::LoginPage;
use crate::pages::moderation::ModerationPage;
use crate::pages::my_proposals::MyProposalsPage;
use crate::pages::notifications::NotificationsPage;
use crate::pages::payments::PaymentsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::ratings::RatingsPage;
use crate::pages::register::RegisterPage;
use crate::pages::reports::ReportsPage;
use crate::session::SessionProvider;

#[component]
pub fn App(config: ClientConfig, client: ApiClient) -> impl IntoView {
    provide_context(config);
    provide_context(UnreadCount(RwSignal::new(0)));

    view! {
        <SessionProvider client=client>
            <Router>
                <div class="app-layout">
                    <NavBar />
                    <main class="content">
                        <Routes fallback=|| view! { <p class="page">"Página não encontrada."</p> }>
                            <Route path=path!("/login") view=LoginPage />
                            <Route path=path!("/cadastro") view=RegisterPage />
                            <Route
                                path=path!("/")
                                view=|| view! { <RequireAuth><HomePage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/trabalhos/novo")
                                view=|| view! { <RequireAuth><JobFormPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/trabalhos/:id/editar")
                                view=|| view! { <RequireAuth><JobFormPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/trabalhos/:id")
                                view=|| view! { <RequireAuth><JobDetailPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/propostas")
                                view=|| view! { <RequireAuth><MyProposalsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/contratos")
                                view=|| view! { <RequireAuth><ContractsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/contratos/:id/chat")
                                view=|| view! { <RequireAuth><ChatPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/pagamentos")
                                view=|| view! { <RequireAuth><PaymentsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/avaliacoes")
                                view=|| view! { <RequireAuth><RatingsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/denuncias")
                                view=|| view! { <RequireAuth><ReportsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/moderacao")
                                view=|| view! { <RequireAuth admin=true><ModerationPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/notificacoes")
                                view=|| view! { <RequireAuth><NotificationsPage /></RequireAuth> }
                            />
                            <Route
                                path=path!("/perfil")
                                view=|| view! { <RequireAuth><ProfilePage /></RequireAuth> }
                            />
                        </Routes>
                    </main>
                </div>
            </Router>
        </SessionProvider>
    }
}

mod app;
mod components;
mod hooks;
mod logging;
mod pages;
mod session;
mod storage;
mod upload;

use std::sync::Arc;

use freela_api::{ApiClient, ClientConfig, Credentials, ReqwestTransport};

use app::App;

const CONFIG_TOML: &str = include_str!("../freela.toml");

fn main() {
    let config = match ClientConfig::from_toml_str(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::error_1(&format!("Invalid freela.toml, using defaults: {}", e).into());
            ClientConfig::default()
        }
    };
    logging::init(&config.log_filter);
    tracing::info!("Starting Freela against {}", config.api_base_url);

    let client = ApiClient::new(
        &config.api_base_url,
        Arc::new(ReqwestTransport::new()),
        Credentials::new(Arc::new(storage::LocalStorage)),
    );

    leptos::mount::mount_to_body(move || leptos::view! { <App config=config client=client /> });
}

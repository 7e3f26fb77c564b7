use std::time::Duration;

use freela_api::{CancelToken, ClientConfig};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::prelude::*;
use tracing::warn;

pub fn use_config() -> ClientConfig {
    expect_context::<ClientConfig>()
}

/// A token cancelled when the calling component unmounts.
pub fn use_cancel_token() -> CancelToken {
    let token = CancelToken::new();
    let on_drop = token.clone();
    on_cleanup(move || on_drop.cancel());
    token
}

/// Run `tick` every `secs` seconds while the calling component is mounted.
/// The first tick happens after one full period.
pub fn use_interval(secs: u64, tick: impl Fn() + 'static) {
    match set_interval_with_handle(tick, Duration::from_secs(secs.max(1))) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => warn!("Failed to start interval: {:?}", e),
    }
}

/// Run `done` once after `secs` seconds. `None` if the timer could not start.
pub fn start_timeout(secs: u64, done: impl FnOnce() + 'static) -> Option<TimeoutHandle> {
    set_timeout_with_handle(done, Duration::from_secs(secs))
        .map_err(|e| warn!("Failed to start timeout: {:?}", e))
        .ok()
}

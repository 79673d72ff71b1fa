pub mod handlers;
pub mod request_id;
pub mod server;
pub mod store;

use pkg_state::client::StateStore;

/// Shared application state injected into all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: StateStore,
}

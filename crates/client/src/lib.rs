//! Browser side of the workout tracker: a typed client for the server's
//! routes, the session kept in local storage and the exercise editor

pub mod api;
pub mod editor;
pub mod error;
pub mod session;
pub mod storage;

#[cfg(target_arch = "wasm32")]
mod utils;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use console_error_panic_hook::set_once as set_panic_hook;
    use tracing::{info, warn, Level};
    use wasm_bindgen::prelude::wasm_bindgen;

    use crate::{
        api::{Api, ApiConfig, FetchTransport},
        session::Session,
        storage::BrowserStorage,
        utils::configure_tracing,
    };

    /// Entry point called once the wasm module is loaded
    #[wasm_bindgen]
    pub async fn start_client() {
        set_panic_hook();
        configure_tracing(Level::DEBUG);

        let session = Session::new(BrowserStorage);
        match session.user_name() {
            Some(name) => info!(name, "Resuming session"),
            None => info!("No user logged in"),
        }

        let api = Api::new(FetchTransport, ApiConfig::default());
        if let Err(e) = api.ping().await {
            warn!(?e, "Server isn't reachable");
        }
    }
}

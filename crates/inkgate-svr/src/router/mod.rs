use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use docusign::Docusign;
use inkgate_core::Config;
use tower_http::trace::TraceLayer;

pub mod authorize;
pub mod callback;
pub mod envelope;
pub mod meta;
pub mod templates;

#[derive(Clone)]
pub struct AppState {
    pub docusign: Docusign,
    cookie_key: Key,
}

// PrivateCookieJar requires Key to be extractable from state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Assemble the gateway router.
///
/// `config.validate()` must have passed: `Key::from` requires the full
/// 64-byte session secret.
pub fn router(config: &Config) -> Router {
    let state = AppState {
        docusign: Docusign::new(config.provider.clone()),
        cookie_key: Key::from(config.session.secret.as_bytes()),
    };

    Router::new()
        .route("/authorize", get(authorize::handler))
        .route("/callback", get(callback::handler))
        .route("/templates", get(templates::handler))
        .route("/envelope", post(envelope::handler))
        .route("/health", get(meta::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

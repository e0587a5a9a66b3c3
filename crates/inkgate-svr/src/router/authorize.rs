use axum::{extract::State, response::Redirect};
use axum_extra::extract::PrivateCookieJar;

use crate::session;

use super::AppState;

/// Start the authorization-code flow: stash a fresh anti-forgery state in
/// the session and send the user agent to the provider.
pub(crate) async fn handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    let auth_request = state.docusign.authorization_request();

    tracing::debug!(url = %auth_request.url, "redirecting to provider authorization endpoint");
    let jar = jar.add(session::state_cookie(&auth_request.state));

    (jar, Redirect::to(&auth_request.url))
}

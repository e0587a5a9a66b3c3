use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use inkgate_core::Error;

use crate::{session::Session, views};

use super::AppState;

/// List the account's envelope templates.
///
/// Without a stored access token the user is sent back into the login flow
/// instead of hitting the provider with a malformed request.
pub(crate) async fn handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let Some(access_token) = Session::from_jar(&jar).access_token else {
        tracing::debug!("no access token in session, redirecting to /authorize");
        return Ok(Redirect::to("/authorize").into_response());
    };

    let templates = state.docusign.list_templates(&access_token).await?;

    Ok(views::templates_page(&templates).into_response())
}

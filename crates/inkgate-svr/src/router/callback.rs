use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::PrivateCookieJar;
use inkgate_core::{Error, Error400, Error401};
use serde::Deserialize;

use crate::session::{self, Session};

use super::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
}

/// Provider callback: verify the anti-forgery state against the session,
/// then exchange the code for an access token.
///
/// The state check is the only CSRF defense on this endpoint; a missing or
/// mismatched value is a hard 401 and no exchange is attempted. On any
/// failure the jar is dropped unchanged, so the session is never mutated by
/// a failed callback.
pub(crate) async fn handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(PrivateCookieJar, Redirect), Error> {
    let session = Session::from_jar(&jar);

    let valid = match (&params.state, &session.state) {
        (Some(received), Some(stored)) => received == stored,
        _ => false,
    };
    if !valid {
        tracing::warn!("callback state mismatch");
        return Err(Error401::StateMismatch.into());
    }

    let code = params.code.ok_or(Error400::MissingCallbackCode)?;

    let token = state.docusign.exchange_code(&code).await?;
    tracing::info!("authorization code exchanged, session authenticated");

    let jar = jar
        .add(session::token_cookie(token.access_token))
        .add(session::clear_state_cookie());

    Ok((jar, Redirect::to("/templates")))
}

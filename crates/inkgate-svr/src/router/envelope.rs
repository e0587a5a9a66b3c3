use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::PrivateCookieJar;
use docusign::{EnvelopeRequest, TemplateRole};
use inkgate_core::Error;
use serde::Deserialize;

use crate::{session::Session, views};

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvelopeForm {
    template_id: String,
    email: String,
    name: String,
    role_name: String,
}

/// Create and immediately send an envelope from a template, with the form's
/// recipient as the single signer role.
pub(crate) async fn handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<EnvelopeForm>,
) -> Result<Response, Error> {
    let Some(access_token) = Session::from_jar(&jar).access_token else {
        tracing::debug!("no access token in session, redirecting to /authorize");
        return Ok(Redirect::to("/authorize").into_response());
    };

    let envelope = EnvelopeRequest::from_template(
        form.template_id,
        TemplateRole {
            email: form.email,
            name: form.name,
            role_name: form.role_name,
        },
    );

    let created = state.docusign.create_envelope(&access_token, &envelope).await?;
    tracing::info!(template_id = %envelope.template_id, "envelope sent");

    Ok(views::envelope_page(&created).into_response())
}

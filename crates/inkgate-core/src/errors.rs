use axum::{body::Body, response::IntoResponse};
use http::{Response, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(#[from] Error400),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] Error401),

    #[error("Upstream transport error: {0}")]
    Upstream(#[source] docusign::Error),

    #[error("Bad upstream reply: {0}")]
    BadGateway(#[source] docusign::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error400 {
    #[error("callback is missing the authorization code")]
    MissingCallbackCode,
}

#[derive(Debug, thiserror::Error)]
pub enum Error401 {
    #[error("callback state does not match the session state")]
    StateMismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration field: {0}")]
    MissingField(&'static str),

    #[error("session secret must be at least 64 bytes, got {len}")]
    WeakSessionSecret { len: usize },
}

impl From<docusign::Error> for Error {
    fn from(err: docusign::Error) -> Self {
        if err.is_transport() {
            Self::Upstream(err)
        } else {
            Self::BadGateway(err)
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response<Body> {
        let (status, body) = match &self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Self::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "Bad Gateway"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        Response::builder()
            .status(status)
            .body(Body::from(body))
            .unwrap()
    }
}

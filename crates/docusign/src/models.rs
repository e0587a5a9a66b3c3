use serde::{Deserialize, Serialize};

/// Authorization URL plus the anti-forgery state to store in the session.
#[derive(Debug)]
#[non_exhaustive]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Reply from the token endpoint. Only `access_token` is retained by the
/// gateway; the remaining fields are tolerated for completeness.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Envelope-creation body. `status: "sent"` means the envelope goes out
/// immediately on creation; no draft state is supported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeRequest {
    pub template_id: String,
    pub template_roles: Vec<TemplateRole>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRole {
    pub email: String,
    pub name: String,
    pub role_name: String,
}

impl EnvelopeRequest {
    /// Single-recipient envelope sent from a template.
    pub fn from_template(template_id: impl Into<String>, role: TemplateRole) -> Self {
        Self {
            template_id: template_id.into(),
            template_roles: vec![role],
            status: "sent".into(),
        }
    }
}

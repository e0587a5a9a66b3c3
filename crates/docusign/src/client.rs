use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use serde_json::Value;
use url::Url;

use crate::{AuthorizationRequest, DocusignConfig, EnvelopeRequest, Error, TokenResponse};

/// DocuSign API handle. Cheap to clone; wraps one connection pool.
#[derive(Debug, Clone)]
pub struct Docusign {
    inner: Arc<DocusignRef>,
}

#[derive(Debug)]
struct DocusignRef {
    client: reqwest::Client,
    config: DocusignConfig,
}

/// Random URL-safe state parameter (16 random bytes, base64url).
fn generate_state() -> String {
    let random_bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

impl Docusign {
    pub fn new(config: DocusignConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    pub fn with_http_client(config: DocusignConfig, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(DocusignRef { client, config }),
        }
    }

    pub fn config(&self) -> &DocusignConfig {
        &self.inner.config
    }

    /// Build the authorization redirect URL with a fresh state parameter.
    ///
    /// Scopes are joined with a space and encoded exactly once by the query
    /// builder, per the provider's space-delimited scope contract.
    #[must_use]
    pub fn authorization_request(&self) -> AuthorizationRequest {
        let config = &self.inner.config;
        let state = generate_state();
        let scope = config.scopes.join(" ");

        let mut url = config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", config.redirect_uri.as_str())
            .append_pair("scope", &scope)
            .append_pair("state", &state);

        AuthorizationRequest {
            url: url.into(),
            state,
        }
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Server-to-server form POST authenticated with HTTP Basic
    /// (`client_id:client_secret`).
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let config = &self.inner.config;
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ];

        tracing::debug!(token_url = %config.token_url, "exchanging authorization code");
        let resp = self
            .inner
            .client
            .post(config.token_url.clone())
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&params)
            .send()
            .await?;

        let resp = ensure_success(resp, "token exchange").await?;
        resp.json::<TokenResponse>()
            .await
            .map_err(|source| Error::Decode {
                operation: "token exchange",
                source,
            })
    }

    /// Fetch the account's envelope templates.
    pub async fn list_templates(&self, access_token: &str) -> Result<Value, Error> {
        let url = self.api_url("templates")?;

        tracing::debug!(%url, "listing templates");
        let resp = self
            .inner
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let resp = ensure_success(resp, "template list").await?;
        resp.json::<Value>().await.map_err(|source| Error::Decode {
            operation: "template list",
            source,
        })
    }

    /// Create (and immediately send) an envelope from a template.
    pub async fn create_envelope(
        &self,
        access_token: &str,
        envelope: &EnvelopeRequest,
    ) -> Result<Value, Error> {
        let url = self.api_url("envelopes")?;

        tracing::debug!(%url, template_id = %envelope.template_id, "creating envelope");
        let resp = self
            .inner
            .client
            .post(url)
            .bearer_auth(access_token)
            .json(envelope)
            .send()
            .await?;

        let resp = ensure_success(resp, "envelope create").await?;
        resp.json::<Value>().await.map_err(|source| Error::Decode {
            operation: "envelope create",
            source,
        })
    }

    /// Join a path segment onto the (possibly path-carrying) API base URL.
    fn api_url(&self, segment: &str) -> Result<Url, Error> {
        let mut url = self.inner.config.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

/// Pass 2xx replies through; map anything else to `Error::Provider` with the
/// body captured for the server-side log.
async fn ensure_success(
    resp: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, Error> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let detail = resp.text().await.unwrap_or_default();
    tracing::error!(operation, status, %detail, "provider call failed");
    Err(Error::Provider {
        operation,
        status,
        detail,
    })
}

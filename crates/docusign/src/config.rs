use serde::{Deserialize, Serialize};
use url::Url;

/// DocuSign OAuth2 / REST configuration.
///
/// `client_id`, `client_secret` and `redirect_uri` are constructor
/// parameters; endpoint URLs default to the production account server and
/// the demo REST API and can be overridden per environment (or pointed at a
/// mock server in tests).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocusignConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Url,
    #[serde(default = "default_auth_url")]
    pub auth_url: Url,
    #[serde(default = "default_token_url")]
    pub token_url: Url,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_auth_url() -> Url {
    "https://account.docusign.com/oauth/auth"
        .parse()
        .expect("valid default URL")
}

fn default_token_url() -> Url {
    "https://account.docusign.com/oauth/token"
        .parse()
        .expect("valid default URL")
}

fn default_api_base_url() -> Url {
    "https://demo.docusign.net/restapi/v2.1"
        .parse()
        .expect("valid default URL")
}

fn default_scopes() -> Vec<String> {
    vec!["signature".into(), "impersonation".into()]
}

impl DocusignConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            api_base_url: default_api_base_url(),
            scopes: default_scopes(),
        }
    }

    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }

    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

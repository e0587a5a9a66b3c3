pub mod application;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};

pub use application::ApplicationConfig;
pub use docusign::DocusignConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

use crate::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: DocusignConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Reject configurations that would only fail later as malformed
    /// outbound requests or weak cookie keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.client_id.is_empty() {
            return Err(ConfigError::MissingField("provider.client_id"));
        }
        if self.provider.client_secret.is_empty() {
            return Err(ConfigError::MissingField("provider.client_secret"));
        }
        self.session.validate()?;
        Ok(())
    }
}

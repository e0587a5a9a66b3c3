use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cookie-session settings. The secret is key material for the private
/// cookie jar and must be supplied externally (`INKGATE_SESSION_SECRET`),
/// never shipped as a literal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub secret: String,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // cookie::Key::from needs a full 512-bit master key
        if self.secret.len() < 64 {
            return Err(ConfigError::WeakSessionSecret {
                len: self.secret.len(),
            });
        }
        Ok(())
    }
}

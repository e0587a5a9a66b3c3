#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Url parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("{operation} failed: status {status}: {detail}")]
    Provider {
        operation: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{operation} returned an undecodable body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// True for network-level failures (connect, timeout, body transfer),
    /// as opposed to replies the provider actually produced.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

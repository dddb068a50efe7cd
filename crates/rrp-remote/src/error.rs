use thiserror::Error;

/// Errors returned by the HTTP collaborators.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The chat completion came back without any message content.
    #[error("classifier returned an empty reply")]
    EmptyReply,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The document is a binary format (e.g. PDF) that must be converted to
    /// text before its table rows can be read.
    #[error("document at {url} is not a text table ({kind})")]
    UnsupportedDocument { url: String, kind: String },
}

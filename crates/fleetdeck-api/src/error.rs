use thiserror::Error;

/// Fallback shown when neither the server nor the transport layer
/// produced a usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "The request could not be completed";

/// Top-level error type for the `fleetdeck-api` crate.
///
/// Covers every failure mode across the REST surface: transport,
/// server-reported business errors, and malformed payloads.
/// `fleetdeck-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-2xx response carrying a `{ message }` body.
    #[error("API error (HTTP {status}): {message}")]
    Api { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The message to surface to a user.
    ///
    /// Fallback chain: server-provided message, then the transport
    /// error's own message, then a hardcoded default. Consumers display
    /// this string; they do not branch on the error category.
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Api { .. } | Self::Deserialization { .. } => DEFAULT_ERROR_MESSAGE.into(),
            Self::Transport(e) => {
                let msg = e.to_string();
                if msg.is_empty() {
                    DEFAULT_ERROR_MESSAGE.into()
                } else {
                    msg
                }
            }
            Self::InvalidUrl(e) => e.to_string(),
            Self::Tls(msg) => msg.clone(),
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient transport failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

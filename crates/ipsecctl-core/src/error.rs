// ── Core error types ──
//
// User-facing errors from ipsecctl-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<ipsecctl_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors (raised before any network call) ────────────────
    #[error("{message}")]
    Usage {
        message: String,
        /// Flags that would have avoided the error, e.g. `--name`.
        hint: Option<String>,
    },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("{resource} {identifier} not found")]
    LookupMiss {
        resource: &'static str,
        identifier: String,
        hint: String,
    },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Provider error code, e.g. `NotAuthorizedOrNotFound`.
        code: Option<String>,
        status: Option<u16>,
        request_id: Option<String>,
    },

    // ── Provisioning outcome errors ──────────────────────────────────
    #[error("IPSec connection {id} reached state {state}")]
    NotAvailable { id: String, state: String },

    #[error("IPSec connection {id} still {state} after {timeout_secs}s")]
    PollTimeout {
        id: String,
        state: String,
        timeout_secs: u64,
    },

    #[error("Cancelled while waiting for IPSec connection {id}")]
    Cancelled { id: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn usage(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Whether the provider reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ipsecctl_api::Error> for CoreError {
    fn from(err: ipsecctl_api::Error) -> Self {
        match err {
            ipsecctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ipsecctl_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                        request_id: None,
                    }
                }
            }
            ipsecctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ipsecctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ipsecctl_api::Error::Api {
                message,
                code,
                status,
                request_id,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
                request_id,
            },
            ipsecctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_status_and_code() {
        let err: CoreError = ipsecctl_api::Error::Api {
            message: "missing".into(),
            code: Some("NotAuthorizedOrNotFound".into()),
            status: 404,
            request_id: Some("req-1".into()),
        }
        .into();

        assert!(err.is_not_found());
        match err {
            CoreError::Api {
                code, request_id, ..
            } => {
                assert_eq!(code.as_deref(), Some("NotAuthorizedOrNotFound"));
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn authentication_maps_to_auth_failed() {
        let err: CoreError = ipsecctl_api::Error::Authentication {
            message: "bad token".into(),
        }
        .into();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn tls_maps_to_connection_failed() {
        let err: CoreError = ipsecctl_api::Error::Tls("bad cert".into()).into();
        assert!(
            matches!(err, CoreError::ConnectionFailed { ref reason, .. } if reason.contains("bad cert"))
        );
    }
}

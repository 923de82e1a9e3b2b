//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors whose help
//! text names the flag or command that fixes the problem.

use miette::Diagnostic;
use thiserror::Error;

use ipsecctl_config::ConfigError;
use ipsecctl_core::CoreError;

/// Process exit codes. clap keeps its own code 2 for malformed arguments.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(ipsecctl::connection_failed),
        help(
            "{reason}\n\
             Check the endpoint URL and your network path.\n\
             Use --insecure (-k) for lab endpoints with self-signed certificates."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ipsecctl::auth_failed),
        help("Verify the API token.\nStore a new one with: ipsecctl config set-token")
    )]
    AuthFailed { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(ipsecctl::no_credentials),
        help(
            "Store one with: ipsecctl config set-token\n\
             Or pass --token / set IPSECCTL_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ipsecctl::usage))]
    Usage {
        message: String,
        #[help]
        hint: Option<String>,
    },

    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(code(ipsecctl::not_found), help("{hint}"))]
    NotFound {
        resource: String,
        identifier: String,
        hint: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ipsecctl::validation))]
    Validation { field: String, reason: String },

    // ── Provisioning outcome ─────────────────────────────────────────
    #[error("IPSec connection {id} is {state}, not AVAILABLE")]
    #[diagnostic(
        code(ipsecctl::not_available),
        help("Nothing was rolled back. Check the connection manually in the console.")
    )]
    NotAvailable { id: String, state: String },

    #[error("IPSec connection {id} still {state} after {seconds}s")]
    #[diagnostic(
        code(ipsecctl::poll_timeout),
        help(
            "The connection may still become available. Check it manually, \
             or raise --wait-timeout next time."
        )
    )]
    PollTimeout {
        id: String,
        state: String,
        seconds: u64,
    },

    #[error("Interrupted while waiting for IPSec connection {id}")]
    #[diagnostic(
        code(ipsecctl::cancelled),
        help("The create request was already submitted; the connection was not removed.")
    )]
    Cancelled { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(ipsecctl::api_error))]
    ApiError {
        code: String,
        message: String,
        #[help]
        request_id: Option<String>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ipsecctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ipsecctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No endpoint configured")]
    #[diagnostic(
        code(ipsecctl::no_config),
        help(
            "Create a profile with: ipsecctl config init\n\
             Expected at: {path}\n\
             Or pass --endpoint, --tenancy and --token."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ipsecctl::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ipsecctl::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    #[diagnostic(code(ipsecctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML output: {0}")]
    #[diagnostic(code(ipsecctl::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(ipsecctl::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Usage { message, hint } => CliError::Usage { message, hint },

            CoreError::LookupMiss {
                resource,
                identifier,
                hint,
            } => CliError::NotFound {
                resource: resource.into(),
                identifier,
                hint,
            },

            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Api {
                message,
                code,
                status,
                request_id,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| s.to_string()))
                    .unwrap_or_else(|| "unknown".into()),
                message,
                request_id: request_id.map(|id| format!("Provider request id: {id}")),
            },

            CoreError::NotAvailable { id, state } => CliError::NotAvailable { id, state },

            CoreError::PollTimeout {
                id,
                state,
                timeout_secs,
            } => CliError::PollTimeout {
                id,
                state,
                seconds: timeout_secs,
            },

            CoreError::Cancelled { id } => CliError::Cancelled { id },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

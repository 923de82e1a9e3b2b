// ── Runtime provider configuration ──
//
// Describes *how* to reach the provider API. Carries credentials and
// transport tuning but never touches disk: the CLI resolves a profile
// into a `ProviderConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (lab endpoints with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one provider endpoint.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Versioned API root, e.g. `https://iaas.eu-frankfurt-1.example.com/20160918`.
    pub endpoint: Url,
    /// Bearer token.
    pub token: SecretString,
    /// Tenancy (root compartment) id.
    pub tenancy: String,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Web console base URL used to print resource links.
    pub console_url: Option<Url>,
}

impl ProviderConfig {
    pub fn new(endpoint: Url, token: SecretString, tenancy: impl Into<String>) -> Self {
        Self {
            endpoint,
            token,
            tenancy: tenancy.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            console_url: None,
        }
    }
}

impl From<&TlsVerification> for ipsecctl_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

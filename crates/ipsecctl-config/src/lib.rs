//! Configuration for the ipsecctl CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `ipsecctl_core::ProviderConfig`. The CLI adds
//! `GlobalOpts`-aware overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use ipsecctl_core::{ProviderConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/token`.
pub const KEYRING_SERVICE: &str = "ipsecctl";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named provider profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds to wait for a new IPSec connection to become available.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            wait_timeout: default_wait_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_wait_timeout() -> u64 {
    300
}

/// A named provider profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Versioned API root (e.g., "https://iaas.eu-frankfurt-1.example.com/20160918").
    pub endpoint: String,

    /// Tenancy (root compartment) id.
    pub tenancy: String,

    /// Bearer token (plaintext, prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Web console base URL, used for resource links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,

    /// Path to custom CA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "ipsecctl", "ipsecctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ipsecctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered over defaults and under `IPSECCTL_` env.
///
/// Nested env keys use a double underscore, e.g. `IPSECCTL_DEFAULTS__TIMEOUT`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("IPSECCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Keyring account holding the token of `profile_name`.
pub fn keyring_account(profile_name: &str) -> String {
    format!("{profile_name}/token")
}

/// Resolve the bearer token from the credential chain (no CLI flag step).
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_token_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        |account| {
            keyring::Entry::new(KEYRING_SERVICE, account)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

/// Token chain with injectable env and keyring lookups.
pub fn resolve_token_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(value) = profile.token_env.as_deref().and_then(&env) {
        return Ok(SecretString::from(value));
    }

    // 2. System keyring
    if let Some(secret) = keyring(&keyring_account(profile_name)) {
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Profile → ProviderConfig ────────────────────────────────────────

pub fn parse_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    value.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {value}"),
    })
}

/// TLS mode from the insecure flag and an optional CA path.
pub fn tls_verification(insecure: bool, ca_cert: Option<&Path>) -> TlsVerification {
    if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(path) = ca_cert {
        TlsVerification::CustomCa(path.to_path_buf())
    } else {
        TlsVerification::SystemDefaults
    }
}

/// Build a `ProviderConfig` from a profile, without CLI flag overrides.
pub fn profile_to_provider_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ProviderConfig, ConfigError> {
    let endpoint = parse_url("endpoint", &profile.endpoint)?;
    if profile.tenancy.is_empty() {
        return Err(ConfigError::Validation {
            field: "tenancy".into(),
            reason: format!("profile '{profile_name}' has no tenancy id"),
        });
    }
    let token = resolve_token(profile, profile_name)?;

    let mut config = ProviderConfig::new(endpoint, token, profile.tenancy.clone());
    config.tls = tls_verification(profile.insecure.unwrap_or(false), profile.ca_cert.as_deref());
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));
    config.console_url = profile
        .console_url
        .as_deref()
        .map(|u| parse_url("console_url", u))
        .transpose()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn profile() -> Profile {
        Profile {
            endpoint: "https://iaas.example.com/20160918".into(),
            tenancy: "ocid1.tenancy.oc1..root".into(),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&dir.path().join("config.toml")).expect("defaults");
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.wait_timeout, 300);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "frankfurt"

[defaults]
wait_timeout = 600

[profiles.frankfurt]
endpoint = "https://iaas.eu-frankfurt-1.example.com/20160918"
tenancy = "ocid1.tenancy.oc1..aaa"
token_env = "FRA_TOKEN"
console_url = "https://cloud.example.com"
"#,
        )
        .expect("write");

        let cfg = load_config_from(&path).expect("config");
        assert_eq!(cfg.default_profile.as_deref(), Some("frankfurt"));
        assert_eq!(cfg.defaults.wait_timeout, 600);
        assert_eq!(cfg.defaults.output, "table");
        let fra = &cfg.profiles["frankfurt"];
        assert_eq!(fra.tenancy, "ocid1.tenancy.oc1..aaa");
        assert_eq!(fra.token_env.as_deref(), Some("FRA_TOKEN"));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), profile());

        save_config_to(&path, &cfg).expect("save");
        let written = std::fs::read_to_string(&path).expect("read");
        assert!(!written.contains("token"), "unset fields are omitted:\n{written}");

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.profiles["default"].endpoint, profile().endpoint);
    }

    #[test]
    fn token_env_wins_over_keyring_and_plaintext() {
        let p = Profile {
            token_env: Some("TOKEN_VAR".into()),
            token: Some("plain".into()),
            ..profile()
        };
        let token = resolve_token_with(
            &p,
            "default",
            |name| (name == "TOKEN_VAR").then(|| "from-env".to_owned()),
            |_| Some("from-keyring".into()),
        )
        .expect("token");
        assert_eq!(token.expose_secret(), "from-env");
    }

    #[test]
    fn keyring_is_keyed_by_profile() {
        let p = Profile {
            token_env: Some("UNSET".into()),
            token: Some("plain".into()),
            ..profile()
        };
        let token = resolve_token_with(
            &p,
            "lab",
            |_| None,
            |account| (account == "lab/token").then(|| "from-keyring".to_owned()),
        )
        .expect("token");
        assert_eq!(token.expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_is_the_last_resort() {
        let p = Profile {
            token: Some("plain".into()),
            ..profile()
        };
        let token = resolve_token_with(&p, "default", |_| None, |_| None).expect("token");
        assert_eq!(token.expose_secret(), "plain");

        let err = resolve_token_with(&profile(), "default", |_| None, |_| None)
            .expect_err("no token");
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "default"));
    }

    #[test]
    fn insecure_beats_custom_ca() {
        let ca = PathBuf::from("/etc/ca.pem");
        assert_eq!(
            tls_verification(true, Some(&ca)),
            TlsVerification::DangerAcceptInvalid
        );
        assert_eq!(
            tls_verification(false, Some(&ca)),
            TlsVerification::CustomCa(ca)
        );
        assert_eq!(tls_verification(false, None), TlsVerification::SystemDefaults);
    }

    #[test]
    fn bad_endpoint_is_a_validation_error() {
        let p = Profile {
            endpoint: "not a url".into(),
            token: Some("t".into()),
            ..profile()
        };
        let err = profile_to_provider_config(&p, "default").expect_err("invalid");
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "endpoint"));
    }
}

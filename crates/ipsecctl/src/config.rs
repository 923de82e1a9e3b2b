//! CLI configuration: thin wrapper around `ipsecctl_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--endpoint, --token, --tenancy, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use ipsecctl_config::{parse_url, resolve_token, tls_verification};
use ipsecctl_core::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use ipsecctl_config::{
    Config, Defaults, KEYRING_SERVICE, Profile, config_path, keyring_account,
    load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the `ProviderConfig` for this invocation.
///
/// Flags win over the active profile. Without a profile, the endpoint,
/// tenancy and token must all come from flags or `IPSECCTL_*` env vars.
pub fn provider_config(global: &GlobalOpts, cfg: &Config) -> Result<ProviderConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    // 1. Endpoint (flag > env > profile)
    let endpoint = global
        .endpoint
        .as_deref()
        .or(profile.map(|p| p.endpoint.as_str()))
        .filter(|e| !e.is_empty())
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let endpoint = parse_url("endpoint", endpoint)?;

    // 2. Tenancy
    let tenancy = global
        .tenancy
        .clone()
        .or_else(|| profile.map(|p| p.tenancy.clone()))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CliError::Usage {
            message: "no tenancy id configured".into(),
            hint: Some("Pass --tenancy or set `tenancy` on the profile.".into()),
        })?;

    // 3. Token (flag > token_env > keyring > plaintext)
    let token = match (&global.token, profile) {
        (Some(token), _) => SecretString::from(token.clone()),
        (None, Some(profile)) => resolve_token(profile, &profile_name)?,
        (None, None) => {
            return Err(CliError::NoCredentials {
                profile: profile_name,
            });
        }
    };

    let mut config = ProviderConfig::new(endpoint, token, tenancy);

    // 4. TLS
    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    config.tls = tls_verification(insecure, profile.and_then(|p| p.ca_cert.as_deref()));

    // 5. Timeout: the flag default is 30, so a profile value only applies
    //    when the flag was left alone.
    let timeout = match profile.and_then(|p| p.timeout) {
        Some(secs) if global.timeout == cfg.defaults.timeout => secs,
        _ => global.timeout,
    };
    config.timeout = Duration::from_secs(timeout);

    // 6. Console links
    config.console_url = profile
        .and_then(|p| p.console_url.as_deref())
        .map(|u| parse_url("console_url", u))
        .transpose()?;

    Ok(config)
}

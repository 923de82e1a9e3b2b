//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod ipsec;
pub mod updates;
pub mod volumes;

use ipsecctl_core::{CloudProvider, ProviderConfig};

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Loaded configuration and global flags. The provider is built on demand
/// so handlers can reject bad input before credentials are resolved.
pub struct Context<'a> {
    pub config: &'a Config,
    pub global: &'a GlobalOpts,
}

/// A connected provider plus the settings it was built from.
pub struct Session {
    pub provider: Box<dyn CloudProvider>,
    pub provider_config: ProviderConfig,
}

impl Context<'_> {
    /// Resolve endpoint, tenancy and token, then build the client.
    pub fn connect(&self) -> Result<Session, CliError> {
        let provider_config = config::provider_config(self.global, self.config)?;
        let client = ipsecctl_core::connect(&provider_config)?;
        tracing::debug!(endpoint = %provider_config.endpoint, "provider client ready");
        Ok(Session {
            provider: Box::new(client),
            provider_config,
        })
    }
}

/// Dispatch a provider-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Ipsec(args) => ipsec::handle(args, ctx).await,
        Command::Volumes(args) => volumes::handle(args, ctx).await,
        Command::Updates(args) => updates::handle(args, ctx).await,
        // Config and Completions are handled before a client exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command routed to provider dispatch".into(),
        )),
    }
}

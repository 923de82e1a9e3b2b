// ipsecctl-core: Provisioning workflow and inventory logic between
// ipsecctl-api and the CLI.
//
// The IPSec workflow is split into four stages that can be driven and
// tested independently: resolve (flags/prompts -> intent), build
// (intent -> request), provision (submit + poll) and report.

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod model;
pub mod provider;
pub mod provision;
pub mod report;
pub mod resolve;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use builder::{SharedSecret, build_request};
pub use config::{ProviderConfig, TlsVerification};
pub use error::CoreError;
pub use provider::{CloudProvider, connect};
pub use provision::{PollPolicy, provision, submit, wait_until_available};
pub use report::ConnectionReport;
pub use resolve::{BatchInput, InputSource, ProvisioningFlags, ProvisioningIntent, resolve_intent};

pub use model::{
    ConnectionRequest, ConnectionResult, IkeVersion, InterfacePair, LifecycleState, RoutingMode,
    TunnelPayload, TunnelSpec, VolumeKind,
};

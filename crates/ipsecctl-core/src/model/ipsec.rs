// ── IPSec connection types ──

use std::fmt;

use serde::{Serialize, Serializer};
use strum::{Display, EnumString};

use super::crypto::{Dpd, PhaseOne, PhaseTwo};
use super::secret::SharedSecret;

/// Tunnel routing mode. Exactly one is chosen per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RoutingMode {
    Static,
    Policy,
    Bgp,
}

impl RoutingMode {
    /// Label shown to the CPE team: policy-based tunnels are configured
    /// as static on the customer side.
    pub fn report_label(self) -> RoutingMode {
        match self {
            Self::Policy => Self::Static,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum IkeVersion {
    V1,
    #[default]
    V2,
}

impl IkeVersion {
    /// Map the `--ike 1|2` flag value.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}

/// Lifecycle state of an IPSec connection.
///
/// `CREATING` is accepted as an alias of `PROVISIONING`; anything not
/// listed is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LifecycleState {
    #[strum(serialize = "PROVISIONING", serialize = "CREATING")]
    Provisioning,
    #[strum(serialize = "AVAILABLE")]
    Available,
    #[strum(serialize = "TERMINATING")]
    Terminating,
    #[strum(serialize = "TERMINATED")]
    Terminated,
    #[strum(serialize = "FAILED")]
    Failed,
    #[strum(default)]
    Unknown(String),
}

impl LifecycleState {
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|_| Self::Unknown(raw.to_owned()))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Still converging; keep polling.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Provisioning)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Provisioning => "PROVISIONING",
            Self::Available => "AVAILABLE",
            Self::Terminating => "TERMINATING",
            Self::Terminated => "TERMINATED",
            Self::Failed => "FAILED",
            Self::Unknown(raw) => raw,
        };
        f.write_str(s)
    }
}

impl Serialize for LifecycleState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One tunnel's inside addresses (BGP only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfacePair {
    /// Provider end (`-T/--inside-interface`).
    pub oracle_ip: String,
    /// CPE end (`-t/--outside-interface`).
    pub customer_ip: String,
}

/// Mode-specific part of a tunnel definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunnelPayload {
    None,
    EncryptionDomain {
        oracle_selectors: Vec<String>,
        cpe_selectors: Vec<String>,
    },
    Bgp {
        interfaces: InterfacePair,
        customer_asn: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelSpec {
    pub display_name: String,
    pub routing: RoutingMode,
    pub ike_version: IkeVersion,
    pub shared_secret: SharedSecret,
    pub oracle_initiation: &'static str,
    pub nat_traversal: &'static str,
    pub phase_one: PhaseOne,
    pub phase_two: PhaseTwo,
    pub dpd: Dpd,
    pub payload: TunnelPayload,
}

/// Fully built create-connection request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub compartment_id: String,
    pub cpe_id: String,
    pub drg_id: String,
    pub static_routes: Vec<String>,
    pub display_name: String,
    pub tunnels: [TunnelSpec; 2],
}

/// Connection id and state as returned by create/get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub id: String,
    pub display_name: Option<String>,
    pub state: LifecycleState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelEndpoint {
    pub id: String,
    pub display_name: Option<String>,
    /// Public IP allocated on the provider side.
    pub endpoint_ip: Option<String>,
}

/// Outcome of a successful provisioning run, used for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionResult {
    pub id: String,
    pub state: LifecycleState,
    pub tunnels: Vec<TunnelEndpoint>,
}

impl ConnectionResult {
    /// Endpoint IP of the tunnel with the given display name.
    pub fn endpoint_for(&self, tunnel_name: &str) -> Option<&str> {
        self.tunnels
            .iter()
            .find(|t| t.display_name.as_deref() == Some(tunnel_name))
            .and_then(|t| t.endpoint_ip.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drg {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpe {
    pub id: String,
    pub display_name: Option<String>,
    pub ip_address: String,
}

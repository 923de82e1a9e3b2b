// ── Input Resolver ──
//
// Turns command-line flags (plus prompts when interactive) into a fully
// specified `ProvisioningIntent`. Runs in two phases:
//
//   validate: flags and prompts only, no network call
//   lookup:   names/IPs -> ids through the injected provider

mod input;
mod lookup;
mod validate;

use serde::Serialize;

pub use input::{BatchInput, InputSource};
pub use lookup::lookup;
pub use validate::validate;

#[cfg(test)]
pub(crate) use input::scripted::ScriptedInput;

use crate::error::CoreError;
use crate::model::{IkeVersion, InterfacePair, RoutingMode};
use crate::provider::CloudProvider;

/// Placeholder remote route used when none is supplied.
pub const PLACEHOLDER_ROUTE: &str = "1.2.3.4/32";

/// Default BGP inside addresses: provider end.
pub const DEFAULT_ORACLE_INTERFACES: [&str; 2] = ["10.0.1.2/30", "10.0.2.2/30"];

/// Default BGP inside addresses: CPE end.
pub const DEFAULT_CUSTOMER_INTERFACES: [&str; 2] = ["10.0.1.1/30", "10.0.2.1/30"];

/// Raw `ipsec create` flags.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningFlags {
    pub compartment_id: Option<String>,
    pub compartment_name: Option<String>,
    pub cpe_id: Option<String>,
    pub cpe_ip: Option<String>,
    pub drg_id: Option<String>,
    pub drg_name: Option<String>,
    pub routes: Vec<String>,
    pub local_routes: Vec<String>,
    pub name: Option<String>,
    pub static_routing: bool,
    pub policy_routing: bool,
    pub bgp_routing: bool,
    pub ike_version: IkeVersion,
    pub asn: Option<String>,
    pub inside_interfaces: Vec<String>,
    pub outside_interfaces: Vec<String>,
    /// Apply defaults (placeholder route) instead of asking.
    pub best_practices: bool,
}

/// A resource given either by id or by a human-readable key
/// (compartment name, DRG display name, CPE IP address).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Key(String),
}

/// Mode-specific parts of the intent. Each variant carries exactly what
/// its routing mode requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPlan {
    Static,
    Policy {
        local_routes: Vec<String>,
    },
    Bgp {
        asn: u32,
        interfaces: [InterfacePair; 2],
    },
}

impl RoutingPlan {
    pub fn mode(&self) -> RoutingMode {
        match self {
            Self::Static => RoutingMode::Static,
            Self::Policy { .. } => RoutingMode::Policy,
            Self::Bgp { .. } => RoutingMode::Bgp,
        }
    }

    /// Routes advertised from the provider side (POLICY only).
    pub fn local_routes(&self) -> &[String] {
        match self {
            Self::Policy { local_routes } => local_routes,
            _ => &[],
        }
    }

    pub fn interfaces(&self) -> Option<&[InterfacePair; 2]> {
        match self {
            Self::Bgp { interfaces, .. } => Some(interfaces),
            _ => None,
        }
    }
}

/// Output of the validate phase: everything checked, ids still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub name: String,
    pub ike_version: IkeVersion,
    pub plan: RoutingPlan,
    pub remote_routes: Vec<String>,
    pub compartment: Selector,
    pub drg: Selector,
    pub cpe: Selector,
    pub warnings: Vec<String>,
}

/// Fully resolved provisioning intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningIntent {
    pub name: String,
    pub compartment_id: String,
    pub drg_id: String,
    pub cpe_id: String,
    /// Known when given as a flag or found in the CPE listing.
    pub cpe_ip: Option<String>,
    pub ike_version: IkeVersion,
    pub plan: RoutingPlan,
    pub remote_routes: Vec<String>,
    pub warnings: Vec<String>,
}

impl ProvisioningIntent {
    pub fn routing(&self) -> RoutingMode {
        self.plan.mode()
    }
}

/// Run both phases. Usage errors surface before any provider call.
pub async fn resolve_intent(
    flags: &ProvisioningFlags,
    input: &mut dyn InputSource,
    provider: &dyn CloudProvider,
    tenancy_id: &str,
) -> Result<ProvisioningIntent, CoreError> {
    let validated = validate(flags, input)?;
    lookup(provider, tenancy_id, validated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Compartment, Cpe, Drg};
    use crate::testing::FakeProvider;

    fn provider() -> FakeProvider {
        FakeProvider {
            compartments: vec![Compartment {
                id: "ocid1.compartment.oc1..net".into(),
                name: "network".into(),
            }],
            drgs: vec![Drg {
                id: "ocid1.drg.oc1..a".into(),
                display_name: Some("hub-drg".into()),
            }],
            cpes: vec![Cpe {
                id: "ocid1.cpe.oc1..a".into(),
                display_name: None,
                ip_address: "198.51.100.7".into(),
            }],
            ..FakeProvider::default()
        }
    }

    #[tokio::test]
    async fn usage_errors_happen_before_any_lookup() {
        let provider = provider();
        let flags = ProvisioningFlags {
            compartment_name: Some("network".into()),
            drg_name: Some("hub-drg".into()),
            cpe_ip: Some("198.51.100.7".into()),
            name: Some("vpn".into()),
            static_routing: true,
            bgp_routing: true,
            ..ProvisioningFlags::default()
        };

        let err = resolve_intent(&flags, &mut BatchInput, &provider, "ocid1.tenancy.oc1..t")
            .await
            .expect_err("two modes");
        assert!(matches!(err, CoreError::Usage { .. }));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn resolves_names_to_ids() {
        let provider = provider();
        let flags = ProvisioningFlags {
            compartment_name: Some("network".into()),
            drg_name: Some("hub-drg".into()),
            cpe_ip: Some("198.51.100.7".into()),
            name: Some("test-vpn".into()),
            static_routing: true,
            routes: vec!["192.168.0.0/16".into()],
            ..ProvisioningFlags::default()
        };

        let intent = resolve_intent(&flags, &mut BatchInput, &provider, "ocid1.tenancy.oc1..t")
            .await
            .expect("resolved");

        assert_eq!(intent.compartment_id, "ocid1.compartment.oc1..net");
        assert_eq!(intent.drg_id, "ocid1.drg.oc1..a");
        assert_eq!(intent.cpe_id, "ocid1.cpe.oc1..a");
        assert_eq!(intent.cpe_ip.as_deref(), Some("198.51.100.7"));
        assert_eq!(intent.routing(), RoutingMode::Static);
        assert!(intent.warnings.is_empty());
    }
}

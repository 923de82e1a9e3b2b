// ── Request Builder ──
//
// Pure mapping from a resolved intent plus a shared secret to the
// create-connection request. No I/O, no randomness: the caller injects
// the secret, so the same inputs always build the same request.

use crate::model::crypto::{NAT_TRAVERSAL, ORACLE_INITIATION};
use crate::model::{ConnectionRequest, DPD, PHASE_ONE, PHASE_TWO, TunnelPayload, TunnelSpec};
use crate::resolve::{ProvisioningIntent, RoutingPlan};

pub use crate::model::SharedSecret;

/// Display names of the two tunnels of connection `name`.
pub fn tunnel_names(name: &str) -> [String; 2] {
    [format!("T1-{name}"), format!("T2-{name}")]
}

pub fn build_request(intent: &ProvisioningIntent, secret: &SharedSecret) -> ConnectionRequest {
    let [first, second] = tunnel_names(&intent.name);

    ConnectionRequest {
        compartment_id: intent.compartment_id.clone(),
        cpe_id: intent.cpe_id.clone(),
        drg_id: intent.drg_id.clone(),
        static_routes: intent.remote_routes.clone(),
        display_name: intent.name.clone(),
        tunnels: [
            tunnel(intent, secret, first, 0),
            tunnel(intent, secret, second, 1),
        ],
    }
}

fn tunnel(
    intent: &ProvisioningIntent,
    secret: &SharedSecret,
    display_name: String,
    index: usize,
) -> TunnelSpec {
    let payload = match &intent.plan {
        RoutingPlan::Static => TunnelPayload::None,
        RoutingPlan::Policy { local_routes } => TunnelPayload::EncryptionDomain {
            oracle_selectors: local_routes.clone(),
            cpe_selectors: intent.remote_routes.clone(),
        },
        RoutingPlan::Bgp { asn, interfaces } => TunnelPayload::Bgp {
            interfaces: interfaces[index].clone(),
            customer_asn: *asn,
        },
    };

    TunnelSpec {
        display_name,
        routing: intent.routing(),
        ike_version: intent.ike_version,
        shared_secret: secret.clone(),
        oracle_initiation: ORACLE_INITIATION,
        nat_traversal: NAT_TRAVERSAL,
        phase_one: PHASE_ONE,
        phase_two: PHASE_TWO,
        dpd: DPD,
        payload,
    }
}

// ── API <-> domain type conversions ──
//
// Bridges raw `ipsecctl_api::types` into `crate::model` and back for the
// create-connection payload.

use ipsecctl_api::types as wire;

use crate::model::{
    AvailabilityDomain, Compartment, ConnectionRequest, ConnectionStatus, Cpe, Drg, Instance,
    LifecycleState, ResourceRef, TunnelEndpoint, TunnelPayload, TunnelSpec, Volume,
    VolumeAttachment, VolumeKind,
};

// ── Responses ───────────────────────────────────────────────────────

impl From<wire::Compartment> for Compartment {
    fn from(c: wire::Compartment) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<wire::AvailabilityDomain> for AvailabilityDomain {
    fn from(ad: wire::AvailabilityDomain) -> Self {
        Self { name: ad.name }
    }
}

impl From<wire::Drg> for Drg {
    fn from(d: wire::Drg) -> Self {
        Self {
            id: d.id,
            display_name: d.display_name,
        }
    }
}

impl From<wire::Cpe> for Cpe {
    fn from(c: wire::Cpe) -> Self {
        Self {
            id: c.id,
            display_name: c.display_name,
            ip_address: c.ip_address,
        }
    }
}

impl From<wire::IpSecConnection> for ConnectionStatus {
    fn from(c: wire::IpSecConnection) -> Self {
        Self {
            state: LifecycleState::parse(&c.lifecycle_state),
            id: c.id,
            display_name: c.display_name,
        }
    }
}

impl From<wire::IpSecConnectionTunnel> for TunnelEndpoint {
    fn from(t: wire::IpSecConnectionTunnel) -> Self {
        Self {
            id: t.id,
            display_name: t.display_name,
            endpoint_ip: t.vpn_ip,
        }
    }
}

impl From<wire::Instance> for Instance {
    fn from(i: wire::Instance) -> Self {
        Self {
            id: i.id,
            display_name: i.display_name,
        }
    }
}

impl From<wire::ResourceSummary> for ResourceRef {
    fn from(r: wire::ResourceSummary) -> Self {
        Self {
            id: r.identifier,
            display_name: r.display_name,
        }
    }
}

impl From<wire::VolumeAttachment> for VolumeAttachment {
    fn from(a: wire::VolumeAttachment) -> Self {
        Self {
            instance_id: a.instance_id,
            volume_id: a.volume_id,
            device: a.device,
            attachment_type: a.attachment_type,
        }
    }
}

impl From<wire::BootVolumeAttachment> for VolumeAttachment {
    fn from(a: wire::BootVolumeAttachment) -> Self {
        Self {
            instance_id: a.instance_id,
            volume_id: a.boot_volume_id,
            device: None,
            attachment_type: None,
        }
    }
}

pub(crate) fn volume(v: wire::Volume, kind: VolumeKind) -> Volume {
    Volume {
        id: v.id,
        display_name: v.display_name,
        kind,
    }
}

// ── Requests ────────────────────────────────────────────────────────

impl From<&TunnelSpec> for wire::CreateIpSecTunnelDetails {
    fn from(t: &TunnelSpec) -> Self {
        let (encryption_domain_config, bgp_session_config) = match &t.payload {
            TunnelPayload::None => (None, None),
            TunnelPayload::EncryptionDomain {
                oracle_selectors,
                cpe_selectors,
            } => (
                Some(wire::EncryptionDomainDetails {
                    oracle_traffic_selector: oracle_selectors.clone(),
                    cpe_traffic_selector: cpe_selectors.clone(),
                }),
                None,
            ),
            TunnelPayload::Bgp {
                interfaces,
                customer_asn,
            } => (
                None,
                Some(wire::BgpSessionDetails {
                    oracle_interface_ip: interfaces.oracle_ip.clone(),
                    customer_interface_ip: interfaces.customer_ip.clone(),
                    customer_bgp_asn: customer_asn.to_string(),
                }),
            ),
        };

        Self {
            display_name: t.display_name.clone(),
            routing: t.routing.to_string(),
            ike_version: t.ike_version.to_string(),
            shared_secret: t.shared_secret.expose().to_owned(),
            oracle_initiation: t.oracle_initiation.to_owned(),
            nat_translation_enabled: t.nat_traversal.to_owned(),
            phase_one_config: Some(wire::PhaseOneConfigDetails {
                is_custom_phase_one_config: true,
                authentication_algorithm: t.phase_one.authentication.to_owned(),
                encryption_algorithm: t.phase_one.encryption.to_owned(),
                diffie_helman_group: t.phase_one.dh_group.to_owned(),
                lifetime_in_seconds: t.phase_one.lifetime_secs,
            }),
            phase_two_config: Some(wire::PhaseTwoConfigDetails {
                is_custom_phase_two_config: true,
                authentication_algorithm: t.phase_two.authentication.to_owned(),
                encryption_algorithm: t.phase_two.encryption.to_owned(),
                lifetime_in_seconds: t.phase_two.lifetime_secs,
                is_pfs_enabled: t.phase_two.pfs_enabled,
                pfs_dh_group: t.phase_two.pfs_group.to_owned(),
            }),
            dpd_config: Some(wire::DpdConfig {
                dpd_mode: t.dpd.mode.to_owned(),
                dpd_timeout_in_sec: t.dpd.timeout_secs,
            }),
            encryption_domain_config,
            bgp_session_config,
        }
    }
}

impl From<&ConnectionRequest> for wire::CreateIpSecConnectionDetails {
    fn from(r: &ConnectionRequest) -> Self {
        Self {
            compartment_id: r.compartment_id.clone(),
            cpe_id: r.cpe_id.clone(),
            drg_id: r.drg_id.clone(),
            static_routes: r.static_routes.clone(),
            display_name: r.display_name.clone(),
            tunnel_configuration: r.tunnels.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::crypto::{NAT_TRAVERSAL, ORACLE_INITIATION};
    use crate::model::{
        DPD, IkeVersion, InterfacePair, PHASE_ONE, PHASE_TWO, RoutingMode, SharedSecret,
    };

    fn spec(payload: TunnelPayload) -> TunnelSpec {
        TunnelSpec {
            display_name: "T1-vpn".into(),
            routing: RoutingMode::Bgp,
            ike_version: IkeVersion::V1,
            shared_secret: SharedSecret::new("abc"),
            oracle_initiation: ORACLE_INITIATION,
            nat_traversal: NAT_TRAVERSAL,
            phase_one: PHASE_ONE,
            phase_two: PHASE_TWO,
            dpd: DPD,
            payload,
        }
    }

    #[test]
    fn bgp_tunnel_maps_session_and_asn_as_string() {
        let details: wire::CreateIpSecTunnelDetails = (&spec(TunnelPayload::Bgp {
            interfaces: InterfacePair {
                oracle_ip: "10.0.1.2/30".into(),
                customer_ip: "10.0.1.1/30".into(),
            },
            customer_asn: 65_000,
        }))
            .into();

        assert_eq!(details.routing, "BGP");
        assert_eq!(details.ike_version, "V1");
        assert_eq!(details.shared_secret, "abc");
        assert!(details.encryption_domain_config.is_none());
        let bgp = details.bgp_session_config.expect("bgp session");
        assert_eq!(bgp.oracle_interface_ip, "10.0.1.2/30");
        assert_eq!(bgp.customer_interface_ip, "10.0.1.1/30");
        assert_eq!(bgp.customer_bgp_asn, "65000");
    }

    #[test]
    fn fixed_crypto_parameters_are_custom() {
        let details: wire::CreateIpSecTunnelDetails = (&spec(TunnelPayload::None)).into();
        let p1 = details.phase_one_config.expect("phase one");
        assert!(p1.is_custom_phase_one_config);
        assert_eq!(p1.authentication_algorithm, "SHA2_384");
        assert_eq!(p1.diffie_helman_group, "GROUP20");
        assert_eq!(p1.lifetime_in_seconds, 28_800);
        let p2 = details.phase_two_config.expect("phase two");
        assert!(p2.is_pfs_enabled);
        assert_eq!(p2.pfs_dh_group, "GROUP5");
        assert_eq!(p2.encryption_algorithm, "AES_256_GCM");
        let dpd = details.dpd_config.expect("dpd");
        assert_eq!(dpd.dpd_timeout_in_sec, 20);
        assert_eq!(details.oracle_initiation, "INITIATOR_OR_RESPONDER");
        assert_eq!(details.nat_translation_enabled, "AUTO");
    }

    #[test]
    fn creating_state_is_provisioning() {
        let status: ConnectionStatus = wire::IpSecConnection {
            id: "c1".into(),
            display_name: None,
            lifecycle_state: "CREATING".into(),
            cpe_id: None,
            drg_id: None,
        }
        .into();
        assert_eq!(status.state, LifecycleState::Provisioning);
    }
}

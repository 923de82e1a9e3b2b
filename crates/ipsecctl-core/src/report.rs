// ── Connection hand-off report ──
//
// Everything the CPE team needs to configure their side, assembled from
// the intent, the provisioning result and the shared secret. The CLI
// renders it as a fixed-width table or serializes it.

use serde::Serialize;

use crate::builder::tunnel_names;
use crate::model::{
    ConnectionResult, IkeVersion, PHASE_ONE, PHASE_TWO, PhaseOne, PhaseTwo, RoutingMode,
    SharedSecret,
};
use crate::resolve::ProvisioningIntent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseOneSummary {
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub dh_group: String,
    pub ike_lifetime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTwoSummary {
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub perfect_forward_secrecy: String,
    pub dh_group: String,
    pub ipsec_lifetime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelReport {
    pub name: String,
    pub endpoint_ip: Option<String>,
    pub shared_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_interface_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe_interface_ip: Option<String>,
    pub phase_one: PhaseOneSummary,
    pub phase_two: PhaseTwoSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub connection_id: String,
    pub name: String,
    pub cpe_ip: Option<String>,
    pub ike_version: IkeVersion,
    /// POLICY is shown as STATIC.
    pub routing_type: RoutingMode,
    pub advertised_routes: Vec<String>,
    pub tunnels: Vec<TunnelReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// One line of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// Full-width row (tunnel name).
    Heading(String),
    Field { label: &'static str, value: String },
}

impl ConnectionReport {
    pub fn new(
        intent: &ProvisioningIntent,
        result: &ConnectionResult,
        secret: &SharedSecret,
    ) -> Self {
        let interfaces = intent.plan.interfaces();
        let tunnels = tunnel_names(&intent.name)
            .into_iter()
            .enumerate()
            .map(|(i, name)| TunnelReport {
                endpoint_ip: result.endpoint_for(&name).map(str::to_owned),
                shared_secret: secret.expose().to_owned(),
                oracle_interface_ip: interfaces.map(|pairs| pairs[i].oracle_ip.clone()),
                cpe_interface_ip: interfaces.map(|pairs| pairs[i].customer_ip.clone()),
                phase_one: phase_one_summary(&PHASE_ONE),
                phase_two: phase_two_summary(&PHASE_TWO),
                name,
            })
            .collect();

        Self {
            connection_id: result.id.clone(),
            name: intent.name.clone(),
            cpe_ip: intent.cpe_ip.clone(),
            ike_version: intent.ike_version,
            routing_type: intent.routing().report_label(),
            advertised_routes: intent.plan.local_routes().to_vec(),
            tunnels,
            warnings: intent.warnings.clone(),
        }
    }

    /// Rows in display order.
    pub fn lines(&self) -> Vec<ReportLine> {
        let field = |label, value: &str| ReportLine::Field {
            label,
            value: value.to_owned(),
        };

        let mut lines = vec![
            field("CPE IP", self.cpe_ip.as_deref().unwrap_or("unknown")),
            field("IKE version", &self.ike_version.to_string()),
            field("Routing type", &self.routing_type.to_string()),
        ];
        for route in &self.advertised_routes {
            lines.push(field("Advertised route", route));
        }

        for tunnel in &self.tunnels {
            lines.push(ReportLine::Heading(tunnel.name.clone()));
            lines.push(field(
                "  Tunnel IP endpoint",
                tunnel.endpoint_ip.as_deref().unwrap_or("pending"),
            ));
            lines.push(field("  Shared secret", &tunnel.shared_secret));
            if let Some(ip) = &tunnel.oracle_interface_ip {
                lines.push(field("  Oracle interface IP", ip));
            }
            if let Some(ip) = &tunnel.cpe_interface_ip {
                lines.push(field("  CPE interface IP", ip));
            }

            let p1 = &tunnel.phase_one;
            lines.push(field("  Phase 1 info", ""));
            lines.push(field("    Authentication algorithm", &p1.authentication_algorithm));
            lines.push(field("    Encryption algorithm", &p1.encryption_algorithm));
            lines.push(field("    DH group", &p1.dh_group));
            lines.push(field("    IKE lifetime", &p1.ike_lifetime));

            let p2 = &tunnel.phase_two;
            lines.push(field("  Phase 2 info", ""));
            lines.push(field("    Authentication algorithm", &p2.authentication_algorithm));
            lines.push(field("    Encryption algorithm", &p2.encryption_algorithm));
            lines.push(field("    Perfect-forward secrecy", &p2.perfect_forward_secrecy));
            lines.push(field("    DH group", &p2.dh_group));
            lines.push(field("    IPSec lifetime", &p2.ipsec_lifetime));
        }

        lines
    }
}

// ── Labels ──────────────────────────────────────────────────────────

fn phase_one_summary(p: &PhaseOne) -> PhaseOneSummary {
    PhaseOneSummary {
        authentication_algorithm: algorithm_label(p.authentication),
        encryption_algorithm: algorithm_label(p.encryption),
        dh_group: dh_group_label(p.dh_group),
        ike_lifetime: lifetime_label(p.lifetime_secs),
    }
}

fn phase_two_summary(p: &PhaseTwo) -> PhaseTwoSummary {
    PhaseTwoSummary {
        authentication_algorithm: algorithm_label(p.authentication),
        encryption_algorithm: algorithm_label(p.encryption),
        perfect_forward_secrecy: if p.pfs_enabled { "Enabled" } else { "Disabled" }.into(),
        dh_group: dh_group_label(p.pfs_group),
        ipsec_lifetime: lifetime_label(p.lifetime_secs),
    }
}

fn algorithm_label(id: &str) -> String {
    match id {
        "HMAC_SHA2_256_128" => "HMAC-SHA-256-128".into(),
        "HMAC_SHA2_384_192" => "HMAC-SHA-384-192".into(),
        "HMAC_SHA1_128" => "HMAC-SHA-1-128".into(),
        other => other.replace('_', "-"),
    }
}

fn dh_group_label(id: &str) -> String {
    let label = match id {
        "GROUP2" => "group 2 (MODP 1024-bit)",
        "GROUP5" => "group 5 (MODP 1536-bit)",
        "GROUP14" => "group 14 (MODP 2048-bit)",
        "GROUP19" => "group 19 (ECP 256-bit random)",
        "GROUP20" => "group 20 (ECP 384-bit random)",
        "GROUP24" => "group 24 (MODP 2048-bit, 256-bit subgroup)",
        other => other,
    };
    label.to_owned()
}

fn lifetime_label(secs: u32) -> String {
    let (n, unit) = if secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        return format!("{secs} seconds");
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{secs} seconds ({n} {unit}{plural})")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{InterfacePair, LifecycleState, TunnelEndpoint};
    use crate::resolve::RoutingPlan;

    fn intent(plan: RoutingPlan) -> ProvisioningIntent {
        ProvisioningIntent {
            name: "branch".into(),
            compartment_id: "c1".into(),
            drg_id: "drg1".into(),
            cpe_id: "cpe1".into(),
            cpe_ip: Some("198.51.100.7".into()),
            ike_version: IkeVersion::V2,
            plan,
            remote_routes: vec!["192.168.0.0/24".into()],
            warnings: Vec::new(),
        }
    }

    fn result() -> ConnectionResult {
        ConnectionResult {
            id: "ipsec1".into(),
            state: LifecycleState::Available,
            tunnels: vec![
                TunnelEndpoint {
                    id: "t2".into(),
                    display_name: Some("T2-branch".into()),
                    endpoint_ip: Some("203.0.113.11".into()),
                },
                TunnelEndpoint {
                    id: "t1".into(),
                    display_name: Some("T1-branch".into()),
                    endpoint_ip: Some("203.0.113.10".into()),
                },
            ],
        }
    }

    #[test]
    fn labels() {
        assert_eq!(algorithm_label("SHA2_384"), "SHA2-384");
        assert_eq!(algorithm_label("AES_256_CBC"), "AES-256-CBC");
        assert_eq!(algorithm_label("HMAC_SHA2_256_128"), "HMAC-SHA-256-128");
        assert_eq!(dh_group_label("GROUP20"), "group 20 (ECP 384-bit random)");
        assert_eq!(dh_group_label("GROUP5"), "group 5 (MODP 1536-bit)");
        assert_eq!(lifetime_label(28_800), "28800 seconds (8 hours)");
        assert_eq!(lifetime_label(3_600), "3600 seconds (1 hour)");
        assert_eq!(lifetime_label(90), "90 seconds");
    }

    #[test]
    fn tunnels_are_matched_by_name_not_position() {
        let report = ConnectionReport::new(
            &intent(RoutingPlan::Static),
            &result(),
            &SharedSecret::new("s3cr3t"),
        );
        assert_eq!(report.tunnels[0].name, "T1-branch");
        assert_eq!(report.tunnels[0].endpoint_ip.as_deref(), Some("203.0.113.10"));
        assert_eq!(report.tunnels[1].endpoint_ip.as_deref(), Some("203.0.113.11"));
        assert_eq!(report.tunnels[1].shared_secret, "s3cr3t");
    }

    #[test]
    fn policy_is_reported_as_static_with_advertised_routes() {
        let report = ConnectionReport::new(
            &intent(RoutingPlan::Policy {
                local_routes: vec!["10.0.0.0/16".into(), "10.1.0.0/16".into()],
            }),
            &result(),
            &SharedSecret::new("s"),
        );
        assert_eq!(report.routing_type, RoutingMode::Static);

        let advertised: Vec<_> = report
            .lines()
            .into_iter()
            .filter_map(|line| match line {
                ReportLine::Field {
                    label: "Advertised route",
                    value,
                } => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(advertised, ["10.0.0.0/16", "10.1.0.0/16"]);
    }

    #[test]
    fn bgp_tunnels_list_their_own_interface_pair() {
        let report = ConnectionReport::new(
            &intent(RoutingPlan::Bgp {
                asn: 65_000,
                interfaces: [
                    InterfacePair {
                        oracle_ip: "10.0.1.2/30".into(),
                        customer_ip: "10.0.1.1/30".into(),
                    },
                    InterfacePair {
                        oracle_ip: "10.0.2.2/30".into(),
                        customer_ip: "10.0.2.1/30".into(),
                    },
                ],
            }),
            &result(),
            &SharedSecret::new("s"),
        );
        assert_eq!(
            report.tunnels[1].oracle_interface_ip.as_deref(),
            Some("10.0.2.2/30")
        );
        assert_eq!(report.tunnels[1].cpe_interface_ip.as_deref(), Some("10.0.2.1/30"));
        assert_eq!(report.routing_type, RoutingMode::Bgp);
    }

    #[test]
    fn static_report_has_no_interface_rows() {
        let report = ConnectionReport::new(
            &intent(RoutingPlan::Static),
            &result(),
            &SharedSecret::new("s"),
        );
        let lines = report.lines();
        assert!(!lines.iter().any(|l| matches!(
            l,
            ReportLine::Field {
                label: "  Oracle interface IP",
                ..
            }
        )));
        assert_eq!(
            lines
                .iter()
                .filter(|l| matches!(l, ReportLine::Heading(_)))
                .count(),
            2
        );
    }

    #[test]
    fn json_shape() {
        let report = ConnectionReport::new(
            &intent(RoutingPlan::Static),
            &result(),
            &SharedSecret::new("s"),
        );
        let value = serde_json::to_value(&report).expect("serializable");
        assert_eq!(value["routing_type"], "STATIC");
        assert_eq!(value["ike_version"], "V2");
        assert_eq!(value["tunnels"][0]["phase_one"]["dh_group"], "group 20 (ECP 384-bit random)");
        assert!(value.get("warnings").is_none());
    }
}

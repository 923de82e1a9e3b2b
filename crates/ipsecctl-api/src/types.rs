// Wire types for the provider REST API.
//
// Field names follow the provider's camelCase JSON schema. Response
// types tolerate missing optional fields; request types skip `None`.

use serde::{Deserialize, Serialize};

// ── Collections ─────────────────────────────────────────────────────

/// `{ "items": [...] }` wrapper used by search and managed-instance endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Error body returned by the provider on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Identity ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compartment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDomain {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

// ── Networking ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drg {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cpe {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub ip_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIpSecConnectionDetails {
    pub compartment_id: String,
    pub cpe_id: String,
    pub drg_id: String,
    pub static_routes: Vec<String>,
    pub display_name: String,
    pub tunnel_configuration: Vec<CreateIpSecTunnelDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIpSecTunnelDetails {
    pub display_name: String,
    pub routing: String,
    pub ike_version: String,
    pub shared_secret: String,
    pub oracle_initiation: String,
    pub nat_translation_enabled: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_one_config: Option<PhaseOneConfigDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_two_config: Option<PhaseTwoConfigDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpd_config: Option<DpdConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_domain_config: Option<EncryptionDomainDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgp_session_config: Option<BgpSessionDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseOneConfigDetails {
    pub is_custom_phase_one_config: bool,
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub diffie_helman_group: String,
    pub lifetime_in_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTwoConfigDetails {
    pub is_custom_phase_two_config: bool,
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub lifetime_in_seconds: u32,
    pub is_pfs_enabled: bool,
    pub pfs_dh_group: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DpdConfig {
    pub dpd_mode: String,
    pub dpd_timeout_in_sec: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionDomainDetails {
    pub oracle_traffic_selector: Vec<String>,
    pub cpe_traffic_selector: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpSessionDetails {
    pub oracle_interface_ip: String,
    pub customer_interface_ip: String,
    pub customer_bgp_asn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpSecConnection {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub lifecycle_state: String,
    #[serde(default)]
    pub cpe_id: Option<String>,
    #[serde(default)]
    pub drg_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpSecConnectionTunnel {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub vpn_ip: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Storage / compute ───────────────────────────────────────────────

/// Block volume or boot volume summary (both share this shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeAttachment {
    #[serde(default)]
    pub id: Option<String>,
    pub instance_id: String,
    pub volume_id: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub attachment_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootVolumeAttachment {
    #[serde(default)]
    pub id: Option<String>,
    pub instance_id: String,
    pub boot_volume_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

// ── Search / managed instances ──────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSearchDetails {
    #[serde(rename = "type")]
    pub search_type: String,
    pub query: String,
}

impl StructuredSearchDetails {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            search_type: "Structured".into(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// A Windows update or an updatable Linux package; only the name is used.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSummary {
    pub name: String,
}

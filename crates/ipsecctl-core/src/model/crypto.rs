// Fixed IKE/IPSec parameters applied to every tunnel.
//
// Values are the provider's enum identifiers; `crate::report` turns them
// into the labels network teams expect on the CPE side.

use serde::Serialize;

/// Oracle-side initiation policy for both tunnels.
pub const ORACLE_INITIATION: &str = "INITIATOR_OR_RESPONDER";

/// NAT traversal setting for both tunnels.
pub const NAT_TRAVERSAL: &str = "AUTO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseOne {
    pub authentication: &'static str,
    pub encryption: &'static str,
    pub dh_group: &'static str,
    pub lifetime_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTwo {
    pub authentication: &'static str,
    pub encryption: &'static str,
    pub lifetime_secs: u32,
    pub pfs_enabled: bool,
    pub pfs_group: &'static str,
}

/// Dead peer detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dpd {
    pub mode: &'static str,
    pub timeout_secs: u32,
}

pub const PHASE_ONE: PhaseOne = PhaseOne {
    authentication: "SHA2_384",
    encryption: "AES_256_CBC",
    dh_group: "GROUP20",
    lifetime_secs: 28_800,
};

pub const PHASE_TWO: PhaseTwo = PhaseTwo {
    authentication: "HMAC_SHA2_256_128",
    encryption: "AES_256_GCM",
    lifetime_secs: 3_600,
    pfs_enabled: true,
    pfs_group: "GROUP5",
};

pub const DPD: Dpd = Dpd {
    mode: "INITIATE_AND_RESPOND",
    timeout_secs: 20,
};

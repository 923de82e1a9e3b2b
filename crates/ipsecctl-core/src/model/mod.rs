// ── Domain model ──
//
// Canonical types consumed by the workflow stages and the CLI. Wire
// shapes live in `ipsecctl_api::types`; `crate::convert` bridges them.

pub mod crypto;
pub mod inventory;
pub mod ipsec;
pub mod secret;

pub use crypto::{DPD, Dpd, PHASE_ONE, PHASE_TWO, PhaseOne, PhaseTwo};
pub use inventory::{
    AttachmentRow, AvailabilityDomain, Compartment, Instance, ResourceRef, UnattachedVolume,
    Volume, VolumeAttachment, VolumeKind, WaveUpdates,
};
pub use ipsec::{
    ConnectionRequest, ConnectionResult, ConnectionStatus, Cpe, Drg, IkeVersion, InterfacePair,
    LifecycleState, RoutingMode, TunnelEndpoint, TunnelPayload, TunnelSpec,
};
pub use secret::SharedSecret;

// ipsecctl-api: Async Rust client for the provider control-plane REST API
//
// Covers the identity (compartments, availability domains), networking
// (DRGs, CPEs, IPSec connections), block storage, resource search and
// managed-instance update endpoints that ipsecctl consumes.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod identity;
mod network;
mod search;
mod storage;

pub use client::CloudClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

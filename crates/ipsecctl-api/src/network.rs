// Networking endpoints: DRGs, CPEs and IPSec connections.

use std::convert::identity;

use tracing::debug;

use crate::client::CloudClient;
use crate::error::Error;
use crate::types::{
    CreateIpSecConnectionDetails, Cpe, Drg, IpSecConnection, IpSecConnectionTunnel,
};

impl CloudClient {
    // ── Gateways & customer equipment ────────────────────────────────

    /// `GET drgs?compartmentId={compartment}`
    pub async fn list_drgs(&self, compartment_id: &str) -> Result<Vec<Drg>, Error> {
        self.get_all_pages(
            "drgs",
            &[("compartmentId", compartment_id.to_owned())],
            identity,
        )
        .await
    }

    /// `GET cpes?compartmentId={compartment}`
    pub async fn list_cpes(&self, compartment_id: &str) -> Result<Vec<Cpe>, Error> {
        self.get_all_pages(
            "cpes",
            &[("compartmentId", compartment_id.to_owned())],
            identity,
        )
        .await
    }

    // ── IPSec connections ────────────────────────────────────────────

    /// Submit a new IPSec connection. The provider answers immediately
    /// with the resource in a transient lifecycle state.
    ///
    /// `POST ipsecConnections`
    pub async fn create_ip_sec_connection(
        &self,
        details: &CreateIpSecConnectionDetails,
    ) -> Result<IpSecConnection, Error> {
        debug!(name = %details.display_name, "creating IPSec connection");
        self.post("ipsecConnections", details).await
    }

    /// `GET ipsecConnections/{id}`
    pub async fn get_ip_sec_connection(&self, id: &str) -> Result<IpSecConnection, Error> {
        self.get(&format!("ipsecConnections/{id}"), &[]).await
    }

    /// `GET ipsecConnections/{id}/tunnels`
    pub async fn list_ip_sec_connection_tunnels(
        &self,
        id: &str,
    ) -> Result<Vec<IpSecConnectionTunnel>, Error> {
        self.get_all_pages(&format!("ipsecConnections/{id}/tunnels"), &[], identity)
            .await
    }
}

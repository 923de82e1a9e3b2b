// ── Provider abstraction ──
//
// Every workflow stage talks to the cloud through `&dyn CloudProvider`,
// never a global client. `CloudClient` is the production implementation;
// tests substitute an in-memory fake.

use async_trait::async_trait;
use ipsecctl_api::types::CreateIpSecConnectionDetails;
use ipsecctl_api::{CloudClient, TransportConfig};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    AvailabilityDomain, Compartment, ConnectionRequest, ConnectionStatus, Cpe, Drg, Instance,
    ResourceRef, TunnelEndpoint, Volume, VolumeAttachment, VolumeKind,
};

/// Control-plane operations used by ipsecctl.
///
/// List operations return every page.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    // ── Identity ─────────────────────────────────────────────────────

    /// All compartments in the subtree below `parent_id`.
    async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, CoreError>;

    async fn list_availability_domains(
        &self,
        tenancy_id: &str,
    ) -> Result<Vec<AvailabilityDomain>, CoreError>;

    // ── Networking ───────────────────────────────────────────────────

    async fn list_drgs(&self, compartment_id: &str) -> Result<Vec<Drg>, CoreError>;

    async fn list_cpes(&self, compartment_id: &str) -> Result<Vec<Cpe>, CoreError>;

    async fn create_connection(
        &self,
        request: &ConnectionRequest,
    ) -> Result<ConnectionStatus, CoreError>;

    async fn get_connection(&self, id: &str) -> Result<ConnectionStatus, CoreError>;

    async fn list_tunnels(&self, connection_id: &str) -> Result<Vec<TunnelEndpoint>, CoreError>;

    // ── Storage / compute ────────────────────────────────────────────

    async fn list_volumes(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<Volume>, CoreError>;

    /// Boot volume attachments require an availability domain.
    async fn list_attachments(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: Option<&str>,
    ) -> Result<Vec<VolumeAttachment>, CoreError>;

    async fn get_volume(&self, kind: VolumeKind, id: &str) -> Result<Volume, CoreError>;

    async fn get_instance(&self, id: &str) -> Result<Instance, CoreError>;

    // ── Search / updates ─────────────────────────────────────────────

    async fn search_resources(&self, query: &str) -> Result<Vec<ResourceRef>, CoreError>;

    async fn windows_security_updates(
        &self,
        instance_id: &str,
    ) -> Result<Vec<String>, CoreError>;

    async fn linux_security_updates(&self, instance_id: &str) -> Result<Vec<String>, CoreError>;
}

/// Build the production client from a resolved provider config.
pub fn connect(config: &ProviderConfig) -> Result<CloudClient, CoreError> {
    let transport = TransportConfig {
        tls: (&config.tls).into(),
        timeout: config.timeout,
    };
    debug!(endpoint = %config.endpoint, "building provider client");
    Ok(CloudClient::from_token(
        config.endpoint.as_str(),
        &config.token,
        &transport,
    )?)
}

fn collect<W, D: From<W>>(items: Vec<W>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}

#[async_trait]
impl CloudProvider for CloudClient {
    async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, CoreError> {
        Ok(collect(CloudClient::list_compartments(self, parent_id).await?))
    }

    async fn list_availability_domains(
        &self,
        tenancy_id: &str,
    ) -> Result<Vec<AvailabilityDomain>, CoreError> {
        Ok(collect(
            CloudClient::list_availability_domains(self, tenancy_id).await?,
        ))
    }

    async fn list_drgs(&self, compartment_id: &str) -> Result<Vec<Drg>, CoreError> {
        Ok(collect(CloudClient::list_drgs(self, compartment_id).await?))
    }

    async fn list_cpes(&self, compartment_id: &str) -> Result<Vec<Cpe>, CoreError> {
        Ok(collect(CloudClient::list_cpes(self, compartment_id).await?))
    }

    async fn create_connection(
        &self,
        request: &ConnectionRequest,
    ) -> Result<ConnectionStatus, CoreError> {
        let details = CreateIpSecConnectionDetails::from(request);
        Ok(self.create_ip_sec_connection(&details).await?.into())
    }

    async fn get_connection(&self, id: &str) -> Result<ConnectionStatus, CoreError> {
        Ok(self.get_ip_sec_connection(id).await?.into())
    }

    async fn list_tunnels(&self, connection_id: &str) -> Result<Vec<TunnelEndpoint>, CoreError> {
        Ok(collect(
            self.list_ip_sec_connection_tunnels(connection_id).await?,
        ))
    }

    async fn list_volumes(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<Volume>, CoreError> {
        let raw = match kind {
            VolumeKind::Block => {
                CloudClient::list_volumes(self, compartment_id, availability_domain).await?
            }
            VolumeKind::Boot => {
                self.list_boot_volumes(compartment_id, availability_domain)
                    .await?
            }
        };
        Ok(raw.into_iter().map(|v| convert::volume(v, kind)).collect())
    }

    async fn list_attachments(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: Option<&str>,
    ) -> Result<Vec<VolumeAttachment>, CoreError> {
        match (kind, availability_domain) {
            (VolumeKind::Block, ad) => Ok(collect(
                self.list_volume_attachments(compartment_id, ad).await?,
            )),
            (VolumeKind::Boot, Some(ad)) => Ok(collect(
                self.list_boot_volume_attachments(compartment_id, ad)
                    .await?,
            )),
            (VolumeKind::Boot, None) => Err(CoreError::Internal(
                "boot volume attachments require an availability domain".into(),
            )),
        }
    }

    async fn get_volume(&self, kind: VolumeKind, id: &str) -> Result<Volume, CoreError> {
        let raw = match kind {
            VolumeKind::Block => CloudClient::get_volume(self, id).await?,
            VolumeKind::Boot => self.get_boot_volume(id).await?,
        };
        Ok(convert::volume(raw, kind))
    }

    async fn get_instance(&self, id: &str) -> Result<Instance, CoreError> {
        Ok(CloudClient::get_instance(self, id).await?.into())
    }

    async fn search_resources(&self, query: &str) -> Result<Vec<ResourceRef>, CoreError> {
        Ok(collect(CloudClient::search_resources(self, query).await?))
    }

    async fn windows_security_updates(
        &self,
        instance_id: &str,
    ) -> Result<Vec<String>, CoreError> {
        let updates = self.list_available_windows_updates(instance_id).await?;
        Ok(updates.into_iter().map(|u| u.name).collect())
    }

    async fn linux_security_updates(&self, instance_id: &str) -> Result<Vec<String>, CoreError> {
        let updates = self.list_updatable_packages(instance_id).await?;
        Ok(updates.into_iter().map(|u| u.name).collect())
    }
}

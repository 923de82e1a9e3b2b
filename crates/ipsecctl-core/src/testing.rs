// In-memory `CloudProvider` used by unit tests. Records every call.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::model::{
    AvailabilityDomain, Compartment, ConnectionRequest, ConnectionStatus, Cpe, Drg, Instance,
    LifecycleState, ResourceRef, TunnelEndpoint, Volume, VolumeAttachment, VolumeKind,
};
use crate::provider::CloudProvider;

pub(crate) const CONNECTION_ID: &str = "ocid1.ipsecconnection.oc1..test";

#[derive(Default)]
pub(crate) struct FakeProvider {
    pub compartments: Vec<Compartment>,
    pub availability_domains: Vec<AvailabilityDomain>,
    pub drgs: Vec<Drg>,
    pub cpes: Vec<Cpe>,
    /// States returned by successive `get_connection` calls; the last repeats.
    pub states: Mutex<VecDeque<LifecycleState>>,
    pub tunnels: Vec<TunnelEndpoint>,
    pub fail_create: bool,
    /// (kind, compartment, availability domain, volume)
    pub volumes: Vec<(VolumeKind, String, String, Volume)>,
    /// (kind, compartment, availability domain, attachment)
    pub attachments: Vec<(VolumeKind, String, String, VolumeAttachment)>,
    pub instances: HashMap<String, Instance>,
    pub search_hits: Vec<ResourceRef>,
    /// Instance id -> updates; missing ids fail.
    pub windows_updates: HashMap<String, Vec<String>>,
    pub linux_updates: HashMap<String, Vec<String>>,
    pub created: Mutex<Option<ConnectionRequest>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn with_states(states: impl IntoIterator<Item = LifecycleState>) -> Self {
        Self {
            states: Mutex::new(states.into_iter().collect()),
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

fn not_found(what: &str) -> CoreError {
    CoreError::Api {
        message: format!("{what} not found"),
        code: Some("NotAuthorizedOrNotFound".into()),
        status: Some(404),
        request_id: None,
    }
}

#[async_trait]
impl CloudProvider for FakeProvider {
    async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, CoreError> {
        self.record(format!("list_compartments {parent_id}"));
        Ok(self.compartments.clone())
    }

    async fn list_availability_domains(
        &self,
        tenancy_id: &str,
    ) -> Result<Vec<AvailabilityDomain>, CoreError> {
        self.record(format!("list_availability_domains {tenancy_id}"));
        Ok(self.availability_domains.clone())
    }

    async fn list_drgs(&self, compartment_id: &str) -> Result<Vec<Drg>, CoreError> {
        self.record(format!("list_drgs {compartment_id}"));
        Ok(self.drgs.clone())
    }

    async fn list_cpes(&self, compartment_id: &str) -> Result<Vec<Cpe>, CoreError> {
        self.record(format!("list_cpes {compartment_id}"));
        Ok(self.cpes.clone())
    }

    async fn create_connection(
        &self,
        request: &ConnectionRequest,
    ) -> Result<ConnectionStatus, CoreError> {
        self.record("create_connection");
        if self.fail_create {
            return Err(CoreError::Api {
                message: "LimitExceeded".into(),
                code: Some("LimitExceeded".into()),
                status: Some(400),
                request_id: None,
            });
        }
        *self.created.lock().expect("created lock") = Some(request.clone());
        Ok(ConnectionStatus {
            id: CONNECTION_ID.into(),
            display_name: Some(request.display_name.clone()),
            state: LifecycleState::Provisioning,
        })
    }

    async fn get_connection(&self, id: &str) -> Result<ConnectionStatus, CoreError> {
        self.record(format!("get_connection {id}"));
        let mut states = self.states.lock().expect("states lock");
        let state = if states.len() > 1 {
            states.pop_front()
        } else {
            states.front().cloned()
        }
        .unwrap_or(LifecycleState::Available);
        Ok(ConnectionStatus {
            id: id.into(),
            display_name: None,
            state,
        })
    }

    async fn list_tunnels(&self, connection_id: &str) -> Result<Vec<TunnelEndpoint>, CoreError> {
        self.record(format!("list_tunnels {connection_id}"));
        Ok(self.tunnels.clone())
    }

    async fn list_volumes(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<Volume>, CoreError> {
        self.record(format!(
            "list_volumes {kind} {compartment_id} {availability_domain}"
        ));
        Ok(self
            .volumes
            .iter()
            .filter(|(k, c, ad, _)| {
                *k == kind && c == compartment_id && ad == availability_domain
            })
            .map(|(.., v)| v.clone())
            .collect())
    }

    async fn list_attachments(
        &self,
        kind: VolumeKind,
        compartment_id: &str,
        availability_domain: Option<&str>,
    ) -> Result<Vec<VolumeAttachment>, CoreError> {
        self.record(format!("list_attachments {kind} {compartment_id}"));
        Ok(self
            .attachments
            .iter()
            .filter(|(k, c, ad, _)| {
                *k == kind
                    && c == compartment_id
                    && availability_domain.is_none_or(|want| want == ad)
            })
            .map(|(.., a)| a.clone())
            .collect())
    }

    async fn get_volume(&self, kind: VolumeKind, id: &str) -> Result<Volume, CoreError> {
        self.record(format!("get_volume {kind} {id}"));
        self.volumes
            .iter()
            .find(|(k, .., v)| *k == kind && v.id == id)
            .map(|(.., v)| v.clone())
            .ok_or_else(|| not_found(id))
    }

    async fn get_instance(&self, id: &str) -> Result<Instance, CoreError> {
        self.record(format!("get_instance {id}"));
        self.instances.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn search_resources(&self, query: &str) -> Result<Vec<ResourceRef>, CoreError> {
        self.record(format!("search_resources {query}"));
        Ok(self.search_hits.clone())
    }

    async fn windows_security_updates(
        &self,
        instance_id: &str,
    ) -> Result<Vec<String>, CoreError> {
        self.record(format!("windows_security_updates {instance_id}"));
        self.windows_updates
            .get(instance_id)
            .cloned()
            .ok_or_else(|| not_found(instance_id))
    }

    async fn linux_security_updates(&self, instance_id: &str) -> Result<Vec<String>, CoreError> {
        self.record(format!("linux_security_updates {instance_id}"));
        self.linux_updates
            .get(instance_id)
            .cloned()
            .ok_or_else(|| not_found(instance_id))
    }
}

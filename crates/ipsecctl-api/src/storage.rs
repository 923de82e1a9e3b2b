// Block storage and compute endpoints used by the volume inventory.
//
// Volume and attachment listings are scoped to one compartment and one
// availability domain; the attachment listing may omit the domain.

use std::convert::identity;

use crate::client::CloudClient;
use crate::error::Error;
use crate::types::{BootVolumeAttachment, Instance, Volume, VolumeAttachment};

fn scope(compartment_id: &str, availability_domain: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("compartmentId", compartment_id.to_owned())];
    if let Some(ad) = availability_domain {
        params.push(("availabilityDomain", ad.to_owned()));
    }
    params
}

impl CloudClient {
    // ── Volumes ──────────────────────────────────────────────────────

    /// `GET volumes?compartmentId=&availabilityDomain=`
    pub async fn list_volumes(
        &self,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<Volume>, Error> {
        self.get_all_pages(
            "volumes",
            &scope(compartment_id, Some(availability_domain)),
            identity,
        )
        .await
    }

    /// `GET bootVolumes?compartmentId=&availabilityDomain=`
    pub async fn list_boot_volumes(
        &self,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<Volume>, Error> {
        self.get_all_pages(
            "bootVolumes",
            &scope(compartment_id, Some(availability_domain)),
            identity,
        )
        .await
    }

    /// `GET volumes/{id}`
    pub async fn get_volume(&self, id: &str) -> Result<Volume, Error> {
        self.get(&format!("volumes/{id}"), &[]).await
    }

    /// `GET bootVolumes/{id}`
    pub async fn get_boot_volume(&self, id: &str) -> Result<Volume, Error> {
        self.get(&format!("bootVolumes/{id}"), &[]).await
    }

    // ── Attachments ──────────────────────────────────────────────────

    /// `GET volumeAttachments?compartmentId=[&availabilityDomain=]`
    pub async fn list_volume_attachments(
        &self,
        compartment_id: &str,
        availability_domain: Option<&str>,
    ) -> Result<Vec<VolumeAttachment>, Error> {
        self.get_all_pages(
            "volumeAttachments",
            &scope(compartment_id, availability_domain),
            identity,
        )
        .await
    }

    /// `GET bootVolumeAttachments?compartmentId=&availabilityDomain=`
    pub async fn list_boot_volume_attachments(
        &self,
        compartment_id: &str,
        availability_domain: &str,
    ) -> Result<Vec<BootVolumeAttachment>, Error> {
        self.get_all_pages(
            "bootVolumeAttachments",
            &scope(compartment_id, Some(availability_domain)),
            identity,
        )
        .await
    }

    // ── Compute ──────────────────────────────────────────────────────

    /// `GET instances/{id}`
    pub async fn get_instance(&self, id: &str) -> Result<Instance, Error> {
        self.get(&format!("instances/{id}"), &[]).await
    }
}

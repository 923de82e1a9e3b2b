// ── Inventory: volumes and patch waves ──
//
// Read-only sweeps over the tenancy. Calls are sequential; every listing
// is complete (all pages) before it is used.

use std::collections::HashSet;

use tracing::{debug, info};
use url::Url;

use crate::error::CoreError;
use crate::model::{
    AttachmentRow, Compartment, UnattachedVolume, Volume, VolumeKind, WaveUpdates,
};
use crate::provider::CloudProvider;

/// Tenancy root followed by every compartment below it.
async fn all_compartments(
    provider: &dyn CloudProvider,
    tenancy_id: &str,
) -> Result<Vec<Compartment>, CoreError> {
    let mut compartments = vec![Compartment {
        id: tenancy_id.to_owned(),
        name: "(root)".into(),
    }];
    compartments.extend(provider.list_compartments(tenancy_id).await?);
    Ok(compartments)
}

// ── Unattached volumes ──────────────────────────────────────────────

/// Volumes of `kind` that no instance has attached.
///
/// Attachments live in the instance's compartment, which may differ from
/// the volume's, so both sides are collected tenancy-wide before diffing.
pub async fn unattached_volumes(
    provider: &dyn CloudProvider,
    tenancy_id: &str,
    kind: VolumeKind,
    console_url: Option<&Url>,
) -> Result<Vec<UnattachedVolume>, CoreError> {
    let compartments = all_compartments(provider, tenancy_id).await?;
    let domains = provider.list_availability_domains(tenancy_id).await?;

    let mut volumes: Vec<(Volume, &Compartment, &str)> = Vec::new();
    let mut attached: HashSet<String> = HashSet::new();

    for compartment in &compartments {
        for ad in &domains {
            for volume in provider.list_volumes(kind, &compartment.id, &ad.name).await? {
                volumes.push((volume, compartment, &ad.name));
            }
            let attachments = provider
                .list_attachments(kind, &compartment.id, Some(&ad.name))
                .await?;
            attached.extend(attachments.into_iter().map(|a| a.volume_id));
        }
    }
    debug!(
        volumes = volumes.len(),
        attached = attached.len(),
        "collected {kind} volumes"
    );

    let unattached: Vec<UnattachedVolume> = volumes
        .into_iter()
        .filter(|(v, ..)| !attached.contains(&v.id))
        .map(|(v, compartment, ad)| UnattachedVolume {
            console_link: console_url.map(|base| console_link(base, kind, &v.id)),
            name: v.display_name.unwrap_or_default(),
            id: v.id,
            kind,
            compartment: compartment.name.clone(),
            availability_domain: ad.to_owned(),
        })
        .collect();
    info!(count = unattached.len(), "found unattached {kind} volumes");
    Ok(unattached)
}

fn console_link(base: &Url, kind: VolumeKind, id: &str) -> String {
    format!(
        "{}/block-storage/{}/{id}",
        base.as_str().trim_end_matches('/'),
        kind.console_segment()
    )
}

// ── Volume attachments ──────────────────────────────────────────────

/// Every block volume attachment in the tenancy with resolved names.
pub async fn attachment_report(
    provider: &dyn CloudProvider,
    tenancy_id: &str,
) -> Result<Vec<AttachmentRow>, CoreError> {
    let mut rows = Vec::new();

    for compartment in all_compartments(provider, tenancy_id).await? {
        let attachments = provider
            .list_attachments(VolumeKind::Block, &compartment.id, None)
            .await?;

        for attachment in attachments {
            let instance = provider.get_instance(&attachment.instance_id).await?;
            let volume_name = volume_name(provider, &attachment.volume_id).await?;
            rows.push(AttachmentRow {
                instance_name: instance.display_name.unwrap_or(instance.id),
                volume_id: attachment.volume_id,
                volume_name,
                device: attachment.device.unwrap_or_default(),
                attachment_type: attachment.attachment_type.unwrap_or_default(),
            });
        }
    }

    Ok(rows)
}

/// Block volume name, falling back to the boot volume of the same id.
async fn volume_name(provider: &dyn CloudProvider, id: &str) -> Result<String, CoreError> {
    let volume = match provider.get_volume(VolumeKind::Block, id).await {
        Ok(volume) => volume,
        Err(e) if e.is_not_found() => provider.get_volume(VolumeKind::Boot, id).await?,
        Err(e) => return Err(e),
    };
    Ok(volume.display_name.unwrap_or_default())
}

// ── Patch waves ─────────────────────────────────────────────────────

/// Structured search matching instances tagged `patching.wave = wave_<n>`.
pub fn wave_query(wave: u32) -> String {
    format!(
        "query instance resources where (definedTags.namespace = 'patching' \
         && definedTags.key = 'wave' && definedTags.value = 'wave_{wave}')"
    )
}

/// Outstanding security updates for every instance in `wave`.
///
/// Windows updates are tried first, then Linux packages. Instances that
/// answer neither (not managed) are left out.
pub async fn wave_updates(
    provider: &dyn CloudProvider,
    wave: u32,
) -> Result<WaveUpdates, CoreError> {
    let instances = provider.search_resources(&wave_query(wave)).await?;
    info!(wave, instances = instances.len(), "collecting security updates");

    let mut updates = WaveUpdates::default();
    for instance in instances {
        match provider.windows_security_updates(&instance.id).await {
            Ok(names) => {
                updates.insert(instance.id, names);
                continue;
            }
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => debug!(id = %instance.id, error = %e, "no Windows updates, trying Linux"),
        }
        match provider.linux_security_updates(&instance.id).await {
            Ok(names) => updates.insert(instance.id, names),
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => info!(id = %instance.id, error = %e, "instance not managed, skipping"),
        }
    }

    Ok(updates)
}

/// Errors that would fail every following call as well.
fn is_fatal(err: &CoreError) -> bool {
    matches!(
        err,
        CoreError::AuthenticationFailed { .. } | CoreError::ConnectionFailed { .. }
    )
}

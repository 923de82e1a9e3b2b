// ── Inventory types (compartments, volumes, patch waves) ──

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compartment {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityDomain {
    pub name: String,
}

/// Block volumes and boot volumes live behind separate endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeKind {
    #[default]
    Block,
    Boot,
}

impl VolumeKind {
    /// Path segment used by the web console for this kind.
    pub fn console_segment(self) -> &'static str {
        match self {
            Self::Block => "volumes",
            Self::Boot => "boot-volumes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    pub id: String,
    pub display_name: Option<String>,
    pub kind: VolumeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeAttachment {
    pub instance_id: String,
    pub volume_id: String,
    pub device: Option<String>,
    pub attachment_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub id: String,
    pub display_name: Option<String>,
}

/// A structured-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnattachedVolume {
    pub id: String,
    pub name: String,
    pub kind: VolumeKind,
    pub compartment: String,
    pub availability_domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_link: Option<String>,
}

/// One line of the volume attachment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRow {
    pub instance_name: String,
    pub volume_id: String,
    pub volume_name: String,
    pub device: String,
    pub attachment_type: String,
}

/// Security updates per instance, keyed by instance id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WaveUpdates(pub BTreeMap<String, Vec<String>>);

impl WaveUpdates {
    pub fn insert(&mut self, instance_id: impl Into<String>, updates: Vec<String>) {
        self.0.insert(instance_id.into(), updates);
    }

    pub fn get(&self, instance_id: &str) -> Option<&[String]> {
        self.0.get(instance_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(id, names)| (id.as_str(), names.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Volume inventory handlers.

use tabled::Tabled;

use ipsecctl_core::VolumeKind;
use ipsecctl_core::inventory::{attachment_report, unattached_volumes};
use ipsecctl_core::model::{AttachmentRow, UnattachedVolume};

use crate::cli::{OutputFormat, VolumeKindArg, VolumesArgs, VolumesCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

/// CSV header for `volumes attachments -o plain`.
const ATTACHMENT_CSV_HEADER: &str = "instance_name,volume_id,volume_name,device,type";

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UnattachedRow {
    #[tabled(rename = "OCID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Compartment")]
    compartment: String,
    #[tabled(rename = "Availability domain")]
    availability_domain: String,
}

impl From<&UnattachedVolume> for UnattachedRow {
    fn from(v: &UnattachedVolume) -> Self {
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            compartment: v.compartment.clone(),
            availability_domain: v.availability_domain.clone(),
        }
    }
}

#[derive(Tabled)]
struct AttachmentTableRow {
    #[tabled(rename = "Instance")]
    instance_name: String,
    #[tabled(rename = "Volume ID")]
    volume_id: String,
    #[tabled(rename = "Volume")]
    volume_name: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Type")]
    attachment_type: String,
}

impl From<&AttachmentRow> for AttachmentTableRow {
    fn from(a: &AttachmentRow) -> Self {
        Self {
            instance_name: a.instance_name.clone(),
            volume_id: a.volume_id.clone(),
            volume_name: a.volume_name.clone(),
            device: a.device.clone(),
            attachment_type: a.attachment_type.clone(),
        }
    }
}

fn csv_line(a: &AttachmentRow) -> String {
    output::csv_record(&[
        &a.instance_name,
        &a.volume_id,
        &a.volume_name,
        &a.device,
        &a.attachment_type,
    ])
}

fn render_unattached(
    format: OutputFormat,
    volumes: &[UnattachedVolume],
) -> Result<String, CliError> {
    output::render_list(format, volumes, |v| UnattachedRow::from(v), |v| v.id.clone())
}

/// `plain` is CSV with a header line.
fn render_attachments(format: OutputFormat, rows: &[AttachmentRow]) -> Result<String, CliError> {
    if format == OutputFormat::Plain {
        return Ok(std::iter::once(ATTACHMENT_CSV_HEADER.to_owned())
            .chain(rows.iter().map(csv_line))
            .collect::<Vec<_>>()
            .join("\n"));
    }
    output::render_list(format, rows, |r| AttachmentTableRow::from(r), csv_line)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: VolumesArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let global = ctx.global;
    let session = ctx.connect()?;
    let provider = session.provider.as_ref();
    let tenancy = &session.provider_config.tenancy;

    match args.command {
        VolumesCommand::Unattached { kind } => {
            let kind = match kind {
                VolumeKindArg::Block => VolumeKind::Block,
                VolumeKindArg::Boot => VolumeKind::Boot,
            };
            let volumes = unattached_volumes(
                provider,
                tenancy,
                kind,
                session.provider_config.console_url.as_ref(),
            )
            .await?;

            if volumes.is_empty() && global.output == OutputFormat::Table {
                if !global.quiet {
                    eprintln!("No unattached {kind} volumes found.");
                }
                return Ok(());
            }

            let out = render_unattached(global.output, &volumes)?;
            output::print_output(&out, global.quiet);

            if global.output == OutputFormat::Table {
                let links: Vec<&str> = volumes
                    .iter()
                    .filter_map(|v| v.console_link.as_deref())
                    .collect();
                if !links.is_empty() {
                    output::print_output(
                        &format!("More info:\n{}", links.join("\n")),
                        global.quiet,
                    );
                }
            }
            Ok(())
        }

        VolumesCommand::Attachments => {
            let rows = attachment_report(provider, tenancy).await?;

            let out = render_attachments(global.output, &rows)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_csv_matches_the_header_columns() {
        let row = AttachmentRow {
            instance_name: "web-01".into(),
            volume_id: "ocid1.volume.oc1..a".into(),
            volume_name: "data, primary".into(),
            device: "/dev/oracleoci/oraclevdb".into(),
            attachment_type: "iscsi".into(),
        };
        assert_eq!(
            csv_line(&row),
            "web-01,ocid1.volume.oc1..a,\"data, primary\",/dev/oracleoci/oraclevdb,iscsi"
        );
        assert_eq!(ATTACHMENT_CSV_HEADER.split(',').count(), 5);
    }

    #[test]
    fn attachments_render_as_table_and_csv() {
        let rows = [AttachmentRow {
            instance_name: "web-01".into(),
            volume_id: "ocid1.volume.oc1..a".into(),
            volume_name: "data".into(),
            device: "/dev/oracleoci/oraclevdb".into(),
            attachment_type: "iscsi".into(),
        }];

        let table = render_attachments(OutputFormat::Table, &rows).expect("table");
        assert!(table.contains("Instance"));
        assert!(table.contains("web-01"));

        let csv = render_attachments(OutputFormat::Plain, &rows).expect("csv");
        assert_eq!(
            csv,
            "instance_name,volume_id,volume_name,device,type\n\
             web-01,ocid1.volume.oc1..a,data,/dev/oracleoci/oraclevdb,iscsi"
        );
    }

    #[test]
    fn unattached_volumes_render_as_table() {
        let volumes = [UnattachedVolume {
            id: "ocid1.volume.oc1..b".into(),
            name: "scratch".into(),
            kind: VolumeKind::Block,
            compartment: "(root)".into(),
            availability_domain: "AD-1".into(),
            console_link: None,
        }];

        let table = render_unattached(OutputFormat::Table, &volumes).expect("table");
        assert!(table.contains("Availability domain"));
        assert!(table.contains("scratch"));

        let plain = render_unattached(OutputFormat::Plain, &volumes).expect("plain");
        assert_eq!(plain, "ocid1.volume.oc1..b");
    }
}

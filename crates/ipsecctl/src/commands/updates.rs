//! Patch-wave update report.

use std::io::{self, IsTerminal};

use dialoguer::Input;
use tabled::Tabled;

use ipsecctl_core::inventory::wave_updates;
use ipsecctl_core::model::WaveUpdates;

use crate::cli::{OutputFormat, UpdatesArgs, UpdatesCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct UpdateRow {
    #[tabled(rename = "Instance")]
    instance_id: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Security updates")]
    updates: String,
}

fn rows(updates: &WaveUpdates) -> Vec<UpdateRow> {
    updates
        .iter()
        .map(|(id, names)| UpdateRow {
            instance_id: id.to_owned(),
            count: names.len(),
            updates: names.join("\n"),
        })
        .collect()
}

/// Wave from the flag, else from a prompt on a terminal.
fn wave_number(flag: Option<u32>) -> Result<u32, CliError> {
    if let Some(wave) = flag {
        return Ok(wave);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::Usage {
            message: "no wave number given".into(),
            hint: Some("Pass --wave <N> (-w) to select instances tagged wave_<N>.".into()),
        });
    }
    Input::<u32>::new()
        .with_prompt("Please enter only the wave number")
        .interact_text()
        .map_err(|e| CliError::Internal(format!("prompt failed: {e}")))
}

pub async fn handle(args: UpdatesArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let global = ctx.global;
    match args.command {
        UpdatesCommand::Wave { wave } => {
            let wave = wave_number(wave)?;
            let session = ctx.connect()?;
            let updates = wave_updates(session.provider.as_ref(), wave).await?;

            if updates.is_empty() && global.output == OutputFormat::Table {
                if !global.quiet {
                    eprintln!("No managed instances found in wave_{wave}.");
                }
                return Ok(());
            }

            let out = match global.output {
                OutputFormat::Table => output::render_table(&rows(&updates)),
                OutputFormat::Plain => updates
                    .iter()
                    .map(|(id, names)| format!("{id} {}", names.join(",")))
                    .collect::<Vec<_>>()
                    .join("\n"),
                structured => output::render_single(structured, &updates, |_| String::new())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_instance_with_update_count() {
        let mut updates = WaveUpdates::default();
        updates.insert("ocid1.instance.oc1..b", vec!["openssl".into(), "glibc".into()]);
        updates.insert("ocid1.instance.oc1..a", Vec::new());

        let rows = rows(&updates);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].instance_id, "ocid1.instance.oc1..a");
        assert_eq!(rows[0].count, 0);
        assert_eq!(rows[1].updates, "openssl\nglibc");
    }

    #[test]
    fn explicit_wave_skips_the_prompt() {
        assert_eq!(wave_number(Some(4)).expect("flag"), 4);
    }
}

//! IPSec command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use ipsecctl_core::{
    ConnectionReport, CoreError, IkeVersion, PollPolicy, ProvisioningFlags, SharedSecret,
    build_request, provision,
};
use ipsecctl_core::resolve::{lookup, validate};

use crate::cli::{CreateArgs, IpsecArgs, IpsecCommand, OutputFormat};
use crate::error::CliError;
use crate::{output, prompt, report};

use super::Context;

pub async fn handle(args: IpsecArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        IpsecCommand::Create(create) => create_connection(*create, ctx).await,
    }
}

fn provisioning_flags(args: CreateArgs) -> ProvisioningFlags {
    ProvisioningFlags {
        compartment_id: args.compartment_id,
        compartment_name: args.compartment_name,
        cpe_id: args.cpe_id,
        cpe_ip: args.cpe_ip,
        drg_id: args.drg_id,
        drg_name: args.drg_name,
        routes: args.routes,
        local_routes: args.local_routes,
        name: args.name,
        static_routing: args.static_routing,
        policy_routing: args.policy_routing,
        bgp_routing: args.bgp_routing,
        ike_version: IkeVersion::from_number(args.ike).unwrap_or_default(),
        asn: args.asn,
        inside_interfaces: args.inside_interfaces,
        outside_interfaces: args.outside_interfaces,
        best_practices: args.best_practices,
    }
}

async fn create_connection(args: CreateArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let global = ctx.global;
    let wait = args
        .wait_timeout
        .unwrap_or(ctx.config.defaults.wait_timeout);
    let mut input = prompt::input_source(args.batch);
    let flags = provisioning_flags(args);

    // Flags and prompts first: usage errors never wait on credentials.
    let validated = validate(&flags, input.as_mut())?;
    let session = ctx.connect()?;
    let provider = session.provider.as_ref();
    let intent = lookup(provider, &session.provider_config.tenancy, validated).await?;
    tracing::debug!(?intent, "provisioning intent resolved");

    let secret = SharedSecret::generate();
    let request = build_request(&intent, &secret);
    let policy = PollPolicy::default().with_timeout(Duration::from_secs(wait));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let spinner = spinner(&intent.name, global.quiet);
    let outcome = provision(provider, &request, &policy, &cancel).await;
    spinner.finish_and_clear();
    cancel.cancel();

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            if matches!(
                err,
                CoreError::NotAvailable { .. } | CoreError::PollTimeout { .. }
            ) {
                eprintln!(
                    "{}",
                    output::warning(
                        "There might be some problems creating the IPSec, please check manually.",
                        global.color,
                    )
                );
            }
            return Err(err.into());
        }
    };

    if !global.quiet {
        eprintln!(
            "{}",
            output::success(&format!("IPSec {} created.", intent.name), global.color)
        );
    }

    let report = ConnectionReport::new(&intent, &result, &secret);
    if matches!(global.output, OutputFormat::Table | OutputFormat::Plain) && !global.quiet {
        eprintln!(
            "Below you can find the configuration sheet. Hand it to the team \
             configuring the customer-premises equipment."
        );
    }
    let out = output::render_single(global.output, &report, report::render_sheet)?;
    // The sheet is the only place the shared secret is shown; -q keeps it.
    output::print_output(&out, false);
    Ok(())
}

/// Spinner on stderr while the connection provisions; hidden off-terminal.
fn spinner(name: &str, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner().with_style(ProgressStyle::default_spinner());
    bar.set_message(format!("Waiting for IPSec {name} to become available..."));
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn create_args(args: &[&str]) -> CreateArgs {
        let mut argv = vec!["ipsecctl", "ipsec", "create"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Ipsec(IpsecArgs {
                command: IpsecCommand::Create(args),
            }) => *args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn short_flags_map_onto_provisioning_flags() {
        let flags = provisioning_flags(create_args(&[
            "-c", "comp", "-e", "198.51.100.7", "-g", "hub", "-r", "10.1.0.0/16", "-r",
            "10.2.0.0/16", "-n", "vpn", "--bgp", "--asn", "65000", "-i", "1", "-T",
            "10.0.1.2/30", "-T", "10.0.2.2/30", "-t", "10.0.1.1/30", "-t", "10.0.2.1/30",
        ]));

        assert_eq!(flags.compartment_id.as_deref(), Some("comp"));
        assert_eq!(flags.cpe_ip.as_deref(), Some("198.51.100.7"));
        assert_eq!(flags.drg_name.as_deref(), Some("hub"));
        assert_eq!(flags.routes, ["10.1.0.0/16", "10.2.0.0/16"]);
        assert!(flags.bgp_routing && !flags.static_routing && !flags.policy_routing);
        assert_eq!(flags.ike_version, IkeVersion::V1);
        assert_eq!(flags.inside_interfaces.len(), 2);
        assert_eq!(flags.outside_interfaces, ["10.0.1.1/30", "10.0.2.1/30"]);
    }

    #[test]
    fn ike_defaults_to_version_two() {
        let flags = provisioning_flags(create_args(&["--static"]));
        assert_eq!(flags.ike_version, IkeVersion::V2);
    }

    #[test]
    fn ike_rejects_other_versions() {
        let err = Cli::try_parse_from(["ipsecctl", "ipsec", "create", "-i", "3"])
            .expect_err("out of range");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}

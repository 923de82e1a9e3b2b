//! Clap derive structures for the `ipsecctl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.
//! Also compiled by `build.rs`, so only clap and clap_complete may be used here.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ipsecctl -- site-to-site IPSec provisioning and tenancy inventory
#[derive(Debug, Parser)]
#[command(
    name = "ipsecctl",
    version,
    about = "Provision cloud IPSec VPN connections from the command line",
    long_about = "Creates site-to-site IPSec connections (two tunnels, hardened crypto \n\
        defaults) against a cloud control-plane API and prints the hand-off sheet \n\
        for the team configuring the customer-premises equipment.\n\n\
        Also inventories unattached volumes, volume attachments and outstanding \n\
        security updates per patching wave.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "IPSECCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Versioned API root (overrides profile)
    #[arg(long, env = "IPSECCTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Bearer token (overrides profile, env and keyring)
    #[arg(long, env = "IPSECCTL_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Tenancy (root compartment) id (overrides profile)
    #[arg(long, env = "IPSECCTL_TENANCY", global = true)]
    pub tenancy: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "IPSECCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output (the IPSec hand-off sheet is still printed)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "IPSECCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "IPSECCTL_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text or CSV (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision IPSec connections
    Ipsec(IpsecArgs),

    /// Inventory block and boot volumes
    #[command(alias = "vol")]
    Volumes(VolumesArgs),

    /// Report outstanding security updates
    Updates(UpdatesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  IPSEC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IpsecArgs {
    #[command(subcommand)]
    pub command: IpsecCommand,
}

#[derive(Debug, Subcommand)]
pub enum IpsecCommand {
    /// Create a two-tunnel IPSec connection and print the hand-off sheet
    Create(Box<CreateArgs>),
}

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateArgs {
    /// Compartment id
    #[arg(long, short = 'c')]
    pub compartment_id: Option<String>,

    /// Compartment name (searched in the whole tenancy)
    #[arg(long)]
    pub compartment_name: Option<String>,

    /// CPE public IP address
    #[arg(long, short = 'e')]
    pub cpe_ip: Option<String>,

    /// CPE id
    #[arg(long, short = 'E')]
    pub cpe_id: Option<String>,

    /// DRG id
    #[arg(long, short = 'G')]
    pub drg_id: Option<String>,

    /// DRG display name
    #[arg(long, short = 'g')]
    pub drg_name: Option<String>,

    /// On-premises route reachable through the tunnels (repeatable)
    #[arg(long = "route", short = 'r', value_name = "CIDR")]
    pub routes: Vec<String>,

    /// Cloud-side route for policy-based routing (repeatable)
    #[arg(long = "local-route", short = 'R', value_name = "CIDR")]
    pub local_routes: Vec<String>,

    /// Connection display name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Static routing
    #[arg(long = "static")]
    pub static_routing: bool,

    /// Policy-based routing
    #[arg(long = "policy")]
    pub policy_routing: bool,

    /// BGP dynamic routing
    #[arg(long = "bgp")]
    pub bgp_routing: bool,

    /// IKE version
    #[arg(long, short = 'i', default_value = "2", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub ike: u8,

    /// Customer BGP ASN
    #[arg(long)]
    pub asn: Option<String>,

    /// Provider-side tunnel inside address, /30 or /31 (BGP, give twice)
    #[arg(long = "inside-interface", short = 'T', value_name = "CIDR")]
    pub inside_interfaces: Vec<String>,

    /// CPE-side tunnel inside address, /30 or /31 (BGP, give twice)
    #[arg(long = "outside-interface", short = 't', value_name = "CIDR")]
    pub outside_interfaces: Vec<String>,

    /// Apply defaults (placeholder route) instead of asking
    #[arg(long, short = 'd')]
    pub best_practices: bool,

    /// Never prompt; missing inputs are errors (implied when stdin is not a terminal)
    #[arg(long)]
    pub batch: bool,

    /// Seconds to wait for the connection to become available
    #[arg(long, value_name = "SECONDS")]
    pub wait_timeout: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VOLUMES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VolumesArgs {
    #[command(subcommand)]
    pub command: VolumesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VolumesCommand {
    /// List volumes not attached to any instance
    Unattached {
        /// Volume kind
        #[arg(long, default_value = "block")]
        kind: VolumeKindArg,
    },

    /// List every block volume attachment with instance and volume names
    Attachments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VolumeKindArg {
    /// Block volumes
    Block,
    /// Boot volumes
    Boot,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  UPDATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UpdatesArgs {
    #[command(subcommand)]
    pub command: UpdatesCommand,
}

#[derive(Debug, Subcommand)]
pub enum UpdatesCommand {
    /// Security updates for every instance tagged patching.wave = wave_<N>
    Wave {
        /// Wave number (prompted when omitted)
        #[arg(long, short = 'w')]
        wave: Option<u32>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (endpoint, tenancy, token_env, console_url, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// Validate phase: flags and prompts only. No provider call happens here.

use std::net::IpAddr;

use ipnet::{IpNet, Ipv4Net};
use tracing::{info, warn};

use super::input::InputSource;
use super::{
    DEFAULT_CUSTOMER_INTERFACES, DEFAULT_ORACLE_INTERFACES, PLACEHOLDER_ROUTE, ProvisioningFlags,
    RoutingPlan, Selector, ValidatedInput,
};
use crate::error::CoreError;
use crate::model::{InterfacePair, RoutingMode};

const MODE_HINT: &str = "pass exactly one of --static, --policy or --bgp";
const INTERFACE_HINT: &str =
    "use two -T/--inside-interface and two -t/--outside-interface flags, or omit both";

/// Check every flag, asking `input` for whatever is missing.
pub fn validate(
    flags: &ProvisioningFlags,
    input: &mut dyn InputSource,
) -> Result<ValidatedInput, CoreError> {
    let mut warnings = Vec::new();

    let interfaces = interface_pairs(&flags.inside_interfaces, &flags.outside_interfaces)?;
    let mode = routing_mode(flags, input)?;
    let name = required_text(
        flags.name.as_deref(),
        input,
        "Name of the IPSec connection",
        "a connection name is required",
        "--name",
    )?;

    let plan = match mode {
        RoutingMode::Static => RoutingPlan::Static,
        RoutingMode::Policy => RoutingPlan::Policy {
            local_routes: local_routes(&flags.local_routes, input)?,
        },
        RoutingMode::Bgp => RoutingPlan::Bgp {
            asn: asn(flags.asn.as_deref(), input)?,
            interfaces: interfaces.clone().unwrap_or_else(default_interfaces),
        },
    };

    if mode != RoutingMode::Bgp && interfaces.is_some() {
        note(&mut warnings, "interface IPs are only used with --bgp; ignoring them");
    }
    if mode != RoutingMode::Policy && !flags.local_routes.is_empty() {
        note(&mut warnings, "local routes are only used with --policy; ignoring them");
    }

    let remote_routes = remote_routes(flags, input, &mut warnings)?;
    if mode == RoutingMode::Static && remote_routes.is_empty() {
        return Err(CoreError::usage(
            "static routing requires at least one route to on-premises",
            "-r/--route",
        ));
    }

    let compartment = selector(
        flags.compartment_id.as_deref(),
        flags.compartment_name.as_deref(),
        input,
        "Name of the compartment",
        "compartment",
        "--compartment-id/-c or --compartment-name",
    )?;
    let drg = selector(
        flags.drg_id.as_deref(),
        flags.drg_name.as_deref(),
        input,
        "Name of the DRG",
        "DRG",
        "-G/--drg-id or -g/--drg-name",
    )?;
    let cpe = selector(
        flags.cpe_id.as_deref(),
        flags.cpe_ip.as_deref(),
        input,
        "IP address of the CPE",
        "CPE",
        "-E/--cpe-id or -e/--cpe-ip",
    )?;
    if let Selector::Key(ip) = &cpe {
        ip.parse::<IpAddr>().map_err(|_| {
            CoreError::usage(format!("invalid CPE IP address: {ip}"), "-e/--cpe-ip")
        })?;
    }

    Ok(ValidatedInput {
        name,
        ike_version: flags.ike_version,
        plan,
        remote_routes,
        compartment,
        drg,
        cpe,
        warnings,
    })
}

fn note(warnings: &mut Vec<String>, message: &str) {
    warn!("{message}");
    warnings.push(message.to_owned());
}

// ── Routing mode ────────────────────────────────────────────────────

fn routing_mode(
    flags: &ProvisioningFlags,
    input: &mut dyn InputSource,
) -> Result<RoutingMode, CoreError> {
    let selected: Vec<RoutingMode> = [
        (flags.static_routing, RoutingMode::Static),
        (flags.policy_routing, RoutingMode::Policy),
        (flags.bgp_routing, RoutingMode::Bgp),
    ]
    .into_iter()
    .filter_map(|(set, mode)| set.then_some(mode))
    .collect();

    match selected.as_slice() {
        [mode] => Ok(*mode),
        [] => input
            .choose_routing()?
            .ok_or_else(|| CoreError::usage("a routing type is required", MODE_HINT)),
        _ => Err(CoreError::usage(
            "only one routing type can be selected",
            MODE_HINT,
        )),
    }
}

// ── Interfaces ──────────────────────────────────────────────────────

fn interface_pairs(
    inside: &[String],
    outside: &[String],
) -> Result<Option<[InterfacePair; 2]>, CoreError> {
    let (oracle, customer) = match (inside, outside) {
        ([], []) => return Ok(None),
        ([o1, o2], [c1, c2]) => ([o1, o2], [c1, c2]),
        _ => {
            return Err(CoreError::usage(
                format!(
                    "provide zero or two inside and outside interface IPs (got {} inside, {} outside)",
                    inside.len(),
                    outside.len()
                ),
                INTERFACE_HINT,
            ));
        }
    };

    for ip in oracle.iter().chain(customer.iter()) {
        check_interface(ip)?;
    }

    Ok(Some([pair(oracle[0], customer[0]), pair(oracle[1], customer[1])]))
}

fn pair(oracle_ip: &str, customer_ip: &str) -> InterfacePair {
    InterfacePair {
        oracle_ip: oracle_ip.to_owned(),
        customer_ip: customer_ip.to_owned(),
    }
}

fn check_interface(raw: &str) -> Result<(), CoreError> {
    match raw.parse::<Ipv4Net>() {
        Ok(net) if matches!(net.prefix_len(), 30 | 31) => Ok(()),
        _ => Err(CoreError::usage(
            format!("interface IP {raw} must be an IPv4 CIDR with prefix /30 or /31"),
            INTERFACE_HINT,
        )),
    }
}

fn default_interfaces() -> [InterfacePair; 2] {
    info!(
        inside = ?DEFAULT_ORACLE_INTERFACES,
        outside = ?DEFAULT_CUSTOMER_INTERFACES,
        "no interface IPs given, using defaults"
    );
    let [o1, o2] = DEFAULT_ORACLE_INTERFACES;
    let [c1, c2] = DEFAULT_CUSTOMER_INTERFACES;
    [pair(o1, c1), pair(o2, c2)]
}

// ── BGP ─────────────────────────────────────────────────────────────

fn asn(flag: Option<&str>, input: &mut dyn InputSource) -> Result<u32, CoreError> {
    let raw = required_text(
        flag,
        input,
        "Customer BGP ASN",
        "an ASN is required for BGP routing",
        "--asn",
    )?;
    raw.parse::<u32>().map_err(|_| {
        CoreError::usage(
            format!("ASN {raw} is not a 32-bit unsigned integer"),
            "--asn",
        )
    })
}

// ── Routes ──────────────────────────────────────────────────────────

fn check_cidrs(routes: Vec<String>, flag: &str) -> Result<Vec<String>, CoreError> {
    for route in &routes {
        route.parse::<IpNet>().map_err(|_| {
            CoreError::usage(format!("route {route} is not a valid CIDR block"), flag)
        })?;
    }
    Ok(routes)
}

fn remote_routes(
    flags: &ProvisioningFlags,
    input: &mut dyn InputSource,
    warnings: &mut Vec<String>,
) -> Result<Vec<String>, CoreError> {
    if !flags.routes.is_empty() {
        return check_cidrs(flags.routes.clone(), "-r/--route");
    }

    let use_placeholder = if flags.best_practices || !input.is_interactive() {
        true
    } else {
        input
            .ask_yes_no(&format!(
                "No routes to on-premises given. Use placeholder route {PLACEHOLDER_ROUTE}?"
            ))?
            .unwrap_or(true)
    };

    if use_placeholder {
        note(
            warnings,
            &format!("no routes to on-premises given, using placeholder route {PLACEHOLDER_ROUTE}"),
        );
        return Ok(vec![PLACEHOLDER_ROUTE.to_owned()]);
    }

    let routes = input
        .ask_list(
            "Route to on-premises (CIDR)",
            "Add another route to on-premises?",
        )?
        .unwrap_or_default();
    check_cidrs(routes, "-r/--route")
}

fn local_routes(flag: &[String], input: &mut dyn InputSource) -> Result<Vec<String>, CoreError> {
    let routes = if flag.is_empty() {
        input
            .ask_list("Local CIDR block", "Add another local CIDR block?")?
            .unwrap_or_default()
    } else {
        flag.to_vec()
    };

    if routes.is_empty() {
        return Err(CoreError::usage(
            "policy-based routing requires at least one local route",
            "-R/--local-route",
        ));
    }
    check_cidrs(routes, "-R/--local-route")
}

// ── Prompts ─────────────────────────────────────────────────────────

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn required_text(
    flag: Option<&str>,
    input: &mut dyn InputSource,
    question: &str,
    message: &str,
    hint: &str,
) -> Result<String, CoreError> {
    if let Some(value) = non_empty(flag) {
        return Ok(value);
    }
    let answer = input.ask_text(question)?;
    non_empty(answer.as_deref()).ok_or_else(|| CoreError::usage(message, hint))
}

fn selector(
    id: Option<&str>,
    key: Option<&str>,
    input: &mut dyn InputSource,
    question: &str,
    resource: &str,
    hint: &str,
) -> Result<Selector, CoreError> {
    if let Some(id) = non_empty(id) {
        return Ok(Selector::Id(id));
    }
    required_text(
        key,
        input,
        question,
        &format!("the {resource} must be given by id or by name/IP"),
        hint,
    )
    .map(Selector::Key)
}

// Lookup phase: resolve names and IPs to ids.
//
// Every listing is scanned in full before a miss is declared; the first
// match wins.

use tracing::{debug, warn};

use super::{ProvisioningIntent, Selector, ValidatedInput};
use crate::error::CoreError;
use crate::provider::CloudProvider;

pub async fn lookup(
    provider: &dyn CloudProvider,
    tenancy_id: &str,
    validated: ValidatedInput,
) -> Result<ProvisioningIntent, CoreError> {
    let ValidatedInput {
        name,
        ike_version,
        plan,
        remote_routes,
        compartment,
        drg,
        cpe,
        mut warnings,
    } = validated;

    let compartment_id = match compartment {
        Selector::Id(id) => id,
        Selector::Key(name) => compartment_by_name(provider, tenancy_id, &name).await?,
    };

    let drg_id = match drg {
        Selector::Id(id) => id,
        Selector::Key(name) => {
            let drgs = provider.list_drgs(&compartment_id).await?;
            drgs.into_iter()
                .find(|d| d.display_name.as_deref() == Some(name.as_str()))
                .map(|d| d.id)
                .ok_or_else(|| CoreError::LookupMiss {
                    resource: "DRG",
                    identifier: name,
                    hint: "check the name or pass -G/--drg-id".into(),
                })?
        }
    };

    let cpes = provider.list_cpes(&compartment_id).await?;
    let (cpe_id, cpe_ip) = match cpe {
        Selector::Key(ip) => {
            let id = cpes
                .into_iter()
                .find(|c| c.ip_address == ip)
                .map(|c| c.id)
                .ok_or_else(|| CoreError::LookupMiss {
                    resource: "CPE with IP",
                    identifier: ip.clone(),
                    hint: "check the address or pass -E/--cpe-id".into(),
                })?;
            (id, Some(ip))
        }
        Selector::Id(id) => {
            let ip = cpes
                .into_iter()
                .find(|c| c.id == id)
                .map(|c| c.ip_address);
            if ip.is_none() {
                let message = format!("CPE {id} not listed in the compartment; its IP is unknown");
                warn!("{message}");
                warnings.push(message);
            }
            (id, ip)
        }
    };

    debug!(%compartment_id, %drg_id, %cpe_id, "resolved provisioning targets");

    Ok(ProvisioningIntent {
        name,
        compartment_id,
        drg_id,
        cpe_id,
        cpe_ip,
        ike_version,
        plan,
        remote_routes,
        warnings,
    })
}

async fn compartment_by_name(
    provider: &dyn CloudProvider,
    tenancy_id: &str,
    name: &str,
) -> Result<String, CoreError> {
    if tenancy_id.is_empty() {
        return Err(CoreError::Config {
            message: "a tenancy id is required to look up compartments by name".into(),
        });
    }
    provider
        .list_compartments(tenancy_id)
        .await?
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .ok_or_else(|| CoreError::LookupMiss {
            resource: "compartment",
            identifier: name.to_owned(),
            hint: "check the name or pass -c/--compartment-id".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Compartment, Cpe, Drg, IkeVersion};
    use crate::resolve::RoutingPlan;
    use crate::testing::FakeProvider;

    fn validated(compartment: Selector, drg: Selector, cpe: Selector) -> ValidatedInput {
        ValidatedInput {
            name: "vpn".into(),
            ike_version: IkeVersion::V2,
            plan: RoutingPlan::Static,
            remote_routes: vec!["192.168.0.0/16".into()],
            compartment,
            drg,
            cpe,
            warnings: Vec::new(),
        }
    }

    fn provider() -> FakeProvider {
        FakeProvider {
            compartments: vec![
                Compartment {
                    id: "c-dev".into(),
                    name: "dev".into(),
                },
                Compartment {
                    id: "c-net".into(),
                    name: "network".into(),
                },
                Compartment {
                    id: "c-net-2".into(),
                    name: "network".into(),
                },
            ],
            drgs: vec![
                Drg {
                    id: "drg-unnamed".into(),
                    display_name: None,
                },
                Drg {
                    id: "drg-hub".into(),
                    display_name: Some("hub".into()),
                },
            ],
            cpes: vec![
                Cpe {
                    id: "cpe-a".into(),
                    display_name: None,
                    ip_address: "198.51.100.1".into(),
                },
                Cpe {
                    id: "cpe-b".into(),
                    display_name: None,
                    ip_address: "198.51.100.2".into(),
                },
            ],
            ..FakeProvider::default()
        }
    }

    #[tokio::test]
    async fn match_later_in_listing_is_found() {
        let provider = provider();
        let intent = lookup(
            &provider,
            "tenancy",
            validated(
                Selector::Key("network".into()),
                Selector::Key("hub".into()),
                Selector::Key("198.51.100.2".into()),
            ),
        )
        .await
        .expect("resolved");

        assert_eq!(intent.compartment_id, "c-net");
        assert_eq!(intent.drg_id, "drg-hub");
        assert_eq!(intent.cpe_id, "cpe-b");
        assert_eq!(provider.call_count("list_compartments tenancy"), 1);
        assert_eq!(provider.call_count("list_drgs c-net"), 1);
    }

    #[tokio::test]
    async fn missing_drg_is_a_lookup_miss() {
        let provider = provider();
        let err = lookup(
            &provider,
            "tenancy",
            validated(
                Selector::Id("c-net".into()),
                Selector::Key("spoke".into()),
                Selector::Id("cpe-a".into()),
            ),
        )
        .await
        .expect_err("no such drg");

        match err {
            CoreError::LookupMiss {
                resource,
                identifier,
                hint,
            } => {
                assert_eq!(resource, "DRG");
                assert_eq!(identifier, "spoke");
                assert!(hint.contains("--drg-id"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(provider.call_count("list_cpes"), 0);
    }

    #[tokio::test]
    async fn missing_cpe_ip_is_a_lookup_miss() {
        let provider = provider();
        let err = lookup(
            &provider,
            "tenancy",
            validated(
                Selector::Id("c-net".into()),
                Selector::Id("drg-hub".into()),
                Selector::Key("203.0.113.1".into()),
            ),
        )
        .await
        .expect_err("no such cpe");
        assert!(matches!(err, CoreError::LookupMiss { resource: "CPE with IP", .. }));
    }

    #[tokio::test]
    async fn cpe_ip_is_filled_in_when_given_by_id() {
        let provider = provider();
        let intent = lookup(
            &provider,
            "tenancy",
            validated(
                Selector::Id("c-net".into()),
                Selector::Id("drg-hub".into()),
                Selector::Id("cpe-b".into()),
            ),
        )
        .await
        .expect("resolved");
        assert_eq!(intent.cpe_ip.as_deref(), Some("198.51.100.2"));
        assert!(intent.warnings.is_empty());
        assert_eq!(provider.call_count("list_compartments"), 0);
        assert_eq!(provider.call_count("list_drgs"), 0);
    }

    #[tokio::test]
    async fn unknown_cpe_id_keeps_going_with_a_warning() {
        let provider = provider();
        let intent = lookup(
            &provider,
            "tenancy",
            validated(
                Selector::Id("c-net".into()),
                Selector::Id("drg-hub".into()),
                Selector::Id("cpe-elsewhere".into()),
            ),
        )
        .await
        .expect("resolved");
        assert_eq!(intent.cpe_ip, None);
        assert_eq!(intent.warnings.len(), 1);
    }

    #[tokio::test]
    async fn compartment_name_needs_a_tenancy() {
        let provider = provider();
        let err = lookup(
            &provider,
            "",
            validated(
                Selector::Key("network".into()),
                Selector::Id("drg-hub".into()),
                Selector::Id("cpe-a".into()),
            ),
        )
        .await
        .expect_err("no tenancy");
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(provider.calls().is_empty());
    }
}

use anyhow::Result;
use chrono::Utc;

use crate::inventory::client::kind;
use crate::inventory::types::{
    AllocationOutcome, InterfaceCreate, InvDevice, SeedReport, StageCounts,
};
use crate::inventory::{InventoryClient, SaveBatch};
use crate::utils::device_name;

use super::catalog::{self, interface_role, prefix_role, InterfaceTemplate};

const SWITCHES_PER_SITE: u32 = 1;
const PEER_PREFIX_LENGTH: u8 = 30;

/// Run the full seeding pipeline: seven stages in dependency order.
/// Dropdown registration is best-effort; a hard failure in any later
/// stage aborts the run. Every save is an upsert, so re-running the
/// whole sequence is safe.
pub async fn run(client: &InventoryClient) -> Result<SeedReport> {
    let started_at = Utc::now();
    let mut stages = Vec::new();

    tracing::info!("Registering dropdown options...");
    stages.push(create_dropdowns(client).await);

    tracing::info!("Seeding organization data...");
    stages.push(create_org(client).await?);

    tracing::info!("Seeding locations...");
    stages.push(create_locations(client).await?);

    tracing::info!("Seeding VLANs...");
    stages.push(create_vlans(client).await?);

    tracing::info!("Seeding prefixes and IP pools...");
    stages.push(create_prefixes(client).await?);

    tracing::info!("Seeding devices and interfaces...");
    stages.push(create_devices(client).await?);

    tracing::info!("Connecting peer interfaces...");
    stages.push(create_link(client).await?);

    Ok(SeedReport {
        started_at,
        finished_at: Utc::now(),
        stages,
    })
}

/// Register categorical option values against the schema. Options may
/// already exist from a prior run; each failure is logged and skipped.
async fn create_dropdowns(client: &InventoryClient) -> StageCounts {
    let mut counts = StageCounts::new("dropdowns");

    for option in catalog::dropdown_options() {
        match client
            .add_dropdown_option(
                option.kind,
                option.attribute,
                option.option,
                option.label,
                option.color,
            )
            .await
        {
            Ok(()) => counts.created += 1,
            Err(e) => {
                tracing::warn!(
                    "Skipping dropdown option {}.{}={}: {}",
                    option.kind,
                    option.attribute,
                    option.option,
                    e
                );
                counts.skipped += 1;
            }
        }
    }

    counts
}

async fn create_org(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("organization");

    let manufacturer = client.upsert_manufacturer(catalog::MANUFACTURER).await?;
    counts.created += 1;

    for type_name in catalog::device_types() {
        client.upsert_device_type(type_name, manufacturer.id).await?;
        counts.created += 1;
    }

    Ok(counts)
}

/// Walk the country -> metro -> site tree, upserting each tier with its
/// parent reference.
async fn create_locations(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("locations");

    for country in catalog::locations() {
        let country_obj = client
            .upsert_location(
                kind::COUNTRY,
                country.name,
                country.shortname,
                None,
                Some(country.timezone),
            )
            .await?;
        counts.created += 1;

        for metro in country.metros {
            let metro_obj = client
                .upsert_location(
                    kind::METRO,
                    metro.name,
                    metro.shortname,
                    Some(country_obj.id),
                    None,
                )
                .await?;
            counts.created += 1;

            for site in metro.sites {
                client
                    .upsert_location(
                        kind::SITE,
                        site.name,
                        site.shortname,
                        Some(metro_obj.id),
                        None,
                    )
                    .await?;
                counts.created += 1;
            }
        }
    }

    Ok(counts)
}

async fn create_vlans(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("vlans");

    let domain = client.upsert_l2_domain(catalog::L2_DOMAIN).await?;
    counts.created += 1;

    for vlan in catalog::vlans() {
        let site = client.get_site(vlan.site).await?;
        client
            .upsert_vlan(
                vlan.name,
                vlan.vlan_id,
                vlan.status,
                vlan.role,
                domain.id,
                vec![site.id],
            )
            .await?;
        counts.created += 1;
    }

    Ok(counts)
}

/// Upsert each prefix together with its paired IP pool. Gateway-backed
/// roles get a second save pointing the prefix's gateway at the pool.
async fn create_prefixes(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("prefixes");

    for seed in catalog::prefixes() {
        let vlan_id = match seed.vlan {
            Some(name) => Some(client.get_vlan(name).await?.id),
            None => None,
        };

        let prefix = client
            .upsert_prefix(seed.prefix, seed.role, seed.description, vlan_id)
            .await?;
        counts.created += 1;

        let pool = client
            .upsert_pool(&catalog::pool_name(seed.name), prefix.id)
            .await?;
        counts.created += 1;

        if prefix_role::gateway_backed(seed.role) {
            client.set_prefix_gateway(prefix.id, pool.id).await?;
        }
    }

    Ok(counts)
}

async fn create_devices(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("devices");

    let sites = client.list_sites().await?;
    let device_type = client.get_device_type(catalog::device_types()[0]).await?;
    let management_pool = client.get_pool(&catalog::pool_name("Management")).await?;

    for site in sites {
        for index in 1..=SWITCHES_PER_SITE {
            let name = device_name(index, &site.shortname);
            let device = client
                .upsert_device(
                    &name,
                    "Office Switch",
                    "leaf",
                    site.id,
                    device_type.id,
                    management_pool.id,
                )
                .await?;
            counts.created += 1;

            let templates = catalog::interface_templates(&site.shortname).ok_or_else(|| {
                anyhow::anyhow!("No interface template for site {}", site.shortname)
            })?;

            create_interfaces(client, &device, &templates, &mut counts).await?;
        }
    }

    Ok(counts)
}

/// Expand one device's interface template into a single batch of saves.
/// Peer interfaces draw an address from the peer pool first; a failed
/// draw is tolerated and the interface is created without an address.
async fn create_interfaces(
    client: &InventoryClient,
    device: &InvDevice,
    templates: &[InterfaceTemplate],
    counts: &mut StageCounts,
) -> Result<()> {
    let mut batch = SaveBatch::new();

    for tpl in templates {
        let untagged_vlan = match tpl.vlan {
            Some(name) => Some(client.get_vlan(name).await?.id),
            None => None,
        };

        let address = if tpl.role == interface_role::PEER {
            let pool = client.get_pool(&catalog::pool_name("Peer")).await?;
            match draw_peer_address(client, pool.id).await {
                AllocationOutcome::Allocated(addr) => {
                    tracing::debug!("Allocated {} for {}/{}", addr.address, device.name, tpl.name);
                    Some(addr.id)
                }
                AllocationOutcome::Skipped { reason } => {
                    tracing::warn!(
                        "Peer address skipped for {}/{}: {}",
                        device.name,
                        tpl.name,
                        reason
                    );
                    counts.skipped += 1;
                    None
                }
            }
        } else {
            None
        };

        let payload = build_interface_payload(device.id, tpl, untagged_vlan, address);
        batch.add(
            format!("{}/{}", device.name, tpl.name),
            client.upsert_interface(payload),
        );
    }

    let report = batch.execute().await;
    counts.created += report.saved;
    for (label, error) in &report.failed {
        tracing::warn!("Interface save failed for {}: {}", label, error);
        counts.errors.push(format!("{}: {}", label, error));
    }

    Ok(())
}

async fn draw_peer_address(client: &InventoryClient, pool_id: i64) -> AllocationOutcome {
    match client
        .allocate_next_address(pool_id, PEER_PREFIX_LENGTH)
        .await
    {
        Ok(address) => AllocationOutcome::Allocated(address),
        Err(e) => AllocationOutcome::Skipped {
            reason: e.to_string(),
        },
    }
}

fn build_interface_payload(
    device_id: i64,
    tpl: &InterfaceTemplate,
    untagged_vlan: Option<i64>,
    address: Option<i64>,
) -> InterfaceCreate {
    InterfaceCreate {
        device: device_id,
        name: tpl.name.to_string(),
        speed: tpl.speed,
        status: tpl.status.unwrap_or("active").to_string(),
        role: tpl.role.to_string(),
        l2_mode: tpl.l2_mode.map(|s| s.to_string()),
        description: Some(tpl.description.to_string()),
        enabled: tpl.enabled,
        untagged_vlan,
        ip_addresses: address.into_iter().collect(),
    }
}

/// Cable the peer interfaces created in the device stage to each other.
async fn create_link(client: &InventoryClient) -> Result<StageCounts> {
    let mut counts = StageCounts::new("cabling");

    let peers = client
        .filter_interfaces_by_role(interface_role::PEER)
        .await?;
    let endpoint_ids = peers.iter().map(|i| i.id).collect();
    client.upsert_cable(endpoint_ids, "cat6", "Peer Link").await?;
    counts.created += 1;

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_payload_per_template_entry_without_address() {
        let templates = catalog::interface_templates("ams01").unwrap();
        let payloads: Vec<_> = templates
            .iter()
            .map(|tpl| build_interface_payload(1, tpl, None, None))
            .collect();
        assert_eq!(payloads.len(), templates.len());
        assert!(payloads.iter().all(|p| p.ip_addresses.is_empty()));
    }

    #[test]
    fn peer_payload_carries_allocated_address() {
        let templates = catalog::interface_templates("ams01").unwrap();
        let peer = templates
            .iter()
            .find(|t| t.role == interface_role::PEER)
            .unwrap();
        let payload = build_interface_payload(7, peer, None, Some(42));
        assert_eq!(payload.device, 7);
        assert_eq!(payload.ip_addresses, vec![42]);
        assert!(payload.untagged_vlan.is_none());
        assert!(payload.l2_mode.is_none());
    }

    #[test]
    fn host_payload_carries_untagged_vlan_and_access_mode() {
        let templates = catalog::interface_templates("ams01").unwrap();
        let host = templates
            .iter()
            .find(|t| t.role == interface_role::HOST)
            .unwrap();
        let payload = build_interface_payload(7, host, Some(11), None);
        assert_eq!(payload.untagged_vlan, Some(11));
        assert_eq!(payload.l2_mode.as_deref(), Some("access"));
        assert_eq!(payload.status, "active");
        assert!(payload.ip_addresses.is_empty());
    }
}

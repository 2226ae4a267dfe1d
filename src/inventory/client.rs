use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

use super::types::*;

/// Object kinds understood by the inventory platform
pub mod kind {
    pub const MANUFACTURER: &str = "OrganizationManufacturer";
    pub const DEVICE_TYPE: &str = "DcimDeviceType";
    pub const COUNTRY: &str = "LocationCountry";
    pub const METRO: &str = "LocationMetro";
    pub const SITE: &str = "LocationSite";
    pub const L2_DOMAIN: &str = "IpamL2Domain";
    pub const VLAN: &str = "IpamVLAN";
    pub const PREFIX: &str = "IpamPrefix";
    pub const IP_POOL: &str = "CoreIPAddressPool";
    pub const DEVICE: &str = "DcimDevice";
    pub const INTERFACE: &str = "InterfacePhysical";
    pub const CABLE: &str = "DcimCable";
}

/// Inventory platform API client. All writes go through upsert-allowed
/// saves keyed on natural identity, scoped to one branch.
pub struct InventoryClient {
    base_url: String,
    token: String,
    branch: String,
    client: Client,
}

impl InventoryClient {
    pub fn new(url: String, token: String, branch: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            token,
            branch,
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Create-or-update an object, keyed by its natural identity
    async fn post_object<T, B>(&self, object_kind: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let resp = self
            .client
            .post(self.api_url(&format!("/objects/{}/", object_kind)))
            .query(&[("allow_upsert", "true"), ("branch", self.branch.as_str())])
            .header("Authorization", self.auth_header())
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Inventory API error {} saving {}: {}",
                status,
                object_kind,
                body
            ));
        }

        Ok(resp.json().await?)
    }

    /// Patch fields of an existing object
    async fn patch_object<T, B>(&self, object_kind: &str, id: i64, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let resp = self
            .client
            .patch(self.api_url(&format!("/objects/{}/{}/", object_kind, id)))
            .query(&[("branch", self.branch.as_str())])
            .header("Authorization", self.auth_header())
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Inventory API error {} patching {} {}: {}",
                status,
                object_kind,
                id,
                body
            ));
        }

        Ok(resp.json().await?)
    }

    /// List objects of a kind, optionally filtered
    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        object_kind: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let resp = self
            .client
            .get(self.api_url(&format!("/objects/{}/", object_kind)))
            .query(&[("branch", self.branch.as_str())])
            .query(filters)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Inventory API error {} listing {}: {}",
                status,
                object_kind,
                body
            ));
        }

        let paginated: PaginatedResponse<T> = resp.json().await?;
        Ok(paginated.results)
    }

    /// Look up a single object by filter, erroring when absent
    async fn get_one<T: serde::de::DeserializeOwned>(
        &self,
        object_kind: &str,
        filters: &[(&str, &str)],
    ) -> Result<T> {
        let mut results = self.list(object_kind, filters).await?;
        if results.is_empty() {
            return Err(anyhow::anyhow!("No {} matching {:?}", object_kind, filters));
        }
        Ok(results.remove(0))
    }

    /// Test connectivity to the inventory API
    pub async fn test_connection(&self) -> bool {
        match self
            .client
            .get(self.api_url(&format!("/objects/{}/", kind::SITE)))
            .query(&[("limit", "1"), ("branch", self.branch.as_str())])
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    // --- Organization ---

    pub async fn upsert_manufacturer(&self, name: &str) -> Result<InvManufacturer> {
        self.post_object(
            kind::MANUFACTURER,
            &ManufacturerCreate {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn upsert_device_type(
        &self,
        name: &str,
        manufacturer_id: i64,
    ) -> Result<InvDeviceType> {
        self.post_object(
            kind::DEVICE_TYPE,
            &DeviceTypeCreate {
                name: name.to_string(),
                manufacturer: manufacturer_id,
            },
        )
        .await
    }

    pub async fn get_device_type(&self, name: &str) -> Result<InvDeviceType> {
        self.get_one(kind::DEVICE_TYPE, &[("name", name)]).await
    }

    // --- Locations ---

    pub async fn upsert_location(
        &self,
        tier_kind: &str,
        name: &str,
        shortname: &str,
        parent: Option<i64>,
        timezone: Option<&str>,
    ) -> Result<InvLocation> {
        self.post_object(
            tier_kind,
            &LocationCreate {
                name: name.to_string(),
                shortname: shortname.to_string(),
                parent,
                timezone: timezone.map(|s| s.to_string()),
            },
        )
        .await
    }

    pub async fn get_site(&self, name: &str) -> Result<InvLocation> {
        self.get_one(kind::SITE, &[("name", name)]).await
    }

    pub async fn list_sites(&self) -> Result<Vec<InvLocation>> {
        self.list(kind::SITE, &[]).await
    }

    // --- VLANs ---

    pub async fn upsert_l2_domain(&self, name: &str) -> Result<InvL2Domain> {
        self.post_object(
            kind::L2_DOMAIN,
            &L2DomainCreate {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn upsert_vlan(
        &self,
        name: &str,
        vlan_id: i32,
        status: &str,
        role: &str,
        l2domain_id: i64,
        location_ids: Vec<i64>,
    ) -> Result<InvVlan> {
        self.post_object(
            kind::VLAN,
            &VlanCreate {
                name: name.to_string(),
                vlan_id,
                status: status.to_string(),
                role: role.to_string(),
                l2domain: l2domain_id,
                locations: location_ids,
            },
        )
        .await
    }

    pub async fn get_vlan(&self, name: &str) -> Result<InvVlan> {
        self.get_one(kind::VLAN, &[("name", name)]).await
    }

    // --- Prefixes and pools ---

    pub async fn upsert_prefix(
        &self,
        prefix: &str,
        role: &str,
        description: &str,
        vlan_id: Option<i64>,
    ) -> Result<InvPrefix> {
        self.post_object(
            kind::PREFIX,
            &PrefixCreate {
                prefix: prefix.to_string(),
                status: "active".to_string(),
                member_type: "address".to_string(),
                role: role.to_string(),
                description: description.to_string(),
                vlan: vlan_id,
            },
        )
        .await
    }

    pub async fn upsert_pool(&self, name: &str, prefix_id: i64) -> Result<InvPool> {
        self.post_object(
            kind::IP_POOL,
            &PoolCreate {
                name: name.to_string(),
                default_prefix_type: "IpamIPPrefix".to_string(),
                default_prefix_length: 24,
                default_address_type: "IpamIPAddress".to_string(),
                default_member_type: "address".to_string(),
                ip_namespace: "default".to_string(),
                resources: vec![prefix_id],
            },
        )
        .await
    }

    /// Second step of the prefix two-step: point the prefix's gateway at its pool
    pub async fn set_prefix_gateway(&self, prefix_id: i64, pool_id: i64) -> Result<InvPrefix> {
        self.patch_object(
            kind::PREFIX,
            prefix_id,
            &PrefixGatewayPatch { gateway: pool_id },
        )
        .await
    }

    pub async fn get_pool(&self, name: &str) -> Result<InvPool> {
        self.get_one(kind::IP_POOL, &[("name", name)]).await
    }

    /// Draw the next free address from a resource pool
    pub async fn allocate_next_address(
        &self,
        pool_id: i64,
        prefix_length: u8,
    ) -> Result<InvIpAddress> {
        let resp = self
            .client
            .post(self.api_url(&format!("/pools/{}/allocate/", pool_id)))
            .query(&[("branch", self.branch.as_str())])
            .header("Authorization", self.auth_header())
            .json(&AllocateRequest { prefix_length })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Pool allocation error {}: {}",
                status,
                body
            ));
        }

        Ok(resp.json().await?)
    }

    // --- Devices and interfaces ---

    pub async fn upsert_device(
        &self,
        name: &str,
        description: &str,
        role: &str,
        location_id: i64,
        device_type_id: i64,
        primary_address_pool_id: i64,
    ) -> Result<InvDevice> {
        self.post_object(
            kind::DEVICE,
            &DeviceCreate {
                name: name.to_string(),
                description: description.to_string(),
                status: "active".to_string(),
                role: role.to_string(),
                location: location_id,
                device_type: device_type_id,
                primary_address: primary_address_pool_id,
            },
        )
        .await
    }

    pub async fn upsert_interface(&self, payload: InterfaceCreate) -> Result<InvInterface> {
        self.post_object(kind::INTERFACE, &payload).await
    }

    pub async fn filter_interfaces_by_role(&self, role: &str) -> Result<Vec<InvInterface>> {
        self.list(kind::INTERFACE, &[("role", role)]).await
    }

    // --- Cabling ---

    pub async fn upsert_cable(
        &self,
        endpoint_ids: Vec<i64>,
        cable_type: &str,
        label: &str,
    ) -> Result<InvCable> {
        self.post_object(
            kind::CABLE,
            &CableCreate {
                connected_endpoints: endpoint_ids,
                status: "connected".to_string(),
                cable_type: cable_type.to_string(),
                label: label.to_string(),
            },
        )
        .await
    }

    // --- Schema ---

    /// Register a dropdown option value against a schema attribute.
    /// The platform rejects duplicates, so callers tolerate failures here.
    pub async fn add_dropdown_option(
        &self,
        object_kind: &str,
        attribute: &str,
        option: &str,
        label: &str,
        color: &str,
    ) -> Result<()> {
        let resp = self
            .client
            .post(self.api_url("/schema/dropdown-options/"))
            .query(&[("branch", self.branch.as_str())])
            .header("Authorization", self.auth_header())
            .json(&DropdownOptionCreate {
                kind: object_kind.to_string(),
                attribute: attribute.to_string(),
                option: option.to_string(),
                label: label.to_string(),
                color: color.to_string(),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Dropdown option error {} for {}.{}: {}",
                status,
                object_kind,
                attribute,
                body
            ));
        }

        Ok(())
    }
}

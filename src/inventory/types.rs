use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Inventory API types ---

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChoice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvManufacturer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvDeviceType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<ObjectRef>,
}

/// A location tier object (country, metro, and site share this shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvLocation {
    pub id: i64,
    pub name: String,
    pub shortname: String,
    #[serde(default)]
    pub parent: Option<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvL2Domain {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvVlan {
    pub id: i64,
    pub name: String,
    pub vlan_id: i32,
    #[serde(default)]
    pub status: Option<StatusChoice>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub locations: Vec<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvPrefix {
    pub id: i64,
    pub prefix: String,
    #[serde(default)]
    pub status: Option<StatusChoice>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vlan: Option<ObjectRef>,
    #[serde(default)]
    pub gateway: Option<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvPool {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvDevice {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: Option<StatusChoice>,
    #[serde(default)]
    pub location: Option<ObjectRef>,
    #[serde(default)]
    pub device_type: Option<ObjectRef>,
    #[serde(default)]
    pub primary_address: Option<InvIpAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvInterface {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub device: Option<ObjectRef>,
    #[serde(default)]
    pub untagged_vlan: Option<ObjectRef>,
    #[serde(default)]
    pub ip_addresses: Vec<InvIpAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvIpAddress {
    pub id: i64,
    pub address: String,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvCable {
    pub id: i64,
    #[serde(default)]
    pub status: Option<StatusChoice>,
    #[serde(default)]
    pub cable_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub connected_endpoints: Vec<ObjectRef>,
}

// --- Create request types ---

#[derive(Debug, Serialize)]
pub(crate) struct ManufacturerCreate {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeviceTypeCreate {
    pub name: String,
    pub manufacturer: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationCreate {
    pub name: String,
    pub shortname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct L2DomainCreate {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct VlanCreate {
    pub name: String,
    pub vlan_id: i32,
    pub status: String,
    pub role: String,
    pub l2domain: i64,
    pub locations: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PrefixCreate {
    pub prefix: String,
    pub status: String,
    pub member_type: String,
    pub role: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PoolCreate {
    pub name: String,
    pub default_prefix_type: String,
    pub default_prefix_length: u8,
    pub default_address_type: String,
    pub default_member_type: String,
    pub ip_namespace: String,
    pub resources: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PrefixGatewayPatch {
    pub gateway: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeviceCreate {
    pub name: String,
    pub description: String,
    pub status: String,
    pub role: String,
    pub location: i64,
    pub device_type: i64,
    // pool the platform draws the primary address from
    pub primary_address: i64,
}

#[derive(Debug, Serialize)]
pub struct InterfaceCreate {
    pub device: i64,
    pub name: String,
    pub speed: i64,
    pub status: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l2_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untagged_vlan: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CableCreate {
    pub connected_endpoints: Vec<i64>,
    pub status: String,
    pub cable_type: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DropdownOptionCreate {
    pub kind: String,
    pub attribute: String,
    pub option: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AllocateRequest {
    pub prefix_length: u8,
}

// --- Local outcome types ---

/// Outcome of a resource-pool address draw. A failed draw (pool exhausted,
/// pool missing) is tolerated: the interface is still created, just without
/// an address.
#[derive(Debug, Clone)]
pub enum AllocationOutcome {
    Allocated(InvIpAddress),
    Skipped { reason: String },
}

/// Per-item results of a grouped save submission
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub saved: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

// --- Seed run report ---

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stages: Vec<StageCounts>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCounts {
    pub stage: String,
    pub created: usize,
    pub skipped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl StageCounts {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            created: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_site_list_deserializes() {
        let body = r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [
                {"id": 7, "name": "Amsterdam 1", "shortname": "ams01",
                 "parent": {"id": 3, "name": "Amsterdam"}}
            ]
        }"#;
        let page: PaginatedResponse<InvLocation> = serde_json::from_str(body).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].shortname, "ams01");
        assert_eq!(page.results[0].parent.as_ref().unwrap().id, 3);
    }

    #[test]
    fn allocated_address_deserializes() {
        let body = r#"{"id": 42, "address": "192.168.200.1/30"}"#;
        let addr: InvIpAddress = serde_json::from_str(body).unwrap();
        assert_eq!(addr.id, 42);
        assert_eq!(addr.address, "192.168.200.1/30");
        assert!(addr.display.is_none());
    }

    #[test]
    fn interface_create_omits_unset_fields() {
        let payload = InterfaceCreate {
            device: 1,
            name: "Ethernet1".to_string(),
            speed: 1000,
            status: "active".to_string(),
            role: "peer".to_string(),
            l2_mode: None,
            description: None,
            enabled: None,
            untagged_vlan: None,
            ip_addresses: Vec::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("l2_mode"));
        assert!(!obj.contains_key("untagged_vlan"));
        assert!(!obj.contains_key("ip_addresses"));
        assert_eq!(obj["speed"], 1000);
    }
}

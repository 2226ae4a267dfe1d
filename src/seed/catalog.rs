//! Static seed tables describing the bootstrap data set. The remote platform
//! owns schema and identity; these tables only have to stay internally
//! consistent (cross-references are checked by the tests below).

/// Canonical interface role values
pub mod interface_role {
    pub const HOST: &str = "host";
    pub const PEER: &str = "peer";
}

/// Canonical prefix role values
pub mod prefix_role {
    pub const MANAGEMENT: &str = "management";
    pub const OFFICE: &str = "office";
    pub const SERVER: &str = "server";
    pub const PEER: &str = "peer";

    /// Roles whose prefix gets its gateway pointed at the paired pool
    /// after pool creation. Peer prefixes stay gateway-less.
    pub fn gateway_backed(role: &str) -> bool {
        matches!(role, "management" | "office" | "server")
    }
}

pub const MANUFACTURER: &str = "Arista";

pub const L2_DOMAIN: &str = "default";

pub fn device_types() -> Vec<&'static str> {
    vec!["EOS"]
}

/// Name of the IP pool paired with a prefix
pub fn pool_name(prefix_name: &str) -> String {
    format!("{} IP pool", prefix_name)
}

pub struct DropdownSeed {
    pub kind: &'static str,
    pub attribute: &'static str,
    pub option: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub fn dropdown_options() -> Vec<DropdownSeed> {
    vec![
        DropdownSeed {
            kind: "IpamPrefix",
            attribute: "role",
            option: "peer",
            label: "Peering",
            color: "#ff0000",
        },
        DropdownSeed {
            kind: "IpamPrefix",
            attribute: "role",
            option: "office",
            label: "Office",
            color: "#ff1111",
        },
        DropdownSeed {
            kind: "DcimInterface",
            attribute: "role",
            option: "host",
            label: "Host",
            color: "#02f4fc",
        },
        DropdownSeed {
            kind: "DcimInterface",
            attribute: "role",
            option: "peer",
            label: "Peer",
            color: "#02f4fc",
        },
    ]
}

pub struct VlanSeed {
    pub name: &'static str,
    pub vlan_id: i32,
    pub status: &'static str,
    pub role: &'static str,
    pub site: &'static str,
}

pub fn vlans() -> Vec<VlanSeed> {
    vec![
        VlanSeed {
            name: "Client",
            vlan_id: 10,
            status: "active",
            role: "user",
            site: "Amsterdam 1",
        },
        VlanSeed {
            name: "Server",
            vlan_id: 100,
            status: "active",
            role: "server",
            site: "Rotterdam 1",
        },
    ]
}

pub struct PrefixSeed {
    pub name: &'static str,
    pub role: &'static str,
    pub prefix: &'static str,
    pub description: &'static str,
    pub vlan: Option<&'static str>,
}

pub fn prefixes() -> Vec<PrefixSeed> {
    vec![
        PrefixSeed {
            name: "Management",
            role: prefix_role::MANAGEMENT,
            prefix: "172.16.10.0/24",
            description: "Management Prefix",
            vlan: None,
        },
        PrefixSeed {
            name: "Client",
            role: prefix_role::OFFICE,
            prefix: "192.168.1.0/24",
            description: "Client Prefix",
            vlan: Some("Client"),
        },
        PrefixSeed {
            name: "Server",
            role: prefix_role::SERVER,
            prefix: "192.168.100.0/24",
            description: "Server Prefix",
            vlan: Some("Server"),
        },
        PrefixSeed {
            name: "Peer",
            role: prefix_role::PEER,
            prefix: "192.168.200.0/30",
            description: "Peer Prefix",
            vlan: None,
        },
    ]
}

pub struct SiteSeed {
    pub name: &'static str,
    pub shortname: &'static str,
}

pub struct MetroSeed {
    pub name: &'static str,
    pub shortname: &'static str,
    pub sites: Vec<SiteSeed>,
}

pub struct CountrySeed {
    pub name: &'static str,
    pub shortname: &'static str,
    pub timezone: &'static str,
    pub metros: Vec<MetroSeed>,
}

pub fn locations() -> Vec<CountrySeed> {
    vec![CountrySeed {
        name: "Netherlands",
        shortname: "NL",
        timezone: "CET",
        metros: vec![
            MetroSeed {
                name: "Amsterdam",
                shortname: "ams",
                sites: vec![SiteSeed {
                    name: "Amsterdam 1",
                    shortname: "ams01",
                }],
            },
            MetroSeed {
                name: "Rotterdam",
                shortname: "rtm",
                sites: vec![SiteSeed {
                    name: "Rotterdam 1",
                    shortname: "rtm01",
                }],
            },
        ],
    }]
}

pub struct InterfaceTemplate {
    pub name: &'static str,
    pub speed: i64,
    pub role: &'static str,
    pub description: &'static str,
    pub status: Option<&'static str>,
    pub l2_mode: Option<&'static str>,
    pub enabled: Option<bool>,
    pub vlan: Option<&'static str>,
}

/// Interface set for the switch at a site, keyed by site shortname
pub fn interface_templates(site_shortname: &str) -> Option<Vec<InterfaceTemplate>> {
    match site_shortname {
        "ams01" => Some(vec![
            InterfaceTemplate {
                name: "Ethernet1",
                speed: 1000,
                role: interface_role::PEER,
                description: "Connected to peer switch",
                status: None,
                l2_mode: None,
                enabled: None,
                vlan: None,
            },
            InterfaceTemplate {
                name: "Ethernet2",
                speed: 1000,
                role: interface_role::HOST,
                description: "Connected to host",
                status: None,
                l2_mode: Some("access"),
                enabled: None,
                vlan: Some("Client"),
            },
        ]),
        "rtm01" => Some(vec![
            InterfaceTemplate {
                name: "Ethernet1",
                speed: 1000,
                role: interface_role::PEER,
                description: "Connected to peer switch",
                status: None,
                l2_mode: None,
                enabled: None,
                vlan: None,
            },
            InterfaceTemplate {
                name: "Ethernet2",
                speed: 1000,
                role: interface_role::HOST,
                description: "Connected to server",
                status: None,
                l2_mode: Some("access"),
                enabled: None,
                vlan: Some("Server"),
            },
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_valid_cidr;

    fn vlan_names() -> Vec<&'static str> {
        vlans().iter().map(|v| v.name).collect()
    }

    fn site_seeds() -> Vec<SiteSeed> {
        locations()
            .into_iter()
            .flat_map(|c| c.metros)
            .flat_map(|m| m.sites)
            .collect()
    }

    #[test]
    fn prefix_vlan_references_resolve() {
        let names = vlan_names();
        for prefix in prefixes() {
            if let Some(vlan) = prefix.vlan {
                assert!(names.contains(&vlan), "prefix {} references unknown VLAN {}", prefix.name, vlan);
            }
        }
    }

    #[test]
    fn template_vlan_references_resolve() {
        let names = vlan_names();
        for site in site_seeds() {
            for tpl in interface_templates(site.shortname).unwrap() {
                if let Some(vlan) = tpl.vlan {
                    assert!(names.contains(&vlan), "template {} references unknown VLAN {}", tpl.name, vlan);
                }
            }
        }
    }

    #[test]
    fn vlan_sites_exist() {
        let site_names: Vec<&str> = site_seeds().iter().map(|s| s.name).collect();
        for vlan in vlans() {
            assert!(site_names.contains(&vlan.site), "VLAN {} placed at unknown site {}", vlan.name, vlan.site);
        }
    }

    #[test]
    fn every_site_has_an_interface_template() {
        for site in site_seeds() {
            let templates = interface_templates(site.shortname);
            assert!(templates.is_some(), "no interface template for {}", site.shortname);
            assert!(!templates.unwrap().is_empty());
        }
        assert!(interface_templates("unknown99").is_none());
    }

    #[test]
    fn prefixes_are_valid_cidr() {
        for prefix in prefixes() {
            assert!(is_valid_cidr(prefix.prefix), "invalid prefix {}", prefix.prefix);
        }
    }

    #[test]
    fn vlan_ids_and_names_are_unique() {
        let all = vlans();
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
                assert_ne!(a.vlan_id, b.vlan_id);
            }
        }
    }

    #[test]
    fn gateway_backed_roles() {
        assert!(prefix_role::gateway_backed(prefix_role::MANAGEMENT));
        assert!(prefix_role::gateway_backed(prefix_role::OFFICE));
        assert!(prefix_role::gateway_backed(prefix_role::SERVER));
        assert!(!prefix_role::gateway_backed(prefix_role::PEER));
        assert!(!prefix_role::gateway_backed("user"));
    }

    #[test]
    fn pool_naming() {
        assert_eq!(pool_name("Peer"), "Peer IP pool");
        assert_eq!(pool_name("Management"), "Management IP pool");
    }
}

/// Build the canonical device name for a switch at a site,
/// e.g., index 1 at "ams01" -> "sw01-ams01"
pub fn device_name(index: u32, site_shortname: &str) -> String {
    format!("sw{:02}-{}", index, site_shortname)
}

/// Validate an IPv4 address (e.g., "192.168.1.1").
/// Returns true if the string is a valid dotted-decimal IPv4 address.
pub fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts.iter().all(|p| p.parse::<u8>().is_ok())
}

/// Validate an IPv4 CIDR prefix (e.g., "192.168.1.0/24").
/// Requires a valid address part and a mask length of at most 32.
pub fn is_valid_cidr(prefix: &str) -> bool {
    let Some((addr, len)) = prefix.split_once('/') else {
        return false;
    };
    if !is_valid_ipv4(addr) {
        return false;
    }
    matches!(len.parse::<u8>(), Ok(n) if n <= 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_name() {
        assert_eq!(device_name(1, "ams01"), "sw01-ams01");
        assert_eq!(device_name(12, "rtm01"), "sw12-rtm01");
    }

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("not-an-ip"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
    }

    #[test]
    fn test_is_valid_cidr() {
        assert!(is_valid_cidr("192.168.1.0/24"));
        assert!(is_valid_cidr("192.168.200.0/30"));
        assert!(is_valid_cidr("0.0.0.0/0"));
        assert!(!is_valid_cidr("192.168.1.0"));
        assert!(!is_valid_cidr("192.168.1.0/33"));
        assert!(!is_valid_cidr("999.168.1.0/24"));
        assert!(!is_valid_cidr("192.168.1.0/"));
    }
}

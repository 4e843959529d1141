use crate::core::conversion::{format_ipv4, parse_ipv4, prefix_mask};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetSummary {
    pub prefix: u8,
    pub mask: String,
    /// 32 characters, network bits as '1'.
    pub binary_mask: String,
    pub network_bits: u8,
    pub host_bits: u8,
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

impl SubnetSummary {
    pub fn for_prefix(prefix: i64) -> Result<Self> {
        let mask = prefix_mask(prefix)?;
        let network_bits = prefix as u8;
        let host_bits = 32 - network_bits;
        let total_addresses = 1u64 << host_bits;

        // /31 point-to-point links and /32 host routes have no network/broadcast pair
        let usable_hosts = match network_bits {
            32 => 1,
            31 => 2,
            _ => total_addresses - 2,
        };

        Ok(Self {
            prefix: network_bits,
            mask: format_ipv4(mask),
            binary_mask: format!("{:032b}", mask),
            network_bits,
            host_bits,
            total_addresses,
            usable_hosts,
        })
    }
}

/// First address of the block containing `ip`.
pub fn network_address(ip: &str, prefix: i64) -> Result<String> {
    let address = u32::from_be_bytes(parse_ipv4(ip)?);
    let mask = prefix_mask(prefix)?;
    Ok(format_ipv4(address & mask))
}

/// Last address of the block containing `ip`.
pub fn broadcast_address(ip: &str, prefix: i64) -> Result<String> {
    let address = u32::from_be_bytes(parse_ipv4(ip)?);
    let mask = prefix_mask(prefix)?;
    Ok(format_ipv4(address | !mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CoreError;

    #[test]
    fn test_slash_24() {
        let summary = SubnetSummary::for_prefix(24).unwrap();
        assert_eq!(summary.mask, "255.255.255.0");
        assert_eq!(summary.binary_mask, format!("{}{}", "1".repeat(24), "0".repeat(8)));
        assert_eq!(summary.network_bits, 24);
        assert_eq!(summary.host_bits, 8);
        assert_eq!(summary.total_addresses, 256);
        assert_eq!(summary.usable_hosts, 254);
    }

    #[test]
    fn test_edge_prefixes() {
        let host = SubnetSummary::for_prefix(32).unwrap();
        assert_eq!(host.total_addresses, 1);
        assert_eq!(host.usable_hosts, 1);
        assert_eq!(host.mask, "255.255.255.255");

        let link = SubnetSummary::for_prefix(31).unwrap();
        assert_eq!(link.total_addresses, 2);
        assert_eq!(link.usable_hosts, 2);

        let everything = SubnetSummary::for_prefix(0).unwrap();
        assert_eq!(everything.mask, "0.0.0.0");
        assert_eq!(everything.total_addresses, 1u64 << 32);
        assert_eq!(everything.usable_hosts, (1u64 << 32) - 2);
    }

    #[test]
    fn test_prefix_out_of_range() {
        assert!(matches!(
            SubnetSummary::for_prefix(33),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            SubnetSummary::for_prefix(-1),
            Err(CoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_network_and_broadcast() {
        assert_eq!(network_address("192.168.1.130", 25).unwrap(), "192.168.1.128");
        assert_eq!(broadcast_address("192.168.1.130", 25).unwrap(), "192.168.1.255");
        assert_eq!(network_address("192.168.10.77", 26).unwrap(), "192.168.10.64");
        assert_eq!(broadcast_address("10.0.0.0", 30).unwrap(), "10.0.0.3");
        assert_eq!(network_address("8.8.8.8", 0).unwrap(), "0.0.0.0");
        assert_eq!(broadcast_address("8.8.8.8", 32).unwrap(), "8.8.8.8");
    }

    #[test]
    fn test_malformed_ip() {
        assert!(matches!(
            network_address("192.168.1", 24),
            Err(CoreError::InvalidFormat { .. })
        ));
        assert!(matches!(
            broadcast_address("300.1.1.1", 24),
            Err(CoreError::InvalidFormat { .. })
        ));
    }
}

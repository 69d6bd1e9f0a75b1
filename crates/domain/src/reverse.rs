use crate::errors::DomainError;
use std::net::IpAddr;

/// Returns the `in-addr.arpa.` hostname of an IPv4 address, suitable for a
/// rDNS (PTR) record lookup.
///
/// Reverse lookups under `ip6.arpa.` are not supported; IPv6 input is
/// rejected rather than silently mis-encoded.
pub fn reverse_name(address: &str) -> Result<String, DomainError> {
    let ip: IpAddr = address
        .parse()
        .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;

    let octets = match ip {
        IpAddr::V4(v4) => v4.octets(),
        IpAddr::V6(_) => return Err(DomainError::NotIpv4Address(address.to_string())),
    };

    Ok(format!(
        "{}.{}.{}.{}.in-addr.arpa.",
        octets[3], octets[2], octets[1], octets[0]
    ))
}

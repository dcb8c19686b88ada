//! CIDR normalization: one CIDR block in, one explicit address range out.

use ipnet::{ipv4_mask_to_prefix, IpNet, Ipv4Net, Ipv4Subnets, Ipv6Subnets};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use crate::error::RangegenError;

/// The first and last address covered by a network.
///
/// Renders as `first-last`. Two ranges are equal exactly when their rendered
/// forms are equal, so this type is used directly as the deduplication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressRange {
    pub first: IpAddr,
    pub last: IpAddr,
}

impl AddressRange {
    /// Build the range covered by `net`, ignoring any host bits.
    pub fn from_net(net: &IpNet) -> Self {
        Self {
            first: net.network(),
            last: net.broadcast(),
        }
    }

    /// Convert back to a single CIDR block, if the range is exactly one prefix.
    pub fn to_cidr(&self) -> Option<IpNet> {
        let mut subnets: Vec<IpNet> = match (self.first, self.last) {
            (IpAddr::V4(first), IpAddr::V4(last)) => {
                Ipv4Subnets::new(first, last, 0).map(IpNet::V4).collect()
            }
            (IpAddr::V6(first), IpAddr::V6(last)) => {
                Ipv6Subnets::new(first, last, 0).map(IpNet::V6).collect()
            }
            _ => return None,
        };

        if subnets.len() == 1 {
            subnets.pop()
        } else {
            None
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// Parse a CIDR block and return its first and last address.
///
/// Parsing is non-strict: host bits beyond the prefix are masked off, so
/// `1.2.3.4/24` yields `1.2.3.0-1.2.3.255`. A bare address is treated as a
/// single-host network. IPv4 blocks may also give a dotted netmask or
/// hostmask instead of a prefix length (`10.0.0.0/255.0.0.0`,
/// `10.0.0.0/0.255.255.255`). Surrounding whitespace is ignored.
///
/// # Examples
/// ```
/// use rangegen::normalizer::normalize;
/// let range = normalize("1.2.3.4/24").unwrap();
/// assert_eq!(range.to_string(), "1.2.3.0-1.2.3.255");
/// assert!(normalize("999.1.1.1/24").is_err());
/// ```
pub fn normalize(cidr: &str) -> Result<AddressRange, RangegenError> {
    let trimmed = cidr.trim();
    let parse_err = |reason: String| RangegenError::Parse {
        input: cidr.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(parse_err("empty input".to_string()));
    }

    let net = match trimmed.split_once('/') {
        Some((addr, mask)) if mask.contains('.') => {
            parse_masked(addr, mask).map_err(parse_err)?
        }
        Some(_) => trimmed
            .parse::<IpNet>()
            .map_err(|e| parse_err(e.to_string()))?,
        None => trimmed
            .parse::<IpAddr>()
            .map(IpNet::from)
            .map_err(|e| parse_err(e.to_string()))?,
    };

    Ok(AddressRange::from_net(&net))
}

/// `addr/mask` with a dotted IPv4 mask, tried as a netmask first, then as a hostmask.
fn parse_masked(addr: &str, mask: &str) -> Result<IpNet, String> {
    let addr: Ipv4Addr = addr
        .parse()
        .map_err(|_| format!("invalid IPv4 address '{}'", addr))?;
    let mask: Ipv4Addr = mask
        .parse()
        .map_err(|_| format!("invalid netmask '{}'", mask))?;
    let prefix = ipv4_mask_to_prefix(mask)
        .or_else(|_| ipv4_mask_to_prefix(!mask))
        .map_err(|_| format!("non-contiguous netmask '{}'", mask))?;
    Ipv4Net::new(addr, prefix)
        .map(IpNet::V4)
        .map_err(|e| e.to_string())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ipv4_cidr_string_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255, 0u8..=32)
            .prop_map(|(a, b, c, d, prefix)| format!("{}.{}.{}.{}/{}", a, b, c, d, prefix))
    }

    proptest! {
        /// First address never exceeds last address
        #[test]
        fn prop_first_not_after_last(cidr in ipv4_cidr_string_strategy()) {
            let range = normalize(&cidr).unwrap();
            prop_assert!(range.first <= range.last);
        }

        /// A normalized range converts back to exactly one CIDR that normalizes identically
        #[test]
        fn prop_to_cidr_stable(cidr in ipv4_cidr_string_strategy()) {
            let range = normalize(&cidr).unwrap();
            let back = range.to_cidr().unwrap();
            prop_assert_eq!(normalize(&back.to_string()).unwrap(), range);
        }

        /// Arbitrary text never panics
        #[test]
        fn prop_arbitrary_input_no_panic(input in ".*") {
            let _ = normalize(&input);
        }
    }
}

//! Per-category range deduplication.

use std::collections::HashSet;
use tracing::debug;

use crate::normalizer::{normalize, AddressRange};

/// Counters describing what [`dedupe_with_stats`] dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupeStats {
    pub input: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

impl DedupeStats {
    pub fn kept(&self) -> usize {
        self.input - self.invalid - self.duplicates
    }
}

/// Normalize CIDR blocks in order and drop ranges already seen.
///
/// Entries that fail to parse are skipped. The first occurrence of a range
/// wins and the relative order of survivors is preserved; nothing is sorted.
///
/// # Examples
/// ```
/// use rangegen::dedup::dedupe;
/// let ranges = dedupe(["1.2.3.0/24", "1.2.3.1/24"]);
/// assert_eq!(ranges.len(), 1);
/// assert_eq!(ranges[0].to_string(), "1.2.3.0-1.2.3.255");
/// ```
pub fn dedupe<I, S>(cidrs: I) -> Vec<AddressRange>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dedupe_with_stats(cidrs).0
}

/// Same as [`dedupe`], also reporting how many entries were dropped and why.
pub fn dedupe_with_stats<I, S>(cidrs: I) -> (Vec<AddressRange>, DedupeStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ranges = Vec::new();
    let mut stats = DedupeStats::default();

    for cidr in cidrs {
        stats.input += 1;
        match normalize(cidr.as_ref()) {
            Ok(range) => {
                if seen.insert(range) {
                    ranges.push(range);
                } else {
                    stats.duplicates += 1;
                }
            }
            Err(e) => {
                debug!("Skipping {}", e);
                stats.invalid += 1;
            }
        }
    }

    (ranges, stats)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ipv4_cidr_string_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255, 0u8..=32)
            .prop_map(|(a, b, c, d, prefix)| format!("{}.{}.{}.{}/{}", a, b, c, d, prefix))
    }

    fn cidr_vec_strategy(max_size: usize) -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(ipv4_cidr_string_strategy(), 0..max_size)
    }

    proptest! {
        /// Two spellings of the same network collapse to one range
        #[test]
        fn prop_same_span_collapses(
            (a, b, c, d, prefix) in (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255, 0u8..=32),
            host in any::<u32>(),
        ) {
            let first = format!("{}.{}.{}.{}/{}", a, b, c, d, prefix);
            let net: ipnet::Ipv4Net = first.parse().unwrap();
            let base = u32::from(net.network());
            let host_bits = if prefix == 0 { u32::MAX } else { (1u32 << (32 - prefix)).wrapping_sub(1) };
            let other = std::net::Ipv4Addr::from(base | (host & host_bits));
            let second = format!("{}/{}", other, prefix);
            prop_assert_eq!(dedupe([first, second]).len(), 1);
        }

        /// Output never contains duplicates
        #[test]
        fn prop_no_duplicates(cidrs in cidr_vec_strategy(100)) {
            let ranges = dedupe(&cidrs);
            let set: HashSet<_> = ranges.iter().collect();
            prop_assert_eq!(set.len(), ranges.len());
        }

        /// Running again on the output changes nothing
        #[test]
        fn prop_idempotent(cidrs in cidr_vec_strategy(100)) {
            let once = dedupe(&cidrs);
            let as_strings: Vec<String> = once
                .iter()
                .filter_map(|r| r.to_cidr())
                .map(|n| n.to_string())
                .collect();
            prop_assert_eq!(dedupe(&as_strings), once);
        }

        /// An invalid literal anywhere in the input is transparent
        #[test]
        fn prop_invalid_literal_transparent(
            cidrs in cidr_vec_strategy(50),
            position in any::<prop::sample::Index>(),
        ) {
            let expected = dedupe(&cidrs);
            let mut with_bad = cidrs.clone();
            let at = position.index(with_bad.len() + 1);
            with_bad.insert(at, "999.1.1.1/24".to_string());
            prop_assert_eq!(dedupe(&with_bad), expected);
        }

        /// Survivors keep their relative input order
        #[test]
        fn prop_order_preserved(cidrs in cidr_vec_strategy(50)) {
            let ranges = dedupe(&cidrs);
            let firsts: Vec<usize> = ranges
                .iter()
                .map(|r| cidrs.iter().position(|c| normalize(c).ok() == Some(*r)).unwrap())
                .collect();
            prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

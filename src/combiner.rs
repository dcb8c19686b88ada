//! Union of all category results.

use std::collections::HashSet;

use crate::normalizer::AddressRange;
use crate::pipeline::CategoryResults;

/// Union of every category's ranges, each range exactly once.
///
/// The order of the returned ranges is unspecified. Sort before persisting
/// if stable output is needed.
pub fn combine(results: &CategoryResults) -> Vec<AddressRange> {
    combine_all(results.iter().map(|(_, ranges)| ranges))
}

/// Union of arbitrary range lists.
pub fn combine_all<'a, I>(lists: I) -> Vec<AddressRange>
where
    I: IntoIterator<Item = &'a [AddressRange]>,
{
    let set: HashSet<AddressRange> = lists.into_iter().flatten().copied().collect();
    set.into_iter().collect()
}

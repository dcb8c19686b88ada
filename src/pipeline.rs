//! Category pipeline: one deduplicated range list per category.

use std::collections::BTreeMap;
use tracing::debug;

use crate::dedup::dedupe_with_stats;
use crate::hotspots::{Category, HotspotList};
use crate::normalizer::AddressRange;

/// Deduplicated ranges for every category, iterated in category order.
///
/// Always holds all five categories, possibly with empty lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResults {
    ranges: BTreeMap<Category, Vec<AddressRange>>,
}

impl CategoryResults {
    /// Ranges for one category.
    pub fn get(&self, category: Category) -> &[AddressRange] {
        self.ranges.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[AddressRange])> {
        self.ranges.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    /// True when the fetched bulk category produced no ranges.
    pub fn bulk_is_empty(&self) -> bool {
        self.get(Category::AllRussia).is_empty()
    }

    /// Sum of per-category counts (ranges shared by categories counted once per category).
    pub fn total(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }
}

/// Build all five category results.
///
/// `bulk_input` feeds the bulk category; each hotspot list feeds its own
/// category. Categories are deduplicated independently and never merged with
/// each other here. Unparseable literals are skipped.
pub fn build_categories<S: AsRef<str>>(
    bulk_input: &[S],
    hotspots: &[HotspotList],
) -> CategoryResults {
    let mut inputs: BTreeMap<Category, Vec<&str>> = Category::ALL
        .into_iter()
        .map(|category| (category, Vec::new()))
        .collect();

    if let Some(bulk) = inputs.get_mut(&Category::AllRussia) {
        bulk.extend(bulk_input.iter().map(|s| s.as_ref()));
    }

    for list in hotspots {
        // The bulk category only ever comes from the fetched input
        if list.category.is_bulk() {
            debug!("Ignoring curated list for bulk category");
            continue;
        }
        if let Some(input) = inputs.get_mut(&list.category) {
            input.extend(list.cidrs.iter().copied());
        }
    }

    let ranges = inputs
        .into_iter()
        .map(|(category, cidrs)| {
            let (ranges, stats) = dedupe_with_stats(cidrs);
            debug!(
                "{}: {} entries, {} invalid, {} duplicate, {} kept",
                category,
                stats.input,
                stats.invalid,
                stats.duplicates,
                stats.kept()
            );
            (category, ranges)
        })
        .collect();

    CategoryResults { ranges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspots::HOTSPOT_LISTS;

    fn rendered(ranges: &[AddressRange]) -> Vec<String> {
        ranges.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_always_five_categories() {
        let results = build_categories::<String>(&[], &[]);
        assert_eq!(results.iter().count(), 5);
        assert_eq!(results.total(), 0);
    }

    #[test]
    fn test_empty_bulk_input() {
        let results = build_categories::<String>(&[], &HOTSPOT_LISTS);
        assert!(results.bulk_is_empty());
        assert!(results.get(Category::AllRussia).is_empty());
        assert!(!results.get(Category::Hikvision8000).is_empty());
    }

    #[test]
    fn test_bulk_deduplicated() {
        let bulk = vec![
            "1.2.3.0/24".to_string(),
            "1.2.3.1/24".to_string(),
            "999.1.1.1/24".to_string(),
        ];
        let results = build_categories(&bulk, &HOTSPOT_LISTS);
        assert_eq!(
            rendered(results.get(Category::AllRussia)),
            vec!["1.2.3.0-1.2.3.255"]
        );
        assert!(!results.bulk_is_empty());
    }

    #[test]
    fn test_hotspot_duplicates_collapse() {
        let results = build_categories::<String>(&[], &HOTSPOT_LISTS);
        // 35 literals with two repeated entries
        assert_eq!(results.get(Category::Hikvision8000).len(), 33);
        assert_eq!(results.get(Category::SmartPss3000).len(), 14);
        assert_eq!(results.get(Category::Web80).len(), 9);
        assert_eq!(results.get(Category::Camera37777).len(), 22);
    }

    #[test]
    fn test_categories_not_merged_before_dedupe() {
        let results = build_categories::<String>(&[], &HOTSPOT_LISTS);
        let target = "31.173.0.0-31.173.255.255";
        for category in [Category::Hikvision8000, Category::Web80, Category::Camera37777] {
            assert!(rendered(results.get(category)).contains(&target.to_string()));
        }
    }

    #[test]
    fn test_invalid_curated_literal_skipped() {
        let lists = [HotspotList {
            category: Category::Web80,
            cidrs: &["31.173.0.0/16", "300.0.0.0/8", "95.165.0.0/16"],
        }];
        let results = build_categories::<String>(&[], &lists);
        assert_eq!(
            rendered(results.get(Category::Web80)),
            vec!["31.173.0.0-31.173.255.255", "95.165.0.0-95.165.255.255"]
        );
    }

    #[test]
    fn test_missing_hotspot_category_is_empty() {
        let lists = [HotspotList {
            category: Category::Web80,
            cidrs: &["31.173.0.0/16"],
        }];
        let results = build_categories::<String>(&[], &lists);
        assert!(results.get(Category::Camera37777).is_empty());
        assert_eq!(results.get(Category::Web80).len(), 1);
    }

    #[test]
    fn test_repeated_category_lists_concatenate() {
        let lists = [
            HotspotList {
                category: Category::Web80,
                cidrs: &["31.173.0.0/16"],
            },
            HotspotList {
                category: Category::Web80,
                cidrs: &["95.165.0.0/16", "31.173.0.0/16"],
            },
        ];
        let results = build_categories::<String>(&[], &lists);
        assert_eq!(
            rendered(results.get(Category::Web80)),
            vec!["31.173.0.0-31.173.255.255", "95.165.0.0-95.165.255.255"]
        );
    }

    #[test]
    fn test_curated_list_for_bulk_ignored() {
        let lists = [HotspotList {
            category: Category::AllRussia,
            cidrs: &["31.173.0.0/16"],
        }];
        let results = build_categories::<String>(&[], &lists);
        assert!(results.bulk_is_empty());
    }

    #[test]
    fn test_iteration_in_category_order() {
        let results = build_categories::<String>(&[], &HOTSPOT_LISTS);
        let order: Vec<Category> = results.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }
}

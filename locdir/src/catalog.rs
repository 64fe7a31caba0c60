use crate::model::Location;
use std::collections::BTreeSet;

/// Locations whose name or description contains `query`, ignoring case.
/// An empty query matches everything.
pub fn search(locations: &[Location], query: &str) -> Vec<Location> {
    if query.is_empty() {
        return locations.to_vec();
    }
    let q = query.to_lowercase();
    locations
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&q) || l.description.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

/// Locations whose category equals `category`, ignoring case. Empty matches everything.
pub fn filter_by_category(locations: &[Location], category: &str) -> Vec<Location> {
    if category.is_empty() {
        return locations.to_vec();
    }
    let c = category.to_lowercase();
    locations.iter().filter(|l| l.category.to_lowercase() == c).cloned().collect()
}

/// Distinct categories, sorted.
pub fn categories(locations: &[Location]) -> Vec<String> {
    locations.iter().map(|l| l.category.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

//! Search box filtering

/// Keep the items whose lowercased text contains the trimmed, lowercased query.
///
/// An empty or whitespace-only query returns `items` as-is. Order is preserved.
pub fn filter_items(items: Vec<String>, query: &str) -> Vec<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.to_lowercase().contains(&q))
        .collect()
}

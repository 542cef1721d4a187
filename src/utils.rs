use crate::model::Category;
use crate::order::OrderStore;


// Count total items in an order
pub fn order_total_items(store: &OrderStore) -> usize {
    store.len()
}


// Width of the heading column, wide enough for the longest "Label:"
pub fn column_width() -> usize {
    Category::ALL
        .iter()
        .map(|c| c.label().len() + 1)
        .max()
        .unwrap_or(0)
        + 1
}


// Lines per category, indexed by display order
pub fn category_counts(store: &OrderStore) -> [usize; 6] {
    let mut counts = [0; 6];
    for group in store.grouped_view() {
        counts[group.category.index()] = group.entries.len();
    }
    counts
}

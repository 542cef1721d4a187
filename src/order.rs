//! The order store: the selected lines plus the views derived from them.
//!
//! Every mutation pushes an [`OrderEvent`] with a snapshot of the order to
//! each subscriber, which is how persistence and the dashboard learn about
//! changes.

use tokio::sync::mpsc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::model::{Category, Ingredient, OrderLine, Portion};


// Sent to subscribers after every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    Changed(Vec<OrderLine>),
    // The order was reset; durable copies should be dropped
    Cleared,
}


#[derive(Debug)]
pub struct OrderStore {
    catalog: Catalog,
    lines: Vec<OrderLine>,
    subscribers: Vec<mpsc::UnboundedSender<OrderEvent>>,
}

impl OrderStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            lines: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Lines in selection order
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Register a new subscriber. Dropped receivers are pruned on the next
    /// notification.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<OrderEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Append `item` with the given portion.
    pub fn add(&mut self, item: &Ingredient, portion: Portion) -> &OrderLine {
        let line = OrderLine::new(item, portion);
        debug!(name = %line.name, position = self.lines.len(), "line added");
        self.lines.push(line);
        self.notify();
        &self.lines[self.lines.len() - 1]
    }

    /// Remove the line at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<OrderLine> {
        if index >= self.lines.len() {
            debug!(index, len = self.lines.len(), "remove out of range ignored");
            return None;
        }
        let line = self.lines.remove(index);
        debug!(name = %line.name, position = index, "line removed");
        self.notify();
        Some(line)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("order cleared");
        self.publish(OrderEvent::Cleared);
    }

    // Swap in a whole order, used when rehydrating
    pub fn replace(&mut self, lines: Vec<OrderLine>) {
        self.lines = lines;
        debug!(len = self.lines.len(), "order replaced");
        self.notify();
    }

    /// Lines grouped by category in display order.
    ///
    /// The returned iterator is lazy; clone it (or call this again) to walk
    /// the groups another time.
    pub fn grouped_view(&self) -> GroupedView<'_> {
        GroupedView {
            catalog: &self.catalog,
            lines: &self.lines,
            next: 0,
        }
    }

    // Catalog items whose base name is not already in the order
    pub fn available_items(&self, category: Category) -> Vec<&'static Ingredient> {
        self.catalog
            .items(category)
            .iter()
            .filter(|item| !self.contains_base(item.name))
            .collect()
    }

    /// Items offered on the menu. Single-pick categories hide what is
    /// already ordered; the rest can be picked any number of times.
    pub fn menu_items(&self, category: Category) -> Vec<&'static Ingredient> {
        if category.is_single_pick() {
            self.available_items(category)
        } else {
            self.catalog.items(category).iter().collect()
        }
    }

    // Order positions listed in the same order the summary shows them
    pub fn display_positions(&self) -> Vec<usize> {
        self.grouped_view()
            .flat_map(|group| group.entries.into_iter().map(|e| e.position))
            .collect()
    }

    fn contains_base(&self, name: &str) -> bool {
        self.lines.iter().any(|line| line.base_name() == name)
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        self.publish(OrderEvent::Changed(self.lines.clone()));
    }

    fn publish(&mut self, event: OrderEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}


// One order line plus where it sits in the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEntry<'a> {
    pub position: usize,
    pub line: &'a OrderLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderGroup<'a> {
    pub category: Category,
    pub entries: Vec<GroupEntry<'a>>,
}

impl OrderGroup<'_> {
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.line.name.as_str()).collect()
    }
}


/// Lazy walk over the non-empty category groups of an order.
#[derive(Debug, Clone)]
pub struct GroupedView<'a> {
    catalog: &'a Catalog,
    lines: &'a [OrderLine],
    next: usize,
}

impl<'a> Iterator for GroupedView<'a> {
    type Item = OrderGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&category) = Category::ALL.get(self.next) {
            self.next += 1;
            let items = self.catalog.items(category);
            let entries: Vec<GroupEntry<'a>> = self
                .lines
                .iter()
                .enumerate()
                .filter(|(_, line)| items.iter().any(|i| i.name == line.base_name()))
                .map(|(position, line)| GroupEntry { position, line })
                .collect();
            if !entries.is_empty() {
                return Some(OrderGroup { category, entries });
            }
        }
        None
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn item(catalog: &Catalog, category: Category, name: &str) -> &'static Ingredient {
        catalog.find(category, name).unwrap()
    }

    fn groups(store: &OrderStore) -> Vec<(Category, Vec<String>)> {
        store
            .grouped_view()
            .map(|g| (g.category, g.names().into_iter().map(String::from).collect()))
            .collect()
    }

    #[test]
    fn grouping_follows_display_order_not_selection_order() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        store.add(item(&catalog, Category::Extras, "Guacamole"), Portion::Normal);
        store.add(item(&catalog, Category::Base, "Lettuce"), Portion::Normal);
        store.add(item(&catalog, Category::Toppings, "Cheese"), Portion::Normal);
        store.add(item(&catalog, Category::Toppings, "Sour Cream"), Portion::Normal);

        assert_eq!(
            groups(&store),
            vec![
                (Category::Base, vec!["Lettuce".to_string()]),
                (Category::Toppings, vec!["Cheese".to_string(), "Sour Cream".to_string()]),
                (Category::Extras, vec!["Guacamole".to_string()]),
            ]
        );
    }

    #[test]
    fn grouped_view_is_restartable() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        store.add(item(&catalog, Category::Beans, "Pinto Beans"), Portion::Normal);

        let view = store.grouped_view();
        assert_eq!(view.clone().count(), 1);
        assert_eq!(view.count(), 1);
        assert_eq!(store.grouped_view().count(), 1);
    }

    #[test]
    fn grouped_entries_carry_true_positions() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        let cheese = item(&catalog, Category::Toppings, "Cheese");
        store.add(cheese, Portion::Normal);
        store.add(item(&catalog, Category::Base, "White Rice"), Portion::Normal);
        store.add(cheese, Portion::Normal);

        let toppings = store.grouped_view().nth(1).unwrap();
        let positions: Vec<usize> = toppings.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 2]);
        assert_eq!(store.display_positions(), vec![1, 0, 2]);
    }

    #[test]
    fn removing_a_duplicate_removes_the_chosen_one() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        store.add(item(&catalog, Category::Toppings, "Cheese"), Portion::Normal);
        store.add(item(&catalog, Category::Base, "White Rice"), Portion::Normal);
        store.add(item(&catalog, Category::Toppings, "Cheese"), Portion::Normal);

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.name, "Cheese");
        let names: Vec<&str> = store.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Cheese", "White Rice"]);
    }

    #[test]
    fn remove_out_of_range_is_a_silent_no_op() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        let mut rx = store.subscribe();
        assert_eq!(store.remove(0), None);
        assert!(rx.try_recv().is_err());

        store.add(item(&catalog, Category::Base, "Brown Rice"), Portion::Normal);
        let _ = rx.try_recv();
        assert_eq!(store.remove(5), None);
        assert_eq!(store.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn available_items_hides_ordered_base_names() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        store.add(item(&catalog, Category::Salsa, "Red Chili Salsa"), Portion::Heavy);
        store.add(item(&catalog, Category::Protein, "Steak"), Portion::Normal);

        let salsa: Vec<&str> = store.available_items(Category::Salsa).iter().map(|i| i.name).collect();
        assert_eq!(salsa, vec!["Pico De Gallo", "Green Chili Salsa"]);
        let protein: Vec<&str> = store.available_items(Category::Protein).iter().map(|i| i.name).collect();
        assert_eq!(protein, vec!["Chicken", "Carnitas", "Barbacoa", "Sofritas", "Veggie"]);
    }

    #[test]
    fn menu_only_filters_single_pick_categories() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        store.add(item(&catalog, Category::Base, "White Rice"), Portion::Normal);
        store.add(item(&catalog, Category::Toppings, "Cheese"), Portion::Normal);

        assert_eq!(store.menu_items(Category::Base).len(), 2);
        assert_eq!(store.menu_items(Category::Toppings).len(), 3);
    }

    #[test]
    fn every_mutation_notifies_subscribers() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        let mut first = store.subscribe();
        let mut second = store.subscribe();

        store.add(item(&catalog, Category::Base, "White Rice"), Portion::Normal);
        store.remove(0);
        store.clear();

        for rx in [&mut first, &mut second] {
            let OrderEvent::Changed(added) = rx.try_recv().unwrap() else {
                panic!("expected a snapshot");
            };
            assert_eq!(added.len(), 1);
            assert_eq!(rx.try_recv().unwrap(), OrderEvent::Changed(Vec::new()));
            assert_eq!(rx.try_recv().unwrap(), OrderEvent::Cleared);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let catalog = Catalog::standard();
        let mut store = OrderStore::new(catalog.clone());
        let rx = store.subscribe();
        drop(rx);
        store.add(item(&catalog, Category::Base, "White Rice"), Portion::Normal);
        assert!(store.subscribers.is_empty());
    }

    #[test]
    fn lines_outside_the_catalog_are_not_grouped() {
        let mut store = OrderStore::new(Catalog::standard());
        store.replace(vec![OrderLine {
            name: "Tofu".into(),
            color: "#FFFFFF".into(),
        }]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.grouped_view().count(), 0);
    }
}

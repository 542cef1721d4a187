use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::model::{Category, Ingredient, OrderLine, Portion};


// Random pick from one category
fn random_item(rng: &mut impl Rng, catalog: &Catalog, category: Category) -> &'static Ingredient {
    let items = catalog.items(category);
    &items[rng.gen_range(0..items.len())]
}

// Random generation of portion
fn random_portion(rng: &mut impl Rng) -> Portion {
    match rng.gen_range(0..3) {
        0 => Portion::Light,
        1 => Portion::Normal,
        2 => Portion::Heavy,
        _ => unreachable!(),
    }
}

// Up to `max` distinct items of a category, in catalog order
fn random_subset(rng: &mut impl Rng, catalog: &Catalog, category: Category, max: usize) -> Vec<&'static Ingredient> {
    let items = catalog.items(category);
    let take = rng.gen_range(0..=max.min(items.len()));
    let mut picked = index::sample(rng, items.len(), take).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| &items[i]).collect()
}


/// A reproducible random bowl: one base, maybe beans, one protein, a couple
/// of salsas with random portions, some toppings and maybe an extra.
pub fn random_bowl(catalog: &Catalog, seed: u64) -> Vec<OrderLine> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut lines = Vec::new();

    lines.push(OrderLine::new(random_item(&mut rng, catalog, Category::Base), Portion::Normal));
    if rng.gen_bool(0.7) {
        lines.push(OrderLine::new(random_item(&mut rng, catalog, Category::Beans), Portion::Normal));
    }
    lines.push(OrderLine::new(random_item(&mut rng, catalog, Category::Protein), Portion::Normal));
    for salsa in random_subset(&mut rng, catalog, Category::Salsa, 2) {
        let portion = random_portion(&mut rng);
        lines.push(OrderLine::new(salsa, portion));
    }
    for topping in random_subset(&mut rng, catalog, Category::Toppings, 3) {
        lines.push(OrderLine::new(topping, Portion::Normal));
    }
    for extra in random_subset(&mut rng, catalog, Category::Extras, 1) {
        lines.push(OrderLine::new(extra, Portion::Normal));
    }
    lines
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bowl() {
        let catalog = Catalog::standard();
        assert_eq!(random_bowl(&catalog, 42), random_bowl(&catalog, 42));
    }

    #[test]
    fn bowls_are_well_formed() {
        let catalog = Catalog::standard();
        for seed in 0..200 {
            let bowl = random_bowl(&catalog, seed);
            let count = |c: Category| {
                bowl.iter()
                    .filter(|l| catalog.category_of(l.base_name()) == Some(c))
                    .count()
            };
            assert_eq!(count(Category::Base), 1);
            assert!(count(Category::Beans) <= 1);
            assert_eq!(count(Category::Protein), 1);
            assert!(count(Category::Salsa) <= 2);
            assert!(count(Category::Toppings) <= 3);
            assert!(count(Category::Extras) <= 1);
            assert!(bowl.iter().all(|l| catalog.category_of(l.base_name()).is_some()));
        }
    }
}

use farm_market::model::{
    parse_price, parse_quantity, BillLines, Product, SelectionSet, MAX_QUANTITY, MAX_UNIT_PRICE,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

const CATEGORIES: [&str; 8] = [
    "Vegetables",
    "Fruits",
    "Seeds",
    "Dairy Products",
    "Herbs",
    "Fertilizers",
    "",
    "Spices",
];

/// Any `Decimal` an `i64` mantissa can express, plus the extremes.
fn price_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (any::<i64>(), 0u32..=28).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale)),
        Just(Decimal::MAX),
        Just(Decimal::MIN),
    ]
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (0u8..6, price_strategy(), 0usize..CATEGORIES.len()).prop_map(|(id, price, category)| {
        Product::new(
            format!("p{}", id),
            format!("Product {}", id),
            price,
            CATEGORIES[category],
        )
    })
}

#[derive(Debug, Clone)]
enum Edit {
    Add(Product),
    Quantity(u8, i64),
    Price(u8, Decimal),
    QuantityText(u8, String),
    PriceText(u8, String),
    Remove(u8),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        product_strategy().prop_map(Edit::Add),
        (0u8..6, any::<i64>()).prop_map(|(id, q)| Edit::Quantity(id, q)),
        (0u8..6, price_strategy()).prop_map(|(id, p)| Edit::Price(id, p)),
        (0u8..6, "[ +-]?[0-9]{0,32}(\\.[0-9]{0,32})?[a-z]{0,3}")
            .prop_map(|(id, text)| Edit::QuantityText(id, text)),
        (0u8..6, "[ +-]?[0-9]{0,32}(\\.[0-9]{0,32})?[a-z]{0,3}")
            .prop_map(|(id, text)| Edit::PriceText(id, text)),
        (0u8..6).prop_map(Edit::Remove),
    ]
}

proptest! {
    #[test]
    fn toggling_twice_restores_the_selection(
        initial in proptest::collection::vec(product_strategy(), 0..6),
        toggled in product_strategy(),
    ) {
        let mut set = SelectionSet::new();
        for product in initial {
            if !set.contains(&product.id) {
                set.toggle(product);
            }
        }
        let before = set.clone();

        set.toggle(toggled.clone());
        set.toggle(toggled);
        let mut before_ids: Vec<&str> = before.members().iter().map(|p| p.id.as_str()).collect();
        let mut after_ids: Vec<&str> = set.members().iter().map(|p| p.id.as_str()).collect();
        before_ids.sort_unstable();
        after_ids.sort_unstable();
        prop_assert_eq!(before_ids, after_ids);
    }

    #[test]
    fn bill_invariants_hold_under_any_edits(edits in proptest::collection::vec(edit_strategy(), 0..40)) {
        let mut lines = BillLines::new();
        for edit in edits {
            match edit {
                Edit::Add(product) => lines.add_product(product),
                Edit::Quantity(id, q) => {
                    lines.update_quantity(&format!("p{}", id), q);
                }
                Edit::Price(id, price) => {
                    lines.update_price(&format!("p{}", id), price);
                }
                Edit::QuantityText(id, text) => {
                    lines.update_quantity(&format!("p{}", id), parse_quantity(&text));
                }
                Edit::PriceText(id, text) => {
                    lines.update_price(&format!("p{}", id), parse_price(&text));
                }
                Edit::Remove(id) => {
                    lines.remove(&format!("p{}", id));
                }
            }
        }

        let mut ids: Vec<&str> = lines.items().iter().map(|item| item.product_id()).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), count, "one line per product");

        for item in lines.items() {
            prop_assert!(item.quantity >= 1);
            prop_assert!(item.quantity <= MAX_QUANTITY);
            prop_assert!(item.unit_price >= Decimal::ZERO);
            prop_assert!(item.unit_price <= MAX_UNIT_PRICE);
            prop_assert!(item.checked_total().is_some());
        }

        let buckets = lines.categorize();
        prop_assert!(buckets.iter().all(|bucket| !bucket.items.is_empty()));
        let subtotals: Decimal = buckets.iter().map(|bucket| bucket.subtotal).sum();
        prop_assert_eq!(subtotals, lines.grand_total());
        let bucketed: usize = buckets.iter().map(|bucket| bucket.items.len()).sum();
        prop_assert_eq!(bucketed, lines.len());
    }
}

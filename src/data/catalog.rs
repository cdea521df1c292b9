//! Built-in product catalogue and starter sessions.
//!
//! Used when no history file exists yet, so a fresh install already shows a
//! fitted Sourdough model.

use chrono::NaiveDate;

use crate::domain::{Bake, Product, ProductId};

const PRODUCTS: [(&str, &str); 6] = [
    ("Sourdough", "amber"),
    ("Baguette", "yellow"),
    ("Croissant", "orange"),
    ("Pizza Dough", "red"),
    ("Challah", "gold"),
    ("Focaccia", "green"),
];

/// Default products with ids `1..=6`.
pub fn default_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .zip(1u32..)
        .map(|(&(name, color), id)| Product {
            id: ProductId(id),
            name: name.to_string(),
            color: Some(color.to_string()),
        })
        .collect()
}

/// Three Sourdough sessions logged in mid-January 2026.
pub fn seed_bakes() -> Vec<Bake> {
    let rows: [(u32, [f64; 7]); 3] = [
        (15, [22.0, 20.0, 30.0, 24.0, 25.0, 5.0, 70.0]),
        (16, [23.0, 21.0, 28.0, 25.0, 24.5, 6.0, 75.0]),
        (17, [21.0, 19.0, 32.0, 23.0, 25.0, 5.0, 70.0]),
    ];

    rows.iter()
        .zip(1u64..)
        .filter_map(|(&(day, r), id)| {
            let date = NaiveDate::from_ymd_opt(2026, 1, day)?;
            Some(Bake {
                room_temp: Some(r[0]),
                flour_temp: Some(r[1]),
                water_temp: Some(r[2]),
                levain_temp: Some(r[3]),
                final_temp: Some(r[4]),
                mix_time: Some(r[5]),
                hydration: Some(r[6]),
                ..Bake::empty(id, ProductId(1), date)
            })
        })
        .collect()
}

/// Find a product by id (`"3"`) or case-insensitive name (`"pizza dough"`).
pub fn find_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    let key = key.trim();
    if let Ok(id) = key.parse::<u32>() {
        return products.iter().find(|p| p.id == ProductId(id));
    }
    products.iter().find(|p| p.name.eq_ignore_ascii_case(key))
}

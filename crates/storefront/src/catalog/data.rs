//! Built-in mock dataset.

use giftshop_core::{Category, CategoryId, Product, ProductId};
use rust_decimal::Decimal;

const GRADUATION_IMAGE: &str = "/assets/graduation-teddy.jpg";
const ROMANTIC_IMAGE: &str = "/assets/romantic-gift.jpg";

pub(super) fn categories() -> Vec<Category> {
    vec![
        Category {
            id: CategoryId::new("cat-graduation"),
            name: "Graduation".to_string(),
            description: "Celebrate academic achievements with our adorable graduation \
                          teddy bears and gifts"
                .to_string(),
            image_url: Some(GRADUATION_IMAGE.to_string()),
        },
        Category {
            id: CategoryId::new("cat-romantic"),
            name: "Romantic".to_string(),
            description: "Express your love with our romantic Valentine's Day gifts and \
                          beautiful arrangements"
                .to_string(),
            image_url: Some(ROMANTIC_IMAGE.to_string()),
        },
    ]
}

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: &'static str,
    stock: u32,
    featured: bool,
}

const PRODUCTS: &[Seed] = &[
    Seed {
        id: "prod-grad-teddy-1",
        name: "Classic Graduation Teddy Bear",
        description: "Adorable brown teddy bear wearing a traditional black graduation cap \
                      and gown. Perfect for celebrating graduation achievements.",
        cents: 2499,
        category: "cat-graduation",
        stock: 50,
        featured: true,
    },
    Seed {
        id: "prod-grad-teddy-2",
        name: "Personalized Graduation Bear",
        description: "Customizable graduation teddy bear with embroidered name and \
                      graduation year. Comes with mini diploma.",
        cents: 3499,
        category: "cat-graduation",
        stock: 30,
        featured: true,
    },
    Seed {
        id: "prod-grad-teddy-3",
        name: "Graduation Bear Gift Set",
        description: "Complete graduation gift set including teddy bear, congratulations \
                      card, and gift box.",
        cents: 4599,
        category: "cat-graduation",
        stock: 25,
        featured: false,
    },
    Seed {
        id: "prod-grad-teddy-4",
        name: "Mini Graduation Bears (Set of 3)",
        description: "Set of three small graduation teddy bears in different colors. \
                      Perfect for group gifts.",
        cents: 3999,
        category: "cat-graduation",
        stock: 40,
        featured: false,
    },
    Seed {
        id: "prod-rom-gift-1",
        name: "Valentine's Day Luxury Gift Box",
        description: "Elegant gift box filled with premium chocolates, red roses, and a \
                      heartfelt card.",
        cents: 8999,
        category: "cat-romantic",
        stock: 20,
        featured: true,
    },
    Seed {
        id: "prod-rom-gift-2",
        name: "Romantic Rose Bouquet",
        description: "Beautiful arrangement of 12 red roses with baby's breath and elegant \
                      wrapping.",
        cents: 4999,
        category: "cat-romantic",
        stock: 15,
        featured: true,
    },
    Seed {
        id: "prod-rom-gift-3",
        name: "Heart-Shaped Chocolate Collection",
        description: "Premium assorted chocolates in heart shapes, beautifully packaged in \
                      a romantic box.",
        cents: 2999,
        category: "cat-romantic",
        stock: 60,
        featured: false,
    },
    Seed {
        id: "prod-rom-gift-4",
        name: "Romantic Teddy & Roses Combo",
        description: "Adorable teddy bear holding roses with a love message. Perfect for \
                      Valentine's Day.",
        cents: 3999,
        category: "cat-romantic",
        stock: 35,
        featured: false,
    },
    Seed {
        id: "prod-rom-gift-5",
        name: "Anniversary Special Package",
        description: "Complete anniversary package with champagne, chocolates, flowers, \
                      and keepsake box.",
        cents: 12999,
        category: "cat-romantic",
        stock: 10,
        featured: true,
    },
];

pub(super) fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: Decimal::new(seed.cents, 2),
            image_url: if seed.category == "cat-graduation" {
                GRADUATION_IMAGE.to_string()
            } else {
                ROMANTIC_IMAGE.to_string()
            },
            category_id: CategoryId::new(seed.category),
            stock_quantity: seed.stock,
            is_featured: seed.featured,
        })
        .collect()
}

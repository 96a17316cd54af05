//! Cross-crate integration tests for NutriPlanner.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nutriplanner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Shopper walkthroughs over an in-memory store
//! - `order_lifecycle` - Shopper and dashboard sharing one snapshot namespace
//! - `dashboard_reporting` - Metrics, pagination, and dish management
//! - `persistence` - File-backed snapshots surviving reopen and corruption
//!
//! The crate itself only carries shared fixtures; every scenario lives under
//! `tests/`.

#![allow(clippy::unwrap_used)] // test support

pub mod fixtures {
    //! Builders for the handful of values every scenario needs.

    use chrono::{DateTime, TimeZone, Utc};
    use nutriplanner_core::{Dish, DishDraft, DishId, Nutrition, Price};

    /// A minimal normalized dish.
    #[must_use]
    pub fn dish(id: i32, title: &str, cents: i64) -> Dish {
        Dish {
            id: DishId::new(id),
            title: title.to_owned(),
            image: "https://cdn.nutriplanner.test/dish.jpg".to_owned(),
            diet: Vec::new(),
            nutrition: Nutrition::default(),
            price: Price::from_cents(cents),
            prep_minutes: 15,
            category: None,
            ingredients: Vec::new(),
            description: String::new(),
        }
    }

    /// An admin dish form submission without an id.
    #[must_use]
    pub fn draft(title: &str, cents: i64) -> DishDraft {
        DishDraft {
            id: None,
            title: title.to_owned(),
            image: None,
            diet: Vec::new(),
            price: Price::from_cents(cents),
            nutrition: Nutrition::default(),
            prep_minutes: Some(25),
            category: None,
            ingredients: Vec::new(),
            description: String::new(),
        }
    }

    /// Noon UTC on the given date.
    #[must_use]
    pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }
}

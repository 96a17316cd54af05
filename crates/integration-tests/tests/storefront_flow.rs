//! Shopper walkthroughs: catalog ingestion, browsing, favourites, cart,
//! and checkout against an in-memory store.

use std::sync::Arc;

use nutriplanner_core::store::{MemoryStore, StateStore};
use nutriplanner_core::{Category, DietTag, OrderStatus, Quantity, SequentialOrderRefs};
use nutriplanner_integration_tests::fixtures::dish;
use nutriplanner_storefront::cart::CartAdd;
use nutriplanner_storefront::catalog::{CatalogStore, DishFilter};
use nutriplanner_storefront::session::StorefrontSession;

fn session(store: &Arc<MemoryStore>) -> StorefrontSession {
    StorefrontSession::with_refs(
        Arc::clone(store) as Arc<dyn StateStore>,
        Box::new(SequentialOrderRefs::default()),
    )
}

// ============================================================================
// Catalog Ingestion & Browsing
// ============================================================================

#[test]
fn test_catalog_ingests_loose_records_and_skips_bad_ones() {
    let raw = r#"[
        {
            "id": 1,
            "title": "Overnight Oats",
            "price": "12.50",
            "time": "30 mins",
            "calories": 350,
            "carb": "42.0",
            "category": "breakfast",
            "diet": ["Vegetarian", "Gluten-Free"],
            "ingredients": ["Rolled Oats", {"name": "Chia Seeds"}]
        },
        {
            "id": 2,
            "title": "Berry Smoothie",
            "price": 8,
            "category": "smoothies"
        },
        {
            "id": 3,
            "title": "   "
        }
    ]"#;

    let catalog = CatalogStore::from_json(raw).expect("valid catalog JSON");
    assert_eq!(catalog.len(), 2);

    let oats = catalog.by_title("overnight oats").expect("ingested dish");
    assert_eq!(oats.price.to_string(), "$12.50");
    assert_eq!(oats.prep_minutes, 30);
    assert_eq!(oats.category, Some(Category::Breakfast));
    assert_eq!(oats.ingredients, vec!["Rolled Oats", "Chia Seeds"]);
}

#[test]
fn test_filter_narrows_by_diet_and_calories() {
    let mut light = dish(1, "Garden Salad", 700);
    light.nutrition.calories = 280;
    light.diet = vec![DietTag::new("Vegan")];
    let mut heavy = dish(2, "Loaded Burger", 1400);
    heavy.nutrition.calories = 950;
    heavy.diet = vec![DietTag::new("Vegan")];

    let catalog = CatalogStore::from_dishes(vec![light, heavy]);
    let filter = DishFilter {
        diet: Some("vegan".to_owned()),
        max_calories: Some(500),
        ..DishFilter::default()
    };

    let matches = catalog.filter(&filter);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "Garden Salad");
}

#[test]
fn test_similar_dishes_share_a_category() {
    let mut dishes: Vec<_> = (1..=6).map(|i| dish(i, &format!("Dish {i}"), 900)).collect();
    for entry in &mut dishes {
        entry.category = Some(Category::Lunch);
    }
    dishes[5].category = Some(Category::Dinner);

    let catalog = CatalogStore::from_dishes(dishes);
    let target = catalog.by_title("Dish 1").expect("dish in catalog");
    let similar = catalog.similar_to(target, 4);

    assert_eq!(similar.len(), 4);
    assert!(similar.iter().all(|d| d.category == Some(Category::Lunch)));
    assert!(similar.iter().all(|d| d.title != "Dish 1"));
}

// ============================================================================
// Favourites & Cart
// ============================================================================

#[test]
fn test_favourites_and_cart_survive_a_new_session() {
    let store = Arc::new(MemoryStore::new());

    let mut shopper = session(&store);
    assert!(shopper.add_favourite(&dish(1, "Overnight Oats", 1250)));
    assert_eq!(
        shopper.add_to_cart(&dish(2, "Berry Smoothie", 800), Quantity::ONE),
        CartAdd::Inserted
    );
    assert_eq!(
        shopper.add_to_cart(&dish(2, "Berry Smoothie", 800), Quantity::new(2)),
        CartAdd::Merged(Quantity::new(3))
    );
    drop(shopper);

    let reopened = session(&store);
    assert!(reopened.is_favourite("Overnight Oats"));
    let line = reopened.cart().get("Berry Smoothie").expect("cart line");
    assert_eq!(line.quantity, Quantity::new(3));
}

// ============================================================================
// Checkout
// ============================================================================

#[test]
fn test_partial_checkout_leaves_the_rest_of_the_cart() {
    let store = Arc::new(MemoryStore::new());
    let mut shopper = session(&store);
    shopper.add_to_cart(&dish(1, "Overnight Oats", 1250), Quantity::ONE);
    shopper.add_to_cart(&dish(2, "Berry Smoothie", 800), Quantity::ONE);
    shopper.add_to_cart(&dish(3, "Chicken Wrap", 1100), Quantity::ONE);

    let order_ref = shopper
        .place_order(&["Overnight Oats", "Chicken Wrap"])
        .expect("two lines matched");

    assert_eq!(shopper.cart().len(), 1);
    assert!(shopper.cart().get("Berry Smoothie").is_some());
    assert_eq!(shopper.orders().lines_of(order_ref).count(), 2);
    for line in shopper.orders().lines() {
        assert_eq!(line.status, OrderStatus::PendingConfirmation);
        assert_eq!(line.order_ref, order_ref);
    }
}

#[test]
fn test_buy_now_places_a_single_line_group() {
    let store = Arc::new(MemoryStore::new());
    let mut shopper = session(&store);
    shopper.add_to_cart(&dish(1, "Overnight Oats", 1250), Quantity::ONE);

    let order_ref = shopper.buy_now(&dish(2, "Berry Smoothie", 800), Quantity::new(2));

    // The cart is untouched; the order holds one pending line.
    assert_eq!(shopper.cart().len(), 1);
    assert_eq!(shopper.orders().lines_of(order_ref).count(), 1);
    let groups = shopper.orders().groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].total().to_string(), "$16.00");
}

#[test]
fn test_cancelling_a_pending_order_records_no_return() {
    let store = Arc::new(MemoryStore::new());
    let mut shopper = session(&store);
    let order_ref = shopper.buy_now(&dish(1, "Overnight Oats", 1250), Quantity::ONE);

    let cancellation = shopper.cancel_order(order_ref);
    assert_eq!(cancellation.removed, 1);
    assert_eq!(cancellation.returns, 0);
    assert_eq!(shopper.total_returns(), 0);
    assert!(shopper.orders().is_empty());
}

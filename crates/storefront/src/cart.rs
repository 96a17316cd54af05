//! The shopping cart.

use chrono::{DateTime, Utc};
use nutriplanner_core::{DietTag, Dish, OrderLine, OrderRef, OrderStatus, Price, Quantity};
use serde::{Deserialize, Serialize};

/// One pending-purchase line.
///
/// The title is the line's key. Image, diet tags, and unit price are
/// snapshots taken when the line was created, so a later catalog edit never
/// reprices a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub diet: Vec<DietTag>,
    /// Unit price at the time the dish was added.
    pub price: Price,
    pub quantity: Quantity,
}

impl CartLine {
    /// Snapshot `dish` into a new line.
    #[must_use]
    pub fn snapshot(dish: &Dish, quantity: Quantity) -> Self {
        Self {
            title: dish.title.clone(),
            image: dish.image.clone(),
            diet: dish.diet.clone(),
            price: dish.price,
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.line_total(self.quantity)
    }

    /// Turn the line into a pending order line, carrying the snapshot over.
    #[must_use]
    pub fn into_order_line(self, order_ref: OrderRef, placed_at: DateTime<Utc>) -> OrderLine {
        OrderLine {
            order_ref,
            dish: self.title,
            image: self.image,
            diet: self.diet,
            price: self.price,
            quantity: self.quantity,
            status: OrderStatus::PendingConfirmation,
            placed_at,
        }
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAdd {
    /// A new line was inserted.
    Inserted,
    /// An existing line absorbed the quantity; this is its new total.
    Merged(Quantity),
}

/// The shopping cart: at most one line per dish title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add `quantity` of `dish`.
    ///
    /// A second add of the same title merges into the existing line instead
    /// of creating a duplicate; the existing snapshot wins, only the
    /// quantity grows.
    pub fn add(&mut self, dish: &Dish, quantity: Quantity) -> CartAdd {
        if let Some(line) = self.lines.iter_mut().find(|l| l.title == dish.title) {
            line.quantity = line.quantity.merge(quantity);
            CartAdd::Merged(line.quantity)
        } else {
            self.lines.push(CartLine::snapshot(dish, quantity));
            CartAdd::Inserted
        }
    }

    /// Remove the whole line for `title`, whatever its quantity.
    pub fn remove(&mut self, title: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.title != title);
        self.lines.len() != before
    }

    /// Move every line whose title appears in `titles` out of the cart.
    ///
    /// The split is exact: each line is either returned or still in the
    /// cart afterwards, never both.
    pub fn take_lines(&mut self, titles: &[&str]) -> Vec<CartLine> {
        let (taken, kept): (Vec<CartLine>, Vec<CartLine>) = std::mem::take(&mut self.lines)
            .into_iter()
            .partition(|line| titles.contains(&line.title.as_str()));
        self.lines = kept;
        taken
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.title == title)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nutriplanner_core::{DishId, Nutrition, OrderRefGenerator, SequentialOrderRefs};

    use super::*;

    fn dish(title: &str, cents: i64) -> Dish {
        Dish {
            id: DishId::new(1),
            title: title.to_owned(),
            image: "https://cdn.nutriplanner.test/dish.jpg".to_owned(),
            diet: vec![DietTag::new("Vegan")],
            nutrition: Nutrition::default(),
            price: Price::from_cents(cents),
            prep_minutes: 15,
            category: None,
            ingredients: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_add_same_title_merges_quantities() {
        let mut cart = Cart::default();
        let oats = dish("Overnight Oats", 1250);

        assert_eq!(cart.add(&oats, Quantity::new(2)), CartAdd::Inserted);
        assert_eq!(
            cart.add(&oats, Quantity::new(3)),
            CartAdd::Merged(Quantity::new(5))
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("Overnight Oats").unwrap().quantity, Quantity::new(5));
    }

    #[test]
    fn test_merge_keeps_original_snapshot() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::ONE);

        // Same title at a new price: quantity merges, snapshot stays.
        let repriced = dish("Overnight Oats", 1399);
        cart.add(&repriced, Quantity::ONE);

        let line = cart.get("Overnight Oats").unwrap();
        assert_eq!(line.price, Price::from_cents(1250));
        assert_eq!(line.quantity, Quantity::new(2));
    }

    #[test]
    fn test_remove_removes_whole_line() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::new(4));
        assert!(cart.remove("Overnight Oats"));
        assert!(cart.is_empty());
        assert!(!cart.remove("Overnight Oats"));
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::new(2));
        cart.add(&dish("Berry Smoothie", 800), Quantity::ONE);
        assert_eq!(cart.subtotal(), Price::from_cents(3300));
    }

    #[test]
    fn test_take_lines_partitions_exactly() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::ONE);
        cart.add(&dish("Berry Smoothie", 800), Quantity::ONE);
        cart.add(&dish("Chicken Wrap", 1100), Quantity::ONE);

        let taken = cart.take_lines(&["Overnight Oats", "Chicken Wrap"]);
        let taken_titles: Vec<_> = taken.iter().map(|line| line.title.as_str()).collect();
        assert_eq!(taken_titles, vec!["Overnight Oats", "Chicken Wrap"]);
        assert_eq!(cart.len(), 1);
        assert!(cart.get("Berry Smoothie").is_some());
    }

    #[test]
    fn test_into_order_line_carries_snapshot() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::new(2));

        let placed_at: DateTime<Utc> = "2026-03-14T10:30:00Z".parse().unwrap();
        let order_ref = SequentialOrderRefs::default().next_ref();
        let line = cart.take_lines(&["Overnight Oats"]).remove(0);
        let order_line = line.into_order_line(order_ref, placed_at);

        assert_eq!(order_line.order_ref, order_ref);
        assert_eq!(order_line.dish, "Overnight Oats");
        assert_eq!(order_line.price, Price::from_cents(1250));
        assert_eq!(order_line.quantity, Quantity::new(2));
        assert_eq!(order_line.status, OrderStatus::PendingConfirmation);
        assert_eq!(order_line.placed_at, placed_at);
    }

    #[test]
    fn test_wire_shape_matches_snapshots() {
        let mut cart = Cart::default();
        cart.add(&dish("Overnight Oats", 1250), Quantity::new(2));

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value[0]["title"], "Overnight Oats");
        assert_eq!(value[0]["price"], "12.50");
        assert_eq!(value[0]["quantity"], 2);

        let restored: Cart = serde_json::from_str(&value.to_string()).unwrap();
        assert_eq!(restored, cart);
    }
}

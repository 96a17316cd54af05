//! The shopper session.
//!
//! Restores the favourites, cart, and order collections from the snapshot
//! store and persists whichever collection a mutation touched, right after
//! the mutation. The collections themselves never see storage; this facade
//! is the only writer.
//!
//! Two sessions over the same namespace race last-writer-wins on whole
//! snapshots; nothing watches for concurrent writes. [`reload`] re-reads
//! the store for callers that want to pick up another session's changes.
//!
//! [`reload`]: StorefrontSession::reload

use std::sync::Arc;

use chrono::Utc;
use nutriplanner_core::store::{self, StateStore, keys};
use nutriplanner_core::{
    Cancellation, Dish, OrderPipeline, OrderRef, OrderRefGenerator, Quantity, UuidOrderRefs,
};

use crate::cart::{Cart, CartAdd};
use crate::favourites::Favourites;

/// One shopper's live state.
pub struct StorefrontSession {
    store: Arc<dyn StateStore>,
    refs: Box<dyn OrderRefGenerator>,
    favourites: Favourites,
    cart: Cart,
    orders: OrderPipeline,
    total_returns: u64,
}

impl StorefrontSession {
    /// Open a session against `store`, restoring persisted state.
    ///
    /// Snapshots that are missing or fail to parse restore as empty; a
    /// session always opens.
    #[must_use]
    pub fn open(store: Arc<dyn StateStore>) -> Self {
        Self::with_refs(store, Box::new(UuidOrderRefs))
    }

    /// Open with a caller-supplied order ref generator.
    #[must_use]
    pub fn with_refs(store: Arc<dyn StateStore>, refs: Box<dyn OrderRefGenerator>) -> Self {
        let favourites: Favourites = store::load_or_default(store.as_ref(), keys::FAVOURITES);
        let cart: Cart = store::load_or_default(store.as_ref(), keys::CART);
        let orders: OrderPipeline = store::load_or_default(store.as_ref(), keys::ORDERS);
        let total_returns: u64 = store::load_or_default(store.as_ref(), keys::TOTAL_RETURNS);
        tracing::debug!(
            favourites = favourites.len(),
            cart_lines = cart.len(),
            order_lines = orders.len(),
            "session restored"
        );
        Self {
            store,
            refs,
            favourites,
            cart,
            orders,
            total_returns,
        }
    }

    // ===== Favourites =====

    /// Favourite `dish`. Already-favourited dishes are a no-op.
    pub fn add_favourite(&mut self, dish: &Dish) -> bool {
        let added = self.favourites.add(&dish.title);
        if added {
            self.persist_favourites();
        }
        added
    }

    /// Unfavourite by title.
    pub fn remove_favourite(&mut self, title: &str) -> bool {
        let removed = self.favourites.remove(title);
        if removed {
            self.persist_favourites();
        }
        removed
    }

    /// Flip `dish`'s favourite state; returns the new state.
    pub fn toggle_favourite(&mut self, dish: &Dish) -> bool {
        let favourited = self.favourites.toggle(&dish.title);
        self.persist_favourites();
        favourited
    }

    #[must_use]
    pub fn is_favourite(&self, title: &str) -> bool {
        self.favourites.contains(title)
    }

    #[must_use]
    pub const fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    // ===== Cart =====

    /// Add `quantity` of `dish` to the cart, merging with an existing line
    /// of the same title.
    pub fn add_to_cart(&mut self, dish: &Dish, quantity: Quantity) -> CartAdd {
        let outcome = self.cart.add(dish, quantity);
        self.persist_cart();
        outcome
    }

    /// Drop a whole cart line.
    pub fn remove_from_cart(&mut self, title: &str) -> bool {
        let removed = self.cart.remove(title);
        if removed {
            self.persist_cart();
        }
        removed
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    // ===== Orders =====

    /// Buy now: place a single-line order for `dish` without touching the
    /// cart.
    pub fn buy_now(&mut self, dish: &Dish, quantity: Quantity) -> OrderRef {
        let order_ref = self.refs.next_ref();
        self.orders.place(order_ref, dish, quantity, Utc::now());
        self.persist_orders();
        tracing::info!(%order_ref, dish = %dish.title, "order placed");
        order_ref
    }

    /// Place the cart lines named in `titles` as one grouped order.
    ///
    /// Matched lines leave the cart; the rest stay. Returns `None` when no
    /// line matched, in which case nothing changes and nothing persists.
    pub fn place_order(&mut self, titles: &[&str]) -> Option<OrderRef> {
        let lines = self.cart.take_lines(titles);
        if lines.is_empty() {
            return None;
        }
        let order_ref = self.refs.next_ref();
        let placed_at = Utc::now();
        let count = lines.len();
        self.orders.place_group(
            order_ref,
            lines
                .into_iter()
                .map(|line| line.into_order_line(order_ref, placed_at)),
            placed_at,
        );
        self.persist_orders();
        self.persist_cart();
        tracing::info!(%order_ref, lines = count, "cart checked out");
        Some(order_ref)
    }

    /// Place the entire cart as one grouped order.
    pub fn place_cart(&mut self) -> Option<OrderRef> {
        let titles: Vec<String> = self
            .cart
            .lines()
            .iter()
            .map(|line| line.title.clone())
            .collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        self.place_order(&titles)
    }

    /// Cancel one line of a group. Cancelling a line that was already being
    /// prepared adds to the persisted returns total.
    pub fn cancel_order_line(&mut self, order_ref: OrderRef, dish: &str) -> Cancellation {
        let cancellation = self.orders.cancel_line(order_ref, dish);
        self.apply_cancellation(cancellation);
        cancellation
    }

    /// Cancel a whole group; every line still in Preparing Food counts as a
    /// return.
    pub fn cancel_order(&mut self, order_ref: OrderRef) -> Cancellation {
        let cancellation = self.orders.cancel_group(order_ref);
        self.apply_cancellation(cancellation);
        cancellation
    }

    fn apply_cancellation(&mut self, cancellation: Cancellation) {
        if cancellation.removed == 0 {
            return;
        }
        self.persist_orders();
        if cancellation.returns > 0 {
            self.total_returns += cancellation.returns;
            store::persist(self.store.as_ref(), keys::TOTAL_RETURNS, &self.total_returns);
            tracing::info!(returns = cancellation.returns, "returns recorded");
        }
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderPipeline {
        &self.orders
    }

    /// Lifetime count of cancelled-while-preparing lines.
    #[must_use]
    pub const fn total_returns(&self) -> u64 {
        self.total_returns
    }

    /// Re-read every snapshot from the store, discarding in-memory state.
    ///
    /// Picks up writes from other sessions sharing the namespace; any
    /// unpersisted local state is lost, which cannot happen through this
    /// type's own methods.
    pub fn reload(&mut self) {
        self.favourites = store::load_or_default(self.store.as_ref(), keys::FAVOURITES);
        self.cart = store::load_or_default(self.store.as_ref(), keys::CART);
        self.orders = store::load_or_default(self.store.as_ref(), keys::ORDERS);
        self.total_returns = store::load_or_default(self.store.as_ref(), keys::TOTAL_RETURNS);
    }

    fn persist_favourites(&self) {
        store::persist(self.store.as_ref(), keys::FAVOURITES, &self.favourites);
    }

    fn persist_cart(&self) {
        store::persist(self.store.as_ref(), keys::CART, &self.cart);
    }

    fn persist_orders(&self) {
        store::persist(self.store.as_ref(), keys::ORDERS, &self.orders);
    }
}

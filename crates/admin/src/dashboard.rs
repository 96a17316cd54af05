//! The admin dashboard facade.
//!
//! Restores the shared order snapshot and the managed dish collection from
//! the store, applies order-management and dish mutations, and persists
//! whichever snapshot a mutation touched. The pagination cursor and the
//! view-mode toggle are the only state of the dashboard's own; neither is
//! persisted.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use nutriplanner_core::store::{self, StateStore, keys};
use nutriplanner_core::{
    Cancellation, Dish, DishDraft, DishId, OrderLine, OrderPipeline, OrderRef, OrderStatus, Price,
};

use crate::dishes::{DishBook, DishBookError};
use crate::reporting::{self, DishPopularity, RevenueSummary, TOP_DISHES};

/// Rows per page of the orders listing.
pub const ORDERS_PER_PAGE: usize = 10;

/// Which panel the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    /// The orders listing with confirm/ship/deliver controls.
    #[default]
    OrderManagement,
    /// Revenue tiles, the monthly chart, and the popularity ranking.
    RevenueAnalysis,
}

impl DashboardView {
    /// The other panel.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::OrderManagement => Self::RevenueAnalysis,
            Self::RevenueAnalysis => Self::OrderManagement,
        }
    }
}

/// One page of the orders listing, newest placement first.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersPage {
    pub rows: Vec<OrderLine>,
    /// 1-based, clamped into range.
    pub page: usize,
    /// At least 1, even for an empty listing.
    pub total_pages: usize,
}

/// Everything the revenue-analysis panel renders, derived in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub revenue: RevenueSummary,
    pub monthly_revenue: [Price; 12],
    pub confirmed_orders: usize,
    pub status_counts: [(OrderStatus, usize); 4],
    pub most_ordered: Vec<DishPopularity>,
    pub total_returns: u64,
}

/// The back-office session.
pub struct AdminDashboard {
    store: Arc<dyn StateStore>,
    orders: OrderPipeline,
    dish_book: DishBook,
    total_returns: u64,
    view: DashboardView,
    page: usize,
}

impl AdminDashboard {
    /// Open the dashboard against `store`, restoring persisted state.
    ///
    /// Snapshots that are missing or fail to parse restore as empty; the
    /// dashboard always opens, on the order-management panel at page one.
    #[must_use]
    pub fn open(store: Arc<dyn StateStore>) -> Self {
        let orders: OrderPipeline = store::load_or_default(store.as_ref(), keys::ORDERS);
        let dish_book: DishBook = store::load_or_default(store.as_ref(), keys::DISHES);
        let total_returns: u64 = store::load_or_default(store.as_ref(), keys::TOTAL_RETURNS);
        tracing::debug!(
            order_lines = orders.len(),
            dishes = dish_book.len(),
            "dashboard restored"
        );
        Self {
            store,
            orders,
            dish_book,
            total_returns,
            view: DashboardView::default(),
            page: 1,
        }
    }

    // ===== View =====

    #[must_use]
    pub const fn view(&self) -> DashboardView {
        self.view
    }

    /// Switch between order management and revenue analysis.
    pub fn toggle_view(&mut self) -> DashboardView {
        self.view = self.view.toggled();
        self.view
    }

    // ===== Order management =====

    /// Accept a pending order: every Pending Confirmation line of
    /// `order_ref` moves to Preparing Food. Returns how many lines moved.
    pub fn confirm_order(&mut self, order_ref: OrderRef) -> usize {
        let moved = self.orders.confirm(order_ref);
        self.after_transition(order_ref, moved, "order confirmed");
        moved
    }

    /// Hand a prepared order to delivery.
    pub fn ship_order(&mut self, order_ref: OrderRef) -> usize {
        let moved = self.orders.ship(order_ref);
        self.after_transition(order_ref, moved, "order out for delivery");
        moved
    }

    /// Mark an out-for-delivery order as delivered.
    pub fn deliver_order(&mut self, order_ref: OrderRef) -> usize {
        let moved = self.orders.deliver(order_ref);
        self.after_transition(order_ref, moved, "order delivered");
        moved
    }

    fn after_transition(&self, order_ref: OrderRef, moved: usize, message: &'static str) {
        if moved == 0 {
            return;
        }
        self.persist_orders();
        tracing::info!(%order_ref, lines = moved, "{message}");
    }

    /// Remove a whole order from the pipeline. Lines already in Preparing
    /// Food add to the persisted returns total.
    pub fn cancel_order(&mut self, order_ref: OrderRef) -> Cancellation {
        let cancellation = self.orders.cancel_group(order_ref);
        if cancellation.removed == 0 {
            return cancellation;
        }
        self.persist_orders();
        if cancellation.returns > 0 {
            self.total_returns += cancellation.returns;
            store::persist(self.store.as_ref(), keys::TOTAL_RETURNS, &self.total_returns);
            tracing::info!(returns = cancellation.returns, "returns recorded");
        }
        cancellation
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderPipeline {
        &self.orders
    }

    // ===== Orders listing =====

    /// Move the pagination cursor, clamped into `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Pages in the orders listing; an empty listing still has one page.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.orders.len().div_ceil(ORDERS_PER_PAGE).max(1)
    }

    /// The current page of order lines, newest placement first.
    ///
    /// The cursor is re-clamped here: cancellations can shrink the listing
    /// underneath a cursor that was in range when it was set.
    #[must_use]
    pub fn orders_page(&self) -> OrdersPage {
        let total_pages = self.total_pages();
        let page = self.page.clamp(1, total_pages);

        let mut rows: Vec<OrderLine> = self.orders.lines().to_vec();
        rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        let rows = rows
            .into_iter()
            .skip((page - 1) * ORDERS_PER_PAGE)
            .take(ORDERS_PER_PAGE)
            .collect();

        OrdersPage {
            rows,
            page,
            total_pages,
        }
    }

    // ===== Dish management =====

    /// Fill an empty dish book from `dishes` and persist it. A book that
    /// already has dishes is left alone.
    pub fn seed_dishes(&mut self, dishes: Vec<Dish>) -> bool {
        let seeded = self.dish_book.seed(dishes);
        if seeded {
            self.persist_dishes();
            tracing::info!(count = self.dish_book.len(), "dish collection seeded");
        }
        seeded
    }

    /// Create or update a dish from `draft` and persist the book.
    ///
    /// # Errors
    ///
    /// Returns [`DishBookError`] when the draft names an unknown dish id or
    /// fails validation; the book is unchanged and nothing persists.
    pub fn save_dish(&mut self, draft: DishDraft) -> Result<DishId, DishBookError> {
        let id = self.dish_book.save(draft)?;
        self.persist_dishes();
        tracing::info!(dish_id = id.as_i32(), "dish saved");
        Ok(id)
    }

    /// Delete a dish by id and persist the book. Unknown ids are a no-op.
    pub fn delete_dish(&mut self, id: DishId) -> bool {
        let deleted = self.dish_book.delete(id);
        if deleted {
            self.persist_dishes();
            tracing::info!(dish_id = id.as_i32(), "dish deleted");
        }
        deleted
    }

    #[must_use]
    pub const fn dishes(&self) -> &DishBook {
        &self.dish_book
    }

    // ===== Reporting =====

    /// Derive the revenue-analysis panel from the current snapshots.
    #[must_use]
    pub fn metrics<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardMetrics {
        let lines = self.orders.lines();
        DashboardMetrics {
            revenue: reporting::revenue_summary(lines, now),
            monthly_revenue: reporting::monthly_revenue(lines, now),
            confirmed_orders: reporting::distinct_confirmed_orders(lines),
            status_counts: reporting::status_counts(lines),
            most_ordered: reporting::most_ordered(self.dish_book.dishes(), lines, TOP_DISHES),
            total_returns: self.total_returns,
        }
    }

    /// Lifetime count of cancelled-while-preparing lines.
    #[must_use]
    pub const fn total_returns(&self) -> u64 {
        self.total_returns
    }

    /// Re-read every snapshot from the store, discarding in-memory state.
    ///
    /// Picks up the storefront's writes; the cursor stays where it was and
    /// is re-clamped on the next page read.
    pub fn reload(&mut self) {
        self.orders = store::load_or_default(self.store.as_ref(), keys::ORDERS);
        self.dish_book = store::load_or_default(self.store.as_ref(), keys::DISHES);
        self.total_returns = store::load_or_default(self.store.as_ref(), keys::TOTAL_RETURNS);
    }

    fn persist_orders(&self) {
        store::persist(self.store.as_ref(), keys::ORDERS, &self.orders);
    }

    fn persist_dishes(&self) {
        store::persist(self.store.as_ref(), keys::DISHES, &self.dish_book);
    }
}

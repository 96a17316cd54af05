//! Placed-order records and the pipeline that advances them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dish::Dish;
use crate::types::{DietTag, OrderRef, OrderStatus, Price, Quantity};

/// One dish within a placement event.
///
/// Lines placed together share an [`OrderRef`] and timestamp; status is
/// tracked per line so a single line can be cancelled out of a group even
/// though confirm/ship act on the whole group. Price, diet tags, and the
/// image are snapshots taken at placement, insulating history from later
/// catalog edits. Field names on the wire match the persisted snapshots
/// (`id`, `name`, `orderDate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Shared placement identifier.
    #[serde(rename = "id")]
    pub order_ref: OrderRef,
    /// Dish title at placement time.
    #[serde(rename = "name")]
    pub dish: String,
    pub image: String,
    #[serde(default)]
    pub diet: Vec<DietTag>,
    /// Unit price snapshot.
    pub price: Price,
    pub quantity: Quantity,
    pub status: OrderStatus,
    #[serde(rename = "orderDate")]
    pub placed_at: DateTime<Utc>,
}

impl OrderLine {
    /// Snapshot `dish` into a pending line.
    #[must_use]
    pub fn pending(
        order_ref: OrderRef,
        dish: &Dish,
        quantity: Quantity,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_ref,
            dish: dish.title.clone(),
            image: dish.image.clone(),
            diet: dish.diet.clone(),
            price: dish.price,
            quantity,
            status: OrderStatus::PendingConfirmation,
            placed_at,
        }
    }

    /// Line revenue: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }

    /// Move to `to` only when the line currently sits in the stage right
    /// before it; otherwise leave it untouched. Returns whether it moved.
    pub fn advance_to(&mut self, to: OrderStatus) -> bool {
        if self.status.next() == Some(to) {
            self.status = to;
            true
        } else {
            false
        }
    }
}

/// Logical order: every line sharing one placement identifier.
///
/// A read-model for order views; built from the pipeline, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderGroup {
    pub order_ref: OrderRef,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl OrderGroup {
    /// Combined revenue of the group's lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Number of lines in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the group has no lines; such a group is never exposed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What a cancellation removed.
///
/// A line already being prepared wastes food when cancelled, so each one
/// counts as a return towards the persisted returns total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cancellation {
    /// Lines removed from the pipeline.
    pub removed: usize,
    /// How many of those were in Preparing Food.
    pub returns: u64,
}

/// Every placed order line, in placement order.
///
/// Shared between the storefront (placing and cancelling) and the admin
/// dashboard (advancing); both persist the whole pipeline after mutating
/// it. Confirm, ship, and deliver act on every line sharing an order ref,
/// one guarded step at a time; cancellation removes lines outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderPipeline {
    lines: Vec<OrderLine>,
}

impl OrderPipeline {
    /// Place a single-line order for `dish`, skipping the cart.
    pub fn place(
        &mut self,
        order_ref: OrderRef,
        dish: &Dish,
        quantity: Quantity,
        placed_at: DateTime<Utc>,
    ) {
        self.lines
            .push(OrderLine::pending(order_ref, dish, quantity, placed_at));
    }

    /// Place `lines` as one grouped order.
    ///
    /// Whatever ref, timestamp, or status the incoming lines carry is
    /// overwritten: every line of a group shares `order_ref` and
    /// `placed_at` and starts in Pending Confirmation.
    pub fn place_group<I>(&mut self, order_ref: OrderRef, lines: I, placed_at: DateTime<Utc>)
    where
        I: IntoIterator<Item = OrderLine>,
    {
        for mut line in lines {
            line.order_ref = order_ref;
            line.placed_at = placed_at;
            line.status = OrderStatus::PendingConfirmation;
            self.lines.push(line);
        }
    }

    /// Move every Pending Confirmation line of `order_ref` to Preparing
    /// Food. Returns how many lines moved.
    pub fn confirm(&mut self, order_ref: OrderRef) -> usize {
        self.advance_group(order_ref, OrderStatus::PreparingFood)
    }

    /// Move every Preparing Food line of `order_ref` to Out for Delivery.
    pub fn ship(&mut self, order_ref: OrderRef) -> usize {
        self.advance_group(order_ref, OrderStatus::OutForDelivery)
    }

    /// Move every Out for Delivery line of `order_ref` to Delivered.
    pub fn deliver(&mut self, order_ref: OrderRef) -> usize {
        self.advance_group(order_ref, OrderStatus::Delivered)
    }

    /// Lines not exactly one stage before `to` stay put; there is no way
    /// to skip a stage or move backwards.
    fn advance_group(&mut self, order_ref: OrderRef, to: OrderStatus) -> usize {
        self.lines
            .iter_mut()
            .filter(|line| line.order_ref == order_ref)
            .fold(0, |moved, line| moved + usize::from(line.advance_to(to)))
    }

    /// Cancel the line of `order_ref` whose dish name is `dish`.
    pub fn cancel_line(&mut self, order_ref: OrderRef, dish: &str) -> Cancellation {
        self.cancel_where(|line| line.order_ref == order_ref && line.dish == dish)
    }

    /// Cancel every line of `order_ref`.
    pub fn cancel_group(&mut self, order_ref: OrderRef) -> Cancellation {
        self.cancel_where(|line| line.order_ref == order_ref)
    }

    fn cancel_where(&mut self, matches: impl Fn(&OrderLine) -> bool) -> Cancellation {
        let mut cancellation = Cancellation::default();
        self.lines.retain(|line| {
            if matches(line) {
                cancellation.removed += 1;
                if line.status == OrderStatus::PreparingFood {
                    cancellation.returns += 1;
                }
                false
            } else {
                true
            }
        });
        cancellation
    }

    /// Every line, in placement order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Lines of one group, in placement order.
    pub fn lines_of(&self, order_ref: OrderRef) -> impl Iterator<Item = &OrderLine> {
        self.lines
            .iter()
            .filter(move |line| line.order_ref == order_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Group lines by order ref, groups in placement order.
    #[must_use]
    pub fn groups(&self) -> Vec<OrderGroup> {
        Self::group_lines(self.lines.iter())
    }

    /// Like [`groups`](Self::groups), but keeping only lines in `status`.
    ///
    /// Filtering happens before grouping, so a mixed-status group shows up
    /// with just its matching lines.
    #[must_use]
    pub fn groups_with_status(&self, status: OrderStatus) -> Vec<OrderGroup> {
        Self::group_lines(self.lines.iter().filter(|line| line.status == status))
    }

    fn group_lines<'a>(lines: impl Iterator<Item = &'a OrderLine>) -> Vec<OrderGroup> {
        let mut groups: Vec<OrderGroup> = Vec::new();
        for line in lines {
            if let Some(group) = groups
                .iter_mut()
                .find(|group| group.order_ref == line.order_ref)
            {
                group.lines.push(line.clone());
            } else {
                groups.push(OrderGroup {
                    order_ref: line.order_ref,
                    placed_at: line.placed_at,
                    lines: vec![line.clone()],
                });
            }
        }
        groups
    }
}

//! Revenue and popularity reporting.
//!
//! Pure functions over the shared order snapshot. "Now" is always a
//! parameter and window comparisons use calendar dates in its timezone,
//! so every derivation is deterministic under test. Revenue counts
//! confirmed lines only (anything past Pending Confirmation); popularity
//! counts every line regardless of status.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use nutriplanner_core::{Dish, OrderLine, OrderRef, OrderStatus, Price};

/// How many dishes the popularity ranking shows.
pub const TOP_DISHES: usize = 3;

/// Revenue totals for the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueSummary {
    /// All confirmed revenue, any date.
    pub total: Price,
    /// Confirmed revenue placed on today's calendar date.
    pub today: Price,
    /// Confirmed revenue since the Sunday of the week containing now.
    pub this_week: Price,
    /// Confirmed revenue in the current calendar year.
    pub this_year: Price,
}

/// One row of the popularity ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishPopularity {
    pub title: String,
    pub image: String,
    /// Total quantity ordered, across every status.
    pub ordered: u64,
}

/// Lines the admin accepted: still cooking, on the road, or delivered.
pub fn confirmed(lines: &[OrderLine]) -> impl Iterator<Item = &OrderLine> {
    lines.iter().filter(|line| line.status.is_confirmed())
}

/// Sum of unit price times quantity over confirmed lines.
#[must_use]
pub fn total_revenue(lines: &[OrderLine]) -> Price {
    confirmed(lines).map(OrderLine::line_total).sum()
}

/// Distinct order refs among confirmed lines; a grouped order with three
/// lines counts once.
#[must_use]
pub fn distinct_confirmed_orders(lines: &[OrderLine]) -> usize {
    confirmed(lines)
        .map(|line| line.order_ref)
        .collect::<HashSet<OrderRef>>()
        .len()
}

/// All four revenue windows in one pass of the dashboard's clock.
#[must_use]
pub fn revenue_summary<Tz: TimeZone>(lines: &[OrderLine], now: &DateTime<Tz>) -> RevenueSummary {
    RevenueSummary {
        total: total_revenue(lines),
        today: revenue_today(lines, now),
        this_week: revenue_this_week(lines, now),
        this_year: revenue_this_year(lines, now),
    }
}

/// Confirmed revenue placed on `now`'s calendar date.
#[must_use]
pub fn revenue_today<Tz: TimeZone>(lines: &[OrderLine], now: &DateTime<Tz>) -> Price {
    let today = now.date_naive();
    confirmed_within(lines, now, |date| date == today)
}

/// Confirmed revenue since the Sunday of the week containing `now`,
/// inclusive of today.
#[must_use]
pub fn revenue_this_week<Tz: TimeZone>(lines: &[OrderLine], now: &DateTime<Tz>) -> Price {
    let today = now.date_naive();
    let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
    confirmed_within(lines, now, |date| (week_start..=today).contains(&date))
}

/// Confirmed revenue in `now`'s calendar year.
#[must_use]
pub fn revenue_this_year<Tz: TimeZone>(lines: &[OrderLine], now: &DateTime<Tz>) -> Price {
    let year = now.year();
    confirmed_within(lines, now, |date| date.year() == year)
}

/// Confirmed revenue bucketed by calendar month of `now`'s year.
///
/// Index 0 is January; lines from other years contribute nothing.
#[must_use]
pub fn monthly_revenue<Tz: TimeZone>(lines: &[OrderLine], now: &DateTime<Tz>) -> [Price; 12] {
    let mut buckets = [Price::ZERO; 12];
    let year = now.year();
    for line in confirmed(lines) {
        let placed = line.placed_at.with_timezone(&now.timezone());
        if placed.year() != year {
            continue;
        }
        let slot = usize::try_from(placed.month0())
            .ok()
            .and_then(|index| buckets.get_mut(index));
        if let Some(bucket) = slot {
            *bucket = *bucket + line.line_total();
        }
    }
    buckets
}

/// Rank `dishes` by total quantity ordered, descending, and keep the top
/// `n`. Ties keep dish-book order; never-ordered dishes rank with zero and
/// still appear when the ranking has room for them.
#[must_use]
pub fn most_ordered(dishes: &[Dish], lines: &[OrderLine], n: usize) -> Vec<DishPopularity> {
    let mut ranking: Vec<DishPopularity> = dishes
        .iter()
        .map(|dish| DishPopularity {
            title: dish.title.clone(),
            image: dish.image.clone(),
            ordered: lines
                .iter()
                .filter(|line| line.dish == dish.title)
                .map(|line| u64::from(line.quantity.get()))
                .sum(),
        })
        .collect();
    ranking.sort_by(|a, b| b.ordered.cmp(&a.ordered));
    ranking.truncate(n);
    ranking
}

/// Line counts per status, in stage order.
#[must_use]
pub fn status_counts(lines: &[OrderLine]) -> [(OrderStatus, usize); 4] {
    OrderStatus::ALL.map(|status| {
        (
            status,
            lines.iter().filter(|line| line.status == status).count(),
        )
    })
}

fn confirmed_within<Tz: TimeZone>(
    lines: &[OrderLine],
    now: &DateTime<Tz>,
    in_window: impl Fn(NaiveDate) -> bool,
) -> Price {
    confirmed(lines)
        .filter(|line| {
            in_window(
                line.placed_at
                    .with_timezone(&now.timezone())
                    .date_naive(),
            )
        })
        .map(OrderLine::line_total)
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use nutriplanner_core::{DishId, Nutrition, OrderRefGenerator, Quantity, SequentialOrderRefs};

    use super::*;

    fn dish(id: i32, title: &str, cents: i64) -> Dish {
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

    fn line(
        order_ref: OrderRef,
        title: &str,
        cents: i64,
        quantity: u32,
        status: OrderStatus,
        placed_at: DateTime<Utc>,
    ) -> OrderLine {
        let mut line = OrderLine::pending(
            order_ref,
            &dish(1, title, cents),
            Quantity::new(quantity),
            placed_at,
        );
        line.status = status;
        line
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_total_revenue_skips_pending_lines() {
        let mut refs = SequentialOrderRefs::default();
        let a = refs.next_ref();
        let b = refs.next_ref();
        let lines = vec![
            line(a, "Pasta", 1000, 2, OrderStatus::PreparingFood, at(2025, 6, 1)),
            line(a, "Salad", 700, 1, OrderStatus::Delivered, at(2025, 6, 1)),
            line(b, "Soup", 500, 4, OrderStatus::PendingConfirmation, at(2025, 6, 1)),
        ];

        assert_eq!(total_revenue(&lines), Price::from_cents(2700));
    }

    #[test]
    fn test_distinct_confirmed_orders_counts_groups_once() {
        let mut refs = SequentialOrderRefs::default();
        let a = refs.next_ref();
        let b = refs.next_ref();
        let c = refs.next_ref();
        let lines = vec![
            line(a, "Pasta", 1000, 1, OrderStatus::PreparingFood, at(2025, 6, 1)),
            line(a, "Salad", 700, 1, OrderStatus::OutForDelivery, at(2025, 6, 1)),
            line(a, "Soup", 500, 1, OrderStatus::Delivered, at(2025, 6, 1)),
            line(b, "Pasta", 1000, 1, OrderStatus::Delivered, at(2025, 6, 2)),
            line(c, "Soup", 500, 1, OrderStatus::PendingConfirmation, at(2025, 6, 3)),
        ];

        assert_eq!(distinct_confirmed_orders(&lines), 2);
    }

    #[test]
    fn test_revenue_windows_use_local_calendar_dates() {
        let mut refs = SequentialOrderRefs::default();
        // Wednesday 2025-06-18; the week started on Sunday 2025-06-15.
        let now = at(2025, 6, 18);
        let lines = vec![
            line(refs.next_ref(), "Pasta", 1000, 1, OrderStatus::Delivered, at(2025, 6, 18)),
            line(refs.next_ref(), "Salad", 700, 1, OrderStatus::Delivered, at(2025, 6, 16)),
            line(refs.next_ref(), "Soup", 500, 1, OrderStatus::Delivered, at(2025, 6, 14)),
            line(refs.next_ref(), "Stew", 900, 1, OrderStatus::Delivered, at(2024, 12, 31)),
            line(refs.next_ref(), "Wrap", 800, 1, OrderStatus::PendingConfirmation, at(2025, 6, 18)),
        ];

        let summary = revenue_summary(&lines, &now);
        assert_eq!(summary.today, Price::from_cents(1000));
        assert_eq!(summary.this_week, Price::from_cents(1700));
        assert_eq!(summary.this_year, Price::from_cents(2200));
        assert_eq!(summary.total, Price::from_cents(3100));
    }

    #[test]
    fn test_week_starting_sunday_includes_sunday_itself() {
        let mut refs = SequentialOrderRefs::default();
        // Sunday 2025-06-15: the week window is exactly that one day.
        let now = at(2025, 6, 15);
        let lines = vec![
            line(refs.next_ref(), "Pasta", 1000, 1, OrderStatus::Delivered, at(2025, 6, 15)),
            line(refs.next_ref(), "Salad", 700, 1, OrderStatus::Delivered, at(2025, 6, 14)),
        ];

        assert_eq!(revenue_this_week(&lines, &now), Price::from_cents(1000));
    }

    #[test]
    fn test_monthly_revenue_buckets_current_year_only() {
        let mut refs = SequentialOrderRefs::default();
        let now = at(2025, 6, 18);
        let lines = vec![
            line(refs.next_ref(), "Pasta", 1000, 1, OrderStatus::Delivered, at(2025, 1, 10)),
            line(refs.next_ref(), "Salad", 700, 2, OrderStatus::Delivered, at(2025, 1, 20)),
            line(refs.next_ref(), "Soup", 500, 1, OrderStatus::Delivered, at(2025, 3, 5)),
            line(refs.next_ref(), "Stew", 900, 1, OrderStatus::Delivered, at(2024, 3, 5)),
            line(refs.next_ref(), "Wrap", 800, 1, OrderStatus::PendingConfirmation, at(2025, 6, 1)),
        ];

        let buckets = monthly_revenue(&lines, &now);
        assert_eq!(buckets[0], Price::from_cents(2400));
        assert_eq!(buckets[2], Price::from_cents(500));
        assert_eq!(buckets[5], Price::ZERO);
        assert_eq!(buckets.iter().copied().sum::<Price>(), Price::from_cents(2900));
    }

    #[test]
    fn test_most_ordered_sums_quantities_across_all_statuses() {
        let mut refs = SequentialOrderRefs::default();
        let dishes = vec![
            dish(1, "Pasta", 1000),
            dish(2, "Salad", 700),
            dish(3, "Soup", 500),
        ];
        let lines = vec![
            line(refs.next_ref(), "Salad", 700, 3, OrderStatus::PendingConfirmation, at(2025, 6, 1)),
            line(refs.next_ref(), "Salad", 700, 2, OrderStatus::Delivered, at(2025, 6, 2)),
            line(refs.next_ref(), "Pasta", 1000, 4, OrderStatus::PreparingFood, at(2025, 6, 3)),
        ];

        let ranking = most_ordered(&dishes, &lines, TOP_DISHES);
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].title, "Salad");
        assert_eq!(ranking[0].ordered, 5);
        assert_eq!(ranking[1].title, "Pasta");
        assert_eq!(ranking[1].ordered, 4);
        // Never ordered, still ranked.
        assert_eq!(ranking[2].title, "Soup");
        assert_eq!(ranking[2].ordered, 0);
    }

    #[test]
    fn test_most_ordered_ties_keep_book_order_and_truncate() {
        let mut refs = SequentialOrderRefs::default();
        let dishes = vec![
            dish(1, "Pasta", 1000),
            dish(2, "Salad", 700),
            dish(3, "Soup", 500),
        ];
        let lines = vec![
            line(refs.next_ref(), "Pasta", 1000, 1, OrderStatus::Delivered, at(2025, 6, 1)),
            line(refs.next_ref(), "Salad", 700, 1, OrderStatus::Delivered, at(2025, 6, 1)),
            line(refs.next_ref(), "Soup", 500, 1, OrderStatus::Delivered, at(2025, 6, 1)),
        ];

        let ranking = most_ordered(&dishes, &lines, 2);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].title, "Pasta");
        assert_eq!(ranking[1].title, "Salad");
    }

    #[test]
    fn test_status_counts_cover_every_stage() {
        let mut refs = SequentialOrderRefs::default();
        let lines = vec![
            line(refs.next_ref(), "Pasta", 1000, 1, OrderStatus::PendingConfirmation, at(2025, 6, 1)),
            line(refs.next_ref(), "Salad", 700, 1, OrderStatus::PreparingFood, at(2025, 6, 1)),
            line(refs.next_ref(), "Soup", 500, 1, OrderStatus::PreparingFood, at(2025, 6, 1)),
            line(refs.next_ref(), "Stew", 900, 1, OrderStatus::Delivered, at(2025, 6, 1)),
        ];

        let counts = status_counts(&lines);
        assert_eq!(counts[0], (OrderStatus::PendingConfirmation, 1));
        assert_eq!(counts[1], (OrderStatus::PreparingFood, 2));
        assert_eq!(counts[2], (OrderStatus::OutForDelivery, 0));
        assert_eq!(counts[3], (OrderStatus::Delivered, 1));
    }
}

//! Print dashboard statistics for the stored orders.

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use nutriplanner_admin::config::{AdminConfig, ConfigError};
use nutriplanner_admin::dashboard::AdminDashboard;
use nutriplanner_core::store::{JsonFileStore, StoreError};

/// Errors raised by the stats command.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store directory could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Print order, revenue, and popularity statistics.
///
/// # Errors
///
/// Returns [`StatsError`] when configuration fails to load or the store
/// directory cannot be opened.
pub fn print() -> Result<(), StatsError> {
    let config = AdminConfig::from_env()?;
    let store = JsonFileStore::open(&config.state_dir)?;
    let dashboard = AdminDashboard::open(Arc::new(store));

    let now = Local::now();
    let metrics = dashboard.metrics(&now);

    info!("NutriPlanner Dashboard Statistics");
    info!("=================================");
    info!("Order lines: {}", dashboard.orders().len());
    info!("Confirmed orders: {}", metrics.confirmed_orders);
    info!("Total returns: {}", metrics.total_returns);
    info!("Revenue:");
    info!("  Total: {}", metrics.revenue.total);
    info!("  Today: {}", metrics.revenue.today);
    info!("  This week: {}", metrics.revenue.this_week);
    info!("  This year: {}", metrics.revenue.this_year);
    info!("Lines by status:");
    for (status, count) in metrics.status_counts {
        info!("  {status}: {count}");
    }
    info!("Most ordered:");
    for entry in &metrics.most_ordered {
        info!("  {}: {}", entry.title, entry.ordered);
    }

    Ok(())
}

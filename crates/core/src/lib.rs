//! NutriPlanner Core - Shared domain library.
//!
//! This crate provides the domain model used across all NutriPlanner
//! components:
//! - `storefront` - Shopper session: catalog, favourites, cart, order pipeline
//! - `admin` - Dashboard: order management, dish CRUD, revenue reporting
//! - `cli` - Command-line tools for seeding and inspection
//!
//! # Architecture
//!
//! The core crate contains the typed domain model (identifiers, money,
//! quantities, the order status state machine, the dish schema with its
//! ingestion-time normalization) plus the one boundary every component
//! shares: the key-value snapshot [`store`]. Everything else - session
//! logic, reporting, service clients - lives in the component crates.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities, and statuses
//! - [`dish`] - The typed dish schema and the loose legacy shape it is ingested from
//! - [`order`] - Placed-order lines, grouped-order views, and the order pipeline
//! - [`store`] - Key-value snapshot persistence with in-memory and file backends

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dish;
pub mod order;
pub mod store;
pub mod types;

pub use dish::{Dish, DishDraft, DishError, Nutrition, RawDish};
pub use order::{Cancellation, OrderGroup, OrderLine, OrderPipeline};
pub use types::*;

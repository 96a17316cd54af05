//! Core types for NutriPlanner.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod diet;
pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod status;

pub use category::Category;
pub use diet::DietTag;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use quantity::Quantity;
pub use status::OrderStatus;

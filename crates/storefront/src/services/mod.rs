//! Clients for the consumed external services.
//!
//! # Services
//!
//! - `auth` - Token-issuing authentication service (login, register)
//! - `dishes` - Dish persistence service (canonical dish collection)
//!
//! Both clients are thin: one request per call, typed errors, no retries.
//! Session state lives with the caller, not in the client.

pub mod auth;
pub mod dishes;

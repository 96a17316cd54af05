//! NutriPlanner Storefront library.
//!
//! The shopper-facing half of NutriPlanner: the dish catalog, the
//! favourites and cart collections, the session facade that restores and
//! persists them (and the shared order pipeline), and clients for the
//! consumed services (authentication, dish persistence).
//!
//! All mutation logic lives on the collection types, which are plain
//! data and never touch storage. [`session::StorefrontSession`] is the
//! single place where collections meet the snapshot store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod captcha;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod favourites;
pub mod services;
pub mod session;
pub mod signup;

//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Order placements are
//! identified separately by [`OrderRef`], minted through an
//! [`OrderRefGenerator`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use nutriplanner_core::define_id;
/// define_id!(DishId);
/// define_id!(IngredientId);
///
/// let dish_id = DishId::new(1);
/// let ingredient_id = IngredientId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: DishId = ingredient_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(DishId);

/// Identifier shared by every line of one placement event.
///
/// Lines placed together from the cart carry the same `OrderRef`; a buy-now
/// order is a single-line group with its own ref. Serialized as a plain UUID
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRef(Uuid);

impl OrderRef {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl core::fmt::Display for OrderRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderRef {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<OrderRef> for Uuid {
    fn from(id: OrderRef) -> Self {
        id.0
    }
}

/// Strategy for minting order references.
///
/// The session mints exactly one ref per placement event, whatever the line
/// count of the group.
pub trait OrderRefGenerator: Send {
    /// Produce the next reference.
    fn next_ref(&mut self) -> OrderRef;
}

/// Default generator: random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidOrderRefs;

impl OrderRefGenerator for UuidOrderRefs {
    fn next_ref(&mut self) -> OrderRef {
        OrderRef(Uuid::new_v4())
    }
}

/// Deterministic generator for tests and fixtures: 1, 2, 3, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialOrderRefs {
    last: u128,
}

impl SequentialOrderRefs {
    /// Start counting from zero; the first ref issued is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }
}

impl OrderRefGenerator for SequentialOrderRefs {
    fn next_ref(&mut self) -> OrderRef {
        self.last += 1;
        OrderRef(Uuid::from_u128(self.last))
    }
}

//! Item counts, always at least one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A positive item count.
///
/// Quantity fields in the UI arrive as free text; [`Quantity::parse_or`]
/// clamps empty or malformed input to a fallback instead of erroring,
/// and values below one clamp to one. Deserialization applies the same
/// clamp, so a snapshot holding a stray zero loads as one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(1);

    /// Create a quantity; zero clamps to one.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        if count == 0 { Self(1) } else { Self(count) }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parse free-text input, keeping `fallback` when the text is empty or
    /// not a number.
    #[must_use]
    pub fn parse_or(input: &str, fallback: Self) -> Self {
        input.trim().parse::<u32>().map_or(fallback, Self::new)
    }

    /// Combine with another quantity (cart merge).
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Stepper increment.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Stepper decrement, floored at one.
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 <= 1 { Self(1) } else { Self(self.0 - 1) }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<u32> for Quantity {
    fn from(count: u32) -> Self {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_clamps_to_one() {
        assert_eq!(Quantity::new(0), Quantity::ONE);
        assert_eq!(Quantity::new(5).get(), 5);
    }

    #[test]
    fn test_parse_or_keeps_fallback_for_garbage() {
        let previous = Quantity::new(4);
        assert_eq!(Quantity::parse_or("", previous), previous);
        assert_eq!(Quantity::parse_or("abc", previous), previous);
        assert_eq!(Quantity::parse_or("-3", previous), previous);
        assert_eq!(Quantity::parse_or(" 7 ", previous), Quantity::new(7));
        assert_eq!(Quantity::parse_or("0", previous), Quantity::ONE);
    }

    #[test]
    fn test_merge_adds() {
        assert_eq!(Quantity::new(2).merge(Quantity::new(3)), Quantity::new(5));
        assert_eq!(
            Quantity::new(u32::MAX).merge(Quantity::ONE),
            Quantity::new(u32::MAX)
        );
    }

    #[test]
    fn test_stepper_floors_at_one() {
        assert_eq!(Quantity::ONE.decrement(), Quantity::ONE);
        assert_eq!(Quantity::new(3).decrement(), Quantity::new(2));
        assert_eq!(Quantity::new(3).increment(), Quantity::new(4));
    }

    #[test]
    fn test_deserialize_clamps_zero() {
        let parsed: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Quantity::ONE);
        let parsed: Quantity = serde_json::from_str("12").unwrap();
        assert_eq!(parsed.get(), 12);
    }
}

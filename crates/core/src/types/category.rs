//! Menu categories.

use serde::{Deserialize, Serialize};

/// Menu section a dish belongs to.
///
/// Seeded dishes always carry one; dishes created through the admin form may
/// not, which is why [`crate::Dish`] holds an `Option<Category>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    Smoothies,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snacks,
        Self::Smoothies,
    ];

    /// The identifier used in data files and filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
            Self::Smoothies => "smoothies",
        }
    }

    /// Storefront heading for the category page.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast Delights",
            Self::Lunch => "Lunch Favorites",
            Self::Dinner => "Dinner Specials",
            Self::Snacks => "Snack Attack",
            Self::Smoothies => "Smoothies & Drinks",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snacks" => Ok(Self::Snacks),
            "smoothies" => Ok(Self::Smoothies),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

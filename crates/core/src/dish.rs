//! The dish schema and its ingestion boundary.
//!
//! Seed files and the dish service speak a loose legacy shape: `carb`/`fats`
//! keys, prices as numbers or numeric strings, preparation time as
//! `"30 mins"`, ingredients as plain names or objects with macros.
//! [`RawDish::normalize`] coerces that shape into the typed [`Dish`] exactly
//! once; everything downstream works with normalized records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, DietTag, DishId, Price};

/// Fallback image for records without one.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/200x150";

/// Errors raised when validating dish input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DishError {
    /// Title is empty after trimming.
    #[error("dish title cannot be empty")]
    EmptyTitle,
    /// The record carries no identifier and none was assigned.
    #[error("dish record is missing an id")]
    MissingId,
}

/// A catalog item.
///
/// Immutable from the shopper's perspective; the admin dish book is the only
/// writer. Cart and order records snapshot the fields they need instead of
/// referencing a `Dish`, so editing one never rewrites history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub title: String,
    /// Image URL; ingestion substitutes [`PLACEHOLDER_IMAGE`] when absent.
    pub image: String,
    #[serde(default)]
    pub diet: Vec<DietTag>,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub price: Price,
    /// Preparation time in minutes.
    #[serde(default, rename = "time")]
    pub prep_minutes: u32,
    /// Absent on dishes created through the admin form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Dish {
    /// Case-insensitive title comparison; titles act as natural keys in the
    /// cart, the favourites list, and order lines.
    #[must_use]
    pub fn matches_title(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title.trim())
    }

    /// Whether any diet tag matches `tag`, ignoring case.
    #[must_use]
    pub fn has_diet(&self, tag: &str) -> bool {
        self.diet.iter().any(|t| t.matches(tag))
    }
}

/// Per-dish nutrition facts.
///
/// Serialized with the legacy key names (`carb`, `fats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: Decimal,
    #[serde(default, rename = "carb")]
    pub carbs: Decimal,
    #[serde(default, rename = "fats")]
    pub fat: Decimal,
}

// ===== Ingestion shape =====

/// Number-or-string field in the legacy dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Decimal value, if the content is numeric. Text values may carry a
    /// leading `$`. Rounded to two places, the precision of the source
    /// schema.
    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Decimal::from_f64_retain(*n).map(|d| d.round_dp(2)),
            Self::Text(s) => s.trim().trim_start_matches('$').parse().ok(),
        }
    }

    /// Leading digits, for `"30 mins"`-style duration strings.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn as_minutes(&self) -> Option<u32> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n as u32),
            Self::Number(_) => None,
            Self::Text(s) => {
                let digits: String = s.chars().filter(char::is_ascii_digit).collect();
                digits.parse().ok()
            }
        }
    }
}

/// Ingredient entry: the storefront dataset stores plain names, the seed
/// dataset stores objects with per-100g macros. Only the name survives
/// normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIngredient {
    Name(String),
    Entry { name: String },
}

impl RawIngredient {
    fn into_name(self) -> Option<String> {
        let name = match self {
            Self::Name(name) | Self::Entry { name } => name,
        };
        let name = name.trim().to_owned();
        (!name.is_empty()).then_some(name)
    }
}

/// Loose dish record as found in seed files and the dish service payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDish {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub diet: Vec<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<LooseNumber>,
    #[serde(default, alias = "carbs")]
    pub carb: Option<LooseNumber>,
    #[serde(default, alias = "fat")]
    pub fats: Option<LooseNumber>,
    #[serde(default)]
    pub price: Option<LooseNumber>,
    #[serde(default)]
    pub time: Option<LooseNumber>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    #[serde(default)]
    pub description: String,
}

impl RawDish {
    /// Coerce this loose record into a typed [`Dish`].
    ///
    /// Missing images fall back to the placeholder, durations lose their
    /// `" mins"` suffix, prices accept numbers or numeric strings (anything
    /// else becomes zero, negatives clamp to zero), unknown categories
    /// become `None`, blank diet tags and ingredient names drop out.
    ///
    /// # Errors
    ///
    /// Returns [`DishError::EmptyTitle`] for a blank title and
    /// [`DishError::MissingId`] when no id is present; callers that assign
    /// ids (the seeder) fill `id` in first.
    pub fn normalize(self) -> Result<Dish, DishError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(DishError::EmptyTitle);
        }
        let id = self.id.map(DishId::new).ok_or(DishError::MissingId)?;

        let image = self
            .image
            .map(|image| image.trim().to_owned())
            .filter(|image| !image.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());

        Ok(Dish {
            id,
            title,
            image,
            diet: self
                .diet
                .iter()
                .map(|tag| DietTag::new(tag))
                .filter(|tag| !tag.as_str().is_empty())
                .collect(),
            nutrition: Nutrition {
                calories: self.calories.unwrap_or(0),
                protein: loose_decimal(self.protein.as_ref()),
                carbs: loose_decimal(self.carb.as_ref()),
                fat: loose_decimal(self.fats.as_ref()),
            },
            price: Price::new(loose_decimal(self.price.as_ref()).max(Decimal::ZERO)),
            prep_minutes: self
                .time
                .as_ref()
                .and_then(LooseNumber::as_minutes)
                .unwrap_or(0),
            category: self.category.as_deref().and_then(|c| c.parse().ok()),
            ingredients: self
                .ingredients
                .into_iter()
                .filter_map(RawIngredient::into_name)
                .collect(),
            description: self.description.trim().to_owned(),
        })
    }
}

fn loose_decimal(value: Option<&LooseNumber>) -> Decimal {
    value
        .and_then(LooseNumber::as_decimal)
        .unwrap_or(Decimal::ZERO)
}

// ===== Admin form input =====

/// Input from the admin dish form.
///
/// Carries an id only when editing an existing dish; the dish book assigns
/// ids for new entries. Category, nutrition, and preparation time are
/// optional because the form does not collect them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishDraft {
    pub id: Option<DishId>,
    pub title: String,
    pub image: Option<String>,
    #[serde(default)]
    pub diet: Vec<DietTag>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub prep_minutes: Option<u32>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl DishDraft {
    /// Build the dish this draft describes, stamped with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DishError::EmptyTitle`] when the title is blank after
    /// trimming.
    pub fn into_dish(self, id: DishId) -> Result<Dish, DishError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(DishError::EmptyTitle);
        }

        Ok(Dish {
            id,
            title,
            image: self
                .image
                .map(|image| image.trim().to_owned())
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            diet: self.diet,
            nutrition: self.nutrition,
            price: Price::new(self.price.amount().max(Decimal::ZERO)),
            prep_minutes: self.prep_minutes.unwrap_or(0),
            category: self.category,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| i.trim().to_owned())
                .filter(|i| !i.is_empty())
                .collect(),
            description: self.description.trim().to_owned(),
        })
    }
}

impl From<&Dish> for DishDraft {
    /// Prefill the edit form from an existing dish.
    fn from(dish: &Dish) -> Self {
        Self {
            id: Some(dish.id),
            title: dish.title.clone(),
            image: Some(dish.image.clone()),
            diet: dish.diet.clone(),
            price: dish.price,
            nutrition: dish.nutrition,
            prep_minutes: Some(dish.prep_minutes),
            category: dish.category,
            ingredients: dish.ingredients.clone(),
            description: dish.description.clone(),
        }
    }
}

//! The dish catalog.
//!
//! Loads the dish dataset once, normalizes every record at ingestion, and
//! serves lookups and filters to the storefront views. The catalog itself
//! is immutable and cheap to clone; the admin dish book is a separate,
//! store-backed collection.

use std::path::Path;
use std::sync::Arc;

use nutriplanner_core::{Category, Dish, DishId, RawDish};
use thiserror::Error;

/// Default size of a "similar dishes" strip.
pub const SIMILAR_LIMIT: usize = 4;

/// Errors from loading the catalog dataset.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset file could not be read.
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The dataset is not a JSON array of dish records.
    #[error("catalog dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable dish catalog.
///
/// Records that fail normalization are logged and skipped; one bad record
/// never takes the catalog down.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    dishes: Arc<Vec<Dish>>,
}

impl CatalogStore {
    /// Load the catalog from a JSON dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array;
    /// individual malformed records are skipped, not fatal.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Build the catalog from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a JSON array of objects.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawDish> = serde_json::from_str(raw)?;
        let mut dishes = Vec::with_capacity(records.len());
        for record in records {
            match record.normalize() {
                Ok(dish) => dishes.push(dish),
                Err(error) => tracing::warn!(%error, "skipping malformed dish record"),
            }
        }
        tracing::info!(count = dishes.len(), "catalog loaded");
        Ok(Self::from_dishes(dishes))
    }

    /// Build the catalog from already-normalized dishes.
    #[must_use]
    pub fn from_dishes(dishes: Vec<Dish>) -> Self {
        Self {
            dishes: Arc::new(dishes),
        }
    }

    /// Every dish, in dataset order.
    #[must_use]
    pub fn all(&self) -> &[Dish] {
        &self.dishes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Look up a dish by id.
    #[must_use]
    pub fn by_id(&self, id: DishId) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.id == id)
    }

    /// Look up a dish by title, case-insensitively.
    #[must_use]
    pub fn by_title(&self, title: &str) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.matches_title(title))
    }

    /// Dishes in `category`, in dataset order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Dish> {
        self.dishes
            .iter()
            .filter(move |dish| dish.category == Some(category))
    }

    /// Dishes matching every criterion of `filter`, in dataset order.
    #[must_use]
    pub fn filter(&self, filter: &DishFilter) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|dish| filter.matches(dish))
            .collect()
    }

    /// Every distinct diet tag in the catalog, sorted.
    ///
    /// Tags are compared exactly; the dataset is the source of truth for
    /// their spelling.
    #[must_use]
    pub fn diet_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .dishes
            .iter()
            .flat_map(|dish| dish.diet.iter().map(|tag| tag.as_str().to_owned()))
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Up to `limit` other dishes sharing `dish`'s category.
    #[must_use]
    pub fn similar_to(&self, dish: &Dish, limit: usize) -> Vec<&Dish> {
        let Some(category) = dish.category else {
            return Vec::new();
        };
        self.in_category(category)
            .filter(|candidate| candidate.id != dish.id)
            .take(limit)
            .collect()
    }
}

/// Catalog filter criteria.
///
/// Blank or unset fields do not constrain; an empty filter matches every
/// dish. Allergy filtering keys off the same tag list as diet filtering,
/// which is how the dataset records allergy suitability.
#[derive(Debug, Clone, Default)]
pub struct DishFilter {
    /// Substring matched against titles, case-insensitive.
    pub keyword: Option<String>,
    /// Substring matched against ingredient names, case-insensitive.
    pub ingredient: Option<String>,
    /// Diet tag the dish must carry.
    pub diet: Option<String>,
    /// Inclusive lower calorie bound.
    pub min_calories: Option<u32>,
    /// Inclusive upper calorie bound.
    pub max_calories: Option<u32>,
    pub category: Option<Category>,
    /// Allergy-suitability tag the dish must carry (e.g. "Gluten-Free").
    pub allergy: Option<String>,
}

impl DishFilter {
    fn matches(&self, dish: &Dish) -> bool {
        if let Some(keyword) = non_blank(self.keyword.as_deref()) {
            if !contains_ignore_case(&dish.title, keyword) {
                return false;
            }
        }
        if let Some(ingredient) = non_blank(self.ingredient.as_deref()) {
            if !dish
                .ingredients
                .iter()
                .any(|name| contains_ignore_case(name, ingredient))
            {
                return false;
            }
        }
        if let Some(diet) = non_blank(self.diet.as_deref()) {
            if !dish.has_diet(diet) {
                return false;
            }
        }
        if let Some(min) = self.min_calories {
            if dish.nutrition.calories < min {
                return false;
            }
        }
        if let Some(max) = self.max_calories {
            if dish.nutrition.calories > max {
                return false;
            }
        }
        if let Some(category) = self.category {
            if dish.category != Some(category) {
                return false;
            }
        }
        if let Some(allergy) = non_blank(self.allergy.as_deref()) {
            if !dish.has_diet(allergy) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

//! The admin-managed dish book.
//!
//! The mutable counterpart of the storefront catalog: the list the admin
//! edits through the dish form. Plain data; the dashboard facade loads it
//! from and persists it to the snapshot store.

use nutriplanner_core::{Dish, DishDraft, DishError, DishId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from dish book mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DishBookError {
    /// The draft failed validation.
    #[error(transparent)]
    Invalid(#[from] DishError),
    /// The draft names an identifier the book does not contain.
    #[error("no dish with id {0}")]
    UnknownDish(DishId),
}

/// Every dish the admin manages, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishBook {
    dishes: Vec<Dish>,
}

impl DishBook {
    #[must_use]
    pub fn from_dishes(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    /// Fill an empty book from `dishes`. A non-empty book is left alone;
    /// returns whether seeding happened.
    pub fn seed(&mut self, dishes: Vec<Dish>) -> bool {
        if !self.dishes.is_empty() {
            return false;
        }
        self.dishes = dishes;
        true
    }

    /// Save a dish form submission.
    ///
    /// A draft carrying an identifier replaces the matching entry in
    /// place; a draft without one is assigned the highest existing
    /// identifier plus one (or 1 in an empty book) and appended.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft fails validation or names an
    /// unknown identifier; the book is unchanged in both cases.
    pub fn save(&mut self, draft: DishDraft) -> Result<DishId, DishBookError> {
        match draft.id {
            Some(id) => {
                let position = self
                    .dishes
                    .iter()
                    .position(|dish| dish.id == id)
                    .ok_or(DishBookError::UnknownDish(id))?;
                let dish = draft.into_dish(id)?;
                if let Some(slot) = self.dishes.get_mut(position) {
                    *slot = dish;
                }
                Ok(id)
            }
            None => {
                let id = self.next_id();
                let dish = draft.into_dish(id)?;
                self.dishes.push(dish);
                Ok(id)
            }
        }
    }

    /// Remove a dish by identifier. Unknown identifiers are a no-op.
    pub fn delete(&mut self, id: DishId) -> bool {
        let before = self.dishes.len();
        self.dishes.retain(|dish| dish.id != id);
        self.dishes.len() != before
    }

    #[must_use]
    pub fn get(&self, id: DishId) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.id == id)
    }

    /// Every dish, in insertion order.
    #[must_use]
    pub fn dishes(&self) -> &[Dish] {
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

    fn next_id(&self) -> DishId {
        self.dishes
            .iter()
            .map(|dish| dish.id.as_i32())
            .max()
            .map_or(DishId::new(1), |max| DishId::new(max + 1))
    }
}

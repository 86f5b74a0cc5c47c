//! Food entry form

use crate::error::{AppResult, ValidationError};
use crate::models::{FoodEntry, MealType, NewFoodEntry};
use crate::store::Store;

/// Draft of a food entry plus its visibility
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodForm {
    pub name: String,
    pub calories: u32,
    pub meal_type: Option<MealType>,
    pub show_form: bool,
}

impl FoodForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form pre-set to a meal
    pub fn quick_add(&mut self, meal_type: MealType) {
        self.meal_type = Some(meal_type);
        self.show_form = true;
    }

    pub fn open(&mut self) {
        self.show_form = true;
    }

    /// Close and clear
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<NewFoodEntry, ValidationError> {
        let name = self.name.trim();
        match self.meal_type {
            Some(meal_type) if !name.is_empty() && self.calories >= 1 => Ok(NewFoodEntry {
                name: name.to_string(),
                calories: self.calories,
                meal_type,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }

    /// Validate, submit through the store, and reset on success
    pub async fn submit(&mut self, store: &Store) -> AppResult<FoodEntry> {
        let draft = self.validate()?;
        let entry = store.add_food_entry(&draft).await?;
        self.cancel();
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::gateway::MockGateway;
    use crate::models::Credentials;
    use crate::session::MemorySessionStore;
    use crate::summary::{today, total_calories};
    use std::sync::Arc;

    async fn signed_in_store() -> Store {
        let store = Store::new(
            Arc::new(MockGateway::new()),
            Arc::new(MemorySessionStore::new()),
        );
        store
            .signup(&Credentials::signup("sam", "sam@example.com", "pw"))
            .await
            .unwrap();
        store
    }

    #[test]
    fn test_quick_add_sets_meal_and_opens() {
        let mut form = FoodForm::new();
        form.quick_add(MealType::Lunch);
        assert!(form.show_form);
        assert_eq!(form.meal_type, Some(MealType::Lunch));
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_validation_requires_every_field() {
        let mut form = FoodForm {
            name: "  ".to_string(),
            calories: 250,
            meal_type: Some(MealType::Snack),
            show_form: true,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        form.name = "Yogurt".to_string();
        form.calories = 0;
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        form.calories = 120;
        form.meal_type = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        form.meal_type = Some(MealType::Snack);
        assert_eq!(form.validate().unwrap().name, "Yogurt");
    }

    #[tokio::test]
    async fn test_submit_appends_to_today() {
        let store = signed_in_store().await;
        let mut form = FoodForm::new();
        form.quick_add(MealType::Breakfast);
        form.name = "Oatmeal".to_string();
        form.calories = 300;

        let entry = form.submit(&store).await.unwrap();
        assert_eq!(entry.name, "Oatmeal");
        assert_eq!(entry.meal_type, MealType::Breakfast);
        assert_eq!(form, FoodForm::default());

        let state = store.snapshot();
        assert_eq!(total_calories(state.food_on(today())), 300);
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_call() {
        let store = signed_in_store().await;
        let mut form = FoodForm::new();
        form.name = "Mystery".to_string();
        form.show_form = true;

        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MissingFields)));
        assert!(form.show_form);
        assert!(store.snapshot().food_entries.is_empty());
    }
}

//! Quick-add templates

use crate::models::MealType;

/// Activity shortcut with a fixed burn rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickActivity {
    pub name: &'static str,
    pub emoji: &'static str,
    /// Calories burned per minute
    pub rate: u32,
}

/// Meal shortcut for the food form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickMeal {
    pub meal_type: MealType,
    pub emoji: &'static str,
}

pub const QUICK_ACTIVITIES: &[QuickActivity] = &[
    QuickActivity { name: "Walking", emoji: "🚶", rate: 5 },
    QuickActivity { name: "Running", emoji: "🏃", rate: 10 },
    QuickActivity { name: "Cycling", emoji: "🚴", rate: 8 },
    QuickActivity { name: "Swimming", emoji: "🏊", rate: 9 },
    QuickActivity { name: "Yoga", emoji: "🧘", rate: 3 },
    QuickActivity { name: "Weight Training", emoji: "🏋️", rate: 6 },
];

pub const QUICK_MEALS: &[QuickMeal] = &[
    QuickMeal { meal_type: MealType::Breakfast, emoji: "🍳" },
    QuickMeal { meal_type: MealType::Lunch, emoji: "🥗" },
    QuickMeal { meal_type: MealType::Dinner, emoji: "🍝" },
    QuickMeal { meal_type: MealType::Snack, emoji: "🍎" },
];

/// Look up a quick activity by its exact name
pub fn quick_activity(name: &str) -> Option<&'static QuickActivity> {
    QUICK_ACTIVITIES.iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(quick_activity("Running").map(|a| a.rate), Some(10));
        assert!(quick_activity("running").is_none());
        assert!(quick_activity("Morning Run").is_none());
    }

    #[test]
    fn test_every_meal_type_has_a_shortcut() {
        for meal in MealType::all() {
            assert!(QUICK_MEALS.iter().any(|q| q.meal_type == *meal));
        }
    }
}

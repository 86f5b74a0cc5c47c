//! Daily summaries
//!
//! Derived views over the logged entries. A day is a UTC calendar date.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ActivityEntry, FoodEntry, MealType};

/// Current UTC date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Anything stamped with a creation time
pub trait Logged {
    fn created_at(&self) -> DateTime<Utc>;

    fn logged_on(&self, day: NaiveDate) -> bool {
        self.created_at().date_naive() == day
    }
}

impl Logged for FoodEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Logged for ActivityEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Entries created on `day`, in insertion order
pub fn entries_on<T: Logged>(entries: &[T], day: NaiveDate) -> Vec<&T> {
    entries.iter().filter(|e| e.logged_on(day)).collect()
}

/// Calories eaten
pub fn total_calories<'a>(entries: impl IntoIterator<Item = &'a FoodEntry>) -> u64 {
    entries.into_iter().map(|e| u64::from(e.calories)).sum()
}

/// Calories burned
pub fn total_burned<'a>(entries: impl IntoIterator<Item = &'a ActivityEntry>) -> u64 {
    entries.into_iter().map(|e| u64::from(e.calories)).sum()
}

/// Minutes of activity
pub fn total_minutes<'a>(entries: impl IntoIterator<Item = &'a ActivityEntry>) -> u64 {
    entries.into_iter().map(|e| u64::from(e.duration)).sum()
}

/// Dashboard totals for one day
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub consumed: u64,
    pub burned: u64,
    /// consumed - burned
    pub net: i64,
    pub active_minutes: u64,
    pub food_count: usize,
    pub activity_count: usize,
    /// Calories per meal, in `MealType::all()` order
    pub by_meal: Vec<(MealType, u64)>,
}

impl DaySummary {
    pub fn compute(food: &[FoodEntry], activities: &[ActivityEntry], day: NaiveDate) -> Self {
        let food = entries_on(food, day);
        let activities = entries_on(activities, day);

        let consumed = total_calories(food.iter().copied());
        let burned = total_burned(activities.iter().copied());

        let by_meal = MealType::all()
            .iter()
            .map(|meal| {
                let calories =
                    total_calories(food.iter().copied().filter(|e| e.meal_type == *meal));
                (*meal, calories)
            })
            .collect();

        Self {
            day,
            consumed,
            burned,
            net: i64::try_from(consumed).unwrap_or(i64::MAX)
                - i64::try_from(burned).unwrap_or(i64::MAX),
            active_minutes: total_minutes(activities.iter().copied()),
            food_count: food.len(),
            activity_count: activities.len(),
            by_meal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    fn food(name: &str, calories: u32, meal_type: MealType, created_at: DateTime<Utc>) -> FoodEntry {
        FoodEntry {
            id: name.to_string(),
            name: name.to_string(),
            calories,
            meal_type,
            created_at,
        }
    }

    fn activity(name: &str, duration: u32, calories: u32, created_at: DateTime<Utc>) -> ActivityEntry {
        ActivityEntry {
            id: name.to_string(),
            name: name.to_string(),
            duration,
            calories,
            created_at,
        }
    }

    #[test]
    fn test_only_todays_entries_count() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let entries = vec![
            food("toast", 200, MealType::Breakfast, at(13, 8)),
            food("oatmeal", 300, MealType::Breakfast, at(14, 7)),
            food("soup", 450, MealType::Lunch, at(14, 23)),
            food("pizza", 900, MealType::Dinner, at(15, 0)),
        ];

        let todays = entries_on(&entries, day);
        let names: Vec<&str> = todays.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["oatmeal", "soup"]);
        assert_eq!(total_calories(todays), 750);
    }

    #[test]
    fn test_day_summary() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let food = vec![
            food("oatmeal", 300, MealType::Breakfast, at(14, 7)),
            food("salad", 350, MealType::Lunch, at(14, 12)),
            food("apple", 80, MealType::Snack, at(14, 15)),
            food("late", 500, MealType::Dinner, at(13, 21)),
        ];
        let activities = vec![
            activity("Running", 30, 300, at(14, 6)),
            activity("Yoga", 20, 60, at(14, 18)),
            activity("Cycling", 60, 480, at(12, 9)),
        ];

        let summary = DaySummary::compute(&food, &activities, day);
        assert_eq!(summary.consumed, 730);
        assert_eq!(summary.burned, 360);
        assert_eq!(summary.net, 370);
        assert_eq!(summary.active_minutes, 50);
        assert_eq!(summary.food_count, 3);
        assert_eq!(summary.activity_count, 2);
        assert_eq!(
            summary.by_meal,
            vec![
                (MealType::Breakfast, 300),
                (MealType::Lunch, 350),
                (MealType::Dinner, 0),
                (MealType::Snack, 80),
            ]
        );
    }

    #[test]
    fn test_totals_do_not_overflow() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let food = vec![
            food("a", u32::MAX, MealType::Dinner, at(14, 18)),
            food("b", u32::MAX, MealType::Dinner, at(14, 19)),
        ];
        let activities = vec![
            activity("x", u32::MAX, u32::MAX, at(14, 6)),
            activity("y", u32::MAX, 1, at(14, 7)),
        ];

        let expected = 2 * u64::from(u32::MAX);
        assert_eq!(total_calories(&food), expected);
        assert_eq!(total_minutes(&activities), expected);

        let summary = DaySummary::compute(&food, &activities, day);
        assert_eq!(summary.consumed, expected);
        assert_eq!(summary.burned, u64::from(u32::MAX) + 1);
        assert_eq!(summary.net, i64::from(u32::MAX) - 1);
        assert_eq!(summary.by_meal[2], (MealType::Dinner, expected));
    }

    #[test]
    fn test_net_can_be_negative() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let activities = vec![activity("Swimming", 60, 540, at(14, 10))];
        let summary = DaySummary::compute(&[], &activities, day);
        assert_eq!(summary.net, -540);
    }
}

use serde::Serialize;

use super::repo::Meal;

/// Diet adherence summary for one user, served by GET /user/info/:id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietSummary {
    pub total_amount_meal: usize,
    pub total_amount_meal_in_diet: usize,
    pub total_amount_meal_out_diet: usize,
    pub best_sequence_meal_in_diet: usize,
}

/// Length of the longest contiguous run of `true`. The counter resets
/// on every `false`: a single off-diet meal breaks the streak.
pub fn longest_in_diet_run<I>(flags: I) -> usize
where
    I: IntoIterator<Item = bool>,
{
    let mut counter = 0;
    let mut best = 0;
    for in_diet in flags {
        if in_diet {
            counter += 1;
        } else {
            counter = 0;
        }
        best = best.max(counter);
    }
    best
}

/// Expects meals in chronological order; `Meal::list_by_user` returns
/// them sorted on (date, hour) ascending.
pub fn summarize(meals: &[Meal]) -> DietSummary {
    let total = meals.len();
    let in_diet = meals.iter().filter(|m| m.is_in_diet).count();
    DietSummary {
        total_amount_meal: total,
        total_amount_meal_in_diet: in_diet,
        total_amount_meal_out_diet: total - in_diet,
        best_sequence_meal_in_diet: longest_in_diet_run(meals.iter().map(|m| m.is_in_diet)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::{Date, OffsetDateTime};
    use uuid::Uuid;

    fn meal(date: Date, hour: &str, is_in_diet: bool) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "meal".into(),
            description: String::new(),
            date,
            hour: hour.into(),
            is_in_diet,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn meals_from_flags(flags: &[bool]) -> Vec<Meal> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &f)| meal(date!(2024 - 01 - 15), &format!("{:02}:00", i), f))
            .collect()
    }

    #[test]
    fn run_is_broken_by_an_off_diet_meal() {
        assert_eq!(longest_in_diet_run([true, true, false, true]), 2);
    }

    #[test]
    fn run_over_an_unbroken_sequence() {
        assert_eq!(longest_in_diet_run([true, true, true]), 3);
    }

    #[test]
    fn run_over_only_off_diet_meals_is_zero() {
        assert_eq!(longest_in_diet_run([false, false]), 0);
    }

    #[test]
    fn run_over_nothing_is_zero() {
        assert_eq!(longest_in_diet_run(std::iter::empty()), 0);
    }

    #[test]
    fn best_run_can_come_last() {
        assert_eq!(
            longest_in_diet_run([true, false, true, false, true, true, true]),
            3
        );
    }

    #[test]
    fn counter_does_not_survive_a_gap() {
        // Would be 4 under a no-reset policy; consecutive means contiguous.
        assert_eq!(longest_in_diet_run([true, true, false, true, true]), 2);
    }

    #[test]
    fn summary_partitions_the_meals() {
        let meals = meals_from_flags(&[true, false, true, true, false]);
        let summary = summarize(&meals);
        assert_eq!(summary.total_amount_meal, 5);
        assert_eq!(summary.total_amount_meal_in_diet, 3);
        assert_eq!(summary.total_amount_meal_out_diet, 2);
        assert_eq!(
            summary.total_amount_meal_in_diet + summary.total_amount_meal_out_diet,
            summary.total_amount_meal
        );
        assert_eq!(summary.best_sequence_meal_in_diet, 2);
    }

    #[test]
    fn summary_of_no_meals_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_amount_meal, 0);
        assert_eq!(summary.total_amount_meal_in_diet, 0);
        assert_eq!(summary.total_amount_meal_out_diet, 0);
        assert_eq!(summary.best_sequence_meal_in_diet, 0);
    }

    #[test]
    fn summary_uses_the_wire_field_names() {
        let json = serde_json::to_value(summarize(&meals_from_flags(&[true]))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalAmountMeal": 1,
                "totalAmountMealInDiet": 1,
                "totalAmountMealOutDiet": 0,
                "bestSequenceMealInDiet": 1
            })
        );
    }
}

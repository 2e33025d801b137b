//! Post-parse checks on model output.
//!
//! The realism clamp runs on every nutrition record before it reaches a
//! caller, whichever path produced it. The coverage check decides which
//! model-written recipes are shown at all.

use regex::Regex;
use std::sync::LazyLock;

use crate::classifier::contains_any;
use crate::models::{Level, NutritionData, Recipe};

pub const MIN_CALORIES: f64 = 100.0;
pub const MAX_CALORIES: f64 = 1000.0;
pub const MAX_PROTEIN: f64 = 50.0;
pub const MAX_FAT: f64 = 50.0;
pub const MAX_CARBS: f64 = 100.0;
pub const MAX_FIBER: f64 = 25.0;
pub const MAX_SUGAR: f64 = 50.0;
pub const MAX_SODIUM: f64 = 2500.0;

/// Above this the response is treated as nonsense rather than clamped.
pub const IMPLAUSIBLE_CALORIES: f64 = 5000.0;

/// Foods that really can come in under the calorie floor.
const VERY_LOW_CALORIE_FOODS: &[&str] = &["celery", "lettuce", "cucumber", "water"];
/// Descriptions of whole meals, which may exceed the calorie ceiling.
const FULL_MEAL_WORDS: &[&str] = &["meal", "dinner", "lunch", "breakfast"];

const VITAMIN_A_FOODS: &[&str] = &[
    "carrot",
    "sweet potato",
    "spinach",
    "kale",
    "liver",
    "pumpkin",
    "butternut squash",
];
const VITAMIN_C_FOODS: &[&str] = &[
    "orange",
    "lemon",
    "kiwi",
    "strawberry",
    "bell pepper",
    "broccoli",
    "brussels sprouts",
    "grapefruit",
];
const VITAMIN_D_FOODS: &[&str] = &["fish", "salmon", "egg", "mushroom"];
const CALCIUM_FOODS: &[&str] = &[
    "milk", "cheese", "yogurt", "tofu", "kale", "sardines", "almonds", "fortified",
];
const IRON_FOODS: &[&str] = &[
    "beef", "spinach", "lentil", "bean", "tofu", "quinoa", "fortified", "liver",
];
const POTASSIUM_FOODS: &[&str] = &[
    "banana",
    "potato",
    "avocado",
    "spinach",
    "sweet potato",
    "yogurt",
    "salmon",
    "beans",
];

static QUANTITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*\d+(?:[./]\d+)?\s*(?:cups?|tablespoons?|teaspoons?|tbsp|tsp|oz|ounces?|pounds?|lbs?|grams?|g|ml|l|liters?|pieces?|slices?)\b\s*",
    )
    .expect("Invalid quantity prefix regex")
});

/// Raises vitamin and mineral levels to `high` for foods known to be rich
/// in them. Every other level is left alone.
pub fn apply_micronutrient_overrides(data: &mut NutritionData, description: &str) {
    let lowered = description.to_lowercase();

    if contains_any(&lowered, VITAMIN_A_FOODS) {
        data.vitamins.a = Level::High;
    }
    if contains_any(&lowered, VITAMIN_C_FOODS) {
        data.vitamins.c = Level::High;
    }
    if contains_any(&lowered, VITAMIN_D_FOODS) {
        data.vitamins.d = Level::High;
    }
    if contains_any(&lowered, CALCIUM_FOODS) {
        data.minerals.calcium = Level::High;
    }
    if contains_any(&lowered, IRON_FOODS) {
        data.minerals.iron = Level::High;
    }
    if contains_any(&lowered, POTASSIUM_FOODS) {
        data.minerals.potassium = Level::High;
    }
}

/// Pulls every numeric field into its plausible range, then applies the
/// micronutrient overrides. Running it twice changes nothing further.
pub fn clamp_nutrition(mut data: NutritionData, description: &str) -> NutritionData {
    let lowered = description.to_lowercase();

    let mut calories = non_negative(data.calories);
    if !contains_any(&lowered, VERY_LOW_CALORIE_FOODS) {
        calories = calories.max(MIN_CALORIES);
    }
    if !contains_any(&lowered, FULL_MEAL_WORDS) {
        calories = calories.min(MAX_CALORIES);
    }
    data.calories = calories;

    data.protein = non_negative(data.protein).min(MAX_PROTEIN);
    data.fat = non_negative(data.fat).min(MAX_FAT);
    data.carbs = non_negative(data.carbs).min(MAX_CARBS);
    data.fiber = non_negative(data.fiber).min(MAX_FIBER);
    data.sugar = non_negative(data.sugar).min(MAX_SUGAR);
    data.sodium = non_negative(data.sodium).min(MAX_SODIUM);

    if data.portion_size.trim().is_empty() {
        data.portion_size = NutritionData::DEFAULT_PORTION.to_string();
    }

    apply_micronutrient_overrides(&mut data, description);
    data
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Rejects model nutrition the clamp cannot sanely repair.
pub fn check_plausibility(data: &NutritionData) -> Result<(), String> {
    let macros = [data.calories, data.protein, data.fat, data.carbs];
    if macros.iter().all(|value| *value <= 0.0 || !value.is_finite()) {
        return Err("every macronutrient is zero".to_string());
    }
    if data.calories > IMPLAUSIBLE_CALORIES {
        return Err(format!(
            "{} kcal is not a plausible single portion",
            data.calories
        ));
    }
    Ok(())
}

/// Reduces an ingredient to lowercase letters and single spaces, after
/// dropping a leading quantity and unit ("2 cups rice" becomes "rice").
/// Other characters are removed, so "sun-dried" becomes "sundried".
pub fn normalize_ingredient(raw: &str) -> String {
    let without_quantity = QUANTITY_PREFIX.replace(raw, "");
    letters_only(&without_quantity)
}

fn letters_only(text: &str) -> String {
    let letters: String = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    letters
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when every user ingredient appears in the recipe's ingredient text.
pub fn covers_ingredients(recipe: &Recipe, normalized_user_items: &[String]) -> bool {
    let recipe_text = letters_only(&recipe.ingredients.join(" "));
    normalized_user_items
        .iter()
        .filter(|item| !item.is_empty())
        .all(|item| recipe_text.contains(item.as_str()))
}

/// Keeps only the recipes that mention every user ingredient.
pub fn filter_covered(recipes: Vec<Recipe>, user_items: &[String]) -> Vec<Recipe> {
    let normalized: Vec<String> = user_items
        .iter()
        .map(|item| normalize_ingredient(item))
        .collect();
    recipes
        .into_iter()
        .filter(|recipe| covers_ingredients(recipe, &normalized))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Minerals, RecipeNutrition, Vitamins};

    fn nutrition(calories: f64) -> NutritionData {
        NutritionData {
            calories,
            protein: 10.0,
            fat: 10.0,
            carbs: 10.0,
            fiber: 2.0,
            sugar: 2.0,
            sodium: 100.0,
            vitamins: Vitamins::default(),
            minerals: Minerals::default(),
            portion_size: "1 serving".to_string(),
            notes: String::new(),
        }
    }

    fn recipe(ingredients: &[&str]) -> Recipe {
        Recipe {
            title: "Test".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec!["Cook".to_string()],
            nutrition: RecipeNutrition::default(),
            cooking_time: "10 minutes".to_string(),
            servings: 2,
        }
    }

    #[test]
    fn test_calorie_floor_and_ceiling() {
        assert_eq!(clamp_nutrition(nutrition(20.0), "plain rice").calories, 100.0);
        assert_eq!(clamp_nutrition(nutrition(20.0), "celery sticks").calories, 20.0);
        assert_eq!(clamp_nutrition(nutrition(1800.0), "large pizza").calories, 1000.0);
        assert_eq!(
            clamp_nutrition(nutrition(1800.0), "thanksgiving dinner").calories,
            1800.0
        );
    }

    #[test]
    fn test_macro_ceilings_and_negatives() {
        let mut data = nutrition(400.0);
        data.protein = 80.0;
        data.fat = -5.0;
        data.carbs = 150.0;
        data.fiber = f64::NAN;
        data.sugar = 70.0;
        data.sodium = 9000.0;
        let clamped = clamp_nutrition(data, "protein shake");
        assert_eq!(clamped.protein, MAX_PROTEIN);
        assert_eq!(clamped.fat, 0.0);
        assert_eq!(clamped.carbs, MAX_CARBS);
        assert_eq!(clamped.fiber, 0.0);
        assert_eq!(clamped.sugar, MAX_SUGAR);
        assert_eq!(clamped.sodium, MAX_SODIUM);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let mut data = nutrition(3000.0);
        data.protein = 120.0;
        data.vitamins.d = Level::None;
        for description in ["salmon with spinach", "cucumber", "full breakfast", "cake"] {
            let once = clamp_nutrition(data.clone(), description);
            let twice = clamp_nutrition(once.clone(), description);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut data = nutrition(300.0);
        data.vitamins.a = Level::None;
        data.vitamins.d = Level::Low;
        data.minerals.iron = Level::Low;
        let clamped = clamp_nutrition(data, "Beef stew with carrots and mushrooms");
        assert_eq!(clamped.vitamins.a, Level::High);
        assert_eq!(clamped.vitamins.d, Level::High);
        assert_eq!(clamped.minerals.iron, Level::High);
        assert_eq!(clamped.minerals.calcium, Minerals::DEFAULT_CALCIUM);
    }

    #[test]
    fn test_plausibility_gate() {
        let mut zeros = nutrition(0.0);
        zeros.protein = 0.0;
        zeros.fat = 0.0;
        zeros.carbs = 0.0;
        assert!(check_plausibility(&zeros).is_err());
        assert!(check_plausibility(&nutrition(6000.0)).is_err());
        assert!(check_plausibility(&nutrition(1500.0)).is_ok());
    }

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(normalize_ingredient("2 cups Brown Rice"), "brown rice");
        assert_eq!(normalize_ingredient("1/2 tsp salt"), "salt");
        assert_eq!(normalize_ingredient("3 eggs"), "eggs");
        assert_eq!(normalize_ingredient("2 garlic cloves"), "garlic cloves");
        assert_eq!(normalize_ingredient("Spinach!"), "spinach");
        assert_eq!(normalize_ingredient("sun-dried tomatoes"), "sundried tomatoes");
        assert_eq!(normalize_ingredient("Whole-Wheat bread"), "wholewheat bread");
    }

    #[test]
    fn test_filter_covered_drops_recipes_missing_an_ingredient() {
        let recipes = vec![
            recipe(&["2 chicken breasts", "1 cup rice", "1 tbsp olive oil"]),
            recipe(&["2 chicken breasts", "1 cup quinoa"]),
        ];
        let user = vec!["chicken".to_string(), "2 cups rice".to_string()];
        let kept = filter_covered(recipes, &user);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].ingredients.iter().any(|i| i.contains("rice")));
    }

    #[test]
    fn test_filter_covered_ignores_hyphens() {
        let recipes = vec![
            recipe(&["1/2 cup sundried tomatoes", "8 oz pasta"]),
            recipe(&["1/2 cup sun-dried tomatoes", "8 oz pasta"]),
            recipe(&["2 fresh tomatoes", "8 oz pasta"]),
        ];
        let user = vec!["sun-dried tomatoes".to_string(), "pasta".to_string()];
        assert_eq!(filter_covered(recipes, &user).len(), 2);
    }
}

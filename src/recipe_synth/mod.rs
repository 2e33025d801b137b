//! Offline recipe generation, used when the model cannot produce usable
//! recipes.
//!
//! Template recipes come first, in table order. When fewer than two
//! templates apply, generic recipes built from a small vocabulary fill the
//! remaining slots.

pub mod generic;
pub mod quantities;
pub mod templates;

use rand::Rng;

use crate::models::{MealType, Recipe};
use crate::validation::normalize_ingredient;

pub use generic::{generic_recipe, request_rng, DishKind};
pub use templates::{matching_recipes, Pantry};

/// Number of recipes every request returns.
pub const RECIPES_PER_REQUEST: usize = 2;

const DUPLICATE_PREFIX: &str = "Alternative ";

/// Builds exactly [`RECIPES_PER_REQUEST`] recipes from the user's items.
///
/// The template portion is deterministic; only the generic filler draws
/// from `rng`.
pub fn synthesize<R: Rng + ?Sized>(items: &[String], meal: MealType, rng: &mut R) -> Vec<Recipe> {
    let pantry = Pantry::new(items, meal);
    let mut recipes = matching_recipes(&pantry, RECIPES_PER_REQUEST);

    let mut kinds = dish_kinds(meal).into_iter().skip(recipes.len());
    while recipes.len() < RECIPES_PER_REQUEST {
        let mut kind = kinds.next().unwrap_or(DishKind::Main);
        // two salads side by side read as the same dish
        if kind == DishKind::Side && recipes.iter().any(|recipe| recipe.title.contains("Salad")) {
            kind = DishKind::Main;
        }
        recipes.push(generic_recipe(items, kind, rng));
    }

    recipes.truncate(RECIPES_PER_REQUEST);
    disambiguate_titles(&mut recipes);
    recipes
}

fn dish_kinds(meal: MealType) -> [DishKind; 2] {
    match meal {
        MealType::Breakfast => [DishKind::Breakfast, DishKind::Side],
        MealType::Snack => [DishKind::Side, DishKind::Dessert],
        MealType::Lunch | MealType::Dinner => [DishKind::Main, DishKind::Side],
    }
}

/// Prefixes later recipes whose title repeats an earlier one.
pub fn disambiguate_titles(recipes: &mut [Recipe]) {
    let mut seen: Vec<String> = Vec::with_capacity(recipes.len());
    for recipe in recipes.iter_mut() {
        while seen.contains(&recipe.title) {
            recipe.title = format!("{DUPLICATE_PREFIX}{}", recipe.title);
        }
        seen.push(recipe.title.clone());
    }
}

/// "2 cups brown rice" becomes "Brown Rice".
pub(crate) fn display_name(item: &str) -> String {
    let name = normalize_ingredient(item);
    if name.is_empty() {
        title_case(item.trim())
    } else {
        title_case(&name)
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::filter_covered;

    fn items(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_always_two_recipes() {
        let inputs = [
            items(&[]),
            items(&["saffron"]),
            items(&["eggs"]),
            items(&["chicken", "rice", "broccoli"]),
        ];
        for user in &inputs {
            for meal in MealType::ALL {
                let recipes = synthesize(user, meal, &mut request_rng(Some(11)));
                assert_eq!(recipes.len(), RECIPES_PER_REQUEST);
                for recipe in &recipes {
                    assert!(!recipe.title.is_empty());
                    assert!(!recipe.ingredients.is_empty());
                    assert!(!recipe.steps.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_fallback_recipes_use_every_item() {
        let user = items(&["quinoa", "saffron", "kale"]);
        let recipes = synthesize(&user, MealType::Dinner, &mut request_rng(Some(5)));
        assert_eq!(filter_covered(recipes, &user).len(), RECIPES_PER_REQUEST);
    }

    #[test]
    fn test_template_part_ignores_the_seed() {
        let user = items(&["eggs", "spinach"]);
        let first = synthesize(&user, MealType::Lunch, &mut request_rng(Some(1)));
        let second = synthesize(&user, MealType::Lunch, &mut request_rng(Some(99)));
        assert_eq!(first, second);
        assert_eq!(first[0].title, "Spinach Omelette");
    }

    #[test]
    fn test_generic_filler_is_seeded() {
        let user = items(&["saffron"]);
        let first = synthesize(&user, MealType::Snack, &mut request_rng(Some(42)));
        let second = synthesize(&user, MealType::Snack, &mut request_rng(Some(42)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_titles_are_prefixed() {
        let user = items(&["saffron"]);
        let mut recipes = synthesize(&user, MealType::Lunch, &mut request_rng(Some(3)));
        recipes[1].title = recipes[0].title.clone();
        disambiguate_titles(&mut recipes);
        assert_eq!(recipes[1].title, format!("Alternative {}", recipes[0].title));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("2 cups brown rice"), "Brown Rice");
        assert_eq!(display_name("cheddar cheese"), "Cheddar Cheese");
        assert_eq!(display_name("42"), "42");
    }
}

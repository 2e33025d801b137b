use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::display_name;
use super::quantities::format_ingredient;
use crate::models::{Recipe, RecipeNutrition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishKind {
    Main,
    Side,
    Dessert,
    Breakfast,
}

struct Vocabulary {
    methods: &'static [&'static str],
    nouns: &'static [&'static str],
    cooking_time: &'static str,
    servings: u32,
    base: RecipeNutrition,
}

impl DishKind {
    fn vocabulary(&self) -> Vocabulary {
        match self {
            DishKind::Main => Vocabulary {
                methods: &[
                    "Roasted",
                    "Pan-Seared",
                    "Grilled",
                    "Baked",
                    "Stir-Fried",
                    "Slow-Cooked",
                ],
                nouns: &["Delight", "Special", "Medley", "Fusion Dish", "Creation"],
                cooking_time: "30 minutes",
                servings: 2,
                base: RecipeNutrition::new(350.0, 25.0, 15.0, 30.0),
            },
            DishKind::Side => Vocabulary {
                methods: &["Fresh", "Simple", "Zesty", "Savory", "Hearty"],
                nouns: &["Salad", "Side", "Mix", "Medley", "Combo"],
                cooking_time: "15 minutes",
                servings: 4,
                base: RecipeNutrition::new(150.0, 5.0, 8.0, 20.0),
            },
            DishKind::Dessert => Vocabulary {
                methods: &["Sweet", "Decadent", "Creamy", "Delightful"],
                nouns: &["Treat", "Dessert", "Delight", "Surprise"],
                cooking_time: "25 minutes",
                servings: 4,
                base: RecipeNutrition::new(300.0, 5.0, 15.0, 40.0),
            },
            DishKind::Breakfast => Vocabulary {
                methods: &["Morning", "Sunrise", "Energizing", "Hearty"],
                nouns: &["Breakfast", "Start", "Meal", "Plate"],
                cooking_time: "15 minutes",
                servings: 2,
                base: RecipeNutrition::new(400.0, 15.0, 20.0, 35.0),
            },
        }
    }
}

/// Per-ingredient additions to a dish's base nutrition. First matching row
/// wins for each ingredient.
const INGREDIENT_DELTAS: &[(&[&str], RecipeNutrition)] = &[
    (&["egg"], RecipeNutrition::new(70.0, 6.0, 5.0, 0.0)),
    (&["chicken", "turkey"], RecipeNutrition::new(120.0, 25.0, 3.0, 0.0)),
    (&["beef", "steak"], RecipeNutrition::new(150.0, 20.0, 8.0, 0.0)),
    (&["fish", "salmon"], RecipeNutrition::new(130.0, 22.0, 5.0, 0.0)),
    (&["pork", "ham"], RecipeNutrition::new(140.0, 18.0, 7.0, 0.0)),
    (&["rice"], RecipeNutrition::new(130.0, 3.0, 0.0, 28.0)),
    (&["pasta"], RecipeNutrition::new(150.0, 5.0, 1.0, 30.0)),
    (&["bread"], RecipeNutrition::new(80.0, 3.0, 1.0, 15.0)),
    (&["cheese"], RecipeNutrition::new(100.0, 7.0, 8.0, 1.0)),
    (&["milk"], RecipeNutrition::new(50.0, 3.0, 2.0, 5.0)),
    (&["butter"], RecipeNutrition::new(100.0, 0.0, 11.0, 0.0)),
    (&["oil"], RecipeNutrition::new(120.0, 0.0, 14.0, 0.0)),
    (&["sugar", "honey"], RecipeNutrition::new(50.0, 0.0, 0.0, 13.0)),
    (&["potato"], RecipeNutrition::new(130.0, 3.0, 0.0, 30.0)),
];

/// Vegetables and herbs, mostly.
const DEFAULT_DELTA: RecipeNutrition = RecipeNutrition::new(25.0, 1.0, 0.0, 5.0);

const STAPLES: [&str; 3] = [
    "Salt and pepper to taste",
    "2 tbsp olive oil or butter",
    "Fresh herbs for garnish (optional)",
];

/// A fresh random source for one request, seeded when a seed is given.
pub fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds a plausible recipe around the user's items with a title drawn
/// from the dish kind's vocabulary.
pub fn generic_recipe<R: Rng + ?Sized>(items: &[String], kind: DishKind, rng: &mut R) -> Recipe {
    let vocabulary = kind.vocabulary();
    let method = vocabulary.methods.choose(rng).copied().unwrap_or("Simple");
    let noun = vocabulary.nouns.choose(rng).copied().unwrap_or("Dish");
    let lead = items
        .first()
        .map(|item| display_name(item))
        .unwrap_or_else(|| "Pantry".to_string());

    let mut ingredients: Vec<String> = items.iter().map(|item| format_ingredient(item)).collect();
    ingredients.extend(STAPLES.iter().map(|staple| staple.to_string()));

    Recipe {
        title: format!("{method} {lead} {noun}"),
        ingredients,
        steps: steps_for(method, items),
        nutrition: estimate_nutrition(items, vocabulary.base),
        cooking_time: vocabulary.cooking_time.to_string(),
        servings: vocabulary.servings,
    }
}

fn estimate_nutrition(items: &[String], base: RecipeNutrition) -> RecipeNutrition {
    let mut total = base;
    for item in items {
        let lowered = item.to_lowercase();
        let delta = INGREDIENT_DELTAS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map(|(_, delta)| *delta)
            .unwrap_or(DEFAULT_DELTA);
        total.calories += delta.calories;
        total.protein += delta.protein;
        total.fat += delta.fat;
        total.carbs += delta.carbs;
    }
    RecipeNutrition::new(
        (total.calories / 10.0).round() * 10.0,
        total.protein.round(),
        total.fat.round(),
        total.carbs.round(),
    )
}

fn steps_for(method: &str, items: &[String]) -> Vec<String> {
    let all = if items.is_empty() {
        "your ingredients".to_string()
    } else {
        items.join(", ")
    };
    let first = items
        .first()
        .map(String::as_str)
        .unwrap_or("the main ingredient");

    match method {
        "Roasted" | "Baked" => vec![
            "Preheat oven to 375°F (190°C).".to_string(),
            "Prepare all ingredients: wash, chop, and measure as needed.".to_string(),
            format!("In a bowl, combine {all} with olive oil, salt, and pepper."),
            "Transfer to a baking dish or sheet pan.".to_string(),
            "Bake for 20-25 minutes until cooked through and slightly browned.".to_string(),
            "Let rest for 5 minutes, garnish with fresh herbs and serve hot.".to_string(),
        ],
        "Pan-Seared" | "Stir-Fried" => vec![
            "Prepare all ingredients: wash, chop, and measure as needed.".to_string(),
            "Heat oil in a large skillet or wok over medium-high heat.".to_string(),
            format!("Add {first} and cook for 2-3 minutes until it starts to brown."),
            "Add the remaining ingredients and stir frequently.".to_string(),
            "Cook for another 5-7 minutes until everything is cooked through.".to_string(),
            "Season with salt and pepper and serve hot.".to_string(),
        ],
        "Grilled" => vec![
            "Preheat grill to medium-high heat.".to_string(),
            format!("In a bowl, toss {all} with olive oil, salt, and pepper."),
            "Place on the grill, directly or in a grill basket.".to_string(),
            "Grill for 8-10 minutes, turning occasionally, until cooked through.".to_string(),
            "Let rest for 3 minutes and serve hot.".to_string(),
        ],
        "Fresh" | "Simple" | "Zesty" => vec![
            "Wash and dry all ingredients thoroughly.".to_string(),
            format!("Chop {all} into bite-sized pieces."),
            "Whisk olive oil, a splash of lemon juice or vinegar, salt, and pepper.".to_string(),
            "Pour the dressing over the ingredients and toss gently to coat.".to_string(),
            "Let sit for 5 minutes so the flavors meld, then serve.".to_string(),
        ],
        "Sweet" | "Decadent" | "Creamy" => vec![
            "Prepare all ingredients: wash, measure, and chop as needed.".to_string(),
            format!("In a mixing bowl, combine {all}."),
            "Add sweetener (sugar, honey, or maple syrup) to taste.".to_string(),
            "Transfer to serving dishes and refrigerate for at least 30 minutes.".to_string(),
            "Garnish with mint or a sprinkle of cinnamon before serving.".to_string(),
        ],
        "Morning" | "Sunrise" | "Energizing" => vec![
            "Prepare all ingredients: wash, chop, and measure as needed.".to_string(),
            "Heat a non-stick pan with butter or oil over medium heat.".to_string(),
            format!("Add {first} and cook for 3-4 minutes, stirring occasionally."),
            "Add the remaining ingredients and cook for another 2-3 minutes.".to_string(),
            "Season with salt and pepper and serve hot.".to_string(),
        ],
        _ => vec![
            "Prepare all ingredients: wash, chop, and measure as needed.".to_string(),
            format!("Combine {all} in a suitable pot or pan."),
            "Cook using your preferred method until done to your liking.".to_string(),
            "Season with salt and pepper to taste.".to_string(),
            "Let rest for a few minutes, garnish as desired and serve.".to_string(),
        ],
    }
}

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ParseError;
use crate::extraction::{self, Candidate};
use crate::models::{Recipe, RecipeNutrition};

pub const DEFAULT_COOKING_TIME: &str = "30 minutes";
/// Servings assumed when a JSON recipe omits them.
pub const DEFAULT_JSON_SERVINGS: u32 = 2;
/// Servings assumed when a labeled recipe omits them.
pub const DEFAULT_LABELED_SERVINGS: u32 = 4;
pub const DEFAULT_LABELED_TITLE: &str = "Gourmet Recipe";
/// Used field by field when a labeled nutrition section is present but
/// incomplete.
pub const LABELED_NUTRITION_DEFAULTS: RecipeNutrition =
    RecipeNutrition::new(350.0, 20.0, 15.0, 30.0);
const MAX_LABELED_RECIPES: usize = 2;

static BLOCK_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t*]*(?:recipe\s+\d+\s*:|recipe:|#{1,3}[ \t])")
        .expect("Invalid recipe block regex")
});

static SECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\s*]*(?:ingredients|steps|instructions|directions|method|nutrition|cook(?:ing)? time|total time|servings|serves|yields|notes)\b",
    )
    .expect("Invalid section line regex")
});

static TITLE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:title|recipe\s*\d*)\s*:\s*").expect("Invalid title label regex")
});

static INGREDIENTS_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t#*]*ingredients\b:?").expect("Invalid ingredients regex")
});

static INGREDIENTS_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t#*]*(?:steps|instructions|directions|method|nutrition|cook(?:ing)? time|total time|servings|serves|yields)\b",
    )
    .expect("Invalid ingredients stop regex")
});

static STEPS_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t#*]*(?:steps|instructions|directions|method)\b:?")
        .expect("Invalid steps regex")
});

static STEPS_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t#*]*(?:nutrition|cook(?:ing)? time|total time|servings|serves|yields|notes)\b",
    )
    .expect("Invalid steps stop regex")
});

static NUTRITION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t#*]*nutrition(?:\s+facts|\s+information)?\b:?")
        .expect("Invalid nutrition regex")
});

static NUTRITION_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t#*]*(?:cook(?:ing)? time|total time|servings|serves|yields|notes)\b")
        .expect("Invalid nutrition stop regex")
});

static CALORIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)calories:?\s*(\d+(?:\.\d+)?)").expect("Invalid calories regex")
});
static PROTEIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)protein:?\s*(\d+(?:\.\d+)?)").expect("Invalid protein regex")
});
static FAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fat:?\s*(\d+(?:\.\d+)?)").expect("Invalid fat regex"));
static CARBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)carb(?:ohydrate)?s?:?\s*(\d+(?:\.\d+)?)").expect("Invalid carbs regex")
});

static COOK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:cook(?:ing)?|total) time:?\s*([^\n]+)").expect("Invalid time regex")
});

static SERVINGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:servings|yields|serves):?\s*(\d+)").expect("Invalid servings regex")
});

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+[.)]\s+|[-*•]\s*)").expect("Invalid list marker regex")
});

/// Turns raw model output into recipes.
///
/// JSON is tried first (a bare array, an object with a `recipes` array, or
/// a single recipe object). If that yields nothing usable the labeled-field
/// extractor runs over the same text.
pub fn parse_recipes(raw: &str) -> Result<Candidate<Vec<Recipe>>, ParseError> {
    match parse_json(raw) {
        Ok(recipes) => {
            debug!(count = recipes.len(), "Parsed recipes from JSON payload");
            Ok(Candidate::json(recipes))
        }
        Err(json_error) => {
            debug!(error = %json_error, "JSON recipe parse failed, trying labeled fields");
            let recipes = parse_labeled(raw)?;
            debug!(count = recipes.len(), "Parsed recipes from labeled fields");
            Ok(Candidate::labeled(recipes))
        }
    }
}

fn parse_json(raw: &str) -> Result<Vec<Recipe>, ParseError> {
    let from_array =
        extraction::extract_json(raw, '[', ']').and_then(|value| recipes_from_document(&value));

    match from_array {
        Ok(recipes) => Ok(recipes),
        Err(array_error) => {
            let from_object = extraction::extract_json(raw, '{', '}')
                .and_then(|value| recipes_from_document(&value));
            match (from_object, array_error) {
                (Ok(recipes), _) => Ok(recipes),
                (Err(object_error), ParseError::NoStructuredDataFound) => Err(object_error),
                (Err(_), array_error) => Err(array_error),
            }
        }
    }
}

fn recipes_from_document(document: &Value) -> Result<Vec<Recipe>, ParseError> {
    let entries: Vec<&Value> = match document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("recipes") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![document],
        },
        _ => {
            return Err(ParseError::StructureFailure(
                "expected a recipe array or object".to_string(),
            ))
        }
    };

    let total = entries.len();
    let recipes: Vec<Recipe> = entries.into_iter().filter_map(recipe_from_value).collect();
    if recipes.len() < total {
        debug!(
            skipped = total - recipes.len(),
            "Skipped recipe entries missing a title, ingredients or steps"
        );
    }
    if recipes.is_empty() {
        return Err(ParseError::StructureFailure(
            "no complete recipe in payload".to_string(),
        ));
    }
    Ok(recipes)
}

fn recipe_from_value(value: &Value) -> Option<Recipe> {
    let entry = value.as_object()?;

    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())?
        .to_string();

    let ingredients = string_list(entry.get("ingredients"));
    let steps = string_list(entry.get("steps"));
    if ingredients.is_empty() || steps.is_empty() {
        return None;
    }

    let nutrition = entry
        .get("nutrition")
        .map(|n| {
            RecipeNutrition::new(
                extraction::coerce_number(n.get("calories")),
                extraction::coerce_number(n.get("protein")),
                extraction::coerce_number(n.get("fat")),
                extraction::coerce_number(n.get("carbs")),
            )
        })
        .unwrap_or_default();

    let cooking_time = entry
        .get("cookingTime")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|time| !time.is_empty())
        .unwrap_or(DEFAULT_COOKING_TIME)
        .to_string();

    let servings = extraction::coerce_number(entry.get("servings")).round();
    let servings = if servings >= 1.0 {
        servings as u32
    } else {
        DEFAULT_JSON_SERVINGS
    };

    Some(Recipe {
        title,
        ingredients,
        steps,
        nutrition,
        cooking_time,
        servings,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Best-effort extraction from prose that labels its sections.
fn parse_labeled(raw: &str) -> Result<Vec<Recipe>, ParseError> {
    let text = extraction::strip_code_fences(raw);
    if !INGREDIENTS_START.is_match(&text) {
        return Err(ParseError::NoStructuredDataFound);
    }

    let recipes: Vec<Recipe> = split_blocks(&text)
        .iter()
        .filter_map(|block| labeled_recipe(block))
        .take(MAX_LABELED_RECIPES)
        .collect();

    if recipes.is_empty() {
        return Err(ParseError::StructureFailure(
            "no labeled recipe with both ingredients and steps".to_string(),
        ));
    }
    Ok(recipes)
}

/// Splits at recipe markers and headings. A heading that only opens a
/// section (`## Ingredients`) stays with the recipe it belongs to.
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    for piece in BLOCK_SPLIT.split(text) {
        if piece.trim().is_empty() {
            continue;
        }
        let opens_section = piece
            .lines()
            .find(|line| !line.trim().is_empty())
            .is_some_and(|line| SECTION_LINE.is_match(line));
        match blocks.last_mut() {
            Some(previous) if opens_section => {
                previous.push('\n');
                previous.push_str(piece);
            }
            _ => blocks.push(piece.to_string()),
        }
    }
    blocks
}

fn labeled_recipe(block: &str) -> Option<Recipe> {
    let ingredients = extraction::section(block, &INGREDIENTS_START, &INGREDIENTS_STOP)
        .map(list_lines)
        .unwrap_or_default();
    let steps = extraction::section(block, &STEPS_START, &STEPS_STOP)
        .map(list_lines)
        .unwrap_or_default();
    if ingredients.is_empty() || steps.is_empty() {
        return None;
    }

    let nutrition = match extraction::section(block, &NUTRITION_START, &NUTRITION_STOP) {
        Some(section) => RecipeNutrition::new(
            extraction::captured_number(&CALORIES, section)
                .unwrap_or(LABELED_NUTRITION_DEFAULTS.calories),
            extraction::captured_number(&PROTEIN, section)
                .unwrap_or(LABELED_NUTRITION_DEFAULTS.protein),
            extraction::captured_number(&FAT, section).unwrap_or(LABELED_NUTRITION_DEFAULTS.fat),
            extraction::captured_number(&CARBS, section)
                .unwrap_or(LABELED_NUTRITION_DEFAULTS.carbs),
        ),
        None => RecipeNutrition::default(),
    };

    let cooking_time = COOK_TIME
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_line(m.as_str()))
        .filter(|time| !time.is_empty())
        .unwrap_or_else(|| DEFAULT_COOKING_TIME.to_string());

    let servings = extraction::captured_number(&SERVINGS, block)
        .map(|n| n as u32)
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LABELED_SERVINGS);

    Some(Recipe {
        title: labeled_title(block),
        ingredients,
        steps,
        nutrition,
        cooking_time,
        servings,
    })
}

fn labeled_title(block: &str) -> String {
    block
        .lines()
        .map(clean_line)
        .find(|line| !line.is_empty())
        .filter(|line| !SECTION_LINE.is_match(line))
        .map(|line| TITLE_LABEL.replace(&line, "").trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_LABELED_TITLE.to_string())
}

fn list_lines(section: &str) -> Vec<String> {
    section
        .lines()
        .map(|line| clean_line(&LIST_MARKER.replace(line, "")))
        .filter(|line| !line.is_empty())
        .collect()
}

fn clean_line(line: &str) -> String {
    line.trim()
        .trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ParseRoute;

    const LABELED_RESPONSE: &str = "Here are two recipes for you.

Recipe 1: Spinach Omelette
Ingredients:
- 2 eggs
- 1 cup spinach
Steps:
1. Whisk the eggs.
2. Wilt the spinach and fold it into the eggs.
Nutrition: calories 250, protein 18
Cooking Time: 10 minutes
Servings: 1

Recipe 2: Egg Fried Rice
## Ingredients
- 1 cup rice
- 2 eggs
## Instructions
1. Cook the rice.
2. Scramble the eggs into it.
";

    #[test]
    fn test_parses_fenced_json_array() {
        let raw = r#"Sure! ```json
[
  {"title": "Herb Eggs", "ingredients": ["2 eggs", "1 tbsp chives"], "steps": ["Whisk", "Cook"],
   "nutrition": {"calories": 220, "protein": 14, "fat": 17, "carbs": 2},
   "cookingTime": "10 minutes", "servings": 2}
]
```"#;
        let candidate = parse_recipes(raw).unwrap();
        assert_eq!(candidate.route, ParseRoute::Json);
        assert_eq!(candidate.value.len(), 1);
        let recipe = &candidate.value[0];
        assert_eq!(recipe.title, "Herb Eggs");
        assert_eq!(recipe.nutrition, RecipeNutrition::new(220.0, 14.0, 17.0, 2.0));
        assert_eq!(recipe.cooking_time, "10 minutes");
    }

    #[test]
    fn test_accepts_recipes_wrapper_and_single_object() {
        let wrapped = r#"{"recipes": [{"title": "A", "ingredients": ["x"], "steps": ["y"]}]}"#;
        assert_eq!(parse_recipes(wrapped).unwrap().value[0].title, "A");

        let single = r#"{"title": "B", "ingredients": ["x", "z"], "steps": ["y"], "servings": 3}"#;
        let recipes = parse_recipes(single).unwrap().value;
        assert_eq!(recipes[0].title, "B");
        assert_eq!(recipes[0].servings, 3);
    }

    #[test]
    fn test_incomplete_entries_are_skipped_and_fields_defaulted() {
        let raw = r#"[
            {"title": "No Steps", "ingredients": ["x"], "steps": []},
            {"title": "", "ingredients": ["x"], "steps": ["y"]},
            {"title": "Keeper", "ingredients": ["rice", 5], "steps": ["boil"],
             "nutrition": {"calories": "300 kcal", "protein": -3, "fat": "lots"}}
        ]"#;
        let recipes = parse_recipes(raw).unwrap().value;
        assert_eq!(recipes.len(), 1);
        let recipe = &recipes[0];
        assert_eq!(recipe.title, "Keeper");
        assert_eq!(recipe.ingredients, vec!["rice"]);
        assert_eq!(recipe.nutrition, RecipeNutrition::new(300.0, 0.0, 0.0, 0.0));
        assert_eq!(recipe.cooking_time, DEFAULT_COOKING_TIME);
        assert_eq!(recipe.servings, DEFAULT_JSON_SERVINGS);
    }

    #[test]
    fn test_labeled_fallback_extracts_two_recipes() {
        let candidate = parse_recipes(LABELED_RESPONSE).unwrap();
        assert_eq!(candidate.route, ParseRoute::LabeledFields);
        let recipes = candidate.value;
        assert_eq!(recipes.len(), 2);

        let omelette = &recipes[0];
        assert_eq!(omelette.title, "Spinach Omelette");
        assert_eq!(omelette.ingredients, vec!["2 eggs", "1 cup spinach"]);
        assert_eq!(omelette.steps.len(), 2);
        assert_eq!(omelette.steps[0], "Whisk the eggs.");
        assert_eq!(
            omelette.nutrition,
            RecipeNutrition::new(250.0, 18.0, 15.0, 30.0)
        );
        assert_eq!(omelette.cooking_time, "10 minutes");
        assert_eq!(omelette.servings, 1);

        let rice = &recipes[1];
        assert_eq!(rice.title, "Egg Fried Rice");
        assert_eq!(rice.ingredients, vec!["1 cup rice", "2 eggs"]);
        assert_eq!(rice.steps, vec!["Cook the rice.", "Scramble the eggs into it."]);
        assert_eq!(rice.nutrition, RecipeNutrition::default());
        assert_eq!(rice.cooking_time, DEFAULT_COOKING_TIME);
        assert_eq!(rice.servings, DEFAULT_LABELED_SERVINGS);
    }

    #[test]
    fn test_labeled_blocks_without_steps_fail() {
        let raw = "Recipe: Toast\nIngredients:\n- bread\n";
        assert!(matches!(
            parse_recipes(raw),
            Err(ParseError::StructureFailure(_))
        ));
    }

    #[test]
    fn test_unstructured_text_fails() {
        assert_eq!(
            parse_recipes("I'm sorry, I can't help with that."),
            Err(ParseError::NoStructuredDataFound)
        );
    }
}

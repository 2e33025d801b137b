use crate::models::MealSelection;

const RECIPE_EXAMPLE: &str = r#"[
  {
    "title": "Fluffy Scrambled Eggs with Fresh Herbs",
    "ingredients": ["4 large eggs", "2 tbsp milk", "1 tbsp butter", "1 tbsp chives, chopped"],
    "steps": ["Crack the eggs into a bowl.", "Whisk in the milk and a pinch of salt."],
    "nutrition": {"calories": 220, "protein": 14, "fat": 17, "carbs": 2},
    "cookingTime": "10 minutes",
    "servings": 2
  }
]"#;

const NUTRITION_EXAMPLE: &str = r#"{
  "calories": 350,
  "protein": 20,
  "fat": 15,
  "carbs": 30,
  "fiber": 4,
  "sugar": 6,
  "sodium": 500,
  "vitamins": {"A": "medium", "C": "high", "D": "low"},
  "minerals": {"calcium": "medium", "iron": "low", "potassium": "medium"},
  "portionSize": "1 cup (240ml)",
  "notes": "Homemade preparation with standard ingredients."
}"#;

/// Asks for two recipes for the selected meals that use every ingredient.
pub fn recipe_prompt(ingredients: &[String], meals: &MealSelection) -> String {
    format!(
        "You are a professional chef and nutrition expert. Create exactly 2 detailed recipes \
for {meals} meals that MUST use ALL of these ingredients as main components: {list}.

Requirements:
1. Every listed ingredient must appear in each recipe's ingredient list.
2. Respond with a pure JSON array only. No markdown, no commentary.
3. Use the field names title, ingredients, steps, nutrition (calories, protein, fat, carbs), cookingTime and servings.
4. Respect any quantities given with the ingredients.
5. Give 5 to 7 cooking steps per recipe and realistic nutrition per serving.

Example:
{RECIPE_EXAMPLE}",
        meals = meals.describe(),
        list = ingredients.join(", "),
    )
}

/// Asks for a single nutrition object for one food description.
pub fn nutrition_prompt(description: &str) -> String {
    format!(
        "You are a nutritionist specialising in food composition. Analyse this food: \"{description}\".

Requirements:
1. Respond with a single pure JSON object only. No markdown, no commentary.
2. Numeric fields: calories (kcal), protein, fat, carbs, fiber, sugar (grams) and sodium (mg).
3. vitamins (A, C, D) and minerals (calcium, iron, potassium) use one of \"high\", \"medium\", \"low\" or \"none\".
4. State the portion the values refer to in portionSize.
5. Take stated quantities and cooking methods into account; fried food carries more fat than baked.
6. For mixed dishes give the combined values.

Example:
{NUTRITION_EXAMPLE}"
    )
}

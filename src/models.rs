use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct RecipeNutrition {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl RecipeNutrition {
    pub const fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    /// Cooking order matters.
    pub steps: Vec<String>,
    pub nutrition: RecipeNutrition,
    pub cooking_time: String,
    pub servings: u32,
}

/// Qualitative amount of a vitamin or mineral in a serving.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
    None,
}

impl Level {
    /// Parses a level name, ignoring case and surrounding whitespace.
    /// Anything outside the four known levels yields `None`.
    pub fn parse(raw: &str) -> Option<Level> {
        match raw.trim().to_lowercase().as_str() {
            "high" => Some(Level::High),
            "medium" => Some(Level::Medium),
            "low" => Some(Level::Low),
            "none" => Some(Level::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
            Level::None => "none",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Vitamins {
    #[serde(rename = "A")]
    pub a: Level,
    #[serde(rename = "C")]
    pub c: Level,
    #[serde(rename = "D")]
    pub d: Level,
}

impl Vitamins {
    pub const DEFAULT_A: Level = Level::Medium;
    pub const DEFAULT_C: Level = Level::Medium;
    pub const DEFAULT_D: Level = Level::Low;
}

impl Default for Vitamins {
    fn default() -> Self {
        Self {
            a: Self::DEFAULT_A,
            c: Self::DEFAULT_C,
            d: Self::DEFAULT_D,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Minerals {
    pub calcium: Level,
    pub iron: Level,
    pub potassium: Level,
}

impl Minerals {
    pub const DEFAULT_CALCIUM: Level = Level::Medium;
    pub const DEFAULT_IRON: Level = Level::Low;
    pub const DEFAULT_POTASSIUM: Level = Level::Medium;
}

impl Default for Minerals {
    fn default() -> Self {
        Self {
            calcium: Self::DEFAULT_CALCIUM,
            iron: Self::DEFAULT_IRON,
            potassium: Self::DEFAULT_POTASSIUM,
        }
    }
}

/// Nutrition estimate for one described portion of food.
///
/// Calories are kcal, sodium is mg, every other numeric field is grams.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionData {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub vitamins: Vitamins,
    pub minerals: Minerals,
    pub portion_size: String,
    pub notes: String,
}

impl NutritionData {
    pub const DEFAULT_PORTION: &'static str = "1 serving";
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn parse(raw: &str) -> Option<MealType> {
        let lowered = raw.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|meal| meal.as_str() == lowered)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The meal-type checkboxes a caller ticked. Unknown names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSelection {
    selected: Vec<MealType>,
}

impl MealSelection {
    /// Used whenever nothing is selected.
    pub const DEFAULT_MEAL: MealType = MealType::Lunch;

    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(meal: MealType) -> Self {
        Self {
            selected: vec![meal],
        }
    }

    /// Builds a selection from `(name, ticked)` pairs such as a form would submit.
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut selection = Self::default();
        for (name, ticked) in flags {
            if !ticked {
                continue;
            }
            if let Some(meal) = MealType::parse(name) {
                selection.select(meal);
            }
        }
        selection
    }

    pub fn select(&mut self, meal: MealType) {
        if !self.selected.contains(&meal) {
            self.selected.push(meal);
            self.selected.sort();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// First selected meal in breakfast, lunch, dinner, snack order.
    pub fn primary(&self) -> MealType {
        self.selected
            .first()
            .copied()
            .unwrap_or(Self::DEFAULT_MEAL)
    }

    /// Comma-joined names of all selected meals, for prompts.
    pub fn describe(&self) -> String {
        if self.selected.is_empty() {
            return Self::DEFAULT_MEAL.as_str().to_string();
        }
        self.selected
            .iter()
            .map(MealType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

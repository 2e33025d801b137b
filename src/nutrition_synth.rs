use regex::Regex;
use std::sync::LazyLock;

use crate::classifier::contains_any;
use crate::models::{Level, Minerals, NutritionData, Vitamins};
use crate::validation::apply_micronutrient_overrides;

/// The seven numeric fields of a nutrition record, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Profile {
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    fiber: f64,
    sugar: f64,
    sodium: f64,
}

impl Profile {
    const fn new(
        calories: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
        fiber: f64,
        sugar: f64,
        sodium: f64,
    ) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
            fiber,
            sugar,
            sodium,
        }
    }

    fn add(&mut self, delta: &Profile) {
        self.calories += delta.calories;
        self.protein += delta.protein;
        self.fat += delta.fat;
        self.carbs += delta.carbs;
        self.fiber += delta.fiber;
        self.sugar += delta.sugar;
        self.sodium += delta.sodium;
    }

    fn floor_at_zero(&mut self) {
        for field in self.fields_mut() {
            *field = field.max(0.0);
        }
    }

    fn scaled_and_rounded(mut self, factor: f64) -> Self {
        for field in self.fields_mut() {
            *field = (*field * factor).round();
        }
        self
    }

    fn fields_mut(&mut self) -> [&mut f64; 7] {
        [
            &mut self.calories,
            &mut self.protein,
            &mut self.fat,
            &mut self.carbs,
            &mut self.fiber,
            &mut self.sugar,
            &mut self.sodium,
        ]
    }
}

const BASE: Profile = Profile::new(300.0, 15.0, 12.0, 30.0, 3.0, 5.0, 400.0);
const BASE_NOTE: &str = "Analysis based on typical preparation.";

struct Tier {
    keywords: &'static [&'static str],
    profile: Profile,
    note: &'static str,
}

const LOW_CALORIE_FOODS: &[&str] = &[
    "salad",
    "vegetable",
    "fruit",
    "apple",
    "orange",
    "broccoli",
    "spinach",
    "lettuce",
    "tomato",
    "cucumber",
];

/// Checked in order; the first tier with a keyword hit replaces the base.
const TIERS: [Tier; 3] = [
    Tier {
        keywords: LOW_CALORIE_FOODS,
        profile: Profile::new(150.0, 5.0, 3.0, 15.0, 4.0, 8.0, 20.0),
        note: "Low calorie food with high vitamin content.",
    },
    Tier {
        keywords: &[
            "yogurt", "milk", "egg", "chicken", "fish", "turkey", "tofu", "lean",
        ],
        profile: Profile::new(250.0, 20.0, 10.0, 15.0, 1.0, 2.0, 200.0),
        note: "Good source of protein with moderate calories.",
    },
    Tier {
        keywords: &[
            "burger",
            "pizza",
            "fries",
            "fried",
            "cheese",
            "cream",
            "cake",
            "chocolate",
            "ice cream",
            "dessert",
            "butter",
            "oil",
        ],
        profile: Profile::new(500.0, 15.0, 25.0, 45.0, 2.0, 15.0, 800.0),
        note: "High calorie food with significant fat and carbohydrate content.",
    },
];

struct Adjustment {
    keywords: &'static [&'static str],
    delta: Profile,
    note: &'static str,
}

const HIGH_PROTEIN_FOODS: &[&str] = &[
    "chicken",
    "beef",
    "fish",
    "egg",
    "protein",
    "meat",
    "steak",
    "turkey",
    "tofu",
    "greek yogurt",
];

/// Each matching row adds its delta independently.
const ADJUSTMENTS: [Adjustment; 6] = [
    Adjustment {
        keywords: HIGH_PROTEIN_FOODS,
        delta: Profile::new(50.0, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        note: "Excellent source of protein.",
    },
    Adjustment {
        keywords: &[
            "cheese", "butter", "oil", "cream", "avocado", "nuts", "fried", "bacon", "sausage",
        ],
        delta: Profile::new(100.0, 0.0, 15.0, 0.0, 0.0, 0.0, 0.0),
        note: "Contains significant fat content.",
    },
    Adjustment {
        keywords: &[
            "bread", "pasta", "rice", "potato", "sugar", "cake", "cookie", "dessert", "sweet",
            "cereal", "oats",
        ],
        delta: Profile::new(80.0, 0.0, 0.0, 30.0, 0.0, 5.0, 0.0),
        note: "High in carbohydrates.",
    },
    Adjustment {
        keywords: &[
            "beans",
            "lentils",
            "whole grain",
            "bran",
            "oats",
            "broccoli",
            "berries",
            "pear",
            "apple",
            "avocado",
        ],
        delta: Profile::new(0.0, 0.0, 0.0, 0.0, 6.0, 0.0, 0.0),
        note: "Good source of dietary fiber.",
    },
    Adjustment {
        keywords: &[
            "candy",
            "chocolate",
            "cake",
            "ice cream",
            "soda",
            "juice",
            "honey",
            "syrup",
            "dessert",
            "sweet",
        ],
        delta: Profile::new(60.0, 0.0, 0.0, 0.0, 0.0, 20.0, 0.0),
        note: "Contains added sugars.",
    },
    Adjustment {
        keywords: &[
            "salt",
            "soy sauce",
            "processed",
            "canned",
            "bacon",
            "ham",
            "cheese",
            "pickle",
            "fast food",
            "snack",
        ],
        delta: Profile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 500.0),
        note: "High sodium content.",
    },
];

/// Cooking methods, first match only.
const COOKING_METHODS: [(&[&str], Profile, &str); 3] = [
    (
        &["fried"],
        Profile::new(100.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0),
        "Fried preparation adds additional fat and calories.",
    ),
    (
        &["baked", "grilled"],
        Profile::new(-30.0, 0.0, -3.0, 0.0, 0.0, 0.0, 0.0),
        "Baked/grilled preparation reduces fat content.",
    ),
    (
        &["boiled", "steamed"],
        Profile::new(-20.0, 0.0, -2.0, 0.0, 0.0, 0.0, 0.0),
        "Boiled/steamed preparation preserves nutrients with minimal added fat.",
    ),
];

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
    "strawberry",
    "kiwi",
    "bell pepper",
    "broccoli",
    "brussels sprouts",
    "grapefruit",
];
/// Moderate vitamin D sources. Fish, egg and mushroom are raised further by
/// the shared overrides.
const VITAMIN_D_FOODS: &[&str] = &[
    "fish", "egg", "mushroom", "milk", "yogurt", "fortified", "salmon", "tuna",
];

/// Units whose count scales the whole portion ("2 slices", "3 cups").
const COUNT_UNITS: &[&str] = &["cup", "slice", "bowl", "piece", "plate", "serving"];

/// Applied when a description lists more than this many items.
const MANY_ITEMS: usize = 3;
const MANY_ITEMS_MULTIPLIER: f64 = 1.5;

static QUANTITY_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(cups?|slices?|bowls?|pieces?|tablespoons?|tbsp|teaspoons?|tsp|ounces?|oz|grams?|g|plates?|servings?)\b",
    )
    .expect("Invalid quantity regex")
});

static UNIT_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(cups?|slices?|bowls?|pieces?|tablespoons?|tbsp|teaspoons?|tsp|ounces?|oz|grams?|plates?)\b",
    )
    .expect("Invalid unit regex")
});

static ITEM_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),|\band\b").expect("Invalid item separator regex"));

/// What the description says about how much food there is.
#[derive(Debug, Clone, PartialEq)]
struct Portion {
    description: String,
    quantity_multiplier: f64,
}

fn canonical_unit(raw: &str) -> &'static str {
    match raw.to_lowercase().as_str() {
        "cup" | "cups" => "cup",
        "slice" | "slices" => "slice",
        "bowl" | "bowls" => "bowl",
        "piece" | "pieces" => "piece",
        "tablespoon" | "tablespoons" | "tbsp" => "tablespoon",
        "teaspoon" | "teaspoons" | "tsp" => "teaspoon",
        "ounce" | "ounces" | "oz" => "ounce",
        "gram" | "grams" | "g" => "gram",
        "plate" | "plates" => "plate",
        _ => "serving",
    }
}

fn detect_portion(description: &str) -> Portion {
    if let Some(caps) = QUANTITY_WITH_UNIT.captures(description) {
        let count = caps.get(1).map(|m| m.as_str()).unwrap_or("1");
        let unit = canonical_unit(caps.get(2).map(|m| m.as_str()).unwrap_or_default());
        let quantity: f64 = count.parse().unwrap_or(1.0);
        let quantity_multiplier = if COUNT_UNITS.contains(&unit) && quantity > 0.0 {
            quantity
        } else {
            1.0
        };
        return Portion {
            description: format!("{count} {unit}(s)"),
            quantity_multiplier,
        };
    }

    let description = UNIT_ONLY
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("1 {}", canonical_unit(m.as_str())))
        .unwrap_or_else(|| NutritionData::DEFAULT_PORTION.to_string());

    Portion {
        description,
        quantity_multiplier: 1.0,
    }
}

fn item_count(description: &str) -> usize {
    ITEM_SEPARATOR
        .split(description)
        .filter(|item| !item.trim().is_empty())
        .count()
}

/// Estimates nutrition for a free-text food description from keyword
/// tables alone. Always returns a complete record.
pub fn synthesize(description: &str) -> NutritionData {
    let lowered = description.to_lowercase();

    let mut profile = BASE;
    let mut notes = BASE_NOTE.to_string();
    let tier = TIERS
        .iter()
        .position(|tier| contains_any(&lowered, tier.keywords));
    if let Some(index) = tier {
        profile = TIERS[index].profile;
        notes = TIERS[index].note.to_string();
    }

    for adjustment in &ADJUSTMENTS {
        if contains_any(&lowered, adjustment.keywords) {
            profile.add(&adjustment.delta);
            notes.push(' ');
            notes.push_str(adjustment.note);
        }
    }

    if let Some((_, delta, note)) = COOKING_METHODS
        .iter()
        .find(|(keywords, _, _)| contains_any(&lowered, keywords))
    {
        profile.add(delta);
        notes.push(' ');
        notes.push_str(note);
    }
    profile.floor_at_zero();

    let portion = detect_portion(description);
    let portion_multiplier = if item_count(description) > MANY_ITEMS {
        MANY_ITEMS_MULTIPLIER
    } else {
        1.0
    };
    let profile = profile.scaled_and_rounded(portion_multiplier * portion.quantity_multiplier);

    let low_tier = tier == Some(0);
    let vitamins = Vitamins {
        a: baseline_level(&lowered, VITAMIN_A_FOODS, low_tier),
        c: baseline_level(&lowered, VITAMIN_C_FOODS, low_tier),
        d: if contains_any(&lowered, VITAMIN_D_FOODS) {
            Level::Medium
        } else {
            Level::Low
        },
    };
    let minerals = Minerals {
        iron: if contains_any(&lowered, HIGH_PROTEIN_FOODS) {
            Level::High
        } else {
            Minerals::DEFAULT_IRON
        },
        ..Minerals::default()
    };

    let mut data = NutritionData {
        calories: profile.calories,
        protein: profile.protein,
        fat: profile.fat,
        carbs: profile.carbs,
        fiber: profile.fiber,
        sugar: profile.sugar,
        sodium: profile.sodium,
        vitamins,
        minerals,
        portion_size: portion.description,
        notes,
    };
    apply_micronutrient_overrides(&mut data, description);
    data
}

fn baseline_level(lowered: &str, rich_foods: &[&str], low_tier: bool) -> Level {
    if contains_any(lowered, rich_foods) {
        Level::High
    } else if low_tier {
        Level::Medium
    } else {
        Level::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pizza_slices_scale_high_calorie_tier() {
        let data = synthesize("2 slices of pepperoni pizza");
        assert_eq!(data.calories, 1000.0);
        assert_eq!(data.fat, 50.0);
        assert_eq!(data.portion_size, "2 slice(s)");
        assert!(data.notes.contains("High calorie food"));
    }

    #[test]
    fn test_low_calorie_tier_sets_medium_vitamins() {
        let data = synthesize("a green salad");
        assert_eq!(data.calories, 150.0);
        assert_eq!(data.sodium, 20.0);
        assert_eq!(data.vitamins.a, Level::Medium);
        assert_eq!(data.vitamins.c, Level::Medium);
        assert_eq!(data.portion_size, NutritionData::DEFAULT_PORTION);
        assert!(data.notes.starts_with("Low calorie food"));
    }

    #[test]
    fn test_adjustments_and_cooking_method_stack() {
        let data = synthesize("grilled chicken breast");
        // medium tier 250, protein +50, grilled -30
        assert_eq!(data.calories, 270.0);
        assert_eq!(data.protein, 40.0);
        assert_eq!(data.fat, 7.0);
        assert_eq!(data.minerals.iron, Level::High);
        assert_eq!(data.vitamins.d, Level::Low);
        assert!(data.notes.contains("Excellent source of protein."));
        assert!(data.notes.contains("Baked/grilled"));
    }

    #[test]
    fn test_many_items_raise_portion() {
        let data = synthesize("rice, beans, corn and salsa");
        // base 300 + carbs 80 = 380, times 1.5
        assert_eq!(data.calories, 570.0);
        assert_eq!(data.fiber, 14.0);
        assert_eq!(data.minerals.iron, Level::High);
    }

    #[test]
    fn test_units_without_count_and_weights() {
        assert_eq!(synthesize("a bowl of oatmeal").portion_size, "1 bowl");
        let weighed = synthesize("200 grams of tofu");
        assert_eq!(weighed.portion_size, "200 gram(s)");
        // grams describe the portion but do not multiply it
        assert_eq!(weighed.calories, 300.0);
    }

    #[test]
    fn test_fish_gets_high_vitamin_d_from_shared_overrides() {
        let data = synthesize("steamed fish");
        assert_eq!(data.vitamins.d, Level::High);
        assert_eq!(synthesize("glass of milk").vitamins.d, Level::Medium);
    }

    #[test]
    fn test_values_never_negative() {
        for description in ["steamed lettuce", "boiled water", "", "baked celery"] {
            let data = synthesize(description);
            for value in [
                data.calories,
                data.protein,
                data.fat,
                data.carbs,
                data.fiber,
                data.sugar,
                data.sodium,
            ] {
                assert!(value >= 0.0, "{description}: {value}");
            }
        }
    }
}

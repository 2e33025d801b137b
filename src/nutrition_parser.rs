use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ParseError;
use crate::extraction::{self, Candidate};
use crate::models::{Level, Minerals, NutritionData, Vitamins};

/// Field-by-field values for a labeled response that leaves a numeric
/// field out.
pub const LABELED_DEFAULTS: NumericDefaults = NumericDefaults {
    calories: 350.0,
    protein: 15.0,
    fat: 12.0,
    carbs: 30.0,
    fiber: 3.0,
    sugar: 5.0,
    sodium: 400.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDefaults {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

const NUMERIC_KEYS: [&str; 7] = [
    "calories", "protein", "fat", "carbs", "fiber", "sugar", "sodium",
];

struct LabelPatterns {
    calories: Regex,
    protein: Regex,
    fat: Regex,
    carbs: Regex,
    fiber: Regex,
    sugar: Regex,
    sodium: Regex,
    vitamin_a: Regex,
    vitamin_c: Regex,
    vitamin_d: Regex,
    calcium: Regex,
    iron: Regex,
    potassium: Regex,
    portion: Regex,
    notes: Regex,
}

impl LabelPatterns {
    fn numeric(&self) -> [&Regex; 7] {
        [
            &self.calories,
            &self.protein,
            &self.fat,
            &self.carbs,
            &self.fiber,
            &self.sugar,
            &self.sodium,
        ]
    }
}

fn numeric_label(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{label}:?\s*(\d+(?:\.\d+)?)"))
        .expect("Invalid numeric label regex")
}

fn level_label(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{label}\b:?\s*(\w+)")).expect("Invalid level label regex")
}

fn text_label(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{label}:?[ \t]*([^\n]+)")).expect("Invalid text label regex")
}

static LABELS: LazyLock<LabelPatterns> = LazyLock::new(|| LabelPatterns {
    calories: numeric_label("calories"),
    protein: numeric_label("protein"),
    fat: numeric_label("fat"),
    carbs: numeric_label("carb(?:ohydrate)?s"),
    fiber: numeric_label("fib(?:er|re)"),
    sugar: numeric_label("sugars?"),
    sodium: numeric_label("sodium"),
    vitamin_a: level_label(r"vitamin\s*a"),
    vitamin_c: level_label(r"vitamin\s*c"),
    vitamin_d: level_label(r"vitamin\s*d"),
    calcium: level_label("calcium"),
    iron: level_label("iron"),
    potassium: level_label("potassium"),
    portion: text_label(r"portion(?:\s*size)?"),
    notes: text_label("notes"),
});

/// Turns raw model output into a nutrition record.
///
/// The outermost `{...}` span is parsed as JSON first; if that fails the
/// labeled-field extractor reads `calories: 350` style lines instead.
pub fn parse_nutrition(raw: &str) -> Result<Candidate<NutritionData>, ParseError> {
    let from_json = extraction::extract_json(raw, '{', '}').and_then(|value| match value {
        Value::Object(map) => nutrition_from_object(&map),
        _ => Err(ParseError::StructureFailure(
            "expected a nutrition object".to_string(),
        )),
    });

    match from_json {
        Ok(data) => {
            debug!(calories = data.calories, "Parsed nutrition from JSON payload");
            Ok(Candidate::json(data))
        }
        Err(json_error) => {
            debug!(error = %json_error, "JSON nutrition parse failed, trying labeled fields");
            let data = parse_labeled(raw)?;
            debug!(calories = data.calories, "Parsed nutrition from labeled fields");
            Ok(Candidate::labeled(data))
        }
    }
}

fn nutrition_from_object(map: &Map<String, Value>) -> Result<NutritionData, ParseError> {
    if !NUMERIC_KEYS.iter().any(|key| map.contains_key(*key)) {
        return Err(ParseError::StructureFailure(
            "object has no nutrition fields".to_string(),
        ));
    }

    let number = |key: &str| extraction::coerce_number(map.get(key));
    let vitamins = map.get("vitamins");
    let minerals = map.get("minerals");

    Ok(NutritionData {
        calories: number("calories"),
        protein: number("protein"),
        fat: number("fat"),
        carbs: number("carbs"),
        fiber: number("fiber"),
        sugar: number("sugar"),
        sodium: number("sodium"),
        vitamins: Vitamins {
            a: json_level(vitamins, "A", Vitamins::DEFAULT_A),
            c: json_level(vitamins, "C", Vitamins::DEFAULT_C),
            d: json_level(vitamins, "D", Vitamins::DEFAULT_D),
        },
        minerals: Minerals {
            calcium: json_level(minerals, "calcium", Minerals::DEFAULT_CALCIUM),
            iron: json_level(minerals, "iron", Minerals::DEFAULT_IRON),
            potassium: json_level(minerals, "potassium", Minerals::DEFAULT_POTASSIUM),
        },
        portion_size: json_text(map.get("portionSize"))
            .unwrap_or_else(|| NutritionData::DEFAULT_PORTION.to_string()),
        notes: json_text(map.get("notes")).unwrap_or_default(),
    })
}

/// Looks `key` up case-insensitively and coerces unknown levels to `default`.
fn json_level(group: Option<&Value>, key: &str, default: Level) -> Level {
    let Some(Value::Object(group)) = group else {
        return default;
    };
    group
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .and_then(|(_, value)| value.as_str())
        .and_then(Level::parse)
        .unwrap_or(default)
}

fn json_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn parse_labeled(raw: &str) -> Result<NutritionData, ParseError> {
    let text = extraction::strip_code_fences(raw);
    let labels = &*LABELS;

    if !labels.numeric().iter().any(|pattern| pattern.is_match(&text)) {
        return Err(ParseError::NoStructuredDataFound);
    }

    let number = |pattern: &Regex, default: f64| {
        extraction::captured_number(pattern, &text).unwrap_or(default)
    };
    let level = |pattern: &Regex, default: Level| {
        pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Level::parse(m.as_str()))
            .unwrap_or(default)
    };
    let line = |pattern: &Regex| {
        pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|line| !line.is_empty())
    };

    Ok(NutritionData {
        calories: number(&labels.calories, LABELED_DEFAULTS.calories),
        protein: number(&labels.protein, LABELED_DEFAULTS.protein),
        fat: number(&labels.fat, LABELED_DEFAULTS.fat),
        carbs: number(&labels.carbs, LABELED_DEFAULTS.carbs),
        fiber: number(&labels.fiber, LABELED_DEFAULTS.fiber),
        sugar: number(&labels.sugar, LABELED_DEFAULTS.sugar),
        sodium: number(&labels.sodium, LABELED_DEFAULTS.sodium),
        vitamins: Vitamins {
            a: level(&labels.vitamin_a, Vitamins::DEFAULT_A),
            c: level(&labels.vitamin_c, Vitamins::DEFAULT_C),
            d: level(&labels.vitamin_d, Vitamins::DEFAULT_D),
        },
        minerals: Minerals {
            calcium: level(&labels.calcium, Minerals::DEFAULT_CALCIUM),
            iron: level(&labels.iron, Minerals::DEFAULT_IRON),
            potassium: level(&labels.potassium, Minerals::DEFAULT_POTASSIUM),
        },
        portion_size: line(&labels.portion)
            .unwrap_or_else(|| NutritionData::DEFAULT_PORTION.to_string()),
        notes: line(&labels.notes).unwrap_or_default(),
    })
}

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Protein,
    Vegetable,
    Carb,
    Fruit,
    Dairy,
    Nut,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Protein,
        Category::Vegetable,
        Category::Carb,
        Category::Fruit,
        Category::Dairy,
        Category::Nut,
    ];

    /// Keywords in declaration order. Earlier entries win when several
    /// match the same token.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Protein => PROTEIN_KEYWORDS,
            Category::Vegetable => VEGETABLE_KEYWORDS,
            Category::Carb => CARB_KEYWORDS,
            Category::Fruit => FRUIT_KEYWORDS,
            Category::Dairy => DAIRY_KEYWORDS,
            Category::Nut => NUT_KEYWORDS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Vegetable => "vegetable",
            Category::Carb => "carb",
            Category::Fruit => "fruit",
            Category::Dairy => "dairy",
            Category::Nut => "nut",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "steak", "pork", "turkey", "lamb", "fish", "salmon", "tuna", "cod",
    "shrimp", "tofu", "eggs", "egg", "bacon", "ham", "sausage", "meat",
];

const VEGETABLE_KEYWORDS: &[&str] = &[
    "spinach",
    "broccoli",
    "carrot",
    "tomato",
    "lettuce",
    "onion",
    "pepper",
    "cucumber",
    "zucchini",
    "eggplant",
    "celery",
    "sweet potato",
    "potato",
    "garlic",
    "mushroom",
    "asparagus",
    "kale",
    "vegetable",
];

const CARB_KEYWORDS: &[&str] = &[
    "rice", "pasta", "bread", "potato", "noodle", "flour", "quinoa", "oats", "barley", "corn",
    "tortilla", "couscous", "spaghetti",
];

const FRUIT_KEYWORDS: &[&str] = &[
    "apple",
    "banana",
    "orange",
    "strawberry",
    "blueberry",
    "raspberry",
    "berry",
    "mango",
    "pineapple",
    "peach",
    "pear",
    "grape",
    "melon",
    "kiwi",
    "avocado",
];

const DAIRY_KEYWORDS: &[&str] = &["milk", "cheese", "yogurt", "cream", "butter"];

const NUT_KEYWORDS: &[&str] = &[
    "almond", "walnut", "cashew", "pecan", "pistachio", "peanut", "hazelnut", "nut",
];

/// Which categories a set of tokens touches, and the first concrete
/// keyword seen for each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub present: BTreeSet<Category>,
    pub specific: BTreeMap<Category, &'static str>,
}

impl Classification {
    pub fn has(&self, category: Category) -> bool {
        self.present.contains(&category)
    }

    pub fn specific(&self, category: Category) -> Option<&'static str> {
        self.specific.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}

/// Tags tokens with every category one of their keywords appears in.
///
/// Matching is a case-insensitive substring test. For each category the
/// specific item is fixed by the first token (in input order) that matches
/// it, using the first matching keyword of that category's list.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Classification {
    let mut classification = Classification::default();

    for token in tokens {
        let lowered = token.as_ref().to_lowercase();
        if lowered.trim().is_empty() {
            continue;
        }
        for category in Category::ALL {
            let Some(keyword) = category
                .keywords()
                .iter()
                .find(|keyword| lowered.contains(*keyword))
            else {
                continue;
            };
            classification.present.insert(category);
            classification.specific.entry(category).or_insert(*keyword);
        }
    }

    classification
}

/// True if `text` (already lowercased) contains any of `keywords`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Splits a free-text ingredient list on commas and newlines.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_classification() {
        let empty: [&str; 0] = [];
        assert!(classify(&empty).is_empty());
        assert!(classify(&["", "   "]).is_empty());
    }

    #[test]
    fn test_presence_is_case_insensitive_substring() {
        let classification = classify(&["Grilled CHICKEN breast", "Brown Rice"]);
        assert!(classification.has(Category::Protein));
        assert!(classification.has(Category::Carb));
        assert!(!classification.has(Category::Fruit));
        assert_eq!(classification.specific(Category::Protein), Some("chicken"));
        assert_eq!(classification.specific(Category::Carb), Some("rice"));
    }

    #[test]
    fn test_first_token_wins_per_category() {
        let classification = classify(&["salmon", "chicken", "tofu"]);
        assert_eq!(classification.specific(Category::Protein), Some("salmon"));
    }

    #[test]
    fn test_keyword_order_breaks_ties_within_a_token() {
        // "eggs" precedes "egg" in the protein list.
        let classification = classify(&["eggs"]);
        assert_eq!(classification.specific(Category::Protein), Some("eggs"));

        // "sweet potato" is both a vegetable and a carb.
        let classification = classify(&["sweet potato"]);
        assert_eq!(
            classification.specific(Category::Vegetable),
            Some("sweet potato")
        );
        assert_eq!(classification.specific(Category::Carb), Some("potato"));
    }

    #[test]
    fn test_one_token_can_hit_several_categories() {
        let classification = classify(&["peanut butter"]);
        assert!(classification.has(Category::Nut));
        assert!(classification.has(Category::Dairy));
    }

    #[test]
    fn test_split_ingredients_drops_blanks() {
        assert_eq!(
            split_ingredients("eggs, spinach,\n , cheese"),
            vec!["eggs", "spinach", "cheese"]
        );
        assert!(split_ingredients(" , ").is_empty());
    }
}

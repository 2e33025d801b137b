//! Default amounts for ingredients the user listed without one.

#[derive(Debug, Clone, Copy)]
enum Measure {
    /// "8 oz chicken"
    Lead(&'static str),
    /// "2 cloves garlic, minced"
    LeadWithNote(&'static str, &'static str),
    /// "2 tomatoes, diced"
    Count {
        count: u32,
        plural: &'static str,
        note: Option<&'static str>,
    },
}

/// Rows are tried in order, so more specific names come first.
const MEASURES: &[(&[&str], Measure)] = &[
    (&["bell pepper"], Measure::LeadWithNote("1", "diced")),
    (&["eggplant"], Measure::LeadWithNote("1", "cubed")),
    (
        &["egg"],
        Measure::Count {
            count: 2,
            plural: "s",
            note: None,
        },
    ),
    (&["chicken", "beef", "fish", "pork"], Measure::Lead("8 oz")),
    (&["rice", "pasta", "flour"], Measure::Lead("1 cup")),
    (
        &["cheese"],
        Measure::LeadWithNote("1/2 cup", "shredded or cubed"),
    ),
    (&["bread"], Measure::Lead("2 slices")),
    (&["milk", "cream", "broth", "stock"], Measure::Lead("1 cup")),
    (&["butter", "oil"], Measure::Lead("2 tbsp")),
    (&["salt", "pepper", "spice"], Measure::Lead("1 tsp")),
    (&["garlic"], Measure::LeadWithNote("2 cloves", "minced")),
    (&["onion"], Measure::LeadWithNote("1", "diced")),
    (
        &["tomato"],
        Measure::Count {
            count: 2,
            plural: "es",
            note: Some("diced"),
        },
    ),
    (
        &["potato"],
        Measure::Count {
            count: 2,
            plural: "es",
            note: Some("cubed"),
        },
    ),
    (
        &["carrot"],
        Measure::Count {
            count: 2,
            plural: "s",
            note: Some("sliced"),
        },
    ),
];

const DEFAULT_MEASURE: Measure = Measure::Lead("1/2 cup");

/// True if the text already starts with an amount ("2 cups rice").
pub fn has_quantity(item: &str) -> bool {
    item.trim_start()
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Prefixes a typical amount for the ingredient. Items that already carry
/// an amount are returned unchanged.
pub fn format_ingredient(item: &str) -> String {
    let item = item.trim();
    if has_quantity(item) {
        return item.to_string();
    }

    let lowered = item.to_lowercase();
    let measure = MEASURES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(_, measure)| *measure)
        .unwrap_or(DEFAULT_MEASURE);

    match measure {
        Measure::Lead(amount) => format!("{amount} {item}"),
        Measure::LeadWithNote(amount, note) => format!("{amount} {item}, {note}"),
        Measure::Count {
            count,
            plural,
            note,
        } => {
            let counted = with_count(count, item, plural);
            match note {
                Some(note) => format!("{counted}, {note}"),
                None => counted,
            }
        }
    }
}

/// "3 egg" becomes "3 eggs"; items already plural keep their ending.
pub fn with_count(count: u32, item: &str, plural: &str) -> String {
    let item = item.trim();
    if has_quantity(item) {
        return item.to_string();
    }
    if count == 1 || item.to_lowercase().ends_with(plural) {
        format!("{count} {item}")
    } else {
        format!("{count} {item}{plural}")
    }
}

/// Uses `amount` unless the user already gave one.
pub fn measured(item: &str, amount: &str) -> String {
    let item = item.trim();
    if has_quantity(item) {
        item.to_string()
    } else {
        format!("{amount} {item}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_amounts_are_kept() {
        assert_eq!(format_ingredient("3 apples"), "3 apples");
        assert_eq!(format_ingredient(" 2 cups rice "), "2 cups rice");
        assert_eq!(measured("1 lb chicken", "8 oz"), "1 lb chicken");
    }

    #[test]
    fn test_counted_items_are_pluralized_once() {
        assert_eq!(format_ingredient("egg"), "2 eggs");
        assert_eq!(format_ingredient("eggs"), "2 eggs");
        assert_eq!(format_ingredient("tomato"), "2 tomatoes, diced");
        assert_eq!(format_ingredient("sweet potatoes"), "2 sweet potatoes, cubed");
        assert_eq!(format_ingredient("carrot"), "2 carrots, sliced");
    }

    #[test]
    fn test_specific_rows_win_over_general_ones() {
        assert_eq!(format_ingredient("eggplant"), "1 eggplant, cubed");
        assert_eq!(format_ingredient("bell pepper"), "1 bell pepper, diced");
        assert_eq!(format_ingredient("black pepper"), "1 tsp black pepper");
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(format_ingredient("chicken breast"), "8 oz chicken breast");
        assert_eq!(
            format_ingredient("cheddar cheese"),
            "1/2 cup cheddar cheese, shredded or cubed"
        );
        assert_eq!(format_ingredient("bread"), "2 slices bread");
        assert_eq!(format_ingredient("garlic"), "2 cloves garlic, minced");
        assert_eq!(format_ingredient("kale"), "1/2 cup kale");
    }
}

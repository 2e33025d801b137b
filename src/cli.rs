use clap::{Parser, Subcommand};

use crate::models::{MealSelection, MealType};

#[derive(Parser, Debug)]
#[command(author, version, about = "Nutrition estimates and recipe ideas", long_about = None)]
pub struct Cli {
    /// Skip the completion service and use the offline estimators
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log debug output, including raw model responses
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate the nutrition of a food description
    Analyze {
        /// e.g. "2 slices of pepperoni pizza"
        description: String,
    },
    /// Suggest two recipes that use every listed ingredient
    Recipes {
        /// Comma-separated ingredients, e.g. "eggs, spinach"
        ingredients: String,

        /// Meal type; may be repeated
        #[arg(long = "meal", value_parser = parse_meal)]
        meals: Vec<MealType>,
    },
}

impl Command {
    /// The meal selection for a `recipes` invocation. Empty for `analyze`.
    pub fn meal_selection(&self) -> MealSelection {
        let mut selection = MealSelection::none();
        if let Command::Recipes { meals, .. } = self {
            for meal in meals {
                selection.select(*meal);
            }
        }
        selection
    }
}

fn parse_meal(raw: &str) -> Result<MealType, String> {
    MealType::parse(raw)
        .ok_or_else(|| format!("unknown meal type '{raw}' (breakfast, lunch, dinner, snack)"))
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

//! Hand-written recipes keyed by the combination of ingredients a user has.
//!
//! Every template lists each user item somewhere in its ingredients: the
//! items it is built around get a measured amount, and the rest are added
//! as extras with a default amount from [`format_ingredient`].

use super::display_name;
use super::quantities::{format_ingredient, measured, with_count};
use crate::classifier::{classify, Category};
use crate::models::{MealType, Recipe, RecipeNutrition};
use crate::validation::normalize_ingredient;

const BREAD: &[&str] = &["bread", "toast", "bun", "baguette"];
const CHEESE: &[&str] = &["cheese", "cheddar", "mozzarella", "parmesan", "swiss", "feta"];
const PASTA: &[&str] = &["pasta", "noodle", "spaghetti", "macaroni", "penne", "fettuccine"];
const FISH: &[&str] = &["fish", "salmon", "tuna", "cod", "tilapia", "shrimp"];
const RICE: &[&str] = &["rice"];
const CHICKEN: &[&str] = &["chicken"];
const BEEF: &[&str] = &["beef", "steak"];
const PORK: &[&str] = &["pork", "ham", "bacon"];

const SEASONING: &str = "Salt and pepper to taste";

/// The user's ingredients as seen by the templates.
#[derive(Debug, Clone, Copy)]
pub struct Pantry<'a> {
    items: &'a [String],
    meal: MealType,
}

/// A user item together with the keyword that placed it in a category.
#[derive(Debug, Clone, Copy)]
struct Pick<'a> {
    item: &'a str,
    keyword: &'static str,
}

impl<'a> Pantry<'a> {
    pub fn new(items: &'a [String], meal: MealType) -> Self {
        Self { items, meal }
    }

    /// First user item containing one of `keywords`.
    fn item_with(&self, keywords: &[&str]) -> Option<&'a str> {
        self.items
            .iter()
            .map(String::as_str)
            .find(|item| {
                let lowered = item.to_lowercase();
                keywords.iter().any(|keyword| lowered.contains(keyword))
            })
    }

    fn egg_item(&self) -> Option<&'a str> {
        self.items.iter().map(String::as_str).find(|item| is_egg(item))
    }

    /// First user item in `category` that is not already taken.
    fn pick(&self, category: Category, taken: &[&str]) -> Option<Pick<'a>> {
        self.items.iter().find_map(|item| {
            if taken.contains(&item.as_str()) {
                return None;
            }
            let keyword = classify(std::slice::from_ref(item)).specific(category)?;
            if category == Category::Protein && keyword.starts_with("egg") && !is_egg(item) {
                return None;
            }
            Some(Pick {
                item: item.as_str(),
                keyword,
            })
        })
    }

    fn protein(&self) -> Option<Pick<'a>> {
        self.pick(Category::Protein, &[])
    }

    fn extras(&self, used: &[&str]) -> Vec<&'a str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| !used.contains(item))
            .collect()
    }

    /// Builds the ingredient list: key items first, then staples the user
    /// did not already list, then every remaining user item.
    fn assemble(&self, key: Vec<String>, used: &[&str], staples: &[&str]) -> Vec<String> {
        let names: Vec<String> = self
            .items
            .iter()
            .map(|item| normalize_ingredient(item))
            .filter(|name| name.len() >= 3)
            .collect();

        let mut ingredients = key;
        ingredients.extend(
            staples
                .iter()
                .filter(|staple| {
                    let lowered = staple.to_lowercase();
                    !names.iter().any(|name| lowered.contains(name.as_str()))
                })
                .map(|staple| staple.to_string()),
        );
        ingredients.extend(self.extras(used).into_iter().map(format_ingredient));
        ingredients.push(SEASONING.to_string());
        ingredients
    }

    /// A step adding the leftover items, or `otherwise` when there are none.
    fn extras_step(&self, used: &[&str], verb: &str, otherwise: &str) -> String {
        let extras = self.extras(used);
        if extras.is_empty() {
            otherwise.to_string()
        } else {
            format!("{verb} {}.", extras.join(", "))
        }
    }
}

fn is_egg(item: &str) -> bool {
    let lowered = item.to_lowercase();
    lowered.contains("egg") && !lowered.contains("eggplant")
}

fn is_egg_keyword(keyword: &str) -> bool {
    keyword == "egg" || keyword == "eggs"
}

pub struct Template {
    pub name: &'static str,
    applies: fn(&Pantry) -> bool,
    build: fn(&Pantry) -> Recipe,
}

impl Template {
    pub fn applies(&self, pantry: &Pantry) -> bool {
        (self.applies)(pantry)
    }

    pub fn build(&self, pantry: &Pantry) -> Recipe {
        (self.build)(pantry)
    }
}

/// Tried in order; earlier entries are the more specific combinations.
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "grilled cheese",
        applies: |p| p.item_with(BREAD).is_some() && p.item_with(CHEESE).is_some(),
        build: grilled_cheese,
    },
    Template {
        name: "egg sandwich",
        applies: |p| p.egg_item().is_some() && p.item_with(BREAD).is_some(),
        build: egg_sandwich,
    },
    Template {
        name: "one-pot",
        applies: |p| {
            p.protein()
                .is_some_and(|protein| p.pick(Category::Carb, &[protein.item]).is_some())
        },
        build: one_pot,
    },
    Template {
        name: "cheesy pasta",
        applies: |p| p.item_with(PASTA).is_some() && p.item_with(CHEESE).is_some(),
        build: cheesy_pasta,
    },
    Template {
        name: "protein and vegetable",
        applies: |p| {
            p.protein()
                .is_some_and(|protein| p.pick(Category::Vegetable, &[protein.item]).is_some())
        },
        build: protein_with_vegetable,
    },
    Template {
        name: "parfait",
        applies: |p| {
            matches!(p.meal, MealType::Breakfast | MealType::Snack)
                && p.pick(Category::Fruit, &[]).is_some_and(|fruit| {
                    p.pick(Category::Dairy, &[fruit.item]).is_some()
                })
        },
        build: parfait,
    },
    Template {
        name: "fruit and nut salad",
        applies: |p| {
            p.pick(Category::Fruit, &[])
                .is_some_and(|fruit| p.pick(Category::Nut, &[fruit.item]).is_some())
        },
        build: fruit_nut_salad,
    },
    Template {
        name: "vegetables and grains",
        applies: |p| {
            p.pick(Category::Vegetable, &[])
                .is_some_and(|veg| p.pick(Category::Carb, &[veg.item]).is_some())
        },
        build: vegetable_with_carb,
    },
    Template {
        name: "scrambled eggs",
        applies: |p| p.egg_item().is_some(),
        build: scrambled_eggs,
    },
    Template {
        name: "roast chicken",
        applies: |p| p.item_with(CHICKEN).is_some(),
        build: roast_chicken,
    },
    Template {
        name: "beef steak",
        applies: |p| p.item_with(BEEF).is_some(),
        build: beef_steak,
    },
    Template {
        name: "baked fish",
        applies: |p| p.item_with(FISH).is_some(),
        build: baked_fish,
    },
    Template {
        name: "pork chops",
        applies: |p| p.item_with(PORK).is_some(),
        build: pork_chops,
    },
    Template {
        name: "rice pilaf",
        applies: |p| p.item_with(RICE).is_some(),
        build: rice_pilaf,
    },
    Template {
        name: "garlic pasta",
        applies: |p| p.item_with(PASTA).is_some(),
        build: garlic_pasta,
    },
    Template {
        name: "sandwich",
        applies: |p| p.item_with(BREAD).is_some(),
        build: sandwich,
    },
    Template {
        name: "vegetable medley",
        applies: |p| p.pick(Category::Vegetable, &[]).is_some(),
        build: vegetable_medley,
    },
    Template {
        name: "fruit salad",
        applies: |p| p.pick(Category::Fruit, &[]).is_some(),
        build: fruit_salad,
    },
];

/// Builds recipes from the first `limit` templates that apply.
pub fn matching_recipes(pantry: &Pantry, limit: usize) -> Vec<Recipe> {
    TEMPLATES
        .iter()
        .filter(|template| template.applies(pantry))
        .take(limit)
        .map(|template| template.build(pantry))
        .collect()
}

fn recipe(
    title: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    nutrition: RecipeNutrition,
    minutes: u32,
    servings: u32,
) -> Recipe {
    Recipe {
        title,
        ingredients,
        steps,
        nutrition,
        cooking_time: format!("{minutes} minutes"),
        servings,
    }
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn grilled_cheese(p: &Pantry) -> Recipe {
    let bread = p.item_with(BREAD).unwrap_or("bread");
    let cheese = p.item_with(CHEESE).unwrap_or("cheese");
    let used = [bread, cheese];

    let ingredients = p.assemble(
        vec![measured(bread, "2 slices"), measured(cheese, "2 slices")],
        &used,
        &["1 tbsp butter"],
    );
    let mut method = steps(&[
        "Butter one side of each slice of bread.",
        "Place one slice of bread, butter side down, in a skillet over medium heat.",
        "Layer the cheese on top of the bread.",
    ]);
    method.push(p.extras_step(
        &used,
        "Add on top of the cheese:",
        "Add any additional seasonings if desired.",
    ));
    method.extend(steps(&[
        "Top with the second slice of bread, butter side up.",
        "Cook for 2-3 minutes until the bottom is golden brown.",
        "Flip and cook for another 2-3 minutes until golden and the cheese is melted.",
        "Remove from heat, cut in half, and serve hot.",
    ]));

    recipe(
        format!("Gourmet {} Grilled Sandwich", display_name(cheese)),
        ingredients,
        method,
        RecipeNutrition::new(350.0, 12.0, 22.0, 28.0),
        10,
        1,
    )
}

fn egg_sandwich(p: &Pantry) -> Recipe {
    let bread = p.item_with(BREAD).unwrap_or("bread");
    let egg = p.egg_item().unwrap_or("egg");
    let used = [bread, egg];

    let ingredients = p.assemble(
        vec![measured(bread, "2 slices"), with_count(2, egg, "s")],
        &used,
        &["1 slice cheese (optional)", "1 tbsp butter"],
    );
    let mut method = steps(&[
        "Heat a non-stick pan over medium heat and melt half the butter.",
        "Crack the eggs into the pan and cook to your preference (scrambled or fried).",
        "Season the eggs with salt and pepper.",
        "Toast the bread slices and spread with the remaining butter.",
        "Place the eggs on one slice of toast.",
    ]);
    method.push(p.extras_step(&used, "Layer on", "Add the cheese if using."));
    method.push("Top with the second slice of toast and serve hot.".to_string());

    recipe(
        "Classic Egg Breakfast Sandwich".to_string(),
        ingredients,
        method,
        RecipeNutrition::new(380.0, 18.0, 22.0, 28.0),
        10,
        1,
    )
}

fn one_pot(p: &Pantry) -> Recipe {
    let protein = p.protein().unwrap_or(Pick {
        item: "chicken",
        keyword: "chicken",
    });
    let carb = p
        .pick(Category::Carb, &[protein.item])
        .map(|pick| pick.item)
        .unwrap_or("rice");
    let used = [protein.item, carb];
    let (p_name, c_name) = (display_name(protein.item), display_name(carb));

    let title = match protein.keyword {
        "chicken" => format!("One-Pot Chicken and {c_name}"),
        "beef" | "steak" => format!("Beef and Vegetable Stew with {c_name}"),
        "pork" => format!("Pork Chops with {c_name}"),
        "turkey" => format!("Turkey and Vegetable {c_name} Casserole"),
        "fish" | "salmon" => format!("Baked {p_name} with {c_name}"),
        "shrimp" => format!("Shrimp Scampi with {c_name}"),
        "tofu" => format!("Tofu Stir-Fry with {c_name}"),
        keyword if is_egg_keyword(keyword) => format!("Egg Fried {c_name}"),
        _ => format!("{p_name} and {c_name} Dinner"),
    };

    let protein_line = if is_egg_keyword(protein.keyword) {
        with_count(3, protein.item, "s")
    } else {
        measured(protein.item, "1 lb")
    };
    let ingredients = p.assemble(
        vec![protein_line, measured(carb, "1 cup")],
        &used,
        &[
            "2 cups broth",
            "2 tbsp olive oil",
            "1 onion, diced",
            "2 cloves garlic, minced",
        ],
    );
    let mut method = vec![
        "Heat the olive oil in a large pot over medium-high heat.".to_string(),
        format!("Add the {} and cook until browned, about 5 minutes.", protein.item),
        "Add the onion and garlic and cook until softened, about 2 minutes.".to_string(),
        format!("Stir in the {carb}."),
    ];
    method.push(p.extras_step(&used, "Stir in", "Season generously with salt and pepper."));
    method.extend(vec![
        "Pour in the broth and bring to a boil.".to_string(),
        format!("Reduce heat, cover, and simmer for 15-20 minutes until the {carb} is tender."),
        "Remove from heat and let stand, covered, for 5 minutes before serving.".to_string(),
    ]);

    recipe(
        title,
        ingredients,
        method,
        RecipeNutrition::new(450.0, 30.0, 15.0, 45.0),
        35,
        4,
    )
}

fn cheesy_pasta(p: &Pantry) -> Recipe {
    let pasta = p.item_with(PASTA).unwrap_or("pasta");
    let cheese = p.item_with(CHEESE).unwrap_or("cheese");
    let used = [pasta, cheese];

    let ingredients = p.assemble(
        vec![
            measured(pasta, "8 oz"),
            format!("{}, grated", measured(cheese, "1 cup")),
        ],
        &used,
        &["2 tbsp butter", "2 tbsp flour", "1 cup milk"],
    );
    let mut method = steps(&[
        "Bring a large pot of salted water to a boil.",
        "Cook the pasta until al dente. Drain and set aside.",
        "In the same pot, melt the butter over medium heat.",
        "Whisk in the flour and cook for 1-2 minutes to make a roux.",
        "Gradually whisk in the milk and cook until the sauce thickens, about 3-4 minutes.",
        "Reduce heat to low and stir in the cheese until melted and smooth.",
    ]);
    method.push(p.extras_step(&used, "Stir in", "Add a pinch of nutmeg if you like."));
    method.push("Return the pasta to the pot, toss to coat, and serve hot.".to_string());

    recipe(
        format!("Creamy {} {}", display_name(cheese), display_name(pasta)),
        ingredients,
        method,
        RecipeNutrition::new(480.0, 18.0, 22.0, 55.0),
        20,
        2,
    )
}

fn protein_with_vegetable(p: &Pantry) -> Recipe {
    let protein = p.protein().unwrap_or(Pick {
        item: "chicken",
        keyword: "chicken",
    });
    let vegetable = p
        .pick(Category::Vegetable, &[protein.item])
        .map(|pick| pick.item)
        .unwrap_or("mixed vegetables");

    if is_egg_keyword(protein.keyword) {
        omelette(p, protein.item, vegetable)
    } else {
        roast(p, protein, vegetable)
    }
}

fn omelette(p: &Pantry, egg: &str, vegetable: &str) -> Recipe {
    let used = [egg, vegetable];
    let ingredients = p.assemble(
        vec![
            with_count(3, egg, "s"),
            format!("{}, chopped", measured(vegetable, "1/2 cup")),
        ],
        &used,
        &["1 tbsp olive oil", "2 tbsp milk"],
    );
    let mut method = vec![
        "Heat the olive oil in a non-stick pan over medium heat.".to_string(),
        format!("Sauté the {vegetable} until softened, about 3-4 minutes."),
    ];
    method.push(p.extras_step(&used, "Add", "Season the vegetables lightly."));
    method.extend(steps(&[
        "Beat the eggs with the milk, salt, and pepper.",
        "Pour the eggs over the vegetables in the pan.",
        "Cook until the edges are set, then fold the omelette in half.",
        "Cook for another minute until set but still moist, then serve.",
    ]));

    recipe(
        format!("{} Omelette", display_name(vegetable)),
        ingredients,
        method,
        RecipeNutrition::new(285.0, 18.0, 22.0, 6.0),
        15,
        1,
    )
}

#[derive(Clone, Copy)]
enum CookStyle {
    Oven,
    Wok,
    Skillet,
}

fn roast(p: &Pantry, protein: Pick, vegetable: &str) -> Recipe {
    let (p_name, v_name) = (display_name(protein.item), display_name(vegetable));
    let (title, style) = match protein.keyword {
        "chicken" => (format!("Herb-Roasted Chicken with {v_name}"), CookStyle::Oven),
        "beef" | "steak" => (format!("Beef and {v_name} Stir-Fry"), CookStyle::Wok),
        "pork" => (
            format!("Pork Tenderloin with Roasted {v_name}"),
            CookStyle::Oven,
        ),
        "turkey" => (
            format!("Turkey Meatballs with {v_name} Sauce"),
            CookStyle::Oven,
        ),
        "fish" | "salmon" | "tuna" | "cod" => (
            format!("Herb-Crusted {p_name} with Roasted {v_name}"),
            CookStyle::Oven,
        ),
        "shrimp" => (
            format!("Garlic Shrimp with Sautéed {v_name}"),
            CookStyle::Skillet,
        ),
        "tofu" => (format!("Tofu and {v_name} Stir-Fry"), CookStyle::Wok),
        _ => (format!("{p_name} with Roasted {v_name}"), CookStyle::Oven),
    };

    let used = [protein.item, vegetable];
    let ingredients = p.assemble(
        vec![measured(protein.item, "1 lb"), measured(vegetable, "2 cups")],
        &used,
        &[
            "2 tbsp olive oil",
            "2 cloves garlic, minced",
            "1 tsp dried herbs",
        ],
    );
    let (protein_item, extras) = (protein.item, p.extras_step(&used, "Add", ""));
    let mut method = match style {
        CookStyle::Oven => vec![
            "Preheat oven to 400°F (200°C).".to_string(),
            format!("Season the {protein_item} with salt, pepper, garlic, and herbs."),
            format!("Toss the {vegetable} with olive oil and spread on a sheet pan."),
            format!("Nestle the {protein_item} among the vegetables."),
            format!("Roast for 25-30 minutes until the {protein_item} is cooked through."),
        ],
        CookStyle::Wok => vec![
            format!("Slice the {protein_item} into thin strips and season with salt and pepper."),
            "Heat the oil in a wok or large skillet over high heat.".to_string(),
            format!("Stir-fry the {protein_item} for 3-4 minutes, then set aside."),
            format!("Add the garlic and {vegetable} and stir-fry for 4-5 minutes."),
            format!("Return the {protein_item} to the pan and toss until heated through."),
        ],
        CookStyle::Skillet => vec![
            "Heat the olive oil in a large skillet over medium-high heat.".to_string(),
            format!("Cook the {protein_item} with the garlic for 2-3 minutes until just done, then set aside."),
            format!("Sauté the {vegetable} with the herbs for 4-5 minutes until tender."),
            format!("Return the {protein_item} to the pan and toss to combine."),
        ],
    };
    if !extras.is_empty() {
        method.insert(method.len() - 1, extras);
    }
    method.push("Rest for a few minutes, adjust the seasoning, and serve.".to_string());

    recipe(
        title,
        ingredients,
        method,
        RecipeNutrition::new(380.0, 34.0, 22.0, 12.0),
        30,
        4,
    )
}

fn parfait(p: &Pantry) -> Recipe {
    let fruit = p
        .pick(Category::Fruit, &[])
        .map(|pick| pick.item)
        .unwrap_or("mixed berries");
    let dairy = p
        .pick(Category::Dairy, &[fruit])
        .map(|pick| pick.item)
        .unwrap_or("yogurt");
    let used = [fruit, dairy];

    let ingredients = p.assemble(
        vec![measured(dairy, "1 cup"), measured(fruit, "1/2 cup")],
        &used,
        &["1/4 cup granola", "1 tbsp honey"],
    );
    let mut method = vec![
        format!("In a glass or bowl, layer half of the {dairy} at the bottom."),
        format!("Add a layer of {fruit}."),
        "Sprinkle over half of the granola.".to_string(),
        "Repeat the layers with the remaining ingredients.".to_string(),
    ];
    method.push(p.extras_step(&used, "Top with", "Drizzle honey over the top."));
    method.push("Serve immediately or refrigerate for up to 1 hour.".to_string());

    recipe(
        format!("{} and {} Parfait", display_name(fruit), display_name(dairy)),
        ingredients,
        method,
        RecipeNutrition::new(250.0, 10.0, 6.0, 40.0),
        5,
        1,
    )
}

fn fruit_nut_salad(p: &Pantry) -> Recipe {
    let fruit = p
        .pick(Category::Fruit, &[])
        .map(|pick| pick.item)
        .unwrap_or("apple");
    let nut = p
        .pick(Category::Nut, &[fruit])
        .map(|pick| pick.item)
        .unwrap_or("walnuts");
    let used = [fruit, nut];

    let ingredients = p.assemble(
        vec![
            format!("{}, chopped", measured(fruit, "2 cups")),
            format!("{}, toasted", measured(nut, "1/4 cup")),
        ],
        &used,
        &[
            "4 cups mixed greens",
            "2 tbsp olive oil",
            "1 tbsp lemon juice",
            "1 tsp honey",
        ],
    );
    let mut method = vec![
        format!("Toast the {nut} in a dry skillet for 3-4 minutes until fragrant."),
        "Whisk the olive oil, lemon juice, and honey into a dressing.".to_string(),
        format!("Toss the greens and {fruit} with the dressing."),
    ];
    method.push(p.extras_step(&used, "Fold in", "Season with a pinch of salt."));
    method.push(format!("Scatter the {nut} over the top and serve."));

    recipe(
        format!("{} and {} Salad", display_name(fruit), display_name(nut)),
        ingredients,
        method,
        RecipeNutrition::new(320.0, 8.0, 22.0, 28.0),
        10,
        2,
    )
}

fn vegetable_with_carb(p: &Pantry) -> Recipe {
    let vegetable = p
        .pick(Category::Vegetable, &[])
        .map(|pick| pick.item)
        .unwrap_or("vegetables");
    let carb = p
        .pick(Category::Carb, &[vegetable])
        .map(|pick| pick.item)
        .unwrap_or("rice");
    let used = [vegetable, carb];

    let ingredients = p.assemble(
        vec![measured(vegetable, "2 cups"), measured(carb, "1 cup")],
        &used,
        &[
            "2 tbsp olive oil",
            "2 cloves garlic, minced",
            "1 tsp dried herbs",
        ],
    );
    let mut method = vec![
        "Preheat oven to 425°F (220°C).".to_string(),
        format!("Toss the {vegetable} with olive oil, garlic, herbs, salt, and pepper."),
        "Roast on a sheet pan for 25-30 minutes, turning once.".to_string(),
        format!("Meanwhile, cook the {carb} according to package directions."),
    ];
    method.push(p.extras_step(&used, "Stir in", "Add a squeeze of lemon if you like."));
    method.push(format!("Serve the roasted {vegetable} over the {carb}."));

    recipe(
        format!(
            "Roasted {} with {}",
            display_name(vegetable),
            display_name(carb)
        ),
        ingredients,
        method,
        RecipeNutrition::new(360.0, 9.0, 10.0, 55.0),
        35,
        2,
    )
}

/// Shared shape of the one-main-ingredient templates.
struct Single<'s> {
    title: &'static str,
    lead: String,
    staples: &'s [&'s str],
    before: &'s [&'s str],
    after: &'s [&'s str],
    nutrition: RecipeNutrition,
    minutes: u32,
    servings: u32,
}

fn single(p: &Pantry, item: &str, spec: Single) -> Recipe {
    let used = [item];
    let ingredients = p.assemble(vec![spec.lead], &used, spec.staples);
    let mut method = steps(spec.before);
    method.push(p.extras_step(&used, "Add", "Season to taste."));
    method.extend(steps(spec.after));
    recipe(
        spec.title.to_string(),
        ingredients,
        method,
        spec.nutrition,
        spec.minutes,
        spec.servings,
    )
}

fn scrambled_eggs(p: &Pantry) -> Recipe {
    let egg = p.egg_item().unwrap_or("eggs");
    single(
        p,
        egg,
        Single {
            title: "Perfect Fluffy Scrambled Eggs",
            lead: with_count(4, egg, "s"),
            staples: &["2 tbsp milk", "1 tbsp butter"],
            before: &[
                "Whisk the eggs with the milk, salt, and pepper until frothy.",
                "Melt the butter in a non-stick pan over medium-low heat.",
            ],
            after: &[
                "Pour in the eggs and let them set for 20 seconds.",
                "Gently push the eggs across the pan, forming large soft curds.",
                "Remove from heat while still slightly glossy and serve.",
            ],
            nutrition: RecipeNutrition::new(220.0, 14.0, 16.0, 2.0),
            minutes: 5,
            servings: 2,
        },
    )
}

fn roast_chicken(p: &Pantry) -> Recipe {
    let chicken = p.item_with(CHICKEN).unwrap_or("chicken");
    single(
        p,
        chicken,
        Single {
            title: "Herb-Roasted Chicken",
            lead: measured(chicken, "1 lb"),
            staples: &["2 tbsp olive oil", "1 tsp dried herbs", "1 lemon"],
            before: &[
                "Preheat oven to 400°F (200°C).",
                "Rub the chicken with olive oil, herbs, salt, and pepper.",
            ],
            after: &[
                "Roast for 25-30 minutes until the juices run clear.",
                "Squeeze lemon over the top, rest for 5 minutes, and serve.",
            ],
            nutrition: RecipeNutrition::new(280.0, 35.0, 15.0, 2.0),
            minutes: 30,
            servings: 2,
        },
    )
}

fn beef_steak(p: &Pantry) -> Recipe {
    let beef = p.item_with(BEEF).unwrap_or("beef steak");
    single(
        p,
        beef,
        Single {
            title: "Pan-Seared Beef Steak",
            lead: measured(beef, "1 lb"),
            staples: &["1 tbsp oil", "2 tbsp butter", "2 cloves garlic, crushed"],
            before: &[
                "Pat the beef dry and season generously with salt and pepper.",
                "Heat the oil in a heavy skillet over high heat until smoking.",
            ],
            after: &[
                "Sear for 3-4 minutes per side for medium-rare.",
                "Add the butter and garlic and baste for 1 minute.",
                "Rest for 5 minutes before slicing and serving.",
            ],
            nutrition: RecipeNutrition::new(480.0, 40.0, 28.0, 8.0),
            minutes: 25,
            servings: 2,
        },
    )
}

fn baked_fish(p: &Pantry) -> Recipe {
    let fish = p.item_with(FISH).unwrap_or("fish fillets");
    single(
        p,
        fish,
        Single {
            title: "Lemon Herb Baked Fish",
            lead: measured(fish, "12 oz"),
            staples: &["1 lemon, sliced", "2 tbsp olive oil", "1 tsp dried dill"],
            before: &[
                "Preheat oven to 400°F (200°C) and line a baking dish.",
                "Place the fish in the dish and drizzle with olive oil.",
            ],
            after: &[
                "Season with dill, salt, and pepper and top with lemon slices.",
                "Bake for 12-15 minutes until the fish flakes easily.",
            ],
            nutrition: RecipeNutrition::new(240.0, 30.0, 12.0, 4.0),
            minutes: 20,
            servings: 2,
        },
    )
}

fn pork_chops(p: &Pantry) -> Recipe {
    let pork = p.item_with(PORK).unwrap_or("pork chops");
    single(
        p,
        pork,
        Single {
            title: "Garlic and Herb Pork Chops",
            lead: measured(pork, "1 lb"),
            staples: &["2 cloves garlic, minced", "1 tsp dried herbs", "1 tbsp oil"],
            before: &[
                "Season the pork with garlic, herbs, salt, and pepper.",
                "Heat the oil in a skillet over medium-high heat.",
            ],
            after: &[
                "Cook for 4-5 minutes per side until cooked through.",
                "Rest for 3 minutes and serve.",
            ],
            nutrition: RecipeNutrition::new(320.0, 28.0, 22.0, 4.0),
            minutes: 20,
            servings: 2,
        },
    )
}

fn rice_pilaf(p: &Pantry) -> Recipe {
    let rice = p.item_with(RICE).unwrap_or("rice");
    single(
        p,
        rice,
        Single {
            title: "Flavorful Rice Pilaf",
            lead: measured(rice, "1 cup"),
            staples: &["2 cups broth", "1 onion, diced", "2 tbsp butter"],
            before: &[
                "Melt the butter in a saucepan and soften the onion for 3 minutes.",
                "Stir in the rice and toast for 2 minutes.",
            ],
            after: &[
                "Pour in the broth, bring to a boil, then cover and simmer for 18 minutes.",
                "Fluff with a fork and serve.",
            ],
            nutrition: RecipeNutrition::new(220.0, 5.0, 8.0, 35.0),
            minutes: 30,
            servings: 4,
        },
    )
}

fn garlic_pasta(p: &Pantry) -> Recipe {
    let pasta = p.item_with(PASTA).unwrap_or("pasta");
    single(
        p,
        pasta,
        Single {
            title: "Simple Garlic Pasta",
            lead: measured(pasta, "8 oz"),
            staples: &["4 cloves garlic, sliced", "3 tbsp olive oil", "Pinch of chili flakes"],
            before: &[
                "Cook the pasta in salted water until al dente, reserving a little water.",
                "Gently fry the garlic and chili in olive oil until golden.",
            ],
            after: &[
                "Toss the pasta with the garlic oil and a splash of pasta water.",
                "Season and serve immediately.",
            ],
            nutrition: RecipeNutrition::new(380.0, 10.0, 16.0, 48.0),
            minutes: 15,
            servings: 2,
        },
    )
}

fn sandwich(p: &Pantry) -> Recipe {
    let bread = p.item_with(BREAD).unwrap_or("bread");
    single(
        p,
        bread,
        Single {
            title: "Gourmet Sandwich",
            lead: measured(bread, "2 slices"),
            staples: &["1 tbsp mayonnaise or mustard", "Lettuce leaves"],
            before: &["Toast the bread lightly.", "Spread with mayonnaise or mustard."],
            after: &["Add the lettuce, close the sandwich, and cut in half to serve."],
            nutrition: RecipeNutrition::new(350.0, 12.0, 18.0, 35.0),
            minutes: 10,
            servings: 1,
        },
    )
}

fn vegetable_medley(p: &Pantry) -> Recipe {
    let vegetable = p
        .pick(Category::Vegetable, &[])
        .map(|pick| pick.item)
        .unwrap_or("vegetables");
    single(
        p,
        vegetable,
        Single {
            title: "Roasted Vegetable Medley",
            lead: measured(vegetable, "3 cups"),
            staples: &["2 tbsp olive oil", "1 tsp dried herbs"],
            before: &[
                "Preheat oven to 425°F (220°C).",
                "Cut the vegetables into even pieces and toss with oil and herbs.",
            ],
            after: &["Roast for 25-30 minutes, turning halfway, until caramelized."],
            nutrition: RecipeNutrition::new(180.0, 5.0, 10.0, 20.0),
            minutes: 35,
            servings: 4,
        },
    )
}

fn fruit_salad(p: &Pantry) -> Recipe {
    let fruit = p
        .pick(Category::Fruit, &[])
        .map(|pick| pick.item)
        .unwrap_or("mixed fruit");
    single(
        p,
        fruit,
        Single {
            title: "Fresh Fruit Salad",
            lead: measured(fruit, "2 cups"),
            staples: &["1 tbsp honey", "1 tbsp lime juice", "Fresh mint leaves"],
            before: &["Wash and cut the fruit into bite-sized pieces."],
            after: &[
                "Drizzle with honey and lime juice and toss gently.",
                "Garnish with mint and serve chilled.",
            ],
            nutrition: RecipeNutrition::new(150.0, 2.0, 1.0, 38.0),
            minutes: 10,
            servings: 4,
        },
    )
}

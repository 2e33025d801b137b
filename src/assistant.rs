//! The two public entry points.
//!
//! Both follow the same pipeline: validate input, call the model through
//! the retry orchestrator, parse and validate each response, and switch to
//! the offline synthesizers once the retry budget is spent. The only error
//! a caller can see is an [`InputError`].

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api_connection::{CompletionProvider, GenerationPreset};
use crate::classifier::split_ingredients;
use crate::config::AssistantConfig;
use crate::error::{AttemptError, InputError};
use crate::models::{MealSelection, MealType, NutritionData, Recipe};
use crate::nutrition_parser::parse_nutrition;
use crate::nutrition_synth;
use crate::prompts::{nutrition_prompt, recipe_prompt};
use crate::recipe_parser::parse_recipes;
use crate::recipe_synth::{self, disambiguate_titles, request_rng, RECIPES_PER_REQUEST};
use crate::retry::{call_with_retry, RetryOutcome, RetryPolicy};
use crate::validation::{check_plausibility, clamp_nutrition, filter_covered};

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Ai,
    Fallback,
}

/// A result together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated<T> {
    pub value: T,
    pub source: Source,
    /// Model calls made, successful or not.
    pub attempts: u32,
}

#[derive(Debug, Clone)]
pub struct HealthAssistant {
    provider: Arc<dyn CompletionProvider>,
    policy: RetryPolicy,
    recipe_seed: Option<u64>,
}

impl HealthAssistant {
    /// A provider that can never answer gets one attempt and no backoff,
    /// so offline requests go straight to the deterministic path.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &AssistantConfig) -> Self {
        let policy = if provider.is_available() {
            config.retry_policy()
        } else {
            RetryPolicy::new(1, Duration::ZERO)
        };
        Self {
            provider,
            policy,
            recipe_seed: config.recipe_seed,
        }
    }

    /// Uses the provider the configuration describes.
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.provider(), config)
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Nutrition for a free-text food description. Never fails once the
    /// description is non-empty.
    pub async fn analyze_food(&self, description: &str) -> Result<NutritionData, InputError> {
        self.analyze_food_detailed(description)
            .await
            .map(|generated| generated.value)
    }

    pub async fn analyze_food_detailed(
        &self,
        description: &str,
    ) -> Result<Generated<NutritionData>, InputError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InputError::EmptyDescription);
        }

        let prompt = nutrition_prompt(description);
        let prompt = prompt.as_str();
        let outcome =
            call_with_retry(self.policy, move |_| self.request_nutrition(prompt)).await;

        let generated = match outcome {
            RetryOutcome::Success { value, attempts } => Generated {
                value: clamp_nutrition(value, description),
                source: Source::Ai,
                attempts,
            },
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                info!(
                    attempts,
                    error = %last_error,
                    "Nutrition service unavailable, estimating offline"
                );
                Generated {
                    value: clamp_nutrition(nutrition_synth::synthesize(description), description),
                    source: Source::Fallback,
                    attempts,
                }
            }
        };
        Ok(generated)
    }

    async fn request_nutrition(&self, prompt: &str) -> Result<NutritionData, AttemptError> {
        let raw = self
            .provider
            .complete(prompt, GenerationPreset::NUTRITION)
            .await?;
        debug!(response = %raw, "Raw nutrition response");

        let candidate = parse_nutrition(&raw)?;
        check_plausibility(&candidate.value).map_err(AttemptError::Validation)?;
        Ok(candidate.value)
    }

    /// Two recipes that use every listed ingredient. Never fails once at
    /// least one ingredient is given.
    pub async fn generate_recipes(
        &self,
        ingredients: &str,
        meals: &MealSelection,
    ) -> Result<Vec<Recipe>, InputError> {
        self.generate_recipes_detailed(ingredients, meals)
            .await
            .map(|generated| generated.value)
    }

    pub async fn generate_recipes_detailed(
        &self,
        ingredients: &str,
        meals: &MealSelection,
    ) -> Result<Generated<Vec<Recipe>>, InputError> {
        let items = split_ingredients(ingredients);
        if items.is_empty() {
            return Err(InputError::NoIngredients);
        }
        let meal = meals.primary();

        let prompt = recipe_prompt(&items, meals);
        let (prompt, user_items) = (prompt.as_str(), items.as_slice());
        let outcome = call_with_retry(self.policy, move |_| {
            self.request_recipes(prompt, user_items)
        })
        .await;

        let generated = match outcome {
            RetryOutcome::Success { value, attempts } => Generated {
                value: self.top_up(value, &items, meal),
                source: Source::Ai,
                attempts,
            },
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                info!(
                    attempts,
                    error = %last_error,
                    "Recipe service unavailable, building recipes offline"
                );
                let mut rng = request_rng(self.recipe_seed);
                Generated {
                    value: recipe_synth::synthesize(&items, meal, &mut rng),
                    source: Source::Fallback,
                    attempts,
                }
            }
        };
        Ok(generated)
    }

    async fn request_recipes(
        &self,
        prompt: &str,
        items: &[String],
    ) -> Result<Vec<Recipe>, AttemptError> {
        let raw = self
            .provider
            .complete(prompt, GenerationPreset::RECIPES)
            .await?;
        debug!(response = %raw, "Raw recipe response");

        let candidate = parse_recipes(&raw)?;
        let parsed = candidate.value.len();
        let covered = filter_covered(candidate.value, items);
        debug!(
            route = ?candidate.route,
            parsed,
            covered = covered.len(),
            "Checked recipe coverage"
        );
        if covered.is_empty() {
            return Err(AttemptError::Validation(format!(
                "none of the {parsed} recipes uses every ingredient"
            )));
        }
        Ok(covered)
    }

    /// Pads a short model answer with offline recipes so the caller always
    /// gets [`RECIPES_PER_REQUEST`].
    fn top_up(&self, mut recipes: Vec<Recipe>, items: &[String], meal: MealType) -> Vec<Recipe> {
        if recipes.len() < RECIPES_PER_REQUEST {
            let mut rng = request_rng(self.recipe_seed);
            let extra = filter_covered(recipe_synth::synthesize(items, meal, &mut rng), items);
            for recipe in extra {
                if recipes.len() >= RECIPES_PER_REQUEST {
                    break;
                }
                if recipes.iter().all(|existing| existing.title != recipe.title) {
                    recipes.push(recipe);
                }
            }
        }
        recipes.truncate(RECIPES_PER_REQUEST);
        disambiguate_titles(&mut recipes);
        recipes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_connection::{ScriptedProvider, UnavailableProvider};

    fn quick_config() -> AssistantConfig {
        AssistantConfig {
            base_delay_ms: 1,
            recipe_seed: Some(7),
            ..AssistantConfig::offline()
        }
    }

    fn assistant(provider: &Arc<ScriptedProvider>) -> HealthAssistant {
        HealthAssistant::new(provider.clone(), &quick_config())
    }

    const PASTA_RECIPE: &str = r#"[{"title": "Tomato Basil Pasta",
        "ingredients": ["8 oz pasta", "2 tomatoes", "fresh basil"],
        "steps": ["Boil the pasta.", "Toss with tomatoes and basil."],
        "nutrition": {"calories": 420, "protein": 12, "fat": 9, "carbs": 70},
        "cookingTime": "20 minutes", "servings": 2}]"#;

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_a_call() {
        let provider = Arc::new(ScriptedProvider::new());
        let assistant = assistant(&provider);
        assert_eq!(
            assistant.analyze_food("   ").await,
            Err(InputError::EmptyDescription)
        );
        assert_eq!(
            assistant.generate_recipes(" , ", &MealSelection::none()).await,
            Err(InputError::NoIngredients)
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_ai_nutrition_is_clamped() {
        let provider = Arc::new(ScriptedProvider::with_responses([
            r#"{"calories": 2400, "protein": 90, "fat": 40, "carbs": 200}"#,
        ]));
        let generated = assistant(&provider)
            .analyze_food_detailed("large pepperoni pizza")
            .await
            .unwrap();
        assert_eq!(generated.source, Source::Ai);
        assert_eq!(generated.attempts, 1);
        assert_eq!(generated.value.calories, 1000.0);
        assert_eq!(generated.value.protein, 50.0);
        assert_eq!(generated.value.carbs, 100.0);
    }

    #[tokio::test]
    async fn test_implausible_nutrition_consumes_an_attempt() {
        let provider = Arc::new(ScriptedProvider::with_responses([
            r#"{"calories": 0, "protein": 0, "fat": 0, "carbs": 0}"#,
            r#"{"calories": 250, "protein": 10, "fat": 8, "carbs": 30}"#,
        ]));
        let generated = assistant(&provider)
            .analyze_food_detailed("bowl of oatmeal")
            .await
            .unwrap();
        assert_eq!(generated.source, Source::Ai);
        assert_eq!(generated.attempts, 2);
        assert_eq!(generated.value.calories, 250.0);
    }

    #[tokio::test]
    async fn test_nutrition_falls_back_after_exhaustion() {
        let provider = Arc::new(ScriptedProvider::with_responses([
            "Sorry, I can't help with that.",
            "Still no numbers here.",
            "Nope.",
        ]));
        let generated = assistant(&provider)
            .analyze_food_detailed("grilled salmon")
            .await
            .unwrap();
        assert_eq!(generated.source, Source::Fallback);
        assert_eq!(generated.attempts, 3);
        assert_eq!(provider.calls(), 3);
        assert!(generated.value.calories >= 100.0);
    }

    #[tokio::test]
    async fn test_single_covered_recipe_is_topped_up() {
        let provider = Arc::new(ScriptedProvider::with_responses([PASTA_RECIPE]));
        let generated = assistant(&provider)
            .generate_recipes_detailed("pasta, tomatoes", &MealSelection::only(MealType::Dinner))
            .await
            .unwrap();
        assert_eq!(generated.source, Source::Ai);
        assert_eq!(generated.value.len(), 2);
        assert_eq!(generated.value[0].title, "Tomato Basil Pasta");
        let items = vec!["pasta".to_string(), "tomatoes".to_string()];
        assert_eq!(filter_covered(generated.value, &items).len(), 2);
    }

    #[tokio::test]
    async fn test_uncovered_recipes_trigger_retry() {
        let provider = Arc::new(ScriptedProvider::with_responses([
            PASTA_RECIPE,
            PASTA_RECIPE,
            PASTA_RECIPE,
        ]));
        let generated = assistant(&provider)
            .generate_recipes_detailed("chicken, rice", &MealSelection::none())
            .await
            .unwrap();
        assert_eq!(generated.source, Source::Fallback);
        assert_eq!(generated.attempts, 3);
        assert_eq!(generated.value[0].title, "One-Pot Chicken and Rice");
    }

    #[tokio::test]
    async fn test_policy_comes_from_config() {
        let provider = Arc::new(ScriptedProvider::new());
        let config = AssistantConfig {
            max_retries: 2,
            ..quick_config()
        };
        let assistant = HealthAssistant::new(provider.clone(), &config);
        assert_eq!(assistant.policy.base_delay(), Duration::from_millis(1));
        let generated = assistant.analyze_food_detailed("apple").await.unwrap();
        assert_eq!(generated.attempts, 2);
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_unavailable_provider_gets_a_single_attempt() {
        let assistant = HealthAssistant::new(Arc::new(UnavailableProvider), &quick_config());
        assert_eq!(assistant.policy.max_retries(), 1);
        assert_eq!(assistant.policy.base_delay(), Duration::ZERO);
    }
}

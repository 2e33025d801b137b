use health_assistant::api_connection::{
    ApiConnectionError, CompletionProvider, GenerationPreset, GenerativeLanguageProvider,
};
use health_assistant::config::API_KEY_ENV_VAR;
use health_assistant::{AssistantConfig, HealthAssistant, MealSelection, Source};
use serde_json::json;
use std::env;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/test:generateContent";

fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), GENERATE_PATH)
}

fn completion(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_missing_credential_error() {
    let provider = GenerativeLanguageProvider::new("http://127.0.0.1:9/unused", "");
    let result = provider.complete("Hello", GenerationPreset::NUTRITION).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingCredential)));
}

#[tokio::test]
async fn test_successful_call_sends_prompt_preset_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Hello"}]}],
            "generationConfig": {"topK": 40, "maxOutputTokens": 2048}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GenerativeLanguageProvider::new(endpoint(&server), "test-key");
    let text = provider
        .complete("Hello", GenerationPreset::RECIPES)
        .await
        .unwrap();
    assert_eq!(text, "Hi there");
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let provider = GenerativeLanguageProvider::new(endpoint(&server), "test-key");
    match provider.complete("Hello", GenerationPreset::NUTRITION).await {
        Err(ApiConnectionError::ApiError { status, error_body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(error_body, "backend exploded");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = GenerativeLanguageProvider::new(endpoint(&server), "test-key");
    let result = provider.complete("Hello", GenerationPreset::NUTRITION).await;
    assert!(matches!(result, Err(ApiConnectionError::MalformedEnvelope(_))));
}

#[tokio::test]
async fn test_envelope_without_candidates_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let provider = GenerativeLanguageProvider::new(endpoint(&server), "test-key");
    let result = provider.complete("Hello", GenerationPreset::NUTRITION).await;
    assert!(matches!(result, Err(ApiConnectionError::EmptyCompletion)));
}

#[tokio::test]
async fn test_assistant_over_http_retries_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n{\"calories\": 285, \"protein\": 12, \"fat\": 10, \"carbs\": 36}\n```",
        )))
        .mount(&server)
        .await;

    let config = AssistantConfig {
        endpoint: endpoint(&server),
        credential: Some("test-key".to_string()),
        base_delay_ms: 5,
        ..AssistantConfig::offline()
    };
    let assistant = HealthAssistant::from_config(&config);
    let generated = assistant
        .analyze_food_detailed("1 slice of cheese pizza")
        .await
        .unwrap();
    assert_eq!(generated.source, Source::Ai);
    assert_eq!(generated.attempts, 2);
    assert_eq!(generated.value.calories, 285.0);
}

#[tokio::test]
#[ignore]
async fn test_live_recipe_call() {
    dotenv::dotenv().ok();
    if env::var(API_KEY_ENV_VAR).is_err() {
        println!("Skipping test_live_recipe_call: {} not set.", API_KEY_ENV_VAR);
        return;
    }

    let config = AssistantConfig::from_env().expect("config should load");
    let assistant = HealthAssistant::from_config(&config);
    let recipes = assistant
        .generate_recipes("chicken, rice, broccoli", &MealSelection::none())
        .await
        .unwrap();
    println!("Live recipes: {:#?}", recipes);
    assert_eq!(recipes.len(), 2);
}

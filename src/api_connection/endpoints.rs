use serde::{Deserialize, Serialize};

pub const DEFAULT_GENERATE_CONTENT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Sampling parameters sent with every request of one use case.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPreset {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationPreset {
    /// Near-deterministic output for nutrition facts.
    pub const NUTRITION: GenerationPreset = GenerationPreset {
        temperature: 0.1,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 1024,
    };

    pub const RECIPES: GenerationPreset = GenerationPreset {
        temperature: 0.6,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 2048,
    };
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationPreset,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str, preset: GenerationPreset) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
                role: None,
            }],
            generation_config: preset,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if it has any text.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_wire_field_names() {
        let request = GenerateContentRequest::from_prompt("hello", GenerationPreset::NUTRITION);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
        assert!(value["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\":"},{"text":"1}]"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("[{\"a\":1}]"));
    }

    #[test]
    fn test_first_text_none_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
    }
}

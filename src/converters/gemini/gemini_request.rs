use serde::{Deserialize, Serialize};

use crate::converters::gemini::{GeminiContent, GeminiPart};

/// Body of a `generateContent` call. Serializes to
/// `{"contents":[{"parts":[{"text":"..."}]}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

impl From<&str> for GeminiRequest {
    fn from(question: &str) -> Self {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: None,
                parts: Some(vec![GeminiPart::text(question)]),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_wire_shape() {
        let body = serde_json::to_string(&GeminiRequest::from("What is the capital of France?")).unwrap();
        assert_eq!(
            body,
            r#"{"contents":[{"parts":[{"text":"What is the capital of France?"}]}]}"#
        );
    }

    #[test]
    fn test_empty_question() {
        let body = serde_json::to_value(GeminiRequest::from("")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": ""}]}]}));
    }

    #[test]
    fn test_special_characters_survive() {
        let question = "He said \"hi\" \\ then left\n\ttab ¿ 東京? 🚀 \u{0007}";
        let body = serde_json::to_vec(&GeminiRequest::from(question)).unwrap();

        let decoded: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded["contents"][0]["parts"][0]["text"], question);

        let back: GeminiRequest = serde_json::from_slice(&body).unwrap();
        assert_eq!(back, GeminiRequest::from(question));
    }
}

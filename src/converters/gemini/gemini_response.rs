use serde::Deserialize;

use crate::converters::gemini::{GeminiCandidate, GeminiUsage};
use crate::converters::helpers::{lenient, lenient_seq};
use crate::error::ShapeError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "usageMetadata")]
    #[serde(default, deserialize_with = "lenient")]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "modelVersion")]
    #[serde(default, deserialize_with = "lenient")]
    pub model_version: Option<String>,
    #[serde(rename = "responseId")]
    #[serde(default, deserialize_with = "lenient")]
    pub response_id: Option<String>,
}

impl GeminiResponse {
    pub fn first_candidate(&self) -> Option<&GeminiCandidate> {
        self.candidates.as_deref().and_then(|c| c.first())
    }

    /// One line of response metadata for debug logs. Fields the server left
    /// out are skipped.
    pub fn summary(&self) -> String {
        let mut fields = Vec::new();
        if let Some(response_id) = &self.response_id {
            fields.push(format!("response_id={}", response_id));
        }
        if let Some(model_version) = &self.model_version {
            fields.push(format!("model_version={}", model_version));
        }
        if let Some(candidate) = self.first_candidate() {
            if let Some(index) = candidate.index {
                fields.push(format!("candidate_index={}", index));
            }
            if let Some(finish_reason) = &candidate.finish_reason {
                fields.push(format!("finish_reason={}", finish_reason));
            }
        }
        if let Some(usage) = &self.usage_metadata {
            let counts = [
                ("prompt_tokens", usage.prompt_token_count),
                ("candidates_tokens", usage.candidates_token_count),
                ("thoughts_tokens", usage.thoughts_token_count),
                ("total_tokens", usage.total_token_count),
            ];
            for (name, count) in counts {
                if let Some(count) = count {
                    fields.push(format!("{}={}", name, count));
                }
            }
        }
        fields.join(" ")
    }

    /// Text of the first part of the first candidate. Anything after that is
    /// ignored.
    pub fn extract_answer(&self) -> Result<&str, ShapeError> {
        let candidate = self.first_candidate().ok_or(ShapeError::NoCandidates)?;
        let content = candidate.content.as_ref().ok_or(ShapeError::NoContent)?;
        let part = content
            .parts
            .as_deref()
            .and_then(|p| p.first())
            .ok_or(ShapeError::NoParts)?;
        part.text.as_deref().ok_or(ShapeError::NoText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_answer() {
        let resp = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Paris"}], "role": "model"},
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 8, "candidatesTokenCount": 1, "totalTokenCount": 9},
            "modelVersion": "gemini-1.5-flash-002",
            "responseId": "iJDOaOzkBM70jMcPxJmmyAw"
        }));
        assert_eq!(resp.extract_answer(), Ok("Paris"));
        assert_eq!(resp.model_version.as_deref(), Some("gemini-1.5-flash-002"));
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, Some(9));
    }

    #[test]
    fn test_summary() {
        let resp = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "Paris"}]}, "finishReason": "STOP", "index": 0}],
            "usageMetadata": {"promptTokenCount": 8, "candidatesTokenCount": 1, "totalTokenCount": 57, "thoughtsTokenCount": 48},
            "modelVersion": "gemini-2.5-flash",
            "responseId": "iJDOaOzkBM70jMcPxJmmyAw"
        }));
        assert_eq!(
            resp.summary(),
            "response_id=iJDOaOzkBM70jMcPxJmmyAw model_version=gemini-2.5-flash candidate_index=0 \
             finish_reason=STOP prompt_tokens=8 candidates_tokens=1 thoughts_tokens=48 total_tokens=57"
        );

        assert_eq!(parse(json!({"candidates": []})).summary(), "");
    }

    #[test]
    fn test_only_first_candidate_and_part() {
        let resp = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        }));
        assert_eq!(resp.extract_answer(), Ok("first"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(parse(json!({"candidates": []})).extract_answer(), Err(ShapeError::NoCandidates));
        assert_eq!(parse(json!({})).extract_answer(), Err(ShapeError::NoCandidates));
        assert_eq!(
            parse(json!({"candidates": {"content": {}}})).extract_answer(),
            Err(ShapeError::NoCandidates)
        );
    }

    #[test]
    fn test_no_content() {
        assert_eq!(
            parse(json!({"candidates": [{"finishReason": "SAFETY"}]})).extract_answer(),
            Err(ShapeError::NoContent)
        );
        assert_eq!(
            parse(json!({"candidates": [{"content": "Paris"}]})).extract_answer(),
            Err(ShapeError::NoContent)
        );
        assert_eq!(parse(json!({"candidates": ["Paris"]})).extract_answer(), Err(ShapeError::NoContent));
    }

    #[test]
    fn test_no_parts() {
        assert_eq!(
            parse(json!({"candidates": [{"content": {"parts": []}}]})).extract_answer(),
            Err(ShapeError::NoParts)
        );
        assert_eq!(
            parse(json!({"candidates": [{"content": {"role": "model"}}]})).extract_answer(),
            Err(ShapeError::NoParts)
        );
    }

    #[test]
    fn test_no_text() {
        assert_eq!(
            parse(json!({"candidates": [{"content": {"parts": [{"text": 42}]}}]})).extract_answer(),
            Err(ShapeError::NoText)
        );
        assert_eq!(
            parse(json!({"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": ""}}]}}]}))
                .extract_answer(),
            Err(ShapeError::NoText)
        );
    }

    #[test]
    fn test_empty_text_is_an_answer() {
        let resp = parse(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}));
        assert_eq!(resp.extract_answer(), Ok(""));
    }
}

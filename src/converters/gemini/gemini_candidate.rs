use crate::converters::gemini::GeminiContent;
use crate::converters::helpers::lenient;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<GeminiContent>,
    // Kept as a string; new reasons appear upstream faster than we track them.
    #[serde(rename = "finishReason")]
    #[serde(default, deserialize_with = "lenient")]
    pub finish_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<u32>,
}

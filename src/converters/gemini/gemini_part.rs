use crate::converters::helpers::lenient;
use serde::{Deserialize, Serialize};

/// A plain text fragment. Non-text parts (inline data, function calls)
/// deserialize with `text == None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, deserialize_with = "lenient")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

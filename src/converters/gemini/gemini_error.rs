use serde::Deserialize;

/// Envelope returned with non-2xx statuses, e.g.
/// `{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl GeminiErrorResponse {
    /// Best-effort human readable summary of an error body.
    pub fn describe(body: &[u8]) -> String {
        match serde_json::from_slice::<GeminiErrorResponse>(body) {
            Ok(resp) => {
                let GeminiErrorBody { code, message, status } = resp.error;
                let label = match (status, code) {
                    (Some(status), Some(code)) => Some(format!("{} ({})", status, code)),
                    (Some(status), None) => Some(status),
                    (None, Some(code)) => Some(code.to_string()),
                    (None, None) => None,
                };
                match (label, message) {
                    (Some(label), Some(message)) => format!("{}: {}", label, message),
                    (None, Some(message)) => message,
                    (Some(label), None) => label,
                    (None, None) => String::from_utf8_lossy(body).into_owned(),
                }
            }
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                let mut text: String = text.chars().take(512).collect();
                if text.is_empty() {
                    text.push_str("<empty body>");
                }
                text
            }
        }
    }
}

use crate::config::Config;
use crate::converters::gemini::{GeminiErrorResponse, GeminiRequest, GeminiResponse};
use crate::error::AskError;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug)]
pub struct LlmClient {
    http_client: reqwest::Client,
    config: Config,
}

impl LlmClient {
    pub fn new(http_client: reqwest::Client, config: Config) -> Self {
        Self { http_client, config }
    }

    /// `<api_base>/models/<model>:generateContent?key=<api_key>`
    pub fn build_target_url(config: &Config, api_key: &str) -> Result<Url, AskError> {
        let api_base = &config.api_base;
        let path = format!("models/{}:generateContent", config.model);
        let base = if api_base.ends_with('/') { format!("{}{}", api_base, path) } else { format!("{}/{}", api_base, path) };

        let url = Url::parse_with_params(&base, &[("key", api_key)]).map_err(|e| AskError::InvalidUrl {
            url: base.clone(),
            message: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AskError::InvalidUrl {
                url: base,
                message: format!("unsupported scheme {}", other),
            }),
        }
    }

    /// Sends `question` and returns the first text part of the first
    /// candidate. Exactly one request is made; nothing is retried.
    pub async fn ask(&self, question: &str, api_key: &str) -> Result<String, AskError> {
        let target_url = Self::build_target_url(&self.config, api_key)?;
        let body = build_request_body(question)?;

        info!("Sending question to: {}", redact(&target_url));
        debug!("request body: {}", String::from_utf8_lossy(&body));

        let response = self
            .http_client
            .post(target_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AskError::Transport(e.without_url()))?;

        let status = response.status();
        debug!("response status: {}", status);

        // Consumes the response; the connection is released before parsing.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AskError::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(AskError::Api {
                status: status.as_u16(),
                message: GeminiErrorResponse::describe(&bytes),
            });
        }

        let parsed = parse_response(&bytes)?;
        debug!("response metadata: {}", parsed.summary());

        let answer = parsed.extract_answer()?;
        Ok(answer.to_string())
    }
}

pub fn build_request_body(question: &str) -> Result<Vec<u8>, AskError> {
    serde_json::to_vec(&GeminiRequest::from(question)).map_err(AskError::Encode)
}

/// Anything that is JSON but not an object is rejected here, before the
/// shape checks run. A bare `null` is an empty response, which then fails
/// the shape checks at the first level.
pub fn parse_response(body: &[u8]) -> Result<GeminiResponse, AskError> {
    let value: Value = serde_json::from_slice(body).map_err(AskError::Decode)?;
    if value.is_null() {
        return Ok(GeminiResponse::default());
    }
    if !value.is_object() {
        return Err(AskError::Decode(serde::de::Error::custom(
            "expected a JSON object at the top level",
        )));
    }
    serde_json::from_value(value).map_err(AskError::Decode)
}

fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

use thiserror::Error;

/// Failures while resolving settings before any request is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error loading env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("API key not found in environment")]
    MissingApiKey,

    #[error("Error reading config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid proxy {proxy}: {source}")]
    Proxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The response was valid JSON but did not have the expected nesting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("No candidates found in response")]
    NoCandidates,
    #[error("No content found in first candidate")]
    NoContent,
    #[error("No parts found in content")]
    NoParts,
    #[error("No text found in parts")]
    NoText,
}

/// One variant per stage of a single ask round trip.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Error marshalling JSON: {0}")]
    Encode(#[source] serde_json::Error),

    // Holds the redacted url; the key never reaches the message.
    #[error("Error creating request for {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Error sending request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Error decoding response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

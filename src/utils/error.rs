use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("Feed request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Feed returned HTTP {status} from {url}")]
    FeedStatusError { status: u16, url: String },

    #[error("Feed is not a GeoJSON FeatureCollection: {message}")]
    FeedFormatError { message: String },

    #[error("Malformed feature #{index}: {reason}")]
    MalformedFeatureError { index: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Data,
    Config,
    System,
}

impl QuakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuakeError::FetchError(_)
            | QuakeError::FeedStatusError { .. }
            | QuakeError::FeedFormatError { .. } => ErrorCategory::Fetch,
            QuakeError::MalformedFeatureError { .. } => ErrorCategory::Data,
            QuakeError::ConfigError { .. }
            | QuakeError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            QuakeError::IoError(_) | QuakeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// True when the feed could not be obtained at all, as opposed to a
    /// single bad feature inside an otherwise usable feed.
    pub fn is_fetch_failure(&self) -> bool {
        self.category() == ErrorCategory::Fetch
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Fetch | ErrorCategory::Data => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuakeError::FetchError(e) if e.is_timeout() => {
                "The earthquake feed did not respond in time".to_string()
            }
            QuakeError::FetchError(_) => "Could not reach the earthquake feed".to_string(),
            QuakeError::FeedStatusError { status, .. } => {
                format!("The earthquake feed answered with HTTP {}", status)
            }
            QuakeError::FeedFormatError { .. } => {
                "The earthquake feed returned data that is not GeoJSON".to_string()
            }
            QuakeError::MalformedFeatureError { index, .. } => {
                format!("Earthquake #{} in the feed is incomplete", index)
            }
            QuakeError::IoError(e) => format!("Could not write the map: {}", e),
            QuakeError::SerializationError(_) => "Could not encode the map data".to_string(),
            QuakeError::ConfigError { message } => format!("Configuration problem: {}", message),
            QuakeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => "Check the network connection and the feed URL, then run again",
            ErrorCategory::Data => "The feature was skipped; no action is needed",
            ErrorCategory::Config => "Fix the command line flags or the TOML config file",
            ErrorCategory::System => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeError>;

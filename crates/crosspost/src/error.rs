use std::path::PathBuf;

use crosspost_core::platform::Platform;

/// Result type for publishing operations
pub type PublishResult<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The article file is missing, unreadable, or its front matter cannot be decoded.
    /// Fatal: the run stops before any platform is attempted.
    #[error("Failed to read article {}: {reason}", .path.display())]
    ArticleRead { path: PathBuf, reason: String },

    #[error("{platform} API error: {status} - {body}")]
    PlatformApi {
        platform: Platform,
        status: u16,
        body: String,
    },

    /// HTTP success carrying a GraphQL `errors` list
    #[error("{platform} GraphQL error: {messages}")]
    PlatformGraphQL { platform: Platform, messages: String },

    #[error("{platform} request failed: {source}")]
    Network {
        platform: Platform,
        #[source]
        source: reqwest::Error,
    },

    #[error("{platform} returned an unexpected response: {reason}")]
    InvalidResponse { platform: Platform, reason: String },

    #[error("{platform} credentials are not configured")]
    MissingCredentials { platform: Platform },
}

impl Error {
    pub fn network(platform: Platform, source: reqwest::Error) -> Self {
        Self::Network { platform, source }
    }

    pub fn invalid_response(platform: Platform, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            platform,
            reason: reason.into(),
        }
    }
}

pub mod devto;
pub mod hashnode;
pub mod medium;

use crosspost_core::article::Article;
use crosspost_core::config::SiteConfig;
use crosspost_core::platform::Platform;
use serde_json::Value;

use crate::error::{Error, PublishResult};
use crate::prelude::*;
use crate::retry::RetryPolicy;

/// Publish API base URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub devto: String,
    pub hashnode: String,
    pub medium: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            devto: "https://dev.to/api".to_string(),
            hashnode: "https://gql.hashnode.com".to_string(),
            medium: "https://api.medium.com/v1".to_string(),
        }
    }
}

/// Dev.to configuration from environment variables
#[derive(Debug, Clone)]
pub struct DevToConfig {
    pub api_key: String,
}

impl DevToConfig {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: env_credential("DEVTO_API_KEY")?,
        })
    }
}

/// Hashnode configuration from environment variables
#[derive(Debug, Clone)]
pub struct HashnodeConfig {
    pub token: String,
    pub publication_id: String,
}

impl HashnodeConfig {
    /// Both HASHNODE_TOKEN and HASHNODE_PUBLICATION_ID are required
    pub fn from_env() -> Option<Self> {
        Some(Self {
            token: env_credential("HASHNODE_TOKEN")?,
            publication_id: env_credential("HASHNODE_PUBLICATION_ID")?,
        })
    }
}

/// Medium configuration from environment variables
#[derive(Debug, Clone)]
pub struct MediumConfig {
    pub token: String,
}

impl MediumConfig {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            token: env_credential("MEDIUM_TOKEN")?,
        })
    }
}

/// Credentials for every platform; `None` means the platform is skipped.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub devto: Option<DevToConfig>,
    pub hashnode: Option<HashnodeConfig>,
    pub medium: Option<MediumConfig>,
}

impl Credentials {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            devto: DevToConfig::from_env(),
            hashnode: HashnodeConfig::from_env(),
            medium: MediumConfig::from_env(),
        }
    }

    pub fn is_configured(&self, platform: Platform) -> bool {
        match platform {
            Platform::DevTo => self.devto.is_some(),
            Platform::Hashnode => self.hashnode.is_some(),
            Platform::Medium => self.medium.is_some(),
        }
    }
}

/// Unset and blank variables both count as missing
fn env_credential(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Everything a publisher needs besides its credentials and the article
#[derive(Debug, Clone, Copy)]
pub struct PublishContext<'a> {
    pub client: &'a reqwest::Client,
    pub endpoints: &'a Endpoints,
    pub retry: &'a RetryPolicy,
    pub site: &'a SiteConfig,
}

/// Create the HTTP client shared by every publisher
pub fn create_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("crosspost/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Publish an article to one platform with that platform's credentials.
pub async fn publish(
    platform: Platform,
    ctx: &PublishContext<'_>,
    credentials: &Credentials,
    article: &Article,
) -> PublishResult<Value> {
    let missing = || Error::MissingCredentials { platform };

    match platform {
        Platform::DevTo => {
            let config = credentials.devto.as_ref().ok_or_else(missing)?;
            devto::publish(ctx, config, article).await
        }
        Platform::Hashnode => {
            let config = credentials.hashnode.as_ref().ok_or_else(missing)?;
            hashnode::publish(ctx, config, article).await
        }
        Platform::Medium => {
            let config = credentials.medium.as_ref().ok_or_else(missing)?;
            medium::publish(ctx, config, article).await
        }
    }
}

/// Pass 2xx responses through; turn anything else into `Error::PlatformApi`.
pub(crate) async fn ensure_success(
    platform: Platform,
    response: reqwest::Response,
) -> PublishResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::PlatformApi {
        platform,
        status: status.as_u16(),
        body,
    })
}

/// Decode a response body as JSON
pub(crate) async fn read_json(platform: Platform, response: reqwest::Response) -> PublishResult<Value> {
    response
        .json::<Value>()
        .await
        .map_err(|e| Error::invalid_response(platform, e.to_string()))
}

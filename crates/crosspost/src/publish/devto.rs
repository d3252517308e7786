//! Dev.to publisher

use crosspost_core::article::Article;
use crosspost_core::payload::devto_payload;
use crosspost_core::platform::Platform;
use serde_json::Value;

use super::{ensure_success, read_json, DevToConfig, PublishContext};
use crate::error::{Error, PublishResult};
use crate::retry::retry;

const PLATFORM: Platform = Platform::DevTo;

/// Create an unpublished Dev.to article.
///
/// Returns the created article as returned by the API (`id`, `url`, ...).
pub async fn publish(
    ctx: &PublishContext<'_>,
    config: &DevToConfig,
    article: &Article,
) -> PublishResult<Value> {
    let payload = devto_payload(article, ctx.site);
    let url = format!("{}/articles", ctx.endpoints.devto.trim_end_matches('/'));
    log::debug!("POST {url}");

    let client = ctx.client;
    let (url, payload, api_key) = (url.as_str(), &payload, config.api_key.as_str());

    retry(ctx.retry, move || async move {
        let response = client
            .post(url)
            .header("api-key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::network(PLATFORM, e))?;

        let response = ensure_success(PLATFORM, response).await?;
        read_json(PLATFORM, response).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::test_support::{article, endpoints, no_delay, site};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn publishes_draft_with_devto_tags() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .and(header("api-key", "devto-key"))
            .and(body_partial_json(json!({
                "article": {
                    "title": "Hello",
                    "published": false,
                    "canonical_url": "https://swiderski.tech/my-post",
                    "tags": ["ab", "c"],
                    "description": "Intro"
                }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": 1, "url": "https://dev.to/me/hello" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let endpoints = endpoints(&server.uri());
        let retry = no_delay();
        let site = site();
        let ctx = PublishContext {
            client: &client,
            endpoints: &endpoints,
            retry: &retry,
            site: &site,
        };
        let config = DevToConfig {
            api_key: "devto-key".to_string(),
        };

        let result = publish(&ctx, &config, &article()).await.unwrap();
        assert_eq!(result["url"], "https://dev.to/me/hello");
    }

    #[tokio::test]
    async fn retries_then_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(3)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let endpoints = endpoints(&server.uri());
        let retry = no_delay();
        let site = site();
        let ctx = PublishContext {
            client: &client,
            endpoints: &endpoints,
            retry: &retry,
            site: &site,
        };
        let config = DevToConfig {
            api_key: "wrong".to_string(),
        };

        let err = publish(&ctx, &config, &article()).await.unwrap_err();
        match err {
            Error::PlatformApi {
                platform,
                status,
                body,
            } => {
                assert_eq!(platform, Platform::DevTo);
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

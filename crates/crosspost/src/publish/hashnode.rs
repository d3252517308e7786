//! Hashnode publisher (GraphQL)

use crosspost_core::article::Article;
use crosspost_core::payload::{graphql_error_messages, hashnode_payload, hashnode_post, GraphQlResponse};
use crosspost_core::platform::Platform;
use serde_json::Value;

use super::{ensure_success, HashnodeConfig, PublishContext};
use crate::error::{Error, PublishResult};
use crate::retry::retry;

const PLATFORM: Platform = Platform::Hashnode;

/// Publish a post to the configured Hashnode publication.
///
/// A 2xx response can still carry GraphQL errors; those fail with
/// `Error::PlatformGraphQL`. Returns `data.publishPost.post`.
pub async fn publish(
    ctx: &PublishContext<'_>,
    config: &HashnodeConfig,
    article: &Article,
) -> PublishResult<Value> {
    let payload = hashnode_payload(article, &config.publication_id, ctx.site);
    let url = ctx.endpoints.hashnode.as_str();
    log::debug!("POST {url} (publication {})", config.publication_id);

    let client = ctx.client;
    let (payload, token) = (&payload, config.token.as_str());

    retry(ctx.retry, move || async move {
        let response = client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, token)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::network(PLATFORM, e))?;

        let response = ensure_success(PLATFORM, response).await?;
        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| Error::invalid_response(PLATFORM, e.to_string()))?;

        if let Some(messages) = graphql_error_messages(&body) {
            return Err(Error::PlatformGraphQL {
                platform: PLATFORM,
                messages,
            });
        }

        hashnode_post(&body).map_err(|reason| Error::invalid_response(PLATFORM, reason))
    })
    .await
}

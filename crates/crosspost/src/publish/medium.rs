//! Medium publisher

use crosspost_core::article::Article;
use crosspost_core::payload::{medium_data, medium_payload, medium_user_id};
use crosspost_core::platform::Platform;
use serde_json::Value;

use super::{ensure_success, read_json, MediumConfig, PublishContext};
use crate::error::{Error, PublishResult};
use crate::retry::retry;

const PLATFORM: Platform = Platform::Medium;

/// Create a Medium draft.
///
/// Two calls per attempt: `GET /me` for the user id, then `POST /users/{id}/posts`.
/// A failed user lookup skips the post call. Returns Medium's `data` object.
pub async fn publish(
    ctx: &PublishContext<'_>,
    config: &MediumConfig,
    article: &Article,
) -> PublishResult<Value> {
    let payload = medium_payload(article, ctx.site);
    let base_url = ctx.endpoints.medium.trim_end_matches('/');

    let client = ctx.client;
    let (payload, bearer) = (&payload, format!("Bearer {}", config.token));
    let bearer = bearer.as_str();

    retry(ctx.retry, move || async move {
        let user_url = format!("{base_url}/me");
        log::debug!("GET {user_url}");

        let response = client
            .get(&user_url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|e| Error::network(PLATFORM, e))?;
        let response = ensure_success(PLATFORM, response).await?;
        let user = read_json(PLATFORM, response).await?;
        let user_id =
            medium_user_id(&user).map_err(|reason| Error::invalid_response(PLATFORM, reason))?;

        let posts_url = format!("{base_url}/users/{user_id}/posts");
        log::debug!("POST {posts_url}");

        let response = client
            .post(&posts_url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::network(PLATFORM, e))?;
        let response = ensure_success(PLATFORM, response).await?;
        let created = read_json(PLATFORM, response).await?;

        medium_data(created).map_err(|reason| Error::invalid_response(PLATFORM, reason))
    })
    .await
}

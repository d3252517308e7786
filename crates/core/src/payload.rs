//! Request bodies and response decoding for the three publish APIs
//!
//! This module contains zero I/O operations and is fully testable with fixture data.
//! The shell sends what these functions build and hands the parsed JSON back here.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::article::Article;
use crate::config::SiteConfig;
use crate::content::transform_content;
use crate::platform::Platform;
use crate::tags::transform_tags;

/// Hashnode GraphQL mutation creating a post in a publication
pub const HASHNODE_PUBLISH_MUTATION: &str = r#"
mutation PublishPost($input: PublishPostInput!) {
  publishPost(input: $input) {
    post {
      id
      url
      title
    }
  }
}
"#;

/// Hashnode rejects subtitles longer than this many characters
pub const HASHNODE_SUBTITLE_MAX_CHARS: usize = 150;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// GraphQL response envelope
#[derive(Debug, Deserialize, Clone)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of a GraphQL `errors` list
#[derive(Debug, Deserialize, Clone)]
pub struct GraphQlError {
    pub message: String,
}

// ============================================================================
// Request Builders
// ============================================================================

/// Dev.to `POST /articles` body. Always created as an unpublished draft.
pub fn devto_payload(article: &Article, site: &SiteConfig) -> Value {
    let mut body = json!({
        "title": article.title,
        "published": false,
        "body_markdown": transform_content(&article.content, Platform::DevTo, site),
        "canonical_url": article.canonical,
        "tags": transform_tags(&article.tags, Platform::DevTo),
        "description": article.description,
    });

    if let Some(image) = &article.image {
        body["main_image"] = json!(image);
    }

    json!({ "article": body })
}

/// Keep at most `max` characters, ending on `…` when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Hashnode `publishPost` mutation request.
pub fn hashnode_payload(article: &Article, publication_id: &str, site: &SiteConfig) -> Value {
    let mut input = json!({
        "title": article.title,
        "contentMarkdown": transform_content(&article.content, Platform::Hashnode, site),
        "tags": transform_tags(&article.tags, Platform::Hashnode),
        "canonicalUrl": article.canonical,
        "publicationId": publication_id,
        "hideFromHashnodeFeed": false,
    });

    let subtitle = article.description.trim();
    if !subtitle.is_empty() {
        input["subtitle"] = json!(truncate_chars(subtitle, HASHNODE_SUBTITLE_MAX_CHARS));
    }

    if let Some(image) = &article.image {
        input["coverImageOptions"] = json!({ "coverImageURL": image });
    }

    json!({
        "query": HASHNODE_PUBLISH_MUTATION,
        "variables": { "input": input },
    })
}

/// Medium `POST /users/{id}/posts` body. Always created as a draft.
pub fn medium_payload(article: &Article, site: &SiteConfig) -> Value {
    json!({
        "title": article.title,
        "contentFormat": "markdown",
        "content": transform_content(&article.content, Platform::Medium, site),
        "canonicalUrl": article.canonical,
        "tags": transform_tags(&article.tags, Platform::Medium),
        "publishStatus": "draft",
    })
}

// ============================================================================
// Response Decoders
// ============================================================================

/// Joined GraphQL error messages, or `None` when the response carries no errors.
pub fn graphql_error_messages(response: &GraphQlResponse) -> Option<String> {
    let errors = response.errors.as_ref().filter(|e| !e.is_empty())?;
    Some(
        errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// The created post from a successful `publishPost` response.
pub fn hashnode_post(response: &GraphQlResponse) -> Result<Value, String> {
    response
        .data
        .as_ref()
        .and_then(|data| data.pointer("/publishPost/post"))
        .filter(|post| !post.is_null())
        .cloned()
        .ok_or_else(|| "response has no data.publishPost.post".to_string())
}

/// The authenticated user's id from Medium's `GET /me` response.
pub fn medium_user_id(response: &Value) -> Result<String, String> {
    response
        .pointer("/data/id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "user response has no data.id".to_string())
}

/// The `data` object Medium wraps every response in.
pub fn medium_data(response: Value) -> Result<Value, String> {
    match response {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| "response has no data field".to_string()),
        _ => Err("response is not a JSON object".to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            title: "Hello".to_string(),
            content: "![a](/assets/a.png)\n\n```mermaid\ngraph TD\n```\n".to_string(),
            description: "A short intro".to_string(),
            canonical: "https://swiderski.tech/hello".to_string(),
            tags: vec![
                "a b".to_string(),
                "c".to_string(),
                "d".to_string(),
                "e".to_string(),
                "f".to_string(),
                "g".to_string(),
            ],
            date: "2024-01-15".to_string(),
            image: Some("https://swiderski.tech/assets/a.png".to_string()),
        }
    }

    #[test]
    fn test_devto_payload() {
        let payload = devto_payload(&article(), &SiteConfig::default());
        let body = &payload["article"];

        assert_eq!(body["title"], "Hello");
        assert_eq!(body["published"], false);
        assert_eq!(body["canonical_url"], "https://swiderski.tech/hello");
        assert_eq!(body["tags"], json!(["ab", "c", "d", "e"]));
        assert_eq!(body["description"], "A short intro");
        assert_eq!(body["main_image"], "https://swiderski.tech/assets/a.png");

        let markdown = body["body_markdown"].as_str().unwrap();
        assert!(markdown.contains("https://swiderski.tech/assets/a.png"));
        assert!(!markdown.contains("```mermaid"));
    }

    #[test]
    fn test_devto_payload_without_image() {
        let mut article = article();
        article.image = None;
        let payload = devto_payload(&article, &SiteConfig::default());
        assert!(payload["article"].get("main_image").is_none());
    }

    #[test]
    fn test_hashnode_payload() {
        let payload = hashnode_payload(&article(), "pub-1", &SiteConfig::default());
        let input = &payload["variables"]["input"];

        assert!(payload["query"].as_str().unwrap().contains("publishPost"));
        assert_eq!(input["publicationId"], "pub-1");
        assert_eq!(input["hideFromHashnodeFeed"], false);
        assert_eq!(input["canonicalUrl"], "https://swiderski.tech/hello");
        assert_eq!(input["tags"].as_array().unwrap().len(), 6);
        assert_eq!(input["tags"][0], json!({ "name": "a b" }));
        assert_eq!(input["subtitle"], "A short intro");
        assert_eq!(
            input["coverImageOptions"]["coverImageURL"],
            "https://swiderski.tech/assets/a.png"
        );
        assert!(input["contentMarkdown"]
            .as_str()
            .unwrap()
            .contains("```mermaid\ngraph TD\n```"));
    }

    #[test]
    fn test_hashnode_subtitle_is_capped() {
        let mut article = article();
        article.description = "é".repeat(400);

        let payload = hashnode_payload(&article, "pub-1", &SiteConfig::default());
        let subtitle = payload["variables"]["input"]["subtitle"].as_str().unwrap();

        assert_eq!(subtitle.chars().count(), HASHNODE_SUBTITLE_MAX_CHARS);
        assert!(subtitle.ends_with('…'));
    }

    #[test]
    fn test_hashnode_subtitle_omitted_without_description() {
        let mut article = article();
        article.description = "  ".to_string();

        let payload = hashnode_payload(&article, "pub-1", &SiteConfig::default());
        assert!(payload["variables"]["input"].get("subtitle").is_none());
    }

    #[test]
    fn test_medium_payload() {
        let payload = medium_payload(&article(), &SiteConfig::default());

        assert_eq!(payload["contentFormat"], "markdown");
        assert_eq!(payload["publishStatus"], "draft");
        assert_eq!(payload["tags"], json!(["a-b", "c", "d", "e", "f"]));
        assert!(payload["content"].as_str().unwrap().contains("📊"));
    }

    #[test]
    fn test_graphql_error_messages() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "errors": [{ "message": "Bad tag" }, { "message": "Unauthorized" }]
        }))
        .unwrap();
        assert_eq!(
            graphql_error_messages(&response).as_deref(),
            Some("Bad tag, Unauthorized")
        );
    }

    #[test]
    fn test_graphql_empty_errors_are_not_errors() {
        let response: GraphQlResponse =
            serde_json::from_value(json!({ "data": {}, "errors": [] })).unwrap();
        assert_eq!(graphql_error_messages(&response), None);
    }

    #[test]
    fn test_hashnode_post() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": { "publishPost": { "post": { "id": "1", "url": "https://h.dev/p" } } }
        }))
        .unwrap();
        assert_eq!(hashnode_post(&response).unwrap()["url"], "https://h.dev/p");

        let empty: GraphQlResponse =
            serde_json::from_value(json!({ "data": { "publishPost": null } })).unwrap();
        assert!(hashnode_post(&empty).is_err());
    }

    #[test]
    fn test_medium_decoders() {
        assert_eq!(
            medium_user_id(&json!({ "data": { "id": "u-42" } })).unwrap(),
            "u-42"
        );
        assert!(medium_user_id(&json!({ "data": {} })).is_err());

        let data = medium_data(json!({ "data": { "url": "https://medium.com/p/1" } })).unwrap();
        assert_eq!(data["url"], "https://medium.com/p/1");
        assert!(medium_data(json!([1, 2])).is_err());
    }
}

use serde::Serialize;

use crate::platform::Platform;

/// Dev.to rejects articles with more than four tags
pub const DEVTO_MAX_TAGS: usize = 4;

/// Medium keeps at most five tags per post
pub const MEDIUM_MAX_TAGS: usize = 5;

/// Tag object in the shape Hashnode's `PublishPostInput` expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedTag {
    pub name: String,
}

/// Tags reshaped for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlatformTags {
    /// Plain strings (Dev.to, Medium)
    Plain(Vec<String>),
    /// `{ "name": tag }` objects (Hashnode)
    Named(Vec<NamedTag>),
}

impl PlatformTags {
    pub fn len(&self) -> usize {
        match self {
            PlatformTags::Plain(tags) => tags.len(),
            PlatformTags::Named(tags) => tags.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tag names regardless of shape
    pub fn names(&self) -> Vec<&str> {
        match self {
            PlatformTags::Plain(tags) => tags.iter().map(String::as_str).collect(),
            PlatformTags::Named(tags) => tags.iter().map(|t| t.name.as_str()).collect(),
        }
    }
}

/// Reshape an article's tags for a destination platform.
///
/// - Dev.to: first 4 tags, whitespace removed (`"machine learning"` → `"machinelearning"`)
/// - Medium: first 5 tags, whitespace runs replaced by `-` (`"machine learning"` → `"machine-learning"`)
/// - Hashnode: every tag, wrapped as `{ "name": tag }`
///
/// Tags that are blank after reshaping are dropped before the limit applies.
pub fn transform_tags(tags: &[String], platform: Platform) -> PlatformTags {
    let non_blank = tags.iter().filter(|tag| !tag.trim().is_empty());

    match platform {
        Platform::DevTo => PlatformTags::Plain(
            non_blank
                .take(DEVTO_MAX_TAGS)
                .map(|tag| tag.split_whitespace().collect())
                .collect(),
        ),
        Platform::Medium => PlatformTags::Plain(
            non_blank
                .take(MEDIUM_MAX_TAGS)
                .map(|tag| tag.split_whitespace().collect::<Vec<_>>().join("-"))
                .collect(),
        ),
        Platform::Hashnode => PlatformTags::Named(
            non_blank
                .map(|tag| NamedTag { name: tag.clone() })
                .collect(),
        ),
    }
}

use serde::Serialize;

use crate::article::Article;
use crate::config::SiteConfig;
use crate::content::{count_diagrams, count_images, transform_content};
use crate::platform::Platform;
use crate::tags::{transform_tags, PlatformTags};

/// What a publish would have sent, computed without touching the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    pub platform: Platform,
    pub dry_run: bool,
    pub title: String,
    pub canonical: String,
    pub tags: PlatformTags,
    pub tag_count: usize,
    /// Image references left in the transformed body
    pub image_count: usize,
    /// Mermaid blocks in the source article
    pub diagram_count: usize,
    /// Length of the transformed body in characters
    pub body_length: usize,
}

/// Build the dry-run report for one platform.
pub fn dry_run_report(article: &Article, platform: Platform, site: &SiteConfig) -> DryRunReport {
    let body = transform_content(&article.content, platform, site);
    let tags = transform_tags(&article.tags, platform);

    DryRunReport {
        platform,
        dry_run: true,
        title: article.title.clone(),
        canonical: article.canonical.clone(),
        tag_count: tags.len(),
        tags,
        image_count: count_images(&body),
        diagram_count: count_diagrams(&article.content),
        body_length: body.chars().count(),
    }
}

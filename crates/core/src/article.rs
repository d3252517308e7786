//! Pure parsing of a markdown article with a YAML front matter block
//!
//! The shell reads the file and supplies the current date; everything else
//! (date priority, slug, canonical URL, cover image) is derived here.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::content::asset_relative_path;

static FILENAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

static FILENAME_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap());

static FIRST_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(([^)\s]+)[^)]*\)").unwrap());

/// Title used when the front matter has none
pub const DEFAULT_TITLE: &str = "Untitled";

// ============================================================================
// Domain Models
// ============================================================================

/// Article parsed from a markdown file. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    /// Raw markdown body following the front matter block
    pub content: String,
    pub description: String,
    /// `base_url + "/" + slug`
    pub canonical: String,
    pub tags: Vec<String>,
    /// Publish date as `YYYY-MM-DD`
    pub date: String,
    /// Absolute cover image URL
    pub image: Option<String>,
}

/// Errors raised while decoding the front matter
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("front matter block is missing its closing `---` line")]
    UnterminatedFrontMatter,

    #[error("invalid front matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),
}

/// Front matter fields understood by the parser. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<serde_yaml::Value>,
    #[serde(default)]
    date: Option<serde_yaml::Value>,
    #[serde(default)]
    url: Option<serde_yaml::Value>,
    #[serde(default)]
    slug: Option<serde_yaml::Value>,
    #[serde(default)]
    tags: Option<TagList>,
    #[serde(default)]
    description: Option<serde_yaml::Value>,
    /// Either a plain path or a `{ path, alt }` mapping
    #[serde(default)]
    image: Option<serde_yaml::Value>,
}

/// Tags may be a YAML list or a single comma-separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagList {
    List(Vec<serde_yaml::Value>),
    Joined(String),
}

impl TagList {
    fn into_tags(self) -> Vec<String> {
        match self {
            TagList::List(values) => values.iter().filter_map(scalar_to_string).collect(),
            TagList::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

// ============================================================================
// Pure Helper Functions
// ============================================================================

/// Render a YAML scalar as a string; mappings, sequences and nulls yield `None`.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Image path from a scalar or from the `path` key of a mapping.
fn image_path(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Mapping(mapping) => mapping.get("path").and_then(scalar_to_string),
        other => scalar_to_string(other),
    }
}

/// Split a document into its front matter block and markdown body.
///
/// A document that does not open with a `---` line has no front matter and
/// is returned whole as the body.
pub fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str), ArticleError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(rest) = raw
        .strip_prefix("---\r\n")
        .or_else(|| raw.strip_prefix("---\n"))
    else {
        return Ok((None, raw));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(matter), body));
        }
        offset += line.len();
    }

    Err(ArticleError::UnterminatedFrontMatter)
}

/// Publish date: filename prefix, then front matter date, then `today`.
///
/// Front matter dates carrying a time (`2024-01-15 10:00:00 +0100`) are cut
/// down to their date part; values that do not start with a date are kept verbatim.
pub fn derive_date(
    file_name: &str,
    metadata_date: Option<&serde_yaml::Value>,
    today: NaiveDate,
) -> String {
    if let Some(caps) = FILENAME_DATE.captures(file_name) {
        return caps[1].to_string();
    }

    if let Some(date) = metadata_date.and_then(scalar_to_string) {
        let date = date.trim();
        if !date.is_empty() {
            return match date.get(..10) {
                Some(prefix) if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() => {
                    prefix.to_string()
                }
                _ => date.to_string(),
            };
        }
    }

    today.format("%Y-%m-%d").to_string()
}

/// Destination slug: explicit front matter value, else the filename without
/// its `YYYY-MM-DD-` prefix and extension.
pub fn derive_slug(file_name: &str, explicit: Option<&str>) -> String {
    if let Some(slug) = explicit
        .map(|s| s.trim().trim_start_matches('/'))
        .filter(|s| !s.is_empty())
    {
        return slug.to_string();
    }

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    FILENAME_DATE_PREFIX.replace(stem, "").into_owned()
}

/// Cover image: explicit front matter value first, else the first body image
/// when it lives under the site's assets directory.
pub fn derive_cover_image(
    explicit: Option<&str>,
    body: &str,
    site: &SiteConfig,
) -> Option<String> {
    if let Some(image) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(match asset_relative_path(image) {
            Some(rest) => site.asset_url(rest),
            None => image.to_string(),
        });
    }

    let caps = FIRST_IMAGE.captures(body)?;
    asset_relative_path(&caps[1]).map(|rest| site.asset_url(rest))
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Parse a raw markdown document into an [`Article`].
///
/// # Arguments
/// * `raw` - Full file contents
/// * `file_name` - File name (not the full path); used for the date and slug defaults
/// * `site` - Origin site configuration
/// * `today` - Fallback publish date
pub fn parse_article(
    raw: &str,
    file_name: &str,
    site: &SiteConfig,
    today: NaiveDate,
) -> Result<Article, ArticleError> {
    let (matter, body) = split_front_matter(raw)?;

    let front_matter: FrontMatter = match matter {
        Some(block) if !block.trim().is_empty() => serde_yaml::from_str(block)?,
        _ => FrontMatter::default(),
    };

    let explicit_slug = front_matter
        .url
        .as_ref()
        .and_then(scalar_to_string)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| front_matter.slug.as_ref().and_then(scalar_to_string));
    let slug = derive_slug(file_name, explicit_slug.as_deref());
    let image = front_matter.image.as_ref().and_then(image_path);

    Ok(Article {
        title: front_matter
            .title
            .as_ref()
            .and_then(scalar_to_string)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        content: body.to_string(),
        description: front_matter
            .description
            .as_ref()
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        canonical: format!("{}/{}", site.base_url, slug),
        tags: front_matter
            .tags
            .map(TagList::into_tags)
            .unwrap_or_default(),
        date: derive_date(file_name, front_matter.date.as_ref(), today),
        image: derive_cover_image(image.as_deref(), body, site),
    })
}

// ============================================================================
// Tests
// ============================================================================

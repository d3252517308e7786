//! Markdown rewrites applied before an article leaves the origin site
//!
//! Each pass is an independent, best-effort regex rewrite. They run in a fixed
//! order through [`transform_content`] and are exposed individually so each
//! heuristic can be exercised on its own.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::SiteConfig;
use crate::platform::Platform;

static ASSET_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(/?assets/([^)]+)\)").unwrap());

static ABSOLUTE_URL_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*["']([^"']+)["']\s*\|\s*absolute_url\s*\}\}"#).unwrap()
});

static LOCAL_FILE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(/Users/[^)]*\)").unwrap());

static MERMAID_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^```mermaid([^\n]*)\n(.*?)```").unwrap());

static CENTER_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{:\s*\.center\s*\}").unwrap());

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{[<%].*?[%>]\}\}").unwrap());

static IMAGE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

/// Path below the assets directory for `/assets/...` and `assets/...` paths.
pub fn asset_relative_path(path: &str) -> Option<&str> {
    path.strip_prefix("/assets/")
        .or_else(|| path.strip_prefix("assets/"))
}

/// Pass 1: `![alt](/assets/x.png)` and `![alt](assets/x.png)` become absolute.
pub fn absolutize_asset_images(body: &str, site: &SiteConfig) -> String {
    ASSET_IMAGE
        .replace_all(body, |caps: &Captures| {
            format!("![{}]({})", &caps[1], site.asset_url(&caps[2]))
        })
        .into_owned()
}

/// Pass 2: Liquid `{{ "/path" | absolute_url }}` becomes `base_url + path`.
pub fn expand_absolute_url_filters(body: &str, site: &SiteConfig) -> String {
    ABSOLUTE_URL_FILTER
        .replace_all(body, |caps: &Captures| site.absolute_url(&caps[1]))
        .into_owned()
}

/// Pass 3: images pointing at the author's local disk (`/Users/...`).
///
/// Heuristic: the alt text is reused as the asset file name, so the link is
/// only correct when the alt text matches the file published under `/assets/`.
pub fn rewrite_local_file_images(body: &str, site: &SiteConfig) -> String {
    LOCAL_FILE_IMAGE
        .replace_all(body, |caps: &Captures| {
            format!("![{}]({})", &caps[1], site.asset_url(&caps[1]))
        })
        .into_owned()
}

/// Notice placed above a diagram the destination cannot render.
pub fn diagram_notice(site: &SiteConfig) -> String {
    format!(
        "> 📊 **Diagram:** this post contains a Mermaid diagram. \
         See it rendered on the [original post]({}).",
        site.base_url
    )
}

/// Pass 4: Mermaid blocks.
///
/// Platforms without native support get a notice plus the raw diagram source in
/// a plain fence. Native platforms keep the block, minus any attribute list
/// trailing the opening fence.
pub fn rewrite_diagrams(body: &str, platform: Platform, site: &SiteConfig) -> String {
    MERMAID_BLOCK
        .replace_all(body, |caps: &Captures| {
            let source = &caps[2];
            if platform.renders_mermaid() {
                format!("```mermaid\n{source}```")
            } else {
                format!("{}\n\n```\n{source}```", diagram_notice(site))
            }
        })
        .into_owned()
}

/// Pass 5: Kramdown `{: .center}` attribute lists and `{{< >}}` / `{{% %}}` shortcodes.
pub fn strip_site_markup(body: &str) -> String {
    let body = CENTER_ATTRIBUTE.replace_all(body, "");
    SHORTCODE.replace_all(&body, "").into_owned()
}

/// Run every rewrite pass, in order, for one destination platform.
pub fn transform_content(body: &str, platform: Platform, site: &SiteConfig) -> String {
    let body = absolutize_asset_images(body, site);
    let body = expand_absolute_url_filters(&body, site);
    let body = rewrite_local_file_images(&body, site);
    let body = rewrite_diagrams(&body, platform, site);
    strip_site_markup(&body)
}

/// Number of markdown image references in a body.
pub fn count_images(body: &str) -> usize {
    IMAGE_REFERENCE.find_iter(body).count()
}

/// Number of ```mermaid blocks in a body.
pub fn count_diagrams(body: &str) -> usize {
    MERMAID_BLOCK.find_iter(body).count()
}

//! Site configuration shared by the parser and the content transformer.

/// Origin blog every cross-posted copy points back to.
pub const DEFAULT_BASE_URL: &str = "https://swiderski.tech";

/// Configuration of the origin site.
///
/// Passed explicitly into every transformation so tests can use their own base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL without a trailing slash (e.g. `https://swiderski.tech`)
    pub base_url: String,
}

impl SiteConfig {
    /// Create a configuration, normalizing away trailing slashes.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL of a file under the site's `/assets/` directory.
    pub fn asset_url(&self, asset_path: &str) -> String {
        format!("{}/assets/{}", self.base_url, asset_path)
    }

    /// Absolute URL of a site path; a `/` is inserted when the path has none.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

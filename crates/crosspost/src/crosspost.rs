//! Run orchestration: parse once, attempt each platform in turn, summarize.

use std::path::Path;

use colored::Colorize;
use crosspost_core::article::{parse_article, Article};
use crosspost_core::config::SiteConfig;
use crosspost_core::outcome::{summarize, transform_outcomes, PublishOutcome};
use crosspost_core::platform::Platform;
use crosspost_core::report::dry_run_report;
use serde_json::Value;

use crate::prelude::{eprintln, println, *};
use crate::publish::{self, create_client, Credentials, Endpoints, PublishContext};
use crate::retry::RetryPolicy;

/// Settings for one run, assembled from CLI flags and environment
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub site: SiteConfig,
    pub retry: RetryPolicy,
    pub endpoints: Endpoints,
    /// Compute everything locally, send nothing
    pub dry_run: bool,
    /// Print outcomes as JSON instead of progress lines and a table
    pub json: bool,
}

/// Read and parse the article file.
///
/// Any failure here is an `Error::ArticleRead`, which aborts the run.
pub fn read_article(path: &Path, site: &SiteConfig) -> std::result::Result<Article, Error> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::ArticleRead {
        path: path.to_path_buf(),
        reason: match e.kind() {
            std::io::ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        },
    })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let today = chrono::Local::now().date_naive();

    parse_article(&raw, file_name, site, today).map_err(|e| Error::ArticleRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Cross-post the article at `path`.
///
/// Returns the outcome of every attempted platform. Per-platform failures are
/// part of the outcomes; only article read failures return `Err`.
pub async fn run(
    path: &Path,
    options: &RunOptions,
    credentials: &Credentials,
) -> Result<Vec<PublishOutcome>> {
    if !options.json {
        println!("Processing article: {}", path.display());
    }

    let article = read_article(path, &options.site)?;
    log::debug!("Parsed article dated {}", article.date);

    if !options.json {
        println!("Title: {}", article.title.bold());
        println!("Tags: {}", article.tags.join(", "));
        println!("Canonical: {}", article.canonical);
        if options.dry_run {
            println!("{}", "Dry run: no platform API will be called".yellow());
        }
        println!("---");
    }

    let client = create_client()?;
    let outcomes = publish_all(&article, options, credentials, &client).await;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&transform_outcomes(&outcomes))?
        );
    } else {
        print_summary(&outcomes);
    }

    Ok(outcomes)
}

/// Attempt every platform sequentially.
///
/// Platforms without credentials are skipped and leave no outcome, unless the
/// run is a dry run, which reports on all of them.
pub async fn publish_all(
    article: &Article,
    options: &RunOptions,
    credentials: &Credentials,
    client: &reqwest::Client,
) -> Vec<PublishOutcome> {
    let ctx = PublishContext {
        client,
        endpoints: &options.endpoints,
        retry: &options.retry,
        site: &options.site,
    };

    let mut outcomes = Vec::new();

    for platform in Platform::ALL {
        if options.dry_run {
            outcomes.push(dry_run_outcome(article, platform, options));
            continue;
        }

        if !credentials.is_configured(platform) {
            log::info!("No credentials for {platform}");
            if !options.json {
                println!("⚠️  {platform} credentials not found, skipping...");
            }
            continue;
        }

        if !options.json {
            println!("Publishing to {platform}...");
        }

        match publish::publish(platform, &ctx, credentials, article).await {
            Ok(payload) => {
                if !options.json {
                    let url = payload_url(&payload).unwrap_or("(no URL returned)");
                    println!("✅ {platform} draft created: {url}");
                }
                outcomes.push(PublishOutcome::success(platform, payload));
            }
            Err(e) => {
                if !options.json {
                    eprintln!("❌ {platform} publishing failed: {e}");
                }
                outcomes.push(PublishOutcome::failure(platform, e.to_string()));
            }
        }
    }

    outcomes
}

fn dry_run_outcome(article: &Article, platform: Platform, options: &RunOptions) -> PublishOutcome {
    let report = dry_run_report(article, platform, &options.site);

    if !options.json {
        println!(
            "🧪 {platform} (dry run): {} tags [{}], {} images, {} diagrams",
            report.tag_count,
            report.tags.names().join(", "),
            report.image_count,
            report.diagram_count
        );
    }

    match serde_json::to_value(&report) {
        Ok(payload) => PublishOutcome::success(platform, payload),
        Err(e) => PublishOutcome::failure(platform, e.to_string()),
    }
}

fn payload_url(payload: &Value) -> Option<&str> {
    payload.get("url").and_then(Value::as_str)
}

/// One-line description of an outcome: the draft URL, dry-run counts, or the error
fn outcome_details(outcome: &PublishOutcome) -> String {
    match &outcome.result {
        Ok(payload) if payload.get("dry_run").is_some() => format!(
            "{} tags, {} images, {} diagrams",
            payload["tag_count"], payload["image_count"], payload["diagram_count"]
        ),
        Ok(payload) => payload_url(payload).unwrap_or_default().to_string(),
        Err(error) => error.clone(),
    }
}

fn print_summary(outcomes: &[PublishOutcome]) {
    println!("\n{}", "=== Cross-posting Summary ===".bold());

    for outcome in outcomes {
        match &outcome.result {
            Ok(_) => println!("✅ {}: {}", outcome.platform, "Success".green()),
            Err(error) => println!("❌ {}: {} - {error}", outcome.platform, "Failed".red()),
        }
    }

    let summary = summarize(outcomes);
    println!(
        "\nSuccessfully published to {}/{} platforms",
        summary.succeeded, summary.attempted
    );

    if outcomes.iter().any(PublishOutcome::is_success) {
        let mut table = new_table();
        table.set_titles(prettytable::row!["Platform", "Details"]);
        for outcome in outcomes.iter().filter(|o| o.is_success()) {
            table.add_row(prettytable::row![
                outcome.platform.name().bold(),
                outcome_details(outcome)
            ]);
        }
        println!();
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::test_support::no_delay;
    use crate::publish::{DevToConfig, HashnodeConfig, MediumConfig};
    use serde_json::json;
    use std::path::PathBuf;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE: &str = "---\ntitle: \"Hello\"\ntags: [\"a b\", \"c\", \"d\", \"e\", \"f\"]\n---\n![x](/assets/x.png)\n\n```mermaid\ngraph TD\n```\n";

    fn write_article(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn options(server: &MockServer) -> RunOptions {
        RunOptions {
            retry: no_delay(),
            endpoints: crate::publish::test_support::endpoints(&server.uri()),
            ..RunOptions::default()
        }
    }

    fn all_credentials() -> Credentials {
        Credentials {
            devto: Some(DevToConfig {
                api_key: "k".to_string(),
            }),
            hashnode: Some(HashnodeConfig {
                token: "t".to_string(),
                publication_id: "p".to_string(),
            }),
            medium: Some(MediumConfig {
                token: "m".to_string(),
            }),
        }
    }

    #[test]
    fn read_article_derives_canonical_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_article(&dir, "2024-01-15-my-post.md", ARTICLE);

        let article = read_article(&path, &SiteConfig::default()).unwrap();
        assert_eq!(article.canonical, "https://swiderski.tech/my-post");
        assert_eq!(article.date, "2024-01-15");
        assert_eq!(article.title, "Hello");
    }

    #[test]
    fn read_article_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_article(&dir.path().join("nope.md"), &SiteConfig::default()).unwrap_err();
        assert!(matches!(&err, Error::ArticleRead { reason, .. } if reason == "file not found"));
    }

    #[tokio::test]
    async fn dry_run_reports_every_platform_without_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = write_article(&dir, "2024-01-15-my-post.md", ARTICLE);
        let options = RunOptions {
            dry_run: true,
            ..options(&server)
        };

        for credentials in [Credentials::default(), all_credentials()] {
            let outcomes = run(&path, &options, &credentials).await.unwrap();

            assert_eq!(outcomes.len(), 3);
            assert!(outcomes.iter().all(PublishOutcome::is_success));
            let devto = outcomes[0].result.as_ref().unwrap();
            assert_eq!(devto["tags"], json!(["ab", "c", "d", "e"]));
            assert_eq!(devto["diagram_count"], 1);
            assert_eq!(devto["image_count"], 1);
        }
    }

    #[tokio::test]
    async fn missing_file_aborts_before_publishing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("missing.md"), &options(&server), &all_credentials())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ArticleRead { .. })
        ));
    }

    #[tokio::test]
    async fn undecodable_front_matter_aborts() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_article(&dir, "post.md", "---\ntitle: [broken\n---\nBody");

        let err = run(&path, &options(&server), &all_credentials())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ArticleRead { .. })
        ));
    }

    #[tokio::test]
    async fn failure_on_one_platform_does_not_stop_the_others() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "u" } })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users/u/posts"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "data": { "url": "m" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = write_article(&dir, "2024-01-15-my-post.md", ARTICLE);
        let credentials = Credentials {
            hashnode: None,
            ..all_credentials()
        };

        let outcomes = run(&path, &options(&server), &credentials).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].platform, Platform::DevTo);
        assert_eq!(
            outcomes[0].result,
            Err("Dev.to API error: 500 - down".to_string())
        );
        assert_eq!(outcomes[1].platform, Platform::Medium);
        assert!(outcomes[1].is_success());
        assert_eq!(summarize(&outcomes).succeeded, 1);
    }

    #[tokio::test]
    async fn no_credentials_means_no_outcomes() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_article(&dir, "post.md", ARTICLE);

        let outcomes = run(&path, &options(&server), &Credentials::default())
            .await
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn outcome_details_prefers_url_then_error() {
        let ok = PublishOutcome::success(Platform::Medium, json!({ "url": "https://m/p" }));
        let failed = PublishOutcome::failure(Platform::DevTo, "boom");
        assert_eq!(outcome_details(&ok), "https://m/p");
        assert_eq!(outcome_details(&failed), "boom");
    }
}

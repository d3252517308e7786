//! Core library for crosspost
//!
//! This crate implements the **Functional Core** of the crosspost application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The crosspost project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`crosspost_core`** (this crate): Pure transformation functions with zero I/O
//! - **`crosspost`**: File reading, HTTP calls, retries and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No file reads, no network, no clock access
//! - **Deterministic**: The current date and the site base URL are passed in explicitly
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`article`]: Front matter splitting and `Article` derivation (date, slug, canonical, cover)
//! - [`content`]: Ordered markdown rewrite passes applied per destination platform
//! - [`tags`]: Tag count limits and tag formatting per destination platform
//! - [`platform`]: The closed set of destination platforms
//! - [`payload`]: Request bodies and response decoding for each platform API
//! - [`report`]: Dry-run reports (tag, image and diagram counts)
//! - [`outcome`]: Per-platform publish outcomes and the run summary
//! - [`config`]: Site configuration (base URL)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use crosspost_core::{article::parse_article, config::SiteConfig, platform::Platform};
//! use crosspost_core::tags::transform_tags;
//!
//! let site = SiteConfig::default();
//! let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! let raw = "---\ntitle: Hello\ntags: [\"a b\", c]\n---\nBody";
//!
//! let article = parse_article(raw, "2024-01-15-my-post.md", &site, today)?;
//! assert_eq!(article.canonical, "https://swiderski.tech/my-post");
//!
//! let tags = transform_tags(&article.tags, Platform::DevTo);
//! assert_eq!(tags.names(), vec!["ab", "c"]);
//! ```

pub mod article;
pub mod config;
pub mod content;
pub mod outcome;
pub mod payload;
pub mod platform;
pub mod report;
pub mod tags;

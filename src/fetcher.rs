//! HTTP fetcher for the bulk country block lists.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::BulkSource;
use crate::error::RangegenError;
use crate::utils::{count_noun, group_digits};

#[cfg(test)]
use mockall::automock;

/// Maximum size per source list (10 MB)
/// A full country zone file is a few hundred KB
const MAX_SOURCE_SIZE: usize = 10 * 1024 * 1024;

/// Retrieves the raw text of a remote list.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Download: Send + Sync {
    /// Download `url` once. Non-success status codes are errors.
    async fn download(&self, name: &str, url: &str) -> Result<String, RangegenError>;
}

/// reqwest-backed [`Download`] implementation
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, RangegenError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("rangegen/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RangegenError::Fetch {
                source_name: "http client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Download for HttpDownloader {
    async fn download(&self, name: &str, url: &str) -> Result<String, RangegenError> {
        let fetch_err = |reason: String| RangegenError::Fetch {
            source_name: name.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_err(format!("HTTP {}", response.status())));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_SOURCE_SIZE {
                return Err(fetch_err(format!(
                    "Response too large: {} bytes (max: {} bytes)",
                    content_length, MAX_SOURCE_SIZE
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_err(format!("Failed to read response body: {}", e)))?;

        // Double-check actual size after download
        if body.len() > MAX_SOURCE_SIZE {
            return Err(fetch_err(format!(
                "Downloaded content too large: {} bytes (max: {} bytes)",
                body.len(),
                MAX_SOURCE_SIZE
            )));
        }

        Ok(body)
    }
}

/// What happened to one source during [`fetch_bulk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Fetched { name: String, count: usize },
    Failed { name: String, reason: String },
}

impl SourceOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SourceOutcome::Fetched { .. })
    }
}

/// Merged result of all bulk sources
#[derive(Debug, Clone, Default)]
pub struct BulkFetch {
    /// Unique CIDR strings, first-seen order across sources
    pub cidrs: Vec<String>,
    pub outcomes: Vec<SourceOutcome>,
}

impl BulkFetch {
    /// True when every source failed (or there were none)
    pub fn all_failed(&self) -> bool {
        !self.outcomes.iter().any(SourceOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Fetch every source once, in order, and merge their lists.
///
/// A failing source is logged and skipped; the others still contribute.
/// Exact duplicate CIDR strings are removed, keeping the first occurrence.
pub async fn fetch_bulk(downloader: &dyn Download, sources: &[BulkSource]) -> BulkFetch {
    let mut seen = HashSet::new();
    let mut result = BulkFetch::default();

    for source in sources {
        info!("Fetching {} ({})...", source.name, source.url);
        match downloader.download(&source.name, &source.url).await {
            Ok(content) => {
                let cidrs = parse_cidr_list(&content);
                info!(
                    "Fetched {} - {}",
                    source.name,
                    count_noun(cidrs.len(), "CIDR block", "CIDR blocks")
                );
                result.outcomes.push(SourceOutcome::Fetched {
                    name: source.name.clone(),
                    count: cidrs.len(),
                });
                for cidr in cidrs {
                    if seen.insert(cidr.clone()) {
                        result.cidrs.push(cidr);
                    }
                }
            }
            Err(e) => {
                warn!("{}", e);
                result.outcomes.push(SourceOutcome::Failed {
                    name: source.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Unique CIDR blocks from all sources: {}",
        group_digits(result.cidrs.len())
    );

    result
}

/// Parse a zone/cidr list: one entry per line, `#` comments and blank lines ignored.
///
/// Entries are not validated here.
pub fn parse_cidr_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn sources() -> Vec<BulkSource> {
        vec![
            BulkSource::new("first", "https://a.example/ru.zone"),
            BulkSource::new("second", "https://b.example/ru.cidr"),
        ]
    }

    #[test]
    fn test_parse_cidr_list() {
        let content = "# ru zone\n\n2.56.88.0/22\n  5.8.0.0/19  \n# tail\n";
        assert_eq!(parse_cidr_list(content), vec!["2.56.88.0/22", "5.8.0.0/19"]);
    }

    #[test]
    fn test_parse_cidr_list_keeps_unvalidated_lines() {
        let content = "not-a-cidr\n10.0.0.0/8\n";
        assert_eq!(parse_cidr_list(content).len(), 2);
    }

    #[test]
    fn test_parse_cidr_list_empty() {
        assert!(parse_cidr_list("").is_empty());
        assert!(parse_cidr_list("# only\n# comments\n").is_empty());
    }

    #[test]
    fn test_parse_cidr_list_crlf() {
        let content = "2.56.88.0/22\r\n5.8.0.0/19\r\n";
        assert_eq!(parse_cidr_list(content), vec!["2.56.88.0/22", "5.8.0.0/19"]);
    }

    #[tokio::test]
    async fn test_fetch_bulk_merges_and_dedupes() {
        let mut mock = MockDownload::new();
        mock.expect_download()
            .with(eq("first"), eq("https://a.example/ru.zone"))
            .times(1)
            .returning(|_, _| Ok("2.56.88.0/22\n5.8.0.0/19\n".to_string()));
        mock.expect_download()
            .with(eq("second"), eq("https://b.example/ru.cidr"))
            .times(1)
            .returning(|_, _| Ok("5.8.0.0/19\n31.173.0.0/16\n".to_string()));

        let fetched = fetch_bulk(&mock, &sources()).await;
        assert_eq!(
            fetched.cidrs,
            vec!["2.56.88.0/22", "5.8.0.0/19", "31.173.0.0/16"]
        );
        assert!(!fetched.all_failed());
        assert_eq!(fetched.failures().count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_bulk_partial_failure() {
        let mut mock = MockDownload::new();
        mock.expect_download()
            .with(eq("first"), eq("https://a.example/ru.zone"))
            .times(1)
            .returning(|name, _| {
                Err(RangegenError::Fetch {
                    source_name: name.to_string(),
                    reason: "HTTP 503 Service Unavailable".to_string(),
                })
            });
        mock.expect_download()
            .with(eq("second"), eq("https://b.example/ru.cidr"))
            .times(1)
            .returning(|_, _| Ok("31.173.0.0/16\n".to_string()));

        let fetched = fetch_bulk(&mock, &sources()).await;
        assert_eq!(fetched.cidrs, vec!["31.173.0.0/16"]);
        assert!(!fetched.all_failed());
        assert_eq!(
            fetched.outcomes[1],
            SourceOutcome::Fetched {
                name: "second".to_string(),
                count: 1
            }
        );
        assert!(matches!(fetched.outcomes[0], SourceOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_bulk_total_failure() {
        let mut mock = MockDownload::new();
        mock.expect_download().times(2).returning(|name, _| {
            Err(RangegenError::Fetch {
                source_name: name.to_string(),
                reason: "connection refused".to_string(),
            })
        });

        let fetched = fetch_bulk(&mock, &sources()).await;
        assert!(fetched.cidrs.is_empty());
        assert!(fetched.all_failed());
        assert_eq!(fetched.failures().count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_bulk_no_sources() {
        let mock = MockDownload::new();
        let fetched = fetch_bulk(&mock, &[]).await;
        assert!(fetched.cidrs.is_empty());
        assert!(fetched.all_failed());
    }
}

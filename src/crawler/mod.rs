//! Crawler module for timeline fetching and reference reconciliation
//!
//! This module contains the core crawling logic, including:
//! - Per-account collection of paginated search results
//! - Reconciliation of referenced tweets delivered out-of-band
//! - Batch coordination from roster to CSV output

mod collection;
mod coordinator;
mod reconciler;

pub use collection::{ReferencedTweet, TweetCollection};
pub use coordinator::{run_crawl, Coordinator, CrawlOptions};
pub use reconciler::reconcile;

use crate::config::{Config, RosterEntry};
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Partition the roster into output groups
/// 3. Fetch, reconcile, and write each group's accounts in order
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `bearer_token` - API bearer token
/// * `options` - CLI-derived crawl options
/// * `roster` - Accounts to crawl, in roster order
///
/// # Returns
///
/// * `Ok(())` - Crawl completed
/// * `Err(TweetlineError)` - Crawl failed
pub async fn crawl(
    config: Config,
    bearer_token: String,
    options: CrawlOptions,
    roster: &[RosterEntry],
) -> Result<()> {
    run_crawl(config, bearer_token, options, roster).await
}

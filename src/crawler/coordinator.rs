//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawl:
//! - Partitioning the roster into output groups
//! - Bulk account lookup per group
//! - Sequential per-account fetching and reconciliation
//! - Projecting and writing rows in roster order

use crate::client::{build_http_client, fetch_timeline, lookup_users, ApiClientConfig, ApiUser};
use crate::config::{Config, RosterEntry};
use crate::crawler::collection::TweetCollection;
use crate::crawler::reconciler::reconcile;
use crate::output::{project_row, CsvChunkWriter, OUTPUT_COLUMNS};
use crate::{Result, TweetlineError};
use chrono::NaiveDate;
use reqwest::Client;
use std::collections::HashMap;

/// CLI-derived options for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Split each output group into rows-per-file chunks
    pub split: bool,

    /// Only tweets created on or after this date
    pub start_date: NaiveDate,

    /// Only tweets created before this date
    pub end_date: NaiveDate,

    /// Accounts per output group; `None` puts the whole roster in one group
    pub batch_size: Option<usize>,
}

/// Main crawl coordinator structure
pub struct Coordinator {
    config: Config,
    options: CrawlOptions,
    api: ApiClientConfig,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `bearer_token` - API bearer token
    /// * `options` - CLI-derived crawl options
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(TweetlineError)` - Failed to build the HTTP client
    pub fn new(config: Config, bearer_token: String, options: CrawlOptions) -> Result<Self> {
        let api = ApiClientConfig::new(&config.api, bearer_token);
        let client = build_http_client()?;

        Ok(Self {
            config,
            options,
            api,
            client,
        })
    }

    /// Runs the main crawl loop over the whole roster
    ///
    /// The roster is processed in groups of `batch_size` accounts; every
    /// group gets its own numbered output file set. A group whose user
    /// lookup comes back inconsistent is abandoned with a diagnostic and
    /// produces no output, and processing moves on to the next group.
    pub async fn run(&self, roster: &[RosterEntry]) -> Result<()> {
        std::fs::create_dir_all(&self.config.output.folder)?;

        let batch_size = self.options.batch_size.unwrap_or(roster.len()).max(1);
        let start_time = rfc3339_midnight(self.options.start_date);
        let end_time = rfc3339_midnight(self.options.end_date);

        tracing::info!(
            "Crawling {} accounts in groups of {} ({} to {})",
            roster.len(),
            batch_size,
            start_time,
            end_time
        );

        for (sub_num, batch) in roster.chunks(batch_size).enumerate() {
            match self.crawl_batch(sub_num, batch, &start_time, &end_time).await {
                Ok(()) => {}
                Err(TweetlineError::UserCountMismatch {
                    requested,
                    returned,
                }) => {
                    tracing::error!(
                        "Group {}: lookup returned {} accounts for {} handles \
                         (bad handle in the roster?), abandoning group",
                        sub_num,
                        returned,
                        requested
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("Crawl completed");
        Ok(())
    }

    /// Crawls one roster group into one output file set
    async fn crawl_batch(
        &self,
        sub_num: usize,
        batch: &[RosterEntry],
        start_time: &str,
        end_time: &str,
    ) -> Result<()> {
        let handles: Vec<String> = batch.iter().map(|entry| entry.handle.clone()).collect();

        let users = lookup_users(&self.client, &self.api, &handles).await?;
        if users.len() != batch.len() {
            return Err(TweetlineError::UserCountMismatch {
                requested: batch.len(),
                returned: users.len(),
            });
        }

        let users_by_handle: HashMap<String, &ApiUser> = users
            .iter()
            .map(|user| (user.username.to_lowercase(), user))
            .collect();

        // Accumulate every account of the group before writing, so rows land
        // in roster order regardless of which accounts were skipped
        let mut collections: Vec<(&RosterEntry, TweetCollection)> = Vec::new();

        for entry in batch {
            let Some(user) = users_by_handle.get(&entry.handle.to_lowercase()) else {
                tracing::warn!("No account record returned for {}, skipping", entry.handle);
                continue;
            };

            let cap = user
                .public_metrics
                .tweet_count
                .min(self.api.max_tweets_per_user);

            let pages = match fetch_timeline(
                &self.client,
                &self.api,
                &entry.handle,
                start_time,
                end_time,
                cap,
            )
            .await
            {
                Ok(pages) => pages,
                Err(e @ TweetlineError::Api { .. }) => {
                    // One failing account does not abort the run
                    tracing::error!("Skipping {}: {}", entry.handle, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut collection = TweetCollection::from_pages(entry.handle.clone(), pages);
            tracing::info!("{} has {} tweets", entry.handle, collection.tweets.len());

            let residual = reconcile(&mut collection);
            if !residual.is_empty() {
                tracing::debug!(
                    "{}: {} referenced tweets matched no tweet",
                    entry.handle,
                    residual.len()
                );
            }

            collections.push((entry, collection));
        }

        let mut writer = CsvChunkWriter::new(
            &self.config.output.folder,
            sub_num,
            self.options.split,
            self.config.output.rows_per_file,
            &OUTPUT_COLUMNS,
        )?;

        for (entry, collection) in &collections {
            for tweet in &collection.tweets {
                let row = project_row(tweet, &entry.handle, &entry.tags);
                writer.write_row(&row)?;
            }
        }

        Ok(())
    }
}

/// Start-of-day RFC 3339 timestamp for a date bound
fn rfc3339_midnight(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Runs a complete crawl with a fresh coordinator
pub async fn run_crawl(
    config: Config,
    bearer_token: String,
    options: CrawlOptions,
    roster: &[RosterEntry],
) -> Result<()> {
    let coordinator = Coordinator::new(config, bearer_token, options)?;
    coordinator.run(roster).await
}

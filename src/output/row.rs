//! Row projection
//!
//! Maps one enriched tweet plus its account handle and tag string into the
//! fixed output column order. Nested structures (entities, metrics, URL
//! lists) are written as their JSON string form; CSV quoting is left to the
//! writer. Projection never fails: optional inputs were defaulted when the
//! record was admitted.

use crate::client::Tweet;
use serde_json::Value;

/// Output columns, in order
pub const OUTPUT_COLUMNS: [&str; 17] = [
    "id",
    "twitter_handle",
    "author_id",
    "created_at",
    "text",
    "referenced_tweets",
    "public_metrics",
    "entities",
    "referenced_urls",
    "conversation_id",
    "lang",
    "in_reply_to_user_id",
    "possibly_sensitive",
    "withheld",
    "tags",
    "tweet_url",
    "citation_urls",
];

/// Projects one tweet into an output row
///
/// # Arguments
///
/// * `tweet` - The enriched tweet
/// * `handle` - Handle of the account the tweet was fetched under
/// * `tags` - Tag string of that account
///
/// # Returns
///
/// The row values, matching [`OUTPUT_COLUMNS`] positionally
pub fn project_row(tweet: &Tweet, handle: &str, tags: &str) -> Vec<String> {
    let tweet_url = format!("https://twitter.com/{}/status/{}", handle, tweet.id);

    vec![
        tweet.id.clone(),
        handle.to_string(),
        tweet.author_id.clone(),
        tweet.created_at.clone(),
        tweet.text.clone(),
        serde_json::to_string(&tweet.referenced_tweets).unwrap_or_else(|_| "[]".to_string()),
        tweet.public_metrics.to_string(),
        tweet.entities.to_string(),
        serde_json::to_string(&tweet.referenced_urls).unwrap_or_else(|_| "[]".to_string()),
        tweet.conversation_id.clone(),
        tweet.lang.clone(),
        tweet.in_reply_to_user_id.clone(),
        tweet.possibly_sensitive.to_string(),
        tweet.withheld.to_string(),
        tags.to_string(),
        tweet_url,
        serde_json::to_string(&citation_urls(tweet)).unwrap_or_else(|_| "[]".to_string()),
    ]
}

/// Collects the deduplicated ordered union of a tweet's citation URLs
///
/// Sources, in order: the tweet's own entity URLs, the resolved retweet
/// entity URLs, the resolved referenced-tweet URLs. A URL already present
/// (exact string match) is not added again.
fn citation_urls(tweet: &Tweet) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for url in expanded_urls(&tweet.entities) {
        push_unique(&mut urls, url);
    }
    if let Some(retweet_entities) = &tweet.retweet_entities {
        for url in expanded_urls(retweet_entities) {
            push_unique(&mut urls, url);
        }
    }
    for url in &tweet.referenced_urls {
        push_unique(&mut urls, url);
    }

    urls
}

/// Extracts `urls[].expanded_url` values from an entities structure
fn expanded_urls(entities: &Value) -> Vec<&str> {
    entities
        .get("urls")
        .and_then(Value::as_array)
        .map(|urls| {
            urls.iter()
                .filter_map(|entry| entry.get("expanded_url").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

fn push_unique(urls: &mut Vec<String>, candidate: &str) {
    if !urls.iter().any(|url| url == candidate) {
        urls.push(candidate.to_string());
    }
}

//! Reference reconciliation
//!
//! The search API returns referenced (retweeted/quoted/replied-to) tweets
//! out-of-band, in each page's `includes`. Reconciliation matches those
//! entries back onto the tweets that declared the references: it restores
//! text truncated by the `RT @handle:` marker, copies the referenced
//! entities onto the referring tweet, and records the canonical URL of
//! every resolved reference.
//!
//! Matching is a single pass over the tweets against a pending map keyed by
//! referenced-tweet id, so resolution does not depend on the order pages
//! arrived in. Each side-channel entry is consumed at most once.

use crate::crawler::collection::{ReferencedTweet, TweetCollection};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static RT_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Returns the `RT @handle:` prefix of a retweet's text, if present
///
/// Tweets that do not carry the marker keep their (possibly truncated)
/// text untouched.
fn rt_prefix(text: &str) -> Option<String> {
    let pattern =
        RT_PREFIX.get_or_init(|| Regex::new(r"(?i)(.*RT @.*:)").expect("hardcoded pattern"));
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_string())
}

/// Resolves every matchable reference in the collection
///
/// For each tweet, each declared reference is looked up in the pending
/// side-channel map. On a match:
/// - a `retweeted` reference with an `RT @handle:` text prefix has its
///   text replaced by the prefix plus the referenced tweet's full text;
/// - the referenced entities are copied onto `retweet_entities`;
/// - the canonical URL is appended to `referenced_urls` (exact duplicates
///   are never added);
/// - the side-channel entry is consumed.
///
/// A reference whose target never appeared in any page's `includes` is left
/// unresolved; deleted and withheld referenced tweets make this common, so
/// it is not an error.
///
/// Running reconciliation again on an already-reconciled collection changes
/// nothing: resolved references are recognized by their recorded URL and
/// skipped.
///
/// # Arguments
///
/// * `collection` - The per-account collection to enrich in place
///
/// # Returns
///
/// The side-channel entries that matched no tweet, in side-channel order
/// (diagnostic only).
pub fn reconcile(collection: &mut TweetCollection) -> Vec<ReferencedTweet> {
    // id -> side-channel index; entries drop out as they are consumed.
    // Duplicate ids keep the earliest entry.
    let mut pending: HashMap<String, usize> = HashMap::new();
    for (index, entry) in collection.referenced.iter().enumerate() {
        pending.entry(entry.id.clone()).or_insert(index);
    }

    for tweet in &mut collection.tweets {
        if tweet.referenced_tweets.is_empty() {
            continue;
        }

        let references = tweet.referenced_tweets.clone();
        for reference in &references {
            // A tweet with as many resolved URLs as declared references is done
            if tweet.referenced_urls.len() >= references.len() {
                break;
            }

            let Some(&index) = pending.get(&reference.id) else {
                continue;
            };
            let entry = &collection.referenced[index];

            if tweet.referenced_urls.iter().any(|url| url == &entry.url) {
                continue;
            }

            if reference.kind == "retweeted" {
                if let Some(prefix) = rt_prefix(&tweet.text) {
                    tweet.text = format!("{}{}", prefix, entry.text);
                }
            }

            tweet.retweet_entities = Some(entry.entities.clone());
            tweet.referenced_urls.push(entry.url.clone());
            pending.remove(&reference.id);
        }
    }

    let mut leftover: Vec<usize> = pending.into_values().collect();
    leftover.sort_unstable();
    leftover
        .into_iter()
        .map(|index| collection.referenced[index].clone())
        .collect()
}

//! Per-account tweet collection
//!
//! A [`TweetCollection`] merges every page fetched for one account into a
//! single record set: the tweets in page order, plus the side-channel of
//! referenced tweets aggregated across all pages. The collection is built
//! once, handed to the reconciler, consumed by row projection, and dropped.

use crate::client::{Tweet, TweetPage};
use serde_json::Value;
use std::collections::HashMap;

/// A referenced tweet lifted out of the `includes` side-channel
///
/// Exists only during reconciliation; never persisted on its own.
#[derive(Debug, Clone)]
pub struct ReferencedTweet {
    /// Id of the referenced tweet
    pub id: String,

    /// Full text of the referenced tweet
    pub text: String,

    /// Canonical status URL, `unknown` standing in for an unresolvable
    /// author
    pub url: String,

    /// Entities of the referenced tweet
    pub entities: Value,
}

/// All tweets fetched for one account, plus the aggregated side-channel
#[derive(Debug, Clone)]
pub struct TweetCollection {
    /// The account handle these tweets were fetched under
    pub handle: String,

    /// Tweets in API page order
    pub tweets: Vec<Tweet>,

    /// Referenced tweets from every page's `includes`, in page order
    pub referenced: Vec<ReferencedTweet>,
}

impl TweetCollection {
    /// Builds a collection from an account's fetched pages
    ///
    /// Tweets keep their page order. Each page's `includes.tweets` entries
    /// are turned into [`ReferencedTweet`]s, resolving author usernames
    /// through that page's `includes.users`.
    pub fn from_pages(handle: impl Into<String>, pages: Vec<TweetPage>) -> Self {
        let mut tweets = Vec::new();
        let mut referenced = Vec::new();

        for page in pages {
            let TweetPage { data, includes, .. } = page;

            let usernames: HashMap<String, String> = includes
                .users
                .iter()
                .map(|user| (user.id.clone(), user.username.clone()))
                .collect();

            for included in includes.tweets {
                let username = included
                    .author_id
                    .as_deref()
                    .and_then(|author_id| usernames.get(author_id))
                    .map(String::as_str)
                    .unwrap_or("unknown");

                referenced.push(ReferencedTweet {
                    url: status_url(username, &included.id),
                    id: included.id,
                    text: included.text,
                    entities: included.entities,
                });
            }

            tweets.extend(data);
        }

        Self {
            handle: handle.into(),
            tweets,
            referenced,
        }
    }
}

/// Canonical status URL for a tweet
pub fn status_url(username: &str, id: &str) -> String {
    format!("https://twitter.com/{}/status/{}", username, id)
}

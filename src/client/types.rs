//! Wire types for the API v2 payloads
//!
//! Tweets arrive with many optional fields. The defaults declared here are
//! the admission policy: every optional key is mapped to a neutral value
//! (empty object, empty string, empty list, false) the moment a page is
//! decoded, so downstream code never deals with missing keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A typed link from one tweet to another it retweets, quotes, or replies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRef {
    /// `retweeted`, `quoted`, or `replied_to`
    #[serde(rename = "type")]
    pub kind: String,

    /// Id of the target tweet
    pub id: String,
}

/// One crawled tweet record
///
/// `retweet_entities` and `referenced_urls` are never present on the wire;
/// they are populated by the reconciler when a reference resolves.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,

    #[serde(default)]
    pub author_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub referenced_tweets: Vec<TweetRef>,

    #[serde(default = "empty_object")]
    pub public_metrics: Value,

    #[serde(default = "empty_object")]
    pub entities: Value,

    #[serde(default)]
    pub conversation_id: String,

    #[serde(default)]
    pub lang: String,

    #[serde(default)]
    pub in_reply_to_user_id: String,

    #[serde(default)]
    pub possibly_sensitive: bool,

    #[serde(default = "empty_object")]
    pub withheld: Value,

    /// Entities copied from a resolved referenced tweet
    #[serde(skip)]
    pub retweet_entities: Option<Value>,

    /// Canonical URLs of resolved referenced tweets, first-seen order,
    /// no duplicates
    #[serde(skip)]
    pub referenced_urls: Vec<String>,
}

/// A referenced tweet as it appears in the `includes` side-channel
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedTweet {
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default = "empty_object")]
    pub entities: Value,
}

/// An account record from the user lookup or the author expansion
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub username: String,

    #[serde(default)]
    pub public_metrics: UserPublicMetrics,
}

/// Public counters attached to a user record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPublicMetrics {
    #[serde(default)]
    pub tweet_count: u64,
}

/// Envelope of the bulk user lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub data: Vec<ApiUser>,
}

/// The `includes` side-channel of one search page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub tweets: Vec<IncludedTweet>,

    #[serde(default)]
    pub users: Vec<ApiUser>,
}

/// Pagination metadata of one search page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub next_token: Option<String>,

    #[serde(default)]
    pub result_count: u64,
}

/// One page of full-archive search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetPage {
    #[serde(default)]
    pub data: Vec<Tweet>,

    #[serde(default)]
    pub includes: Includes,

    #[serde(default)]
    pub meta: Option<PageMeta>,
}

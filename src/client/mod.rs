//! Twitter API v2 client
//!
//! This module contains the HTTP plumbing for the crawler:
//! - Client construction with bearer authentication
//! - Status checking with surfaced response bodies
//! - The bulk user lookup
//! - The paginated full-archive search call
//!
//! The crawler treats this module as a page source: each search page carries
//! a `data` array of tweets plus an `includes` side-channel of referenced
//! tweets and their authors.

mod http;
mod pagination;
mod types;

pub use http::{build_http_client, ApiClientConfig};
pub use pagination::{fetch_timeline, lookup_users, EXPANSIONS, TWEET_FIELDS};
pub use types::{
    ApiUser, Includes, IncludedTweet, PageMeta, Tweet, TweetPage, TweetRef, UserPublicMetrics,
};

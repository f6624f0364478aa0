//! Paginated endpoint calls
//!
//! The full-archive search returns one page per call and a `next_token` in
//! `meta` while more pages remain. [`fetch_timeline`] follows that token
//! until the API reports no more pages or the per-account cap is reached,
//! and returns the finite page sequence in arrival order.

use crate::client::http::{get_json, ApiClientConfig};
use crate::client::types::{ApiUser, TweetPage, UsersResponse};
use crate::Result;
use reqwest::Client;

/// Tweet fields requested on every search call
pub const TWEET_FIELDS: &str = "id,author_id,created_at,text,public_metrics,referenced_tweets,\
                                entities,conversation_id,lang,in_reply_to_user_id,\
                                possibly_sensitive,withheld";

/// Expansions requested on every search call: the referenced tweets
/// themselves and their authors
pub const EXPANSIONS: &str = "referenced_tweets.id,referenced_tweets.id.author_id";

/// Looks up a batch of accounts in one call
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Client configuration
/// * `handles` - Handles to look up, without `@` prefixes
///
/// # Returns
///
/// * `Ok(Vec<ApiUser>)` - Account records with public metrics
/// * `Err(TweetlineError)` - Request or decode failure
pub async fn lookup_users(
    client: &Client,
    config: &ApiClientConfig,
    handles: &[String],
) -> Result<Vec<ApiUser>> {
    let url = format!("{}/users/by", config.base_url);
    let query = [
        ("usernames", handles.join(",")),
        ("user.fields", "public_metrics".to_string()),
    ];

    let response: UsersResponse = get_json(client, config, &url, &query).await?;
    Ok(response.data)
}

/// Fetches one account's timeline as a sequence of search pages
///
/// Pages are requested sequentially; each call blocks until its page is
/// returned. The sequence ends when the API stops handing out a
/// `next_token` or once `max_tweets` records have arrived.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Client configuration
/// * `handle` - Account handle, without `@`
/// * `start_time` - RFC 3339 lower bound
/// * `end_time` - RFC 3339 upper bound
/// * `max_tweets` - Cap on total records fetched for this account
///
/// # Returns
///
/// * `Ok(Vec<TweetPage>)` - Pages in arrival order
/// * `Err(TweetlineError)` - Request or decode failure
pub async fn fetch_timeline(
    client: &Client,
    config: &ApiClientConfig,
    handle: &str,
    start_time: &str,
    end_time: &str,
    max_tweets: u64,
) -> Result<Vec<TweetPage>> {
    let url = format!("{}/tweets/search/all", config.base_url);

    let mut pages = Vec::new();
    let mut fetched: u64 = 0;
    let mut next_token: Option<String> = None;

    loop {
        let mut query: Vec<(&str, String)> = vec![
            ("query", format!("from:{}", handle)),
            ("start_time", start_time.to_string()),
            ("end_time", end_time.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("expansions", EXPANSIONS.to_string()),
            ("user.fields", "id,name,username".to_string()),
            ("max_results", config.results_per_call.to_string()),
        ];
        if let Some(token) = &next_token {
            query.push(("next_token", token.clone()));
        }

        let page: TweetPage = get_json(client, config, &url, &query).await?;

        fetched += page.data.len() as u64;
        next_token = page.meta.as_ref().and_then(|meta| meta.next_token.clone());

        let done = next_token.is_none() || fetched >= max_tweets;
        pages.push(page);
        if done {
            break;
        }
    }

    Ok(pages)
}

//! HTTP plumbing for the API client
//!
//! This module handles client construction and the shared GET-with-status
//! checking used by every endpoint call. A non-success response surfaces
//! the status code and the response body.

use crate::{Result, TweetlineError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Explicit configuration for the API client
///
/// Carries everything a request needs, bearer token included, so no
/// process-wide state is involved.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the API, without a trailing slash
    pub base_url: String,

    /// Bearer token used for every request
    pub bearer_token: String,

    /// Results requested per search call
    pub results_per_call: u32,

    /// Upper bound on tweets fetched per account
    pub max_tweets_per_user: u64,
}

impl ApiClientConfig {
    /// Builds a client configuration from the loaded API section and the
    /// bearer token taken from the environment
    pub fn new(api: &crate::config::ApiConfig, bearer_token: String) -> Self {
        Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            bearer_token,
            results_per_call: api.results_per_call,
            max_tweets_per_user: api.max_tweets_per_user,
        }
    }
}

/// Builds the HTTP client used for all API calls
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!("tweetline/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues an authenticated GET and decodes the JSON response
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Client configuration carrying the bearer token
/// * `url` - Full endpoint URL
/// * `query` - Query parameters
///
/// # Returns
///
/// * `Ok(T)` - Decoded response payload
/// * `Err(TweetlineError::Api)` - Non-success status, with the response body
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    config: &ApiClientConfig,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    let response = client
        .get(url)
        .bearer_auth(&config.bearer_token)
        .query(query)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TweetlineError::Api {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_config_trims_trailing_slash() {
        let api = ApiConfig {
            base_url: "https://api.twitter.com/2/".to_string(),
            ..ApiConfig::default()
        };
        let config = ApiClientConfig::new(&api, "token".to_string());
        assert_eq!(config.base_url, "https://api.twitter.com/2");
    }
}

use serde::Deserialize;

/// Main configuration structure for Tweetline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub roster: RosterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Twitter API endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API (overridable for tests)
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Results requested per search call (the API caps this at 500)
    #[serde(rename = "results-per-call", default = "default_results_per_call")]
    pub results_per_call: u32,

    /// Upper bound on tweets fetched per account, regardless of its
    /// published tweet count
    #[serde(rename = "max-tweets-per-user", default = "default_max_tweets_per_user")]
    pub max_tweets_per_user: u64,
}

/// Roster input configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Path to the roster CSV file
    pub path: String,

    /// Header of the column holding account handles
    #[serde(rename = "handle-column", default = "default_handle_column")]
    pub handle_column: String,

    /// Columns whose header contains this prefix are joined into the
    /// per-account tag string
    #[serde(rename = "tag-column-prefix", default = "default_tag_column_prefix")]
    pub tag_column_prefix: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Folder that receives the CSV files
    #[serde(default = "default_output_folder")]
    pub folder: String,

    /// Data rows per chunk file when splitting is enabled
    #[serde(rename = "rows-per-file", default = "default_rows_per_file")]
    pub rows_per_file: usize,
}

fn default_base_url() -> String {
    "https://api.twitter.com/2".to_string()
}

fn default_results_per_call() -> u32 {
    500
}

fn default_max_tweets_per_user() -> u64 {
    1000
}

fn default_handle_column() -> String {
    "Twitter Handle".to_string()
}

fn default_tag_column_prefix() -> String {
    "Tag".to_string()
}

fn default_output_folder() -> String {
    "Output".to_string()
}

fn default_rows_per_file() -> usize {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            results_per_call: default_results_per_call(),
            max_tweets_per_user: default_max_tweets_per_user(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: default_output_folder(),
            rows_per_file: default_rows_per_file(),
        }
    }
}

//! Integration tests for the crawler
//!
//! These tests use wiremock to mock the API v2 endpoints and drive the full
//! crawl cycle end-to-end: user lookup, paginated search, reconciliation,
//! row projection, and chunked CSV output.

use std::path::Path;
use tempfile::TempDir;
use tweetline::config::{ApiConfig, Config, OutputConfig, RosterConfig, RosterEntry};
use tweetline::crawler::{crawl, CrawlOptions};
use tweetline::output::OUTPUT_COLUMNS;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn test_config(base_url: &str, folder: &Path, rows_per_file: usize) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            results_per_call: 10,
            max_tweets_per_user: 1000,
        },
        roster: RosterConfig {
            path: String::new(),
            handle_column: "Twitter Handle".to_string(),
            tag_column_prefix: "Tag".to_string(),
        },
        output: OutputConfig {
            folder: folder.display().to_string(),
            rows_per_file,
        },
    }
}

fn test_options(split: bool, batch_size: Option<usize>) -> CrawlOptions {
    CrawlOptions {
        split,
        start_date: chrono::NaiveDate::from_ymd_opt(2006, 3, 21).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        batch_size,
    }
}

fn entry(handle: &str, tags: &str) -> RosterEntry {
    RosterEntry {
        handle: handle.to_string(),
        tags: tags.to_string(),
    }
}

/// Reads the data rows of an output file, BOM and header stripped
fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.starts_with('\u{feff}'), "output file missing BOM");
    let content = content.trim_start_matches('\u{feff}');

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        OUTPUT_COLUMNS
    );
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn column(name: &str) -> usize {
    OUTPUT_COLUMNS.iter().position(|c| *c == name).unwrap()
}

async fn mock_users(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/users/by"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn mock_search(server: &MockServer, handle: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/tweets/search/all"))
        .and(query_param("query", format!("from:{}", handle)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

const ALICE_AND_BOB_USERS: &str = r#"{"data": [
    {"id": "1", "name": "Alice", "username": "alice",
     "public_metrics": {"tweet_count": 3}},
    {"id": "2", "name": "Bob", "username": "bob",
     "public_metrics": {"tweet_count": 0}}
]}"#;

const EMPTY_TIMELINE: &str = r#"{"meta": {"result_count": 0}}"#;

#[tokio::test]
async fn test_two_account_crawl_with_retweet_reconciliation() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mock_users(&server, ALICE_AND_BOB_USERS).await;
    mock_search(
        &server,
        "alice",
        r#"{
            "data": [
                {"id": "101", "author_id": "1",
                 "created_at": "2021-06-01T10:00:00.000Z",
                 "text": "RT @carol: news story beginni…",
                 "referenced_tweets": [{"type": "retweeted", "id": "900"}],
                 "public_metrics": {"retweet_count": 5, "like_count": 0},
                 "conversation_id": "101", "lang": "en"},
                {"id": "102", "author_id": "1",
                 "created_at": "2021-06-02T10:00:00.000Z",
                 "text": "plain tweet",
                 "entities": {"urls": [{"expanded_url": "https://own.example/a"}]},
                 "conversation_id": "102", "lang": "en"},
                {"id": "103", "author_id": "1",
                 "created_at": "2021-06-03T10:00:00.000Z",
                 "text": "another plain tweet",
                 "conversation_id": "103", "lang": "en"}
            ],
            "includes": {
                "tweets": [
                    {"id": "900",
                     "text": "news story beginning and the rest of it",
                     "author_id": "9",
                     "entities": {"urls": [{"expanded_url": "https://cited.example/story"}]}}
                ],
                "users": [{"id": "9", "name": "Carol", "username": "carol"}]
            },
            "meta": {"result_count": 3}
        }"#,
    )
    .await;
    mock_search(&server, "bob", EMPTY_TIMELINE).await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA"), entry("bob", "tagB")];
    crawl(config, "token".to_string(), test_options(false, None), &roster)
        .await
        .unwrap();

    let rows = read_rows(&out.path().join("0_output.csv"));

    // Alice's three tweets in page order, bob contributes nothing
    assert_eq!(rows.len(), 3);
    let ids: Vec<&str> = rows.iter().map(|r| r[column("id")].as_str()).collect();
    assert_eq!(ids, ["101", "102", "103"]);
    for row in &rows {
        assert_eq!(row[column("twitter_handle")], "alice");
        assert_eq!(row[column("tags")], "tagA");
    }

    // The retweet got its text restored and its reference materialized
    let retweet = &rows[0];
    assert_eq!(
        retweet[column("text")],
        "RT @carol:news story beginning and the rest of it"
    );
    assert_eq!(
        retweet[column("referenced_urls")],
        r#"["https://twitter.com/carol/status/900"]"#
    );
    assert_eq!(
        retweet[column("citation_urls")],
        r#"["https://cited.example/story","https://twitter.com/carol/status/900"]"#
    );
    assert_eq!(
        retweet[column("tweet_url")],
        "https://twitter.com/alice/status/101"
    );

    // Plain tweets keep neutral derived fields
    assert_eq!(rows[1][column("referenced_urls")], "[]");
    assert_eq!(
        rows[1][column("citation_urls")],
        r#"["https://own.example/a"]"#
    );
    assert_eq!(rows[2][column("citation_urls")], "[]");
}

#[tokio::test]
async fn test_unmatched_reference_leaves_fields_neutral() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mock_users(
        &server,
        r#"{"data": [{"id": "1", "name": "Alice", "username": "alice",
                      "public_metrics": {"tweet_count": 1}}]}"#,
    )
    .await;
    // The referenced tweet never shows up in any includes
    mock_search(
        &server,
        "alice",
        r#"{
            "data": [
                {"id": "101", "author_id": "1",
                 "text": "RT @gone: vanished content",
                 "referenced_tweets": [{"type": "retweeted", "id": "404404"}]}
            ],
            "meta": {"result_count": 1}
        }"#,
    )
    .await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA")];
    crawl(config, "token".to_string(), test_options(false, None), &roster)
        .await
        .unwrap();

    let rows = read_rows(&out.path().join("0_output.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][column("text")], "RT @gone: vanished content");
    assert_eq!(rows[0][column("referenced_urls")], "[]");
    assert_eq!(rows[0][column("citation_urls")], "[]");
}

#[tokio::test]
async fn test_reference_resolved_across_pages() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mock_users(
        &server,
        r#"{"data": [{"id": "1", "name": "Alice", "username": "alice",
                      "public_metrics": {"tweet_count": 2}}]}"#,
    )
    .await;

    // Page one declares the reference; page two's includes carry its target
    Mock::given(method("GET"))
        .and(path("/tweets/search/all"))
        .and(query_param("next_token", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "data": [{"id": "102", "author_id": "1", "text": "older tweet"}],
                "includes": {
                    "tweets": [{"id": "900", "text": "the quoted content",
                                "author_id": "9"}],
                    "users": [{"id": "9", "name": "Carol", "username": "carol"}]
                },
                "meta": {"result_count": 1}
            }"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tweets/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "data": [{"id": "101", "author_id": "1", "text": "look at this",
                          "referenced_tweets": [{"type": "quoted", "id": "900"}]}],
                "meta": {"result_count": 1, "next_token": "page2"}
            }"#,
        ))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA")];
    crawl(config, "token".to_string(), test_options(false, None), &roster)
        .await
        .unwrap();

    let rows = read_rows(&out.path().join("0_output.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0][column("referenced_urls")],
        r#"["https://twitter.com/carol/status/900"]"#
    );
}

#[tokio::test]
async fn test_split_output_chunks() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mock_users(
        &server,
        r#"{"data": [{"id": "1", "name": "Alice", "username": "alice",
                      "public_metrics": {"tweet_count": 5}}]}"#,
    )
    .await;
    mock_search(
        &server,
        "alice",
        r#"{
            "data": [
                {"id": "101", "text": "one"},
                {"id": "102", "text": "two"},
                {"id": "103", "text": "three"},
                {"id": "104", "text": "four"},
                {"id": "105", "text": "five"}
            ],
            "meta": {"result_count": 5}
        }"#,
    )
    .await;

    let config = test_config(&server.uri(), out.path(), 2);
    let roster = vec![entry("alice", "tagA")];
    crawl(config, "token".to_string(), test_options(true, None), &roster)
        .await
        .unwrap();

    // 5 rows at 2 per file: [2, 2, 1]
    assert_eq!(read_rows(&out.path().join("0_output_0.csv")).len(), 2);
    assert_eq!(read_rows(&out.path().join("0_output_1.csv")).len(), 2);
    let last = read_rows(&out.path().join("0_output_2.csv"));
    assert_eq!(last.len(), 1);
    assert_eq!(last[0][column("id")], "105");
    assert!(!out.path().join("0_output_3.csv").exists());
}

#[tokio::test]
async fn test_batches_get_numbered_file_sets() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // Each single-account group does its own lookup
    Mock::given(method("GET"))
        .and(path("/users/by"))
        .and(query_param("usernames", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": [{"id": "1", "name": "Alice", "username": "alice",
                          "public_metrics": {"tweet_count": 1}}]}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/by"))
        .and(query_param("usernames", "bob"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": [{"id": "2", "name": "Bob", "username": "bob",
                          "public_metrics": {"tweet_count": 1}}]}"#,
        ))
        .mount(&server)
        .await;
    mock_search(
        &server,
        "alice",
        r#"{"data": [{"id": "101", "text": "from alice"}],
            "meta": {"result_count": 1}}"#,
    )
    .await;
    mock_search(
        &server,
        "bob",
        r#"{"data": [{"id": "201", "text": "from bob"}],
            "meta": {"result_count": 1}}"#,
    )
    .await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA"), entry("bob", "tagB")];
    crawl(config, "token".to_string(), test_options(false, Some(1)), &roster)
        .await
        .unwrap();

    let first = read_rows(&out.path().join("0_output.csv"));
    let second = read_rows(&out.path().join("1_output.csv"));
    assert_eq!(first[0][column("twitter_handle")], "alice");
    assert_eq!(first[0][column("tags")], "tagA");
    assert_eq!(second[0][column("twitter_handle")], "bob");
    assert_eq!(second[0][column("tags")], "tagB");
}

#[tokio::test]
async fn test_user_count_mismatch_abandons_group() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // Two handles requested, one account returned
    mock_users(
        &server,
        r#"{"data": [{"id": "1", "name": "Alice", "username": "alice",
                      "public_metrics": {"tweet_count": 1}}]}"#,
    )
    .await;
    // The search endpoint must never be hit for an abandoned group
    Mock::given(method("GET"))
        .and(path("/tweets/search/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_TIMELINE))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA"), entry("no_such_user", "tagB")];
    crawl(config, "token".to_string(), test_options(false, None), &roster)
        .await
        .unwrap();

    // No partial output for the abandoned group
    assert!(!out.path().join("0_output.csv").exists());
}

#[tokio::test]
async fn test_failing_account_is_skipped() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mock_users(&server, ALICE_AND_BOB_USERS).await;
    Mock::given(method("GET"))
        .and(path("/tweets/search/all"))
        .and(query_param("query", "from:alice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;
    mock_search(
        &server,
        "bob",
        r#"{"data": [{"id": "201", "author_id": "2", "text": "still here"}],
            "meta": {"result_count": 1}}"#,
    )
    .await;

    let config = test_config(&server.uri(), out.path(), 10_000);
    let roster = vec![entry("alice", "tagA"), entry("bob", "tagB")];
    crawl(config, "token".to_string(), test_options(false, None), &roster)
        .await
        .unwrap();

    // Alice's failure must not take bob down with her
    let rows = read_rows(&out.path().join("0_output.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][column("twitter_handle")], "bob");
    assert_eq!(rows[0][column("tags")], "tagB");
}

use super::*;
use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use shared::{domain::LookupMode, error::ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct WordServerState {
    seen: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn handle_words(
    State(state): State<WordServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.seen.lock().await.push(params.clone());

    if params.contains_key("rel_rhy") {
        Json(serde_json::json!([
            {"word": "tape", "score": 900, "numSyllables": 1},
            {"word": "escape", "score": 850, "numSyllables": 2},
            {"word": "drape", "score": 800, "numSyllables": 1}
        ]))
        .into_response()
    } else if params.get("ml").map(String::as_str) == Some("happy") {
        Json(serde_json::json!([
            {"word": "glad", "score": 50, "numSyllables": 1},
            {"word": "joyful", "score": 90, "numSyllables": 2}
        ]))
        .into_response()
    } else {
        Json(serde_json::json!([])).into_response()
    }
}

async fn spawn_word_server() -> Result<(String, WordServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = WordServerState {
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/words", get(handle_words))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

async fn spawn_fixed_server(status: StatusCode, body: &'static str) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route("/words", get(move || async move { (status, body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn rhyme_lookup_sends_rel_rhy_and_max() {
    let (server_url, state) = spawn_word_server().await.expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let query = WordQuery::new(LookupMode::Rhymes, "grape").with_max_results(25);
    let records = client.lookup(&query).await.expect("lookup");
    assert_eq!(records.len(), 3);

    let seen = state.seen.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("rel_rhy").map(String::as_str), Some("grape"));
    assert_eq!(seen[0].get("max").map(String::as_str), Some("25"));
    assert!(!seen[0].contains_key("ml"));
}

#[tokio::test]
async fn find_groups_rhymes_by_syllables() {
    let (server_url, _) = spawn_word_server().await.expect("spawn server");
    let client = WordLookupClient::new(&format!("{server_url}/")).expect("client");

    let result = client
        .find(WordQuery::new(LookupMode::Rhymes, "grape"), None)
        .await
        .expect("find");
    let headings: Vec<_> = result.groups.iter().map(|g| g.heading.as_str()).collect();
    assert_eq!(headings, vec!["1 syllable:", "2 syllables:"]);
    let one: Vec<_> = result.groups[0].words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(one, vec!["tape", "drape"]);
}

#[tokio::test]
async fn find_similar_meaning_orders_by_score() {
    let (server_url, state) = spawn_word_server().await.expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let result = client
        .find(WordQuery::new(LookupMode::SimilarMeaning, "happy"), None)
        .await
        .expect("find");
    assert_eq!(result.groups.len(), 1);
    let words: Vec<_> = result.groups[0].words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["joyful", "glad"]);
    assert!(state.seen.lock().await[0].contains_key("ml"));
}

#[tokio::test]
async fn find_with_group_field_overrides_default_arrangement() {
    let (server_url, _) = spawn_word_server().await.expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let result = client
        .find(
            WordQuery::new(LookupMode::SimilarMeaning, "happy"),
            Some("numSyllables"),
        )
        .await
        .expect("find");
    let headings: Vec<_> = result.groups.iter().map(|g| g.heading.as_str()).collect();
    assert_eq!(headings, vec!["numSyllables: 1", "numSyllables: 2"]);
}

#[tokio::test]
async fn empty_response_gives_empty_result() {
    let (server_url, _) = spawn_word_server().await.expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let result = client
        .find(WordQuery::new(LookupMode::SimilarMeaning, "qwzx"), None)
        .await
        .expect("find");
    assert!(result.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server_url = spawn_fixed_server(StatusCode::SERVICE_UNAVAILABLE, "down")
        .await
        .expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let err = client
        .lookup(&WordQuery::new(LookupMode::Rhymes, "grape"))
        .await
        .expect_err("should fail");
    assert!(matches!(err, LookupError::Status { status: 503 }));
    assert!(matches!(err.code(), ErrorCode::Status));
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let server_url = spawn_fixed_server(StatusCode::OK, "{\"not\": \"a list\"}")
        .await
        .expect("spawn server");
    let client = WordLookupClient::new(&server_url).expect("client");

    let err = client
        .lookup(&WordQuery::new(LookupMode::Rhymes, "grape"))
        .await
        .expect_err("should fail");
    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_maps_to_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = WordLookupClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .lookup(&WordQuery::new(LookupMode::Rhymes, "grape"))
        .await
        .expect_err("should fail");
    assert!(matches!(err, LookupError::Transport(_)));
}

#[test]
fn normalize_base_url_trims_trailing_slashes() {
    assert_eq!(
        normalize_base_url("  https://api.datamuse.com//  ").expect("valid"),
        "https://api.datamuse.com"
    );
}

#[test]
fn normalize_base_url_rejects_empty_and_non_http() {
    assert!(matches!(
        normalize_base_url("   "),
        Err(LookupError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://example.com"),
        Err(LookupError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(LookupError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn client_reports_normalized_base_url() {
    let client = WordLookupClient::new("http://127.0.0.1:9/").expect("client");
    assert_eq!(client.base_url(), "http://127.0.0.1:9");
    assert_eq!(client.words_url(), "http://127.0.0.1:9/words");
}

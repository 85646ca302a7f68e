//! Behaviour tests for failure handling across the core.

mod support;

use std::sync::Arc;

use support::{symbol, ScriptedClient};
use tempfile::tempdir;
use valuora_core::historicals::fetch_historicals_quietly;
use valuora_core::storage::SESSION_KEY;
use valuora_core::{
    ApiError, AuthError, ClientConfig, CoreError, Credentials, DemoAuthenticator, FileStore,
    HttpError, HttpResponse, LocalStore, SessionManager, StorageError, Symbol, TreasuryError,
    TreasuryRateSource, ValidationError, ValuationApi,
};

fn api(client: &Arc<ScriptedClient>) -> ValuationApi {
    ValuationApi::new(client.clone(), &ClientConfig::default())
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn when_ticker_is_malformed_a_specific_validation_error_is_returned() {
    assert_eq!(Symbol::parse("  "), Err(ValidationError::EmptySymbol));
    assert!(matches!(
        Symbol::parse("1ABC"),
        Err(ValidationError::SymbolInvalidStart { ch: '1' })
    ));
    assert!(matches!(
        Symbol::parse("AB$C"),
        Err(ValidationError::SymbolInvalidChar { ch: '$', index: 2 })
    ));
}

#[test]
fn when_api_url_is_not_http_configuration_is_rejected() {
    let result = ClientConfig::default().with_api_base_url("ftp://files.example.com");
    assert!(matches!(result, Err(ValidationError::InvalidUrl { .. })));
}

#[tokio::test]
async fn when_historical_limit_is_out_of_range_no_request_is_made() {
    // Given: A client that would answer
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::ok_json("{}")));

    // When: Asking for more periods than allowed
    let result = api(&client).historical_metrics(&symbol("AAPL"), 21).await;

    // Then: The call is refused locally
    assert!(matches!(
        result,
        Err(ApiError::Validation(ValidationError::InvalidHistoricalLimit { value: 21, max: 20 }))
    ));
    assert_eq!(client.call_count(), 0);
}

// =============================================================================
// Remote failures
// =============================================================================

#[tokio::test]
async fn when_backend_times_out_the_transport_error_is_reported() {
    let client = Arc::new(ScriptedClient::new().fail(HttpError::timeout("deadline elapsed")));

    let error = api(&client)
        .historical_metrics(&symbol("AAPL"), 5)
        .await
        .expect_err("must fail");

    match error {
        ApiError::Transport(transport) => assert!(transport.timed_out()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn when_error_body_is_not_json_the_status_line_is_used() {
    let client = Arc::new(
        ScriptedClient::new().respond(HttpResponse::new(502, "<html>Bad Gateway</html>")),
    );

    let error = api(&client)
        .historical_metrics(&symbol("AAPL"), 5)
        .await
        .expect_err("must fail");

    assert_eq!(error.status(), Some(502));
    assert!(error.to_string().contains("HTTP 502 bad gateway"));
}

#[tokio::test]
async fn when_historicals_fail_the_wizard_just_goes_without_them() {
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::new(404, "")));

    let historicals = fetch_historicals_quietly(&api(&client), &symbol("ZZZZ"), 5).await;

    assert!(historicals.is_none());
}

#[tokio::test]
async fn when_historicals_succeed_the_series_are_returned() {
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::ok_json(
        r#"{"historicals":{"revenue":[10.0,12.0],"ebitda":[2.0,2.5]}}"#,
    )));

    let historicals = fetch_historicals_quietly(&api(&client), &symbol("AAPL"), 2)
        .await
        .expect("historicals");

    assert_eq!(historicals.latest("revenue"), Some(12.0));
    let body = client.requests()[0].body.clone().expect("body");
    assert_eq!(body, r#"{"ticker":"AAPL","limit":2}"#);
}

#[tokio::test]
async fn when_treasury_body_is_garbage_a_decode_error_is_returned() {
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::ok_json(r#"{"yield":"n/a"}"#)));
    let source = TreasuryRateSource::new(client, "https://rates.test/10y", 500);

    let error = source.ten_year_rate().await.expect_err("must fail");

    assert!(matches!(error, TreasuryError::Decode(_)));
    assert!(matches!(CoreError::from(error), CoreError::Treasury(_)));
}

// =============================================================================
// Sessions and local storage
// =============================================================================

#[test]
fn when_credentials_are_weak_no_session_is_stored() {
    // Given: An empty data directory
    let dir = tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    let sessions = SessionManager::new(&store, DemoAuthenticator);

    // When: Logging in with a short password
    let result = sessions.login(&Credentials::new("ana@example.com", "short"));

    // Then: Login fails and nothing was written
    assert!(matches!(result, Err(AuthError::WeakPassword { min: 8 })));
    assert!(matches!(sessions.require(), Err(AuthError::NotLoggedIn)));
}

#[test]
fn when_stored_session_is_corrupt_the_user_is_treated_as_logged_out() {
    // Given: A session file that is not a session
    let dir = tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    store
        .put(SESSION_KEY, serde_json::json!({ "unexpected": true }))
        .expect("put");
    let sessions = SessionManager::new(&store, DemoAuthenticator);

    // When/Then: No session is reported and login still works
    assert!(sessions.current().expect("current").is_none());
    let session = sessions
        .login(&Credentials::new("Ana@Example.com", "correct horse"))
        .expect("login");
    assert_eq!(session.email, "ana@example.com");
    assert_eq!(
        sessions.current().expect("current").map(|s| s.email),
        Some(String::from("ana@example.com"))
    );
}

#[test]
fn when_session_is_logged_out_twice_the_second_reports_nothing_removed() {
    let dir = tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    let sessions = SessionManager::new(&store, DemoAuthenticator);
    sessions
        .login(&Credentials::new("ana@example.com", "long enough"))
        .expect("login");

    assert!(sessions.logout().expect("logout"));
    assert!(!sessions.logout().expect("logout"));
}

#[test]
fn when_storage_key_is_unsafe_it_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());

    for key in ["../escape", "Upper", "", "a/b"] {
        assert!(
            matches!(store.get(key), Err(StorageError::InvalidKey { .. })),
            "key {key:?} should be rejected"
        );
    }
}

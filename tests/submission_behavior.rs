//! Behaviour tests for submitting projects and generating valuations.

mod support;

use std::sync::Arc;

use serde_json::Value;
use support::{ready_wizard, symbol, ScriptedClient};
use valuora_core::storage::LAST_PROJECT_KEY;
use valuora_core::{
    ApiError, ClientConfig, FixtureHttpClient, HttpAuth, HttpMethod, HttpResponse, LocalStore,
    MemoryStore, ProjectRecord, SubmissionAdapter, SubmissionError, ValidationError,
    ValuationApi, WizardAction, WizardState,
};

fn config() -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url("https://api.valuora.test")
        .expect("valid url")
}

fn api(client: &Arc<ScriptedClient>) -> ValuationApi {
    ValuationApi::new(client.clone(), &config())
        .with_auth(HttpAuth::BearerToken(String::from("token-123")))
}

// =============================================================================
// Submit
// =============================================================================

#[tokio::test]
async fn when_wizard_is_ready_the_project_is_created_and_snapshotted() {
    // Given: A ready wizard and a backend that accepts the project
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::new(
        201,
        r#"{"projectId":"p-42","status":"created"}"#,
    )));
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    // When: The wizard is submitted
    let submitted = adapter.submit(&ready_wizard()).await.expect("submit");

    // Then: The backend got one authenticated POST with the normalized record
    assert_eq!(submitted.project_id, "p-42");
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "https://api.valuora.test/api/v1/projects/");
    assert_eq!(
        requests[0].headers.get("authorization").map(String::as_str),
        Some("Bearer token-123")
    );

    let body: Value =
        serde_json::from_str(requests[0].body.as_deref().expect("body")).expect("json body");
    assert_eq!(body["ticker"], "SHOP");
    assert_eq!(body["companyName"], "Shopify Inc.");
    assert_eq!(body["competitors"].as_array().map(Vec::len), Some(4));
    assert!(body["scenarios"]["bear"].is_object());

    // And: The same record is kept locally
    let saved: ProjectRecord = store
        .load(LAST_PROJECT_KEY)
        .expect("load")
        .expect("snapshot present");
    assert_eq!(saved, submitted.record);
}

#[tokio::test]
async fn when_wizard_is_incomplete_nothing_is_sent_or_saved() {
    // Given: A wizard with only three competitors
    let client = Arc::new(ScriptedClient::new());
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);
    let mut state = ready_wizard();
    state
        .apply(WizardAction::RemoveCompetitor {
            symbol: symbol("WIX"),
        })
        .expect("remove");

    // When: It is submitted
    let error = adapter.submit(&state).await.expect_err("must fail");

    // Then: Validation fails before any network call or local write
    assert!(matches!(
        error,
        SubmissionError::Validation(ValidationError::CompetitorCount {
            required: 4,
            found: 3
        })
    ));
    assert_eq!(client.call_count(), 0);
    assert_eq!(store.get(LAST_PROJECT_KEY).expect("get"), None);
}

#[tokio::test]
async fn when_no_company_is_selected_submission_is_refused() {
    let client = Arc::new(ScriptedClient::new());
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    let error = adapter
        .submit(&WizardState::new())
        .await
        .expect_err("must fail");

    assert!(matches!(
        error,
        SubmissionError::Validation(ValidationError::MissingCompany)
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn when_backend_rejects_the_project_its_message_is_surfaced_and_snapshot_kept() {
    // Given: A backend that rejects the project with a detail message
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::new(
        422,
        r#"{"detail":[{"loc":["body","capital"],"msg":"tax rate is required"}]}"#,
    )));
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    // When: The wizard is submitted
    let error = adapter.submit(&ready_wizard()).await.expect_err("must fail");

    // Then: The server's own message is carried in the error
    match error {
        SubmissionError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "tax rate is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // And: The local snapshot written before the call is still there
    assert!(adapter.last_project().expect("read").is_some());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn when_create_reply_has_no_project_id_it_is_a_decode_error() {
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::ok_json(r#"{"status":"ok"}"#)));
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    let error = adapter.submit(&ready_wizard()).await.expect_err("must fail");

    assert!(matches!(error, SubmissionError::Api(ApiError::Decode { .. })));
}

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn when_valuation_is_generated_the_server_filename_is_used() {
    // Given: An export endpoint naming its attachment
    let spreadsheet = vec![0x50, 0x4b, 0x03, 0x04, 0x14];
    let client = Arc::new(
        ScriptedClient::new().respond(
            HttpResponse::new(200, spreadsheet.clone())
                .with_header("Content-Disposition", r#"attachment; filename="SHOP_DCF.xlsx""#),
        ),
    );
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    // When: The valuation is generated
    let artifact = adapter.generate("p-42").await.expect("generate");

    // Then: The bytes and name come straight from the response
    assert_eq!(artifact.filename, "SHOP_DCF.xlsx");
    assert_eq!(artifact.bytes, spreadsheet);
    assert_eq!(artifact.size, 5);

    let requests = client.requests();
    assert_eq!(requests[0].url, "https://api.valuora.test/api/v1/valuation/export");
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"projectId":"p-42"}"#));
}

#[tokio::test]
async fn when_export_has_no_filename_a_default_is_derived_from_the_project() {
    let client = Arc::new(ScriptedClient::new().respond(HttpResponse::new(200, vec![1, 2, 3])));
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    let artifact = adapter.generate("p-7").await.expect("generate");

    assert_eq!(artifact.filename, "valuation-p-7.xlsx");
}

#[tokio::test]
async fn when_export_fails_the_error_message_is_kept() {
    let client = Arc::new(
        ScriptedClient::new().respond(HttpResponse::new(500, r#"{"error":"engine crashed"}"#)),
    );
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    let error = adapter.generate("p-42").await.expect_err("must fail");

    assert_eq!(error.to_string(), "server returned 500: engine crashed");
}

#[tokio::test]
async fn when_project_id_is_blank_generation_is_refused_locally() {
    let client = Arc::new(ScriptedClient::new());
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api(&client), &store);

    let error = adapter.generate("  ").await.expect_err("must fail");

    assert!(matches!(
        error,
        SubmissionError::Api(ApiError::Validation(ValidationError::EmptyProjectId))
    ));
    assert_eq!(client.call_count(), 0);
}

// =============================================================================
// Offline fixtures
// =============================================================================

#[tokio::test]
async fn offline_fixtures_support_the_whole_flow() {
    // Given: The bundled sample backend
    let config = ClientConfig::default().with_offline(true);
    let api = ValuationApi::new(Arc::new(FixtureHttpClient::new(&config)), &config);
    let store = MemoryStore::new();
    let adapter = SubmissionAdapter::new(api, &store);

    // When: A project is submitted and its valuation generated
    let submitted = adapter.submit(&ready_wizard()).await.expect("submit");
    let artifact = adapter
        .generate(&submitted.project_id)
        .await
        .expect("generate");

    // Then: Both steps succeed with deterministic identifiers
    assert_eq!(submitted.project_id, "demo-0001");
    assert_eq!(artifact.filename, "demo-0001-valuation.csv");
    assert!(artifact.size > 0);
}

//! # Valuora Core
//!
//! Core contracts and domain logic for the Valuora project wizard.
//!
//! ## Overview
//!
//! This crate provides everything the `valuora` front end needs to set up a
//! valuation project:
//!
//! - **Ticker dataset** loading, memoized once per session
//! - **Ranked company search** over the dataset with a manual-entry fallback
//! - **Wizard state** driven by a single action reducer
//! - **Project submission** and valuation export against the backend
//! - **Local persistence** for the session and the last submitted project
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Backend endpoints (historicals, projects, valuation export) |
//! | [`auth`] | Demo authentication and session handling |
//! | [`config`] | Client configuration from the environment |
//! | [`dataset`] | Ticker dataset loader |
//! | [`domain`] | Domain models (Symbol, TickerRecord, UtcDateTime) |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`fixtures`] | Offline sample data |
//! | [`historicals`] | Historical metric series |
//! | [`http_client`] | HTTP client abstraction |
//! | [`project`] | Normalized project record |
//! | [`search`] | Ranked ticker search |
//! | [`storage`] | Local key-value persistence |
//! | [`submission`] | Submit and generate steps |
//! | [`treasury`] | Risk-free rate pre-fill |
//! | [`wizard`] | Wizard state and reducer |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use valuora_core::{search, ClientConfig, ReqwestHttpClient, SearchOptions, TickerDatasetLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let loader = TickerDatasetLoader::new(
//!         Arc::new(ReqwestHttpClient::new()),
//!         &config.dataset_url,
//!         config.timeout_ms,
//!     );
//!
//!     let dataset = loader.load().await;
//!     let outcome = search("apple", &dataset, SearchOptions::default());
//!     for record in outcome.records() {
//!         println!("{} {}", record.symbol, record.company_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Wizard State   │────▶│ Ranked Search    │
//! │  (reducer)      │     │ (dataset loader) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Submission      │────▶│ HTTP Client      │
//! │ Adapter         │     │ (reqwest/fixture)│
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Local Store     │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result` types with structured errors:
//!
//! ```rust
//! use valuora_core::{ApiError, SubmissionError};
//!
//! fn describe(error: &SubmissionError) -> String {
//!     match error {
//!         SubmissionError::Validation(error) => format!("fix the form: {error}"),
//!         SubmissionError::Api(ApiError::Status { message, .. }) => message.clone(),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - Passwords and session tokens never appear in `Debug` output
//! - Bearer tokens are attached only to backend calls

pub mod api;
pub mod auth;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fixtures;
pub mod historicals;
pub mod http_client;
pub mod project;
pub mod search;
pub mod storage;
pub mod submission;
pub mod treasury;
pub mod wizard;

// Backend API
pub use api::{ApiError, ProjectCreated, ValuationApi, ValuationArtifact};

// Authentication
pub use auth::{AuthError, Authenticator, Credentials, DemoAuthenticator, Session, SessionManager};

// Configuration
pub use config::ClientConfig;

// Dataset loading
pub use dataset::{abort_channel, AbortHandle, AbortSignal, LoadOutcome, TickerDatasetLoader};

// Domain models
pub use domain::{Symbol, TickerRecord, UtcDateTime, UNAVAILABLE_SYMBOL};

// Envelope types
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, EnvelopeWarning, WarningKind};

// Error types
pub use error::{CoreError, ValidationError};

// Offline data
pub use fixtures::FixtureHttpClient;

// Historicals
pub use historicals::{fetch_historicals_quietly, HistoricalMetrics};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Project record
pub use project::{ProjectRecord, ScenarioSet, ScenarioSnapshot};

// Search
pub use search::{search, MatchBucket, RankedMatch, SearchOptions, SearchOutcome, MAX_RESULTS};

// Storage
pub use storage::{FileStore, LocalStore, MemoryStore, StorageError};

// Submission
pub use submission::{SubmissionAdapter, SubmissionError, SubmittedProject};

// Treasury
pub use treasury::{TreasuryError, TreasuryRate, TreasuryRateSource};

// Wizard
pub use wizard::{WizardAction, WizardState};

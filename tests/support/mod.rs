//! Shared fakes for the behaviour tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use valuora_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, Symbol, TickerRecord, WizardAction,
    WizardState,
};

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(response));
        self
    }

    pub fn fail(self, error: HttpError) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl HttpClient for ScriptedClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("requests lock").push(request);
        let next = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("no scripted response left")));
        Box::pin(async move { next })
    }
}

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("test symbol should be valid")
}

pub fn shopify() -> TickerRecord {
    TickerRecord::new("SHOP", "Shopify Inc.")
        .with_currencies(Some("USD"), Some("USD"))
        .expect("valid currencies")
}

/// A wizard with a company and four competitors, ready to submit.
pub fn ready_wizard() -> WizardState {
    let mut state = WizardState::new();
    state
        .apply(WizardAction::SelectCompany { company: shopify() })
        .expect("select company");
    for ticker in ["AMZN", "EBAY", "ETSY", "WIX"] {
        state
            .apply(WizardAction::AddCompetitor {
                symbol: symbol(ticker),
            })
            .expect("add competitor");
    }
    state
}

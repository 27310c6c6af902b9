//! In-memory upstream used by the store tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use rust_decimal::Decimal;
use tokio::sync::Semaphore;

use folio_source::{SourceError, SpotRequest, SpotRow, SpotSource};
use folio_types::{Address, Scope, SpotRecord, TokenMeta};

pub fn spot(owner: &str, token: &str, ts: &str, value: i64) -> SpotRecord {
    SpotRecord {
        owner_address: Address::new(owner),
        token_address: token.to_string(),
        symbol: token.trim_start_matches("0x").to_uppercase(),
        name: token.to_string(),
        decimals: 18,
        timestamp: ts.parse().unwrap(),
        balance: Decimal::ONE,
        price: Decimal::from(value),
        value: Decimal::from(value),
        scope: Scope::OneMonth,
        meta: TokenMeta::default(),
    }
}

pub fn row(owner: &str, token: &str, ts: &str, value: i64) -> SpotRow {
    SpotRow {
        owner_address: owner.to_string(),
        timestamp: ts.to_string(),
        token_address: token.to_string(),
        symbol: Some(token.to_uppercase()),
        name: None,
        description: None,
        external_url: None,
        image_url: None,
        decimals: Some(18),
        balance: Some(Decimal::ONE),
        price: Some(Decimal::from(value)),
        value: Some(Decimal::from(value)),
    }
}

/// Answers every request from a per-address script. Requests for unknown
/// addresses fail. When built `held`, each fetch waits for a permit.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<HashMap<Address, Result<Vec<SpotRow>, i64>>>,
    requests: Mutex<Vec<SpotRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (
            Self {
                gate: Some(gate.clone()),
                ..Self::default()
            },
            gate,
        )
    }

    pub fn respond(&self, address: &str, rows: Vec<SpotRow>) {
        self.script.lock().unwrap().insert(Address::new(address), Ok(rows));
    }

    pub fn fail(&self, address: &str, code: i64) {
        self.script.lock().unwrap().insert(Address::new(address), Err(code));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SpotRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpotSource for ScriptedSource {
    async fn fetch_spots(&self, request: &SpotRequest) -> Result<Vec<SpotRow>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let scripted = self.script.lock().unwrap().get(&request.address).cloned();
        match scripted {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(code)) => Err(SourceError::Upstream {
                code,
                message: "scripted failure".to_string(),
            }),
            None => Err(SourceError::NoResults),
        }
    }
}

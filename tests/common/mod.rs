#![allow(dead_code)]

use async_trait::async_trait;
use quicshift::{BoxError, CancellationToken, MigrationToken, PathDialer, TokenIssuer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Issuer double returning a fixed token, or failing with a fixed message.
pub struct FakeIssuer {
    token: Option<String>,
    err: Option<String>,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeIssuer {
    pub fn ok(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            err: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: &str) -> Self {
        Self {
            token: None,
            err: Some(err.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for FakeIssuer {
    async fn issue_token(
        &self,
        _cancel: &CancellationToken,
        _session_id: &str,
    ) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match (&self.token, &self.err) {
            (_, Some(err)) => Err(err.clone().into()),
            (Some(token), None) => Ok(token.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Dialer double recording every `(target, token)` pair it is asked to open.
#[derive(Default)]
pub struct RecordingDialer {
    calls: Mutex<Vec<(String, String)>>,
    err: Option<String>,
}

impl RecordingDialer {
    pub fn failing(err: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            err: Some(err.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PathDialer for RecordingDialer {
    async fn open(
        &self,
        _cancel: &CancellationToken,
        target: &str,
        token: &MigrationToken,
    ) -> Result<(), BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((target.to_string(), token.as_str().to_string()));
        match &self.err {
            Some(err) => Err(err.clone().into()),
            None => Ok(()),
        }
    }
}

/// Issuer double handing out a distinct token per call and remembering each one.
#[derive(Default)]
pub struct SequenceIssuer {
    next: AtomicUsize,
    issued: Mutex<Vec<String>>,
}

impl SequenceIssuer {
    pub fn issued(&self) -> Vec<String> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for SequenceIssuer {
    async fn issue_token(
        &self,
        _cancel: &CancellationToken,
        session_id: &str,
    ) -> Result<String, BoxError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let token = format!("tok-{}-{}", session_id, n);
        self.issued.lock().unwrap().push(token.clone());
        tokio::task::yield_now().await;
        Ok(token)
    }
}

//! Canned transport for unit tests.

use crate::engine::{EngineResponse, RequestEngine, ResponseBody};
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Canned engine: fixed status and chunks, counts calls.
pub(crate) struct StubEngine {
    status: u16,
    message: &'static str,
    chunks: Vec<Vec<u8>>,
    pub(crate) fail_connect: bool,
    pub(crate) fail_mid_body: bool,
    calls: AtomicUsize,
    bodies_read: Arc<AtomicUsize>,
}

impl StubEngine {
    pub(crate) fn ok(chunks: &[&[u8]]) -> Self {
        Self::with_status(200, "OK", chunks)
    }

    pub(crate) fn with_status(status: u16, message: &'static str, chunks: &[&[u8]]) -> Self {
        Self {
            status,
            message,
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            fail_connect: false,
            fail_mid_body: false,
            calls: AtomicUsize::new(0),
            bodies_read: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn body_reads(&self) -> usize {
        self.bodies_read.load(Ordering::SeqCst)
    }
}

struct StubBody {
    chunks: VecDeque<Vec<u8>>,
    fail_at_end: bool,
    reads: Arc<AtomicUsize>,
}

#[async_trait]
impl ResponseBody for StubBody {
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.chunks.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None if self.fail_at_end => Err("connection reset".into()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RequestEngine for StubEngine {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn get(&self, _url: &str) -> Result<EngineResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err("dns lookup failed".into());
        }
        Ok(EngineResponse {
            status: self.status,
            status_message: self.message.to_string(),
            body: Box::new(StubBody {
                chunks: self.chunks.iter().cloned().collect(),
                fail_at_end: self.fail_mid_body,
                reads: Arc::clone(&self.bodies_read),
            }),
        })
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use stub_dns_domain::ResponseCode;

/// Per-process datagram counters, cheap to clone and share across tasks.
#[derive(Clone, Default)]
pub struct ServerStats {
    received: Arc<AtomicU64>,

    answered: Arc<AtomicU64>,

    simulated_failures: Arc<AtomicU64>,

    malformed: Arc<AtomicU64>,

    encode_errors: Arc<AtomicU64>,

    send_errors: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub received: u64,
    pub answered: u64,
    pub simulated_failures: u64,
    pub malformed: u64,
    pub encode_errors: u64,
    pub send_errors: u64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reply(&self, response_code: ResponseCode) {
        self.answered.fetch_add(1, Ordering::Relaxed);
        if response_code == ResponseCode::ServFail {
            self.simulated_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_encode_error(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_error(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn answered(&self) -> u64 {
        self.answered.load(Ordering::Relaxed)
    }

    pub fn malformed(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            answered: self.answered.load(Ordering::Relaxed),
            simulated_failures: self.simulated_failures.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            send_errors: self.send_errors.load(Ordering::Relaxed),
        }
    }
}

//! Mock implementations for testing.
//!
//! [`LogCapture`] records formatted `tracing` output so tests can assert on
//! diagnostics. [`InMemoryContractWriter`] stands in for the collaborator
//! that persists contracts.

use pact_dsl::{Contract, ContractWriter, PactError, PactResult};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log output in memory.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

/// Writer handed out by [`LogCapture`].
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl LogCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber writing every event, down to `TRACE`, into this capture.
    #[must_use]
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish()
    }

    /// Everything captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

/// Run `f` with a capturing subscriber on this thread, returning its logs.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let capture = LogCapture::new();
    let result = tracing::subscriber::with_default(capture.subscriber(), f);
    (result, capture.contents())
}

/// Contract writer that keeps contracts in memory.
#[derive(Debug, Default)]
pub struct InMemoryContractWriter {
    contracts: Mutex<Vec<Contract>>,
    fail: bool,
}

impl InMemoryContractWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that rejects every contract.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            contracts: Mutex::default(),
            fail: true,
        }
    }

    /// Contracts written so far.
    #[must_use]
    pub fn contracts(&self) -> Vec<Contract> {
        self.contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently written contract.
    #[must_use]
    pub fn last(&self) -> Option<Contract> {
        self.contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl ContractWriter for InMemoryContractWriter {
    fn write_contract(&self, contract: &Contract) -> PactResult<()> {
        if self.fail {
            return Err(PactError::invalid_part("contract", "writer unavailable"));
        }
        self.contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(contract.clone());
        Ok(())
    }
}

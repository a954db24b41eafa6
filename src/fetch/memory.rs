use std::cell::RefCell;
use std::collections::HashMap;

use super::Transport;
use crate::error::TransportError;

/// In-memory [`Transport`]: URL → body, everything else answers 404.
///
/// Records every requested URL so callers can check what was fetched.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    resources: HashMap<String, Vec<u8>>,
    failures: HashMap<String, TransportError>,
    requests: RefCell<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.resources.insert(url.into(), body.into());
    }

    /// Make `url` fail with `error` instead of answering.
    pub fn fail(&mut self, url: impl Into<String>, error: TransportError) {
        self.failures.insert(url.into(), error);
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|r| r == url)
    }
}

impl Transport for MemoryTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        if let Some(err) = self.failures.get(url) {
            return Err(err.clone());
        }
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

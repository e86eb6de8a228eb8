use super::ContentsService;
use crate::models::ContentsRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the contents API, keyed by repository path.
#[derive(Clone, Default)]
pub struct MockContentsClient {
    files: Arc<Mutex<HashMap<String, ContentsRequest>>>,
    put_count: Arc<Mutex<usize>>,
    failure_status: Option<u16>,
}

impl MockContentsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every request with the given HTTP status.
    pub fn with_failure_status(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    pub fn get_put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
    }

    pub fn get_files(&self) -> HashMap<String, ContentsRequest> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentsService for MockContentsClient {
    async fn put_contents(&self, request: &ContentsRequest) -> Result<()> {
        *self.put_count.lock().unwrap() += 1;

        if let Some(status) = self.failure_status {
            return Err(Error::GitHub {
                status,
                body: format!("mock failure for {}", request.path),
            });
        }

        self.files
            .lock()
            .unwrap()
            .insert(request.path.clone(), request.clone());
        Ok(())
    }
}

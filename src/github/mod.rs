//! GitHub contents API integration
//!
//! Writes a single file into a repository with one `PUT` request per upload.

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::MockContentsClient;

use crate::models::ContentsRequest;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContentsService: Send + Sync {
    /// Create or update the file described by `request`. Any non-2xx answer is an error.
    async fn put_contents(&self, request: &ContentsRequest) -> Result<()>;
}

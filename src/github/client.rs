use super::ContentsService;
use crate::models::ContentsRequest;
use crate::path::encode_path;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT_VALUE: &str = concat!("ghcdn-uploader/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Self {
        Self::new_with_client(token, Client::new())
    }

    /// Share an existing connection pool. Timeouts are whatever `client` was built with.
    pub fn new_with_client(token: String, client: Client) -> Self {
        Self {
            client,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn contents_url(&self, request: &ContentsRequest) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            request.owner,
            request.repo,
            encode_path(&request.path)
        )
    }
}

#[async_trait]
impl ContentsService for GitHubClient {
    async fn put_contents(&self, request: &ContentsRequest) -> Result<()> {
        let url = self.contents_url(request);
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to GitHub: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GitHub API error (status {}): {}", status, body);
            return Err(Error::GitHub {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            "Wrote {} to {}/{}@{}",
            request.path,
            request.owner,
            request.repo,
            request.branch
        );
        Ok(())
    }
}

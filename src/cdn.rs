//! Markdown embed links for files served through a CDN mirror of the repository.

use crate::models::CdnProvider;
use crate::path::encode_path;

impl CdnProvider {
    /// Public URL of `path` in `owner/repo` at `branch` through this mirror.
    pub fn url(&self, owner: &str, repo: &str, branch: &str, path: &str) -> String {
        let path = encode_path(path);
        match self {
            CdnProvider::Jsdelivr => format!(
                "https://cdn.jsdelivr.net/gh/{}/{}@{}/{}",
                owner, repo, branch, path
            ),
            CdnProvider::Statically => format!(
                "https://cdn.statically.io/gh/{}/{}/{}/{}",
                owner, repo, branch, path
            ),
            CdnProvider::Raw | CdnProvider::Default => format!(
                "https://raw.githubusercontent.com/{}/{}/{}/{}",
                owner, repo, branch, path
            ),
        }
    }

    pub fn markdown(&self, owner: &str, repo: &str, branch: &str, path: &str) -> String {
        format!("![gh]({})", self.url(owner, repo, branch, path))
    }
}

pub fn format_markdown(
    provider: CdnProvider,
    owner: &str,
    repo: &str,
    branch: &str,
    path: &str,
) -> String {
    provider.markdown(owner, repo, branch, path)
}

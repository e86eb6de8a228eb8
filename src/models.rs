//! Data models and structures
//!
//! Upload settings in the shape the host application persists them, plus the
//! request body sent to GitHub's contents API.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_COMMIT_MESSAGE: &str = "upload by ghcdn-uploader";

/// CDN mirror used when rendering the embed link.
///
/// `Default` is what any unrecognised value (for example a provider written by
/// a newer or older settings version) collapses to. It renders like `Raw`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CdnProvider {
    Jsdelivr,
    Statically,
    #[default]
    Raw,
    Default,
}

impl CdnProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CdnProvider::Jsdelivr => "jsdelivr",
            CdnProvider::Statically => "statically",
            CdnProvider::Raw => "raw",
            CdnProvider::Default => "default",
        }
    }
}

impl FromStr for CdnProvider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "jsdelivr" => CdnProvider::Jsdelivr,
            "statically" => CdnProvider::Statically,
            "raw" => CdnProvider::Raw,
            _ => CdnProvider::Default,
        })
    }
}

impl From<String> for CdnProvider {
    fn from(value: String) -> Self {
        match value.parse::<CdnProvider>() {
            Ok(provider) => provider,
            Err(never) => match never {},
        }
    }
}

impl From<CdnProvider> for String {
    fn from(value: CdnProvider) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CdnProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository coordinates and credentials every upload needs.
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubCoordinates {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub message: String,
    pub token: String,
}

impl fmt::Debug for GitHubCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubCoordinates")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("message", &self.message)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Destination prefix inside the repository, used verbatim.
    #[serde(default)]
    pub path: String,
    /// Insert the active note's creation time as a folder.
    #[serde(default)]
    pub prefix_path: bool,
    /// Replace the original file name with a random one.
    #[serde(default)]
    pub random: bool,
    #[serde(default)]
    pub cdn: CdnProvider,
    pub required: GitHubCoordinates,
}

impl UploadConfig {
    /// Load settings saved by the host application as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            path: std::env::var("UPLOAD_PATH").unwrap_or_default(),
            prefix_path: env_flag("UPLOAD_DATE_PREFIX")?,
            random: env_flag("UPLOAD_RANDOM_NAME")?,
            cdn: std::env::var("CDN_PROVIDER")
                .map(CdnProvider::from)
                .unwrap_or_default(),
            required: GitHubCoordinates {
                owner: required_var("GITHUB_OWNER")?,
                repo: required_var("GITHUB_REPO")?,
                branch: std::env::var("GITHUB_BRANCH")
                    .unwrap_or_else(|_| DEFAULT_BRANCH.to_string()),
                message: std::env::var("GITHUB_COMMIT_MESSAGE")
                    .unwrap_or_else(|_| DEFAULT_COMMIT_MESSAGE.to_string()),
                token: required_var("GITHUB_TOKEN")?,
            },
        })
    }
}

fn required_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| Error::Config(format!("{} not set", key)))
}

fn env_flag(key: &str) -> Result<bool> {
    match std::env::var(key) {
        Ok(value) => parse_flag(&value)
            .ok_or_else(|| Error::Config(format!("{} must be a boolean, got '{}'", key, value))),
        Err(_) => Ok(false),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct ContentsRequest {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
    pub message: String,
    pub content: String,
}

/// Per-call transient data; dropped once the PUT completes.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub destination_path: String,
    pub base64_content: String,
}

impl UploadRequest {
    pub fn into_contents_request(self, required: &GitHubCoordinates) -> ContentsRequest {
        ContentsRequest {
            owner: required.owner.clone(),
            repo: required.repo.clone(),
            branch: required.branch.clone(),
            path: self.destination_path,
            message: required.message.clone(),
            content: self.base64_content,
        }
    }
}

//! Upload attachments to a GitHub repository and embed them through a CDN
//!
//! Each upload commits one file with the contents API, then returns a
//! Markdown image link served by jsDelivr, Statically or raw.githubusercontent.

pub mod cdn;
pub mod encode;
pub mod error;
pub mod github;
pub mod models;
pub mod path;
pub mod source;
pub mod uploader;

pub use error::{Error, Result};
pub use models::{CdnProvider, GitHubCoordinates, UploadConfig};
pub use source::{NoteMeta, UploadFile};
pub use uploader::{GitHubUploader, Uploader};

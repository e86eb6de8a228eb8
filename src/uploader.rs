//! Upload backends behind a common capability interface.

use crate::encode::encode_file;
use crate::github::{ContentsService, GitHubClient};
use crate::models::{UploadConfig, UploadRequest};
use crate::path::build_destination_path;
use crate::source::{NoteMeta, UploadFile};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Anything that can store a file and hand back Markdown that embeds it.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// `note` is the document the file is being attached to, if there is one.
    async fn upload(&self, file: &UploadFile, note: Option<&NoteMeta>) -> Result<String>;
}

/// Commits the file to a GitHub repository and links it through the configured CDN.
pub struct GitHubUploader {
    config: Arc<UploadConfig>,
    contents: Box<dyn ContentsService>,
}

impl GitHubUploader {
    pub fn new(config: Arc<UploadConfig>) -> Self {
        let contents = GitHubClient::new(config.required.token.clone());
        Self::with_service(config, Box::new(contents))
    }

    /// Build with an injected contents service (mocks, shared HTTP clients).
    pub fn with_service(config: Arc<UploadConfig>, contents: Box<dyn ContentsService>) -> Self {
        Self { config, contents }
    }

    /// Resolve the destination path and encode the file body.
    pub async fn prepare(
        &self,
        file: &UploadFile,
        note: Option<&NoteMeta>,
    ) -> Result<UploadRequest> {
        let destination_path =
            build_destination_path(&self.config, &file.name, note.map(|n| n.created));
        debug!("Destination for {}: {}", file.name, destination_path);

        let base64_content = encode_file(file).await?;

        Ok(UploadRequest {
            destination_path,
            base64_content,
        })
    }
}

#[async_trait]
impl Uploader for GitHubUploader {
    async fn upload(&self, file: &UploadFile, note: Option<&NoteMeta>) -> Result<String> {
        let request = self.prepare(file, note).await?;
        let destination_path = request.destination_path.clone();
        let required = &self.config.required;

        self.contents
            .put_contents(&request.into_contents_request(required))
            .await?;

        let markdown = self.config.cdn.markdown(
            &required.owner,
            &required.repo,
            &required.branch,
            &destination_path,
        );
        info!("Uploaded {} via {}", file.name, self.config.cdn);
        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockContentsClient;
    use crate::models::{CdnProvider, GitHubCoordinates};
    use crate::Error;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn config(cdn: CdnProvider, prefix_path: bool, random: bool) -> Arc<UploadConfig> {
        Arc::new(UploadConfig {
            path: "img/".to_string(),
            prefix_path,
            random,
            cdn,
            required: GitHubCoordinates {
                owner: "o".to_string(),
                repo: "r".to_string(),
                branch: "main".to_string(),
                message: "add image".to_string(),
                token: "secret".to_string(),
            },
        })
    }

    fn cat() -> UploadFile {
        UploadFile::from_bytes("cat.png", b"hi".to_vec())
    }

    #[tokio::test]
    async fn test_upload_returns_markdown_for_destination() {
        let contents = MockContentsClient::new();
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Statically, false, false),
            Box::new(contents.clone()),
        );

        let markdown = uploader.upload(&cat(), None).await.unwrap();

        assert_eq!(
            markdown,
            "![gh](https://cdn.statically.io/gh/o/r/main/img/cat.png)"
        );
        let files = contents.get_files();
        let sent = &files["img/cat.png"];
        assert_eq!(sent.content, "aGk=");
        assert_eq!(sent.message, "add image");
        assert_eq!(sent.branch, "main");
    }

    #[tokio::test]
    async fn test_upload_uses_note_creation_date() {
        let contents = MockContentsClient::new();
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Jsdelivr, true, false),
            Box::new(contents.clone()),
        );
        let note = NoteMeta::new(Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap());

        let markdown = uploader.upload(&cat(), Some(&note)).await.unwrap();

        assert_eq!(
            markdown,
            "![gh](https://cdn.jsdelivr.net/gh/o/r@main/img/2023-06-01T12:00:00.000Z/cat.png)"
        );
        assert!(contents
            .get_files()
            .contains_key("img/2023-06-01T12:00:00.000Z/cat.png"));
    }

    #[tokio::test]
    async fn test_upload_random_name_links_same_path_it_wrote() {
        let contents = MockContentsClient::new();
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Raw, false, true),
            Box::new(contents.clone()),
        );

        let markdown = uploader.upload(&cat(), None).await.unwrap();

        let files = contents.get_files();
        let written = files.keys().next().unwrap();
        assert!(written.starts_with("img/"));
        assert!(written.ends_with(".png"));
        assert_ne!(written, "img/cat.png");
        assert_eq!(
            markdown,
            format!("![gh](https://raw.githubusercontent.com/o/r/main/{})", written)
        );
    }

    #[tokio::test]
    async fn test_link_escapes_name_that_was_written_verbatim() {
        let contents = MockContentsClient::new();
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Raw, false, false),
            Box::new(contents.clone()),
        );
        let file = UploadFile::from_bytes("a#b.png", b"hi".to_vec());

        let markdown = uploader.upload(&file, None).await.unwrap();

        assert!(contents.get_files().contains_key("img/a#b.png"));
        assert_eq!(
            markdown,
            "![gh](https://raw.githubusercontent.com/o/r/main/img/a%23b.png)"
        );
    }

    #[tokio::test]
    async fn test_upload_failure_is_propagated_without_url() {
        let contents = MockContentsClient::new().with_failure_status(404);
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Raw, false, false),
            Box::new(contents.clone()),
        );

        let err = uploader.upload(&cat(), None).await.unwrap_err();

        assert!(matches!(err, Error::GitHub { status: 404, .. }));
        assert_eq!(contents.get_put_count(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_file_never_reaches_github() {
        let dir = tempfile::tempdir().unwrap();
        let contents = MockContentsClient::new();
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Raw, false, false),
            Box::new(contents.clone()),
        );
        let file = UploadFile::from_path(dir.path().join("missing.png")).unwrap();

        let err = uploader.upload(&file, None).await.unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }));
        assert_eq!(contents.get_put_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_builds_transient_request() {
        let uploader = GitHubUploader::with_service(
            config(CdnProvider::Raw, false, false),
            Box::new(MockContentsClient::new()),
        );

        let request = uploader.prepare(&cat(), None).await.unwrap();

        assert_eq!(request.destination_path, "img/cat.png");
        assert_eq!(request.base64_content, "aGk=");
    }

    #[tokio::test]
    async fn test_uploader_as_trait_object() {
        let uploader: Box<dyn Uploader> = Box::new(GitHubUploader::with_service(
            config(CdnProvider::Default, false, false),
            Box::new(MockContentsClient::new()),
        ));

        let markdown = uploader.upload(&cat(), None).await.unwrap();
        assert_eq!(
            markdown,
            "![gh](https://raw.githubusercontent.com/o/r/main/img/cat.png)"
        );
    }
}

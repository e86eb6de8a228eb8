use anyhow::{Context, Result};
use clap::Parser;
use ghcdn_uploader::github::{ContentsService, GitHubClient, MockContentsClient};
use ghcdn_uploader::{CdnProvider, GitHubUploader, NoteMeta, UploadConfig, UploadFile, Uploader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ghcdn-upload")]
#[command(about = "Upload files to a GitHub repository and print CDN image links")]
struct CliArgs {
    /// Files to upload.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Settings JSON in the host plugin's format. Environment variables are used otherwise.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Note the files are attached to; its creation time feeds the date folder.
    #[arg(long, value_name = "PATH")]
    note: Option<PathBuf>,

    /// Override the destination path prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Put uploads under a folder named after the note's creation time.
    #[arg(long)]
    date_prefix: bool,

    /// Replace file names with random ones, keeping the extension.
    #[arg(long)]
    random: bool,

    /// CDN used for the returned links (jsdelivr, statically, raw).
    #[arg(long, value_parser = parse_cdn_arg)]
    cdn: Option<CdnProvider>,

    /// Do not contact GitHub; only print the links that would be produced.
    #[arg(long)]
    dry_run: bool,
}

fn parse_cdn_arg(input: &str) -> std::result::Result<CdnProvider, String> {
    match input.parse::<CdnProvider>() {
        Ok(CdnProvider::Default) => Err(format!(
            "Unknown CDN '{}'. Expected one of: jsdelivr, statically, raw",
            input
        )),
        Ok(provider) => Ok(provider),
        Err(never) => match never {},
    }
}

fn load_config(args: &CliArgs) -> Result<UploadConfig> {
    let mut config = match &args.config {
        Some(path) => UploadConfig::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => UploadConfig::from_env().context("loading settings from environment")?,
    };

    if let Some(prefix) = &args.prefix {
        config.path = prefix.clone();
    }
    config.prefix_path |= args.date_prefix;
    config.random |= args.random;
    if let Some(cdn) = args.cdn {
        config.cdn = cdn;
    }

    Ok(config)
}

/// Resolve every input up front so a bad path fails before anything is uploaded.
fn resolve_files(paths: &[PathBuf]) -> ghcdn_uploader::Result<Vec<UploadFile>> {
    paths.iter().map(|path| UploadFile::from_path(path)).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghcdn_uploader=info,ghcdn_upload=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = Arc::new(load_config(&args)?);

    let note = match &args.note {
        Some(path) => match NoteMeta::from_path(path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("Could not read note metadata from {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    let contents: Box<dyn ContentsService> = if args.dry_run {
        info!("Dry run: GitHub will not be contacted");
        Box::new(MockContentsClient::new())
    } else {
        Box::new(GitHubClient::new(config.required.token.clone()))
    };
    let uploader = Arc::new(GitHubUploader::with_service(config, contents));

    let files = resolve_files(&args.files)?;

    let mut tasks = JoinSet::new();
    for (index, file) in files.into_iter().enumerate() {
        let uploader = Arc::clone(&uploader);
        tasks.spawn(async move {
            let result = uploader.upload(&file, note.as_ref()).await;
            (index, file.name, result)
        });
    }

    let mut links = vec![None; args.files.len()];
    let mut failed = false;
    while let Some(joined) = tasks.join_next().await {
        let (index, name, result) = joined.context("upload task panicked")?;
        match result {
            Ok(markdown) => links[index] = Some(markdown),
            Err(e) => {
                error!("Upload of {} failed: {}", name, e);
                failed = true;
            }
        }
    }

    for markdown in links.into_iter().flatten() {
        println!("{}", markdown);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

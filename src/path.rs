//! Destination path construction inside the target repository.

use crate::models::UploadConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use uuid::Uuid;

/// Build `prefix + [created-date "/"] + file name` for an upload.
///
/// The date segment is only added when date prefixing is enabled and a
/// reference timestamp is known; a missing timestamp is not an error.
pub fn build_destination_path(
    config: &UploadConfig,
    file_name: &str,
    reference: Option<DateTime<Utc>>,
) -> String {
    build_destination_path_with(config, file_name, reference, &random_file_name())
}

/// Same as [`build_destination_path`] with the random stem supplied by the caller.
pub fn build_destination_path_with(
    config: &UploadConfig,
    file_name: &str,
    reference: Option<DateTime<Utc>>,
    random_stem: &str,
) -> String {
    let mut path = config.path.clone();

    if config.prefix_path {
        if let Some(created) = reference {
            path.push_str(&iso_timestamp(created));
            path.push('/');
        }
    }

    if config.random {
        path.push_str(random_stem);
        if let Some(ext) = extension_of(file_name) {
            path.push_str(ext);
        }
    } else {
        path.push_str(file_name);
    }

    path
}

/// Extension including its leading dot, e.g. `".png"`.
///
/// A dot at index 0 marks a hidden file, not an extension.
pub fn extension_of(file_name: &str) -> Option<&str> {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => Some(&file_name[idx..]),
        _ => None,
    }
}

pub fn random_file_name() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Percent-encode each `/`-separated segment for use inside a URL path.
///
/// Characters that would end or corrupt the path (`#`, `?`, `%`, spaces) are
/// escaped; separators, `:` and `@` are kept.
pub fn encode_path(path: &str) -> String {
    let mut url = match Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return path.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().extend(path.split('/'));
    }

    let encoded = url.path();
    encoded.strip_prefix('/').unwrap_or(encoded).to_string()
}

/// UTC, millisecond precision, `Z` suffix: `2024-01-15T08:30:00.000Z`.
pub fn iso_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Base64 encoding of attachment bytes for the JSON request body.

use crate::source::UploadFile;
use crate::Result;
use base64::Engine as _;

/// Read the whole file and encode it with the standard base64 alphabet.
pub async fn encode_file(file: &UploadFile) -> Result<String> {
    let bytes = file.read_bytes().await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), file.name);
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_encode_bytes_uses_padded_standard_alphabet() {
        assert_eq!(encode_bytes(b"hi"), "aGk=");
        assert_eq!(encode_bytes(&[0xFB, 0xFF]), "+/8=");
        assert_eq!(encode_bytes(&[]), "");
    }

    #[tokio::test]
    async fn test_encode_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(encode_file(&file).await.unwrap(), "iVBORw==");
    }

    #[tokio::test]
    async fn test_encode_file_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let file = UploadFile::from_path(dir.path().join("missing.png")).unwrap();

        let err = encode_file(&file).await.unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}

//! SHA-256 digests of downloaded artifacts.

use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(sha256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jar");
        std::fs::write(&path, b"jar bytes").unwrap();
        assert_eq!(sha256_file(&path).unwrap(), sha256_hex(b"jar bytes"));
    }

    #[test]
    fn test_sha256_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_file(&dir.path().join("missing.jar")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SHA-256 fingerprints of exported documents.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// First twelve hex digits of a digest, for log lines.
pub fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_digest() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn pdf_header_digest_is_stable() {
        let first = hash_bytes(b"%PDF-1.7");
        assert_eq!(first, hash_bytes(b"%PDF-1.7"));
        assert_ne!(first, hash_bytes(b"%PDF-1.6"));
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn short_digest_truncates() {
        let digest = hash_bytes(b"hello");
        assert_eq!(short_digest(&digest), "2cf24dba5fb0");
        assert_eq!(short_digest("abc"), "abc");
    }
}

use crate::constants::{HASH_HEX_SIZE, HASH_SIZE};
use crate::error::{DecodeError, Result};
use sha2::{Digest, Sha256};

pub type Hash = [u8; HASH_SIZE];

/// The all-zero digest: the Merkle root of an empty list and the previous
/// block reference of a genesis header.
pub const NULL_HASH: Hash = [0u8; HASH_SIZE];

/// SHA-256 applied twice.
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&second[..]);
    out
}

/// Hex in display order: the byte order is reversed, so block hashes print
/// with their leading zeros first.
pub fn encode_hash(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

/// Inverse of [`encode_hash`].
pub fn decode_hash(text: &str) -> Result<Hash> {
    if text.len() != HASH_HEX_SIZE {
        return Err(DecodeError::malformed(
            "hash",
            format!("expected {HASH_HEX_SIZE} hex characters, got {}", text.len()),
        ));
    }
    let mut out = [0u8; HASH_SIZE];
    hex::decode_to_slice(text, &mut out)
        .map_err(|e| DecodeError::malformed("hash", e.to_string()))?;
    out.reverse();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_sha256_of_empty_input() {
        assert_eq!(
            hex::encode(double_sha256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn display_order_is_reversed() {
        let mut hash = NULL_HASH;
        hash[31] = 0xab;
        hash[0] = 0x01;
        let text = encode_hash(&hash);
        assert!(text.starts_with("ab"));
        assert!(text.ends_with("01"));
        assert_eq!(decode_hash(&text).unwrap(), hash);
    }

    #[test]
    fn decode_hash_rejects_bad_length_and_digits() {
        assert!(matches!(
            decode_hash("abcd"),
            Err(DecodeError::MalformedField { field: "hash", .. })
        ));
        let bad = "zz".repeat(HASH_SIZE);
        assert!(decode_hash(&bad).is_err());
    }
}

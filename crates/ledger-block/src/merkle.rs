//! Merkle root over an ordered list of digests.
//!
//! - An empty list yields [`NULL_HASH`].
//! - A single digest is its own root.
//! - A level of odd length has its last digest duplicated before pairing.
//!   This lets some transaction lists with a repeated tail share a root with
//!   the shorter list; it is kept as-is because every other node computes
//!   roots the same way.

use crate::constants::HASH_SIZE;
use crate::hash::{double_sha256, Hash, NULL_HASH};

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut concat = [0u8; 2 * HASH_SIZE];
    concat[..HASH_SIZE].copy_from_slice(left);
    concat[HASH_SIZE..].copy_from_slice(right);
    double_sha256(&concat)
}

/// Collapses `hashes` into a single root. Each pass builds a fresh level;
/// the input is never modified.
pub fn build_merkle_root(hashes: &[Hash]) -> Hash {
    match hashes {
        [] => NULL_HASH,
        [only] => *only,
        _ => {
            let mut level = hashes.to_vec();
            while level.len() > 1 {
                let mut next = Vec::with_capacity(level.len().div_ceil(2));
                for pair in level.chunks(2) {
                    // a trailing singleton pairs with itself
                    let (left, right) = match pair {
                        [left, right] => (left, right),
                        [last] => (last, last),
                        _ => unreachable!("chunks(2) yields one or two items"),
                    };
                    next.push(hash_pair(left, right));
                }
                level = next;
            }
            level[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(data: &[u8]) -> Hash {
        double_sha256(data)
    }

    #[test]
    fn empty_returns_null_hash() {
        assert_eq!(build_merkle_root(&[]), NULL_HASH);
    }

    #[test]
    fn single_leaf_returns_leaf() {
        let a = leaf(b"a");
        assert_eq!(build_merkle_root(&[a]), a);
    }

    #[test]
    fn two_leaves_hash_first_then_second() {
        let a = leaf(b"a");
        let b = leaf(b"b");
        let root = build_merkle_root(&[a, b]);
        assert_eq!(
            hex::encode(root),
            "b767a3a12f5f8bb1949d163c51f9a42e6bda8dcd02d50353717f73d4338b1bf0"
        );
        assert_eq!(
            hex::encode(build_merkle_root(&[b, a])),
            "3bfe2f6e468e2c9eceaaf9c29f472490b0f78b1a97b47ffd25104d911f435e7a"
        );
    }

    #[test]
    fn even_number_of_leaves_matches_manual_reduction() {
        let [a, b, c, d] = [leaf(b"a"), leaf(b"b"), leaf(b"c"), leaf(b"d")];
        let expected = hash_pair(&hash_pair(&a, &b), &hash_pair(&c, &d));
        assert_eq!(build_merkle_root(&[a, b, c, d]), expected);
    }

    #[test]
    fn odd_level_duplicates_last_leaf() {
        let [a, b, c] = [leaf(b"a"), leaf(b"b"), leaf(b"c")];
        let root = build_merkle_root(&[a, b, c]);
        assert_eq!(
            hex::encode(root),
            "74449b8328cb6e97d305adb2fca5e90993fdf9c667fa40cb625f40508da40cbf"
        );
        // Intentional: the padded list commits to the same root.
        assert_eq!(root, build_merkle_root(&[a, b, c, c]));
    }

    #[test]
    fn odd_inner_level_also_duplicates() {
        let leaves: Vec<Hash> = (0u8..5).map(|i| leaf(&[i])).collect();
        let l1 = [
            hash_pair(&leaves[0], &leaves[1]),
            hash_pair(&leaves[2], &leaves[3]),
            hash_pair(&leaves[4], &leaves[4]),
        ];
        let l2 = [hash_pair(&l1[0], &l1[1]), hash_pair(&l1[2], &l1[2])];
        assert_eq!(build_merkle_root(&leaves), hash_pair(&l2[0], &l2[1]));
    }

    #[test]
    fn input_is_left_untouched() {
        let leaves = vec![leaf(b"x"), leaf(b"y"), leaf(b"z")];
        let before = leaves.clone();
        let _ = build_merkle_root(&leaves);
        assert_eq!(leaves, before);
    }
}

use crate::constants::HEADER_FIXED_SIZE;
use crate::cursor::{HashWriter, Reader, Writer};
use crate::error::Result;
use crate::hash::{Hash, NULL_HASH};
use crate::varint::var_int_size;
use serde::{Deserialize, Serialize};
use std::io;

/// Fixed 80-byte block header.
///
/// `transaction_count` is not part of the fixed fields. It is only written
/// in "with transaction count" mode (header announcements); inside a block
/// the count is owned by the block encoding, which fills this field on
/// decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: u32,
    pub previous_block_hash: Hash,
    pub merkle: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
    pub transaction_count: u64,
}

impl BlockHeader {
    /// A header is valid as soon as any fixed field departs from zero.
    pub fn is_valid(&self) -> bool {
        self.version != 0
            || self.previous_block_hash != NULL_HASH
            || self.merkle != NULL_HASH
            || self.timestamp != 0
            || self.bits != 0
            || self.nonce != 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn decode<R: Reader + ?Sized>(source: &mut R, with_transaction_count: bool) -> Result<Self> {
        let mut header = Self {
            version: source.read_u32_le()?,
            previous_block_hash: source.read_hash()?,
            merkle: source.read_hash()?,
            timestamp: source.read_u32_le()?,
            bits: source.read_u32_le()?,
            nonce: source.read_u32_le()?,
            transaction_count: 0,
        };
        if with_transaction_count {
            header.transaction_count = source.read_var_int()?;
        }
        Ok(header)
    }

    pub fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W, with_transaction_count: bool) -> io::Result<()> {
        sink.write_u32_le(self.version)?;
        sink.write_hash(&self.previous_block_hash)?;
        sink.write_hash(&self.merkle)?;
        sink.write_u32_le(self.timestamp)?;
        sink.write_u32_le(self.bits)?;
        sink.write_u32_le(self.nonce)?;
        if with_transaction_count {
            sink.write_var_int(self.transaction_count)?;
        }
        Ok(())
    }

    pub fn serialized_size(&self, with_transaction_count: bool) -> u64 {
        if with_transaction_count {
            HEADER_FIXED_SIZE + var_int_size(self.transaction_count)
        } else {
            HEADER_FIXED_SIZE
        }
    }

    /// Double SHA-256 of the fixed fields; this is the block's identity.
    pub fn hash(&self) -> Hash {
        let mut hasher = HashWriter::new();
        self.encode_to(&mut hasher, false)
            .expect("hash engines don't error");
        hasher.finish()
    }
}

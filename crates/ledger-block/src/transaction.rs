//! Transaction wire codec.
//!
//! Scripts are carried as opaque bytes; nothing here interprets them.

use crate::constants::{HASH_SIZE, MAX_PREALLOCATED_ITEMS};
use crate::cursor::{BufferWriter, HashWriter, Reader, Writer};
use crate::error::Result;
use crate::hash::{Hash, NULL_HASH};
use crate::varint::var_int_size;
use serde::{Deserialize, Serialize};
use std::io;

/// Wire codec shared by the transaction and its parts.
pub trait Encodable {
    fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()>;

    fn serialized_size(&self) -> u64;

    fn encode(&self) -> Vec<u8> {
        let mut sink = BufferWriter::with_capacity(self.serialized_size() as usize);
        self.encode_to(&mut sink)
            .expect("buffer writes don't error");
        sink.into_inner()
    }
}

pub trait Decodable: Sized {
    fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self>;
}

/// Reads a var-int count followed by that many items.
fn decode_list<T: Decodable, R: Reader + ?Sized>(source: &mut R) -> Result<Vec<T>> {
    let count = source.read_var_int()?;
    let mut items = Vec::with_capacity((count as usize).min(MAX_PREALLOCATED_ITEMS));
    for _ in 0..count {
        items.push(T::decode(source)?);
    }
    Ok(items)
}

fn encode_list<T: Encodable, W: Writer + ?Sized>(items: &[T], sink: &mut W) -> io::Result<()> {
    sink.write_var_int(items.len() as u64)?;
    for item in items {
        item.encode_to(sink)?;
    }
    Ok(())
}

fn list_size<T: Encodable>(items: &[T]) -> u64 {
    var_int_size(items.len() as u64) + items.iter().map(Encodable::serialized_size).sum::<u64>()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input spends.
    pub const fn null() -> Self {
        Self {
            hash: NULL_HASH,
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::null()
    }
}

impl Encodable for OutPoint {
    fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_hash(&self.hash)?;
        sink.write_u32_le(self.index)
    }

    fn serialized_size(&self) -> u64 {
        HASH_SIZE as u64 + 4
    }
}

impl Decodable for OutPoint {
    fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self> {
        Ok(Self {
            hash: source.read_hash()?,
            index: source.read_u32_le()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub previous_output: OutPoint,
    pub script: Vec<u8>,
    pub sequence: u32,
}

impl Encodable for TxInput {
    fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        self.previous_output.encode_to(sink)?;
        sink.write_var_bytes(&self.script)?;
        sink.write_u32_le(self.sequence)
    }

    fn serialized_size(&self) -> u64 {
        self.previous_output.serialized_size()
            + var_int_size(self.script.len() as u64)
            + self.script.len() as u64
            + 4
    }
}

impl Decodable for TxInput {
    fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self> {
        Ok(Self {
            previous_output: OutPoint::decode(source)?,
            script: source.read_var_bytes()?,
            sequence: source.read_u32_le()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: u64,
    pub script: Vec<u8>,
}

impl Encodable for TxOutput {
    fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u64_le(self.value)?;
        sink.write_var_bytes(&self.script)
    }

    fn serialized_size(&self) -> u64 {
        8 + var_int_size(self.script.len() as u64) + self.script.len() as u64
    }
}

impl Decodable for TxOutput {
    fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self> {
        Ok(Self {
            value: source.read_u64_le()?,
            script: source.read_var_bytes()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn is_valid(&self) -> bool {
        self.version != 0 || self.lock_time != 0 || !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Identity hash: double SHA-256 of the full encoding, streamed without
    /// an intermediate buffer.
    pub fn hash(&self) -> Hash {
        let mut hasher = HashWriter::new();
        self.encode_to(&mut hasher)
            .expect("hash engines don't error");
        hasher.finish()
    }

    pub fn total_output_value(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |acc, output| acc.saturating_add(output.value))
    }
}

impl Encodable for Transaction {
    fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_u32_le(self.version)?;
        encode_list(&self.inputs, sink)?;
        encode_list(&self.outputs, sink)?;
        sink.write_u32_le(self.lock_time)
    }

    fn serialized_size(&self) -> u64 {
        4 + list_size(&self.inputs) + list_size(&self.outputs) + 4
    }
}

impl Decodable for Transaction {
    fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self> {
        Ok(Self {
            version: source.read_u32_le()?,
            inputs: decode_list(source)?,
            outputs: decode_list(source)?,
            lock_time: source.read_u32_le()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::SliceReader;
    use crate::hash::double_sha256;

    fn coinbase(tag: u8) -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TxInput {
                previous_output: OutPoint::null(),
                script: vec![0x04, tag, 0x00, 0x1d],
                sequence: u32::MAX,
            }],
            outputs: vec![TxOutput {
                value: 50 * 100_000_000,
                script: vec![0xac],
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn encoding_layout() {
        let tx = coinbase(7);
        let bytes = tx.encode();
        assert_eq!(bytes.len() as u64, tx.serialized_size());
        // version, one input, null outpoint
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..37], &[0u8; 32]);
        assert_eq!(&bytes[37..41], &[0xff; 4]);
        // script length + script
        assert_eq!(bytes[41], 4);
        assert_eq!(&bytes[42..46], &[0x04, 7, 0x00, 0x1d]);
        // lock time is last
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn decode_consumes_exactly_its_bytes() {
        let tx = coinbase(1);
        let mut bytes = tx.encode();
        bytes.extend_from_slice(&[0xde, 0xad]);
        let mut reader = SliceReader::new(&bytes);
        let decoded = Transaction::decode(&mut reader).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn identity_hash_is_double_sha_of_encoding() {
        let tx = coinbase(3);
        assert_eq!(tx.hash(), double_sha256(&tx.encode()));
        assert_ne!(tx.hash(), coinbase(4).hash());
    }

    #[test]
    fn coinbase_and_validity_predicates() {
        let tx = coinbase(0);
        assert!(tx.is_coinbase());
        assert!(tx.is_valid());
        assert!(!Transaction::default().is_valid());

        let mut spend = tx.clone();
        spend.inputs[0].previous_output = OutPoint {
            hash: [1u8; 32],
            index: 0,
        };
        assert!(!spend.is_coinbase());
        assert_eq!(spend.total_output_value(), 5_000_000_000);
    }

    #[test]
    fn truncated_transaction_fails() {
        let bytes = coinbase(9).encode();
        for cut in 0..bytes.len() {
            let mut reader = SliceReader::new(&bytes[..cut]);
            assert!(
                Transaction::decode(&mut reader).unwrap_err().is_short_read(),
                "prefix of {cut} bytes decoded"
            );
        }
    }
}

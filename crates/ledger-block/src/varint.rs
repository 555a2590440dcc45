//! Compact unsigned integers: one byte below `0xfd`, otherwise a prefix
//! byte selecting a 2, 4 or 8 byte little-endian payload.

use crate::constants::{VAR_INT_U16_PREFIX, VAR_INT_U32_PREFIX, VAR_INT_U64_PREFIX};
use crate::cursor::{Reader, Writer};
use crate::error::{DecodeError, Result};
use std::io;

/// Encoded width of `value` in bytes.
pub fn var_int_size(value: u64) -> u64 {
    if value < VAR_INT_U16_PREFIX as u64 {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Decodes a var-int. Non-minimal encodings are rejected: re-encoding them
/// would not reproduce the input bytes.
pub fn read_var_int<R: Reader + ?Sized>(source: &mut R) -> Result<u64> {
    let prefix = source.read_u8()?;
    let (value, minimum) = match prefix {
        VAR_INT_U16_PREFIX => (source.read_u16_le()? as u64, VAR_INT_U16_PREFIX as u64),
        VAR_INT_U32_PREFIX => (source.read_u32_le()? as u64, u16::MAX as u64 + 1),
        VAR_INT_U64_PREFIX => (source.read_u64_le()?, u32::MAX as u64 + 1),
        byte => return Ok(byte as u64),
    };
    if value < minimum {
        return Err(DecodeError::malformed(
            "var-int",
            format!("{value} encoded with prefix {prefix:#04x}"),
        ));
    }
    Ok(value)
}

pub fn write_var_int<W: Writer + ?Sized>(sink: &mut W, value: u64) -> io::Result<()> {
    match var_int_size(value) {
        1 => sink.write_u8(value as u8),
        3 => {
            sink.write_u8(VAR_INT_U16_PREFIX)?;
            sink.write_u16_le(value as u16)
        }
        5 => {
            sink.write_u8(VAR_INT_U32_PREFIX)?;
            sink.write_u32_le(value as u32)
        }
        _ => {
            sink.write_u8(VAR_INT_U64_PREFIX)?;
            sink.write_u64_le(value)
        }
    }
}

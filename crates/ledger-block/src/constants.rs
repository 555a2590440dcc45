pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

/// version + previous block hash + merkle root + timestamp + bits + nonce
pub const HEADER_FIXED_SIZE: u64 = 4 + HASH_SIZE as u64 + HASH_SIZE as u64 + 4 + 4 + 4;

pub const VAR_INT_U16_PREFIX: u8 = 0xfd;
pub const VAR_INT_U32_PREFIX: u8 = 0xfe;
pub const VAR_INT_U64_PREFIX: u8 = 0xff;

/// Upper bound on capacity reserved up front from a declared element count.
pub const MAX_PREALLOCATED_ITEMS: usize = 1024;
/// Length-prefixed byte strings are pulled from the cursor in chunks of this size.
pub const VAR_BYTES_CHUNK: usize = 64 * 1024;

//! FNV-1a 32-bit block identity hash.
//!
//! Block identities are the FNV-1a hash of the canonical block name. The same
//! hash is used by the registry and by chunk palettes, so a block's id is
//! stable across processes.

/// FNV-1a 32-bit offset basis.
const FNV1_32_INIT: u32 = 0x811c_9dc5;
/// FNV-1a 32-bit prime.
const FNV1_32_PRIME: u32 = 0x0100_0193;

/// Compute FNV-1a 32-bit hash of a byte slice.
pub const fn fnv1a_32(data: &[u8]) -> u32 {
    let mut hash = FNV1_32_INIT;
    let mut i = 0;
    while i < data.len() {
        hash ^= data[i] as u32;
        hash = hash.wrapping_mul(FNV1_32_PRIME);
        i += 1;
    }
    hash
}

/// Runtime id of a block from its canonical name.
pub const fn block_runtime_id(name: &str) -> u32 {
    fnv1a_32(name.as_bytes())
}

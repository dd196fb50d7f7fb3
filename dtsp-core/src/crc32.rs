//! CRC-32/ISO-HDLC checksum, used as an input to the frame MAC.

/// Compute the CRC-32/ISO-HDLC checksum of `data`.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

//! MD5 digest, used here as a keyed compression function for the frame MAC
//! and for deriving the per-engine UDID base and per-frame UDIDs. No claim
//! is made on MD5's collision resistance; the construction's security rests
//! on the secrecy of the ISAAC-derived MAC seed, not on the hash itself.

/// Compute the 16-byte MD5 digest of `data`.
pub fn digest(data: &[u8]) -> [u8; 16] {
    md5::compute(data).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            hex::encode(digest(b"")),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn abc() {
        assert_eq!(
            hex::encode(digest(b"abc")),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }
}

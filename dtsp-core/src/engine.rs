//! Frame engine: key rotation, framing, and the encrypt/decrypt state
//! machines built on top of the primitives in this crate.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::aes_cbc;
use crate::clock::{Clock, SystemClock};
use crate::crc32;
use crate::error::{Error, Result};
use crate::isaac::Isaac;
use crate::md5;
use crate::replay::ReplayCache;

/// Big-endian frame magic.
pub const HEADER: u32 = 0xFAF0_F0E4;
/// Key rotation period, in seconds.
pub const INTERVAL: u32 = 15;
/// Fixed per-frame overhead: header + sync + udid + mac.
pub const PADDING: usize = 4 + 1 + 16 + 16;

fn slot_seed(slot: u32, seed: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(4 + seed.len());
    buf.extend_from_slice(&slot.to_be_bytes());
    buf.extend_from_slice(seed);
    buf
}

/// First 32 bytes of slot keystream, read directly from the ISAAC state
/// array as it stands right after seeding.
fn derive_key(ctx: &Isaac) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, chunk) in out.chunks_mut(4).enumerate() {
        chunk.copy_from_slice(&ctx.word(i).to_be_bytes());
    }
    out
}

fn derive_iv(ctx: &Isaac, sync: u8) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (i, chunk) in out.chunks_mut(4).enumerate() {
        chunk.copy_from_slice(&ctx.word(32 + sync as usize + i).to_be_bytes());
    }
    out
}

fn derive_mac_seed(ctx: &Isaac, sync: u8) -> [u8; 28] {
    let mut out = [0u8; 28];
    for (i, chunk) in out.chunks_mut(4).enumerate() {
        chunk.copy_from_slice(&ctx.word(128 + sync as usize + i).to_be_bytes());
    }
    out
}

fn compute_mac(udid: &[u8; 16], mac_seed: &[u8; 28], crc: u32) -> [u8; 16] {
    let mut input = Vec::with_capacity(16 + 28 + 4);
    input.extend_from_slice(udid);
    input.extend_from_slice(mac_seed);
    input.extend_from_slice(&crc.to_be_bytes());
    md5::digest(&input)
}

/// A DTSP engine instance bound to one `(seed, udid)` pair.
///
/// Not `Sync`-safe to share without external synchronization: every
/// encrypt/decrypt call mutates the rotation schedule, the UDID entropy
/// stream and the replay cache.
pub struct Engine {
    seed: Vec<u8>,
    udid_base: [u8; 16],
    udid_stream: Isaac,
    slot: u32,
    has_rotated: bool,
    key_ctx: Isaac,
    key: [u8; 32],
    prev_key_ctx: Isaac,
    prev_key: [u8; 32],
    cache: ReplayCache,
    clock: Arc<dyn Clock>,
}

impl Engine {
    /// Create an engine reading the real system clock.
    pub fn init(seed: impl Into<Vec<u8>>, udid: impl Into<Vec<u8>>) -> Self {
        Self::init_with_clock(seed, udid, Arc::new(SystemClock))
    }

    /// Create an engine driven by an injected clock. Intended for tests.
    pub fn init_with_clock(seed: impl Into<Vec<u8>>, udid: impl Into<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        let seed = seed.into();
        let udid_bytes = udid.into();
        let mut udid_input = udid_bytes;
        udid_input.extend_from_slice(&seed);
        let udid_base = md5::digest(&udid_input);
        let udid_stream = Isaac::seed(&udid_base);
        Self {
            seed,
            udid_base,
            udid_stream,
            slot: 0,
            has_rotated: false,
            // Placeholders: `rotation_step` unconditionally overwrites both
            // on the very first call, before either is ever read.
            key_ctx: Isaac::seed(&[]),
            key: [0u8; 32],
            prev_key_ctx: Isaac::seed(&[]),
            prev_key: [0u8; 32],
            cache: ReplayCache::new(),
            clock,
        }
    }

    /// Advance the key schedule if the wall clock has entered a new slot.
    /// Always returns the current sync byte (`now mod INTERVAL`), whether
    /// or not a rotation actually occurred.
    fn rotation_step(&mut self, now: u32) -> u8 {
        let slot_now = now - (now % INTERVAL);
        if !self.has_rotated || slot_now != self.slot {
            let old_slot = self.slot;
            if self.has_rotated && slot_now.wrapping_sub(INTERVAL) == old_slot {
                self.prev_key_ctx = self.key_ctx.clone();
                self.prev_key = self.key;
            } else {
                let prev_slot = slot_now.wrapping_sub(INTERVAL);
                let ctx = Isaac::seed(&slot_seed(prev_slot, &self.seed));
                let key = derive_key(&ctx);
                self.prev_key_ctx = ctx;
                self.prev_key = key;
            }

            let ctx = Isaac::seed(&slot_seed(slot_now, &self.seed));
            let key = derive_key(&ctx);
            self.key_ctx = ctx;
            self.key = key;
            self.slot = slot_now;
            self.has_rotated = true;

            let purged = self.cache.len();
            self.cache.clear();
            tracing::debug!(old_slot, new_slot = slot_now, purged, "rotated key schedule");
        }
        (now % INTERVAL) as u8
    }

    /// Encrypt `plaintext` into a self-contained frame.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let now = self.clock.now();
        let sync = self.rotation_step(now);

        let rk = self.udid_stream.rand();
        let mut udid_input = Vec::with_capacity(16 + 4 + 4);
        udid_input.extend_from_slice(&self.udid_base);
        udid_input.extend_from_slice(&rk.to_le_bytes());
        udid_input.extend_from_slice(&now.to_le_bytes());
        let udid = md5::digest(&udid_input);

        let iv = derive_iv(&self.key_ctx, sync);
        let ciphertext = aes_cbc::encrypt(&self.key, &iv, plaintext);

        let mut frame = Vec::with_capacity(PADDING + ciphertext.len());
        frame.extend_from_slice(&HEADER.to_be_bytes());
        frame.push(sync);
        frame.extend_from_slice(&udid);
        frame.extend_from_slice(&ciphertext);

        let crc = crc32::checksum(&frame);
        let mac_seed = derive_mac_seed(&self.key_ctx, sync);
        let mac = compute_mac(&udid, &mac_seed, crc);
        frame.extend_from_slice(&mac);

        frame
    }

    /// Validate and decrypt a frame.
    ///
    /// The replay-cache lookup is performed before the rotation step runs,
    /// against whatever cache state is left over from the previous call:
    /// the cache is slot-local, so a duplicate can only be detected against
    /// frames already accepted in the slot the receiver is currently in.
    pub fn decrypt(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() < PADDING {
            tracing::trace!("rejecting frame: too short");
            return Err(Error::NoData);
        }
        if frame[0..4] != HEADER.to_be_bytes() {
            tracing::trace!("rejecting frame: bad header");
            return Err(Error::BadHeader);
        }

        let sync = frame[4];
        let udid: [u8; 16] = frame[5..21].try_into().expect("length checked above");

        if self.cache.contains(&udid) {
            tracing::trace!("rejecting frame: duplicate udid");
            return Err(Error::Duplicate);
        }

        let now = self.clock.now();
        let sync_now = self.rotation_step(now);

        let (ctx, key) = if sync > sync_now {
            (&self.prev_key_ctx, self.prev_key)
        } else {
            (&self.key_ctx, self.key)
        };

        let n = frame.len();
        let crc = crc32::checksum(&frame[..n - 16]);
        let mac_seed = derive_mac_seed(ctx, sync);
        let expected_mac = compute_mac(&udid, &mac_seed, crc);
        let actual_mac = &frame[n - 16..];
        if expected_mac[..].ct_eq(actual_mac).unwrap_u8() == 0 {
            tracing::trace!("rejecting frame: bad mac");
            return Err(Error::BadMac);
        }

        self.cache.insert(udid)?;

        let iv = derive_iv(ctx, sync);
        let ciphertext = &frame[21..n - 16];
        aes_cbc::decrypt(&key, &iv, ciphertext).map_err(|_| {
            tracing::trace!("rejecting frame: bad padding after mac check");
            Error::BadMac
        })
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.seed.zeroize();
        self.key.zeroize();
        self.prev_key.zeroize();
        self.cache.clear();
    }
}

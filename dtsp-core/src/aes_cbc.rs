//! AES-256-CBC with PKCS#7 padding, one-shot encrypt/decrypt.

use aes::Aes256;
use cbc::cipher::block_padding::{Pkcs7, UnpadError};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under `key`/`iv`, padding with PKCS#7. Returns an
/// owned buffer whose length is always a non-zero multiple of 16.
pub fn encrypt(key: &[u8; 32], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    Encryptor::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt `ciphertext` under `key`/`iv` and strip PKCS#7 padding.
///
/// Fails if `ciphertext` is not a non-zero multiple of the block size or if
/// the trailing padding bytes are malformed; both are treated by the caller
/// as a MAC-equivalent integrity failure, never distinguished from a forged
/// tag.
pub fn decrypt(key: &[u8; 32], iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>, UnpadError> {
    Decryptor::new(key.into(), iv.into()).decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
}

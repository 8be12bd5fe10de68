//! Keystream cipher used to seal secret values.
//!
//! A payload has the form `kmbc1:<base64 nonce>:<base64 ciphertext>`. The
//! keystream is seeded from an FNV-1a hash of the keyword and nonce, expanded
//! with SplitMix64 and drawn from xoshiro256**. XOR is its own inverse, so
//! sealing and opening share [`Keystream`].
//!
//! Payloads that are not in this format are opened with the [`legacy`]
//! rotation scheme instead of failing. The same algorithm is emitted as
//! dependency-free source for each target, so generated code can open its
//! own secrets.
//!
//! This is obfuscation, not encryption in the security sense.

mod keystream;
pub mod legacy;

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;

pub use keystream::Keystream;

/// Tag identifying the keystream payload format.
pub const FORMAT_TAG: &str = "kmbc1";

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Seals `plaintext` under `keyword` with a fresh nonce from the OS RNG.
///
/// Sealing the same input twice yields different payloads.
///
/// # Examples
///
/// ```
/// use buildconfig::cipher;
///
/// let sealed = cipher::encrypt("abc123", "key1");
/// assert!(sealed.starts_with("kmbc1:"));
/// assert_eq!(cipher::decrypt(&sealed, "key1"), "abc123");
/// ```
#[must_use]
pub fn encrypt(plaintext: &str, keyword: &str) -> String {
    let mut nonce = [0_u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    encrypt_with_nonce(plaintext, keyword, nonce)
}

/// Seals `plaintext` with a caller-supplied nonce.
///
/// Only use a fixed nonce for fixtures. Two payloads sealed with the same
/// keyword and nonce share a keystream.
#[must_use]
pub fn encrypt_with_nonce(plaintext: &str, keyword: &str, nonce: [u8; NONCE_LEN]) -> String {
    let sealed: Vec<u8> = plaintext
        .bytes()
        .zip(Keystream::new(keyword, &nonce))
        .map(|(byte, key)| byte ^ key)
        .collect();
    format!(
        "{FORMAT_TAG}:{}:{}",
        STANDARD.encode(nonce),
        STANDARD.encode(sealed)
    )
}

/// Opens a payload sealed under `keyword`.
///
/// Never fails. Input without the `kmbc1:` tag, with the wrong number of
/// segments, or with malformed base64 is opened with [`legacy::decrypt`].
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
#[must_use]
pub fn decrypt(payload: &str, keyword: &str) -> String {
    match open(payload, keyword) {
        Some(plaintext) => plaintext,
        None => {
            debug!("payload is not in keystream format; using legacy scheme");
            legacy::decrypt(payload, keyword)
        }
    }
}

fn open(payload: &str, keyword: &str) -> Option<String> {
    let mut parts = payload.splitn(3, ':');
    if parts.next() != Some(FORMAT_TAG) {
        return None;
    }
    let (Some(nonce), Some(sealed)) = (parts.next(), parts.next()) else {
        return None;
    };
    let nonce = STANDARD.decode(nonce).ok()?;
    let sealed = STANDARD.decode(sealed).ok()?;
    let opened: Vec<u8> = sealed
        .iter()
        .zip(Keystream::new(keyword, &nonce))
        .map(|(byte, key)| byte ^ key)
        .collect();
    Some(String::from_utf8_lossy(&opened).into_owned())
}

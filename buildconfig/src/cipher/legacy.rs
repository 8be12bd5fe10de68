//! Letter rotation used by payloads generated before the keystream format.
//!
//! The shift is the sum of the keyword's UTF-16 code units modulo 26. Only
//! ASCII letters move; everything else passes through.

const ALPHABET: i32 = 26;

/// Rotates letters forward. Kept to reproduce historical payloads.
#[must_use]
pub fn encrypt(input: &str, keyword: &str) -> String {
    rotate(input, shift(keyword))
}

/// Rotates letters back, reversing [`encrypt`].
#[must_use]
pub fn decrypt(input: &str, keyword: &str) -> String {
    rotate(input, -shift(keyword))
}

/// Rotation distance for `keyword`, in `0..26`.
#[must_use]
pub fn shift(keyword: &str) -> i32 {
    keyword
        .encode_utf16()
        .fold(0_i32, |sum, unit| sum.wrapping_add(i32::from(unit)))
        .rem_euclid(ALPHABET)
}

fn rotate(input: &str, by: i32) -> String {
    input
        .chars()
        .map(|ch| match ch {
            'A'..='Z' => rotate_letter(ch, b'A', by),
            'a'..='z' => rotate_letter(ch, b'a', by),
            _ => ch,
        })
        .collect()
}

fn rotate_letter(ch: char, base: u8, by: i32) -> char {
    let offset = u32::from(ch) - u32::from(base);
    let rotated = (i64::from(offset) + i64::from(by)).rem_euclid(i64::from(ALPHABET));
    u8::try_from(rotated)
        .ok()
        .and_then(|step| base.checked_add(step))
        .map_or(ch, char::from)
}

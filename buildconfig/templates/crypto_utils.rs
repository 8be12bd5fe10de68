pub mod crypto_utils {
    //! Opens values sealed by buildconfig. Depends only on `std`.

    const FORMAT_TAG: &str = "kmbc1";

    /// Opens a sealed value.
    ///
    /// Payloads of the form `kmbc1:<nonce>:<ciphertext>` are XORed with a
    /// keystream derived from `keyword` and the nonce. Anything else is
    /// treated as a legacy letter rotation. This function never panics.
    pub fn decrypt(input: &str, keyword: &str) -> String {
        open(input, keyword).unwrap_or_else(|| legacy_decrypt(input, keyword))
    }

    fn open(input: &str, keyword: &str) -> Option<String> {
        let mut parts = input.splitn(3, ':');
        if parts.next() != Some(FORMAT_TAG) {
            return None;
        }
        let nonce = decode_base64(parts.next()?)?;
        let sealed = decode_base64(parts.next()?)?;
        let mut stream = Keystream::new(seed(keyword, &nonce));
        let opened: Vec<u8> = sealed.iter().map(|byte| byte ^ stream.next_byte()).collect();
        Some(String::from_utf8_lossy(&opened).into_owned())
    }

    fn legacy_decrypt(value: &str, keyword: &str) -> String {
        let shift = keyword
            .encode_utf16()
            .fold(0_i32, |sum, unit| sum.wrapping_add(i32::from(unit)))
            .rem_euclid(26);
        value
            .chars()
            .map(|ch| match ch {
                'A'..='Z' => rotate(ch, 'A', shift),
                'a'..='z' => rotate(ch, 'a', shift),
                _ => ch,
            })
            .collect()
    }

    fn rotate(ch: char, base: char, shift: i32) -> char {
        let offset = (ch as u32 - base as u32) as i32;
        let rotated = (offset - shift).rem_euclid(26) as u32;
        char::from_u32(base as u32 + rotated).unwrap_or(ch)
    }

    fn seed(keyword: &str, nonce: &[u8]) -> u64 {
        keyword
            .bytes()
            .chain(std::iter::once(0))
            .chain(nonce.iter().copied())
            .fold(0xcbf2_9ce4_8422_2325, |hash: u64, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
            })
    }

    fn split_mix64(x: u64) -> u64 {
        let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    struct Keystream {
        state: [u64; 4],
        word: u64,
        remaining: u32,
    }

    impl Keystream {
        fn new(seed: u64) -> Self {
            let s0 = split_mix64(seed);
            let s1 = split_mix64(s0);
            let s2 = split_mix64(s1);
            let s3 = split_mix64(s2);
            Self {
                state: [s0, s1, s2, s3],
                word: 0,
                remaining: 0,
            }
        }

        fn next_byte(&mut self) -> u8 {
            if self.remaining == 0 {
                self.word = self.next_word();
                self.remaining = 8;
            }
            let byte = (self.word & 0xff) as u8;
            self.word >>= 8;
            self.remaining -= 1;
            byte
        }

        fn next_word(&mut self) -> u64 {
            let [s0, s1, s2, s3] = &mut self.state;
            let result = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
            let t = *s1 << 17;
            *s2 ^= *s0;
            *s3 ^= *s1;
            *s1 ^= *s2;
            *s0 ^= *s3;
            *s2 ^= t;
            *s3 = s3.rotate_left(45);
            result
        }
    }

    /// Strict standard-alphabet base64 with mandatory padding.
    fn decode_base64(text: &str) -> Option<Vec<u8>> {
        let bytes = text.as_bytes();
        if bytes.len() % 4 != 0 {
            return None;
        }
        let chunk_count = bytes.len() / 4;
        let mut decoded = Vec::with_capacity(chunk_count * 3);
        for (index, chunk) in bytes.chunks(4).enumerate() {
            let padding = chunk.iter().rev().take_while(|&&byte| byte == b'=').count();
            if padding > 2 || (padding > 0 && index + 1 != chunk_count) {
                return None;
            }
            let mut bits = 0_u32;
            for &byte in chunk.iter().take(4 - padding) {
                bits = (bits << 6) | sextet(byte)?;
            }
            bits <<= 6 * padding as u32;
            let group = [(bits >> 16) as u8, (bits >> 8) as u8, bits as u8];
            let keep = 3 - padding;
            if group.iter().skip(keep).any(|&byte| byte != 0) {
                return None;
            }
            decoded.extend(group.iter().take(keep));
        }
        Some(decoded)
    }

    fn sextet(byte: u8) -> Option<u32> {
        let value = match byte {
            b'A'..=b'Z' => byte - b'A',
            b'a'..=b'z' => byte - b'a' + 26,
            b'0'..=b'9' => byte - b'0' + 52,
            b'+' => 62,
            b'/' => 63,
            _ => return None,
        };
        Some(u32::from(value))
    }
}

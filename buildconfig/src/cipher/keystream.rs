//! Keyed pseudorandom byte stream.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const SPLITMIX_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
const SPLITMIX_MUL1: u64 = 0xbf58_476d_1ce4_e5b9;
const SPLITMIX_MUL2: u64 = 0x94d0_49bb_1331_11eb;

/// Infinite byte stream derived from a keyword and nonce.
///
/// Each 64-bit xoshiro256** output supplies eight bytes, least significant
/// first.
#[derive(Debug, Clone)]
pub struct Keystream {
    state: [u64; 4],
    word: u64,
    remaining: u8,
}

impl Keystream {
    /// Seeds a stream from `keyword` and `nonce`.
    #[must_use]
    pub fn new(keyword: &str, nonce: &[u8]) -> Self {
        let mut seed = seed(keyword, nonce);
        let mut lane = || {
            seed = split_mix64(seed);
            seed
        };
        let state = [lane(), lane(), lane(), lane()];
        Self {
            state,
            word: 0,
            remaining: 0,
        }
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

impl Iterator for Keystream {
    type Item = u8;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "keystream bytes are the low eight bits of the shifted word"
    )]
    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            self.word = self.next_word();
            self.remaining = 8;
        }
        let byte = self.word as u8;
        self.word >>= 8;
        self.remaining -= 1;
        Some(byte)
    }
}

/// FNV-1a over the keyword bytes, a zero separator, then the nonce.
fn seed(keyword: &str, nonce: &[u8]) -> u64 {
    keyword
        .bytes()
        .chain(std::iter::once(0))
        .chain(nonce.iter().copied())
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

const fn split_mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(SPLITMIX_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX_MUL1);
    z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX_MUL2);
    z ^ (z >> 31)
}

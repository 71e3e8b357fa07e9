#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Deterministically pick an index in `0..len` from `key` and a `salt`.
///
/// Used in place of a random choice so that repeated runs over the same article produce the
/// same script.
pub(crate) fn pick_index(key: &str, salt: u8, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut h = Fnv1a64::new_default();
    h.write_u8(salt);
    h.write_bytes(key.as_bytes());
    (h.finish() % len as u64) as usize
}

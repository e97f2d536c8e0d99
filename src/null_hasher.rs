//! A hasher which just proxies for the integer it's given. Handy when keys are
//! already well-spread integers, and for tests that want to know exactly which
//! bucket a key lands in: with `BuildNullHasher`, key `k` goes to bucket
//! `k % capacity`.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHasher(u64);

impl Hasher for NullHasher {
    fn write(&mut self, bytes: &[u8]) {
        // only meant for a single integer; anything wider keeps its low bytes
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.0 = i as u64;
    }

    fn write_u16(&mut self, i: u16) {
        self.0 = i as u64;
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }

    fn write_i8(&mut self, i: i8) {
        self.0 = i as u64;
    }

    fn write_i16(&mut self, i: i16) {
        self.0 = i as u64;
    }

    fn write_i32(&mut self, i: i32) {
        self.0 = i as u64;
    }

    fn write_i64(&mut self, i: i64) {
        self.0 = i as u64;
    }

    fn write_isize(&mut self, i: isize) {
        self.0 = i as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new NullHashers on demand.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildNullHasher;

impl BuildHasher for BuildNullHasher {
    type Hasher = NullHasher;

    fn build_hasher(&self) -> Self::Hasher {
        NullHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash, Hasher};

    use super::{BuildNullHasher, NullHasher};

    fn hash_of<T: Hash>(t: T) -> u64 {
        let mut h = BuildNullHasher.build_hasher();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_hasher() {
        let mut h0 = NullHasher(0);
        h0.write_u64(0xc8c8c8c8);
        assert_eq!(0xc8c8c8c8, h0.finish());

        let mut h1 = NullHasher(0);
        h1.write_u64(0xc8c8c8c8c8c8c8c8);
        assert_eq!(0xc8c8c8c8c8c8c8c8, h1.finish());
    }

    #[test]
    fn test_narrow_integers_hash_to_themselves() {
        assert_eq!(17, hash_of(17u32));
        assert_eq!(17, hash_of(17usize));
        assert_eq!(255, hash_of(255u8));
    }

    #[test]
    fn test_signed_minimum_stays_unsigned() {
        // the bit pattern of i64::MIN, a perfectly good bucket input once
        // taken modulo the capacity
        assert_eq!(1u64 << 63, hash_of(i64::MIN));
        assert_eq!(0, hash_of(i64::MIN) % 16);
    }
}

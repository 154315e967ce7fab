use rand::{Error, RngCore, SeedableRng};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const ZERO_STATE: u32 = 0x9E37_79B9;
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// 32-bit FNV-1a over the UTF-16 code units of `value`.
pub fn seed_from_str(value: &str) -> u32 {
    value.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Xorshift32 generator. Same seed, same stream, on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves the all-zero state
        let state = if seed == 0 { ZERO_STATE } else { seed };
        Self { state }
    }

    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(seed_from_str(seed))
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_unit(&mut self) -> f64 {
        unit_f64(self)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Uniform float in [0, 1) built from one 32-bit draw.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / UNIT_SCALE
}

/// `floor(unit * len)`; `len` must be non-zero.
pub fn index_below<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    let index = (unit_f64(rng) * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

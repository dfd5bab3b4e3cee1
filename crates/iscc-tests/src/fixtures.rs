//! Deterministic test inputs.

/// Pseudo-random bytes from a 64-bit LCG seeded with `0x12345678`.
pub fn lcg_data(len: usize) -> Vec<u8> {
    let mut state = 0x12345678u64;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}

/// A 380-value frame signature counting upwards.
pub fn ramp_frame() -> Vec<i32> {
    (0..380).collect()
}

/// A 380-value frame signature with a short repeating pattern.
pub fn wave_frame() -> Vec<i32> {
    (0..380).map(|i| (i * 31) % 17).collect()
}

/// 32x32 grayscale pixels with value `(x * y) % 256`.
pub fn product_image() -> Vec<u8> {
    (0..1024usize)
        .map(|i| (((i % 32) * (i / 32)) % 256) as u8)
        .collect()
}

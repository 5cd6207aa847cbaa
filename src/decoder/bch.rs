//! Nearest-codeword matching for the BCH-protected format and version fields.

/// Bit errors a format or version read may carry and still match
pub const MAX_CORRECTABLE_BITS: u32 = 3;

/// Number of differing bits
#[inline]
pub fn hamming_distance(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Index of the first table entry within [`MAX_CORRECTABLE_BITS`] of `received`
///
/// Valid codewords sit at least seven bits apart, so at most one entry can match.
pub fn nearest_codeword(received: u32, table: &[u32]) -> Option<usize> {
    table
        .iter()
        .position(|&codeword| hamming_distance(received, codeword) <= MAX_CORRECTABLE_BITS)
}

/// Systematic BCH encoding: `data` followed by `ecc_bits` of remainder modulo `generator`
pub fn encode(data: u32, generator: u32, ecc_bits: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    debug_assert_eq!(degree, ecc_bits);
    let mut rem = data << ecc_bits;
    while rem != 0 && 31 - rem.leading_zeros() >= degree {
        rem ^= generator << (31 - rem.leading_zeros() - degree);
    }
    (data << ecc_bits) | rem
}

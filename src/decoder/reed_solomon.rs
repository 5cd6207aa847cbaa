//! Reed-Solomon over GF(256), primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.
//!
//! Codewords are stored highest degree first: `block[0]` is the coefficient of x^(n-1).
//! The generator has roots α^0 .. α^(ecc-1).

use crate::error::RsError;

const PRIMITIVE: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    // α^255 wraps to α^0
    exp[255] = 1;
    (exp, log)
}

static TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// α^n for any exponent
    #[inline]
    pub fn exp(n: usize) -> u8 {
        TABLES.0[n % 255]
    }

    /// Discrete log of a non-zero element
    #[inline]
    pub fn log(a: u8) -> Option<usize> {
        (a != 0).then(|| TABLES.1[a as usize] as usize)
    }

    /// Field product
    #[inline]
    pub fn mul(a: u8, b: u8) -> u8 {
        match (Self::log(a), Self::log(b)) {
            (Some(la), Some(lb)) => Self::exp(la + lb),
            _ => 0,
        }
    }

    /// `a / b`, `None` when `b` is zero
    #[inline]
    pub fn div(a: u8, b: u8) -> Option<u8> {
        let lb = Self::log(b)?;
        Some(Self::log(a).map_or(0, |la| Self::exp(la + 255 - lb)))
    }

    /// `a^n`
    pub fn pow(a: u8, n: usize) -> u8 {
        match Self::log(a) {
            None if n == 0 => 1,
            None => 0,
            Some(la) => Self::exp(la * (n % 255)),
        }
    }
}

/// Evaluate a polynomial stored lowest degree first
fn eval_ascending(poly: &[u8], x: u8) -> u8 {
    poly.iter().rev().fold(0, |acc, &c| Gf256::mul(acc, x) ^ c)
}

/// Evaluate a polynomial stored highest degree first
fn eval_descending(poly: &[u8], x: u8) -> u8 {
    poly.iter().fold(0, |acc, &c| Gf256::mul(acc, x) ^ c)
}

/// Generator polynomial with roots α^0 .. α^(ecc-1), highest degree first, monic
pub fn generator_polynomial(ecc_len: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..ecc_len {
        let root = Gf256::exp(i);
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &c) in poly.iter().enumerate() {
            next[j] ^= c;
            next[j + 1] ^= Gf256::mul(c, root);
        }
        poly = next;
    }
    poly
}

/// Error-correction codewords for `data`
pub fn encode_ecc(data: &[u8], ecc_len: usize) -> Vec<u8> {
    let generator = generator_polynomial(ecc_len);
    let mut remainder = vec![0u8; ecc_len];
    for &byte in data {
        let factor = byte ^ remainder[0];
        remainder.rotate_left(1);
        remainder[ecc_len - 1] = 0;
        for (r, &g) in remainder.iter_mut().zip(&generator[1..]) {
            *r ^= Gf256::mul(g, factor);
        }
    }
    remainder
}

/// Reed-Solomon decoder for one block
pub struct ReedSolomonDecoder {
    ecc_len: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `ecc_len` error-correction codewords
    pub fn new(ecc_len: usize) -> Self {
        Self { ecc_len }
    }

    /// Maximum correctable codeword errors, `ecc / 2`
    pub fn capacity(&self) -> usize {
        self.ecc_len / 2
    }

    /// Correct `block` in place and return how many codewords changed
    pub fn decode(&self, block: &mut [u8]) -> Result<usize, RsError> {
        let syndromes = self.syndromes(block);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let (sigma, degree) = berlekamp_massey(&syndromes);
        if degree > self.capacity() {
            return Err(RsError::TooManyErrors {
                degree,
                capacity: self.capacity(),
            });
        }

        let n = block.len();
        // Chien search over positions inside the block
        let positions: Vec<usize> = (0..n)
            .filter(|&j| eval_ascending(&sigma, Gf256::exp(255 - (n - 1 - j) % 255)) == 0)
            .collect();
        if positions.len() != degree {
            return Err(RsError::LocatorMismatch {
                degree,
                roots: positions.len(),
            });
        }

        // Forney: omega = S(x) * sigma(x) mod x^ecc
        let mut omega = vec![0u8; self.ecc_len];
        for (i, &s) in syndromes.iter().enumerate() {
            for (j, &c) in sigma.iter().enumerate().take(self.ecc_len - i) {
                omega[i + j] ^= Gf256::mul(s, c);
            }
        }
        // Formal derivative keeps odd-degree terms only
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        for &j in &positions {
            let power = (n - 1 - j) % 255;
            let x = Gf256::exp(power);
            let x_inv = Gf256::exp(255 - power);
            let numerator = Gf256::mul(x, eval_ascending(&omega, x_inv));
            let magnitude = Gf256::div(numerator, eval_ascending(&sigma_prime, x_inv))
                .ok_or(RsError::DegenerateLocator)?;
            block[j] ^= magnitude;
        }

        if self.syndromes(block).iter().any(|&s| s != 0) {
            return Err(RsError::ResidualSyndrome);
        }
        Ok(degree)
    }

    /// `S_i = c(α^i)` for i in 0..ecc
    fn syndromes(&self, block: &[u8]) -> Vec<u8> {
        (0..self.ecc_len)
            .map(|i| eval_descending(block, Gf256::exp(i)))
            .collect()
    }
}

/// Shortest LFSR generating the syndrome sequence
///
/// Returns the locator, lowest degree first, and the register length.
fn berlekamp_massey(syndromes: &[u8]) -> (Vec<u8>, usize) {
    let mut sigma = vec![1u8];
    let mut prev = vec![1u8];
    let mut len = 0usize;
    let mut shift = 1usize;
    let mut prev_discrepancy = 1u8;

    for k in 0..syndromes.len() {
        let discrepancy = (1..=len.min(sigma.len() - 1))
            .fold(syndromes[k], |acc, i| acc ^ Gf256::mul(sigma[i], syndromes[k - i]));
        if discrepancy == 0 {
            shift += 1;
            continue;
        }
        // prev_discrepancy is never zero
        let scale = Gf256::div(discrepancy, prev_discrepancy).unwrap_or(0);
        let mut updated = sigma.clone();
        if updated.len() < prev.len() + shift {
            updated.resize(prev.len() + shift, 0);
        }
        for (i, &b) in prev.iter().enumerate() {
            updated[i + shift] ^= Gf256::mul(scale, b);
        }
        if 2 * len <= k {
            prev = std::mem::replace(&mut sigma, updated);
            len = k + 1 - len;
            prev_discrepancy = discrepancy;
            shift = 1;
        } else {
            sigma = updated;
            shift += 1;
        }
    }

    sigma.truncate(len + 1);
    (sigma, len)
}

//! Seedable pseudo-random stream whose state can be shared as a short base-36 string.
//!
//! The stream is mulberry32 over a 32-bit state. Seeds come either from a
//! base-36 string (typically taken from a shared level link) or, when none is
//! usable, from an xmur3 hash of the current UTC timestamp.

use chrono::{SecondsFormat, Utc};

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const UNIT_DIVISOR: f64 = 4_294_967_295.0;
const XMUR3_SEED: u32 = 1_779_033_703;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Builds a stream from an optional base-36 seed string.
    ///
    /// Missing, empty, digit-less and zero seeds fall back to a seed hashed
    /// from the current timestamp; this never fails.
    pub fn new(seed_source: Option<&str>) -> Self {
        match seed_source.and_then(parse_base36) {
            Some(seed) if seed != 0 => Self::from_state(seed),
            _ => Self::from_timestamp(&current_timestamp()),
        }
    }

    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Seeds from the xmur3 hash of an ISO-8601 timestamp string.
    pub fn from_timestamp(timestamp: &str) -> Self {
        Self::from_state(Xmur3::new(timestamp).next_u32())
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Base-36 encoding of the current state; feeding it back to [`SeededRandom::new`]
    /// resumes the identical sequence.
    pub fn state_string(&self) -> String {
        to_base36(self.state)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1]`; 1.0 is only reached when the raw output is `u32::MAX`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_DIVISOR
    }

    /// `floor(next * 256)`, i.e. a byte in `0..=256`.
    pub fn next_byte_span(&mut self) -> u32 {
        (self.next_f64() * 256.0) as u32
    }
}

/// xmur3 string hash; each call to [`Xmur3::next_u32`] yields a further mixed value.
#[derive(Clone, Debug)]
pub struct Xmur3 {
    h: u32,
}

impl Xmur3 {
    pub fn new(input: &str) -> Self {
        let units: Vec<u16> = input.encode_utf16().collect();
        let mut h = XMUR3_SEED ^ units.len() as u32;
        for unit in units {
            h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.h = h;
        h
    }
}

/// Parses the longest base-36 prefix after optional whitespace and sign,
/// wrapping into 32 bits. Returns `None` when no digit is present.
pub fn parse_base36(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value = 0_u32;
    let mut any_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(36)) {
        value = value.wrapping_mul(36).wrapping_add(digit);
        any_digit = true;
    }

    if !any_digit {
        return None;
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

pub fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = value % 36;
        digits.push(char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Arbitrary-precision radix conversion
//!
//! A sequence of digits is read as a single unsigned integer of unbounded
//! size, most significant digit first. The integer is kept in 32-bit limbs
//! (least significant first) with 64-bit intermediates, no big integer type
//! is needed.
//!
//! Input digits are consumed in chunks that fit into a single limb and
//! output digits are produced in chunks by dividing through the largest
//! power of the radix that fits into a limb. Bytes are packed into and
//! unpacked from limbs directly.

/// The smallest supported radix
pub const MIN_RADIX: u32 = 2;

/// The largest supported radix, i.e. bytes
pub const MAX_RADIX: u32 = 256;

const LIMB_BITS: u32 = u32::BITS;

/// Convert big-endian `digits` from radix `from` into radix `to`.
///
/// Both radices must be within [`MIN_RADIX`]`..=`[`MAX_RADIX`] and every
/// input digit must be less than `from`.
///
/// Leading zero digits do not contribute to the value and are lost.
/// A value of zero results in an empty sequence, i.e. the output never
/// starts with a zero digit.
#[must_use]
pub fn convert(digits: &[u8], from: u32, to: u32) -> Vec<u8> {
    debug_assert!((MIN_RADIX..=MAX_RADIX).contains(&from));
    debug_assert!((MIN_RADIX..=MAX_RADIX).contains(&to));
    debug_assert!(digits.iter().all(|&digit| u32::from(digit) < from));
    from_limbs(to_limbs(digits, from), to)
}

/// The largest power of `radix` that fits into a limb and its exponent.
fn limb_power(radix: u32) -> (u64, usize) {
    let radix = u64::from(radix);
    let mut power = radix;
    let mut exponent = 1;
    while power * radix <= u64::from(u32::MAX) {
        power *= radix;
        exponent += 1;
    }
    (power, exponent)
}

#[allow(clippy::cast_possible_truncation)] // lower half
const fn low_limb(value: u64) -> u32 {
    value as u32
}

#[allow(clippy::cast_possible_truncation)] // remainder < radix <= 256
fn low_digit(value: u64, radix: u32) -> u8 {
    (value % u64::from(radix)) as u8
}

fn trim(limbs: &mut Vec<u32>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

fn to_limbs(digits: &[u8], from: u32) -> Vec<u32> {
    if from == MAX_RADIX {
        let mut limbs: Vec<u32> = digits
            .rchunks(4)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0, |limb, &byte| (limb << 8) | u32::from(byte))
            })
            .collect();
        trim(&mut limbs);
        return limbs;
    }
    let (_, exponent) = limb_power(from);
    let radix = u64::from(from);
    let mut limbs = Vec::new();
    for chunk in digits.chunks(exponent) {
        // value = value * from^chunk.len() + chunk
        let (multiplier, addend) = chunk
            .iter()
            .fold((1, 0), |(multiplier, addend), &digit| {
                (multiplier * radix, addend * radix + u64::from(digit))
            });
        mul_add(&mut limbs, multiplier, addend);
    }
    limbs
}

// Both `multiplier` and `addend` are less than 2^32.
fn mul_add(limbs: &mut Vec<u32>, multiplier: u64, addend: u64) {
    let mut carry = addend;
    for limb in &mut *limbs {
        let acc = u64::from(*limb) * multiplier + carry;
        *limb = low_limb(acc);
        carry = acc >> LIMB_BITS;
    }
    if carry > 0 {
        limbs.push(low_limb(carry));
    }
}

// The `divisor` is less than 2^32.
fn div_rem(limbs: &mut Vec<u32>, divisor: u64) -> u64 {
    let mut remainder = 0;
    for limb in limbs.iter_mut().rev() {
        let acc = (remainder << LIMB_BITS) | u64::from(*limb);
        *limb = low_limb(acc / divisor);
        remainder = acc % divisor;
    }
    trim(limbs);
    remainder
}

fn from_limbs(mut limbs: Vec<u32>, to: u32) -> Vec<u8> {
    // Little-endian, reversed at the end.
    let mut digits = Vec::new();
    if to == MAX_RADIX {
        digits.reserve(limbs.len() * 4);
        for limb in limbs {
            digits.extend(limb.to_le_bytes());
        }
    } else {
        let (divisor, exponent) = limb_power(to);
        while !limbs.is_empty() {
            let mut remainder = div_rem(&mut limbs, divisor);
            for _ in 0..exponent {
                digits.push(low_digit(remainder, to));
                remainder /= u64::from(to);
            }
        }
    }
    while digits.last() == Some(&0) {
        digits.pop();
    }
    digits.reverse();
    digits
}

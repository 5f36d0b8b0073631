/*!
Conversions between [`BigFloat`] and Rust's primitive numbers.

Conversions from `f64` are exact, including the sign of zero, subnormals, and
NaN payloads with either signalling state. Conversions back never fail: they
saturate to infinity above the binary64 exponent range, flush to zero below
it, and truncate significands that carry more than 53 bits.
*/

use num_bigint::{
    BigInt,
    BigUint,
};
use num_traits::{
    Signed,
    ToPrimitive,
    Zero,
};

use super::{
    BigFloat,
    Range,
};

const F64_EXPONENT_BIAS: i64 = 1023;
const F64_SIGNIFICAND_BITS: u64 = 52;

const F64_SIGN_MASK: u64 = 1 << 63;
const F64_EXPONENT_MASK: u64 = 0x7ff0_0000_0000_0000;
const F64_FRACTION_MASK: u64 = 0x000f_ffff_ffff_ffff;

// The payload of a NaN is the fraction bits except the most significant,
// which distinguishes signalling from quiet NaNs
const F64_NAN_PAYLOAD_MASK: u64 = 0x0007_ffff_ffff_ffff;
const F64_SIGNALING_MASK: u64 = 0x0008_0000_0000_0000;

impl BigFloat {
    /**
    The exact value of a binary64 number.

    The result mirrors the bit pattern: zeros and infinities keep their sign,
    subnormals are renormalized, and a NaN keeps its payload, stored negative
    for a signalling NaN and non-negative for a quiet one.
    */
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();

        let is_negative = bits & F64_SIGN_MASK != 0;
        let exponent = ((bits & F64_EXPONENT_MASK) >> F64_SIGNIFICAND_BITS) as i64;
        let fraction = bits & F64_FRACTION_MASK;

        match exponent {
            // Zeros and subnormals
            0 => {
                if fraction == 0 {
                    BigFloat::zero(is_negative)
                } else {
                    // A subnormal is fraction * 2^-1074; shifting the leading
                    // bit into the hidden position is what `from_parts` does
                    // when it interprets the bit length
                    let leading = 64 - fraction.leading_zeros() as i64;
                    let significand = if is_negative {
                        -BigInt::from(fraction)
                    } else {
                        BigInt::from(fraction)
                    };

                    BigFloat::from_parts(significand, leading - 1075)
                }
            }
            // Infinities and NaNs
            0x7ff => {
                if fraction == 0 {
                    BigFloat::infinity(is_negative)
                } else if fraction & F64_SIGNALING_MASK != 0 {
                    BigFloat::nan(is_negative, BigInt::from(fraction & F64_NAN_PAYLOAD_MASK))
                } else {
                    BigFloat::nan(is_negative, -BigInt::from(fraction))
                }
            }
            // Normal values
            _ => {
                let mantissa = (1 << F64_SIGNIFICAND_BITS) | fraction;
                let significand = if is_negative {
                    -BigInt::from(mantissa)
                } else {
                    BigInt::from(mantissa)
                };

                BigFloat::from_parts(significand, exponent - F64_EXPONENT_BIAS)
            }
        }
    }

    /**
    The nearest-below binary64 value.

    Exponents above the binary64 range saturate to infinity and exponents
    below it flush to zero; a significand wider than 53 bits is truncated.
    NaNs keep their sign and as much payload as binary64 carries.
    */
    pub fn to_f64(&self) -> f64 {
        let sign = if self.is_sign_negative() {
            F64_SIGN_MASK
        } else {
            0
        };

        match self.range {
            Range::Infinite => f64::from_bits(sign | F64_EXPONENT_MASK),
            Range::Nan => {
                let fraction = if self.exponent.is_negative() {
                    // Signalling: the quiet bit stays clear, so losing the
                    // whole payload to the mask would read back as infinity
                    match (self.exponent.magnitude() & BigUint::from(F64_NAN_PAYLOAD_MASK))
                        .to_u64()
                        .expect("masked payload fits 64 bits")
                    {
                        0 => 1,
                        payload => payload,
                    }
                } else {
                    F64_SIGNALING_MASK
                        | (self.exponent.magnitude() & BigUint::from(F64_NAN_PAYLOAD_MASK))
                            .to_u64()
                            .expect("masked payload fits 64 bits")
                };

                f64::from_bits(sign | F64_EXPONENT_MASK | fraction)
            }
            Range::Finite if self.significand.is_zero() => f64::from_bits(sign),
            Range::Finite => {
                let exponent = match self.exponent.to_i64() {
                    Some(exponent) if exponent <= F64_EXPONENT_BIAS => {
                        if exponent < -1074 {
                            return f64::from_bits(sign);
                        }

                        exponent
                    }
                    Some(_) => return f64::from_bits(sign | F64_EXPONENT_MASK),
                    None if self.exponent.is_negative() => return f64::from_bits(sign),
                    None => return f64::from_bits(sign | F64_EXPONENT_MASK),
                };

                let magnitude = self.significand.magnitude();
                let width = magnitude.bits();

                // A full 53-bit mantissa with the hidden bit still in place
                let mantissa = if width <= 53 {
                    magnitude.to_u64().expect("a 53 bit significand fits") << (53 - width)
                } else {
                    (magnitude >> (width - 53))
                        .to_u64()
                        .expect("a 53 bit significand fits")
                };

                if exponent >= -1022 {
                    let biased = (exponent + F64_EXPONENT_BIAS) as u64;

                    f64::from_bits(
                        sign | (biased << F64_SIGNIFICAND_BITS) | (mantissa & F64_FRACTION_MASK),
                    )
                } else {
                    // Subnormal range: the hidden bit moves into the fraction
                    let fraction = mantissa >> (-1022 - exponent) as u32;

                    f64::from_bits(sign | fraction)
                }
            }
        }
    }

    /**
    The integer part of the value, saturating at the `i64` range.

    NaN converts to `0`, the way narrowing casts of NaN do.
    */
    pub fn to_i64(&self) -> i64 {
        match self.range {
            Range::Nan => 0,
            Range::Infinite => {
                if self.is_sign_negative() {
                    i64::MIN
                } else {
                    i64::MAX
                }
            }
            Range::Finite if self.significand.is_zero() => 0,
            Range::Finite => {
                if self.exponent.is_negative() {
                    return 0;
                }

                if self.exponent >= BigInt::from(64) {
                    return if self.is_sign_negative() {
                        i64::MIN
                    } else {
                        i64::MAX
                    };
                }

                let exponent = self.exponent.to_i64().expect("a small exponent fits");
                let magnitude = self.significand.magnitude();
                let width = magnitude.bits() as i64;

                // Truncate toward zero by dropping the fraction bits; shifting
                // the magnitude rather than the signed value keeps a negative
                // number from rounding away from zero
                let truncated = if exponent + 1 >= width {
                    magnitude << (exponent + 1 - width) as u64
                } else {
                    magnitude >> (width - exponent - 1) as u64
                };

                let truncated = if self.is_sign_negative() {
                    -BigInt::from(truncated)
                } else {
                    BigInt::from(truncated)
                };

                truncated.to_i64().unwrap_or(if self.is_sign_negative() {
                    i64::MIN
                } else {
                    i64::MAX
                })
            }
        }
    }
}

impl From<f64> for BigFloat {
    fn from(value: f64) -> Self {
        BigFloat::from_f64(value)
    }
}

impl From<i64> for BigFloat {
    fn from(value: i64) -> Self {
        BigFloat::from_i64(value)
    }
}

impl From<BigInt> for BigFloat {
    fn from(value: BigInt) -> Self {
        BigFloat::from_big_int(value)
    }
}

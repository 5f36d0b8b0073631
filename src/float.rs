/*!
The normalized arbitrary precision binary floating point value.

A [`BigFloat`] covers finite numbers of any magnitude and precision, signed
zeros, signed infinities, and NaNs with a signed payload. The finite encoding
is `sign(significand) * M * 2^exponent`, where the absolute value of the
significand is read as a bit string: its most significant bit is the implicit
leading 1 and everything below it is the fraction, so `M` is
`|significand| / 2^(bit_length(|significand|) - 1)`. The significands `1`,
`2` and `4` all spell the mantissa `1.0`; `3` spells `1.1` in binary, which
is `1.5`; `5` spells `1.01`, which is `1.25`.

That reading makes trailing zero bits of the significand meaningless, so
values are kept in a normal form where they're stripped on construction.
Every value is immutable once built:

- Finite non-zero: `|significand|` is odd; the exponent is unconstrained.
- Zero: the significand is `0` and the exponent is `+1` or `-1`, carrying
the sign of the zero.
- Infinity: the significand is `+1` or `-1` and the exponent is `0`.
- NaN: the significand is `+1` or `-1` (the sign of the NaN) and the
exponent holds the payload; a strictly negative payload marks a signalling
NaN, a non-negative one a quiet NaN.
*/

mod cmp;
mod convert;

use core::fmt;

use num_bigint::{
    BigInt,
    Sign,
};
use num_traits::{
    Signed,
    Zero,
};

use crate::{
    error::UnsupportedError,
    Error,
};

/**
The class of a [`BigFloat`] value.

The variants are ordered the way the total comparison orders same-signed
values of different classes: finite values first, then infinities, then NaNs.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Range {
    Finite,
    Infinite,
    Nan,
}

impl Range {
    fn as_str(self) -> &'static str {
        match self {
            Range::Finite => "finite",
            Range::Infinite => "infinite",
            Range::Nan => "nan",
        }
    }
}

/**
An arbitrary precision binary floating point number.

Equality through `PartialEq` is structural: `+0` and `-0` are unequal, and
two NaNs are equal exactly when their signs and payloads match. For the
IEEE 754 style notion where zeros collapse and NaN never equals anything,
use [`BigFloat::eq_number`].
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigFloat {
    range: Range,
    significand: BigInt,
    exponent: BigInt,
}

impl BigFloat {
    /**
    The zero of either sign.
    */
    pub fn zero(is_negative: bool) -> Self {
        BigFloat {
            range: Range::Finite,
            significand: BigInt::zero(),
            exponent: BigInt::from(if is_negative { -1 } else { 1 }),
        }
    }

    /**
    The infinity of either sign.
    */
    pub fn infinity(is_negative: bool) -> Self {
        BigFloat {
            range: Range::Infinite,
            significand: BigInt::from(if is_negative { -1 } else { 1 }),
            exponent: BigInt::zero(),
        }
    }

    /**
    A NaN with the given sign and payload.

    A strictly negative payload makes the NaN signalling.
    */
    pub fn nan(is_negative: bool, payload: impl Into<BigInt>) -> Self {
        BigFloat {
            range: Range::Nan,
            significand: BigInt::from(if is_negative { -1 } else { 1 }),
            exponent: payload.into(),
        }
    }

    /**
    A finite value from an explicit significand and exponent.

    The significand is normalized by stripping its trailing zero bits, which
    doesn't change the value it spells. A zero significand produces the zero
    whose sign is the sign of the exponent.
    */
    pub fn from_parts(significand: impl Into<BigInt>, exponent: impl Into<BigInt>) -> Self {
        let significand = significand.into();
        let exponent = exponent.into();

        if significand.is_zero() {
            return BigFloat::zero(exponent.is_negative());
        }

        BigFloat {
            range: Range::Finite,
            significand: strip_trailing_zeros(significand),
            exponent,
        }
    }

    /**
    The exact value of a signed integer.
    */
    pub fn from_i64(value: i64) -> Self {
        BigFloat::from_big_int(BigInt::from(value))
    }

    /**
    The exact value of an arbitrary precision integer.
    */
    pub fn from_big_int(value: BigInt) -> Self {
        if value.is_zero() {
            return BigFloat::zero(false);
        }

        let exponent = BigInt::from(value.magnitude().bits() - 1);

        BigFloat::from_parts(value, exponent)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /**
    The normalized significand of a finite value.
    */
    pub fn significand(&self) -> Result<&BigInt, Error> {
        if self.range != Range::Finite {
            Err(UnsupportedError::wrong_range(
                "significand",
                "finite",
                self.range.as_str(),
            ))?;
        }

        Ok(&self.significand)
    }

    /**
    The exponent of a finite value.
    */
    pub fn exponent(&self) -> Result<&BigInt, Error> {
        if self.range != Range::Finite {
            Err(UnsupportedError::wrong_range(
                "exponent",
                "finite",
                self.range.as_str(),
            ))?;
        }

        Ok(&self.exponent)
    }

    /**
    The signed payload of a NaN.
    */
    pub fn nan_payload(&self) -> Result<&BigInt, Error> {
        if self.range != Range::Nan {
            Err(UnsupportedError::wrong_range(
                "nan_payload",
                "nan",
                self.range.as_str(),
            ))?;
        }

        Ok(&self.exponent)
    }

    pub fn is_finite(&self) -> bool {
        self.range == Range::Finite
    }

    pub fn is_infinite(&self) -> bool {
        self.range == Range::Infinite
    }

    pub fn is_nan(&self) -> bool {
        self.range == Range::Nan
    }

    pub fn is_zero(&self) -> bool {
        self.range == Range::Finite && self.significand.is_zero()
    }

    /**
    Whether the sign bit is set; true for `-0` and negative NaNs.
    */
    pub fn is_sign_negative(&self) -> bool {
        if self.is_zero() {
            self.exponent.is_negative()
        } else {
            self.significand.is_negative()
        }
    }

    /**
    Whether the value is a NaN with a strictly negative payload.
    */
    pub fn is_signaling_nan(&self) -> bool {
        self.range == Range::Nan && self.exponent.is_negative()
    }

    pub fn is_quiet_nan(&self) -> bool {
        self.range == Range::Nan && !self.exponent.is_negative()
    }

    /**
    The value with its sign flipped.

    Negating a zero flips the sign its exponent carries; negating a NaN flips
    the NaN's sign and keeps the payload.
    */
    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return BigFloat::zero(!self.is_sign_negative());
        }

        BigFloat {
            range: self.range,
            significand: -&self.significand,
            exponent: self.exponent.clone(),
        }
    }

    pub(crate) fn significand_ref(&self) -> &BigInt {
        &self.significand
    }

    pub(crate) fn exponent_ref(&self) -> &BigInt {
        &self.exponent
    }
}

/**
Shift a non-zero integer right past its trailing zero bits.
*/
pub(crate) fn strip_trailing_zeros(value: BigInt) -> BigInt {
    debug_assert!(!value.is_zero());

    match value.trailing_zeros() {
        Some(0) | None => value,
        Some(shift) => value >> shift,
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_sign_negative() {
            f.write_str("-")?;
        }

        match self.range {
            Range::Infinite => f.write_str("inf"),
            Range::Nan => {
                f.write_str(if self.is_signaling_nan() { "snan" } else { "nan" })?;

                if !self.exponent.is_zero() {
                    write!(f, "({})", self.exponent.magnitude())?;
                }

                Ok(())
            }
            Range::Finite if self.significand.is_zero() => f.write_str("0x0p+0"),
            Range::Finite => {
                f.write_str("0x1")?;

                let magnitude = self.significand.magnitude();
                let fraction_bits = magnitude.bits() - 1;

                if fraction_bits > 0 {
                    // Left-align the fraction on a nibble so it reads as hex
                    let pad = (4 - (fraction_bits % 4)) % 4;
                    let fraction =
                        (magnitude - (num_bigint::BigUint::from(1u8) << fraction_bits)) << pad;

                    let digits = ((fraction_bits + pad) / 4) as usize;

                    write!(f, ".{:0>width$}", fraction.to_str_radix(16), width = digits)?;
                }

                if self.exponent.sign() == Sign::Minus {
                    write!(f, "p{}", self.exponent)
                } else {
                    write!(f, "p+{}", self.exponent)
                }
            }
        }
    }
}

/*!
Conversion to and from multi-digit form at a power-of-two radix.

This is the crate's bridge to arbitrary-radix decimal-style libraries: any
finite [`BigFloat`] converts exactly to a digit string in radix 2, 4, 8, 16
or 32, and back. The digit form is a scaled fraction,
`sign * (d0 + d1/r + d2/r^2 + ...) * r^exponent`, with the most significant
digit first.

Only radices that are a power of two keep the conversion exact, which is why
anything else is rejected outright rather than rounded.
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

use crate::{
    error::{
        ArgumentError,
        OverflowError,
    },
    float::BigFloat,
    Error,
};

/**
A finite number spelled out in digits of a power-of-two radix.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadixDigits {
    radix: u32,
    is_negative: bool,
    digits: Vec<u8>,
    exponent: BigInt,
}

impl RadixDigits {
    /**
    Build a digit form directly, validating the radix and digit range.
    */
    pub fn new(
        radix: u32,
        is_negative: bool,
        digits: Vec<u8>,
        exponent: impl Into<BigInt>,
    ) -> Result<Self, Error> {
        digit_bits(radix)?;

        if digits.is_empty() {
            Err(ArgumentError::new("a digit form needs at least one digit"))?;
        }

        if digits.iter().any(|d| (*d as u32) >= radix) {
            Err(ArgumentError::new("a digit is out of range for the radix"))?;
        }

        Ok(RadixDigits {
            radix,
            is_negative,
            digits,
            exponent: exponent.into(),
        })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    /**
    The digits, most significant first. The first digit is the integer part
    of the mantissa; the rest are its fraction.
    */
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /**
    The power of the radix scaling the mantissa.
    */
    pub fn exponent(&self) -> &BigInt {
        &self.exponent
    }
}

/**
Spell a finite value out in digits of the given radix.
*/
pub fn to_digits(value: &BigFloat, radix: u32) -> Result<RadixDigits, Error> {
    let bits = digit_bits(radix)?;

    if !value.is_finite() {
        Err(ArgumentError::new(
            "only finite values have a digit form; infinities and NaNs do not",
        ))?;
    }

    if value.is_zero() {
        return Ok(RadixDigits {
            radix,
            is_negative: value.is_sign_negative(),
            digits: vec![0],
            exponent: BigInt::zero(),
        });
    }

    let exponent = value.exponent().expect("the range is finite");

    check_exponent(exponent, bits)?;

    // Floor-divide the binary exponent by the digit width; the non-negative
    // remainder widens the leading digit instead of shifting the scale
    let mut scale = exponent.clone() / bits;
    let mut remainder = exponent.clone() - scale.clone() * bits;

    if remainder.is_negative() {
        scale -= 1;
        remainder += bits;
    }

    let remainder = remainder
        .to_u64()
        .expect("the remainder is below the digit width");

    let significand = value.significand().expect("the range is finite");
    let magnitude = significand.magnitude();
    let width = magnitude.bits();

    // Align the significand so the leading digit holds `remainder + 1` bits
    // and the rest split into whole digits
    let leading_bits = remainder + 1;
    let fraction_bits = width.saturating_sub(leading_bits);
    let fraction_digits = (fraction_bits + (bits as u64) - 1) / (bits as u64);
    let pad = leading_bits + fraction_digits * (bits as u64) - width;

    let mut acc = magnitude << pad;
    let mask = BigUint::from((1u32 << bits) - 1);

    let mut digits = vec![0u8; (fraction_digits + 1) as usize];

    // Peel digits off the low end, so the vector fills back to front
    for slot in digits.iter_mut().rev() {
        *slot = (&acc & &mask).to_u8().expect("a digit fits in a byte");
        acc >>= bits;
    }

    debug_assert!(acc.is_zero());

    Ok(RadixDigits {
        radix,
        is_negative: significand.is_negative(),
        digits,
        exponent: scale,
    })
}

/**
Rebuild the value a digit form spells.
*/
pub fn from_digits(digits: &RadixDigits) -> Result<BigFloat, Error> {
    let bits = digit_bits(digits.radix)?;

    let mut acc = BigUint::zero();

    for &digit in &digits.digits {
        acc = (acc << bits) | BigUint::from(digit);
    }

    if acc.is_zero() {
        return Ok(BigFloat::zero(digits.is_negative));
    }

    let fraction_digits = (digits.digits.len() - 1) as u64;
    let width = acc.bits();

    // The binary exponent is the radix scale plus the position of the
    // leading bit within its digit
    let exponent =
        (digits.exponent.clone() - fraction_digits) * bits + (width - 1);

    check_exponent(&exponent, bits)?;

    let significand = if digits.is_negative {
        -BigInt::from(acc)
    } else {
        BigInt::from(acc)
    };

    Ok(BigFloat::from_parts(significand, exponent))
}

fn digit_bits(radix: u32) -> Result<u32, Error> {
    match radix {
        2 => Ok(1),
        4 => Ok(2),
        8 => Ok(3),
        16 => Ok(4),
        32 => Ok(5),
        _ => Err(Error::from(ArgumentError::new(
            "the radix must be a power of two between 2 and 32",
        ))),
    }
}

fn check_exponent(exponent: &BigInt, bits: u32) -> Result<(), Error> {
    let limit = BigInt::from(i64::MAX) << (bits - 1);

    if exponent.magnitude() > limit.magnitude() {
        Err(OverflowError::out_of_range(
            62 + bits as u64,
            "the binary exponent is out of range for the radix",
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit_form(value: f64, radix: u32) -> RadixDigits {
        to_digits(&BigFloat::from_f64(value), radix).expect("failed to convert")
    }

    #[test]
    fn digits_of_small_values() {
        for (value, radix, digits, exponent) in [
            (1.0f64, 16, vec![1u8], 0i64),
            (1.5, 16, vec![1, 8], 0),
            (2.0, 2, vec![1], 1),
            (2.0, 16, vec![2], 0),
            (0.5, 8, vec![4], -1),
            (-0.25, 4, vec![1], -1),
            (256.0, 16, vec![1], 2),
            (2.5, 2, vec![1, 0, 1], 1),
        ] {
            let form = digit_form(value, radix);

            assert_eq!(digits, form.digits(), "{} at radix {}", value, radix);
            assert_eq!(
                &BigInt::from(exponent),
                form.exponent(),
                "{} at radix {}",
                value,
                radix
            );
        }
    }

    #[test]
    fn zero_keeps_its_sign() {
        for negative in [false, true] {
            let form = to_digits(&BigFloat::zero(negative), 16).unwrap();

            assert_eq!(&[0u8][..], form.digits());
            assert_eq!(negative, form.is_negative());
            assert_eq!(negative, from_digits(&form).unwrap().is_sign_negative());
        }
    }

    #[test]
    fn roundtrip_across_radices() {
        for radix in [2u32, 4, 8, 16, 32] {
            for value in [
                1.0f64, -1.0, 1.5, -1.5, 0.5, 2.0, 256.0, 0.1, -0.1, 1e30, -1e-30, 12345.6789,
                f64::MAX, f64::MIN_POSITIVE, 5e-324,
            ] {
                let parsed = BigFloat::from_f64(value);
                let form = to_digits(&parsed, radix).expect("failed to convert");
                let back = from_digits(&form).expect("failed to convert back");

                assert_eq!(parsed, back, "{} at radix {}", value, radix);
            }
        }
    }

    #[test]
    fn roundtrip_wide_parts() {
        for radix in [2u32, 8, 32] {
            for (significand, exponent) in [
                (BigInt::from(3) << 300u32 | BigInt::from(1), BigInt::from(-8191)),
                (-(BigInt::from(5) << 100u32 | BigInt::from(1)), BigInt::from(70001)),
            ] {
                let value = BigFloat::from_parts(significand, exponent);
                let back =
                    from_digits(&to_digits(&value, radix).unwrap()).expect("failed to convert");

                assert_eq!(value, back, "radix {}", radix);
            }
        }
    }

    #[test]
    fn rejects_non_power_of_two_radices() {
        for radix in [0u32, 1, 3, 10, 64] {
            assert!(to_digits(&BigFloat::from_i64(1), radix).is_err(), "{}", radix);
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(to_digits(&BigFloat::infinity(false), 16).is_err());
        assert!(to_digits(&BigFloat::nan(false, 0), 16).is_err());
    }

    #[test]
    fn rejects_out_of_range_digits() {
        assert!(RadixDigits::new(8, false, vec![8], 0).is_err());
        assert!(RadixDigits::new(8, false, vec![], 0).is_err());
        assert!(RadixDigits::new(8, false, vec![7, 0], 0).is_ok());
    }

    #[test]
    fn rejects_oversized_exponents() {
        let value = BigFloat::from_parts(1, BigInt::from(i64::MAX) + 1);

        assert!(to_digits(&value, 2).is_err());
        assert!(to_digits(&value, 32).is_ok());
    }
}

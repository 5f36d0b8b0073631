/*!
Order-preserving hexadecimal bitstrings for arbitrary precision binary floating point.

This library converts numbers like `-123.456` into compact hex strings like
`"478"` whose _byte order matches numeric order_: for any two finite,
non-NaN values, `a < b` exactly when `encode(a) < encode(b)` as plain
strings. That makes the encoding usable as a sort key for numbers of
unbounded magnitude and precision in ordered stores — key-value databases,
search indexes, sorted log streams — without the store knowing anything
about numbers.

The encoding is also lossless: decoding gives back a value numerically
identical to the one encoded, including the sign of zero, signed
infinities, and NaN payloads with their signalling state.

# Why another number encoding?

Fixed-width keys (like a big-endian `u64` of flipped sign bits) sort
correctly but cap the range and precision. Text keys have unbounded range
but don't sort (`"10" < "9"`). This encoding has neither problem:

- The value model is an arbitrary precision binary float: any exponent, any
significand, exactly.
- A single tag nibble classifies the value, so negative NaNs, infinities,
finite values, zeros and positive NaNs land in the right order before a
single bit of payload is read.
- Exponents use Levenshtein's universal code, which sorts by value when
compared bitwise, and is inverted on the branches where bigger must mean
earlier.

# Features and limitations

This library only models values and converts them: between [`BigFloat`] and
Rust primitives, between [`BigFloat`] and encoded hex strings, and between
[`BigFloat`] and digit strings in power-of-two radices. It is not decimal
arithmetic; there's no addition or rounding here beyond the saturation the
lossy narrowing conversions call for.

# Examples

Encoding primitives through [`BigFloat`]:

```
use binstr::BigFloat;

let key = binstr::encode(&BigFloat::from_f64(1.5))?;

assert_eq!("b08", key);
assert_eq!(1.5, binstr::decode(&key)?.to_f64());
# Ok::<(), binstr::Error>(())
```

Keys sort the way the numbers do:

```
use binstr::BigFloat;

let mut keys = [-2.0, 256.0, 0.5, -0.25]
    .map(|f| binstr::encode(&BigFloat::from_f64(f)).unwrap());

keys.sort();

assert_eq!(keys, [
    binstr::encode(&BigFloat::from_f64(-2.0)).unwrap(),
    binstr::encode(&BigFloat::from_f64(-0.25)).unwrap(),
    binstr::encode(&BigFloat::from_f64(0.5)).unwrap(),
    binstr::encode(&BigFloat::from_f64(256.0)).unwrap(),
]);
```
*/

/*
If you're exploring the source, the modules stack up like this, leaves first:

- `bits`: bit-level reading and writing over hex characters, with the invert
flag that flips sort sense on negative branches.
- `levenshtein`: the universal integer code used for exponents and payloads.
- `float`: the `BigFloat` value model — normalization, conversions,
comparison.
- `codec`: the tag alphabet and the encode/decode paths tying it together.
- `radix`: the digit-form converter for power-of-two radices.
*/

mod bits;
mod codec;
mod error;
mod float;
mod levenshtein;
mod radix;

pub use crate::{
    codec::{
        decode,
        decode_integer,
        encode,
        encode_integer,
    },
    error::*,
    float::{
        BigFloat,
        Range,
    },
    radix::{
        from_digits,
        to_digits,
        RadixDigits,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    use core::cmp::Ordering;

    use num_bigint::BigInt;

    fn key(value: &BigFloat) -> String {
        encode(value).expect("failed to encode")
    }

    fn random_finite() -> BigFloat {
        // A random significand up to ~128 bits wide and a random exponent up
        // to ~20 bits, both signs
        let significand = BigInt::from(fastrand::u128(1..)) * if fastrand::bool() { -1 } else { 1 };
        let exponent = BigInt::from(fastrand::i32(-1_000_000..1_000_000));

        BigFloat::from_parts(significand, exponent)
    }

    #[test]
    fn codec_roundtrip_structural() {
        let mut values = vec![
            BigFloat::zero(false),
            BigFloat::zero(true),
            BigFloat::infinity(false),
            BigFloat::infinity(true),
            BigFloat::nan(false, 0),
            BigFloat::nan(true, 0),
            BigFloat::nan(false, -1),
            BigFloat::nan(true, 0x123),
            BigFloat::from_i64(0),
            BigFloat::from_i64(1),
            BigFloat::from_i64(-1),
            BigFloat::from_f64(f64::MAX),
            BigFloat::from_f64(-f64::MAX),
            BigFloat::from_f64(5e-324),
        ];

        for _ in 0..2_000 {
            values.push(random_finite());
        }

        for value in &values {
            let decoded = decode(&key(value)).expect("failed to decode");

            assert_eq!(value, &decoded, "{}", value);
        }
    }

    #[test]
    fn codec_roundtrip_doubles() {
        for _ in 0..10_000 {
            let f = f64::from_bits(fastrand::u64(..));
            let value = BigFloat::from_f64(f);
            let decoded = decode(&key(&value)).expect("failed to decode");

            // Structural equality covers NaN payloads too
            assert_eq!(value, decoded, "{:016x}", f.to_bits());
            assert_eq!(f.to_bits(), decoded.to_f64().to_bits(), "{:016x}", f.to_bits());
        }
    }

    #[test]
    fn keys_sort_like_numbers() {
        let values = [-2.0f64, -1.0, -0.0, 0.0, 1.5, 2.0, 256.0];

        let mut keys = values.map(|f| key(&BigFloat::from_f64(f)));
        keys.sort();

        assert_eq!(values.map(|f| key(&BigFloat::from_f64(f))), keys);
    }

    #[test]
    fn keys_order_agrees_with_total_order() {
        for _ in 0..5_000 {
            let (a, b) = if fastrand::bool() {
                (
                    BigFloat::from_f64(f64::from_bits(fastrand::u64(..))),
                    BigFloat::from_f64(f64::from_bits(fastrand::u64(..))),
                )
            } else {
                (random_finite(), random_finite())
            };

            if a.is_nan() || b.is_nan() {
                continue;
            }

            let expected = a.total_cmp(&b);
            let got = key(&a).cmp(&key(&b));

            // The keys of equal values are equal strings, so the orderings
            // agree exactly
            assert_eq!(expected, got, "{} vs {}", a, b);
        }
    }

    #[test]
    fn key_order_breaks_ties_like_ieee() {
        // -0 and +0 get distinct adjacent keys
        assert_eq!(
            Ordering::Less,
            key(&BigFloat::zero(true)).cmp(&key(&BigFloat::zero(false)))
        );
    }

    #[test]
    fn nan_keys_sit_outside_the_infinities() {
        let neg_nan = key(&BigFloat::nan(true, 0));
        let neg_inf = key(&BigFloat::infinity(true));
        let pos_inf = key(&BigFloat::infinity(false));
        let pos_nan = key(&BigFloat::nan(false, 0));
        let finite = key(&BigFloat::from_f64(-1e300));

        assert!(neg_nan < neg_inf);
        assert!(neg_inf < finite);
        assert!(finite < pos_inf);
        assert!(pos_inf < pos_nan);
    }

    #[test]
    fn double_roundtrip_is_bit_exact() {
        for f in [
            0.0f64,
            -0.0,
            1.0,
            -1.0,
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            5e-324,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::from_bits(0x7ff8000000000123),
            f64::from_bits(0x7ff0000000000001),
            f64::from_bits(0xfff8000000000123),
        ] {
            assert_eq!(
                f.to_bits(),
                BigFloat::from_f64(f).to_f64().to_bits(),
                "{:016x}",
                f.to_bits()
            );
        }
    }

    #[test]
    fn negation_roundtrips_through_the_codec() {
        for _ in 0..1_000 {
            let value = random_finite();
            let negated = decode(&key(&value.neg())).expect("failed to decode");

            assert_eq!(value.neg(), negated);
            assert_eq!(value, negated.neg());
        }
    }

    #[test]
    fn normalization_is_invisible_to_the_codec() {
        for shift in [0u32, 1, 7, 64] {
            let a = BigFloat::from_parts(BigInt::from(5) << shift, 3);
            let b = BigFloat::from_parts(5, 3);

            assert_eq!(key(&a), key(&b));
        }
    }

    #[test]
    fn integer_keys_roundtrip_random() {
        for _ in 0..5_000 {
            let value = BigInt::from(fastrand::i64(..));
            let encoded = encode_integer(&value).expect("failed to encode");

            assert_eq!(
                value,
                decode_integer(&encoded).expect("failed to decode"),
                "{}",
                value
            );
        }
    }

    #[test]
    fn integer_key_order_within_a_sign_class() {
        for _ in 0..5_000 {
            let (a, b) = (fastrand::i64(..), fastrand::i64(..));

            if (a < 0) != (b < 0) || a == 0 || b == 0 {
                continue;
            }

            let ka = encode_integer(&BigInt::from(a)).unwrap();
            let kb = encode_integer(&BigInt::from(b)).unwrap();

            assert_eq!(a.cmp(&b), ka.cmp(&kb), "{} vs {}", a, b);
        }
    }

    #[test]
    fn radix_digits_roundtrip_random() {
        for _ in 0..1_000 {
            let value = random_finite();

            for radix in [2u32, 4, 8, 16, 32] {
                let form = to_digits(&value, radix).expect("failed to convert");
                let back = from_digits(&form).expect("failed to convert back");

                assert_eq!(value, back, "{} at radix {}", value, radix);
            }
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        for input in [
            "",
            "x",
            "b8 ",
            "9ffffffffffffffff",
            "60000000000000000",
        ] {
            let err = decode(input).unwrap_err();

            assert!(
                matches!(err.kind(), ErrorKind::Parse(_)),
                "{:?} -> {}",
                input,
                err
            );
        }
    }
}

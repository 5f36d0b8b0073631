/*!
The order-preserving hex encoding.

An encoded number is a tag nibble followed by a Levenshtein-coded exponent
and a nibble-aligned fraction. The tag is chosen so that comparing encoded
strings byte-by-byte reproduces the total order on the values themselves:

| Tag | Meaning |
|-----|---------|
| `0` | negative NaN, positive payload |
| `1` | negative NaN, negative payload |
| `3` | negative infinity |
| `4` | negative significand, positive exponent |
| `5` | negative significand, negative exponent |
| `7` | negative zero |
| `8` | positive zero |
| `a` | positive significand, negative exponent |
| `b` | positive significand, positive exponent |
| `c` | positive infinity |
| `e` | positive NaN, negative payload |
| `f` | positive NaN, positive payload |

Zeros and infinities are a bare tag. Everything else continues with the
Levenshtein encoding of the exponent's absolute value (the NaN payload rides
in the exponent's seat), written through the bit stream with the invert flag
set on the branches where a bigger exponent must sort _earlier_. Those are
exactly the tags with a clear low bit, which is what the decoder keys off.

Two transforms keep the negative branches ordered without a dedicated sign
bit in the body. A negative significand of exactly `-1` has no fraction
bits, so only the exponent's polarity needs flipping: it's encoded as `-e`.
Any other negative significand carries fraction bits whose two's complement
representation borrows from the exponent's position, so it's encoded as the
bitwise complement `!e`. The decoder re-derives which transform applied from
whether the decoded significand turned out to be `-1`.

The fraction is the significand below its leading 1, shifted left onto a
nibble boundary and written in two's complement, raw: its sign already
agrees with the tag group, so the invert flag stays out of it. On decode a
synthesized `0001` or `1110` lead nibble puts the implicit bits back.
*/

use num_bigint::{
    BigInt,
    BigUint,
};
use num_traits::{
    One,
    Signed,
    Zero,
};

use crate::{
    bits::{
        BitReader,
        BitWriter,
    },
    error::ParseError,
    float::{
        strip_trailing_zeros,
        BigFloat,
        Range,
    },
    levenshtein,
    Error,
};

/**
Encode a value as an order-preserving hex string.
*/
pub fn encode(value: &BigFloat) -> Result<String, Error> {
    let mut writer = BitWriter::new();

    match value.range() {
        Range::Finite if value.is_zero() => {
            writer.push_raw_nibble(if value.is_sign_negative() { 0x7 } else { 0x8 });
        }
        Range::Infinite => {
            writer.push_raw_nibble(if value.is_sign_negative() { 0x3 } else { 0xc });
        }
        Range::Nan => {
            let negative = value.is_sign_negative();
            let payload = value.exponent_ref();

            let tag = match (negative, payload.is_negative()) {
                (true, false) => 0x0,
                (true, true) => 0x1,
                (false, true) => 0xe,
                (false, false) => 0xf,
            };

            writer.push_raw_nibble(tag);
            writer.set_invert(tag & 1 == 0);

            levenshtein::encode(&mut writer, payload.magnitude())?;
            writer.pad_to_nibble();
            writer.flush();
        }
        Range::Finite => encode_finite(&mut writer, value)?,
    }

    Ok(writer.finish())
}

fn encode_finite(writer: &mut BitWriter, value: &BigFloat) -> Result<(), Error> {
    let significand = value.significand_ref();
    let negative = significand.is_negative();

    // The stream doesn't carry the value's own exponent on the negative
    // branches; it carries the re-polarized one that keeps byte order
    // agreeing with numeric order
    let exponent = if !negative {
        value.exponent_ref().clone()
    } else if significand.magnitude().is_one() {
        -value.exponent_ref()
    } else {
        -value.exponent_ref() - 1
    };

    let exponent_negative = exponent.is_negative();

    let tag = match (negative, exponent_negative) {
        (false, true) => 0xa,
        (false, false) => 0xb,
        (true, true) => 0x4,
        (true, false) => 0x5,
    };

    writer.push_raw_nibble(tag);
    writer.set_invert(exponent_negative);

    levenshtein::encode(writer, exponent.magnitude())?;
    writer.pad_to_nibble();
    writer.flush();

    // The fraction is already two's complement; the invert flag stays off
    writer.set_invert(false);

    let magnitude = significand.magnitude();
    let fraction_bits = magnitude.bits() - 1;

    if fraction_bits > 0 {
        let pad = (4 - (fraction_bits % 4)) % 4;
        let width = fraction_bits + pad;

        let fraction = (magnitude - (BigUint::one() << fraction_bits)) << pad;
        let fraction = if negative {
            (BigUint::one() << width) - fraction
        } else {
            fraction
        };

        writer.append_big(width, &fraction);
        writer.flush();
    }

    Ok(())
}

/**
Decode an order-preserving hex string back into the value it encodes.

Any failure along the way, from a stray non-hex character to a Levenshtein
preamble that overruns its guard, surfaces as a `ParseError` carrying the
input.
*/
pub fn decode(input: &str) -> Result<BigFloat, Error> {
    decode_value(input).map_err(|err| err.into_parse(input))
}

fn decode_value(input: &str) -> Result<BigFloat, Error> {
    let mut reader = BitReader::new(input);
    let tag = reader.read_bits(4)? as u8;

    match tag {
        0x7 => Ok(BigFloat::zero(true)),
        0x8 => Ok(BigFloat::zero(false)),
        0x3 => Ok(BigFloat::infinity(true)),
        0xc => Ok(BigFloat::infinity(false)),
        0x0 | 0x1 | 0xe | 0xf => {
            let negative = tag < 8;
            let invert = tag & 1 == 0;

            reader.set_invert(invert);

            let magnitude = BigInt::from(levenshtein::decode(&mut reader)?);

            // The tags pair payload polarity with the invert flag directly
            // on the positive side and mirrored on the negative side
            let payload = if invert != negative {
                -magnitude
            } else {
                magnitude
            };

            Ok(BigFloat::nan(negative, payload))
        }
        _ => {
            let negative = tag < 8;
            let invert = tag & 1 == 0;

            reader.set_invert(invert);

            let magnitude = BigInt::from(levenshtein::decode(&mut reader)?);
            let exponent = if invert { -magnitude } else { magnitude };

            // The fraction starts on the next whole nibble
            reader.align_to_nibble();
            reader.set_invert(false);

            let significand = strip_trailing_zeros(reader.read_fraction(negative)?);

            // Undo the encoder's re-polarization
            let exponent = if !negative {
                exponent
            } else if significand.magnitude().is_one() {
                -exponent
            } else {
                -(exponent + BigInt::from(1))
            };

            Ok(BigFloat::from_parts(significand, exponent))
        }
    }
}

/**
Encode a signed integer as a stand-alone sort key.

The key is the Levenshtein encoding of the magnitude, nibble-padded, with
every nibble complemented for a negative integer. Keys of a shared sign sort
byte-wise in numeric order.
*/
pub fn encode_integer(value: &BigInt) -> Result<String, Error> {
    let mut writer = BitWriter::new();

    writer.set_invert(value.is_negative());

    levenshtein::encode(&mut writer, value.magnitude())?;
    writer.pad_to_nibble();
    writer.flush();

    Ok(writer.finish())
}

/**
Decode a stand-alone signed integer sort key.
*/
pub fn decode_integer(input: &str) -> Result<BigInt, Error> {
    decode_integer_value(input).map_err(|err| err.into_parse(input))
}

fn decode_integer_value(input: &str) -> Result<BigInt, Error> {
    // A positive integer's encoding leads with a 1 bit, so its first nibble
    // is 8 or above; zero is exactly "0"; anything else is a complemented
    // negative encoding
    if input == "0" {
        return Ok(BigInt::zero());
    }

    let negative = match input.bytes().next() {
        Some(b'8'..=b'9') | Some(b'a'..=b'f') | Some(b'A'..=b'F') => false,
        Some(_) => true,
        None => return Err(Error::from(ParseError::unexpected_end())),
    };

    let mut reader = BitReader::new(input);
    reader.set_invert(negative);

    let magnitude = BigInt::from(levenshtein::decode(&mut reader)?);

    Ok(if negative { -magnitude } else { magnitude })
}

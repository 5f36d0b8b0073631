/*!
Levenshtein coding for unbounded non-negative integers.

Levenshtein's universal code writes an integer as a unary count of recursion
levels followed by nested length-prefixed binary bodies:

- `0` encodes as the single bit `0`.
- Any other `n` encodes as the low `bit_length(n) - 1` bits of `n` (the
leading 1 is implicit), preceded by the recursive encoding of
`bit_length(n) - 1`, with the whole thing preceded by the level count as a
run of 1 bits terminated by a 0.

So `17` (`10001`) becomes `1111 0` `|` `` `|` `0` `|` `00` `|` `0001`: four
levels, then the bodies of `1`, `2`, `4` and `17`, each with its leading 1
dropped.

The useful property here is that the code is both prefix-free and
order-preserving: a larger integer never compares below a smaller one when the
encodings are compared as plain bit strings. The codec leans on that to keep
encoded exponents sorting in numeric order.

Sign is handled a layer up: the caller flips the bit stream's invert flag
around the body write, which complements the nibbles and reverses the sort
sense for negative values.
*/

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    bits::{
        BitReader,
        BitWriter,
        MAX_INTEGER_BITS,
    },
    error::OverflowError,
    Error,
};

/**
Encode a non-negative integer into the bit stream.

The caller is responsible for nibble-padding the stream afterwards.
*/
pub(crate) fn encode(writer: &mut BitWriter, value: &BigUint) -> Result<(), Error> {
    if value.is_zero() {
        writer.append_bits(1, 0);

        return Ok(());
    }

    // The body of the outermost level is the only one that can be arbitrarily
    // wide, and it's written first, so everything after it is inserted at the
    // head of the buffer in reverse
    writer.append_big(value.bits() - 1, value);

    let mut levels = 1u32;
    let mut length = value.bits() - 1;

    while length >= 1 {
        let width = 64 - length.leading_zeros() - 1;
        writer.insert_bits(width, length & mask(width))?;

        levels += 1;
        length = width as u64;
    }

    // The unary preamble: `levels` ones and a terminating zero
    writer.insert_bits(levels + 1, ((1u64 << levels) - 1) << 1)?;

    Ok(())
}

/**
Decode a non-negative integer from the bit stream.

The caller is responsible for realigning the stream to a nibble boundary
afterwards.
*/
pub(crate) fn decode(reader: &mut BitReader) -> Result<BigUint, Error> {
    let levels = reader.read_unary()?;

    if levels == 0 {
        return Ok(BigUint::zero());
    }

    // Each level reads a field as wide as the previous level's value, under
    // an implicit leading 1. Values stay in a single word until the claimed
    // width gets within range of overflowing it
    let mut small = 1u64;
    let mut level = 1;

    while level < levels {
        if small > 62 {
            return decode_big(reader, small, level, levels);
        }

        small = reader.read_integer(small as u32)?;
        level += 1;
    }

    Ok(BigUint::from(small))
}

fn decode_big(
    reader: &mut BitReader,
    width: u64,
    mut level: u32,
    levels: u32,
) -> Result<BigUint, Error> {
    let mut value = reader.read_big_integer(width)?;
    level += 1;

    while level < levels {
        let width = to_width(&value)?;

        value = reader.read_big_integer(width)?;
        level += 1;
    }

    Ok(value)
}

fn to_width(value: &BigUint) -> Result<u64, Error> {
    match num_traits::ToPrimitive::to_u64(value) {
        Some(width) if width <= MAX_INTEGER_BITS => Ok(width),
        _ => Err(Error::from(OverflowError::would_overflow(
            MAX_INTEGER_BITS,
            u64::MAX,
            "a nested length field exceeds the decoder's integer width",
        ))),
    }
}

fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

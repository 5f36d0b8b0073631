/*!
Total ordering and numeric equality.

The total order puts every value on one line: negative NaNs first, then
negative infinity, finite negatives from most to least negative, the two
zeros, finite positives, positive infinity, and positive NaNs last. NaNs
tie-break on their payload. This is the order the codec's encoded strings
reproduce under plain byte comparison.
*/

use core::cmp::Ordering;

use num_traits::Zero;

use super::{
    BigFloat,
    Range,
};

impl BigFloat {
    /**
    Compare two values under the total order.

    Unlike IEEE 754 comparison this is total: zeros are ordered `-0 < +0`
    and NaNs are ordered by sign and payload.
    */
    pub fn total_cmp(&self, other: &BigFloat) -> Ordering {
        let negative = self.is_sign_negative();

        if negative != other.is_sign_negative() {
            return if negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let magnitude = match self.range.cmp(&other.range) {
            Ordering::Equal => match self.range {
                Range::Infinite => Ordering::Equal,
                Range::Nan => self.exponent.cmp(&other.exponent),
                Range::Finite => cmp_finite_magnitude(self, other),
            },
            // Finite sorts below infinite sorts below NaN for a shared sign
            unequal => unequal,
        };

        // A larger magnitude means a smaller value on the negative side
        if negative {
            magnitude.reverse()
        } else {
            magnitude
        }
    }

    /**
    IEEE 754 style equality: the zeros are equal to each other and a NaN is
    equal to nothing, itself included.
    */
    pub fn eq_number(&self, other: &BigFloat) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }

        if self.is_zero() && other.is_zero() {
            return true;
        }

        self == other
    }
}

fn cmp_finite_magnitude(a: &BigFloat, b: &BigFloat) -> Ordering {
    match (a.significand.is_zero(), b.significand.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => (),
    }

    // The mantissa always lands in [1, 2), so the exponent dominates
    match a.exponent.cmp(&b.exponent) {
        Ordering::Equal => (),
        unequal => return unequal,
    }

    // Same exponent: line the significands up at the same bit length and
    // compare them as integers
    let a_mag = a.significand.magnitude();
    let b_mag = b.significand.magnitude();

    let a_bits = a_mag.bits();
    let b_bits = b_mag.bits();

    if a_bits < b_bits {
        (a_mag << (b_bits - a_bits)).cmp(b_mag)
    } else if b_bits < a_bits {
        (b_mag << (a_bits - b_bits)).cmp(a_mag).reverse()
    } else {
        a_mag.cmp(b_mag)
    }
}

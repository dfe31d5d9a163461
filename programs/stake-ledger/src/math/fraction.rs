use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Greatest common divisor (Euclidean algorithm).
/// `gcd(a, 0) == a`.
pub fn gcd(a: u128, b: u128) -> u128 {
    let mut a = a;
    let mut b = b;
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Exact non-negative rational, always held in lowest terms.
///
/// Embedded in account state to track reward-per-unit values without the
/// truncation that fixed-point scaling accumulates. Every operation
/// produces a new reduced value; intermediate products use checked u128
/// arithmetic and fail with `ArithmeticOverflow` instead of wrapping.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fraction {
    pub num: u128,
    pub den: u128,
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };

    /// Serialized size in account data (two u128 words).
    pub const SIZE: usize = 16 + 16;

    /// Build a reduced fraction. A zero denominator is invalid.
    pub fn new(num: u128, den: u128) -> Result<Fraction> {
        require!(den != 0, LedgerError::InvalidFraction);

        let g = gcd(num, den);
        Ok(Fraction {
            num: num / g,
            den: den / g,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Sum of two fractions: `(n1*d2 + n2*d1) / (d1*d2)`, reduced.
    pub fn checked_add(&self, other: Fraction) -> Result<Fraction> {
        let lhs = self
            .num
            .checked_mul(other.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let rhs = other
            .num
            .checked_mul(self.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let num = lhs.checked_add(rhs).ok_or(LedgerError::ArithmeticOverflow)?;
        let den = self
            .den
            .checked_mul(other.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Fraction::new(num, den)
    }

    /// Difference `self - other`, reduced. Requires `self >= other`; a
    /// negative result fails with `InvalidFraction`.
    pub fn checked_sub(&self, other: Fraction) -> Result<Fraction> {
        let lhs = self
            .num
            .checked_mul(other.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let rhs = other
            .num
            .checked_mul(self.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        require!(lhs >= rhs, LedgerError::InvalidFraction);

        let den = self
            .den
            .checked_mul(other.den)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Fraction::new(lhs - rhs, den)
    }

    /// `floor(k * num / den)` computed entirely in integer arithmetic.
    pub fn scale_floor(&self, k: u64) -> Result<u64> {
        let scaled = (k as u128)
            .checked_mul(self.num)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        // den >= 1 by construction
        let quotient = scaled / self.den;

        u64::try_from(quotient).map_err(|_| error!(LedgerError::ArithmeticOverflow))
    }
}

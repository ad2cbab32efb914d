use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Display always rounds (half away from zero) to 2 decimal places, which is
/// the precision shown for every price and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    /// Highest accepted unit price, $100 000.00. At this price `u32::MAX`
    /// units still fit in the scaled integer.
    pub const MAX_PRICE: Amount = Amount(100_000 * Self::SCALE);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, e.g. `Amount::from_units(1000)` is `1000.00`.
    pub fn from_units(units: i64) -> Self {
        Amount(units * Self::SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `percent`% of this amount, truncated at the internal precision.
    pub fn percent(self, percent: u32) -> Self {
        let scaled = i128::from(self.0) * i128::from(percent) / 100;
        Amount(scaled.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 4 internal places down to cents
        let cents = (self.0.unsigned_abs() + 50) / 100;
        let sign = if self.is_negative() && cents > 0 { "-" } else { "" };
        let whole = cents / 100;
        let frac = cents % 100;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

/// Unit price times a quantity. Saturates rather than overflowing.
impl Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Amount(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

///
/// probability scalar
///
/// plain-space counterpart of a log-space probability wrapper:
/// estimated transition entries are frequency ratios that are often
/// exactly 0, and exact zero detection drives the division guard in
/// the query evaluator.
///
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`
///
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_prob`
///
pub fn p(p: f64) -> Prob {
    Prob::from_prob(p)
}

impl Prob {
    ///
    ///
    pub fn from_prob(value: f64) -> Prob {
        Prob(value)
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` exactly? Degenerate transition rows and engineered
    /// emission columns produce exact zeros, not small values.
    ///
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// Is `p == 1`?
    ///
    pub fn is_one(self) -> bool {
        self.0 == 1.0
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(0.0)
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(1.0)
    }
    ///
    /// abs diff of two probs `= |p_a - p_b|`
    ///
    pub fn diff(&self, other: Prob) -> f64 {
        (self.0 - other.0).abs()
    }
}

///
/// Prob has multiplicative identity element
/// `num_traits::One`
///
impl num_traits::One for Prob {
    fn one() -> Self {
        Prob::one()
    }
}

///
/// Prob has additive identity element
/// `num_traits::Zero`
///
impl num_traits::Zero for Prob {
    fn zero() -> Self {
        Prob::zero()
    }
    fn is_zero(&self) -> bool {
        Prob::is_zero(*self)
    }
}

// display
impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl FromStr for Prob {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<f64>().map(Prob)
    }
}

/// Addition of two probabilities `px + py`
impl std::ops::Add for Prob {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}

/// Multiplication of two probabilities `px * py`
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 * other.0)
    }
}

/// Division of two probabilities `px / py`
///
/// The caller is responsible for checking `py.is_zero()` first; the
/// query evaluator surfaces that case as an explicit error.
impl std::ops::Div for Prob {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Prob(self.0 / other.0)
    }
}

// assign
impl std::ops::AddAssign for Prob {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl std::ops::MulAssign for Prob {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
// sum/prod
impl std::iter::Sum for Prob {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Self> for Prob {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + *b)
    }
}
impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * b)
    }
}
impl<'a> std::iter::Product<&'a Self> for Prob {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * *b)
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for Prob {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};

    #[test]
    fn prob_add_mul() {
        assert_eq!(p(0.0) + p(1.0), p(1.0));
        assert_eq!(p(0.0) * p(1.0), p(0.0));
        assert_abs_diff_eq!(p(0.3) + p(0.3), p(0.6));
        assert_abs_diff_eq!(p(0.3) * p(0.3), p(0.09));
        assert_abs_diff_eq!(p(0.5) + p(0.00001), p(0.50001));
        assert_abs_diff_eq!(p(0.5) * p(0.00001), p(0.000005));
    }
    #[test]
    fn prob_div() {
        assert_abs_diff_eq!(p(0.4) / p(0.5), p(0.8));
        assert_abs_diff_eq!(p(0.5) / p(1.0), p(0.5));
        assert!((p(0.0) / p(0.5)).is_zero());
    }
    #[test]
    fn prob_sum_prod() {
        // sum/prod of zero element vec
        let xs: Vec<Prob> = vec![];
        let sum: Prob = xs.iter().sum();
        let product: Prob = xs.iter().product();
        assert_eq!(sum, p(0.0));
        assert_eq!(product, p(1.0));

        let xs = vec![p(0.1), p(0.1), p(0.1)];
        let sum: Prob = xs.iter().sum();
        let product: Prob = xs.iter().product();
        assert_abs_diff_eq!(sum, p(0.3));
        assert_abs_diff_eq!(product, p(0.001));
    }
    #[test]
    fn prob_zero_one() {
        assert_eq!(Prob::one(), Prob::from_prob(1.0));
        assert_eq!(Prob::zero(), Prob::from_prob(0.0));
        assert!(Prob::zero().is_zero());
        assert!(Prob::one().is_one());
        let nonzero = Prob::from_prob(0.00001);
        assert!(!nonzero.is_zero());
    }
    #[test]
    fn prob_zero_is_exact() {
        // the division guard relies on exact zero, not tolerance
        assert!(!p(1e-300).is_zero());
        assert!((p(0.5) * p(0.0)).is_zero());
    }
    #[test]
    fn test_prob_assign() {
        let mut x = p(0.4);
        x += p(0.2);
        assert_abs_diff_eq!(x, p(0.6));
        x *= p(0.5);
        assert_abs_diff_eq!(x, p(0.3));
        x *= p(0.0);
        assert!(x.is_zero());
    }
    #[test]
    fn prob_assert_eq() {
        assert!(abs_diff_eq!(p(0.1), p(0.1)));
        assert!(!abs_diff_eq!(p(0.1), p(0.2)));
        assert!(abs_diff_eq!(p(0.1), p(0.11), epsilon = 0.1));
    }
    #[test]
    fn prob_serialize() {
        // Display and FromStr
        let p05 = Prob::from_prob(0.5);
        assert_eq!(Prob::from_str(&p05.to_string()).unwrap(), p05);
        assert_eq!(format!("{}", p05), "0.5");

        // serde roundtrip as a plain float
        let json = serde_json::to_string(&p05).unwrap();
        assert_eq!(json, "0.5");
        let back: Prob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p05);
    }
    #[test]
    fn prob_diff() {
        assert_eq!(p(0.5).diff(p(0.5)), 0.0);
        assert_abs_diff_eq!(p(0.5).diff(p(0.3)), 0.2);
        assert_abs_diff_eq!(p(0.3).diff(p(0.5)), 0.2);
    }
}

//! Just-intonation ratio targets.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::cents::ratio_to_cents;

/// A just-intonation interval target, e.g. 3/2 for the pure fifth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustRatio {
    /// Numerator, > 0.
    pub num: u32,
    /// Denominator, > 0.
    pub den: u32,
    /// Display label, e.g. "P5". Cosmetic.
    #[serde(default)]
    pub label: String,
}

impl JustRatio {
    /// Build a labeled ratio.
    pub fn new(num: u32, den: u32, label: &str) -> Self {
        Self {
            num,
            den,
            label: label.to_string(),
        }
    }

    /// Reject degenerate ratios before they reach constraint building.
    pub fn validate(&self) -> Result<()> {
        if self.num == 0 || self.den == 0 {
            bail!("degenerate ratio {}/{}: both terms must be > 0", self.num, self.den);
        }
        Ok(())
    }

    /// Interval size in cents.
    pub fn cents(&self) -> f64 {
        ratio_to_cents(self.num as f64, self.den as f64)
    }

    /// Weight-map key, independent of target ordering.
    pub fn key(&self) -> String {
        format!("{}/{}", self.num, self.den)
    }
}

/// Largest prime factor of `num * den`.
///
/// Classifies a ratio into its prime limit (3-limit, 5-limit, 7-limit...)
/// for the anchor blend affinities.
pub fn prime_limit(num: u32, den: u32) -> u32 {
    let mut n = (num as u64) * (den as u64);
    let mut largest = 1u64;
    let mut p = 2u64;
    while p * p <= n {
        while n % p == 0 {
            largest = p;
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        largest = n;
    }
    largest as u32
}

//! Result of a weighing.

use std::fmt;
use std::iter::Sum;

/// A computed weight with its reliability flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightReport {
    /// Total weight in kg. Unresolved contributions count as zero.
    pub weight: f64,
    /// False when any contributing item could not be weighed.
    pub fully_computable: bool,
}

impl WeightReport {
    /// A reliable weight.
    pub fn exact(weight: f64) -> Self {
        Self {
            weight,
            fully_computable: true,
        }
    }

    /// A weight missing at least one contribution.
    pub fn partial(weight: f64) -> Self {
        Self {
            weight,
            fully_computable: false,
        }
    }

    /// Add another report's weight; the result is only computable if both are.
    pub fn absorb(&mut self, other: WeightReport) {
        self.weight += other.weight;
        self.fully_computable &= other.fully_computable;
    }
}

impl Default for WeightReport {
    fn default() -> Self {
        Self::exact(0.0)
    }
}

impl Sum for WeightReport {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(WeightReport::default(), |mut acc, r| {
            acc.absorb(r);
            acc
        })
    }
}

impl fmt::Display for WeightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.weight)?;
        if !self.fully_computable {
            write!(f, " (incomplete)")?;
        }
        Ok(())
    }
}

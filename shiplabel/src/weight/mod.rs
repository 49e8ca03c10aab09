//! Hierarchical package weighing.
//!
//! The weight of a package is the weight of its enclosure, plus the
//! effective weight of the items put directly into it, plus the weight of
//! every package nested in it:
//!
//! ```text
//! PACK67 (box 0.5)                                    = 13.5
//! ├── PACK65 (box 0.5) 1 × A (2kg), 2 × B (4kg)       = 10.5
//! └── PACK66 (box 0.5) 1 × A (2kg)                    =  2.5
//! ```
//!
//! Weights that cannot be resolved (no declared weight, or a unit of
//! measure that is neither mass nor count) still produce a number, but the
//! [`WeightReport`] is flagged as not fully computable for the package and
//! all of its ancestors.

mod aggregator;
mod report;

pub use aggregator::WeightAggregator;
pub use report::WeightReport;

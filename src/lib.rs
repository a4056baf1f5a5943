//! Exact inference over a one-gene, one-trait inheritance network.
//!
//! Every individual in a pedigree carries 0, 1 or 2 copies of a variant
//! allele and may or may not express a trait that depends on that count.
//! Founders draw their count from a prior, children inherit one allele
//! from each parent with a small chance of mutation. Given observed trait
//! status for some individuals, [`infer`] computes everyone's posterior
//! distributions by enumerating every hidden assignment.
//!
//! ```no_run
//! use heredity::prelude::*;
//!
//! # fn main() -> heredity::Result<()> {
//! let pedigree = Pedigree::from_path("data/family0.csv", &CsvBuilder::new())?;
//! let posteriors = infer(&pedigree, &ProbabilityTables::default())?;
//! print!("{}", posteriors);
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod enumerate;
pub mod error;
pub mod genetics;
pub mod joint;
pub mod observable;
pub mod pedigree;
pub mod posterior;
pub mod tables;

pub use enumerate::{enumerate, infer};
pub use error::{HeredityError, Result};

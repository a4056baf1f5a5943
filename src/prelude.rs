pub use crate::enumerate::{assignment_count, enumerate, infer};
pub use crate::error::HeredityError;
pub use crate::genetics::GeneCount;
pub use crate::joint::{joint_probability, Assignment};
pub use crate::observable::{Csv, CsvBuilder, Record};
pub use crate::pedigree::{Individual, Parents, Pedigree};
pub use crate::posterior::{GeneDistribution, Posterior, Posteriors, TraitDistribution};
pub use crate::tables::ProbabilityTables;

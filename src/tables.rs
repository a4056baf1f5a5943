//! Conditional probability tables of the inheritance network.
//!
//! The defaults describe a single gene with a rare variant and a trait that
//! is more likely to be expressed the more copies of the variant a person
//! carries. Alternative tables can be loaded from JSON, e.g.
//!
//! ```json
//! { "gene_prior": [0.96, 0.03, 0.01], "trait_given_gene": [0.01, 0.56, 0.65], "mutation": 0.01 }
//! ```
//!
//! Arrays are indexed by gene count. Omitted fields keep their defaults.

use crate::error::{HeredityError, Result};
use crate::genetics::GeneCount;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// P(genes = g) for an individual with no recorded parents.
pub const GENE_PRIOR: [f64; 3] = [0.96, 0.03, 0.01];

/// P(trait = true | genes = g).
pub const TRAIT_GIVEN_GENE: [f64; 3] = [0.01, 0.56, 0.65];

/// Probability that a transmitted allele flips state.
pub const MUTATION_RATE: f64 = 0.01;

/// Read-only parameters of the network for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbabilityTables {
    pub gene_prior: [f64; 3],
    pub trait_given_gene: [f64; 3],
    pub mutation: f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            gene_prior: GENE_PRIOR,
            trait_given_gene: TRAIT_GIVEN_GENE,
            mutation: MUTATION_RATE,
        }
    }
}

impl ProbabilityTables {
    /// Parses and validates tables from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let tables: Self = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Parses and validates tables from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeredityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "probability tables loaded");
        Ok(tables)
    }

    /// Checks that every entry is a probability and that the gene prior is
    /// a distribution.
    pub fn validate(&self) -> Result<()> {
        let entries = self
            .gene_prior
            .iter()
            .map(|p| ("gene_prior", *p))
            .chain(self.trait_given_gene.iter().map(|p| ("trait_given_gene", *p)))
            .chain(std::iter::once(("mutation", self.mutation)));
        for (table, p) in entries {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(HeredityError::Tables(format!(
                    "{} entry {} is not a probability",
                    table, p
                )));
            }
        }

        let total: f64 = self.gene_prior.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(HeredityError::Tables(format!(
                "gene_prior sums to {}, expected 1",
                total
            )));
        }
        Ok(())
    }

    /// Unconditional probability of `genes` for a founder.
    pub fn gene_prior(&self, genes: GeneCount) -> f64 {
        self.gene_prior[genes.index()]
    }

    /// P(trait = `has_trait` | `genes`).
    pub fn trait_probability(&self, genes: GeneCount, has_trait: bool) -> f64 {
        let expressed = self.trait_given_gene[genes.index()];
        if has_trait {
            expressed
        } else {
            1.0 - expressed
        }
    }

    pub fn mutation(&self) -> f64 {
        self.mutation
    }
}

//! The family pedigree: who is related to whom and what has been observed.
//!
//! Individuals are kept in input order and addressed by index during
//! inference. Parent names are resolved to indices once, when the pedigree
//! is built, so a loaded `Pedigree` is always internally consistent.

use crate::error::{HeredityError, Result};
use crate::observable::{CsvBuilder, Record};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Indices of an individual's mother and father within the pedigree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: usize,
    pub father: usize,
}

#[derive(Debug, Clone)]
pub struct Individual {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    evidence: Option<bool>,
    parents: Option<Parents>,
}

impl Individual {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mother(&self) -> Option<&str> {
        self.mother.as_deref()
    }

    pub fn father(&self) -> Option<&str> {
        self.father.as_deref()
    }

    /// Observed trait status, if recorded.
    pub fn evidence(&self) -> Option<bool> {
        self.evidence
    }

    /// Resolved parents, `None` for a founder.
    pub fn parents(&self) -> Option<Parents> {
        self.parents
    }

    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Pedigree {
    individuals: Vec<Individual>,
    index: HashMap<String, usize>,
}

impl Pedigree {
    /// Builds a pedigree from records, e.g. the output of a `Csv` reader.
    ///
    /// Fails with `HeredityError::Load` when there are no records, a name is
    /// repeated, only one parent is recorded, a parent does not name another
    /// record, or someone appears among their own ancestors.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut individuals = vec![];
        let mut index = HashMap::new();
        for record in records {
            let record = record?;
            if index.contains_key(&record.name) {
                return Err(HeredityError::Load(format!(
                    "individual '{}' is listed more than once",
                    record.name
                )));
            }
            index.insert(record.name.clone(), individuals.len());
            individuals.push(Individual {
                name: record.name,
                mother: record.mother,
                father: record.father,
                evidence: record.evidence,
                parents: None,
            });
        }

        if individuals.is_empty() {
            return Err(HeredityError::Load("no individuals found".into()));
        }

        for individual in individuals.iter_mut() {
            individual.parents = match (&individual.mother, &individual.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => Some(Parents {
                    mother: resolve(&index, &individual.name, mother)?,
                    father: resolve(&index, &individual.name, father)?,
                }),
                _ => {
                    return Err(HeredityError::Load(format!(
                        "'{}' must have both parents recorded or neither",
                        individual.name
                    )))
                }
            };
        }

        let pedigree = Self { individuals, index };
        pedigree.check_acyclic()?;
        info!(
            individuals = pedigree.len(),
            founders = pedigree.individuals.iter().filter(|i| i.is_founder()).count(),
            observed = pedigree.individuals.iter().filter(|i| i.evidence.is_some()).count(),
            "pedigree loaded"
        );
        Ok(pedigree)
    }

    /// Reads a pedigree table from `path`.
    pub fn from_path<P: AsRef<Path>>(path: P, csv: &CsvBuilder) -> Result<Self> {
        Self::from_records(csv.from_path(path)?)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always false for a loaded pedigree.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// All individuals in input order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.individuals.iter().map(|i| i.name())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Individual> {
        self.position(name).map(|i| &self.individuals[i])
    }

    /// Indices of the individuals without trait evidence.
    pub fn unobserved(&self) -> Vec<usize> {
        self.individuals
            .iter()
            .enumerate()
            .filter(|(_, individual)| individual.evidence.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        fn visit(pedigree: &Pedigree, i: usize, marks: &mut [Mark]) -> Result<()> {
            match marks[i] {
                Mark::Done => return Ok(()),
                Mark::Active => {
                    return Err(HeredityError::Load(format!(
                        "'{}' appears among their own ancestors",
                        pedigree.individuals[i].name
                    )))
                }
                Mark::New => {}
            }
            marks[i] = Mark::Active;
            if let Some(parents) = pedigree.individuals[i].parents {
                visit(pedigree, parents.mother, marks)?;
                visit(pedigree, parents.father, marks)?;
            }
            marks[i] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::New; self.len()];
        for i in 0..self.len() {
            visit(self, i, &mut marks)?;
        }
        debug!("pedigree ancestry is acyclic");
        Ok(())
    }
}

fn resolve(index: &HashMap<String, usize>, child: &str, parent: &str) -> Result<usize> {
    index.get(parent).copied().ok_or_else(|| {
        HeredityError::Load(format!(
            "parent '{}' of '{}' is not listed in the pedigree",
            parent, child
        ))
    })
}

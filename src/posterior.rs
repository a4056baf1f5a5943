//! Per-individual probability mass over gene counts and trait status.
//!
//! Mass is accumulated into two matrices with one row per individual: gene
//! columns are indexed by `GeneCount::index`, trait columns by `has_trait as
//! usize`. Normalizing divides each row by its sum.

use crate::error::{HeredityError, Result};
use crate::genetics::GeneCount;
use crate::joint::Assignment;
use crate::pedigree::Pedigree;
use ndarray;
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub struct Posteriors {
    names: Vec<String>,
    genes: ndarray::Array2<f64>,
    traits: ndarray::Array2<f64>,
}

/// Distribution over gene counts, keyed by count in the JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneDistribution {
    #[serde(rename = "2")]
    pub two: f64,
    #[serde(rename = "1")]
    pub one: f64,
    #[serde(rename = "0")]
    pub zero: f64,
}

impl GeneDistribution {
    pub fn get(&self, genes: GeneCount) -> f64 {
        match genes {
            GeneCount::Two => self.two,
            GeneCount::One => self.one,
            GeneCount::Zero => self.zero,
        }
    }

    pub fn sum(&self) -> f64 {
        self.two + self.one + self.zero
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraitDistribution {
    #[serde(rename = "true")]
    pub present: f64,
    #[serde(rename = "false")]
    pub absent: f64,
}

impl TraitDistribution {
    pub fn get(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.present
        } else {
            self.absent
        }
    }

    pub fn sum(&self) -> f64 {
        self.present + self.absent
    }
}

/// Both distributions for one individual.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior {
    pub name: String,
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub trait_: TraitDistribution,
}

impl Posteriors {
    /// Zero mass for every individual of `pedigree`.
    pub fn new(pedigree: &Pedigree) -> Self {
        let n = pedigree.len();
        Self {
            names: pedigree.names().map(String::from).collect(),
            genes: ndarray::Array2::zeros((n, GeneCount::ALL.len())),
            traits: ndarray::Array2::zeros((n, 2)),
        }
    }

    /// Adds `p` to each individual's gene count and trait value in
    /// `assignment`.
    pub fn accumulate(&mut self, assignment: &Assignment, p: f64) {
        for i in 0..self.names.len() {
            self.genes[[i, assignment.genes(i).index()]] += p;
            self.traits[[i, assignment.has_trait(i) as usize]] += p;
        }
    }

    /// Mass accumulated so far. Every assignment touches every row, so any
    /// row's sum is the total.
    pub fn total_mass(&self) -> f64 {
        if self.names.is_empty() {
            return 0.0;
        }
        self.genes.row(0).sum()
    }

    /// Rescales every distribution to sum to 1.
    ///
    /// A distribution without mass cannot be rescaled and is reported as
    /// `HeredityError::DataInconsistency`; nothing is modified in that case.
    pub fn normalize(&mut self) -> Result<()> {
        let gene_totals = self.genes.sum_axis(ndarray::Axis(1));
        let trait_totals = self.traits.sum_axis(ndarray::Axis(1));
        for (kind, totals) in [("gene", &gene_totals), ("trait", &trait_totals)].iter() {
            if let Some(i) = totals.iter().position(|total| !(*total > 0.0)) {
                return Err(HeredityError::DataInconsistency(format!(
                    "{} distribution of '{}' has no probability mass; the evidence cannot be explained",
                    kind, self.names[i]
                )));
            }
        }

        ndarray::Zip::from(self.genes.genrows_mut())
            .and(&gene_totals)
            .apply(|mut row, total| row.mapv_inplace(|x| x / *total));
        ndarray::Zip::from(self.traits.genrows_mut())
            .and(&trait_totals)
            .apply(|mut row, total| row.mapv_inplace(|x| x / *total));
        debug!(individuals = self.names.len(), "posteriors normalized");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Distributions for the individual at `index` in pedigree order.
    pub fn posterior(&self, index: usize) -> Posterior {
        let genes = self.genes.row(index);
        let traits = self.traits.row(index);
        Posterior {
            name: self.names[index].clone(),
            gene: GeneDistribution {
                two: genes[GeneCount::Two.index()],
                one: genes[GeneCount::One.index()],
                zero: genes[GeneCount::Zero.index()],
            },
            trait_: TraitDistribution {
                present: traits[1],
                absent: traits[0],
            },
        }
    }

    pub fn get(&self, name: &str) -> Option<Posterior> {
        self.names.iter().position(|n| n == name).map(|i| self.posterior(i))
    }

    /// Posteriors in pedigree order.
    pub fn iter(&self) -> impl Iterator<Item = Posterior> + '_ {
        (0..self.names.len()).map(move |i| self.posterior(i))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.iter().collect::<Vec<_>>())?)
    }
}

impl fmt::Display for Posteriors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for posterior in self.iter() {
            writeln!(f, "{}:", posterior.name)?;
            writeln!(f, "  Gene:")?;
            for genes in GeneCount::ALL.iter().rev() {
                writeln!(f, "    {}: {:.4}", genes, posterior.gene.get(*genes))?;
            }
            writeln!(f, "  Trait:")?;
            writeln!(f, "    True: {:.4}", posterior.trait_.present)?;
            writeln!(f, "    False: {:.4}", posterior.trait_.absent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Record;
    use std::error::Error;

    fn pair() -> crate::error::Result<Pedigree> {
        Pedigree::from_records(vec![Ok(Record::new("A")), Ok(Record::new("B").evidence(true))])
    }

    #[test]
    fn test_accumulate_then_normalize() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = pair()?;
        let mut posteriors = Posteriors::new(&pedigree);
        posteriors.accumulate(
            &Assignment::from_parts(vec![GeneCount::Two, GeneCount::Zero], vec![false, true]),
            0.3,
        );
        posteriors.accumulate(
            &Assignment::from_parts(vec![GeneCount::One, GeneCount::Zero], vec![true, true]),
            0.1,
        );
        assert!((posteriors.total_mass() - 0.4).abs() < 1e-12);

        posteriors.normalize()?;
        let a = posteriors.get("A").unwrap();
        assert!((a.gene.two - 0.75).abs() < 1e-12);
        assert!((a.gene.one - 0.25).abs() < 1e-12);
        assert_eq!(a.gene.zero, 0.0);
        assert!((a.trait_.absent - 0.75).abs() < 1e-12);

        let b = posteriors.get("B").unwrap();
        assert_eq!(b.gene.zero, 1.0);
        assert_eq!(b.trait_.present, 1.0);
        assert_eq!(b.trait_.absent, 0.0);
        Ok(())
    }

    #[test]
    fn test_zero_mass_is_data_inconsistency() -> std::result::Result<(), Box<dyn Error>> {
        let mut posteriors = Posteriors::new(&pair()?);
        let err = posteriors.normalize().unwrap_err();
        assert!(matches!(err, HeredityError::DataInconsistency(msg) if msg.contains("'A'")));
        Ok(())
    }

    #[test]
    fn test_text_report_layout() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = Pedigree::from_records(vec![Ok(Record::new("A"))])?;
        let mut posteriors = Posteriors::new(&pedigree);
        posteriors.accumulate(&Assignment::from_parts(vec![GeneCount::One], vec![true]), 1.0);
        posteriors.normalize()?;
        assert_eq!(
            posteriors.to_string(),
            "A:\n  Gene:\n    2: 0.0000\n    1: 1.0000\n    0: 0.0000\n  Trait:\n    True: 1.0000\n    False: 0.0000\n"
        );
        Ok(())
    }

    #[test]
    fn test_json_report_uses_value_keys() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = Pedigree::from_records(vec![Ok(Record::new("A"))])?;
        let mut posteriors = Posteriors::new(&pedigree);
        posteriors.accumulate(&Assignment::from_parts(vec![GeneCount::Zero], vec![false]), 0.5);
        posteriors.normalize()?;
        let json: serde_json::Value = serde_json::from_str(&posteriors.to_json()?)?;
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[0]["gene"]["0"], 1.0);
        assert_eq!(json[0]["trait"]["false"], 1.0);
        Ok(())
    }
}

//! Exact inference by enumerating every hidden assignment.
//!
//! Gene counts range over all 3^n combinations. Traits of observed
//! individuals are pinned to their evidence, so only the 2^k trait
//! combinations of the k unobserved individuals are visited; any other
//! trait combination contradicts the evidence and carries no mass.

use crate::error::Result;
use crate::joint::{joint_probability, Assignment};
use crate::pedigree::Pedigree;
use crate::posterior::Posteriors;
use crate::tables::ProbabilityTables;
use tracing::{debug, info};

/// Number of hidden assignments `enumerate` will score, saturating at
/// `u64::MAX`.
pub fn assignment_count(pedigree: &Pedigree) -> u64 {
    let genes = 3u64.checked_pow(pedigree.len() as u32);
    let traits = 2u64.checked_pow(pedigree.unobserved().len() as u32);
    genes
        .zip(traits)
        .and_then(|(genes, traits)| genes.checked_mul(traits))
        .unwrap_or(u64::MAX)
}

/// Accumulates the joint probability of every assignment consistent with
/// the evidence into unnormalized posteriors.
pub fn enumerate(pedigree: &Pedigree, tables: &ProbabilityTables) -> Posteriors {
    info!(
        individuals = pedigree.len(),
        assignments = assignment_count(pedigree),
        "enumerating hidden assignments"
    );

    let free = pedigree.unobserved();
    let mut posteriors = Posteriors::new(pedigree);
    let mut assignment = Assignment::first(pedigree);
    loop {
        loop {
            let p = joint_probability(pedigree, tables, &assignment);
            posteriors.accumulate(&assignment, p);
            if !assignment.advance_genes() {
                break;
            }
        }
        if !assignment.advance_traits(&free) {
            break;
        }
    }
    debug!(total_mass = posteriors.total_mass(), "enumeration finished");
    posteriors
}

/// Posterior gene count and trait distributions for every individual.
pub fn infer(pedigree: &Pedigree, tables: &ProbabilityTables) -> Result<Posteriors> {
    let mut posteriors = enumerate(pedigree, tables);
    posteriors.normalize()?;
    Ok(posteriors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeredityError;
    use crate::genetics::GeneCount;
    use crate::observable::Record;
    use std::error::Error;

    fn build(records: Vec<Record>) -> crate::error::Result<Pedigree> {
        Pedigree::from_records(records.into_iter().map(Ok))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_evidence_mass_sums_to_one() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![Record::new("P"), Record::new("C").parents("P", "P")])?;
        let posteriors = enumerate(&pedigree, &ProbabilityTables::default());
        assert!(close(posteriors.total_mass(), 1.0));

        let pedigree = build(vec![
            Record::new("M"),
            Record::new("F"),
            Record::new("C").parents("M", "F"),
        ])?;
        let posteriors = enumerate(&pedigree, &ProbabilityTables::default());
        assert!(close(posteriors.total_mass(), 1.0));
        Ok(())
    }

    #[test]
    fn test_founders_without_evidence_keep_the_prior() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![
            Record::new("M"),
            Record::new("F"),
            Record::new("C").parents("M", "F"),
        ])?;
        let posteriors = infer(&pedigree, &ProbabilityTables::default())?;
        for name in &["M", "F"] {
            let gene = posteriors.get(name).unwrap().gene;
            assert!(close(gene.two, 0.01));
            assert!(close(gene.one, 0.03));
            assert!(close(gene.zero, 0.96));
        }
        Ok(())
    }

    #[test]
    fn test_observed_trait_is_certain() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![
            Record::new("M").evidence(false),
            Record::new("F"),
            Record::new("C").parents("M", "F").evidence(true),
        ])?;
        let posteriors = infer(&pedigree, &ProbabilityTables::default())?;
        let child = posteriors.get("C").unwrap();
        assert_eq!(child.trait_.present, 1.0);
        assert_eq!(child.trait_.absent, 0.0);
        let mother = posteriors.get("M").unwrap();
        assert_eq!(mother.trait_.present, 0.0);
        assert_eq!(mother.trait_.absent, 1.0);
        Ok(())
    }

    #[test]
    fn test_child_trait_shifts_everyone_toward_the_variant() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![
            Record::new("A"),
            Record::new("B"),
            Record::new("C").parents("A", "B").evidence(true),
        ])?;
        let posteriors = infer(&pedigree, &ProbabilityTables::default())?;
        for posterior in posteriors.iter() {
            assert!(close(posterior.gene.sum(), 1.0));
            assert!(close(posterior.trait_.sum(), 1.0));
            assert!(posterior.gene.zero < 0.96);
            assert!(posterior.gene.two > 0.01);
        }
        let child = posteriors.get("C").unwrap().gene;
        let parent = posteriors.get("A").unwrap().gene;
        assert!(child.get(GeneCount::Zero) < parent.get(GeneCount::Zero));
        Ok(())
    }

    #[test]
    fn test_inference_is_repeatable() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![
            Record::new("Harry").parents("Lily", "James"),
            Record::new("James").evidence(true),
            Record::new("Lily").evidence(false),
        ])?;
        let tables = ProbabilityTables::default();
        let first: Vec<_> = infer(&pedigree, &tables)?.iter().collect();
        let second: Vec<_> = infer(&pedigree, &tables)?.iter().collect();
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_unexplainable_evidence_is_data_inconsistency() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![Record::new("A").evidence(true)])?;
        let tables = ProbabilityTables {
            trait_given_gene: [0.0, 0.0, 0.0],
            ..ProbabilityTables::default()
        };
        let err = infer(&pedigree, &tables).err().unwrap();
        assert!(matches!(err, HeredityError::DataInconsistency(_)));
        Ok(())
    }

    #[test]
    fn test_assignment_count() -> std::result::Result<(), Box<dyn Error>> {
        let pedigree = build(vec![
            Record::new("A"),
            Record::new("B").evidence(true),
            Record::new("C").parents("A", "B"),
        ])?;
        assert_eq!(assignment_count(&pedigree), 27 * 4);

        let many: Vec<Record> = (0..64).map(|i| Record::new(&format!("p{}", i))).collect();
        assert_eq!(assignment_count(&build(many)?), u64::MAX);
        Ok(())
    }
}

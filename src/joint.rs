//! Joint probability of one complete hidden assignment.

use crate::genetics::{inheritance_probability, transmission_probability, GeneCount};
use crate::pedigree::Pedigree;
use crate::tables::ProbabilityTables;

/// A gene count and a trait value for every individual, indexed in
/// pedigree order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl Assignment {
    /// Everyone at zero copies, observed individuals at their evidence and
    /// everyone else without the trait.
    pub fn first(pedigree: &Pedigree) -> Self {
        Self {
            genes: vec![GeneCount::Zero; pedigree.len()],
            traits: pedigree
                .individuals()
                .iter()
                .map(|i| i.evidence().unwrap_or(false))
                .collect(),
        }
    }

    pub fn from_parts(genes: Vec<GeneCount>, traits: Vec<bool>) -> Self {
        assert_eq!(genes.len(), traits.len(), "one gene count and trait per individual");
        Self { genes, traits }
    }

    pub fn genes(&self, individual: usize) -> GeneCount {
        self.genes[individual]
    }

    pub fn has_trait(&self, individual: usize) -> bool {
        self.traits[individual]
    }

    /// Steps the gene counts to the next combination, treating them as a
    /// base-3 counter. Returns false, with all counts back at zero, once
    /// every combination has been visited.
    pub fn advance_genes(&mut self) -> bool {
        for genes in self.genes.iter_mut() {
            match genes.next() {
                Some(next) => {
                    *genes = next;
                    return true;
                }
                None => *genes = GeneCount::Zero,
            }
        }
        false
    }

    /// Steps the traits of `free` individuals to the next combination,
    /// treating them as a binary counter. Other traits are left alone.
    pub fn advance_traits(&mut self, free: &[usize]) -> bool {
        for &i in free {
            if !self.traits[i] {
                self.traits[i] = true;
                return true;
            }
            self.traits[i] = false;
        }
        false
    }
}

/// Probability of `assignment` under the inheritance network.
///
/// The network factorizes per individual: founders draw their gene count
/// from the prior, children inherit one allele from each parent, and the
/// trait depends only on the individual's own gene count.
pub fn joint_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    assignment: &Assignment,
) -> f64 {
    let mut probability = 1.0;
    for (i, individual) in pedigree.individuals().iter().enumerate() {
        let genes = assignment.genes(i);
        let gene_probability = match individual.parents() {
            None => tables.gene_prior(genes),
            Some(parents) => inheritance_probability(
                genes,
                transmission_probability(assignment.genes(parents.mother), tables.mutation()),
                transmission_probability(assignment.genes(parents.father), tables.mutation()),
            ),
        };
        probability *= gene_probability * tables.trait_probability(genes, assignment.has_trait(i));
    }
    probability
}

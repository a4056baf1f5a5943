use std::fmt;

/// Number of copies of the variant allele an individual carries.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// All gene counts in ascending order, matching [`GeneCount::index`].
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Column of this count in per-count tables.
    pub fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The next count up, or `None` after `Two`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Zero => Some(Self::One),
            Self::One => Some(Self::Two),
            Self::Two => None,
        }
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Probability that a parent carrying `parent` copies passes the variant on.
///
/// A parent with one copy passes either allele with equal chance. Otherwise
/// the passed allele is fixed by the parent and only flips through mutation.
pub fn transmission_probability(parent: GeneCount, mutation: f64) -> f64 {
    match parent {
        GeneCount::Two => 1.0 - mutation,
        GeneCount::One => 0.5,
        GeneCount::Zero => mutation,
    }
}

/// Probability that a child ends up with `child` copies given the
/// transmission probabilities of its mother and father.
pub fn inheritance_probability(child: GeneCount, mother: f64, father: f64) -> f64 {
    match child {
        GeneCount::Two => mother * father,
        GeneCount::One => mother * (1.0 - father) + (1.0 - mother) * father,
        GeneCount::Zero => (1.0 - mother) * (1.0 - father),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmission_follows_parent_count() {
        assert_eq!(transmission_probability(GeneCount::Two, 0.01), 0.99);
        assert_eq!(transmission_probability(GeneCount::One, 0.01), 0.5);
        assert_eq!(transmission_probability(GeneCount::Zero, 0.01), 0.01);
    }

    #[test]
    fn test_inheritance_sums_to_one() {
        for mother in GeneCount::ALL.iter() {
            for father in GeneCount::ALL.iter() {
                let m = transmission_probability(*mother, 0.01);
                let f = transmission_probability(*father, 0.01);
                let total: f64 = GeneCount::ALL
                    .iter()
                    .map(|child| inheritance_probability(*child, m, f))
                    .sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_heterozygous_parents_give_mendelian_ratios() {
        assert_eq!(inheritance_probability(GeneCount::Two, 0.5, 0.5), 0.25);
        assert_eq!(inheritance_probability(GeneCount::One, 0.5, 0.5), 0.5);
        assert_eq!(inheritance_probability(GeneCount::Zero, 0.5, 0.5), 0.25);
    }

    #[test]
    fn test_next_walks_counts_in_order() {
        assert_eq!(GeneCount::Zero.next(), Some(GeneCount::One));
        assert_eq!(GeneCount::One.next(), Some(GeneCount::Two));
        assert_eq!(GeneCount::Two.next(), None);
        assert_eq!(GeneCount::Two.to_string(), "2");
    }
}

use super::rank::Rank;

/// Tie-breaking ranks, highest first.
///
/// Only ever compared between hands of the same Ranking class, where the
/// lists have equal length, so the derived lexicographic Ord is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kickers(Vec<Rank>);

impl From<Vec<Rank>> for Kickers {
    fn from(mut ranks: Vec<Rank>) -> Self {
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        Self(ranks)
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in self.0.iter() {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

use super::rank::Rank;

/// Hand classes in ascending poker order.
///
/// The derived Ord does the class comparison; payload Ranks break ties
/// within a class, and anything finer is left to Kickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    Trips(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    Quads(Rank),
    StraightFlush(Rank),
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "HighCard      {} ", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {} ", r),
            Ranking::TwoPair(a, b) => write!(f, "TwoPair       {}{}", a, b),
            Ranking::Trips(r) => write!(f, "Trips         {} ", r),
            Ranking::Straight(r) => write!(f, "Straight      {} ", r),
            Ranking::Flush(r) => write!(f, "Flush         {} ", r),
            Ranking::FullHouse(a, b) => write!(f, "FullHouse     {}{}", a, b),
            Ranking::Quads(r) => write!(f, "Quads         {} ", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_order() {
        assert!(Ranking::HighCard(Rank::Ace) < Ranking::OnePair(Rank::Two));
        assert!(Ranking::Flush(Rank::Two) < Ranking::FullHouse(Rank::Two, Rank::Three));
        assert!(Ranking::Quads(Rank::Ace) < Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn payload_order() {
        assert!(Ranking::OnePair(Rank::Ten) < Ranking::OnePair(Rank::Jack));
        assert!(
            Ranking::TwoPair(Rank::Ace, Rank::Ten) > Ranking::TwoPair(Rank::Ace, Rank::Nine)
        );
    }
}

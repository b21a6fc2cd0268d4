use super::card::Card;
use super::kickers::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;

/// A hand's showdown strength: a total order over card sets.
///
/// Built by rank and suit counting over any 5-7 cards. The round state
/// machine consumes only the Ord instance; higher wins, equal splits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    fn new(ranking: Ranking, kickers: Kickers) -> Self {
        Self { ranking, kickers }
    }
}

impl From<&[Card]> for Strength {
    fn from(cards: &[Card]) -> Self {
        let mut counts = [0u8; 13];
        let mut suits = [0u16; 4];
        let mut ranks = 0u16;
        for card in cards {
            counts[card.rank() as usize] += 1;
            suits[card.suit() as usize] |= u16::from(card.rank());
            ranks |= u16::from(card.rank());
        }
        let flush = suits.iter().copied().find(|s| s.count_ones() >= 5);
        if let Some(high) = flush.and_then(straight) {
            return Self::new(Ranking::StraightFlush(high), Kickers::default());
        }
        if let Some(quad) = repeated(&counts, 4, None) {
            return Self::new(Ranking::Quads(quad), top(ranks & !u16::from(quad), 1));
        }
        if let Some(trip) = repeated(&counts, 3, None) {
            if let Some(pair) = repeated(&counts, 2, Some(trip)) {
                return Self::new(Ranking::FullHouse(trip, pair), Kickers::default());
            }
        }
        if let Some(suited) = flush {
            let mut five = descending(suited).take(5).collect::<Vec<Rank>>();
            let high = five.remove(0);
            return Self::new(Ranking::Flush(high), Kickers::from(five));
        }
        if let Some(high) = straight(ranks) {
            return Self::new(Ranking::Straight(high), Kickers::default());
        }
        if let Some(trip) = repeated(&counts, 3, None) {
            return Self::new(Ranking::Trips(trip), top(ranks & !u16::from(trip), 2));
        }
        if let Some(hi) = repeated(&counts, 2, None) {
            return match repeated(&counts, 2, Some(hi)) {
                Some(lo) => Self::new(
                    Ranking::TwoPair(hi, lo),
                    top(ranks & !u16::from(hi) & !u16::from(lo), 1),
                ),
                None => Self::new(Ranking::OnePair(hi), top(ranks & !u16::from(hi), 3)),
            };
        }
        let high = descending(ranks).next().expect("at least one card");
        Self::new(Ranking::HighCard(high), top(ranks & !u16::from(high), 4))
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.ranking, self.kickers)
    }
}

/// highest rank appearing at least `n` times, optionally skipping one rank
fn repeated(counts: &[u8; 13], n: u8, skip: Option<Rank>) -> Option<Rank> {
    Rank::all()
        .iter()
        .rev()
        .filter(|r| Some(**r) != skip)
        .find(|r| counts[**r as usize] >= n)
        .copied()
}

/// highest rank completing five in a row, wheel included
fn straight(mask: u16) -> Option<Rank> {
    for high in (4..13usize).rev() {
        let window = 0b11111u16 << (high - 4);
        if mask & window == window {
            return Some(Rank::all()[high]);
        }
    }
    const WHEEL: u16 = 0b1_0000_0000_1111;
    (mask & WHEEL == WHEEL).then_some(Rank::Five)
}

/// ranks present in `mask`, highest first
fn descending(mask: u16) -> impl Iterator<Item = Rank> {
    Rank::all()
        .iter()
        .rev()
        .copied()
        .filter(move |r| mask & u16::from(*r) != 0)
}

/// the `n` highest ranks in `mask` as kickers
fn top(mask: u16, n: usize) -> Kickers {
    Kickers::from(descending(mask).take(n).collect::<Vec<Rank>>())
}

use super::card::Card;
use super::hole::Hole;
use super::rank::Rank;
use super::suit::Suit;

/// An ordered, shuffled 52-card sequence with a deal cursor. Hole cards come
/// off the top; the cards behind them are the board, visible through `peek`
/// without being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: usize,
}

impl Deck {
    pub fn shuffled(rng: &mut impl rand::Rng) -> Self {
        use rand::seq::SliceRandom;
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::all() {
            for suit in Suit::all() {
                cards.push(Card::from((*rank, *suit)));
            }
        }
        cards.shuffle(rng);
        Self { cards, dealt: 0 }
    }

    pub fn draw(&mut self) -> Card {
        assert!(self.dealt < self.cards.len());
        let card = self.cards[self.dealt];
        self.dealt += 1;
        card
    }

    /// deal the next two cards as a Hole
    pub fn hole(&mut self) -> Hole {
        Hole::from((self.draw(), self.draw()))
    }

    /// view the next `n` undealt cards without consuming them
    pub fn peek(&self, n: usize) -> &[Card] {
        &self.cards[self.dealt..self.dealt + n]
    }
}

/// Vec<Card> isomorphism, cursor at the top
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards, dealt: 0 }
    }
}

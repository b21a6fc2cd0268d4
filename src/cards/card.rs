use super::rank::Rank;
use super::suit::Suit;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// str isomorphism over tokens like "As" or "Td"
/// fallible on the way in; the bad token is returned for error reporting
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => Ok(Self {
                rank: Rank::try_from(r).map_err(|_| s.to_string())?,
                suit: Suit::try_from(u).map_err(|_| s.to_string())?,
            }),
            _ => Err(s.to_string()),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl crate::Arbitrary for Card {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        Self {
            rank: Rank::all()[rng.random_range(0..13)],
            suit: Suit::all()[rng.random_range(0..4)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn bijective_str() {
        let card = Card::random();
        assert_eq!(card, Card::try_from(card.to_string().as_str()).unwrap());
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(Card::try_from("").is_err());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Asx").is_err());
        assert!(Card::try_from("1s").is_err());
        assert!(Card::try_from("Az").is_err());
    }
}

use super::error::ProtocolError;
use crate::Chips;
use crate::Position;
use crate::cards::card::Card;
use crate::cards::hole::Hole;
use crate::round::action::Action;

/// One wire clause. A message is several clauses joined by single spaces on
/// one newline-terminated ASCII line; the leading byte selects the clause.
///
/// Display is the encoder and TryFrom<&str> the decoder; they are strict
/// inverses on every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// T - seconds remaining in the participant's budget
    Clock(f64),
    /// P - seat index whose context follows
    Seat(Position),
    /// H - hole cards dealt to the seat named by the preceding P
    Dealt(Hole),
    /// B - board cards revealed this street
    Board(Vec<Card>),
    /// O - opponent hole cards revealed at a non-fold showdown
    Shown(Hole),
    /// F/C/K/R - an action taken or to take
    Move(Action),
    /// D - net chip delta for the hand just completed
    Delta(Chips),
    /// Q - terminate the session
    Quit,
}

impl Clause {
    /// join clauses into one wire line, newline not included
    pub fn line(clauses: &[Clause]) -> String {
        clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Clock(t) => write!(f, "T{:.3}", t),
            Self::Seat(p) => write!(f, "P{}", p),
            Self::Dealt(hole) => write!(f, "H{}", csv(&hole.cards())),
            Self::Board(cards) => write!(f, "B{}", csv(cards)),
            Self::Shown(hole) => write!(f, "O{}", csv(&hole.cards())),
            Self::Move(Action::Fold) => write!(f, "F"),
            Self::Move(Action::Call) => write!(f, "C"),
            Self::Move(Action::Check) => write!(f, "K"),
            Self::Move(Action::Raise(to)) => write!(f, "R{}", to),
            Self::Delta(d) => write!(f, "D{}", d),
            Self::Quit => write!(f, "Q"),
        }
    }
}

impl TryFrom<&str> for Clause {
    type Error = ProtocolError;
    fn try_from(s: &str) -> Result<Self, ProtocolError> {
        let code = s.chars().next().ok_or(ProtocolError::Empty)?;
        let rest = &s[code.len_utf8()..];
        match code {
            'T' => rest
                .parse::<f64>()
                .map(Self::Clock)
                .map_err(|_| malformed(s)),
            'P' => match rest.parse::<Position>() {
                Ok(p) if p < crate::N => Ok(Self::Seat(p)),
                _ => Err(malformed(s)),
            },
            'H' => Ok(Self::Dealt(hole(rest)?)),
            'B' => Ok(Self::Board(cards(rest)?)),
            'O' => Ok(Self::Shown(hole(rest)?)),
            'F' if rest.is_empty() => Ok(Self::Move(Action::Fold)),
            'C' if rest.is_empty() => Ok(Self::Move(Action::Call)),
            'K' if rest.is_empty() => Ok(Self::Move(Action::Check)),
            'R' => rest
                .parse::<Chips>()
                .map(|to| Self::Move(Action::Raise(to)))
                .map_err(|_| malformed(s)),
            'D' => rest.parse::<Chips>().map(Self::Delta).map_err(|_| malformed(s)),
            'Q' if rest.is_empty() => Ok(Self::Quit),
            'F' | 'C' | 'K' | 'Q' => Err(malformed(s)),
            _ => Err(ProtocolError::UnknownCode(code)),
        }
    }
}

fn malformed(s: &str) -> ProtocolError {
    ProtocolError::Malformed(s.to_string())
}

fn csv(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

fn cards(csv: &str) -> Result<Vec<Card>, ProtocolError> {
    csv.split(',')
        .map(|t| Card::try_from(t).map_err(ProtocolError::Malformed))
        .collect()
}

fn hole(csv: &str) -> Result<Hole, ProtocolError> {
    match cards(csv)?[..] {
        [a, b] if a != b => Ok(Hole::from((a, b))),
        _ => Err(malformed(csv)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(clause: Clause) {
        assert_eq!(clause, Clause::try_from(clause.to_string().as_str()).unwrap());
    }

    #[test]
    fn actions_roundtrip() {
        roundtrip(Clause::Move(Action::Fold));
        roundtrip(Clause::Move(Action::Call));
        roundtrip(Clause::Move(Action::Check));
        roundtrip(Clause::Move(Action::Raise(5)));
        roundtrip(Clause::Move(Action::Raise(crate::STACK)));
    }

    #[test]
    fn state_clauses_roundtrip() {
        roundtrip(Clause::Seat(0));
        roundtrip(Clause::Seat(1));
        roundtrip(Clause::Delta(-23));
        roundtrip(Clause::Delta(400));
        roundtrip(Clause::Quit);
        let a = Card::try_from("As").unwrap();
        let k = Card::try_from("Kd").unwrap();
        let q = Card::try_from("Qh").unwrap();
        roundtrip(Clause::Dealt(Hole::from((a, k))));
        roundtrip(Clause::Shown(Hole::from((k, q))));
        roundtrip(Clause::Board(vec![a, k, q]));
    }

    #[test]
    fn clock_encodes_millis() {
        assert_eq!(Clause::Clock(29.9999).to_string(), "T30.000");
        assert_eq!(
            Clause::try_from("T0.050").unwrap(),
            Clause::Clock(0.05),
        );
    }

    #[test]
    fn unknown_code_is_an_error_not_a_fault() {
        assert_eq!(Clause::try_from("X"), Err(ProtocolError::UnknownCode('X')));
        assert_eq!(Clause::try_from(""), Err(ProtocolError::Empty));
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(Clause::try_from("R").is_err());
        assert!(Clause::try_from("Rten").is_err());
        assert!(Clause::try_from("R12.5").is_err());
        assert!(Clause::try_from("P7").is_err());
        assert!(Clause::try_from("F2").is_err());
        assert!(Clause::try_from("HAs").is_err());
        assert!(Clause::try_from("HAs,As").is_err());
        assert!(Clause::try_from("BAs,Kz").is_err());
    }

    #[test]
    fn lines_join_with_spaces() {
        let line = Clause::line(&[
            Clause::Clock(30.0),
            Clause::Seat(1),
            Clause::Move(Action::Raise(12)),
        ]);
        assert_eq!(line, "T30.000 P1 R12");
    }
}

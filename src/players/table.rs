use crate::B_BLIND;
use crate::Chips;
use crate::Position;
use crate::S_BLIND;
use crate::STACK;
use crate::cards::card::Card;
use crate::cards::hole::Hole;
use crate::protocol::clause::Clause;
use crate::round::action::Action;

/// A participant's simplified view of the hand in progress, replayed from
/// the engine's clause stream. Tracks only what a bot can see: the betting
/// state, its own hole cards, and the revealed board.
#[derive(Debug, Clone)]
pub struct Table {
    pub seat: Position,
    pub button: usize,
    pub pips: [Chips; 2],
    pub stacks: [Chips; 2],
    pub hole: Hole,
    pub board: Vec<Card>,
}

impl Table {
    /// start of a hand, blinds already posted
    pub fn deal(seat: Position, hole: Hole) -> Self {
        Self {
            seat,
            button: 0,
            pips: [S_BLIND, B_BLIND],
            stacks: [STACK - S_BLIND, STACK - B_BLIND],
            hole,
            board: Vec::new(),
        }
    }

    fn active(&self) -> Position {
        self.button % crate::N
    }

    /// chips this seat must add to continue
    pub fn to_call(&self) -> Chips {
        self.pips[1 - self.seat] - self.pips[self.seat]
    }

    pub fn pot(&self) -> Chips {
        2 * STACK - self.stacks[0] - self.stacks[1]
    }

    /// replay one engine clause into the local view. Street boundaries
    /// arrive as Board clauses, which reset the pips and the turn order.
    pub fn apply(&mut self, clause: &Clause) {
        match clause {
            Clause::Move(Action::Call) if self.button == 0 => {
                self.pips = [B_BLIND; 2];
                self.stacks = [STACK - B_BLIND; 2];
                self.button = 1;
            }
            Clause::Move(Action::Call) => {
                let active = self.active();
                let cost = self.pips[1 - active] - self.pips[active];
                self.stacks[active] -= cost;
                self.pips[active] += cost;
                self.button += 1;
            }
            Clause::Move(Action::Raise(to)) => {
                let active = self.active();
                let cost = to - self.pips[active];
                self.stacks[active] -= cost;
                self.pips[active] += cost;
                self.button += 1;
            }
            Clause::Move(_) => self.button += 1,
            Clause::Board(cards) => {
                self.board = cards.clone();
                self.pips = [0, 0];
                self.button = 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn replays_the_preflop_completion() {
        let mut table = Table::deal(1, Hole::random());
        assert_eq!(table.to_call(), 0);
        table.apply(&Clause::Move(Action::Call));
        assert_eq!(table.pips, [B_BLIND; 2]);
        assert_eq!(table.stacks, [STACK - B_BLIND; 2]);
        assert_eq!(table.button, 1);
    }

    #[test]
    fn replays_a_bet_and_call() {
        let mut table = Table::deal(0, Hole::random());
        table.apply(&Clause::Move(Action::Call));
        table.apply(&Clause::Move(Action::Check));
        table.apply(&Clause::Board(Vec::new()));
        table.apply(&Clause::Move(Action::Raise(10)));
        assert_eq!(table.pips, [0, 10]);
        assert_eq!(table.to_call(), 10);
        assert_eq!(table.pot(), 14);
        table.apply(&Clause::Move(Action::Call));
        assert_eq!(table.stacks, [STACK - 12, STACK - 12]);
        assert_eq!(table.pot(), 24);
    }
}

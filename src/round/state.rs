use super::action::Action;
use super::terminal::TerminalState;
use crate::B_BLIND;
use crate::Chips;
use crate::Position;
use crate::S_BLIND;
use crate::STACK;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::cards::strength::Strength;

/// A hand in flight or settled; the continuation type of `proceed`.
#[derive(Debug, Clone)]
pub enum Round {
    Live(RoundState),
    Done(TerminalState),
}

/// One hand in progress.
///
/// Transitions are pure: `proceed` consumes the state and returns its
/// successor, threading the consumed state into the successor's back-chain.
/// `button % 2` names the seat required to act; its magnitude counts the
/// actions taken this street, which is what decides when a street is over.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub button: usize,
    pub street: Street,
    pub pips: [Chips; 2],
    pub stacks: [Chips; 2],
    pub hands: [Hole; 2],
    pub deck: Deck,
    pub previous: Option<Box<RoundState>>,
}

impl RoundState {
    /// fresh hand: shuffle, deal both holes, post the blinds
    pub fn deal(rng: &mut impl rand::Rng) -> Self {
        let mut deck = Deck::shuffled(rng);
        let hands = [deck.hole(), deck.hole()];
        Self {
            button: 0,
            street: Street::Preflop,
            pips: [S_BLIND, B_BLIND],
            stacks: [STACK - S_BLIND, STACK - B_BLIND],
            hands,
            deck,
            previous: None,
        }
    }

    /// seat required to act
    pub fn active(&self) -> Position {
        self.button % crate::N
    }
    /// chips the active seat must add to match the opponent's pip
    pub fn continue_cost(&self) -> Chips {
        self.pips[1 - self.active()] - self.pips[self.active()]
    }
    /// board cards revealed so far
    pub fn board(&self) -> &[Card] {
        self.deck.peek(self.street.reveals())
    }

    /// what the active seat may do right now. Raise carries the minimum
    /// legal target; `raise_bounds` gives the full inclusive range.
    pub fn legal_actions(&self) -> Vec<Action> {
        let active = self.active();
        if self.continue_cost() == 0 {
            // an all-in on either side locks further betting for both
            if self.stacks[0] == 0 || self.stacks[1] == 0 {
                vec![Action::Check]
            } else {
                vec![Action::Check, Action::Raise(self.raise_bounds().0)]
            }
        } else {
            // re-raising needs both seats able to put more behind it
            if self.continue_cost() == self.stacks[active] || self.stacks[1 - active] == 0 {
                vec![Action::Fold, Action::Call]
            } else {
                vec![Action::Fold, Action::Call, Action::Raise(self.raise_bounds().0)]
            }
        }
    }

    /// inclusive absolute chip targets for a legal raise: at least one big
    /// blind over the current bet, at most what the shorter stack can match
    pub fn raise_bounds(&self) -> (Chips, Chips) {
        let active = self.active();
        let cost = self.continue_cost();
        let most = std::cmp::min(self.stacks[active], self.stacks[1 - active] + cost);
        let least = std::cmp::min(most, self.pips[1 - active] + std::cmp::max(cost, B_BLIND));
        (self.pips[active] + least, self.pips[active] + most)
    }

    pub fn is_legal(&self, action: &Action) -> bool {
        match action {
            Action::Raise(to) => {
                let (min, max) = self.raise_bounds();
                action.within(&self.legal_actions()) && min <= *to && *to <= max
            }
            _ => action.within(&self.legal_actions()),
        }
    }

    /// apply one action and return the successor. Being handed an illegal
    /// action is an invariant violation, unreachable through the session's
    /// validation contract.
    pub fn proceed(self, action: Action) -> Round {
        assert!(self.is_legal(&action), "illegal {:?}", action);
        let active = self.active();
        match action {
            Action::Fold => {
                let delta = match active {
                    0 => self.stacks[0] - STACK,
                    _ => STACK - self.stacks[1],
                };
                Round::Done(TerminalState {
                    deltas: [delta, -delta],
                    previous: Box::new(self),
                })
            }
            // the small blind completing is special: both blinds are posted
            // in full, and the big blind keeps its preflop option
            Action::Call if self.button == 0 => Round::Live(Self {
                button: 1,
                street: Street::Preflop,
                pips: [B_BLIND; 2],
                stacks: [STACK - B_BLIND; 2],
                hands: self.hands,
                deck: self.deck.clone(),
                previous: Some(Box::new(self)),
            }),
            Action::Call => {
                let mut pips = self.pips;
                let mut stacks = self.stacks;
                let cost = pips[1 - active] - pips[active];
                stacks[active] -= cost;
                pips[active] += cost;
                let settled = Self {
                    button: self.button + 1,
                    street: self.street,
                    pips,
                    stacks,
                    hands: self.hands,
                    deck: self.deck.clone(),
                    previous: Some(Box::new(self)),
                };
                settled.advance()
            }
            Action::Check => {
                if (self.street == Street::Preflop && self.button > 0) || self.button > 1 {
                    self.advance()
                } else {
                    Round::Live(Self {
                        button: self.button + 1,
                        street: self.street,
                        pips: self.pips,
                        stacks: self.stacks,
                        hands: self.hands,
                        deck: self.deck.clone(),
                        previous: Some(Box::new(self)),
                    })
                }
            }
            Action::Raise(to) => {
                let mut pips = self.pips;
                let mut stacks = self.stacks;
                let cost = to - pips[active];
                stacks[active] -= cost;
                pips[active] += cost;
                Round::Live(Self {
                    button: self.button + 1,
                    street: self.street,
                    pips,
                    stacks,
                    hands: self.hands,
                    deck: self.deck.clone(),
                    previous: Some(Box::new(self)),
                })
            }
        }
    }

    /// the street is settled: reveal the next cards or go to showdown
    fn advance(self) -> Round {
        match self.street {
            Street::River => Round::Done(self.showdown()),
            street => Round::Live(Self {
                button: 1,
                street: street.next(),
                pips: [0, 0],
                stacks: self.stacks,
                hands: self.hands,
                deck: self.deck.clone(),
                previous: Some(Box::new(self)),
            }),
        }
    }

    /// compare both seats' board-plus-hole strength. Higher wins the whole
    /// pot; equal splits the stack difference by floor division, awarding
    /// any odd chip to no one.
    fn showdown(self) -> TerminalState {
        let strengths = self.hands.map(|hole| {
            let mut seven = self.deck.peek(5).to_vec();
            seven.extend(hole.cards());
            Strength::from(seven.as_slice())
        });
        let delta = match strengths[0].cmp(&strengths[1]) {
            std::cmp::Ordering::Greater => STACK - self.stacks[1],
            std::cmp::Ordering::Less => self.stacks[0] - STACK,
            std::cmp::Ordering::Equal => (self.stacks[0] - self.stacks[1]).div_euclid(2),
        };
        TerminalState {
            deltas: [delta, -delta],
            previous: Box::new(self),
        }
    }
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        write!(
            f,
            "{} {:>4}+{:<3} {:>4}+{:<3} P{}",
            format!("{:7}", self.street).bright_green(),
            self.stacks[0],
            self.pips[0],
            self.stacks[1],
            self.pips[1],
            self.active(),
        )
    }
}

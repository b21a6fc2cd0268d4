use super::state::RoundState;
use crate::Chips;

/// The end of one hand: the signed chip delta for each seat, zero-sum, plus
/// the state the final action was applied to. Terminal states are never
/// advanced further; the back-chain exists only for transcript
/// reconstruction.
#[derive(Debug, Clone)]
pub struct TerminalState {
    pub deltas: [Chips; 2],
    pub previous: Box<RoundState>,
}

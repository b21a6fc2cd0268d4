use crate::Chips;

/// The four moves a participant may make. Raise carries the absolute chip
/// target it raises to, never a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Check,
    Raise(Chips),
}

impl Action {
    /// same variant, ignoring any Raise amount
    pub fn alike(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
    /// variant membership in a legal set, ignoring any Raise amount
    pub fn within(&self, legal: &[Self]) -> bool {
        legal.iter().any(|a| a.alike(self))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Call => write!(f, "call"),
            Self::Check => write!(f, "check"),
            Self::Raise(to) => write!(f, "raise to {}", to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_ignore_amounts() {
        assert!(Action::Raise(8).alike(&Action::Raise(400)));
        assert!(!Action::Raise(8).alike(&Action::Call));
        assert!(Action::Raise(8).within(&[Action::Fold, Action::Call, Action::Raise(4)]));
        assert!(!Action::Check.within(&[Action::Fold, Action::Call]));
    }
}

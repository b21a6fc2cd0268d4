use crate::cards::card::Card;
use anyhow::Context;
use std::path::Path;

/// The authoritative human-readable match log: blinds, deals, reveals,
/// every action phrased per seat, per-hand awards, and the closing bankroll
/// summary. One artifact per match.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            lines: vec![format!("pitboss - {} vs {}", left, right)],
        }
    }

    pub fn push(&mut self, line: String) {
        log::debug!("{}", line);
        self.lines.push(line);
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.lines.join("\n") + "\n")
            .with_context(|| format!("write transcript {}", path.display()))
    }

    /// bracketed card list: [As Kd Qh]
    pub fn pretty(cards: &[Card]) -> String {
        format!(
            "[{}]",
            cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_brackets() {
        let cards = ["As", "Kd", "Qh"]
            .iter()
            .map(|s| Card::try_from(*s).unwrap())
            .collect::<Vec<Card>>();
        assert_eq!(Transcript::pretty(&cards), "[As Kd Qh]");
        assert_eq!(Transcript::pretty(&[]), "[]");
    }
}

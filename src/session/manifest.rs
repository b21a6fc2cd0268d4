use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// A participant's `commands.json`: how to build it and how to run it. The
/// run command receives the assigned port as its final argument.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub build: Vec<String>,
    pub run: Vec<String>,
}

impl Manifest {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join("commands.json");
        let file = std::fs::File::open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        serde_json::from_reader(file).with_context(|| format!("parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_commands() {
        let manifest: Manifest = serde_json::from_str(
            r#"{"build": ["make"], "run": ["./player"]}"#,
        )
        .unwrap();
        assert_eq!(manifest.build, vec!["make"]);
        assert_eq!(manifest.run, vec!["./player"]);
    }

    #[test]
    fn rejects_missing_keys() {
        assert!(serde_json::from_str::<Manifest>(r#"{"build": []}"#).is_err());
        assert!(serde_json::from_str::<Manifest>(r#"{"run": "./player"}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error_not_a_fault() {
        assert!(Manifest::load(Path::new("no/such/dir")).is_err());
    }
}

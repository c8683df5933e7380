use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mathlab.toml";

/// Settings read from `mathlab.toml`. Every field is optional in the file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sequence loaded at startup and saved on exit.
    #[serde(default = "default_sequence_file")]
    pub sequence_file: PathBuf,

    /// Where `ef` writes its results.
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,

    /// Prompt printed before each REPL command.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Save the sequence when the REPL exits.
    #[serde(default = "default_true")]
    pub save_on_exit: bool,
}

fn default_sequence_file() -> PathBuf {
    PathBuf::from("sequence.txt")
}

fn default_results_file() -> PathBuf {
    PathBuf::from(session::session::DEFAULT_RESULTS_FILE)
}

fn default_prompt() -> String {
    ">".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sequence_file: default_sequence_file(),
            results_file: default_results_file(),
            prompt: default_prompt(),
            save_on_exit: true,
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Config, String> {
        toml::from_str(source).map_err(|e| format!("TOML parse error: {}", e))
    }

    /// Read the config from `explicit` if given (it must exist), otherwise
    /// from `mathlab.toml` in `dir` if present, otherwise use defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Config, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    return Ok(Config::default());
                }
                candidate
            }
        };
        let source = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        let config = Config::from_toml(&source)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_toml(
            "sequence_file = \"chain.txt\"\nprompt = \"mathlab> \"\nsave_on_exit = false\n",
        )
        .unwrap();
        assert_eq!(config.sequence_file, PathBuf::from("chain.txt"));
        assert_eq!(config.results_file, PathBuf::from("eval_results.txt"));
        assert_eq!(config.prompt, "mathlab> ");
        assert!(!config.save_on_exit);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("colour = true").unwrap_err();
        assert!(err.starts_with("TOML parse error"));
    }

    #[test]
    fn missing_default_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(None, dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("other.toml");
        assert!(Config::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn default_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "results_file = \"r.txt\"").unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.results_file, PathBuf::from("r.txt"));
    }
}

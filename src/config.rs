use std::path::PathBuf;

use teloxide::types::ChatId;
use thiserror::Error;

use crate::quiz::session::QuizSettings;

pub const BANK_PATH_VAR: &str = "QUIZ_BANK_PATH";
pub const QUESTION_COUNT_VAR: &str = "QUIZ_QUESTION_COUNT";
pub const PASS_THRESHOLD_VAR: &str = "QUIZ_PASS_THRESHOLD";
pub const RESULTS_CHAT_VAR: &str = "QUIZ_RESULTS_CHAT_ID";

const DEFAULT_BANK_PATH: &str = "questions.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bank_path: PathBuf,
    pub settings: QuizSettings,
    /// Chat that receives result payloads. No host shell without it.
    pub results_chat: Option<ChatId>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QuizSettings::default();

        let bank_path: PathBuf = lookup(BANK_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BANK_PATH.to_string())
            .into();

        let question_count = parse_var(&lookup, QUESTION_COUNT_VAR)?.unwrap_or(defaults.question_count);
        let pass_threshold = parse_var(&lookup, PASS_THRESHOLD_VAR)?.unwrap_or(defaults.pass_threshold);
        let results_chat = parse_var::<i64, _>(&lookup, RESULTS_CHAT_VAR)?.map(ChatId);

        Ok(Self {
            bank_path,
            settings: QuizSettings {
                question_count,
                pass_threshold,
            },
            results_chat,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(var) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bank_path, PathBuf::from("questions.json"));
        assert_eq!(config.settings.question_count, 20);
        assert_eq!(config.settings.pass_threshold, 16);
        assert!(config.results_chat.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            (BANK_PATH_VAR, "/data/bank.json"),
            (QUESTION_COUNT_VAR, "4"),
            (PASS_THRESHOLD_VAR, " 3 "),
            (RESULTS_CHAT_VAR, "-100123"),
        ])
        .unwrap();
        assert_eq!(config.bank_path, PathBuf::from("/data/bank.json"));
        assert_eq!(config.settings.question_count, 4);
        assert_eq!(config.settings.pass_threshold, 3);
        assert_eq!(config.results_chat, Some(ChatId(-100123)));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[(QUESTION_COUNT_VAR, ""), (RESULTS_CHAT_VAR, "  ")]).unwrap();
        assert_eq!(config.settings.question_count, 20);
        assert!(config.results_chat.is_none());
    }

    #[test]
    fn rejects_non_numbers() {
        let err = config(&[(QUESTION_COUNT_VAR, "twenty")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { var: QUESTION_COUNT_VAR, .. }
        ));

        let err = config(&[(PASS_THRESHOLD_VAR, "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }
}

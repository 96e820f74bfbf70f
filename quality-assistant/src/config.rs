// Configuration loading and parsing (config/assistant.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lookup::template::QUESTION_PLACEHOLDER;

/// Upper bound on `lookup.delay_ms`.
pub const MAX_LOOKUP_DELAY_MS: u64 = 60_000;

/// Example shortcuts are bound to Alt+1..Alt+9.
pub const MAX_EXAMPLES: usize = 9;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// assistant.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub lookup: LookupConfig,
    pub examples: ExamplesConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssistantConfig {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LookupConfig {
    /// Simulated latency of each lookup.
    pub delay_ms: u64,
    /// Result text; `{question}` is replaced by the submitted question.
    pub template: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExamplesConfig {
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TuiConfig {
    pub frame_interval_ms: u64,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/assistant.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("assistant.toml");
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text without validating it.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/assistant.toml` to `config/assistant.toml` if the latter
/// is missing. Returns the path written, or `None` when an existing config
/// was kept.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join("assistant.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("assistant.toml");

    // User-edited config wins
    if target.exists() {
        return Ok(None);
    }
    if !default_path.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the crate root",
                target.display(),
                default_path.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy defaults to {}: {e}", target.display()),
    })?;
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Copies the default config first if none exists yet.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.assistant.title.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "assistant.title".into(),
            message: "must not be blank".into(),
        });
    }

    if config.lookup.delay_ms > MAX_LOOKUP_DELAY_MS {
        return Err(ConfigError::ValidationError {
            field: "lookup.delay_ms".into(),
            message: format!(
                "must be at most {MAX_LOOKUP_DELAY_MS}, got {}",
                config.lookup.delay_ms
            ),
        });
    }

    if !config.lookup.template.contains(QUESTION_PLACEHOLDER) {
        return Err(ConfigError::ValidationError {
            field: "lookup.template".into(),
            message: format!("must contain the {QUESTION_PLACEHOLDER} placeholder"),
        });
    }

    let questions = &config.examples.questions;
    if questions.is_empty() || questions.len() > MAX_EXAMPLES {
        return Err(ConfigError::ValidationError {
            field: "examples.questions".into(),
            message: format!("must list 1 to {MAX_EXAMPLES} questions, got {}", questions.len()),
        });
    }
    if let Some(i) = questions.iter().position(|q| q.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: format!("examples.questions[{i}]"),
            message: "must not be blank".into(),
        });
    }

    if config.tui.frame_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "tui.frame_interval_ms".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper: returns the path to the quality-assistant crate root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("quality-assistant/defaults").exists() {
            cwd.join("quality-assistant")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn default_config() -> Config {
        let path = project_root().join("defaults/assistant.toml");
        let text = fs::read_to_string(&path).unwrap();
        parse_config(&text, &path).unwrap()
    }

    /// Write `text` as config/assistant.toml under a fresh temp directory.
    fn temp_config_dir(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/assistant.toml"), text).unwrap();
        tmp
    }

    fn expect_validation_field(config: &Config, expected: &str) {
        match validate(config).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn defaults_parse_and_validate() {
        let config = default_config();
        validate(&config).expect("defaults should be valid");

        assert_eq!(config.assistant.title, "研发质量助手");
        assert_eq!(config.lookup.delay_ms, 1000);
        assert_eq!(config.lookup.template, "针对 \"{question}\" 的结果");
        assert_eq!(
            config.examples.questions,
            vec![
                "如何优化代码性能？".to_string(),
                "什么是敏捷开发方法论？".to_string(),
                "如何确保代码安全性？".to_string(),
            ]
        );
        assert_eq!(config.tui.frame_interval_ms, 33);
    }

    #[test]
    fn load_config_from_reads_config_dir() {
        let text = fs::read_to_string(project_root().join("defaults/assistant.toml")).unwrap();
        let tmp = temp_config_dir("qa_config_test_load", &text);
        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config, default_config());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = std::env::temp_dir().join("qa_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("config/assistant.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tmp = temp_config_dir("qa_config_test_malformed", "[lookup\ndelay_ms = ");
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let tmp = temp_config_dir(
            "qa_config_test_missing_section",
            "[assistant]\ntitle = \"x\"\n",
        );
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_blank_title() {
        let mut config = default_config();
        config.assistant.title = "  ".into();
        expect_validation_field(&config, "assistant.title");
    }

    #[test]
    fn rejects_excessive_delay() {
        let mut config = default_config();
        config.lookup.delay_ms = MAX_LOOKUP_DELAY_MS + 1;
        expect_validation_field(&config, "lookup.delay_ms");
    }

    #[test]
    fn zero_delay_is_allowed() {
        let mut config = default_config();
        config.lookup.delay_ms = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let mut config = default_config();
        config.lookup.template = "static answer".into();
        expect_validation_field(&config, "lookup.template");
    }

    #[test]
    fn rejects_empty_examples() {
        let mut config = default_config();
        config.examples.questions.clear();
        expect_validation_field(&config, "examples.questions");
    }

    #[test]
    fn rejects_too_many_examples() {
        let mut config = default_config();
        config.examples.questions = (0..=MAX_EXAMPLES).map(|i| format!("q{i}")).collect();
        expect_validation_field(&config, "examples.questions");
    }

    #[test]
    fn rejects_blank_example() {
        let mut config = default_config();
        config.examples.questions[1] = " ".into();
        expect_validation_field(&config, "examples.questions[1]");
    }

    #[test]
    fn rejects_zero_frame_interval() {
        let mut config = default_config();
        config.tui.frame_interval_ms = 0;
        expect_validation_field(&config, "tui.frame_interval_ms");
    }

    #[test]
    fn ensure_config_file_copies_missing_and_keeps_existing() {
        let tmp = std::env::temp_dir().join("qa_config_test_ensure");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/assistant.toml"), "default").unwrap();

        let copied = ensure_config_file(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config/assistant.toml")));
        assert_eq!(
            fs::read_to_string(tmp.join("config/assistant.toml")).unwrap(),
            "default"
        );

        fs::write(tmp.join("config/assistant.toml"), "edited").unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        assert_eq!(
            fs::read_to_string(tmp.join("config/assistant.toml")).unwrap(),
            "edited"
        );

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_config_without_defaults() {
        let tmp = temp_config_dir("qa_config_test_no_defaults", "kept");
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_any_source() {
        let tmp = std::env::temp_dir().join("qa_config_test_no_dirs");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            ensure_config_file(&tmp).unwrap_err(),
            ConfigError::DefaultsCopyError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }
}

//! Process-wide harness configuration.
//!
//! `HarnessConfig` is read once from `.env` and the environment, then cached for
//! the lifetime of the process. Only ambient concerns live here; the grading
//! plan itself is never driven by the environment.

use once_cell::sync::OnceCell;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
}

static CONFIG: OnceCell<HarnessConfig> = OnceCell::new();

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            project_name: "tester".into(),
            log_level: "tester=info,marker=info".into(),
            log_dir: "logs".into(),
            log_file: "tester.log".into(),
            log_to_stdout: false,
        }
    }
}

impl HarnessConfig {
    /// Builds a configuration from the current environment, falling back to
    /// [`HarnessConfig::default`] for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            project_name: env::var("PROJECT_NAME").unwrap_or(defaults.project_name),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            log_file: env::var("LOG_FILE").unwrap_or(defaults.log_file),
            log_to_stdout: env::var("LOG_TO_STDOUT")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.log_to_stdout),
        }
    }

    /// Loads `env_path` (if present) and initialises the global configuration.
    ///
    /// Later calls return the instance created by the first one.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = ["PROJECT_NAME", "LOG_LEVEL", "LOG_DIR", "LOG_FILE", "LOG_TO_STDOUT"];

    fn clear_env() {
        for key in KEYS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        clear_env();
        let config = HarnessConfig::from_env();
        assert_eq!(config, HarnessConfig::default());
        assert!(!config.log_to_stdout);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        unsafe {
            env::set_var("PROJECT_NAME", "lab-3");
            env::set_var("LOG_LEVEL", "marker=debug");
            env::set_var("LOG_DIR", "/tmp/grading");
            env::set_var("LOG_FILE", "lab3.log");
            env::set_var("LOG_TO_STDOUT", "TRUE");
        }

        let config = HarnessConfig::from_env();
        assert_eq!(config.project_name, "lab-3");
        assert_eq!(config.log_level, "marker=debug");
        assert_eq!(config.log_dir, "/tmp/grading");
        assert_eq!(config.log_file, "lab3.log");
        assert!(config.log_to_stdout);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_log_to_stdout_only_accepts_true() {
        clear_env();
        unsafe {
            env::set_var("LOG_TO_STDOUT", "yes");
        }
        assert!(!HarnessConfig::from_env().log_to_stdout);
        clear_env();
    }
}

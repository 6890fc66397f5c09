// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::property::Assignment;

pub const DEFAULT_PIPELINE: &str = "tcambin name=source ! fakesink";
pub const DEFAULT_SOURCE_NAME: &str = "source";
/// Bounded wait for the PLAYING transition (4 000 000 000 ns).
pub const DEFAULT_START_TIMEOUT_MS: u64 = 4_000;

/// Settings shared by every command.
///
/// ```toml
/// serial = "46810320"
/// pipeline = "tcambin name=source ! fakesink"
/// source_name = "source"
/// start_timeout_ms = 4000
/// log_level = "warn"
/// watch = ["Exposure Auto", "Gain Auto", "Brightness"]
/// settings = ["Exposure Auto=false", "Gain Auto=false", "Brightness=200"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CamctlConfig {
    /// Serial number of the camera to open. `None` opens the first device.
    pub serial: Option<String>,
    /// Launch description of the capture pipeline.
    pub pipeline: String,
    /// Name of the tcambin element inside `pipeline`.
    pub source_name: String,
    pub start_timeout_ms: u64,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Properties printed before and after `set`.
    pub watch: Vec<String>,
    /// Assignments applied by `set` when none are given.
    pub settings: Vec<Assignment>,
}

impl Default for CamctlConfig {
    fn default() -> Self {
        Self {
            serial: None,
            pipeline: DEFAULT_PIPELINE.to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            start_timeout_ms: DEFAULT_START_TIMEOUT_MS,
            log_level: "warn".to_string(),
            watch: vec![
                "Exposure Auto".to_string(),
                "Gain Auto".to_string(),
                "Brightness".to_string(),
            ],
            settings: vec![
                // GigE cameras take "Off" instead of false
                Assignment::new("Exposure Auto", "false"),
                Assignment::new("Gain Auto", "false"),
                Assignment::new("Brightness", "200"),
            ],
        }
    }
}

impl CamctlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load the config file, then apply environment overrides.
    ///
    /// Resolution order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. `CAMCTL_CONFIG` environment variable
    /// 3. the first existing file of [`default_config_paths`]
    ///
    /// An explicitly named file must exist; when no default file exists the
    /// defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("CAMCTL_CONFIG").map(PathBuf::from))
            .or_else(|| default_config_paths().into_iter().find(|path| path.is_file()));

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// `CAMCTL_SERIAL` overrides the file's serial.
    pub fn apply_env(&mut self) {
        if let Ok(serial) = std::env::var("CAMCTL_SERIAL") {
            if !serial.is_empty() {
                tracing::info!("Using camera serial from CAMCTL_SERIAL: {}", serial);
                self.serial = Some(serial);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.trim().is_empty() {
            return Err(Error::Configuration("pipeline must not be empty".into()));
        }
        if self.source_name.trim().is_empty() {
            return Err(Error::Configuration("source_name must not be empty".into()));
        }
        if self.start_timeout_ms == 0 {
            return Err(Error::Configuration("start_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn start_timeout(&self) -> Duration {
        Duration::from_millis(self.start_timeout_ms)
    }
}

/// Candidate config files, most specific first:
/// 1. `$CAMCTL_HOME/config.toml`
/// 2. `$XDG_CONFIG_HOME/camctl/config.toml`
/// 3. `~/.camctl/config.toml`
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = std::env::var_os("CAMCTL_HOME") {
        paths.push(PathBuf::from(home).join("config.toml"));
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("camctl").join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".camctl").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;
    use serial_test::serial;

    /// Sets (`Some`) or removes (`None`) variables, restoring them on drop.
    struct EnvGuard(Vec<(&'static str, Option<OsString>)>);

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&Path>)]) -> Self {
            let saved = vars.iter().map(|(key, _)| (*key, std::env::var_os(key))).collect();
            for (key, value) in vars {
                // SAFETY: env-mutating tests run under #[serial]
                unsafe {
                    match value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.0 {
                // SAFETY: env-mutating tests run under #[serial]
                unsafe {
                    match value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    /// Points every config location at `dir` so the host's files never leak in.
    fn isolated(dir: &Path) -> EnvGuard {
        EnvGuard::set(&[
            ("CAMCTL_CONFIG", None),
            ("CAMCTL_SERIAL", None),
            ("CAMCTL_HOME", Some(dir)),
            ("XDG_CONFIG_HOME", Some(dir)),
            ("HOME", Some(dir)),
        ])
    }

    #[test]
    fn test_defaults_match_example_sequence() {
        let config = CamctlConfig::default();
        assert_eq!(config.pipeline, "tcambin name=source ! fakesink");
        assert_eq!(config.start_timeout(), Duration::from_secs(4));
        assert_eq!(config.watch, ["Exposure Auto", "Gain Auto", "Brightness"]);
        assert_eq!(config.settings[2], Assignment::new("Brightness", "200"));
        assert!(config.serial.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CamctlConfig::from_toml_str(
            r#"
serial = "46810320"
settings = ["Exposure Auto=Off"]
"#,
        )
        .unwrap();
        assert_eq!(config.serial.as_deref(), Some("46810320"));
        assert_eq!(config.settings, vec![Assignment::new("Exposure Auto", "Off")]);
        assert_eq!(config.source_name, "source");
    }

    #[test]
    fn test_rejects_unknown_and_invalid() {
        assert!(matches!(
            CamctlConfig::from_toml_str("colour = 1"),
            Err(Error::ConfigParse(_))
        ));
        assert!(matches!(
            CamctlConfig::from_toml_str("start_timeout_ms = 0"),
            Err(Error::Configuration(_))
        ));
        assert!(CamctlConfig::from_toml_str(r#"settings = ["Brightness"]"#).is_err());
    }

    #[test]
    #[serial]
    fn test_load_explicit_file_and_env_serial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camctl.toml");
        std::fs::write(&path, "serial = \"111\"\nstart_timeout_ms = 500\n").unwrap();

        let _env = isolated(dir.path());
        // SAFETY: #[serial]; restored by the guard
        unsafe { std::env::set_var("CAMCTL_SERIAL", "222") };
        let config = CamctlConfig::load(Some(&path)).unwrap();
        assert_eq!(config.serial.as_deref(), Some("222"));
        assert_eq!(config.start_timeout(), Duration::from_millis(500));
    }

    #[test]
    #[serial]
    fn test_load_from_home_or_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let _env = isolated(dir.path());

        assert_eq!(CamctlConfig::load(None).unwrap(), CamctlConfig::default());

        std::fs::write(dir.path().join("config.toml"), "source_name = \"cam\"\n").unwrap();
        assert_eq!(CamctlConfig::load(None).unwrap().source_name, "cam");
    }

    #[test]
    #[serial]
    fn test_load_falls_through_to_dot_camctl() {
        let home = tempfile::tempdir().unwrap();
        let xdg = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join(".camctl")).unwrap();
        std::fs::write(
            home.path().join(".camctl").join("config.toml"),
            "source_name = \"cam\"\n",
        )
        .unwrap();

        let _env = isolated(home.path());
        let _xdg = EnvGuard::set(&[("CAMCTL_HOME", None), ("XDG_CONFIG_HOME", Some(xdg.path()))]);

        assert_eq!(CamctlConfig::load(None).unwrap().source_name, "cam");
    }

    #[test]
    #[serial]
    fn test_camctl_home_wins_over_xdg() {
        let camctl_home = tempfile::tempdir().unwrap();
        let xdg = tempfile::tempdir().unwrap();
        std::fs::write(camctl_home.path().join("config.toml"), "source_name = \"a\"\n").unwrap();
        std::fs::create_dir(xdg.path().join("camctl")).unwrap();
        std::fs::write(xdg.path().join("camctl").join("config.toml"), "source_name = \"b\"\n")
            .unwrap();

        let _env = isolated(camctl_home.path());
        let _xdg = EnvGuard::set(&[("XDG_CONFIG_HOME", Some(xdg.path()))]);

        assert_eq!(CamctlConfig::load(None).unwrap().source_name, "a");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            CamctlConfig::load(Some(&missing)),
            Err(Error::Configuration(_))
        ));
    }
}

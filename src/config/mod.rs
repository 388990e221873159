use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            mouse: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Parse `server.addr`, falling back to the default address
    pub fn server_addr(&self) -> SocketAddr {
        parse_addr(&self.server.addr).unwrap_or_else(default_addr)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .as_deref()
            .and_then(expand_path)
            .or_else(log_path)
    }
}

/// A config plus the problems found while loading it. Callers log the
/// warnings once a tracing subscriber is installed.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl Loaded {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}

/// Load the config file; a missing or unreadable file yields defaults.
pub fn load() -> Loaded {
    match config_path() {
        Some(path) => load_from(&path),
        None => Loaded::default(),
    }
}

pub fn load_from(path: &Path) -> Loaded {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Loaded::default(),
    };

    let mut warnings = Vec::new();
    let config = parse(&content).unwrap_or_else(|err| {
        warnings.push(format!(
            "ignoring malformed config {}: {}",
            path.display(),
            err.message()
        ));
        Config::default()
    });
    if parse_addr(&config.server.addr).is_none() {
        warnings.push(format!(
            "invalid server.addr {:?}, using {DEFAULT_ADDR}",
            config.server.addr
        ));
    }

    Loaded { config, warnings }
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SALES_INTEL_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("sales-intel").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("sales-intel").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "sales-intel", "sales-intel")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("sales-intel"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("sales-intel"));
    }
    directories::ProjectDirs::from("io", "sales-intel", "sales-intel")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("sales-intel.log"))
}

pub fn parse_addr(value: &str) -> Option<SocketAddr> {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix("http://")
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    trimmed.parse().ok()
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }
    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.addr, DEFAULT_ADDR);
        assert_eq!(config.ui.tick_ms, 200);
        assert!(config.ui.mouse);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = parse(
            r#"
            [server]
            addr = "0.0.0.0:8080"

            [ui]
            mouse = false
            "#,
        )
        .unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080".parse().unwrap());
        assert!(!config.ui.mouse);
        assert_eq!(config.ui.tick_ms, 200);
    }

    #[test]
    fn test_parse_addr_variants() {
        assert_eq!(
            parse_addr("http://127.0.0.1:4000/"),
            Some("127.0.0.1:4000".parse().unwrap())
        );
        assert_eq!(parse_addr("localhost"), None);
    }

    #[test]
    fn test_bad_addr_falls_back() {
        let config = parse("[server]\naddr = \"nope\"").unwrap();
        assert_eq!(config.server_addr(), default_addr());
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\naddr = ").unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.config.server.addr, DEFAULT_ADDR);
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].starts_with("ignoring malformed config"));
    }

    #[test]
    fn test_bad_addr_in_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\naddr = \"nope\"").unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.config.server_addr(), default_addr());
        assert_eq!(loaded.warnings, vec![format!("invalid server.addr \"nope\", using {DEFAULT_ADDR}")]);
    }

    #[test]
    fn test_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from(&dir.path().join("absent.toml"));
        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.config.ui.tick_ms, 200);
    }

    #[test]
    fn test_explicit_log_file() {
        let config = parse("[log]\nfile = \"/tmp/si.log\"").unwrap();
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/si.log")));
    }
}

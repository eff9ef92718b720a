use std::path::Path;

use anyhow::Context;
use latency_workshop_api::ApiInfo;
use latency_workshop_common::LatencyMode;
use serde::Deserialize;

/// Process configuration. Every field has a default, so a TOML file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub app_description: String,
    pub host: String,
    pub port: u16,
    pub default_latency_mode: LatencyMode,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Workshop API".to_string(),
            app_version: "1.0.0".to_string(),
            app_description: "Simple API for TanStack Query workshop".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            default_latency_mode: LatencyMode::NoLatency,
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `--host`, `--port` and `--latency` overrides.
    pub fn apply_cli(&mut self, args: &[String]) -> anyhow::Result<()> {
        if let Some(host) = parse_flag_string(args, "--host") {
            self.host = host;
        }
        if let Some(port) = parse_flag_string(args, "--port") {
            self.port = port
                .parse()
                .with_context(|| format!("invalid --port {port:?}"))?;
        }
        if let Some(mode) = parse_flag_string(args, "--latency") {
            self.default_latency_mode = mode.parse()?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn api_info(&self) -> ApiInfo {
        ApiInfo {
            name: self.app_name.clone(),
            version: self.app_version.clone(),
            description: self.app_description.clone(),
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Flags that consume the following argument as their value.
const VALUE_FLAGS: [&str; 4] = ["--config", "--host", "--port", "--latency"];

/// First argument that is neither a flag nor a flag's value.
pub fn parse_command(args: &[String]) -> Option<&str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}

pub fn parse_flag_string(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s.port, 8000);
        assert_eq!(s.default_latency_mode, LatencyMode::NoLatency);
        assert_eq!(s.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_partial_toml() {
        let s = Settings::from_toml_str(
            r#"
            port = 9000
            default_latency_mode = "LOW_LATENCY"
            cors_origins = ["http://localhost:3000"]
            "#,
        )
        .unwrap();
        assert_eq!(s.port, 9000);
        assert_eq!(s.default_latency_mode, LatencyMode::LowLatency);
        assert_eq!(s.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(s.app_name, "Workshop API");
    }

    #[test]
    fn test_unknown_mode_in_toml_is_rejected() {
        assert!(Settings::from_toml_str(r#"default_latency_mode = "TURBO""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"\nlog_level = \"debug\"").unwrap();
        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Settings::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_command_found_after_flags() {
        assert_eq!(parse_command(&args(&["bin"])), None);
        assert_eq!(parse_command(&args(&["bin", "demo"])), Some("demo"));
        assert_eq!(
            parse_command(&args(&["bin", "--config", "x.toml", "demo"])),
            Some("demo")
        );
        assert_eq!(
            parse_command(&args(&["bin", "--port", "9000", "--latency", "LOW_LATENCY"])),
            None
        );
        assert_eq!(
            parse_command(&args(&["bin", "--host", "serve", "demo"])),
            Some("demo")
        );
    }

    #[test]
    fn test_cli_overrides() {
        let mut s = Settings::default();
        s.apply_cli(&args(&["serve", "--port", "8080", "--latency", "HIGH_LATENCY"]))
            .unwrap();
        assert_eq!(s.port, 8080);
        assert_eq!(s.default_latency_mode, LatencyMode::HighLatency);

        assert!(s.apply_cli(&args(&["--latency", "BOGUS"])).is_err());
        assert!(s.apply_cli(&args(&["--port", "eighty"])).is_err());
        assert_eq!(s.default_latency_mode, LatencyMode::HighLatency);
    }
}

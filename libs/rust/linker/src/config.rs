use serde::Deserialize;
use std::{env, fs, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_ENDPOINT: &str = "/get-summarisation-data";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_USER_AGENT: &str = "summary-linker/0.1 reqwest/0.12";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LinkerConfig {
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn url(&self) -> String {
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reads the YAML file named by `LINKER_CONFIG_PATH` (default `linker.yaml`),
/// falling back to defaults, then applies environment overrides.
pub fn load_config() -> LinkerConfig {
    let path = env::var("LINKER_CONFIG_PATH").unwrap_or_else(|_| "linker.yaml".to_string());
    let mut config = match fs::read_to_string(&path) {
        Ok(contents) => match serde_yaml::from_str::<LinkerConfig>(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, path = %path, "Failed to parse linker config, using defaults");
                LinkerConfig::default()
            }
        },
        Err(err) => {
            warn!(error = %err, path = %path, "Linker config not found, using defaults");
            LinkerConfig::default()
        }
    };

    apply_env_overrides(&mut config);

    info!(
        url = %config.service.url(),
        timeout_secs = config.service.timeout_secs,
        "Linker config loaded"
    );

    config
}

fn apply_env_overrides(config: &mut LinkerConfig) {
    if let Ok(value) = env::var("SUMMARISER_URL") {
        config.service.base_url = value;
    }

    if let Ok(value) = env::var("SUMMARISER_ENDPOINT") {
        config.service.endpoint = value;
    }

    if let Ok(value) = env::var("SUMMARISER_TIMEOUT_SECS") {
        match value.parse::<u64>() {
            Ok(secs) => {
                config.service.timeout_secs = secs;
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "Failed to parse SUMMARISER_TIMEOUT_SECS override"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 4] = [
        "LINKER_CONFIG_PATH",
        "SUMMARISER_URL",
        "SUMMARISER_ENDPOINT",
        "SUMMARISER_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn joins_base_url_and_endpoint() {
        let config = ServiceConfig {
            base_url: "http://summariser:3001/".to_string(),
            endpoint: "get-summarisation-data".to_string(),
            ..ServiceConfig::default()
        };
        assert_eq!(config.url(), "http://summariser:3001/get-summarisation-data");
        assert_eq!(
            ServiceConfig::default().url(),
            "http://localhost:3001/get-summarisation-data"
        );
    }

    #[test]
    #[serial]
    fn missing_file_uses_defaults() {
        clear_env();
        unsafe {
            env::set_var("LINKER_CONFIG_PATH", "/nonexistent/linker.yaml");
        }

        assert_eq!(load_config(), LinkerConfig::default());
        clear_env();
    }

    #[test]
    #[serial]
    fn reads_yaml_then_env_overrides() {
        clear_env();
        let path = env::temp_dir().join(format!("linker-config-{}.yaml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "service:\n  base_url: http://from-file:9000\n  timeout_secs: 5"
        )
        .unwrap();

        unsafe {
            env::set_var("LINKER_CONFIG_PATH", &path);
            env::set_var("SUMMARISER_ENDPOINT", "/summarise");
            env::set_var("SUMMARISER_TIMEOUT_SECS", "not-a-number");
        }

        let config = load_config();
        assert_eq!(config.service.base_url, "http://from-file:9000");
        assert_eq!(config.service.endpoint, "/summarise");
        assert_eq!(config.service.timeout_secs, 5);
        assert_eq!(config.service.user_agent, DEFAULT_USER_AGENT);

        clear_env();
        let _ = fs::remove_file(path);
    }
}

use anyhow::Context;
use mineguardcore::telemetry::LogManager;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up next to the binary's working directory.
pub const DEFAULT_CONFIG_PATH: &str = "console.yaml";

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl ConsoleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading console config {}", path_ref.display()))?;
        let config: ConsoleConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing console config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Loads the config when the file exists, falling back to defaults on a
    /// missing or unreadable file so the console always boots.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Self::default();
        }
        match Self::load(path_ref) {
            Ok(config) => config,
            Err(error) => {
                LogManager::new().record_failure(&format!("{error:#}; using defaults"));
                Self::default()
            }
        }
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.api_base_url.trim_end_matches('/'))
    }

    pub fn history_url(&self) -> String {
        format!("{}/api/history", self.api_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"api_base_url: http://10.0.0.5:9000/\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.analyze_url(), "http://10.0.0.5:9000/api/analyze");
        assert_eq!(config.history_url(), "http://10.0.0.5:9000/api/history");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ConsoleConfig::load_or_default("does-not-exist.yaml");
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
    }
}

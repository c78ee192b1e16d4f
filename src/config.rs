use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseTrainError, Result};

/// Represents the complete configuration for release-train.
///
/// Contains the list of module subdirectories whose versions are not managed
/// by the release plugin, and settings for the external release tool itself.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Subdirectories (relative to the tree root) whose `*.xml` descriptors
    /// carry version strings the release plugin does not rewrite on its own.
    #[serde(default = "default_unmanaged_scopes")]
    pub unmanaged_scopes: Vec<String>,

    #[serde(default)]
    pub release_tool: ReleaseToolConfig,
}

/// Returns the default set of unmanaged module subdirectories.
fn default_unmanaged_scopes() -> Vec<String> {
    vec![
        "lighty-applications/lighty-rcgnmi-app-aggregator/lighty-rcgnmi-app-docker".to_string(),
        "lighty-applications/lighty-rnc-app-aggregator/lighty-rnc-app-docker".to_string(),
    ]
}

/// Configuration for the external release tool invocation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseToolConfig {
    /// Program name or path of the release tool.
    #[serde(default = "default_program")]
    pub program: String,

    /// Whether the prepare step passes the skip-tests argument through.
    #[serde(default = "default_skip_tests")]
    pub skip_tests: bool,
}

fn default_program() -> String {
    "mvn".to_string()
}

fn default_skip_tests() -> bool {
    true
}

impl Default for ReleaseToolConfig {
    fn default() -> Self {
        ReleaseToolConfig {
            program: default_program(),
            skip_tests: default_skip_tests(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unmanaged_scopes: default_unmanaged_scopes(),
            release_tool: ReleaseToolConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasetrain.toml` in current directory
/// 3. `.releasetrain.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// A file that exists but cannot be read or parsed is a fatal error; the
/// workflow must not start with a half-understood configuration.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            ReleaseTrainError::config(format!("cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new("./releasetrain.toml").exists() {
        fs::read_to_string("./releasetrain.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasetrain.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseTrainError::config(format!("invalid config file: {}", e)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.unmanaged_scopes.len(), 2);
        assert_eq!(config.release_tool.program, "mvn");
        assert!(config.release_tool.skip_tests);
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            unmanaged_scopes = ["modules/app-docker"]
            "#,
        )
        .unwrap();

        assert_eq!(config.unmanaged_scopes, vec!["modules/app-docker"]);
        assert_eq!(config.release_tool.program, "mvn");
    }

    #[test]
    fn test_parse_release_tool_section() {
        let config: Config = toml::from_str(
            r#"
            [release_tool]
            program = "./mvnw"
            skip_tests = false
            "#,
        )
        .unwrap();

        assert_eq!(config.release_tool.program, "./mvnw");
        assert!(!config.release_tool.skip_tests);
    }

    #[test]
    fn test_load_config_custom_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unmanaged_scopes = [\"a\", \"b\", \"c\"]").unwrap();

        let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.unmanaged_scopes.len(), 3);
    }

    #[test]
    fn test_load_config_missing_custom_path_fails() {
        let result = load_config(Some("/no/such/releasetrain.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unmanaged_scopes = not-a-list").unwrap();

        let result = load_config(Some(file.path().to_str().unwrap()));
        assert!(result.is_err());
    }
}

use crate::filter::RegexFlags;
use crate::parser::ValidationProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    pub validation: ValidationRules,
    /// Flags used for every field pattern unless overridden on the command line.
    pub flags: RegexFlags,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            validation: ValidationRules::default(),
            flags: RegexFlags::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub profile: ValidationProfile,
}

const STRICT_TEMPLATE: &str = r#"
profile_name = "strict"

[validation]
profile = "strict"

[flags]
case_insensitive = true
multiline = false
"#;

const LENIENT_TEMPLATE: &str = r#"
profile_name = "lenient"

[validation]
profile = "lenient"

[flags]
case_insensitive = true
multiline = false
"#;

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<FilterConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}

pub fn builtin_template_names() -> &'static [&'static str] {
    &["strict", "lenient"]
}

pub fn load_builtin_template(name: &str) -> Option<FilterConfig> {
    let raw = match name.to_lowercase().as_str() {
        "strict" => STRICT_TEMPLATE,
        "lenient" => LENIENT_TEMPLATE,
        _ => return None,
    };
    toml::from_str(raw).ok()
}

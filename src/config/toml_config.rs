use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "kampaamo",
    "parturi",
    "hius",
    "kampaus",
    "hiusten",
    "parturi-kampaamo",
    "hiusstudio",
    "hair",
    "barber",
    "hiuspaja",
    "kampauspalvelu",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub filter: FilterConfig,
    pub lookup: LookupConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: String,
    /// Stop filtering after this many matches. `0` means no cap.
    pub max_matches: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub industry_code: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub endpoint: String,
    pub api_key: String,
    pub engine: String,
    /// Appended to every query to keep results in-country.
    pub country: String,
    pub language: String,
    pub region: String,
    pub result_type: String,
    pub timeout_seconds: u64,
    /// INSECURE: disables TLS certificate verification for the lookup client.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub prefix: String,
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "data/ytj_tulos.csv".to_string(),
            max_matches: Some(20),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            industry_code: "96210".to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search".to_string(),
            api_key: String::new(),
            engine: "google_maps".to_string(),
            country: "Suomi".to_string(),
            language: "fi".to_string(),
            region: "fi".to_string(),
            result_type: "search".to_string(),
            timeout_seconds: 30,
            accept_invalid_certs: false,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            prefix: "kampaamot".to_string(),
            extension: "csv".to_string(),
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl PacingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::MissingConfigError {
                field: path.as_ref().display().to_string(),
            },
            _ => AppError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// `None` when no cap applies.
    pub fn max_matches(&self) -> Option<usize> {
        self.input.max_matches.filter(|n| *n > 0)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.dir", &self.output.dir)?;
        validation::validate_non_empty_string("output.prefix", &self.output.prefix)?;
        validation::validate_non_empty_string("output.extension", &self.output.extension)?;

        validation::validate_non_empty_list("filter.keywords", &self.filter.keywords)?;

        validation::validate_url("lookup.endpoint", &self.lookup.endpoint)?;
        validation::validate_secret("lookup.api_key", &self.lookup.api_key)?;
        validation::validate_non_empty_string("lookup.engine", &self.lookup.engine)?;
        validation::validate_range("lookup.timeout_seconds", self.lookup.timeout_seconds, 1, 300)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

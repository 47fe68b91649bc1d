pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "salon-enrich")]
#[command(about = "Find hairdressers and barbers in a registry export and look up their contact details")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Registry export (semicolon-delimited CSV)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Directory for the report
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Stop after this many matches (0 = no cap)
    #[arg(short, long)]
    pub max_matches: Option<usize>,

    #[arg(long, env = "SERPAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Pause between lookups in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// INSECURE: skip TLS certificate verification for lookups
    #[arg(long)]
    pub insecure_tls: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub const DEFAULT_CONFIG_PATH: &'static str = "config/settings.toml";

    /// Load the TOML file and apply command-line overrides on top of it.
    ///
    /// An explicitly passed `--config` must exist; the default path is optional.
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::from_file_or_default(Self::DEFAULT_CONFIG_PATH)?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(input) = &self.input {
            config.input.path = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(max) = self.max_matches {
            config.input.max_matches = Some(max);
        }
        if let Some(key) = &self.api_key {
            config.lookup.api_key = key.clone();
        }
        if let Some(delay) = self.delay_ms {
            config.pacing.delay_ms = delay;
        }
        if self.insecure_tls {
            config.lookup.accept_invalid_certs = true;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = CliConfig::parse_from([
            "salon-enrich",
            "--input",
            "other.csv",
            "--max-matches",
            "3",
            "--api-key",
            "cli-key",
            "--delay-ms",
            "10",
            "--insecure-tls",
        ]);

        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.input.path, "other.csv");
        assert_eq!(config.max_matches(), Some(3));
        assert_eq!(config.lookup.api_key, "cli-key");
        assert_eq!(config.pacing.delay_ms, 10);
        assert!(config.lookup.accept_invalid_certs);
    }

    #[test]
    fn test_no_flags_leave_config_untouched() {
        let cli = CliConfig::parse_from(["salon-enrich", "--api-key", "k"]);
        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.input.path, "data/ytj_tulos.csv");
        assert!(!config.lookup.accept_invalid_certs);
    }
}

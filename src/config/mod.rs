pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_STEP_DELAY_MS: u64 = 2000;
pub const DEFAULT_REPORT_DIR: &str = "./reports";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "supplier-analysis")]
#[command(about = "Upload transaction data and an MCC template for AI supplier spend analysis")]
pub struct CliConfig {
    /// Raw transaction data workbook (.xlsx)
    #[arg(long)]
    pub raw_data: Option<String>,

    /// MCC reference template workbook (.xlsb)
    #[arg(long)]
    pub mcc_template: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the analysis service
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Analysis request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Delay between processing steps in milliseconds
    #[arg(long)]
    pub step_delay_ms: Option<u64>,

    /// Directory the report is downloaded into
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Use built-in sample results instead of the remote service
    #[arg(long)]
    pub mock: bool,

    /// Only accept files with the expected extension, like drag and drop
    #[arg(long)]
    pub strict_extensions: bool,

    /// Skip downloading the report
    #[arg(long)]
    pub no_download: bool,

    /// Check the service health endpoint and exit
    #[arg(long)]
    pub health: bool,

    /// Show the full step list while processing
    #[arg(long)]
    pub show_steps: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

/// Effective settings: defaults, then the TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub step_delay_ms: u64,
    pub report_dir: String,
    pub mock: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            report_dir: DEFAULT_REPORT_DIR.to_string(),
            mock: false,
        }
    }
}

impl Settings {
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(url) = file.base_url() {
            self.base_url = url.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        if let Some(delay) = file.step_delay_ms() {
            self.step_delay_ms = delay;
        }
        if let Some(dir) = file.report_dir() {
            self.report_dir = dir.to_string();
        }
        if let Some(mock) = file.mock() {
            self.mock = mock;
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(path) = &cli.config {
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            tracing::debug!("Loaded configuration file: {}", path);
            settings.apply_toml(&file);
        }

        if let Some(endpoint) = &cli.endpoint {
            settings.base_url = endpoint.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(delay) = cli.step_delay_ms {
            settings.step_delay_ms = delay;
        }
        if let Some(dir) = &cli.output_dir {
            settings.report_dir = dir.clone();
        }
        settings.mock |= cli.mock;

        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    fn report_dir(&self) -> &str {
        &self.report_dir
    }

    fn use_mock_service(&self) -> bool {
        self.mock
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.base_url)?;
        validation::validate_positive_number("service.timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_positive_number("processing.step_delay_ms", self.step_delay_ms, 1)?;
        validation::validate_path("output.report_dir", &self.report_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_contract() {
        let settings = Settings::default();
        assert_eq!(settings.request_timeout(), Duration::from_millis(300_000));
        assert_eq!(settings.base_url(), "http://localhost:5000");
        assert!(!settings.use_mock_service());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            "[service]\nbase_url = \"https://analysis.internal\"\nmock = true\n[output]\nreport_dir = \"/tmp/reports\"\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.apply_toml(&file);

        assert_eq!(settings.base_url, "https://analysis.internal");
        assert_eq!(settings.report_dir, "/tmp/reports");
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(settings.mock);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nbase_url = \"https://from-file.example\"\ntimeout_seconds = 60\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "supplier-analysis",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:8080",
            "--step-delay-ms",
            "1",
        ]);
        let settings = Settings::resolve(&cli).unwrap();

        assert_eq!(settings.base_url, "http://127.0.0.1:8080");
        assert_eq!(settings.timeout_seconds, 60);
        assert_eq!(settings.step_delay(), Duration::from_millis(1));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_zero_step_delay_is_rejected() {
        let cli = CliConfig::parse_from(["supplier-analysis", "--step-delay-ms", "0"]);
        let err = Settings::resolve(&cli).unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::AnalysisError::InvalidConfigValueError { ref field, .. }
                if field == "processing.step_delay_ms"
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_invalid_endpoint_flag_is_rejected() {
        let cli = CliConfig::parse_from(["supplier-analysis", "--endpoint", "ftp://files"]);
        assert!(Settings::resolve(&cli).is_err());
    }
}

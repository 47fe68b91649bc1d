use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Input file not found: {path}")]
    InputMissing { path: String },

    #[error("No hairdressers or barbers matched the filter")]
    NoMatches,
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigError { .. } => 1,
            AppError::InputMissing { .. } => 2,
            AppError::NoMatches => 3,
            AppError::ApiError(_)
            | AppError::CsvError(_)
            | AppError::IoError(_)
            | AppError::SerializationError(_) => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::MissingConfigError { field } if field == "lookup.api_key" => {
                "Set SERPAPI_KEY, pass --api-key, or add api_key under [lookup] in config/settings.toml"
                    .to_string()
            }
            AppError::MissingConfigError { .. } => {
                "Copy config/settings.example.toml to config/settings.toml and fill in the missing value"
                    .to_string()
            }
            AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration file or command line", field)
            }
            AppError::ConfigError { .. } => {
                "Check that the configuration file is valid TOML".to_string()
            }
            AppError::InputMissing { .. } => [
                "1. Create the 'data/' directory if it does not exist",
                "2. Copy the registry export to data/ytj_tulos.csv (or pass --input)",
                "3. Keep the export out of version control",
            ]
            .join("\n"),
            AppError::NoMatches => {
                "Check the delimiter and column names of the input file, or widen [filter] keywords"
                    .to_string()
            }
            AppError::ApiError(_) => "Check network connectivity and the API endpoint".to_string(),
            AppError::CsvError(_) | AppError::IoError(_) | AppError::SerializationError(_) => {
                "Check that the output directory is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::MissingConfigError { field } => {
                format!("Configuration value '{}' is missing", field)
            }
            AppError::InputMissing { path } => format!("Input file {} was not found", path),
            AppError::NoMatches => "No hairdressers or barbers found".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

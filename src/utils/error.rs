use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("No handler registered for intent '{name}'")]
    UnknownIntent { name: String },

    #[error("Application id mismatch: expected '{expected}', got '{actual}'")]
    InvalidApplicationId { expected: String, actual: String },

    #[error("Intent '{name}' is already registered")]
    DuplicateIntent { name: String },

    #[error("Dictionary error: {message}")]
    DictionaryError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 註冊表或配置不一致
    Configuration,
    /// 入站請求本身有問題
    Request,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SkillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SkillError::UnknownIntent { .. }
            | SkillError::DuplicateIntent { .. }
            | SkillError::DictionaryError { .. }
            | SkillError::ConfigError { .. }
            | SkillError::InvalidConfigValueError { .. }
            | SkillError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SkillError::InvalidApplicationId { .. } | SkillError::SerializationError(_) => {
                ErrorCategory::Request
            }
            SkillError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::InvalidApplicationId { .. } => ErrorSeverity::Medium,
            SkillError::SerializationError(_) => ErrorSeverity::Medium,
            SkillError::UnknownIntent { .. } => ErrorSeverity::High,
            SkillError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SkillError::UnknownIntent { name } => format!(
                "Register a handler for '{}' or remove it from the interaction model",
                name
            ),
            SkillError::InvalidApplicationId { .. } => {
                "Check that SKILL_APP_ID matches the skill id in the developer console".to_string()
            }
            SkillError::DuplicateIntent { name } => {
                format!("Register '{}' only once when building the registry", name)
            }
            SkillError::DictionaryError { .. } => {
                "Check the dictionary file is a JSON object of topic -> text".to_string()
            }
            SkillError::ConfigError { .. }
            | SkillError::ConfigValidationError { .. }
            | SkillError::InvalidConfigValueError { .. } => {
                "Review the configuration file and environment variables".to_string()
            }
            SkillError::IoError(_) => "Check the file path exists and is readable".to_string(),
            SkillError::SerializationError(_) => {
                "Check the request body is a valid skill request envelope".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Skill is misconfigured: {}", self),
            ErrorCategory::Request => format!("Request rejected: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;

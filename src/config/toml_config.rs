use crate::core::handlers::Prompts;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default)]
    pub skill: SkillSection,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub messages: Prompts,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSection {
    #[serde(default = "default_skill_name")]
    pub name: String,
    pub app_id: Option<String>,
}

impl Default for SkillSection {
    fn default() -> Self {
        Self {
            name: default_skill_name(),
            app_id: None,
        }
    }
}

fn default_skill_name() -> String {
    "upray".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// 未設定時使用內建字典
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl SkillConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SkillError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: SkillConfig =
            toml::from_str(&processed_content).map_err(|e| SkillError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.skill.app_id = configured_app_id(config.skill.app_id.take());

        Ok(config)
    }

    /// 替換環境變數 (例如 ${SKILL_APP_ID})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkillError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

/// 沒解析到的 ${VAR} 或空字串都當作未設定（接受任何呼叫方）
pub fn configured_app_id(app_id: Option<String>) -> Option<String> {
    app_id.filter(|id| !id.trim().is_empty() && !id.starts_with("${"))
}

impl ConfigProvider for SkillConfig {
    fn app_id(&self) -> Option<&str> {
        self.skill.app_id.as_deref()
    }

    fn dictionary_path(&self) -> Option<&str> {
        self.dictionary.path.as_deref()
    }

    fn prompts(&self) -> &Prompts {
        &self.messages
    }
}

impl Validate for SkillConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("skill.name", &self.skill.name)?;

        if let Some(app_id) = &self.skill.app_id {
            validate_app_id("skill.app_id", app_id)?;
        }

        if let Some(path) = &self.dictionary.path {
            validate_path("dictionary.path", path)?;
        }

        self.messages.validate()?;

        tracing::debug!("Skill configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[skill]
name = "upray"
app_id = "amzn1.ask.skill.0000-1111"

[dictionary]
path = "assets/prayers.json"

[logging]
level = "debug"
"#;

        let config = SkillConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.skill.name, "upray");
        assert_eq!(config.app_id(), Some("amzn1.ask.skill.0000-1111"));
        assert_eq!(config.dictionary_path(), Some("assets/prayers.json"));
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.prompts(), &Prompts::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SkillConfig::from_toml_str("").unwrap();
        assert_eq!(config.skill.name, "upray");
        assert_eq!(config.app_id(), None);
        assert_eq!(config.dictionary_path(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_message_overrides() {
        let toml_content = r#"
[messages]
card_title_prefix = "A prayer for"
recovery_reprompt = "Anything else?"
"#;

        let config = SkillConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.messages.card_title_prefix, "A prayer for");
        assert_eq!(config.messages.recovery_reprompt, "Anything else?");
        assert_eq!(config.messages.goodbye, Prompts::default().goodbye);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("UPRAY_TEST_APP_ID", "amzn1.ask.skill.from-env");

        let toml_content = r#"
[skill]
app_id = "${UPRAY_TEST_APP_ID}"
"#;

        let config = SkillConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app_id(), Some("amzn1.ask.skill.from-env"));

        std::env::remove_var("UPRAY_TEST_APP_ID");
    }

    #[test]
    fn test_unresolved_app_id_counts_as_unset() {
        let toml_content = r#"
[skill]
app_id = "${UPRAY_TEST_APP_ID_NEVER_SET}"
"#;

        let config = SkillConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app_id(), None);
    }

    #[test]
    fn test_configured_app_id() {
        assert_eq!(configured_app_id(None), None);
        assert_eq!(configured_app_id(Some(String::new())), None);
        assert_eq!(configured_app_id(Some("  ".to_string())), None);
        assert_eq!(configured_app_id(Some("${SKILL_APP_ID}".to_string())), None);
        assert_eq!(
            configured_app_id(Some("amzn1.ask.skill.x".to_string())),
            Some("amzn1.ask.skill.x".to_string())
        );
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[skill]
app_id = "not-a-skill-id"
"#;

        let config = SkillConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[messages]
unknown_topic = "No idea."
"#;
        let config = SkillConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = SkillConfig::from_toml_str("[skill\nname = ");
        assert!(matches!(
            result,
            Err(SkillError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[skill]
name = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SkillConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.skill.name, "file-test");
    }
}

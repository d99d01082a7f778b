pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "upray-skill")]
#[command(about = "Answer a single skill request envelope from the command line")]
pub struct CliConfig {
    /// Request envelope JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override skill.app_id from the config
    #[arg(long)]
    pub app_id: Option<String>,

    /// Override dictionary.path from the config
    #[arg(long)]
    pub dictionary: Option<String>,

    /// Write the response envelope here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, help = "Pretty-print the response JSON")]
    pub pretty: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut toml_config::SkillConfig) {
        if let Some(app_id) = &self.app_id {
            config.skill.app_id = toml_config::configured_app_id(Some(app_id.clone()));
            tracing::info!("🔧 App id overridden to: {:?}", config.skill.app_id);
        }
        if let Some(path) = &self.dictionary {
            config.dictionary.path = Some(path.clone());
            tracing::info!("🔧 Dictionary overridden to: {}", path);
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_config() {
        let cli = CliConfig::parse_from([
            "upray-skill",
            "--event",
            "launch.json",
            "--app-id",
            "amzn1.ask.skill.cli",
            "--dictionary",
            "custom.json",
        ]);
        let mut config = toml_config::SkillConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.event, "launch.json");
        assert_eq!(config.app_id(), Some("amzn1.ask.skill.cli"));
        assert_eq!(config.dictionary_path(), Some("custom.json"));
    }

    #[test]
    fn test_empty_app_id_override_clears_check() {
        use crate::utils::validation::Validate;

        let cli = CliConfig::parse_from(["upray-skill", "--app-id", ""]);
        let mut config = toml_config::SkillConfig::default();
        config.skill.app_id = Some("amzn1.ask.skill.from-file".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.app_id(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_defaults_to_stdin() {
        let cli = CliConfig::parse_from(["upray-skill"]);
        assert_eq!(cli.event, "-");
        assert!(cli.config.is_none());
        assert!(!cli.pretty);
    }
}

use crate::config::toml_config::configured_app_id;
use crate::core::handlers::Prompts;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub app_id: Option<String>,
    pub dictionary_path: Option<String>,
    pub prompts: Prompts,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            app_id: configured_app_id(env::var("SKILL_APP_ID").ok()),
            dictionary_path: non_empty_var("DICTIONARY_PATH"),
            prompts: Prompts::default(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ConfigProvider for LambdaConfig {
    fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    fn dictionary_path(&self) -> Option<&str> {
        self.dictionary_path.as_deref()
    }

    fn prompts(&self) -> &Prompts {
        &self.prompts
    }
}

impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        if let Some(app_id) = &self.app_id {
            validate_app_id("SKILL_APP_ID", app_id)?;
        } else {
            tracing::warn!("⚠️ SKILL_APP_ID is not set, accepting requests from any skill");
        }

        if let Some(path) = &self.dictionary_path {
            validate_path("DICTIONARY_PATH", path)?;
        }

        self.prompts.validate()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use config::{cli::LocalEventSource, toml_config::SkillConfig};
pub use core::{
    dispatcher::{Dispatcher, HandlerRegistry},
    resolver::{Dictionary, Resolution},
    skill::SkillEngine,
};
pub use utils::error::{Result, SkillError};

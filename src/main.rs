use anyhow::Context;
use clap::Parser;
use upray_skill::adapters::alexa::RequestEnvelope;
use upray_skill::utils::error::ErrorSeverity;
use upray_skill::utils::{logger, validation::Validate};
use upray_skill::{CliConfig, LocalEventSource, SkillConfig, SkillEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入 TOML 配置
    let mut config = match &args.config {
        Some(path) => SkillConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => SkillConfig::default(),
    };

    // 初始化日誌
    logger::init_cli_logger(args.verbose, config.log_level());

    tracing::info!("Starting upray-skill CLI");
    if let Some(path) = &args.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = SkillEngine::from_config(&config).context("Failed to build skill engine")?;
    let source = LocalEventSource::new(args.event.clone(), args.output.clone());

    let body = source
        .read_event()
        .await
        .with_context(|| format!("Failed to read event from '{}'", args.event))?;
    let envelope: RequestEnvelope =
        serde_json::from_str(&body).context("Event is not a valid request envelope")?;

    match engine.handle(&envelope) {
        Ok(response) => {
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            source.write_response(&rendered).await?;
            tracing::info!("✅ Request {} handled", envelope.request.request_id());
        }
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

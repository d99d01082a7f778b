use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use upray_skill::adapters::alexa::{RequestEnvelope, ResponseEnvelope};
use upray_skill::config::lambda::LambdaConfig;
use upray_skill::utils::{logger, validation::Validate};
use upray_skill::SkillEngine;

async fn function_handler(
    engine: &SkillEngine,
    event: LambdaEvent<RequestEnvelope>,
) -> Result<ResponseEnvelope, Error> {
    tracing::info!(
        "Handling {} (aws request id {})",
        event.payload.request.request_id(),
        event.context.request_id
    );

    let response = engine.handle(&event.payload).map_err(|e| {
        tracing::error!(
            "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後每次呼叫共用
    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let engine = SkillEngine::from_config(&config)?;
    let engine = &engine;

    run(service_fn(move |event: LambdaEvent<RequestEnvelope>| async move {
        function_handler(engine, event).await
    }))
    .await
}

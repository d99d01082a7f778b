use crate::adapters::alexa::{RequestEnvelope, ResponseEnvelope, WireRequest};
use crate::core::dispatcher::Dispatcher;
use crate::core::handlers::{builtin_registry, launch_handler, Prompts};
use crate::core::resolver::Dictionary;
use crate::core::{ConfigProvider, Event};
use crate::utils::error::{Result, SkillError};
use std::sync::Arc;

pub struct SkillEngine {
    app_id: Option<String>,
    dispatcher: Dispatcher,
}

impl SkillEngine {
    pub fn new(app_id: Option<String>, dispatcher: Dispatcher) -> Self {
        Self { app_id, dispatcher }
    }

    /// 啟動時建立一次字典、註冊表與分派器
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let dictionary = match config.dictionary_path() {
            Some(path) => Dictionary::from_file(path)?,
            None => Dictionary::builtin()?,
        };
        Self::with_dictionary(
            config.app_id().map(str::to_string),
            dictionary,
            config.prompts().clone(),
        )
    }

    pub fn with_dictionary(
        app_id: Option<String>,
        dictionary: Dictionary,
        prompts: Prompts,
    ) -> Result<Self> {
        let launch = launch_handler(&prompts);
        let registry = builtin_registry(Arc::new(dictionary), Arc::new(prompts))?;
        tracing::info!(
            "✅ Skill ready with intents {:?} (app id check: {})",
            registry.intent_names(),
            if app_id.is_some() { "on" } else { "off" }
        );
        Ok(Self::new(app_id, Dispatcher::new(registry, launch)))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        self.verify_application_id(envelope)?;

        let session = envelope.to_session();
        let request = &envelope.request;
        if session.is_new {
            tracing::info!(
                "🆕 Session started: requestId={}, sessionId={}",
                request.request_id(),
                session.session_id.as_deref().unwrap_or("-")
            );
        }
        tracing::debug!(
            "Request {} sent at {}",
            request.request_id(),
            request.timestamp().to_rfc3339()
        );

        let event = match request {
            WireRequest::LaunchRequest { .. } => Event::Launch,
            WireRequest::IntentRequest { intent, .. } => intent.to_event(),
            WireRequest::SessionEndedRequest { reason, .. } => {
                tracing::info!(
                    "👋 Session ended: requestId={}, reason={}",
                    request.request_id(),
                    reason.as_deref().unwrap_or("unknown")
                );
                return Ok(ResponseEnvelope::acknowledge(&session));
            }
        };

        let directive = self.dispatcher.dispatch(&event, &session)?;
        tracing::debug!(
            "Responding to {} with should_end_session={}",
            request.request_id(),
            directive.should_end_session()
        );
        Ok(ResponseEnvelope::from_directive(&directive, &session))
    }

    pub fn handle_json(&self, body: &str) -> Result<String> {
        let envelope: RequestEnvelope = serde_json::from_str(body)?;
        let response = self.handle(&envelope)?;
        Ok(serde_json::to_string(&response)?)
    }

    /// 未設定 app id 代表接受任何呼叫方
    fn verify_application_id(&self, envelope: &RequestEnvelope) -> Result<()> {
        let Some(expected) = &self.app_id else {
            return Ok(());
        };

        match envelope.application_id() {
            Some(actual) if actual == expected.as_str() => Ok(()),
            actual => {
                tracing::warn!(
                    "⚠️ Rejected request {} from application {:?}",
                    envelope.request.request_id(),
                    actual
                );
                Err(SkillError::InvalidApplicationId {
                    expected: expected.clone(),
                    actual: actual.unwrap_or_default().to_string(),
                })
            }
        }
    }
}

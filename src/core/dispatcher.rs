use crate::domain::model::{Event, ResponseDirective, Session};
use crate::domain::ports::{IntentHandler, LaunchHandler};
use crate::utils::error::{Result, SkillError};
use std::collections::HashMap;
use std::sync::Arc;

/// Intent name -> handler. Built once at start-up, read-only afterwards.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 名稱區分大小寫，重複註冊視為配置錯誤
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> Result<()>
    where
        H: IntentHandler + 'static,
    {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(SkillError::DuplicateIntent { name });
        }
        tracing::debug!("Registered handler for intent '{}'", name);
        self.handlers.insert(name, Arc::new(handler));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn IntentHandler>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn intent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("intents", &self.intent_names())
            .finish()
    }
}

pub struct Dispatcher {
    registry: HandlerRegistry,
    launch: Arc<dyn LaunchHandler>,
}

impl Dispatcher {
    pub fn new<L>(registry: HandlerRegistry, launch: L) -> Self
    where
        L: LaunchHandler + 'static,
    {
        Self {
            registry,
            launch: Arc::new(launch),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// 每個事件只產生一個指令；未註冊的 intent 回傳 UnknownIntent 而非靜默略過
    pub fn dispatch(&self, event: &Event, session: &Session) -> Result<ResponseDirective> {
        match event {
            Event::Launch => {
                tracing::info!("🚀 Launch request");
                Ok(self.launch.handle(session))
            }
            Event::Intent { name, slots } => {
                let handler = self.registry.get(name).ok_or_else(|| {
                    tracing::error!(
                        "❌ No handler registered for intent '{}' (known: {:?})",
                        name,
                        self.registry.intent_names()
                    );
                    SkillError::UnknownIntent { name: name.clone() }
                })?;

                tracing::info!("🎯 Dispatching intent '{}'", name);
                Ok(handler.handle(slots, session))
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Slots, Speech};

    fn echo_handler(slots: &Slots, _session: &Session) -> ResponseDirective {
        let text = slots.value("Item").unwrap_or("nothing").to_string();
        ResponseDirective::tell(Speech::plain(text))
    }

    fn welcome(_session: &Session) -> ResponseDirective {
        ResponseDirective::ask(Speech::plain("Welcome"), Speech::plain("Say something"))
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = HandlerRegistry::new();
        registry.register("EchoIntent", echo_handler).unwrap();
        Dispatcher::new(registry, welcome)
    }

    #[test]
    fn test_register_duplicate_intent_fails() {
        let mut registry = HandlerRegistry::new();
        registry.register("EchoIntent", echo_handler).unwrap();
        let result = registry.register("EchoIntent", echo_handler);
        assert!(matches!(
            result,
            Err(SkillError::DuplicateIntent { name }) if name == "EchoIntent"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_intent_names_are_case_sensitive() {
        let mut registry = HandlerRegistry::new();
        registry.register("EchoIntent", echo_handler).unwrap();
        registry.register("echointent", echo_handler).unwrap();
        assert_eq!(registry.intent_names(), vec!["EchoIntent", "echointent"]);
        assert!(!registry.contains("ECHOINTENT"));
    }

    #[test]
    fn test_dispatch_routes_to_registered_handler() {
        let event = Event::intent("EchoIntent", Slots::new().with("Item", Some("peace")));
        let directive = dispatcher().dispatch(&event, &Session::default()).unwrap();
        assert_eq!(directive, ResponseDirective::tell(Speech::plain("peace")));
    }

    #[test]
    fn test_dispatch_launch_uses_launch_handler() {
        let directive = dispatcher()
            .dispatch(&Event::Launch, &Session::default())
            .unwrap();
        assert!(!directive.should_end_session());
        assert_eq!(directive.output_speech().text, "Welcome");
    }

    #[test]
    fn test_dispatch_unknown_intent_is_an_error() {
        let event = Event::intent("Echo", Slots::new());
        let result = dispatcher().dispatch(&event, &Session::default());
        assert!(matches!(result, Err(SkillError::UnknownIntent { name }) if name == "Echo"));
    }

    #[test]
    fn test_handlers_receive_session() {
        let mut registry = HandlerRegistry::new();
        registry
            .register("WhoAmI", |_: &Slots, session: &Session| {
                let id = session.session_id.clone().unwrap_or_default();
                ResponseDirective::tell(Speech::plain(id))
            })
            .unwrap();
        let dispatcher = Dispatcher::new(registry, welcome);

        let directive = dispatcher
            .dispatch(&Event::intent("WhoAmI", Slots::new()), &Session::new("session-1"))
            .unwrap();
        assert_eq!(directive.output_speech().text, "session-1");
    }
}

use crate::core::dispatcher::HandlerRegistry;
use crate::core::resolver::{Dictionary, Resolution};
use crate::domain::model::{Card, ResponseDirective, Session, Slots, Speech};
use crate::domain::ports::{IntentHandler, LaunchHandler};
use crate::utils::error::Result;
use crate::utils::validation::{validate_contains, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PRAYER_INTENT: &str = "PrayerIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";

pub const TOPIC_SLOT: &str = "Item";

const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Canned speech for the built-in handlers. Every field can be overridden from `[messages]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub welcome: String,
    pub welcome_reprompt: String,
    pub help: String,
    pub help_reprompt: String,
    pub goodbye: String,
    /// 必須包含 `{topic}`
    pub unknown_topic: String,
    pub missing_topic: String,
    pub recovery_reprompt: String,
    pub card_title_prefix: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            welcome: "Welcome to Silent Unity Skill for Amazon Alexa. You can say things like, tell me a prayer for comfort or healing? ... Now, how may we pray with you?".to_string(),
            welcome_reprompt: "For instructions on what you can say, please say help me.".to_string(),
            help: "You can say things such as, tell me a prayer for gratitude or, you can say exit... Now, what can I help you with?".to_string(),
            help_reprompt: "You can say things like, say a prayer for healing, or you can say exit... Now, what can I help you with?".to_string(),
            goodbye: "For one on one free, confidential prayer, please call us at 1-800-NOW-PRAY. For additional prayers, meditations and other spiritual resources, visit silentunity.org or download our uPray mobile app. Thank you".to_string(),
            unknown_topic: "I'm sorry, I currently do not know a prayer for {topic}. What else can I help with?".to_string(),
            missing_topic: "I'm sorry, I currently do not know that prayer. You can say, say a prayer for happiness or divine order. What else can I help with?".to_string(),
            recovery_reprompt: "What else can I help with?".to_string(),
            card_title_prefix: "Prayer for".to_string(),
        }
    }
}

impl Prompts {
    pub fn unknown_topic_for(&self, topic: &str) -> String {
        self.unknown_topic.replace(TOPIC_PLACEHOLDER, topic)
    }

    pub fn card_title_for(&self, topic: &str) -> String {
        format!("{} {}", self.card_title_prefix, topic)
    }
}

impl Validate for Prompts {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("messages.welcome", &self.welcome),
            ("messages.welcome_reprompt", &self.welcome_reprompt),
            ("messages.help", &self.help),
            ("messages.help_reprompt", &self.help_reprompt),
            ("messages.goodbye", &self.goodbye),
            ("messages.unknown_topic", &self.unknown_topic),
            ("messages.missing_topic", &self.missing_topic),
            ("messages.recovery_reprompt", &self.recovery_reprompt),
            ("messages.card_title_prefix", &self.card_title_prefix),
        ];
        for (field, value) in fields {
            validate_non_empty_string(field, value)?;
        }
        validate_contains("messages.unknown_topic", &self.unknown_topic, TOPIC_PLACEHOLDER)?;
        Ok(())
    }
}

/// Reads the topic slot and looks it up in the dictionary.
pub struct TopicLookupHandler {
    dictionary: Arc<Dictionary>,
    prompts: Arc<Prompts>,
    slot_name: String,
}

impl TopicLookupHandler {
    pub fn new(dictionary: Arc<Dictionary>, prompts: Arc<Prompts>) -> Self {
        Self {
            dictionary,
            prompts,
            slot_name: TOPIC_SLOT.to_string(),
        }
    }

    pub fn with_slot_name(mut self, slot_name: impl Into<String>) -> Self {
        self.slot_name = slot_name.into();
        self
    }

    fn recovery(&self, speech: String) -> ResponseDirective {
        ResponseDirective::ask(
            Speech::plain(speech),
            Speech::plain(self.prompts.recovery_reprompt.clone()),
        )
    }
}

impl IntentHandler for TopicLookupHandler {
    fn handle(&self, slots: &Slots, _session: &Session) -> ResponseDirective {
        let raw = slots.value(&self.slot_name);

        match self.dictionary.resolve(raw) {
            Resolution::Found(content) => {
                // 卡片標題保留使用者說出的大小寫，不用正規化後的鍵
                let topic = raw.map(str::trim).unwrap_or_default();
                ResponseDirective::tell_with_card(
                    Speech::plain(content),
                    Card {
                        title: self.prompts.card_title_for(topic),
                        content: content.to_string(),
                    },
                )
            }
            Resolution::NotFound => {
                let topic = raw.map(str::trim).unwrap_or_default();
                tracing::info!("🤷 Unknown topic '{}'", topic);
                self.recovery(self.prompts.unknown_topic_for(topic))
            }
            Resolution::Empty => self.recovery(self.prompts.missing_topic.clone()),
        }
    }
}

/// 固定回應：每次呼叫都回傳同一個指令的副本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedResponse(ResponseDirective);

impl FixedResponse {
    pub fn new(directive: ResponseDirective) -> Self {
        Self(directive)
    }
}

impl IntentHandler for FixedResponse {
    fn handle(&self, _slots: &Slots, _session: &Session) -> ResponseDirective {
        self.0.clone()
    }
}

impl LaunchHandler for FixedResponse {
    fn handle(&self, _session: &Session) -> ResponseDirective {
        self.0.clone()
    }
}

pub fn launch_handler(prompts: &Prompts) -> FixedResponse {
    FixedResponse::new(ResponseDirective::ask(
        Speech::plain(prompts.welcome.clone()),
        Speech::plain(prompts.welcome_reprompt.clone()),
    ))
}

pub fn builtin_registry(
    dictionary: Arc<Dictionary>,
    prompts: Arc<Prompts>,
) -> Result<HandlerRegistry> {
    let goodbye = FixedResponse::new(ResponseDirective::tell(Speech::plain(
        prompts.goodbye.clone(),
    )));
    let help = FixedResponse::new(ResponseDirective::ask(
        Speech::plain(prompts.help.clone()),
        Speech::plain(prompts.help_reprompt.clone()),
    ));

    let mut registry = HandlerRegistry::new();
    registry.register(
        PRAYER_INTENT,
        TopicLookupHandler::new(dictionary, Arc::clone(&prompts)),
    )?;
    registry.register(STOP_INTENT, goodbye.clone())?;
    registry.register(CANCEL_INTENT, goodbye)?;
    registry.register(HELP_INTENT, help)?;
    Ok(registry)
}

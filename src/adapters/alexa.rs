use crate::domain::model::{Card, Event, ResponseDirective, Session, Slots, Speech, SpeechKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub version: String,
    pub session: WireSession,
    pub request: WireRequest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSession {
    #[serde(default)]
    pub new: bool,
    pub session_id: Option<String>,
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: Option<HashMap<String, serde_json::Value>>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireRequest {
    #[serde(rename_all = "camelCase")]
    LaunchRequest {
        request_id: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    IntentRequest {
        request_id: String,
        timestamp: DateTime<Utc>,
        intent: WireIntent,
    },
    #[serde(rename_all = "camelCase")]
    SessionEndedRequest {
        request_id: String,
        timestamp: DateTime<Utc>,
        reason: Option<String>,
    },
}

impl WireRequest {
    pub fn request_id(&self) -> &str {
        match self {
            WireRequest::LaunchRequest { request_id, .. }
            | WireRequest::IntentRequest { request_id, .. }
            | WireRequest::SessionEndedRequest { request_id, .. } => request_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WireRequest::LaunchRequest { timestamp, .. }
            | WireRequest::IntentRequest { timestamp, .. }
            | WireRequest::SessionEndedRequest { timestamp, .. } => *timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireIntent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, WireSlot>,
}

impl WireIntent {
    pub fn to_event(&self) -> Event {
        let mut slots = Slots::new();
        for (key, slot) in &self.slots {
            // 以 map 的鍵為準，空字串視為未填
            let value = slot
                .value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string);
            slots.insert(key.clone(), value);
        }
        Event::intent(self.name.clone(), slots)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSlot {
    pub name: String,
    pub value: Option<String>,
}

impl RequestEnvelope {
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .application
            .as_ref()
            .map(|app| app.application_id.as_str())
    }

    /// 邊界層負責把線上格式轉成領域事件；SessionEndedRequest 不會被分派
    pub fn to_event(&self) -> Option<Event> {
        match &self.request {
            WireRequest::LaunchRequest { .. } => Some(Event::Launch),
            WireRequest::IntentRequest { intent, .. } => Some(intent.to_event()),
            WireRequest::SessionEndedRequest { .. } => None,
        }
    }

    pub fn to_session(&self) -> Session {
        Session {
            session_id: self.session.session_id.clone(),
            is_new: self.session.new,
            attributes: self.session.attributes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default)]
    pub session_attributes: HashMap<String, serde_json::Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<WireCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl From<&Speech> for OutputSpeech {
    fn from(speech: &Speech) -> Self {
        match speech.kind {
            SpeechKind::PlainText => OutputSpeech::PlainText {
                text: speech.text.clone(),
            },
            SpeechKind::Ssml => OutputSpeech::Ssml {
                ssml: format!("<speak>{}</speak>", speech.text),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireCard {
    Simple { title: String, content: String },
}

impl From<&Card> for WireCard {
    fn from(card: &Card) -> Self {
        WireCard::Simple {
            title: card.title.clone(),
            content: card.content.clone(),
        }
    }
}

impl ResponseEnvelope {
    pub fn from_directive(directive: &ResponseDirective, session: &Session) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: session.attributes.clone(),
            response: ResponseBody {
                output_speech: Some(directive.output_speech().into()),
                card: directive.card().map(WireCard::from),
                reprompt: directive.reprompt_speech().map(|speech| Reprompt {
                    output_speech: speech.into(),
                }),
                should_end_session: directive.should_end_session(),
            },
        }
    }

    /// SessionEndedRequest 的回覆：不能帶語音
    pub fn acknowledge(session: &Session) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: session.attributes.clone(),
            response: ResponseBody {
                should_end_session: true,
                ..ResponseBody::default()
            },
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 每次請求由邊界層建立的事件，分派後即丟棄
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Launch,
    Intent { name: String, slots: Slots },
}

impl Event {
    pub fn intent(name: impl Into<String>, slots: Slots) -> Self {
        Event::Intent {
            name: name.into(),
            slots,
        }
    }
}

/// Slot 名稱 -> 可選值；「有 slot 但未填」是合法狀態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    values: BTreeMap<String, Option<String>>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.insert(name, value.map(str::to_string));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    /// 已填入的值；缺少或未填都回傳 None
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Opaque per-conversation state, forwarded to handlers and echoed back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Option<String>,
    pub is_new: bool,
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            is_new: true,
            attributes: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechKind {
    PlainText,
    Ssml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speech {
    pub text: String,
    pub kind: SpeechKind,
}

impl Speech {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpeechKind::PlainText,
        }
    }

    pub fn ssml(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpeechKind::Ssml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// 每個事件恰好產生一個回應指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDirective {
    /// Keeps the session open and waits for another utterance.
    Ask {
        output: Speech,
        reprompt: Speech,
        card: Option<Card>,
    },
    /// Closes the session after this turn.
    Tell { output: Speech, card: Option<Card> },
}

impl ResponseDirective {
    pub fn ask(output: Speech, reprompt: Speech) -> Self {
        ResponseDirective::Ask {
            output,
            reprompt,
            card: None,
        }
    }

    pub fn tell(output: Speech) -> Self {
        ResponseDirective::Tell { output, card: None }
    }

    pub fn tell_with_card(output: Speech, card: Card) -> Self {
        ResponseDirective::Tell {
            output,
            card: Some(card),
        }
    }

    pub fn output_speech(&self) -> &Speech {
        match self {
            ResponseDirective::Ask { output, .. } | ResponseDirective::Tell { output, .. } => {
                output
            }
        }
    }

    pub fn reprompt_speech(&self) -> Option<&Speech> {
        match self {
            ResponseDirective::Ask { reprompt, .. } => Some(reprompt),
            ResponseDirective::Tell { .. } => None,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            ResponseDirective::Ask { card, .. } | ResponseDirective::Tell { card, .. } => {
                card.as_ref()
            }
        }
    }

    pub fn should_end_session(&self) -> bool {
        matches!(self, ResponseDirective::Tell { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_present_but_unfilled() {
        let slots = Slots::new().with("Item", None);
        assert!(slots.contains("Item"));
        assert_eq!(slots.value("Item"), None);
        assert_eq!(slots.value("Other"), None);
    }

    #[test]
    fn test_directive_accessors() {
        let ask = ResponseDirective::ask(Speech::plain("Hello"), Speech::plain("Again?"));
        assert!(!ask.should_end_session());
        assert_eq!(ask.reprompt_speech().unwrap().text, "Again?");
        assert!(ask.card().is_none());

        let tell = ResponseDirective::tell_with_card(
            Speech::plain("Bye"),
            Card {
                title: "T".to_string(),
                content: "C".to_string(),
            },
        );
        assert!(tell.should_end_session());
        assert!(tell.reprompt_speech().is_none());
        assert_eq!(tell.output_speech().text, "Bye");
        assert_eq!(tell.card().unwrap().title, "T");
    }
}

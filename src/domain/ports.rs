use crate::core::handlers::Prompts;
use crate::domain::model::{ResponseDirective, Session, Slots};

pub trait IntentHandler: Send + Sync {
    fn handle(&self, slots: &Slots, session: &Session) -> ResponseDirective;
}

impl<F> IntentHandler for F
where
    F: Fn(&Slots, &Session) -> ResponseDirective + Send + Sync,
{
    fn handle(&self, slots: &Slots, session: &Session) -> ResponseDirective {
        self(slots, session)
    }
}

pub trait LaunchHandler: Send + Sync {
    fn handle(&self, session: &Session) -> ResponseDirective;
}

impl<F> LaunchHandler for F
where
    F: Fn(&Session) -> ResponseDirective + Send + Sync,
{
    fn handle(&self, session: &Session) -> ResponseDirective {
        self(session)
    }
}

pub trait ConfigProvider: Send + Sync {
    /// None 代表不檢查呼叫方的技能識別碼
    fn app_id(&self) -> Option<&str>;
    fn dictionary_path(&self) -> Option<&str>;
    fn prompts(&self) -> &Prompts;
}

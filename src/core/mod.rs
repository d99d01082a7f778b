pub mod dispatcher;
pub mod handlers;
pub mod resolver;
pub mod skill;

pub use crate::domain::model::{Event, ResponseDirective, Session, Slots};
pub use crate::domain::ports::{ConfigProvider, IntentHandler, LaunchHandler};
pub use crate::utils::error::Result;

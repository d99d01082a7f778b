// Adapters layer: translation between the host platform's wire format and the domain model.

pub mod alexa;

// Domain layer: request/response model and the ports handlers and configs implement.

pub mod model;
pub mod ports;

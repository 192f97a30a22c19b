//! Infrastructure layer - settings, probes, transports and observability

pub mod availability;
pub mod catalog;
pub mod http_client;
pub mod invoker;
pub mod logging;
pub mod observability;
pub mod registry;
pub mod services;
pub mod settings;

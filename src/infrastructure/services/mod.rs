//! Infrastructure services

mod generation_service;

pub use generation_service::{GenerationService, ProviderModels};

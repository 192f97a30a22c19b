//! Request and response types of the HTTP API

pub mod error;
pub mod features;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use features::{FeatureSummary, FeaturesResponse, ModelsResponse, ProvidersResponse};
pub use json::Json;

//! Feature, provider and model listing responses

use serde::Serialize;

use crate::domain::{ChainConfig, ProviderStatus};
use crate::infrastructure::services::ProviderModels;

/// One registered feature and its chain, in priority order
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub feature: String,
    pub providers: Vec<String>,
}

impl From<&ChainConfig> for FeatureSummary {
    fn from(chain: &ChainConfig) -> Self {
        Self {
            feature: chain.feature().to_string(),
            providers: chain
                .provider_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturesResponse {
    pub object: &'static str,
    pub data: Vec<FeatureSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvidersResponse {
    pub feature: String,
    pub providers: Vec<ProviderStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub feature: String,
    pub providers: Vec<ProviderModels>,
}

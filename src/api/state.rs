//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::services::GenerationService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(generation_service: Arc<GenerationService>) -> Self {
        Self { generation_service }
    }
}

//! Model catalogs and their explicit TTL cache

mod cache;
mod http_catalog;

pub use cache::ModelCatalogCache;
pub use http_catalog::{HttpModelCatalog, DEFAULT_MODELS_PATH};

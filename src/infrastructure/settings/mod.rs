//! Settings sources backing provider availability

mod env_settings;
mod map_settings;

pub use env_settings::EnvSettings;
pub use map_settings::{LayeredSettings, MapSettings};

pub mod config;

pub use config::{AppConfig, DominantConfig, SamplingArea};

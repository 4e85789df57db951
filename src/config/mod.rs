mod app_config;

pub use app_config::{AppConfig, BlobConfig, LogFormat, LoggingConfig, ServerConfig, StorageConfig};

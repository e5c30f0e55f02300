mod settings;

pub use settings::{
    ApiConfig, AutosaveConfig, OtelConfig, RedisConfig, RenderConfig, ServerConfig, Settings,
    StorageConfig,
};
